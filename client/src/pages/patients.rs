//! Patient registry: filters, paged cards, and new-patient registration.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::guard::RequireAuth;
use crate::components::multi_select::MultiSelect;
use crate::components::pagination::Pagination;
use crate::components::patient_registration_modal::PatientRegistrationModal;
use crate::components::search_select::SelectOption;
use crate::net::patients::{PATIENT_PAGE_SIZES, PatientFilters, PatientSorting};
use crate::net::types::{Conclusion, Patient, PatientPage};
use crate::util::datetime::format_date;

#[component]
pub fn PatientsPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <PatientsView/>
        </RequireAuth>
    }
}

fn conclusion_options() -> Vec<SelectOption> {
    Conclusion::ALL.into_iter().map(|c| SelectOption::new(c.as_str(), c.label())).collect()
}

#[component]
fn PatientsView() -> impl IntoView {
    let form = RwSignal::new(PatientFilters::default());
    let conclusions = RwSignal::new(Vec::<String>::new());
    let applied = RwSignal::new(PatientFilters::default());
    let listing = RwSignal::new(None::<PatientPage>);
    let error = RwSignal::new(None::<String>);
    let show_register = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let alive = crate::util::lifecycle::Alive::scoped();
    Effect::new(move || {
        #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
        let filters = applied.get();
        #[cfg(feature = "hydrate")]
        {
            let alive = alive.clone();
            leptos::task::spawn_local(async move {
                let result = crate::net::patients::list_patients(&filters).await;
                if !alive.is_alive() || applied.get_untracked() != filters {
                    return;
                }
                match result {
                    Ok(page) => {
                        listing.set(Some(page));
                        error.set(None);
                    }
                    Err(e) => {
                        leptos::logging::warn!("patient list failed: {e}");
                        error.set(Some("Не удалось загрузить список пациентов".to_owned()));
                    }
                }
            });
        }
    });

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let mut filters = form.get();
        filters.conclusions = conclusions.get().iter().filter_map(|c| Conclusion::parse(c)).collect();
        filters.page = 1;
        applied.set(filters);
    };

    let on_page = Callback::new(move |page: u32| applied.update(|f| f.page = page));
    let on_created = Callback::new(move |_id: String| {
        show_register.set(false);
        applied.update(|f| f.page = 1);
    });

    let patients = move || listing.get().map(|p| p.patients).unwrap_or_default();
    let current = Signal::derive(move || listing.get().map_or(1, |p| p.pagination.current));
    let count = Signal::derive(move || listing.get().map_or(0, |p| p.pagination.count));

    view! {
        <div class="list-page">
            <header class="list-page__header">
                <h1>"Пациенты"</h1>
                <button class="btn btn--primary" on:click=move |_| show_register.set(true)>
                    "Регистрация нового пациента"
                </button>
            </header>
            <form class="filter-card" on:submit=on_search>
                <h2 class="filter-card__title">"Фильтры и сортировка"</h2>
                <div class="field-row">
                    <label class="field">
                        <span class="field__label">"Имя пациента"</span>
                        <input
                            class="field__input"
                            type="text"
                            placeholder="Введите имя пациента"
                            prop:value=move || form.get().name
                            on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                        />
                    </label>
                    <div class="field">
                        <span class="field__label">"Заключения осмотров"</span>
                        <MultiSelect options=Signal::derive(conclusion_options) selected=conclusions/>
                    </div>
                </div>
                <div class="field-row">
                    <label class="field field--inline">
                        <input
                            type="checkbox"
                            prop:checked=move || form.get().scheduled_visits
                            on:change=move |ev| form.update(|f| f.scheduled_visits = event_target_checked(&ev))
                        />
                        <span class="field__label">"Есть запланированные визиты"</span>
                    </label>
                    <label class="field field--inline">
                        <input
                            type="checkbox"
                            prop:checked=move || form.get().only_mine
                            on:change=move |ev| form.update(|f| f.only_mine = event_target_checked(&ev))
                        />
                        <span class="field__label">"Мои пациенты"</span>
                    </label>
                    <label class="field">
                        <span class="field__label">"Сортировка"</span>
                        <select
                            class="field__input"
                            prop:value=move || form.get().sorting.as_str()
                            on:change=move |ev| {
                                if let Some(sorting) = PatientSorting::parse(&event_target_value(&ev)) {
                                    form.update(|f| f.sorting = sorting);
                                }
                            }
                        >
                            {PatientSorting::ALL
                                .into_iter()
                                .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                .collect::<Vec<_>>()}
                        </select>
                    </label>
                </div>
                <div class="field-row">
                    <label class="field">
                        <span class="field__label">"Число пациентов на странице"</span>
                        <select
                            class="field__input"
                            prop:value=move || form.get().size.to_string()
                            on:change=move |ev| {
                                if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                                    form.update(|f| f.size = size);
                                }
                            }
                        >
                            {PATIENT_PAGE_SIZES
                                .into_iter()
                                .map(|n| view! { <option value=n.to_string()>{n}</option> })
                                .collect::<Vec<_>>()}
                        </select>
                    </label>
                    <button class="btn btn--primary filter-card__submit" type="submit">
                        "Поиск"
                    </button>
                </div>
            </form>
            <Show when=move || error.get().is_some()>
                <p class="form-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show
                when=move || listing.get().is_some()
                fallback=|| view! { <p class="page-status">"Загрузка..."</p> }
            >
                <div class="patient-grid">
                    <For each=patients key=|p| p.id.clone() let:patient>
                        <PatientCard patient=patient/>
                    </For>
                </div>
                <Show when=move || patients().is_empty()>
                    <p class="page-status">"Пациенты не найдены"</p>
                </Show>
            </Show>
            <Pagination current=current count=count on_select=on_page/>
            <Show when=move || show_register.get()>
                <PatientRegistrationModal
                    on_close=Callback::new(move |()| show_register.set(false))
                    on_created=on_created
                />
            </Show>
        </div>
    }
}

#[component]
fn PatientCard(patient: Patient) -> impl IntoView {
    let href = format!("/patient/{}", patient.id);
    let birthday = patient.birthday.as_deref().map(format_date).unwrap_or_default();
    view! {
        <A href=href attr:class="patient-card">
            <p class="patient-card__name">{patient.name}</p>
            <p>
                <span class="patient-card__label">"Пол – "</span>
                {patient.gender.label()}
            </p>
            <p>
                <span class="patient-card__label">"Дата рождения – "</span>
                {birthday}
            </p>
        </A>
    }
}
