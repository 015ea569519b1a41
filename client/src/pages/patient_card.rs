//! Patient medical card: header, inspection filters, and inspection history.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::components::guard::RequireAuth;
use crate::components::inspection_card::InspectionList;
use crate::components::inspection_filter::InspectionFilterForm;
use crate::components::pagination::Pagination;
use crate::net::patients::InspectionFilters;
use crate::net::types::{Gender, InspectionPage, Patient};
use crate::util::datetime::format_date;

#[component]
pub fn PatientCardPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <PatientCardView/>
        </RequireAuth>
    }
}

#[component]
fn PatientCardView() -> impl IntoView {
    let params = use_params_map();
    let patient_id = Memo::new(move |_| params.with(|p| p.get("id").unwrap_or_default()));

    let patient = RwSignal::new(None::<Patient>);
    let form = RwSignal::new(InspectionFilters::default());
    let icd_roots = RwSignal::new(Vec::<String>::new());
    let applied = RwSignal::new(InspectionFilters::default());
    let listing = RwSignal::new(None::<InspectionPage>);
    let error = RwSignal::new(None::<&'static str>);

    #[cfg(feature = "hydrate")]
    let alive = crate::util::lifecycle::Alive::scoped();

    #[cfg(feature = "hydrate")]
    Effect::new({
        let alive = alive.clone();
        move || {
            let id = patient_id.get();
            let alive = alive.clone();
            leptos::task::spawn_local(async move {
                let result = crate::net::patients::get_patient(&id).await;
                if !alive.is_alive() || patient_id.get_untracked() != id {
                    return;
                }
                match result {
                    Ok(p) => patient.set(Some(p)),
                    Err(e) => {
                        leptos::logging::warn!("patient load failed: {e}");
                        error.set(Some("Не удалось загрузить карту пациента"));
                    }
                }
            });
        }
    });

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        let id = patient_id.get();
        let filters = applied.get();
        let alive = alive.clone();
        leptos::task::spawn_local(async move {
            let result = crate::net::patients::list_inspections(&id, &filters).await;
            if !alive.is_alive() || applied.get_untracked() != filters || patient_id.get_untracked() != id {
                return;
            }
            match result {
                Ok(page) => listing.set(Some(page)),
                Err(e) => {
                    leptos::logging::warn!("inspection list failed: {e}");
                    error.set(Some("Не удалось загрузить осмотры"));
                }
            }
        });
    });

    let on_search = Callback::new(move |()| {
        let mut filters = form.get();
        filters.icd_roots = icd_roots.get();
        filters.page = 1;
        applied.set(filters);
    });
    let on_page = Callback::new(move |page: u32| applied.update(|f| f.page = page));

    let inspections = Signal::derive(move || listing.get().map(|p| p.inspections).unwrap_or_default());
    let grouped = Signal::derive(move || applied.get().grouped);
    let current = Signal::derive(move || listing.get().map_or(1, |p| p.pagination.current));
    let count = Signal::derive(move || listing.get().map_or(0, |p| p.pagination.count));
    let new_inspection_href = move || format!("/inspection/create?patient={}", patient_id.get());

    view! {
        <div class="list-page">
            <header class="list-page__header">
                <h1>"Медицинская карта пациента"</h1>
                <A href=new_inspection_href attr:class="btn btn--primary">
                    "Добавить осмотр"
                </A>
            </header>
            {move || {
                patient
                    .get()
                    .map(|p| {
                        let sign = if p.gender == Gender::Male { "♂" } else { "♀" };
                        let birthday = p.birthday.as_deref().map(format_date).unwrap_or_default();
                        view! {
                            <section class="patient-header">
                                <h2 class="patient-header__name">
                                    {p.name} <span class="patient-header__gender" title=p.gender.label()>{sign}</span>
                                </h2>
                                <p class="patient-header__birthday">"Дата рождения: " {birthday}</p>
                            </section>
                        }
                    })
            }}
            <InspectionFilterForm form=form icd_roots=icd_roots on_apply=on_search/>
            <Show when=move || error.get().is_some()>
                <p class="form-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <section class="inspections">
                <h2>"Осмотры"</h2>
                <Show
                    when=move || listing.get().is_some()
                    fallback=|| view! { <p class="page-status">"Загрузка..."</p> }
                >
                    <InspectionList inspections=inspections grouped=grouped allow_follow_up=true/>
                </Show>
                <Pagination current=current count=count on_select=on_page/>
            </section>
        </div>
    }
}
