//! Visit counts per patient and ICD-10 root over a period.

use leptos::prelude::*;

use crate::components::guard::RequireAuth;
use crate::components::icd_root_picker::IcdRootPicker;
use crate::components::notice::{Notice, NoticeBar};
use crate::state::report::{ReportRow, ReportTable, report_params};
use crate::util::datetime::input_to_iso_in;

#[component]
pub fn ReportsPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <ReportsView/>
        </RequireAuth>
    }
}

#[component]
fn ReportsView() -> impl IntoView {
    let start = RwSignal::new(String::new());
    let end = RwSignal::new(String::new());
    let icd_roots = RwSignal::new(Vec::<String>::new());
    let table = RwSignal::new(None::<ReportTable>);
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<Notice>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        // Report dates are calendar days; send them as UTC midnight.
        let start_iso = input_to_iso_in(&start.get(), &chrono::Utc);
        let end_iso = input_to_iso_in(&end.get(), &chrono::Utc);
        #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
        let params = match report_params(start_iso.as_deref(), end_iso.as_deref(), icd_roots.get()) {
            Ok(params) => params,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        error.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::dictionary::icd_roots_report(&params).await {
                Ok(report) => {
                    table.try_set(Some(ReportTable::from_report(&report)));
                    notice.try_set(Some(Notice::success("Отчёт успешно создан")));
                }
                Err(e) => {
                    leptos::logging::warn!("report failed: {e}");
                    notice.try_set(Some(Notice::error("Ошибка при создании отчёта, попробуйте поменять даты")));
                }
            }
            busy.try_set(false);
        });
    };

    view! {
        <div class="list-page">
            <NoticeBar notice=notice/>
            <header class="list-page__header">
                <h1>"Статистика осмотров"</h1>
            </header>
            <form class="filter-card" on:submit=on_submit>
                <div class="field-row">
                    <label class="field">
                        <span class="field__label">"Дата с"</span>
                        <input
                            class="field__input"
                            type="date"
                            prop:value=move || start.get()
                            on:input=move |ev| start.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="field">
                        <span class="field__label">"Дата по"</span>
                        <input
                            class="field__input"
                            type="date"
                            prop:value=move || end.get()
                            on:input=move |ev| end.set(event_target_value(&ev))
                        />
                    </label>
                </div>
                <div class="field">
                    <span class="field__label">"МКБ-10"</span>
                    <IcdRootPicker selected=icd_roots/>
                </div>
                <Show when=move || error.get().is_some()>
                    <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <button class="btn btn--primary filter-card__submit" type="submit" disabled=move || busy.get()>
                    "Сгенерировать отчет"
                </button>
            </form>
            {move || table.get().map(|t| view! { <ReportGrid table=t/> })}
        </div>
    }
}

#[component]
fn ReportGrid(table: ReportTable) -> impl IntoView {
    let row_view = |row: ReportRow, summary: bool| {
        view! {
            <tr class:report__summary=summary>
                <td>{row.patient}</td>
                <td>{row.birthdate}</td>
                <td>{row.gender}</td>
                {row.visits.into_iter().map(|n| view! { <td class="report__count">{n}</td> }).collect::<Vec<_>>()}
            </tr>
        }
    };

    view! {
        <div class="report">
            <table class="report__table">
                <thead>
                    <tr>
                        <th>"Пациент"</th>
                        <th>"Дата рождения"</th>
                        <th>"Пол"</th>
                        {table.columns.iter().map(|c| view! { <th>{c.clone()}</th> }).collect::<Vec<_>>()}
                    </tr>
                </thead>
                <tbody>
                    {table.rows.into_iter().map(|row| row_view(row, false)).collect::<Vec<_>>()}
                    {row_view(table.summary, true)}
                </tbody>
            </table>
        </div>
    }
}
