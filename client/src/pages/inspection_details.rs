//! Full inspection with its consultation threads.

#[cfg(test)]
#[path = "inspection_details_test.rs"]
mod inspection_details_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::comment_tree::ConsultationThread;
use crate::components::diagnosis_section::DiagnosisList;
use crate::components::edit_inspection_modal::EditInspectionModal;
use crate::components::guard::RequireAuth;
use crate::components::notice::{Notice, NoticeBar};
use crate::components::text_section::TextBlock;
use crate::net::types::{Conclusion, Inspection};
use crate::state::inspection_form::TextField;
use crate::state::session::Session;
use crate::util::datetime::{format_date, format_datetime, format_time};

/// `Амбулаторный осмотр от YYYY.MM.DD – HH:MM`.
#[must_use]
pub fn inspection_heading(date: &str) -> String {
    format!("Амбулаторный осмотр от {} – {}", format_date(date), format_time(date))
}

#[component]
pub fn InspectionDetailsPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <InspectionDetailsView/>
        </RequireAuth>
    }
}

#[component]
fn InspectionDetailsView() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let params = use_params_map();
    let inspection_id = Memo::new(move |_| params.with(|p| p.get("id").unwrap_or_default()));

    let inspection = RwSignal::new(None::<Inspection>);
    let error = RwSignal::new(None::<&'static str>);
    let editing = RwSignal::new(false);
    let notice = RwSignal::new(None::<Notice>);
    // Bumped after a successful edit to refetch.
    let revision = RwSignal::new(0_u32);

    #[cfg(feature = "hydrate")]
    {
        let alive = crate::util::lifecycle::Alive::scoped();
        Effect::new(move || {
            let id = inspection_id.get();
            revision.track();
            let alive = alive.clone();
            leptos::task::spawn_local(async move {
                let result = crate::net::inspections::get_inspection(&id).await;
                if !alive.is_alive() || inspection_id.get_untracked() != id {
                    return;
                }
                match result {
                    Ok(loaded) => {
                        inspection.set(Some(loaded));
                        error.set(None);
                    }
                    Err(e) => {
                        leptos::logging::warn!("inspection load failed: {e}");
                        error.set(Some("Не удалось загрузить осмотр"));
                    }
                }
            });
        });
    }

    let is_author = move || {
        let user = session.with(|s| s.user_id().map(ToOwned::to_owned));
        inspection.with(|i| i.as_ref().is_some_and(|i| user.as_deref() == Some(i.doctor.id.as_str())))
    };

    let on_close = Callback::new(move |()| editing.set(false));
    let on_saved = Callback::new(move |()| {
        editing.set(false);
        notice.set(Some(Notice::success("Осмотр успешно обновлен")));
        revision.update(|r| *r += 1);
    });

    view! {
        <div class="details-page">
            <NoticeBar notice=notice/>
            <Show when=move || error.get().is_some()>
                <p class="form-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            {move || {
                inspection
                    .get()
                    .map(|i| {
                        let patient_birthday = i.patient.birthday.as_deref().map(format_date).unwrap_or_default();
                        let conclusion_date = match i.conclusion {
                            Conclusion::Disease => i
                                .next_visit_date
                                .as_deref()
                                .map(|d| format!("Дата следующего визита: {}", format_datetime(d))),
                            Conclusion::Death => i
                                .death_date
                                .as_deref()
                                .map(|d| format!("Дата смерти: {}", format_datetime(d))),
                            Conclusion::Recovery => None,
                        };
                        view! {
                            <section class="details-card">
                                <header class="details-card__header">
                                    <h1>{inspection_heading(&i.date)}</h1>
                                    <Show when=is_author>
                                        <button class="btn btn--primary" on:click=move |_| editing.set(true)>
                                            "Редактировать осмотр"
                                        </button>
                                    </Show>
                                </header>
                                <p class="details-card__patient">"Пациент: " {i.patient.name.clone()}</p>
                                <p>"Пол: " {i.patient.gender.label()}</p>
                                <p>"Дата рождения: " {patient_birthday}</p>
                                <p class="details-card__doctor">"Медицинский работник: " {i.doctor.name.clone()}</p>
                            </section>
                            <TextBlock title=TextField::Complaints.label() text=i.complaints.clone()/>
                            <TextBlock title=TextField::Anamnesis.label() text=i.anamnesis.clone()/>
                            <section class="detail-section">
                                <h3 class="detail-section__title">"Консультации"</h3>
                                {if i.consultations.is_empty() {
                                    view! { <p class="page-status">"Консультации не запрашивались"</p> }.into_any()
                                } else {
                                    i.consultations
                                        .iter()
                                        .cloned()
                                        .map(|summary| view! { <ConsultationThread summary=summary/> })
                                        .collect::<Vec<_>>()
                                        .into_any()
                                }}
                            </section>
                            <DiagnosisList diagnoses=i.diagnoses.clone()/>
                            <TextBlock title=TextField::Treatment.label() text=i.treatment.clone()/>
                            <section class="detail-section">
                                <h3 class="detail-section__title">"Заключение"</h3>
                                <p class="detail-section__text">{i.conclusion.label()}</p>
                                {conclusion_date.map(|text| view! { <p class="detail-section__text">{text}</p> })}
                            </section>
                        }
                    })
            }}
            <Show when=move || editing.get() && inspection.with(Option::is_some)>
                {move || {
                    inspection
                        .get()
                        .map(|i| view! { <EditInspectionModal inspection=i on_close=on_close on_saved=on_saved/> })
                }}
            </Show>
        </div>
    }
}
