//! Dialog editing an existing inspection (author only).
//!
//! The owner closes the dialog and shows the success notice from `on_saved`;
//! failures stay inside the dialog. The form opens only once every saved
//! diagnosis is matched to an ICD-10 record.

use leptos::prelude::*;

use crate::components::conclusion_section::ConclusionSection;
use crate::components::diagnosis_section::DiagnosisSection;
use crate::components::notice::{Notice, NoticeBar};
use crate::components::text_section::TextSection;
use crate::net::types::Inspection;
use crate::state::inspection_form::{InspectionDraft, TextField};

/// Look up the ICD-10 id behind each diagnosis, one request at a time.
#[cfg(feature = "hydrate")]
async fn resolve_icd_ids(diagnoses: &[crate::net::types::Diagnosis]) -> Vec<Option<String>> {
    let mut ids = Vec::with_capacity(diagnoses.len());
    for diagnosis in diagnoses {
        let id = match crate::net::dictionary::search_icd10(&diagnosis.code, 1).await {
            Ok(page) => crate::state::inspection_form::resolve_icd_id(&diagnosis.code, &page.records),
            Err(e) => {
                leptos::logging::warn!("icd-10 lookup for {} failed: {e}", diagnosis.code);
                None
            }
        };
        ids.push(id);
    }
    ids
}

#[component]
pub fn EditInspectionModal(inspection: Inspection, on_close: Callback<()>, on_saved: Callback<()>) -> impl IntoView {
    let original = inspection.conclusion;
    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    let inspection_id = inspection.id.clone();
    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    let patient_id = inspection.patient.id.clone();
    let draft = RwSignal::new(InspectionDraft::default());
    let ready = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<Notice>);
    let busy = RwSignal::new(false);
    // Set when a diagnosis could not be matched to ICD-10; the form stays closed.
    let load_error = RwSignal::new(None::<String>);
    // Bumped by "Повторить" to run the ICD-10 lookup again.
    let attempt = RwSignal::new(0_u32);

    #[cfg(feature = "hydrate")]
    {
        let alive = crate::util::lifecycle::Alive::scoped();
        let inspection = StoredValue::new(inspection);
        Effect::new(move || {
            attempt.track();
            let alive = alive.clone();
            let inspection = inspection.get_value();
            load_error.set(None);
            leptos::task::spawn_local(async move {
                let ids = resolve_icd_ids(&inspection.diagnoses).await;
                if !alive.is_alive() {
                    return;
                }
                match InspectionDraft::from_inspection(&inspection, &ids) {
                    Ok(loaded) => {
                        draft.set(loaded);
                        ready.set(true);
                    }
                    Err(e) => {
                        leptos::logging::warn!("edit form prefill failed: {e}");
                        load_error.set(Some(e.to_string()));
                    }
                }
            });
        });
    }

    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() || !ready.get() {
            return;
        }
        let current = draft.get();
        let payload = match current.to_edit_payload(original, chrono::Utc::now()) {
            Ok(payload) => payload,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        error.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let scan = current.needs_death_scan(crate::state::inspection_form::FormMode::Edit { original });
            let inspection_id = inspection_id.clone();
            let patient_id = patient_id.clone();
            leptos::task::spawn_local(async move {
                if scan {
                    match crate::net::inspections::patient_has_death(&patient_id, Some(&inspection_id)).await {
                        Ok(false) => {}
                        Ok(true) => {
                            error.try_set(Some(crate::state::inspection_form::FormError::DuplicateDeath.to_string()));
                            busy.try_set(false);
                            return;
                        }
                        Err(e) => {
                            leptos::logging::warn!("death scan failed: {e}");
                            notice.try_set(Some(Notice::error("Ошибка при обновлении осмотра")));
                            busy.try_set(false);
                            return;
                        }
                    }
                }
                match crate::net::inspections::edit_inspection(&inspection_id, &payload).await {
                    Ok(()) => on_saved.run(()),
                    Err(e) => {
                        leptos::logging::warn!("inspection edit failed: {e}");
                        notice.try_set(Some(Notice::error("Ошибка при обновлении осмотра")));
                    }
                }
                busy.try_set(false);
            });
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <form class="dialog dialog--wide" on:click=move |ev| ev.stop_propagation() on:submit=on_submit>
                <NoticeBar notice=notice/>
                <h2>"Редактировать осмотр"</h2>
                <Show when=move || load_error.get().is_some()>
                    <p class="form-error">{move || load_error.get().unwrap_or_default()}</p>
                    <button class="btn btn--secondary" type="button" on:click=move |_| attempt.update(|n| *n += 1)>
                        "Повторить"
                    </button>
                </Show>
                <Show
                    when=move || ready.get()
                    fallback=move || {
                        view! {
                            <Show when=move || load_error.get().is_none()>
                                <p class="page-status">"Загрузка..."</p>
                            </Show>
                        }
                    }
                >
                    <TextSection draft=draft field=TextField::Complaints/>
                    <TextSection draft=draft field=TextField::Anamnesis/>
                    <TextSection draft=draft field=TextField::Treatment/>
                    <DiagnosisSection draft=draft error=error/>
                    <ConclusionSection draft=draft/>
                </Show>
                <Show when=move || error.get().is_some()>
                    <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <div class="dialog__actions">
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get() || !ready.get()>
                        "Сохранить изменения"
                    </button>
                    <button class="btn btn--secondary" type="button" on:click=move |_| on_close.run(())>
                        "Отмена"
                    </button>
                </div>
            </form>
        </div>
    }
}
