//! New inspection for a patient, optionally continuing an earlier one.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached from the patient card (`?patient=`) or from an inspection card's
//! follow-up link (`?patient=&previous=`). Picking a previous inspection
//! carries its main diagnosis over. Submitting with a Death conclusion first
//! scans the patient's inspections so a second Death is refused before the
//! request is sent.

#[cfg(test)]
#[path = "inspection_create_test.rs"]
mod inspection_create_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::conclusion_section::ConclusionSection;
use crate::components::consultation_section::ConsultationSection;
use crate::components::diagnosis_section::DiagnosisSection;
use crate::components::guard::RequireAuth;
use crate::components::notice::{Notice, NoticeBar};
use crate::components::search_select::{SearchSelect, SelectOption};
use crate::components::text_section::TextSection;
use crate::net::types::{Diagnosis, DiagnosisType, Gender, InspectionShort, Patient};
use crate::state::inspection_form::{InspectionDraft, TextField};
use crate::util::datetime::{format_date, iso_to_local_input, local_input_to_iso, now_iso};

/// Delay between the success notice and leaving for the patient card.
pub const LEAVE_AFTER_SAVE_MS: u32 = 1000;

/// Dropdown label for a previous inspection: `date - code - name`.
#[must_use]
pub fn previous_label(date: &str, diagnosis: &Diagnosis) -> String {
    format!("{} - {} - {}", format_date(date), diagnosis.code, diagnosis.name)
}

#[component]
pub fn InspectionCreatePage() -> impl IntoView {
    view! {
        <RequireAuth>
            <InspectionCreateView/>
        </RequireAuth>
    }
}

#[component]
fn InspectionCreateView() -> impl IntoView {
    let query = use_query_map();
    let patient_id = Memo::new(move |_| query.with(|q| q.get("patient").unwrap_or_default()));
    let previous_param = query.with_untracked(|q| q.get("previous")).filter(|id| !id.is_empty());
    let navigate = use_navigate();

    let patient = RwSignal::new(None::<Patient>);
    let draft = RwSignal::new(InspectionDraft {
        date: Some(now_iso()),
        follow_up: previous_param.is_some(),
        ..InspectionDraft::default()
    });
    let candidates = RwSignal::new(Vec::<InspectionShort>::new());
    let previous = RwSignal::new(None::<SelectOption>);
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<Notice>);
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let alive = crate::util::lifecycle::Alive::scoped();

    #[cfg(feature = "hydrate")]
    Effect::new({
        let alive = alive.clone();
        move || {
            let id = patient_id.get();
            let alive = alive.clone();
            leptos::task::spawn_local(async move {
                match crate::net::patients::get_patient(&id).await {
                    Ok(p) if alive.is_alive() => patient.set(Some(p)),
                    Ok(_) => {}
                    Err(e) => {
                        leptos::logging::warn!("patient load failed: {e}");
                        error.try_set(Some("Не удалось загрузить данные пациента".to_owned()));
                    }
                }
            });
        }
    });

    // Follow-up link: preselect the inspection being continued.
    #[cfg(feature = "hydrate")]
    if let Some(previous_id) = previous_param.clone() {
        let alive = alive.clone();
        leptos::task::spawn_local(async move {
            match crate::net::inspections::get_inspection(&previous_id).await {
                Ok(inspection) if alive.is_alive() => {
                    let main = inspection
                        .diagnoses
                        .iter()
                        .find(|d| d.kind == DiagnosisType::Main)
                        .cloned()
                        .unwrap_or_default();
                    candidates.update(|list| {
                        list.retain(|c| c.id != inspection.id);
                        list.push(InspectionShort {
                            id: inspection.id.clone(),
                            create_time: inspection.create_time.clone(),
                            date: inspection.date.clone(),
                            diagnosis: main.clone(),
                        });
                    });
                    previous.set(Some(SelectOption::new(inspection.id, previous_label(&inspection.date, &main))));
                }
                Ok(_) => {}
                Err(e) => leptos::logging::warn!("previous inspection load failed: {e}"),
            }
        });
    }

    // Selecting a previous inspection records it and carries its main diagnosis.
    Effect::new(move || {
        let picked = previous.get().map(|o| o.id);
        draft.update(|d| d.previous_id.clone_from(&picked));
        let Some(id) = picked else {
            return;
        };
        #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
        let Some(main) = candidates.with_untracked(|list| list.iter().find(|c| c.id == id).map(|c| c.diagnosis.clone()))
        else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::dictionary::search_icd10(&main.code, 1).await {
                Ok(page) => {
                    match crate::state::inspection_form::DiagnosisDraft::from_lookup(&main, &page.records) {
                        Some(prefill) => {
                            draft.try_update(|d| d.prefill_main(prefill));
                        }
                        None => leptos::logging::warn!("no icd-10 record for {}", main.code),
                    }
                }
                Err(e) => leptos::logging::warn!("icd-10 lookup failed: {e}"),
            }
        });
    });

    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    let on_search_previous = Callback::new(move |text: String| {
        #[cfg(feature = "hydrate")]
        {
            let id = patient_id.get_untracked();
            leptos::task::spawn_local(async move {
                match crate::net::patients::search_inspections(&id, &text).await {
                    Ok(list) => {
                        candidates.try_set(list);
                    }
                    Err(e) => leptos::logging::warn!("inspection search failed: {e}"),
                }
            });
        }
    });
    let previous_options = Signal::derive(move || {
        candidates.with(|list| {
            list.iter()
                .map(|c| SelectOption::new(c.id.clone(), previous_label(&c.date, &c.diagnosis)))
                .collect::<Vec<_>>()
        })
    });

    let on_cancel = {
        let navigate = navigate.clone();
        move |_| navigate(&format!("/patient/{}", patient_id.get_untracked()), NavigateOptions::default())
    };

    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let current = draft.get();
        let payload = match current.to_create_payload(chrono::Utc::now()) {
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
            let navigate = navigate.clone();
            let id = patient_id.get_untracked();
            let scan = current.needs_death_scan(crate::state::inspection_form::FormMode::Create);
            leptos::task::spawn_local(async move {
                if scan {
                    match crate::net::inspections::patient_has_death(&id, None).await {
                        Ok(false) => {}
                        Ok(true) => {
                            error.try_set(Some(crate::state::inspection_form::FormError::DuplicateDeath.to_string()));
                            busy.try_set(false);
                            return;
                        }
                        Err(e) => {
                            leptos::logging::warn!("death scan failed: {e}");
                            notice.try_set(Some(Notice::error("Ошибка при создании осмотра")));
                            busy.try_set(false);
                            return;
                        }
                    }
                }
                match crate::net::patients::create_inspection(&id, &payload).await {
                    Ok(created) => {
                        leptos::logging::log!("inspection {created} created");
                        notice.try_set(Some(Notice::success("Осмотр успешно создан")));
                        gloo_timers::future::TimeoutFuture::new(LEAVE_AFTER_SAVE_MS).await;
                        navigate(&format!("/patient/{id}"), NavigateOptions::default());
                    }
                    Err(e) => {
                        leptos::logging::warn!("inspection create failed: {e}");
                        notice.try_set(Some(Notice::error("Ошибка при создании осмотра")));
                        busy.try_set(false);
                    }
                }
            });
        }
    };

    view! {
        <div class="form-page">
            <NoticeBar notice=notice/>
            <h1>"Создание осмотра"</h1>
            <form class="form-card" on:submit=on_submit>
                <section class="form-section">
                    {move || {
                        patient
                            .get()
                            .map(|p| {
                                let sign = if p.gender == Gender::Male { "♂" } else { "♀" };
                                let birthday = p.birthday.as_deref().map(format_date).unwrap_or_default();
                                view! {
                                    <div class="patient-header">
                                        <h2 class="patient-header__name">
                                            {p.name} <span class="patient-header__gender">{sign}</span>
                                        </h2>
                                        <p class="patient-header__birthday">"Дата рождения: " {birthday}</p>
                                    </div>
                                }
                            })
                    }}
                    <div class="switch-row">
                        <span class:switch-row__active=move || !draft.with(|d| d.follow_up)>"Первичный осмотр"</span>
                        <label class="switch">
                            <input
                                type="checkbox"
                                prop:checked=move || draft.with(|d| d.follow_up)
                                on:change=move |ev| {
                                    let on = event_target_checked(&ev);
                                    draft.update(|d| d.follow_up = on);
                                    if !on {
                                        previous.set(None);
                                    }
                                }
                            />
                        </label>
                        <span class:switch-row__active=move || draft.with(|d| d.follow_up)>"Повторный осмотр"</span>
                    </div>
                    <Show when=move || draft.with(|d| d.follow_up)>
                        <div class="field">
                            <span class="field__label">"Предыдущий осмотр"</span>
                            <SearchSelect
                                placeholder="Выберите осмотр"
                                options=previous_options
                                selected=previous
                                on_search=on_search_previous
                            />
                        </div>
                    </Show>
                    <label class="field">
                        <span class="field__label">"Дата осмотра"</span>
                        <input
                            class="field__input"
                            type="datetime-local"
                            prop:value=move || draft.with(|d| d.date.as_deref().map(iso_to_local_input).unwrap_or_default())
                            on:change=move |ev| {
                                let value = local_input_to_iso(&event_target_value(&ev));
                                draft.update(|d| d.date = value);
                            }
                        />
                    </label>
                </section>
                <TextSection draft=draft field=TextField::Complaints/>
                <TextSection draft=draft field=TextField::Anamnesis/>
                <ConsultationSection draft=draft error=error/>
                <DiagnosisSection draft=draft error=error/>
                <TextSection draft=draft field=TextField::Treatment/>
                <ConclusionSection draft=draft/>
                <Show when=move || error.get().is_some()>
                    <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <div class="form-card__actions">
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        "Сохранить осмотр"
                    </button>
                    <button class="btn btn--secondary" type="button" on:click=on_cancel>
                        "Отмена"
                    </button>
                </div>
            </form>
        </div>
    }
}
