//! Diagnosis picker for the inspection form, plus the read-only list.

use leptos::prelude::*;

use crate::components::search_select::{SearchSelect, SelectOption};
use crate::net::types::{Diagnosis, DiagnosisType, Icd10Record};
use crate::state::inspection_form::{DiagnosisDraft, InspectionDraft};

fn icd_label(record: &Icd10Record) -> String {
    format!("({}) – {}", record.code, record.name)
}

/// Stages diagnoses into `draft`; rejections land in `error`.
#[component]
pub fn DiagnosisSection(draft: RwSignal<InspectionDraft>, error: RwSignal<Option<String>>) -> impl IntoView {
    let records = RwSignal::new(Vec::<Icd10Record>::new());
    let selected = RwSignal::new(None::<SelectOption>);
    let description = RwSignal::new(String::new());
    let kind = RwSignal::new(DiagnosisType::Main);

    let options = Signal::derive(move || {
        records.with(|list| list.iter().map(|r| SelectOption::new(r.id.clone(), icd_label(r))).collect::<Vec<_>>())
    });

    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    let on_search = Callback::new(move |text: String| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::dictionary::search_icd10(&text, 1).await {
                Ok(page) => {
                    records.try_set(page.records);
                }
                Err(e) => leptos::logging::warn!("icd-10 lookup failed: {e}"),
            }
        });
    });

    let on_add = move |_| {
        let picked = selected.get().and_then(|o| records.with(|list| list.iter().find(|r| r.id == o.id).cloned()));
        let staged = DiagnosisDraft {
            icd_id: picked.as_ref().map(|r| r.id.clone()).unwrap_or_default(),
            code: picked.as_ref().map(|r| r.code.clone()).unwrap_or_default(),
            name: picked.map(|r| r.name).unwrap_or_default(),
            description: description.get(),
            kind: kind.get(),
        };
        let mut result = Ok(());
        draft.update(|d| result = d.add_diagnosis(staged));
        match result {
            Ok(()) => {
                selected.set(None);
                description.set(String::new());
                kind.set(DiagnosisType::Main);
                error.set(None);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    view! {
        <section class="form-section">
            <h3 class="form-section__title">"Диагнозы"</h3>
            <ul class="staged-list">
                {move || {
                    draft
                        .get()
                        .diagnoses
                        .into_iter()
                        .enumerate()
                        .map(|(index, d)| {
                            view! {
                                <li class="staged-list__item">
                                    <span class="staged-list__title">{format!("({}) {}", d.code, d.name)}</span>
                                    <span class="staged-list__meta">"Тип в осмотре: " {d.kind.label()}</span>
                                    {(!d.description.is_empty())
                                        .then(|| view! { <span class="staged-list__meta">"Расшифровка: " {d.description.clone()}</span> })}
                                    <button
                                        class="btn btn--link staged-list__remove"
                                        type="button"
                                        on:click=move |_| draft.update(|d| d.remove_diagnosis(index))
                                    >
                                        "Удалить"
                                    </button>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </ul>
            <div class="field">
                <span class="field__label">"Болезни"</span>
                <SearchSelect placeholder="Начните вводить код или название" options=options selected=selected on_search=on_search/>
            </div>
            <label class="field">
                <textarea
                    class="field__input field__input--area"
                    rows="2"
                    placeholder="Введите комментарий"
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                ></textarea>
            </label>
            <div class="field field--radios">
                <span class="field__label">"Тип диагноза в осмотре"</span>
                {DiagnosisType::ALL
                    .into_iter()
                    .map(|option| {
                        view! {
                            <label>
                                <input
                                    type="radio"
                                    name="diagnosis-kind"
                                    prop:checked=move || kind.get() == option
                                    on:change=move |_| kind.set(option)
                                />
                                {option.label()}
                            </label>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
            <button class="btn btn--primary" type="button" on:click=on_add>
                "Добавить диагноз"
            </button>
        </section>
    }
}

#[component]
pub fn DiagnosisList(diagnoses: Vec<Diagnosis>) -> impl IntoView {
    view! {
        <section class="detail-section">
            <h3 class="detail-section__title">"Диагнозы"</h3>
            <ul class="staged-list">
                {diagnoses
                    .into_iter()
                    .map(|d| {
                        view! {
                            <li class="staged-list__item">
                                <span class="staged-list__title">{format!("({}) {}", d.code, d.name)}</span>
                                <span class="staged-list__meta">"Тип в осмотре: " {d.kind.label()}</span>
                                {d.description
                                    .filter(|text| !text.is_empty())
                                    .map(|text| view! { <span class="staged-list__meta">"Расшифровка: " {text}</span> })}
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()}
            </ul>
        </section>
    }
}
