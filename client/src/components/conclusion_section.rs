//! Conclusion select with the date input it requires.

use leptos::prelude::*;

use crate::net::types::Conclusion;
use crate::state::inspection_form::InspectionDraft;
use crate::util::datetime::{iso_to_local_input, local_input_to_iso};

#[component]
pub fn ConclusionSection(draft: RwSignal<InspectionDraft>) -> impl IntoView {
    let conclusion = move || draft.with(|d| d.conclusion);

    view! {
        <section class="form-section">
            <h3 class="form-section__title">"Заключение"</h3>
            <div class="field-row">
                <label class="field">
                    <span class="field__label">"Заключение"</span>
                    <select
                        class="field__input"
                        prop:value=move || conclusion().map(Conclusion::as_str).unwrap_or_default()
                        on:change=move |ev| {
                            let picked = Conclusion::parse(&event_target_value(&ev));
                            draft.update(|d| d.conclusion = picked);
                        }
                    >
                        <option value="">"Выберите заключение"</option>
                        {Conclusion::ALL
                            .into_iter()
                            .map(|c| view! { <option value=c.as_str()>{c.label()}</option> })
                            .collect::<Vec<_>>()}
                    </select>
                </label>
                <Show when=move || conclusion() == Some(Conclusion::Disease)>
                    <label class="field">
                        <span class="field__label">"Дата и время следующего визита"</span>
                        <input
                            class="field__input"
                            type="datetime-local"
                            prop:value=move || draft.with(|d| d.next_visit.as_deref().map(iso_to_local_input).unwrap_or_default())
                            on:change=move |ev| {
                                let value = local_input_to_iso(&event_target_value(&ev));
                                draft.update(|d| d.next_visit = value);
                            }
                        />
                    </label>
                </Show>
                <Show when=move || conclusion() == Some(Conclusion::Death)>
                    <label class="field">
                        <span class="field__label">"Дата и время смерти"</span>
                        <input
                            class="field__input"
                            type="datetime-local"
                            prop:value=move || draft.with(|d| d.death_date.as_deref().map(iso_to_local_input).unwrap_or_default())
                            on:change=move |ev| {
                                let value = local_input_to_iso(&event_target_value(&ev));
                                draft.update(|d| d.death_date = value);
                            }
                        />
                    </label>
                </Show>
            </div>
        </section>
    }
}
