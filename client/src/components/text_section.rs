//! Free-text inspection sections (complaints, anamnesis, treatment).

use leptos::prelude::*;

use crate::state::inspection_form::{InspectionDraft, TextField};

#[component]
pub fn TextSection(draft: RwSignal<InspectionDraft>, field: TextField) -> impl IntoView {
    let title = field.label();
    let placeholder = format!("введите {}", title.to_lowercase());

    view! {
        <section class="form-section">
            <h3 class="form-section__title">{title}</h3>
            <textarea
                class="field__input field__input--area"
                rows="3"
                placeholder=placeholder
                prop:value=move || draft.with(|d| d.text(field).to_owned())
                on:input=move |ev| draft.update(|d| d.set_text(field, event_target_value(&ev)))
            ></textarea>
        </section>
    }
}

/// Read-only counterpart for the details page.
#[component]
pub fn TextBlock(title: &'static str, text: String) -> impl IntoView {
    view! {
        <section class="detail-section">
            <h3 class="detail-section__title">{title}</h3>
            <p class="detail-section__text">{text}</p>
        </section>
    }
}
