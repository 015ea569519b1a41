//! Inline validation message under a form input.

use leptos::prelude::*;

use crate::state::account_form::{Field, FieldErrors};

#[component]
pub fn FieldError(errors: RwSignal<FieldErrors>, field: Field) -> impl IntoView {
    move || errors.get().get(field).map(|message| view! { <span class="field__error">{message}</span> })
}
