//! Doctor identity inputs shared by the registration and profile forms.

use leptos::prelude::*;

use crate::components::field_error::FieldError;
use crate::net::types::Gender;
use crate::state::account_form::{AccountDraft, Field, FieldErrors};

#[component]
pub fn AccountFields(draft: RwSignal<AccountDraft>, errors: RwSignal<FieldErrors>) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field__label">"Имя"</span>
            <input
                class="field__input"
                type="text"
                placeholder="Иванов Иван Иванович"
                prop:value=move || draft.get().name
                on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
            />
            <FieldError errors=errors field=Field::Name/>
        </label>
        <div class="field-row">
            <label class="field">
                <span class="field__label">"Пол"</span>
                <select
                    class="field__input"
                    prop:value=move || draft.get().gender
                    on:change=move |ev| draft.update(|d| d.gender = event_target_value(&ev))
                >
                    <option value="">"Пол"</option>
                    {Gender::ALL
                        .into_iter()
                        .map(|g| view! { <option value=g.as_str()>{g.label()}</option> })
                        .collect::<Vec<_>>()}
                </select>
                <FieldError errors=errors field=Field::Gender/>
            </label>
            <label class="field">
                <span class="field__label">"Дата рождения"</span>
                <input
                    class="field__input"
                    type="date"
                    prop:value=move || draft.get().birthday
                    on:input=move |ev| draft.update(|d| d.birthday = event_target_value(&ev))
                />
                <FieldError errors=errors field=Field::Birthday/>
            </label>
        </div>
        <label class="field">
            <span class="field__label">"Телефон"</span>
            <input
                class="field__input"
                type="tel"
                placeholder="+7 (xxx) xxx xx-xx"
                prop:value=move || draft.get().phone
                on:input=move |ev| draft.update(|d| d.phone = event_target_value(&ev))
            />
            <FieldError errors=errors field=Field::Phone/>
        </label>
    }
}

#[component]
pub fn EmailField(draft: RwSignal<AccountDraft>, errors: RwSignal<FieldErrors>) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field__label">"Email"</span>
            <input
                class="field__input"
                type="email"
                placeholder="name@example.com"
                prop:value=move || draft.get().email
                on:input=move |ev| draft.update(|d| d.email = event_target_value(&ev))
            />
            <FieldError errors=errors field=Field::Email/>
        </label>
    }
}
