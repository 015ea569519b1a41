//! Dialog registering a new patient from the patients list.

use leptos::prelude::*;

use crate::components::field_error::FieldError;
use crate::net::types::Gender;
use crate::state::account_form::{Field, FieldErrors, PatientDraft};

#[component]
pub fn PatientRegistrationModal(on_close: Callback<()>, on_created: Callback<String>) -> impl IntoView {
    let draft = RwSignal::new(PatientDraft::default());
    let errors = RwSignal::new(FieldErrors::default());
    let failure = RwSignal::new(None::<&'static str>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let payload = match draft.get().to_payload(chrono::Local::now().date_naive()) {
            Ok(payload) => payload,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(FieldErrors::default());
        failure.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::patients::create_patient(&payload).await {
                Ok(id) => on_created.run(id),
                Err(e) => {
                    leptos::logging::warn!("patient registration failed: {e}");
                    failure.try_set(Some("Не удалось зарегистрировать пациента"));
                }
            }
            busy.try_set(false);
        });
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <form class="dialog" on:click=move |ev| ev.stop_propagation() on:submit=on_submit>
                <h2>"Регистрация пациента"</h2>
                <label class="field">
                    <span class="field__label">"ФИО"</span>
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
                            <option value="">"Выберите пол"</option>
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
                <Show when=move || failure.get().is_some()>
                    <p class="form-error">{move || failure.get().unwrap_or_default()}</p>
                </Show>
                <div class="dialog__actions">
                    <button class="btn" type="button" on:click=move |_| on_close.run(())>
                        "Отмена"
                    </button>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        "Зарегистрировать"
                    </button>
                </div>
            </form>
        </div>
    }
}
