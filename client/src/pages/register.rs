//! Doctor self-registration.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::account_fields::{AccountFields, EmailField};
use crate::components::field_error::FieldError;
use crate::components::search_select::{SearchSelect, SelectOption};
use crate::state::account_form::{AccountDraft, Field, FieldErrors};
use crate::state::session::Session;
use crate::util::auth::install_auth_redirect;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let navigate = use_navigate();
    install_auth_redirect(session, navigate.clone());

    let draft = RwSignal::new(AccountDraft::default());
    let errors = RwSignal::new(FieldErrors::default());
    let failure = RwSignal::new(None::<&'static str>);
    let busy = RwSignal::new(false);
    let specialities = RwSignal::new(Vec::<SelectOption>::new());
    let speciality = RwSignal::new(None::<SelectOption>);

    Effect::new(move || {
        let id = speciality.get().map(|o| o.id).unwrap_or_default();
        draft.update(|d| d.speciality_id = id);
    });

    let on_search = Callback::new(move |text: String| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::dictionary::specialities(&text, 1).await {
                Ok(page) => {
                    let options = page.specialties.into_iter().map(|s| SelectOption::new(s.id, s.name)).collect();
                    specialities.try_set(options);
                }
                Err(e) => leptos::logging::warn!("speciality lookup failed: {e}"),
            }
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match draft.get().to_register_request(chrono::Local::now().date_naive()) {
            Ok(request) => request,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(FieldErrors::default());
        failure.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::profile::register(&request).await {
                    Ok(token) => match crate::util::auth::sign_in(session, token) {
                        Ok(()) => navigate("/", NavigateOptions::default()),
                        Err(message) => {
                            failure.try_set(Some(message));
                        }
                    },
                    Err(e) => {
                        leptos::logging::warn!("registration failed: {e}");
                        failure.try_set(Some(crate::state::account_form::register_failure_message(&e)));
                    }
                }
                busy.try_set(false);
            });
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-card auth-card--wide" on:submit=on_submit>
                <h1 class="auth-card__title">"Регистрация"</h1>
                <AccountFields draft=draft errors=errors/>
                <label class="field">
                    <span class="field__label">"Специальность"</span>
                    <SearchSelect
                        placeholder="Специальность"
                        options=specialities
                        selected=speciality
                        on_search=on_search
                    />
                    <FieldError errors=errors field=Field::Speciality/>
                </label>
                <EmailField draft=draft errors=errors/>
                <label class="field">
                    <span class="field__label">"Пароль"</span>
                    <input
                        class="field__input"
                        type="password"
                        prop:value=move || draft.get().password
                        on:input=move |ev| draft.update(|d| d.password = event_target_value(&ev))
                    />
                    <FieldError errors=errors field=Field::Password/>
                </label>
                <Show when=move || failure.get().is_some()>
                    <p class="form-error">{move || failure.get().unwrap_or_default()}</p>
                </Show>
                <button class="btn btn--block btn--primary" type="submit" disabled=move || busy.get()>
                    "Зарегистрироваться"
                </button>
            </form>
        </div>
    }
}
