//! Email + password sign-in.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::components::field_error::FieldError;
use crate::state::account_form::{Field, FieldErrors, LoginDraft};
use crate::state::session::Session;
use crate::util::auth::install_auth_redirect;

/// How long the submit button shows the failure text.
pub const LOGIN_ERROR_MS: u32 = 1200;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let navigate = use_navigate();
    install_auth_redirect(session, navigate.clone());

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::default());
    let failure = RwSignal::new(None::<&'static str>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let draft = LoginDraft { email: email.get(), password: password.get() };
        let request = match draft.to_request() {
            Ok(request) => request,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(FieldErrors::default());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::profile::login(&request).await {
                    Ok(token) => match crate::util::auth::sign_in(session, token) {
                        Ok(()) => navigate("/", NavigateOptions::default()),
                        Err(message) => {
                            failure.try_set(Some(message));
                        }
                    },
                    Err(e) => {
                        leptos::logging::warn!("login failed: {e}");
                        failure.try_set(Some(crate::state::account_form::login_failure_message(&e)));
                        gloo_timers::future::TimeoutFuture::new(LOGIN_ERROR_MS).await;
                        failure.try_set(None);
                    }
                }
                busy.try_set(false);
            });
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1 class="auth-card__title">"Вход"</h1>
                <label class="field">
                    <span class="field__label">"Email"</span>
                    <input
                        class="field__input"
                        type="email"
                        placeholder="name@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <FieldError errors=errors field=Field::Email/>
                </label>
                <label class="field">
                    <span class="field__label">"Пароль"</span>
                    <input
                        class="field__input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <FieldError errors=errors field=Field::Password/>
                </label>
                <button
                    class=move || if failure.get().is_some() { "btn btn--block btn--danger" } else { "btn btn--block btn--primary" }
                    type="submit"
                    disabled=move || busy.get()
                >
                    {move || failure.get().unwrap_or("Войти")}
                </button>
                <A href="/register" attr:class="btn btn--block btn--secondary">
                    "Регистрация"
                </A>
            </form>
        </div>
    }
}
