//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components apply identical unauthenticated redirect behavior, and
//! every sign-in path (login, register, page load) resolves the profile the
//! same way.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::Session;

/// Whether a guarded page should leave for `/login`.
#[must_use]
pub fn should_redirect_unauth(session: &Session) -> bool {
    !session.loading && !session.is_authenticated()
}

/// Whether a guest-only page (login, register) should leave for `/`.
#[must_use]
pub fn should_redirect_auth(session: &Session) -> bool {
    session.is_authenticated()
}

/// Redirect to `/login` whenever the session has settled without a token.
pub fn install_unauth_redirect<F>(session: RwSignal<Session>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&session.get()) {
            navigate("/login", NavigateOptions::default());
        }
    });
}

/// Redirect to `/` whenever a token is present.
pub fn install_auth_redirect<F>(session: RwSignal<Session>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_auth(&session.get()) {
            navigate("/", NavigateOptions::default());
        }
    });
}

/// Fetch the profile for a held token and settle the session.
pub fn init_session(session: RwSignal<Session>) {
    if !session.with_untracked(Session::needs_profile) {
        return;
    }
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::profile::get_profile().await {
            Ok(doctor) => session.update(|s| s.apply_profile(doctor)),
            Err(crate::net::api::ApiError::Unauthorized) => session.update(Session::clear),
            Err(e) => {
                leptos::logging::warn!("profile load failed: {e}");
                session.update(Session::profile_failed);
            }
        }
    });
}

/// Shown when the browser refuses to store the token.
pub const TOKEN_NOT_SAVED: &str = "Не удалось сохранить вход: браузер запретил доступ к хранилищу";

/// Take `token` into the session only if it reached storage; requests read
/// the token from there.
///
/// # Errors
///
/// [`TOKEN_NOT_SAVED`] when `persisted` is false; the session is untouched.
pub fn adopt_token(session: &mut Session, token: String, persisted: bool) -> Result<(), &'static str> {
    if !persisted {
        return Err(TOKEN_NOT_SAVED);
    }
    session.signed_in(token);
    Ok(())
}

/// Persist a freshly issued token and load its profile.
///
/// # Errors
///
/// [`TOKEN_NOT_SAVED`] when storage rejected the token.
pub fn sign_in(session: RwSignal<Session>, token: String) -> Result<(), &'static str> {
    let persisted = crate::util::storage::save_token(&token);
    let mut outcome = Err(TOKEN_NOT_SAVED);
    session.update(|s| outcome = adopt_token(s, token, persisted));
    outcome?;
    init_session(session);
    Ok(())
}

/// Log out server-side (best effort), then drop local credentials.
pub fn sign_out<F>(session: RwSignal<Session>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        if let Err(e) = crate::net::profile::logout().await {
            leptos::logging::warn!("logout failed: {e}");
        }
        crate::util::storage::clear_token();
        session.update(Session::clear);
        navigate("/login", NavigateOptions::default());
    });
    #[cfg(not(feature = "hydrate"))]
    {
        session.update(Session::clear);
        navigate("/login", NavigateOptions::default());
    }
}
