//! Route guard for pages that need a signed-in doctor.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::session::Session;
use crate::util::auth::install_unauth_redirect;

/// Renders `children` once a token is held; otherwise waits for the session
/// to settle and sends the browser to `/login`.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    install_unauth_redirect(session, use_navigate());

    view! {
        <Show
            when=move || session.get().is_authenticated()
            fallback=move || {
                view! {
                    <p class="page-status">
                        {move || if session.get().loading { "Загрузка..." } else { "Перенаправление на вход..." }}
                    </p>
                }
            }
        >
            {children()}
        </Show>
    }
}
