//! Signed-in doctor's profile editor.

use leptos::prelude::*;

use crate::components::account_fields::{AccountFields, EmailField};
use crate::components::guard::RequireAuth;
use crate::components::notice::{Notice, NoticeBar};
use crate::state::account_form::{AccountDraft, FieldErrors};
use crate::state::session::Session;

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <RequireAuth>
            <ProfileForm/>
        </RequireAuth>
    }
}

#[component]
fn ProfileForm() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let draft = RwSignal::new(AccountDraft::default());
    let errors = RwSignal::new(FieldErrors::default());
    let notice = RwSignal::new(None::<Notice>);
    let loaded = RwSignal::new(false);
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        let alive = crate::util::lifecycle::Alive::scoped();
        leptos::task::spawn_local(async move {
            let result = crate::net::profile::get_profile().await;
            if !alive.is_alive() {
                return;
            }
            match result {
                Ok(doctor) => draft.set(AccountDraft::from_doctor(&doctor)),
                Err(e) => {
                    leptos::logging::warn!("profile load failed: {e}");
                    notice.set(Some(Notice::error("Не удалось загрузить профиль")));
                }
            }
            loaded.set(true);
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let update = match draft.get().to_profile_update(chrono::Local::now().date_naive()) {
            Ok(update) => update,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(FieldErrors::default());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::profile::edit_profile(&update).await {
                Ok(()) => {
                    session.update(|s| s.rename(&update.name));
                    notice.try_set(Some(Notice::success("Профиль обновлен")));
                }
                Err(e) => {
                    leptos::logging::warn!("profile update failed: {e}");
                    notice.try_set(Some(Notice::error("Не удалось сохранить профиль")));
                }
            }
            busy.try_set(false);
        });
    };

    view! {
        <div class="auth-page">
            <NoticeBar notice=notice/>
            <form class="auth-card auth-card--wide" on:submit=on_submit>
                <h1 class="auth-card__title">"Профиль"</h1>
                <Show when=move || loaded.get() fallback=|| view! { <p class="page-status">"Загрузка..."</p> }>
                    <AccountFields draft=draft errors=errors/>
                    <EmailField draft=draft errors=errors/>
                    <button class="btn btn--block btn--primary" type="submit" disabled=move || busy.get()>
                        "Сохранить изменения"
                    </button>
                </Show>
            </form>
        </div>
    }
}
