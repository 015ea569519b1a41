//! Top navigation bar: brand, section links, and the doctor menu.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::session::Session;

const SECTIONS: [(&str, &str); 3] = [
    ("/patients", "Пациенты"),
    ("/consultations", "Консультации"),
    ("/reports", "Отчеты и статистика"),
];

/// First path segment, used to highlight the active section.
fn section_of(path: &str) -> &str {
    path.trim_start_matches('/').split('/').next().unwrap_or_default()
}

#[component]
pub fn Navbar() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let location = use_location();
    let navigate = use_navigate();
    let menu_open = RwSignal::new(false);

    let authenticated = move || session.get().is_authenticated();

    // Nested `Show` children are re-run, so the handler lives in a store.
    let logout = StoredValue::new_local(move || {
        menu_open.set(false);
        crate::util::auth::sign_out(session, navigate.clone());
    });

    view! {
        <header class="navbar">
            <A href="/" attr:class="navbar__brand">
                <span class="navbar__brand-top">"Try not to"</span>
                <span class="navbar__brand-bottom">"DIE"</span>
            </A>
            <Show when=authenticated>
                <nav class="navbar__sections">
                    {SECTIONS
                        .iter()
                        .map(|(href, label)| {
                            let key = section_of(href);
                            view! {
                                <A
                                    href=*href
                                    attr:class=move || {
                                        if section_of(&location.pathname.get()) == key {
                                            "navbar__link navbar__link--active"
                                        } else {
                                            "navbar__link"
                                        }
                                    }
                                >
                                    {*label}
                                </A>
                            }
                        })
                        .collect::<Vec<_>>()}
                </nav>
            </Show>
            <span class="navbar__spacer"></span>
            <Show
                when=authenticated
                fallback=|| view! { <A href="/login" attr:class="navbar__login">"Вход"</A> }
            >
                <div class="navbar__user">
                    <button class="navbar__user-toggle" on:click=move |_| menu_open.update(|o| *o = !*o)>
                        {move || session.get().display_name()}
                        " ▾"
                    </button>
                    <Show when=move || menu_open.get()>
                        <ul class="navbar__menu">
                            <li>
                                <A href="/profile" on:click=move |_| menu_open.set(false)>
                                    "Профиль"
                                </A>
                            </li>
                            <li>
                                <button class="navbar__menu-item" on:click=move |_| logout.with_value(|f| f())>
                                    "Выход"
                                </button>
                            </li>
                        </ul>
                    </Show>
                </div>
            </Show>
        </header>
    }
}
