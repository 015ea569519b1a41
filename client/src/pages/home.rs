//! Landing page.

use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <h1 class="home-page__title">"Добро пожаловать в медицинскую информационную систему"</h1>
        </div>
    }
}
