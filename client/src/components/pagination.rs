//! Numbered page switcher under paged lists.

#[cfg(test)]
#[path = "pagination_test.rs"]
mod pagination_test;

use leptos::prelude::*;

/// Page buttons shown on each side of the current page.
pub const PAGE_WINDOW: u32 = 2;

/// Page numbers to render: first, last, and a window around `current`.
/// `None` marks a gap.
#[must_use]
pub fn page_items(current: u32, count: u32) -> Vec<Option<u32>> {
    if count == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, count);
    let lo = current.saturating_sub(PAGE_WINDOW).max(1);
    let hi = (current + PAGE_WINDOW).min(count);
    let mut items = Vec::new();
    if lo > 1 {
        items.push(Some(1));
        if lo > 2 {
            items.push(None);
        }
    }
    items.extend((lo..=hi).map(Some));
    if hi < count {
        if hi + 1 < count {
            items.push(None);
        }
        items.push(Some(count));
    }
    items
}

#[component]
pub fn Pagination(
    #[prop(into)] current: Signal<u32>,
    #[prop(into)] count: Signal<u32>,
    on_select: Callback<u32>,
) -> impl IntoView {
    view! {
        <Show when=move || { count.get() > 1 }>
            <nav class="pagination">
                <button
                    class="pagination__step"
                    disabled=move || current.get() <= 1
                    on:click=move |_| on_select.run(current.get_untracked().saturating_sub(1).max(1))
                >
                    "‹"
                </button>
                {move || {
                    page_items(current.get(), count.get())
                        .into_iter()
                        .map(|item| match item {
                            Some(page) => {
                                view! {
                                    <button
                                        class=move || {
                                            if current.get() == page {
                                                "pagination__page pagination__page--active"
                                            } else {
                                                "pagination__page"
                                            }
                                        }
                                        on:click=move |_| on_select.run(page)
                                    >
                                        {page}
                                    </button>
                                }
                                    .into_any()
                            }
                            None => view! { <span class="pagination__gap">"…"</span> }.into_any(),
                        })
                        .collect::<Vec<_>>()
                }}
                <button
                    class="pagination__step"
                    disabled=move || current.get() >= count.get()
                    on:click=move |_| on_select.run((current.get_untracked() + 1).min(count.get_untracked()))
                >
                    "›"
                </button>
            </nav>
        </Show>
    }
}
