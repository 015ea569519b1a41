//! Text-filtered single select backed by a server-side lookup.
//!
//! The owner runs the lookup in `on_search` and writes results to `options`;
//! this component only tracks the query text and the open state.

use leptos::prelude::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into() }
    }
}

#[component]
pub fn SearchSelect(
    placeholder: &'static str,
    #[prop(into)] options: Signal<Vec<SelectOption>>,
    selected: RwSignal<Option<SelectOption>>,
    on_search: Callback<String>,
) -> impl IntoView {
    let query = RwSignal::new(String::new());
    let open = RwSignal::new(false);

    // Keep the input text in step with selections made elsewhere (prefill, reset).
    Effect::new(move || {
        let label = selected.get().map(|o| o.label).unwrap_or_default();
        query.set(label);
    });

    let on_input = move |ev| {
        let text = event_target_value(&ev);
        query.set(text.clone());
        open.set(true);
        on_search.run(text);
    };

    view! {
        <div class="search-select">
            <input
                class="search-select__input"
                type="text"
                placeholder=placeholder
                prop:value=move || query.get()
                on:input=on_input
                on:focus=move |_| {
                    open.set(true);
                    on_search.run(String::new());
                }
            />
            <Show when=move || selected.get().is_some()>
                <button class="search-select__clear" type="button" on:click=move |_| selected.set(None)>
                    "×"
                </button>
            </Show>
            <Show when=move || open.get()>
                <ul class="search-select__options" on:mouseleave=move |_| open.set(false)>
                    {move || {
                        let items = options.get();
                        if items.is_empty() {
                            return view! { <li class="search-select__empty">"Ничего не найдено"</li> }.into_any();
                        }
                        items
                            .into_iter()
                            .map(|option| {
                                let label = option.label.clone();
                                view! {
                                    <li
                                        class="search-select__option"
                                        on:click=move |_| {
                                            selected.set(Some(option.clone()));
                                            open.set(false);
                                        }
                                    >
                                        {label}
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()
                            .into_any()
                    }}
                </ul>
            </Show>
        </div>
    }
}
