//! Checkbox list for picking several values (conclusions, ICD-10 roots).

use leptos::prelude::*;

use crate::components::search_select::SelectOption;

#[component]
pub fn MultiSelect(#[prop(into)] options: Signal<Vec<SelectOption>>, selected: RwSignal<Vec<String>>) -> impl IntoView {
    view! {
        <div class="multi-select">
            {move || {
                options
                    .get()
                    .into_iter()
                    .map(|option| {
                        let id = option.id.clone();
                        let checked_id = id.clone();
                        view! {
                            <label class="multi-select__item">
                                <input
                                    type="checkbox"
                                    prop:checked=move || selected.get().contains(&checked_id)
                                    on:change=move |ev| {
                                        let on = event_target_checked(&ev);
                                        selected
                                            .update(|values| {
                                                values.retain(|v| *v != id);
                                                if on {
                                                    values.push(id.clone());
                                                }
                                            });
                                    }
                                />
                                <span>{option.label}</span>
                            </label>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
