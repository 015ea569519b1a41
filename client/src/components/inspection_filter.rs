//! Filter form above inspection lists: ICD-10 roots, grouping, page size.

use leptos::prelude::*;

use crate::components::icd_root_picker::IcdRootPicker;
use crate::net::patients::{INSPECTION_PAGE_SIZES, InspectionFilters};

/// Edits `form` and `icd_roots` in place; `on_apply` fires on submit.
#[component]
pub fn InspectionFilterForm(
    form: RwSignal<InspectionFilters>,
    icd_roots: RwSignal<Vec<String>>,
    on_apply: Callback<()>,
) -> impl IntoView {
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        on_apply.run(());
    };

    view! {
        <form class="filter-card" on:submit=on_submit>
            <div class="field-row">
                <div class="field">
                    <span class="field__label">"МКБ-10"</span>
                    <IcdRootPicker selected=icd_roots/>
                </div>
                <div class="field field--radios">
                    <label>
                        <input
                            type="radio"
                            name="grouping"
                            prop:checked=move || form.get().grouped
                            on:change=move |_| form.update(|f| f.grouped = true)
                        />
                        "Сгруппировать по повторным"
                    </label>
                    <label>
                        <input
                            type="radio"
                            name="grouping"
                            prop:checked=move || !form.get().grouped
                            on:change=move |_| form.update(|f| f.grouped = false)
                        />
                        "Показать все"
                    </label>
                </div>
            </div>
            <div class="field-row">
                <label class="field">
                    <span class="field__label">"Число осмотров на странице"</span>
                    <select
                        class="field__input"
                        prop:value=move || form.get().size.to_string()
                        on:change=move |ev| {
                            if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                                form.update(|f| f.size = size);
                            }
                        }
                    >
                        {INSPECTION_PAGE_SIZES
                            .into_iter()
                            .map(|n| view! { <option value=n.to_string()>{n}</option> })
                            .collect::<Vec<_>>()}
                    </select>
                </label>
                <button class="btn btn--primary filter-card__submit" type="submit">
                    "Поиск"
                </button>
            </div>
        </form>
    }
}
