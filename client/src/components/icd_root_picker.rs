//! ICD-10 root chapter picker used by inspection filters and reports.

#[cfg(test)]
#[path = "icd_root_picker_test.rs"]
mod icd_root_picker_test;

use leptos::prelude::*;

use crate::components::multi_select::MultiSelect;
use crate::components::search_select::SelectOption;
use crate::net::types::Icd10Record;

/// Roots ordered by code, labelled `code – name`.
#[must_use]
pub fn root_options(mut roots: Vec<Icd10Record>) -> Vec<SelectOption> {
    roots.sort_by(|a, b| a.code.cmp(&b.code));
    roots
        .into_iter()
        .map(|r| SelectOption::new(r.id, format!("{} – {}", r.code, r.name)))
        .collect()
}

/// Loads the root list once and lets the user tick any number of roots.
#[component]
pub fn IcdRootPicker(selected: RwSignal<Vec<String>>) -> impl IntoView {
    let options = RwSignal::new(Vec::<SelectOption>::new());

    #[cfg(feature = "hydrate")]
    {
        let alive = crate::util::lifecycle::Alive::scoped();
        leptos::task::spawn_local(async move {
            match crate::net::dictionary::icd10_roots().await {
                Ok(roots) if alive.is_alive() => options.set(root_options(roots)),
                Ok(_) => {}
                Err(e) => leptos::logging::warn!("icd-10 roots load failed: {e}"),
            }
        });
    }

    view! { <MultiSelect options=options selected=selected/> }
}
