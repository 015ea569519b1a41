//! Inspections that requested a consultation in the doctor's speciality.

use leptos::prelude::*;

use crate::components::guard::RequireAuth;
use crate::components::inspection_card::InspectionList;
use crate::components::inspection_filter::InspectionFilterForm;
use crate::components::pagination::Pagination;
use crate::net::patients::InspectionFilters;
use crate::net::types::InspectionPage;

#[component]
pub fn ConsultationsPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <ConsultationsView/>
        </RequireAuth>
    }
}

#[component]
fn ConsultationsView() -> impl IntoView {
    let form = RwSignal::new(InspectionFilters::default());
    let icd_roots = RwSignal::new(Vec::<String>::new());
    let applied = RwSignal::new(InspectionFilters::default());
    let listing = RwSignal::new(None::<InspectionPage>);
    let error = RwSignal::new(None::<&'static str>);

    #[cfg(feature = "hydrate")]
    {
        let alive = crate::util::lifecycle::Alive::scoped();
        Effect::new(move || {
            let filters = applied.get();
            let alive = alive.clone();
            leptos::task::spawn_local(async move {
                let result = crate::net::consultations::list_consultations(&filters).await;
                if !alive.is_alive() || applied.get_untracked() != filters {
                    return;
                }
                match result {
                    Ok(page) => {
                        listing.set(Some(page));
                        error.set(None);
                    }
                    Err(e) => {
                        leptos::logging::warn!("consultation list failed: {e}");
                        error.set(Some("Не удалось загрузить консультации"));
                    }
                }
            });
        });
    }

    let on_search = Callback::new(move |()| {
        let mut filters = form.get();
        filters.icd_roots = icd_roots.get();
        filters.page = 1;
        applied.set(filters);
    });
    let on_page = Callback::new(move |page: u32| applied.update(|f| f.page = page));

    let inspections = Signal::derive(move || listing.get().map(|p| p.inspections).unwrap_or_default());
    let grouped = Signal::derive(move || applied.get().grouped);
    let current = Signal::derive(move || listing.get().map_or(1, |p| p.pagination.current));
    let count = Signal::derive(move || listing.get().map_or(0, |p| p.pagination.count));

    view! {
        <div class="list-page">
            <header class="list-page__header">
                <h1>"Консультации"</h1>
            </header>
            <InspectionFilterForm form=form icd_roots=icd_roots on_apply=on_search/>
            <Show when=move || error.get().is_some()>
                <p class="form-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show
                when=move || listing.get().is_some()
                fallback=|| view! { <p class="page-status">"Загрузка..."</p> }
            >
                <InspectionList inspections=inspections grouped=grouped show_patient=true/>
            </Show>
            <Pagination current=current count=count on_select=on_page/>
        </div>
    }
}
