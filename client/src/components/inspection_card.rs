//! Inspection preview cards with follow-up chain expansion.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shared by the patient card and the consultations list. The list owns a
//! [`ChainState`]; expanding a grouped root fetches its chain, and followers
//! render below the root indented by their depth in the chain.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::types::{Conclusion, InspectionPreview};
use crate::state::chain::{ChainState, ChainToggle, can_add_follow_up, can_expand, indent_px, top_level};
use crate::util::datetime::format_date;

/// Create-page URL for a follow-up of `inspection`.
#[must_use]
pub fn follow_up_href(inspection: &InspectionPreview) -> String {
    format!("/inspection/create?patient={}&previous={}", inspection.patient_id, inspection.id)
}

#[component]
pub fn InspectionList(
    #[prop(into)] inspections: Signal<Vec<InspectionPreview>>,
    #[prop(into)] grouped: Signal<bool>,
    /// Show the patient name on each card (consultations list).
    #[prop(optional)]
    show_patient: bool,
    /// Offer "add inspection" on cards that have no follower yet.
    #[prop(optional)]
    allow_follow_up: bool,
) -> impl IntoView {
    let chains = RwSignal::new(ChainState::default());

    // A new page or filter invalidates every open chain.
    Effect::new(move || {
        inspections.track();
        grouped.track();
        chains.update(ChainState::clear);
    });

    #[cfg(feature = "hydrate")]
    let alive = crate::util::lifecycle::Alive::scoped();
    let on_toggle = Callback::new(move |root_id: String| {
        #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
        let Some(ChainToggle::Fetch(ticket)) = chains.try_update(|c| c.toggle(&root_id)) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            let alive = alive.clone();
            leptos::task::spawn_local(async move {
                let result = crate::net::inspections::get_chain(&root_id).await;
                if !alive.is_alive() {
                    return;
                }
                match result {
                    Ok(chain) => chains.update(|c| {
                        if !c.finish(&root_id, ticket, chain) {
                            leptos::logging::log!("dropped stale chain for {root_id}");
                        }
                    }),
                    Err(e) => {
                        leptos::logging::warn!("chain load failed: {e}");
                        chains.update(|c| c.fail(&root_id, ticket));
                    }
                }
            });
        }
    });

    let roots = move || {
        let list = inspections.get();
        let grouped = grouped.get();
        top_level(&list, grouped)
            .into_iter()
            .map(|i| (i.clone(), can_expand(i, grouped)))
            .collect::<Vec<_>>()
    };

    view! {
        <Show
            when=move || !inspections.get().is_empty()
            fallback=|| view! { <p class="page-status">"Нет доступных осмотров"</p> }
        >
            <div class="inspection-grid">
                <For each=roots key=|(i, expandable)| (i.id.clone(), *expandable) let:entry>
                    {
                        let (root, expandable) = entry;
                        let root_id = root.id.clone();
                        let rows_id = root_id.clone();
                        view! {
                            <div class="inspection-chain">
                                <InspectionCard
                                    inspection=root
                                    level=0
                                    show_patient=show_patient
                                    allow_follow_up=allow_follow_up
                                    expandable=expandable
                                    chains=chains
                                    on_toggle=on_toggle
                                />
                                {move || {
                                    chains
                                        .with(|c| c.rows(&rows_id))
                                        .into_iter()
                                        .map(|row| {
                                            view! {
                                                <InspectionCard
                                                    inspection=row.inspection
                                                    level=row.level
                                                    show_patient=show_patient
                                                    allow_follow_up=allow_follow_up
                                                    expandable=false
                                                    chains=chains
                                                    on_toggle=on_toggle
                                                />
                                            }
                                        })
                                        .collect::<Vec<_>>()
                                }}
                                <Show when={
                                    let root_id = root_id.clone();
                                    move || chains.with(|c| c.is_loading(&root_id))
                                }>
                                    <p class="page-status">"Загрузка..."</p>
                                </Show>
                            </div>
                        }
                    }
                </For>
            </div>
        </Show>
    }
}

#[component]
fn InspectionCard(
    inspection: InspectionPreview,
    level: usize,
    show_patient: bool,
    allow_follow_up: bool,
    expandable: bool,
    chains: RwSignal<ChainState>,
    on_toggle: Callback<String>,
) -> impl IntoView {
    let class = if inspection.conclusion == Conclusion::Death {
        "inspection-card inspection-card--death"
    } else {
        "inspection-card"
    };
    let style = format!("margin-left: {}px", indent_px(level));
    let details_href = format!("/inspection/{}", inspection.id);
    let follow_up = (allow_follow_up && !expandable && can_add_follow_up(&inspection)).then(|| follow_up_href(&inspection));
    let toggle_id = inspection.id.clone();
    let diagnosis = format!("{} ({})", inspection.diagnosis.name, inspection.diagnosis.code);

    view! {
        <article class=class style=style>
            <header class="inspection-card__header">
                <span class="inspection-card__date">{format_date(&inspection.date)}</span>
                <span class="inspection-card__title">"Амбулаторный осмотр"</span>
                <span class="inspection-card__actions">
                    {follow_up
                        .map(|href| {
                            view! {
                                <A href=href attr:class="btn btn--link">
                                    "Добавить осмотр"
                                </A>
                            }
                        })}
                    <A href=details_href attr:class="btn btn--link">
                        "Детали осмотра"
                    </A>
                    <Show when=move || expandable>
                        {
                            let toggle_id = toggle_id.clone();
                            let label_id = toggle_id.clone();
                            view! {
                                <button
                                    class="btn btn--link inspection-card__toggle"
                                    on:click=move |_| on_toggle.run(toggle_id.clone())
                                >
                                    {move || if chains.with(|c| c.is_expanded(&label_id)) { "▾" } else { "▸" }}
                                </button>
                            }
                        }
                    </Show>
                </span>
            </header>
            {show_patient.then(|| view! { <p class="inspection-card__patient">"Пациент: " {inspection.patient.clone()}</p> })}
            <p>"Заключение: " {inspection.conclusion.label()}</p>
            <p>"Основной диагноз: " {diagnosis}</p>
            <p class="inspection-card__doctor">"Медицинский работник: " {inspection.doctor.clone()}</p>
        </article>
    }
}
