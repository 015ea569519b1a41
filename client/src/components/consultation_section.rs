//! Consultation requests staged on a new inspection.

use leptos::prelude::*;

use crate::components::search_select::{SearchSelect, SelectOption};
use crate::state::inspection_form::{ConsultationDraft, InspectionDraft};

#[component]
pub fn ConsultationSection(draft: RwSignal<InspectionDraft>, error: RwSignal<Option<String>>) -> impl IntoView {
    let required = RwSignal::new(false);
    let specialities = RwSignal::new(Vec::<SelectOption>::new());
    let speciality = RwSignal::new(None::<SelectOption>);
    let comment = RwSignal::new(String::new());

    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    let on_search = Callback::new(move |text: String| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::dictionary::specialities(&text, 1).await {
                Ok(page) => {
                    let options = page.specialties.into_iter().map(|s| SelectOption::new(s.id, s.name)).collect();
                    specialities.try_set(options);
                }
                Err(e) => leptos::logging::warn!("speciality lookup failed: {e}"),
            }
        });
    });

    let on_add = move |_| {
        let picked = speciality.get().unwrap_or_default();
        let staged = ConsultationDraft {
            speciality_id: picked.id,
            speciality_name: picked.label,
            comment: comment.get(),
        };
        let mut result = Ok(());
        draft.update(|d| result = d.add_consultation(staged));
        match result {
            Ok(()) => {
                speciality.set(None);
                comment.set(String::new());
                error.set(None);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    view! {
        <section class="form-section">
            <h3 class="form-section__title">"Консультация"</h3>
            <ul class="staged-list">
                {move || {
                    draft
                        .get()
                        .consultations
                        .into_iter()
                        .enumerate()
                        .map(|(index, c)| {
                            view! {
                                <li class="staged-list__item">
                                    <span class="staged-list__title">{c.speciality_name}</span>
                                    <span class="staged-list__meta">{c.comment}</span>
                                    <button
                                        class="btn btn--link staged-list__remove"
                                        type="button"
                                        on:click=move |_| draft.update(|d| d.remove_consultation(index))
                                    >
                                        "Удалить"
                                    </button>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </ul>
            <label class="switch">
                <input
                    type="checkbox"
                    prop:checked=move || required.get()
                    on:change=move |ev| required.set(event_target_checked(&ev))
                />
                "Требуется консультация"
            </label>
            <Show when=move || required.get()>
                <div class="field">
                    <span class="field__label">"Специальность"</span>
                    <SearchSelect
                        placeholder="Специальность консультанта"
                        options=specialities
                        selected=speciality
                        on_search=on_search
                    />
                </div>
                <label class="field">
                    <span class="field__label">"Комментарий"</span>
                    <textarea
                        class="field__input field__input--area"
                        rows="2"
                        prop:value=move || comment.get()
                        on:input=move |ev| comment.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <button class="btn btn--primary" type="button" on:click=on_add>
                    "Добавить консультацию"
                </button>
            </Show>
        </section>
    }
}
