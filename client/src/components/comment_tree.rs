//! Consultation thread rendered as an indented comment tree.
//!
//! SYSTEM CONTEXT
//! ==============
//! One instance per consultation on the inspection details page. The
//! component loads the consultation, keeps a [`CommentThread`] in a signal,
//! and drives replies and edits through its begin/confirm/rollback calls so
//! the tree updates before the server answers.

use leptos::prelude::*;

use crate::net::types::InspectionConsultation;
use crate::state::comments::{CommentThread, ExpandedComments};
use crate::state::session::Session;
use crate::util::datetime::format_datetime;

/// Indentation per reply level.
pub const COMMENT_INDENT_PX: usize = 24;

/// Render-ready copy of one visible comment.
#[derive(Clone, Debug, PartialEq, Eq)]
struct CommentRow {
    id: String,
    depth: usize,
    has_children: bool,
    expanded: bool,
    author: String,
    label: String,
    content: String,
    created: String,
    modified: bool,
    pending: bool,
    editable: bool,
}

fn collect_rows(thread: &CommentThread, expanded: &ExpandedComments, user_id: Option<&str>) -> Vec<CommentRow> {
    thread
        .visible_rows(expanded)
        .into_iter()
        .filter_map(|row| {
            let entry = thread.get(&row.id)?;
            Some(CommentRow {
                author: entry.comment.author.clone(),
                label: thread.author_label(&row.id).to_owned(),
                content: entry.comment.content.clone(),
                created: format_datetime(&entry.comment.create_time),
                modified: thread.is_modified(&row.id),
                pending: entry.is_pending(),
                editable: thread.can_edit(&row.id, user_id),
                id: row.id,
                depth: row.depth,
                has_children: row.has_children,
                expanded: row.expanded,
            })
        })
        .collect()
}

#[component]
pub fn ConsultationThread(summary: InspectionConsultation) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let thread = RwSignal::new(None::<CommentThread>);
    let expanded = RwSignal::new(ExpandedComments::default());
    let replying = RwSignal::new(None::<String>);
    let editing = RwSignal::new(None::<String>);
    let text = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let title = summary.speciality.name.clone();

    #[cfg(feature = "hydrate")]
    {
        let alive = crate::util::lifecycle::Alive::scoped();
        let summary = summary.clone();
        leptos::task::spawn_local(async move {
            match crate::net::consultations::get_consultation(&summary.id).await {
                Ok(consultation) if alive.is_alive() => {
                    thread.set(Some(CommentThread::new(&consultation, Some(&summary.root_comment))));
                }
                Ok(_) => {}
                Err(e) => {
                    leptos::logging::warn!("consultation {} load failed: {e}", summary.id);
                    error.try_set(Some("Не удалось загрузить комментарии".to_owned()));
                }
            }
        });
    }

    let open_reply = move |id: String| {
        editing.set(None);
        text.set(String::new());
        replying.set(Some(id));
    };
    let open_edit = move |id: String, content: String| {
        replying.set(None);
        text.set(content);
        editing.set(Some(id));
    };
    let close_box = move || {
        replying.set(None);
        editing.set(None);
        text.set(String::new());
    };

    let send_reply = move |parent_id: String| {
        let Some(author) = session.with_untracked(|s| s.doctor.clone()) else {
            return;
        };
        let content = text.get_untracked();
        let now = crate::util::datetime::now_iso();
        let begun = thread.try_update(|t| t.as_mut().map(|t| t.begin_reply(&parent_id, &content, &author, &now)));
        #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
        let temp_id = match begun.flatten() {
            Some(Ok(temp_id)) => temp_id,
            Some(Err(e)) => {
                error.set(Some(e.to_string()));
                return;
            }
            None => return,
        };
        error.set(None);
        close_box();
        expanded.update(|e| {
            if !e.is_expanded(&parent_id) {
                e.toggle(&parent_id);
            }
        });

        #[cfg(feature = "hydrate")]
        {
            let consultation_id = thread.with_untracked(|t| t.as_ref().map(|t| t.consultation_id.clone())).unwrap_or_default();
            let body = crate::net::types::CommentCreate { content: content.trim().to_owned(), parent_id };
            leptos::task::spawn_local(async move {
                match crate::net::consultations::add_comment(&consultation_id, &body).await {
                    Ok(server_id) => {
                        thread.try_update(|t| {
                            if let Some(t) = t.as_mut() {
                                if let Err(e) = t.confirm_reply(&temp_id, &server_id) {
                                    leptos::logging::warn!("reply confirm failed: {e}");
                                }
                            }
                        });
                    }
                    Err(e) => {
                        leptos::logging::warn!("reply failed: {e}");
                        let message = thread.try_update(|t| {
                            t.as_mut().map(|t| {
                                t.rollback_reply(&temp_id);
                                t.reply_failure_message(&e)
                            })
                        });
                        error.try_set(message.flatten());
                    }
                }
            });
        }
    };

    let send_edit = move |id: String| {
        let user_id = session.with_untracked(|s| s.user_id().map(ToOwned::to_owned));
        let content = text.get_untracked();
        let now = crate::util::datetime::now_iso();
        let begun = thread.try_update(|t| t.as_mut().map(|t| t.begin_edit(&id, &content, user_id.as_deref(), &now)));
        match begun.flatten() {
            Some(Ok(())) => {}
            Some(Err(e)) => {
                error.set(Some(e.to_string()));
                return;
            }
            None => return,
        }
        error.set(None);
        close_box();

        #[cfg(feature = "hydrate")]
        {
            let body = crate::net::types::CommentUpdate { content: content.trim().to_owned() };
            leptos::task::spawn_local(async move {
                match crate::net::consultations::edit_comment(&id, &body).await {
                    Ok(()) => {
                        thread.try_update(|t| {
                            if let Some(t) = t.as_mut() {
                                t.confirm_edit(&id);
                            }
                        });
                    }
                    Err(e) => {
                        leptos::logging::warn!("comment edit failed: {e}");
                        thread.try_update(|t| {
                            if let Some(t) = t.as_mut() {
                                t.rollback_edit(&id);
                            }
                        });
                        error.try_set(Some("Не удалось сохранить комментарий".to_owned()));
                    }
                }
            });
        }
    };

    let rows = move || {
        let open = expanded.get();
        let user_id = session.with(|s| s.user_id().map(ToOwned::to_owned));
        thread.with(|t| t.as_ref().map(|t| collect_rows(t, &open, user_id.as_deref())).unwrap_or_default())
    };

    view! {
        <article class="consultation">
            <h3 class="consultation__title">"Консультант: " {title}</h3>
            <Show when=move || error.get().is_some()>
                <p class="form-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show
                when=move || thread.with(Option::is_some)
                fallback=|| view! { <p class="page-status">"Загрузка..."</p> }
            >
                <ul class="comment-tree">
                    {move || {
                        rows()
                            .into_iter()
                            .map(|row| {
                                let style = format!("margin-left: {}px", row.depth * COMMENT_INDENT_PX);
                                let toggle_id = row.id.clone();
                                let reply_id = row.id.clone();
                                let edit_id = row.id.clone();
                                let edit_content = row.content.clone();
                                let box_id = row.id.clone();
                                let is_editing = {
                                    let id = row.id.clone();
                                    move || editing.get().as_deref() == Some(id.as_str())
                                };
                                let show_box = move || {
                                    let id = box_id.as_str();
                                    replying.get().as_deref() == Some(id) || editing.get().as_deref() == Some(id)
                                };
                                let submit_id = row.id.clone();
                                let content = row.content.clone();
                                view! {
                                    <li class="comment" class:comment--pending=row.pending style=style>
                                        <header class="comment__header">
                                            <span class="comment__author">{row.author.clone()}</span>
                                            <span class="comment__label">{format!("({})", row.label)}</span>
                                            <span class="comment__date">{row.created.clone()}</span>
                                            {row.modified.then(|| view! { <span class="comment__modified">"(изменено)"</span> })}
                                        </header>
                                        <Show when={
                                            let is_editing = is_editing.clone();
                                            move || !is_editing()
                                        }>
                                            <p class="comment__content">{content.clone()}</p>
                                        </Show>
                                        <div class="comment__actions">
                                            {row
                                                .has_children
                                                .then(|| {
                                                    let label = if row.expanded { "Скрыть ответы" } else { "Показать ответы" };
                                                    view! {
                                                        <button
                                                            class="btn btn--link"
                                                            on:click=move |_| expanded.update(|e| e.toggle(&toggle_id))
                                                        >
                                                            {label}
                                                        </button>
                                                    }
                                                })}
                                            {(!row.pending)
                                                .then(|| {
                                                    view! {
                                                        <button class="btn btn--link" on:click=move |_| open_reply(reply_id.clone())>
                                                            "Ответить"
                                                        </button>
                                                    }
                                                })}
                                            {row
                                                .editable
                                                .then(|| {
                                                    view! {
                                                        <button
                                                            class="btn btn--link"
                                                            on:click=move |_| open_edit(edit_id.clone(), edit_content.clone())
                                                        >
                                                            "Редактировать"
                                                        </button>
                                                    }
                                                })}
                                        </div>
                                        <Show when=show_box>
                                            {
                                                let submit_id = submit_id.clone();
                                                let is_editing = is_editing.clone();
                                                view! {
                                                    <div class="comment__box">
                                                        <textarea
                                                            class="field__input field__input--area"
                                                            rows="2"
                                                            prop:value=move || text.get()
                                                            on:input=move |ev| text.set(event_target_value(&ev))
                                                        ></textarea>
                                                        <button
                                                            class="btn btn--primary"
                                                            on:click=move |_| {
                                                                if is_editing() {
                                                                    send_edit(submit_id.clone());
                                                                } else {
                                                                    send_reply(submit_id.clone());
                                                                }
                                                            }
                                                        >
                                                            {
                                                                let is_editing = is_editing.clone();
                                                                move || if is_editing() { "Сохранить" } else { "Оставить комментарий" }
                                                            }
                                                        </button>
                                                        <button class="btn btn--link" on:click=move |_| close_box()>
                                                            "Отмена"
                                                        </button>
                                                    </div>
                                                }
                                            }
                                        </Show>
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </ul>
            </Show>
        </article>
    }
}
