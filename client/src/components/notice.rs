//! Transient success/error banner shown after form submissions.

use leptos::prelude::*;

/// Time a notice stays on screen.
pub const NOTICE_MS: u32 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    #[must_use]
    pub fn class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "notice notice--success",
            NoticeKind::Error => "notice notice--error",
        }
    }
}

/// Banner bound to `notice`; clears itself after [`NOTICE_MS`] unless a newer
/// notice replaced it.
#[component]
pub fn NoticeBar(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    Effect::new(move || {
        #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
        let Some(shown) = notice.get() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(NOTICE_MS).await;
            if notice.try_get_untracked().flatten().as_ref() == Some(&shown) {
                notice.set(None);
            }
        });
    });

    view! {
        {move || {
            notice
                .get()
                .map(|n| {
                    view! {
                        <div class=n.class() role="status" on:click=move |_| notice.set(None)>
                            {n.text.clone()}
                        </div>
                    }
                })
        }}
    }
}
