//! Mount-scoped liveness flag for async work started by a component.
//!
//! A page that spawns a request holds an [`Alive`] and checks it before
//! writing the response into its signals; the flag drops to false when the
//! owning reactive scope is cleaned up.

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Debug)]
pub struct Alive(Arc<AtomicBool>);

impl Alive {
    /// Flag tied to the current reactive owner.
    #[must_use]
    pub fn scoped() -> Self {
        let alive = Self::detached();
        let flag = alive.clone();
        leptos::prelude::on_cleanup(move || flag.kill());
        alive
    }

    /// Flag with no owner; only [`Alive::kill`] clears it.
    #[must_use]
    pub fn detached() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn kill(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}
