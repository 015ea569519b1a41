//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, clocks,
//! redirects) from page and component logic.

pub mod auth;
pub mod datetime;
pub mod lifecycle;
pub mod storage;
pub mod validation;
