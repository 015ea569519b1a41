//! # mis-client
//!
//! Leptos + WASM front end for the medical information system (MIS).
//!
//! This crate contains pages, components, session and view state, the typed
//! REST client for the upstream MIS API, and small browser utilities. The
//! host binary renders [`app::App`] on the server and the `hydrate` feature
//! builds the browser bundle.

#![recursion_limit = "256"]

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger not installed: {e}");
    }
    leptos::mount::hydrate_body(app::App);
}
