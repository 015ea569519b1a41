//! Session state for the signed-in doctor.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided once by `App` as `RwSignal<Session>`; route guards, the navbar,
//! and identity-dependent controls (edit buttons) read it from context.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::Doctor;

/// Navbar limit for the displayed doctor name.
pub const NAME_DISPLAY_LIMIT: usize = 20;

/// Token plus the profile it resolved to.
///
/// `loading` is true from the moment a token is known until the profile
/// request settles, so guards do not redirect mid-initialization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub doctor: Option<Doctor>,
    pub loading: bool,
}

impl Session {
    /// State before the browser storage has been read; guards hold still.
    #[must_use]
    pub fn pending() -> Self {
        Self { loading: true, ..Self::default() }
    }

    /// Initial state from a stored token.
    #[must_use]
    pub fn from_token(token: Option<String>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        let loading = token.is_some();
        Self { token, doctor: None, loading }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// A token is held but its profile has not been requested yet.
    #[must_use]
    pub fn needs_profile(&self) -> bool {
        self.token.is_some() && self.doctor.is_none()
    }

    /// Fresh token after login or registration.
    pub fn signed_in(&mut self, token: String) {
        self.token = Some(token);
        self.doctor = None;
        self.loading = true;
    }

    pub fn apply_profile(&mut self, doctor: Doctor) {
        self.doctor = Some(doctor);
        self.loading = false;
    }

    /// Profile fetch failed; the token is kept unless the gateway cleared it.
    pub fn profile_failed(&mut self) {
        self.loading = false;
    }

    pub fn rename(&mut self, name: &str) {
        if let Some(doctor) = self.doctor.as_mut() {
            doctor.name = name.to_owned();
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.doctor.as_ref().map(|d| d.id.as_str())
    }

    /// Doctor name cut to [`NAME_DISPLAY_LIMIT`] characters with an ellipsis.
    #[must_use]
    pub fn display_name(&self) -> String {
        let Some(doctor) = self.doctor.as_ref() else {
            return String::new();
        };
        truncate_name(&doctor.name, NAME_DISPLAY_LIMIT)
    }
}

#[must_use]
pub fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_owned();
    }
    let mut out: String = name.chars().take(max).collect();
    out.push_str("...");
    out
}
