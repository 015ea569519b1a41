//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`.

pub mod consultations;
pub mod home;
pub mod inspection_create;
pub mod inspection_details;
pub mod login;
pub mod patient_card;
pub mod patients;
pub mod profile;
pub mod register;
pub mod reports;
