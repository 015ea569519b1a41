//! Networking modules for the MIS REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` is the gateway (bearer token, 401 handling, error taxonomy), `types`
//! defines the wire schema, and the remaining modules are one resource client
//! per server resource.

pub mod api;
pub mod consultations;
pub mod dictionary;
pub mod inspections;
pub mod patients;
pub mod profile;
pub mod types;
