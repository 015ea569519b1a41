//! Client-side state models.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure state containers and transitions used by pages and components.
//! Nothing here touches the network; pages drive the calls and feed results
//! back in.

pub mod account_form;
pub mod chain;
pub mod comments;
pub mod inspection_form;
pub mod report;
pub mod session;
