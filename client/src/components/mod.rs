//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render form sections, lists and dialogs shared by the pages.
//! They read the session from Leptos context and take everything else as
//! props.

pub mod account_fields;
pub mod comment_tree;
pub mod conclusion_section;
pub mod consultation_section;
pub mod diagnosis_section;
pub mod edit_inspection_modal;
pub mod field_error;
pub mod guard;
pub mod icd_root_picker;
pub mod inspection_card;
pub mod inspection_filter;
pub mod multi_select;
pub mod navbar;
pub mod notice;
pub mod pagination;
pub mod patient_registration_modal;
pub mod search_select;
pub mod text_section;
