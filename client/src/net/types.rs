//! Wire DTOs for the MIS REST API.
//!
//! DESIGN
//! ======
//! Field names follow the server's camelCase JSON. Response types default
//! missing fields so a partially populated payload still renders; request
//! types omit absent optional fields instead of sending `null`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// ENUMS
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Self; 2] = [Self::Male, Self::Female];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Мужской",
            Self::Female => "Женский",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str().eq_ignore_ascii_case(raw))
    }
}

/// Outcome recorded on an inspection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conclusion {
    #[default]
    Disease,
    Recovery,
    Death,
}

impl Conclusion {
    pub const ALL: [Self; 3] = [Self::Disease, Self::Recovery, Self::Death];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disease => "Disease",
            Self::Recovery => "Recovery",
            Self::Death => "Death",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Disease => "Болезнь",
            Self::Recovery => "Выздоровление",
            Self::Death => "Смерть",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == raw)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosisType {
    #[default]
    Main,
    Concomitant,
    Complication,
}

impl DiagnosisType {
    pub const ALL: [Self; 3] = [Self::Main, Self::Concomitant, Self::Complication];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "Main",
            Self::Concomitant => "Concomitant",
            Self::Complication => "Complication",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Main => "Основной",
            Self::Concomitant => "Сопутствующий",
            Self::Complication => "Осложнение",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == raw.trim())
    }
}

// =============================================================================
// REFERENCE DATA
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    pub size: u32,
    pub count: u32,
    pub current: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Speciality {
    pub id: String,
    pub create_time: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpecialityPage {
    pub specialties: Vec<Speciality>,
    pub pagination: Pagination,
}

/// An ICD-10 dictionary entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Icd10Record {
    pub id: String,
    pub create_time: String,
    pub code: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Icd10Page {
    pub records: Vec<Icd10Record>,
    pub pagination: Pagination,
}

// =============================================================================
// PEOPLE
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub create_time: String,
    pub name: String,
    pub birthday: Option<String>,
    pub gender: Gender,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientPage {
    pub patients: Vec<Patient>,
    pub pagination: Pagination,
}

/// The signed-in doctor's profile (also used as a comment/inspection author).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub create_time: String,
    pub name: String,
    pub birthday: Option<String>,
    pub gender: Gender,
    pub email: String,
    pub phone: Option<String>,
}

// =============================================================================
// INSPECTIONS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Diagnosis {
    pub id: String,
    pub create_time: String,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: DiagnosisType,
}

/// Inspection list item as returned by paged/chain endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InspectionPreview {
    pub id: String,
    pub create_time: String,
    pub previous_id: Option<String>,
    pub date: String,
    pub conclusion: Conclusion,
    pub doctor_id: String,
    pub doctor: String,
    pub patient_id: String,
    pub patient: String,
    pub diagnosis: Diagnosis,
    pub has_chain: bool,
    pub has_nested: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InspectionPage {
    pub inspections: Vec<InspectionPreview>,
    pub pagination: Pagination,
}

/// Inspection search hit (used to pick a previous inspection).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InspectionShort {
    pub id: String,
    pub create_time: String,
    pub date: String,
    pub diagnosis: Diagnosis,
}

/// Full inspection detail.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Inspection {
    pub id: String,
    pub create_time: String,
    pub date: String,
    pub anamnesis: String,
    pub complaints: String,
    pub treatment: String,
    pub conclusion: Conclusion,
    pub next_visit_date: Option<String>,
    pub death_date: Option<String>,
    pub base_inspection_id: Option<String>,
    pub previous_inspection_id: Option<String>,
    pub patient: Patient,
    pub doctor: Doctor,
    pub diagnoses: Vec<Diagnosis>,
    pub consultations: Vec<InspectionConsultation>,
}

// =============================================================================
// CONSULTATIONS
// =============================================================================

/// Consultation summary embedded in an inspection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InspectionConsultation {
    pub id: String,
    pub create_time: String,
    pub inspection_id: Option<String>,
    pub speciality: Speciality,
    pub root_comment: RootComment,
    pub comments_number: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RootComment {
    pub id: String,
    pub create_time: String,
    pub parent_id: Option<String>,
    pub content: String,
    pub author: Doctor,
    pub modify_time: Option<String>,
}

/// Consultation detail with its flat comment list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Consultation {
    pub id: String,
    pub create_time: String,
    pub inspection_id: Option<String>,
    pub speciality: Speciality,
    pub comments: Vec<Comment>,
}

/// One comment; `parent_id == None` marks a thread root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub create_time: String,
    pub modified_date: Option<String>,
    pub content: String,
    pub author_id: String,
    pub author: String,
    pub parent_id: Option<String>,
}

impl Comment {
    /// Whether the comment was edited after creation.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified_date
            .as_deref()
            .is_some_and(|modified| modified != self.create_time)
    }
}

// =============================================================================
// REPORTS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Report {
    pub filters: ReportFilters,
    pub records: Vec<ReportRecord>,
    pub summary_by_root: BTreeMap<String, u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportFilters {
    pub start: String,
    pub end: String,
    pub icd_roots: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportRecord {
    pub patient_name: String,
    pub patient_birthdate: Option<String>,
    pub gender: Option<Gender>,
    pub visits_by_root: BTreeMap<String, u32>,
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub password: String,
    pub email: String,
    pub birthday: String,
    pub gender: Gender,
    pub phone: String,
    pub speciality: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub email: String,
    pub name: String,
    pub birthday: String,
    pub gender: Gender,
    pub phone: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PatientCreate {
    pub name: String,
    pub birthday: String,
    pub gender: Gender,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreate {
    pub content: String,
    pub parent_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommentUpdate {
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisCreate {
    pub icd_diagnosis_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: DiagnosisType,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommentContent {
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationCreate {
    pub speciality_id: String,
    pub comment: CommentContent,
}

/// Body of `POST patient/{id}/inspections`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionCreate {
    pub date: String,
    pub anamnesis: String,
    pub complaints: String,
    pub treatment: String,
    pub conclusion: Conclusion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_visit_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_inspection_id: Option<String>,
    pub diagnoses: Vec<DiagnosisCreate>,
    pub consultations: Vec<ConsultationCreate>,
}

/// Body of `PUT inspection/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionEdit {
    pub anamnesis: String,
    pub complaints: String,
    pub treatment: String,
    pub conclusion: Conclusion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_visit_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    pub diagnoses: Vec<DiagnosisCreate>,
}
