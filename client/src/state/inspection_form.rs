//! Inspection create/edit form model: drafts, cross-field validation, and
//! request payload assembly.
//!
//! The page components own the input signals; everything that decides
//! whether a submit may proceed lives here so it can be tested without a
//! browser.

#[cfg(test)]
#[path = "inspection_form_test.rs"]
mod inspection_form_test;

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::net::api::ApiError;
use crate::net::types::{
    CommentContent, Conclusion, ConsultationCreate, Diagnosis, DiagnosisCreate, DiagnosisType, Icd10Record,
    Inspection, InspectionCreate, InspectionEdit,
};
use crate::util::datetime::parse_utc;

/// Free-text sections every inspection must fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextField {
    Complaints,
    Anamnesis,
    Treatment,
}

impl TextField {
    pub const ALL: [Self; 3] = [Self::Complaints, Self::Anamnesis, Self::Treatment];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Complaints => "Жалобы",
            Self::Anamnesis => "Анамнез заболевания",
            Self::Treatment => "Рекомендации по лечению",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Пожалуйста, выберите дату осмотра")]
    MissingDate,
    #[error("Дата осмотра не может быть позже текущего момента")]
    DateInFuture,
    #[error("Пожалуйста, выберите предыдущий осмотр")]
    MissingPrevious,
    #[error("Пожалуйста, заполните поле «{}»", .0.label())]
    MissingText(TextField),
    #[error("Пожалуйста, выберите заключение")]
    MissingConclusion,
    #[error("У пациента не может быть пустым поле диагноза")]
    NoDiagnoses,
    #[error("У осмотра должен быть ровно один диагноз типа Основной (сейчас: {0})")]
    MainDiagnosisCount(usize),
    #[error("Пожалуйста, выберите дату следующего визита")]
    MissingNextVisit,
    #[error("Дата следующего визита должна быть в будущем")]
    NextVisitNotInFuture,
    #[error("Пожалуйста, выберите дату и время смерти")]
    MissingDeathDate,
    #[error("Дата смерти не может быть позже текущего момента")]
    DeathDateInFuture,
    #[error("У пациента не может быть более одного осмотра с заключением “Смерть”.")]
    DuplicateDeath,
    #[error("Выберите диагноз из справочника МКБ-10")]
    MissingIcdDiagnosis,
    #[error("Выберите специальность консультанта")]
    MissingSpeciality,
    #[error("Введите комментарий к консультации")]
    MissingConsultationComment,
    #[error("Консультация с этой специальностью уже добавлена")]
    DuplicateSpeciality,
    #[error("Не удалось найти диагноз {0} в справочнике МКБ-10")]
    UnresolvedDiagnosis(String),
}

/// A diagnosis staged in the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosisDraft {
    /// ICD-10 record id sent to the server.
    pub icd_id: String,
    pub code: String,
    pub name: String,
    pub description: String,
    pub kind: DiagnosisType,
}

impl DiagnosisDraft {
    /// Draft from an existing diagnosis once its ICD-10 id is resolved.
    #[must_use]
    pub fn from_diagnosis(diagnosis: &Diagnosis, icd_id: String) -> Self {
        Self {
            icd_id,
            code: diagnosis.code.clone(),
            name: diagnosis.name.clone(),
            description: diagnosis.description.clone().unwrap_or_default(),
            kind: diagnosis.kind,
        }
    }

    /// Resolve `diagnosis` against ICD-10 lookup results by code.
    #[must_use]
    pub fn from_lookup(diagnosis: &Diagnosis, records: &[Icd10Record]) -> Option<Self> {
        resolve_icd_id(&diagnosis.code, records).map(|id| Self::from_diagnosis(diagnosis, id))
    }

    fn to_payload(&self) -> DiagnosisCreate {
        let description = self.description.trim();
        DiagnosisCreate {
            icd_diagnosis_id: self.icd_id.clone(),
            description: (!description.is_empty()).then(|| description.to_owned()),
            kind: self.kind,
        }
    }
}

/// ICD-10 id for `code`: the exact code match, else the first hit.
#[must_use]
pub fn resolve_icd_id(code: &str, records: &[Icd10Record]) -> Option<String> {
    records
        .iter()
        .find(|r| r.code.eq_ignore_ascii_case(code.trim()))
        .or_else(|| records.first())
        .map(|r| r.id.clone())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConsultationDraft {
    pub speciality_id: String,
    pub speciality_name: String,
    pub comment: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing an inspection that currently concludes `original`.
    Edit { original: Conclusion },
}

/// Everything the inspection form has collected so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InspectionDraft {
    /// ISO-8601 inspection time (create only).
    pub date: Option<String>,
    pub follow_up: bool,
    pub previous_id: Option<String>,
    pub complaints: String,
    pub anamnesis: String,
    pub treatment: String,
    pub conclusion: Option<Conclusion>,
    pub next_visit: Option<String>,
    /// Next visit as stored on the server (edit only); it may already be past.
    pub saved_next_visit: Option<String>,
    pub death_date: Option<String>,
    pub diagnoses: Vec<DiagnosisDraft>,
    pub consultations: Vec<ConsultationDraft>,
}

impl InspectionDraft {
    /// Prefill an edit form. `icd_ids` holds the resolved ICD-10 id for each
    /// diagnosis, in order.
    ///
    /// # Errors
    ///
    /// [`FormError::UnresolvedDiagnosis`] naming the first diagnosis without
    /// an id; a partial list would drop diagnoses on save.
    pub fn from_inspection(inspection: &Inspection, icd_ids: &[Option<String>]) -> Result<Self, FormError> {
        let diagnoses = inspection
            .diagnoses
            .iter()
            .enumerate()
            .map(|(i, d)| match icd_ids.get(i).cloned().flatten() {
                Some(id) => Ok(DiagnosisDraft::from_diagnosis(d, id)),
                None => Err(FormError::UnresolvedDiagnosis(d.code.clone())),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            date: Some(inspection.date.clone()),
            follow_up: inspection.previous_inspection_id.is_some(),
            previous_id: inspection.previous_inspection_id.clone(),
            complaints: inspection.complaints.clone(),
            anamnesis: inspection.anamnesis.clone(),
            treatment: inspection.treatment.clone(),
            conclusion: Some(inspection.conclusion),
            next_visit: inspection.next_visit_date.clone(),
            saved_next_visit: inspection.next_visit_date.clone(),
            death_date: inspection.death_date.clone(),
            diagnoses,
            consultations: Vec::new(),
        })
    }

    /// Whether the next visit is still the value loaded from the server.
    fn next_visit_unchanged(&self) -> bool {
        let saved = self.saved_next_visit.as_deref().and_then(parse_utc);
        saved.is_some() && saved == self.next_visit.as_deref().and_then(parse_utc)
    }

    #[must_use]
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Complaints => &self.complaints,
            TextField::Anamnesis => &self.anamnesis,
            TextField::Treatment => &self.treatment,
        }
    }

    pub fn set_text(&mut self, field: TextField, value: String) {
        match field {
            TextField::Complaints => self.complaints = value,
            TextField::Anamnesis => self.anamnesis = value,
            TextField::Treatment => self.treatment = value,
        }
    }

    /// Stage a diagnosis picked in the diagnosis section.
    ///
    /// # Errors
    ///
    /// [`FormError::MissingIcdDiagnosis`] if no ICD-10 record was picked.
    pub fn add_diagnosis(&mut self, draft: DiagnosisDraft) -> Result<(), FormError> {
        if draft.icd_id.trim().is_empty() {
            return Err(FormError::MissingIcdDiagnosis);
        }
        self.diagnoses.push(draft);
        Ok(())
    }

    /// Carry the previous inspection's main diagnosis into a follow-up,
    /// replacing any main diagnosis staged so far.
    pub fn prefill_main(&mut self, mut draft: DiagnosisDraft) {
        draft.kind = DiagnosisType::Main;
        self.diagnoses.retain(|d| d.kind != DiagnosisType::Main && d.icd_id != draft.icd_id);
        self.diagnoses.insert(0, draft);
    }

    pub fn remove_diagnosis(&mut self, index: usize) {
        if index < self.diagnoses.len() {
            self.diagnoses.remove(index);
        }
    }

    /// Stage a consultation request.
    ///
    /// # Errors
    ///
    /// Rejects a missing speciality or comment and a speciality already added.
    pub fn add_consultation(&mut self, draft: ConsultationDraft) -> Result<(), FormError> {
        if draft.speciality_id.trim().is_empty() {
            return Err(FormError::MissingSpeciality);
        }
        if draft.comment.trim().is_empty() {
            return Err(FormError::MissingConsultationComment);
        }
        if self.consultations.iter().any(|c| c.speciality_id == draft.speciality_id) {
            return Err(FormError::DuplicateSpeciality);
        }
        self.consultations.push(draft);
        Ok(())
    }

    pub fn remove_consultation(&mut self, index: usize) {
        if index < self.consultations.len() {
            self.consultations.remove(index);
        }
    }

    #[must_use]
    pub fn main_diagnosis_count(&self) -> usize {
        self.diagnoses.iter().filter(|d| d.kind == DiagnosisType::Main).count()
    }

    /// Check every rule that does not need the server.
    ///
    /// # Errors
    ///
    /// The first violated rule, in form order.
    pub fn validate(&self, mode: FormMode, now: DateTime<Utc>) -> Result<(), FormError> {
        if mode == FormMode::Create {
            let date = self.date.as_deref().and_then(parse_utc).ok_or(FormError::MissingDate)?;
            if date > now {
                return Err(FormError::DateInFuture);
            }
            if self.follow_up && self.previous_id.as_deref().is_none_or(|id| id.trim().is_empty()) {
                return Err(FormError::MissingPrevious);
            }
        }

        for field in TextField::ALL {
            if self.text(field).trim().is_empty() {
                return Err(FormError::MissingText(field));
            }
        }

        let conclusion = self.conclusion.ok_or(FormError::MissingConclusion)?;

        if self.diagnoses.is_empty() {
            return Err(FormError::NoDiagnoses);
        }
        let mains = self.main_diagnosis_count();
        if mains != 1 {
            return Err(FormError::MainDiagnosisCount(mains));
        }

        match conclusion {
            Conclusion::Disease => {
                let next = self
                    .next_visit
                    .as_deref()
                    .and_then(parse_utc)
                    .ok_or(FormError::MissingNextVisit)?;
                let kept = matches!(mode, FormMode::Edit { .. }) && self.next_visit_unchanged();
                if next <= now && !kept {
                    return Err(FormError::NextVisitNotInFuture);
                }
            }
            Conclusion::Death => {
                let death = self
                    .death_date
                    .as_deref()
                    .and_then(parse_utc)
                    .ok_or(FormError::MissingDeathDate)?;
                if death > now {
                    return Err(FormError::DeathDateInFuture);
                }
            }
            Conclusion::Recovery => {}
        }
        Ok(())
    }

    /// Whether submit must first scan the patient's inspections for a Death.
    #[must_use]
    pub fn needs_death_scan(&self, mode: FormMode) -> bool {
        self.conclusion == Some(Conclusion::Death) && mode != (FormMode::Edit { original: Conclusion::Death })
    }

    fn dated(&self, conclusion: Conclusion) -> (Option<String>, Option<String>) {
        let normalize = |raw: &Option<String>| raw.as_deref().and_then(parse_utc).map(crate::util::datetime::to_iso);
        match conclusion {
            Conclusion::Disease => (normalize(&self.next_visit), None),
            Conclusion::Death => (None, normalize(&self.death_date)),
            Conclusion::Recovery => (None, None),
        }
    }

    /// Validated body for `POST patient/{id}/inspections`.
    ///
    /// # Errors
    ///
    /// The first [`FormError`] from [`Self::validate`].
    pub fn to_create_payload(&self, now: DateTime<Utc>) -> Result<InspectionCreate, FormError> {
        self.validate(FormMode::Create, now)?;
        let conclusion = self.conclusion.ok_or(FormError::MissingConclusion)?;
        let date = self
            .date
            .as_deref()
            .and_then(parse_utc)
            .map(crate::util::datetime::to_iso)
            .ok_or(FormError::MissingDate)?;
        let (next_visit_date, death_date) = self.dated(conclusion);
        let previous_inspection_id = if self.follow_up {
            self.previous_id.as_deref().map(str::trim).filter(|id| !id.is_empty()).map(ToOwned::to_owned)
        } else {
            None
        };
        Ok(InspectionCreate {
            date,
            anamnesis: self.anamnesis.trim().to_owned(),
            complaints: self.complaints.trim().to_owned(),
            treatment: self.treatment.trim().to_owned(),
            conclusion,
            next_visit_date,
            death_date,
            previous_inspection_id,
            diagnoses: self.diagnoses.iter().map(DiagnosisDraft::to_payload).collect(),
            consultations: self
                .consultations
                .iter()
                .map(|c| ConsultationCreate {
                    speciality_id: c.speciality_id.clone(),
                    comment: CommentContent { content: c.comment.trim().to_owned() },
                })
                .collect(),
        })
    }

    /// Validated body for `PUT inspection/{id}`.
    ///
    /// # Errors
    ///
    /// The first [`FormError`] from [`Self::validate`] in edit mode.
    pub fn to_edit_payload(&self, original: Conclusion, now: DateTime<Utc>) -> Result<InspectionEdit, FormError> {
        self.validate(FormMode::Edit { original }, now)?;
        let conclusion = self.conclusion.ok_or(FormError::MissingConclusion)?;
        let (next_visit_date, death_date) = self.dated(conclusion);
        Ok(InspectionEdit {
            anamnesis: self.anamnesis.trim().to_owned(),
            complaints: self.complaints.trim().to_owned(),
            treatment: self.treatment.trim().to_owned(),
            conclusion,
            next_visit_date,
            death_date,
            diagnoses: self.diagnoses.iter().map(DiagnosisDraft::to_payload).collect(),
        })
    }
}

/// Scan `candidates` one at a time for an inspection concluding Death,
/// skipping `exclude`. Stops at the first hit.
///
/// # Errors
///
/// The first fetch failure; the scan does not guess past it.
pub async fn prior_death_exists<F, Fut>(candidates: &[String], exclude: Option<&str>, mut fetch: F) -> Result<bool, ApiError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Conclusion, ApiError>>,
{
    for id in candidates {
        if exclude == Some(id.as_str()) {
            continue;
        }
        if fetch(id.clone()).await? == Conclusion::Death {
            return Ok(true);
        }
    }
    Ok(false)
}
