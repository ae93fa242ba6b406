//! Form input contract: required-presence checks run by handlers before they call the store.
//!
//! The store itself never validates. These checks only reject blank required fields;
//! formats (emails, dates, URLs) are accepted as typed.

use thiserror::Error;

use crate::resume::models::{
    CertificationDraft, CertificationPatch, ContactPatch, CustomSectionItemDraft,
    CustomSectionItemPatch, EducationDraft, EducationPatch, ProjectDraft, ProjectPatch, SkillDraft,
    SkillPatch, WorkExperienceDraft, WorkExperiencePatch,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} is required")]
pub struct FieldError {
    pub field: &'static str,
}

pub trait Validate {
    fn validate(&self) -> Result<(), FieldError>;
}

fn required(field: &'static str, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        Err(FieldError { field })
    } else {
        Ok(())
    }
}

/// A required field in a patch may be omitted, but not blanked.
fn required_if_present(field: &'static str, value: &Option<String>) -> Result<(), FieldError> {
    match value {
        Some(v) => required(field, v),
        None => Ok(()),
    }
}

pub fn validate_title(title: &str) -> Result<(), FieldError> {
    required("title", title)
}

impl Validate for ContactPatch {
    fn validate(&self) -> Result<(), FieldError> {
        required_if_present("fullName", &self.full_name)?;
        required_if_present("email", &self.email)?;
        required_if_present("phone", &self.phone)?;
        required_if_present("location", &self.location)
    }
}

impl Validate for WorkExperienceDraft {
    fn validate(&self) -> Result<(), FieldError> {
        required("company", &self.company)?;
        required("title", &self.title)?;
        required("location", &self.location)?;
        required("startDate", &self.start_date)?;
        required("description", &self.description)
    }
}

impl Validate for WorkExperiencePatch {
    fn validate(&self) -> Result<(), FieldError> {
        required_if_present("company", &self.company)?;
        required_if_present("title", &self.title)?;
        required_if_present("location", &self.location)?;
        required_if_present("startDate", &self.start_date)?;
        required_if_present("description", &self.description)
    }
}

impl Validate for EducationDraft {
    fn validate(&self) -> Result<(), FieldError> {
        required("institution", &self.institution)?;
        required("degree", &self.degree)?;
        required("field", &self.field)?;
        required("location", &self.location)?;
        required("startDate", &self.start_date)
    }
}

impl Validate for EducationPatch {
    fn validate(&self) -> Result<(), FieldError> {
        required_if_present("institution", &self.institution)?;
        required_if_present("degree", &self.degree)?;
        required_if_present("field", &self.field)?;
        required_if_present("location", &self.location)?;
        required_if_present("startDate", &self.start_date)
    }
}

impl Validate for SkillDraft {
    fn validate(&self) -> Result<(), FieldError> {
        required("name", &self.name)
    }
}

impl Validate for SkillPatch {
    fn validate(&self) -> Result<(), FieldError> {
        required_if_present("name", &self.name)
    }
}

impl Validate for ProjectDraft {
    fn validate(&self) -> Result<(), FieldError> {
        required("name", &self.name)?;
        required("description", &self.description)
    }
}

impl Validate for ProjectPatch {
    fn validate(&self) -> Result<(), FieldError> {
        required_if_present("name", &self.name)?;
        required_if_present("description", &self.description)
    }
}

impl Validate for CertificationDraft {
    fn validate(&self) -> Result<(), FieldError> {
        required("name", &self.name)?;
        required("issuer", &self.issuer)?;
        required("date", &self.date)
    }
}

impl Validate for CertificationPatch {
    fn validate(&self) -> Result<(), FieldError> {
        required_if_present("name", &self.name)?;
        required_if_present("issuer", &self.issuer)?;
        required_if_present("date", &self.date)
    }
}

impl Validate for CustomSectionItemDraft {
    fn validate(&self) -> Result<(), FieldError> {
        validate_title(&self.title)
    }
}

impl Validate for CustomSectionItemPatch {
    fn validate(&self) -> Result<(), FieldError> {
        required_if_present("title", &self.title)
    }
}
