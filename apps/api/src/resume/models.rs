//! Résumé document model.
//!
//! Every content record comes in three shapes:
//! - the record itself (carries a store-generated `id`),
//! - a *draft* (the record without an id, as submitted by the form),
//! - a *patch* (every field optional; present fields overwrite on merge).
//!
//! Optional text fields (`linkedin`, `link`, `subtitle`, ...) are `Option<String>`.
//! Patches normalize a blank value for an optional field to `None`, so clearing a
//! field and omitting it from the rendered document are the same thing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resume::input::{deserialize_optional_skill_list, deserialize_skill_list};

// ────────────────────────────────────────────────────────────────────────────
// Record plumbing
// ────────────────────────────────────────────────────────────────────────────

/// A record living in one of the store's ordered collections.
pub trait Record: Clone {
    fn id(&self) -> Uuid;
}

/// An id-less record as submitted by a form.
pub trait Draft {
    type Record: Record;

    fn into_record(self, id: Uuid) -> Self::Record;
}

/// Structural merge of a partial update into a record.
///
/// Returns a new record equal to `self` with exactly the patch's present fields overwritten.
pub trait Merge<P> {
    fn merge(&self, patch: &P) -> Self;
}

fn overlay<T: Clone>(field: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *field = v.clone();
    }
}

fn overlay_optional(field: &mut Option<String>, value: &Option<String>) {
    if let Some(v) = value {
        *field = non_blank(v);
    }
}

/// `None` for empty/whitespace-only text, otherwise the text unchanged.
pub fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section types and order
// ────────────────────────────────────────────────────────────────────────────

/// The seven section types of a résumé. Closed set: the projection matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionType {
    Contact,
    WorkExperience,
    Education,
    Skills,
    Projects,
    Certifications,
    CustomSections,
}

impl SectionType {
    /// Default display order.
    pub const ALL: [SectionType; 7] = [
        SectionType::Contact,
        SectionType::WorkExperience,
        SectionType::Education,
        SectionType::Skills,
        SectionType::Projects,
        SectionType::Certifications,
        SectionType::CustomSections,
    ];

    /// Title shown in the section reorder list.
    pub fn default_title(self) -> &'static str {
        match self {
            SectionType::Contact => "Contact Information",
            SectionType::WorkExperience => "Work Experience",
            SectionType::Education => "Education",
            SectionType::Skills => "Skills",
            SectionType::Projects => "Projects",
            SectionType::Certifications => "Certifications",
            SectionType::CustomSections => "Custom Sections",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SectionType::Contact => "contact",
            SectionType::WorkExperience => "workExperience",
            SectionType::Education => "education",
            SectionType::Skills => "skills",
            SectionType::Projects => "projects",
            SectionType::Certifications => "certifications",
            SectionType::CustomSections => "customSections",
        }
    }
}

/// One entry of the display order list. Position in the list is the display position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionOrderEntry {
    pub id: SectionType,
    pub title: String,
    pub enabled: bool,
}

/// All seven entries, enabled, in default order.
pub fn default_section_order() -> Vec<SectionOrderEntry> {
    SectionType::ALL
        .iter()
        .map(|&id| SectionOrderEntry {
            id,
            title: id.default_title().to_string(),
            enabled: true,
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Contact
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
}

impl Merge<ContactPatch> for Contact {
    fn merge(&self, patch: &ContactPatch) -> Self {
        let mut next = self.clone();
        overlay(&mut next.full_name, &patch.full_name);
        overlay(&mut next.email, &patch.email);
        overlay(&mut next.phone, &patch.phone);
        overlay(&mut next.location, &patch.location);
        overlay_optional(&mut next.linkedin, &patch.linkedin);
        overlay_optional(&mut next.website, &patch.website);
        next
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Work experience
// ────────────────────────────────────────────────────────────────────────────

/// A job. When `current` is true the rendered end date is "Present" whatever `end_date` holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub id: Uuid,
    pub company: String,
    pub title: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperienceDraft {
    pub company: String,
    pub title: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperiencePatch {
    pub company: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl Record for WorkExperience {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Draft for WorkExperienceDraft {
    type Record = WorkExperience;

    fn into_record(self, id: Uuid) -> WorkExperience {
        WorkExperience {
            id,
            company: self.company,
            title: self.title,
            location: self.location,
            start_date: self.start_date,
            end_date: self.end_date,
            current: self.current,
            description: self.description,
        }
    }
}

impl Merge<WorkExperiencePatch> for WorkExperience {
    fn merge(&self, patch: &WorkExperiencePatch) -> Self {
        let mut next = self.clone();
        overlay(&mut next.company, &patch.company);
        overlay(&mut next.title, &patch.title);
        overlay(&mut next.location, &patch.location);
        overlay(&mut next.start_date, &patch.start_date);
        overlay(&mut next.end_date, &patch.end_date);
        overlay(&mut next.current, &patch.current);
        overlay(&mut next.description, &patch.description);
        next
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationDraft {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationPatch {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl Record for Education {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Draft for EducationDraft {
    type Record = Education;

    fn into_record(self, id: Uuid) -> Education {
        Education {
            id,
            institution: self.institution,
            degree: self.degree,
            field: self.field,
            location: self.location,
            start_date: self.start_date,
            end_date: self.end_date,
            current: self.current,
            description: self.description.as_deref().and_then(non_blank),
        }
    }
}

impl Merge<EducationPatch> for Education {
    fn merge(&self, patch: &EducationPatch) -> Self {
        let mut next = self.clone();
        overlay(&mut next.institution, &patch.institution);
        overlay(&mut next.degree, &patch.degree);
        overlay(&mut next.field, &patch.field);
        overlay(&mut next.location, &patch.location);
        overlay(&mut next.start_date, &patch.start_date);
        overlay(&mut next.end_date, &patch.end_date);
        overlay(&mut next.current, &patch.current);
        overlay_optional(&mut next.description, &patch.description);
        next
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SkillDraft {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SkillPatch {
    pub name: Option<String>,
}

impl Record for Skill {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Draft for SkillDraft {
    type Record = Skill;

    fn into_record(self, id: Uuid) -> Skill {
        Skill {
            id,
            name: self.name,
        }
    }
}

impl Merge<SkillPatch> for Skill {
    fn merge(&self, patch: &SkillPatch) -> Self {
        let mut next = self.clone();
        overlay(&mut next.name, &patch.name);
        next
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Projects
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub link: Option<String>,
    /// Accepts a string list or one comma-separated string.
    #[serde(deserialize_with = "deserialize_skill_list")]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_skill_list")]
    pub skills: Option<Vec<String>>,
}

impl Record for Project {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Draft for ProjectDraft {
    type Record = Project;

    fn into_record(self, id: Uuid) -> Project {
        Project {
            id,
            name: self.name,
            description: self.description,
            link: self.link.as_deref().and_then(non_blank),
            skills: self.skills,
        }
    }
}

impl Merge<ProjectPatch> for Project {
    fn merge(&self, patch: &ProjectPatch) -> Self {
        let mut next = self.clone();
        overlay(&mut next.name, &patch.name);
        overlay(&mut next.description, &patch.description);
        overlay_optional(&mut next.link, &patch.link);
        overlay(&mut next.skills, &patch.skills);
        next
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Certifications
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: Uuid,
    pub name: String,
    pub issuer: String,
    pub date: String,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationDraft {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub expiry_date: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationPatch {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<String>,
    pub expiry_date: Option<String>,
    pub link: Option<String>,
}

impl Record for Certification {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Draft for CertificationDraft {
    type Record = Certification;

    fn into_record(self, id: Uuid) -> Certification {
        Certification {
            id,
            name: self.name,
            issuer: self.issuer,
            date: self.date,
            expiry_date: self.expiry_date.as_deref().and_then(non_blank),
            link: self.link.as_deref().and_then(non_blank),
        }
    }
}

impl Merge<CertificationPatch> for Certification {
    fn merge(&self, patch: &CertificationPatch) -> Self {
        let mut next = self.clone();
        overlay(&mut next.name, &patch.name);
        overlay(&mut next.issuer, &patch.issuer);
        overlay(&mut next.date, &patch.date);
        overlay_optional(&mut next.expiry_date, &patch.expiry_date);
        overlay_optional(&mut next.link, &patch.link);
        next
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Custom sections
// ────────────────────────────────────────────────────────────────────────────

/// A user-titled section. Exclusively owns its items: removing the section removes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSection {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub items: Vec<CustomSectionItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSectionItem {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomSectionItemDraft {
    pub title: String,
    pub subtitle: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomSectionItemPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

impl Record for CustomSection {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for CustomSectionItem {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Draft for CustomSectionItemDraft {
    type Record = CustomSectionItem;

    fn into_record(self, id: Uuid) -> CustomSectionItem {
        CustomSectionItem {
            id,
            title: self.title,
            subtitle: self.subtitle.as_deref().and_then(non_blank),
            date: self.date.as_deref().and_then(non_blank),
            description: self.description.as_deref().and_then(non_blank),
        }
    }
}

impl Merge<CustomSectionItemPatch> for CustomSectionItem {
    fn merge(&self, patch: &CustomSectionItemPatch) -> Self {
        let mut next = self.clone();
        overlay(&mut next.title, &patch.title);
        overlay_optional(&mut next.subtitle, &patch.subtitle);
        overlay_optional(&mut next.date, &patch.date);
        overlay_optional(&mut next.description, &patch.description);
        next
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Whole document state
// ────────────────────────────────────────────────────────────────────────────

/// Complete résumé state: content collections plus the section order list.
///
/// `Default` is the canonical initial state: empty contact, empty collections,
/// all seven sections enabled in default order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeState {
    pub contact: Contact,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub custom_sections: Vec<CustomSection>,
    pub section_order: Vec<SectionOrderEntry>,
}

impl Default for ResumeState {
    fn default() -> Self {
        ResumeState {
            contact: Contact::default(),
            work_experience: Vec::new(),
            education: Vec::new(),
            skills: Vec::new(),
            projects: Vec::new(),
            certifications: Vec::new(),
            custom_sections: Vec::new(),
            section_order: default_section_order(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_job() -> WorkExperience {
        WorkExperienceDraft {
            company: "Acme".to_string(),
            title: "Engineer".to_string(),
            location: "Berlin".to_string(),
            start_date: "2020-01".to_string(),
            end_date: "2022-06".to_string(),
            current: false,
            description: "Built things".to_string(),
        }
        .into_record(Uuid::new_v4())
    }

    #[test]
    fn test_default_section_order_has_all_seven_enabled() {
        let order = default_section_order();
        assert_eq!(order.len(), 7);
        assert!(order.iter().all(|e| e.enabled));
        let ids: Vec<SectionType> = order.iter().map(|e| e.id).collect();
        assert_eq!(ids, SectionType::ALL.to_vec());
    }

    #[test]
    fn test_merge_overwrites_only_present_fields() {
        let job = make_job();
        let patch = WorkExperiencePatch {
            title: Some("Staff Engineer".to_string()),
            current: Some(true),
            ..Default::default()
        };
        let merged = job.merge(&patch);
        assert_eq!(merged.title, "Staff Engineer");
        assert!(merged.current);
        assert_eq!(merged.id, job.id);
        assert_eq!(merged.company, job.company);
        assert_eq!(merged.end_date, job.end_date);
        assert_eq!(merged.description, job.description);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let contact = Contact::default();
        let patch = ContactPatch {
            full_name: Some("Ada Lovelace".to_string()),
            ..Default::default()
        };
        let once = contact.merge(&patch);
        let twice = once.merge(&patch);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_blank_optional_field_clears_to_none() {
        let contact = Contact {
            linkedin: Some("linkedin.com/in/ada".to_string()),
            ..Default::default()
        };
        let patch = ContactPatch {
            linkedin: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(contact.merge(&patch).linkedin, None);
    }

    #[test]
    fn test_section_type_serializes_camel_case() {
        let json = serde_json::to_string(&SectionType::WorkExperience).unwrap();
        assert_eq!(json, "\"workExperience\"");
        let parsed: SectionType = serde_json::from_str("\"customSections\"").unwrap();
        assert_eq!(parsed, SectionType::CustomSections);
        for section in SectionType::ALL {
            let json = serde_json::to_string(&section).unwrap();
            assert_eq!(json, format!("\"{}\"", section.as_str()));
        }
    }

    #[test]
    fn test_state_deserializes_with_missing_collections() {
        let state: ResumeState =
            serde_json::from_str(r#"{"contact": {"fullName": "Ada"}}"#).unwrap();
        assert_eq!(state.contact.full_name, "Ada");
        assert!(state.work_experience.is_empty());
        assert_eq!(state.section_order, default_section_order());
    }

    #[test]
    fn test_project_draft_accepts_comma_separated_skills() {
        let draft: ProjectDraft = serde_json::from_str(
            r#"{"name": "Compiler", "description": "Toy", "skills": "Rust, LLVM ,, "}"#,
        )
        .unwrap();
        assert_eq!(draft.skills, vec!["Rust".to_string(), "LLVM".to_string()]);
    }

    #[test]
    fn test_project_patch_without_skills_leaves_them_untouched() {
        let patch: ProjectPatch = serde_json::from_str(r#"{"name": "Renamed"}"#).unwrap();
        assert!(patch.skills.is_none());
        let patch: ProjectPatch = serde_json::from_str(r#"{"skills": ["Go"]}"#).unwrap();
        assert_eq!(patch.skills, Some(vec!["Go".to_string()]));
    }

    #[test]
    fn test_project_patch_null_skills_leaves_them_untouched() {
        let patch: ProjectPatch =
            serde_json::from_str(r#"{"description": "New", "skills": null}"#).unwrap();
        assert!(patch.skills.is_none());
        let patch: ProjectPatch = serde_json::from_str(r#"{"skills": "Go, Rust"}"#).unwrap();
        assert_eq!(patch.skills, Some(vec!["Go".to_string(), "Rust".to_string()]));
    }
}
