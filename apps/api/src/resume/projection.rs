//! Projection of résumé state into the ordered document that preview and export render.
//!
//! `project` is a pure function of `ResumeState`: it walks the enabled section order
//! entries in order and resolves each to zero or more blocks. Collections that are
//! empty produce no block. Contact is a singleton and always produces its block.

use serde::Serialize;

use crate::resume::models::{
    non_blank, Certification, Contact, CustomSection, Education, Project, ResumeState,
    SectionType, Skill, WorkExperience,
};

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub blocks: Vec<SectionBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionBlock {
    pub section: SectionType,
    /// `None` only for the contact block, which renders as a header without a heading.
    pub heading: Option<String>,
    pub body: BlockBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "camelCase")]
pub enum BlockBody {
    Contact(ContactCard),
    Entries(Vec<RenderedEntry>),
    /// Inline list (skills), rendered bullet-separated.
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactCard {
    pub name: String,
    /// Non-empty of email, phone, location.
    pub details: Vec<String>,
    /// Non-empty of linkedin, website.
    pub links: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedEntry {
    pub title: String,
    pub subtitle: Option<String>,
    /// Right-aligned column: location and date range.
    pub aside: Vec<String>,
    pub description: Option<String>,
    pub note: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Projection
// ────────────────────────────────────────────────────────────────────────────

pub fn project(state: &ResumeState) -> RenderedDocument {
    let blocks = state
        .section_order
        .iter()
        .filter(|entry| entry.enabled)
        .flat_map(|entry| render_section(entry.id, state))
        .collect();
    RenderedDocument { blocks }
}

fn render_section(section: SectionType, state: &ResumeState) -> Vec<SectionBlock> {
    match section {
        SectionType::Contact => vec![contact_block(&state.contact)],
        SectionType::WorkExperience => {
            entries_block(section, "WORK EXPERIENCE", &state.work_experience, work_entry)
        }
        SectionType::Education => {
            entries_block(section, "EDUCATION", &state.education, education_entry)
        }
        SectionType::Skills => skills_block(&state.skills),
        SectionType::Projects => entries_block(section, "PROJECTS", &state.projects, project_entry),
        SectionType::Certifications => entries_block(
            section,
            "CERTIFICATIONS",
            &state.certifications,
            certification_entry,
        ),
        SectionType::CustomSections => state
            .custom_sections
            .iter()
            .filter_map(custom_section_block)
            .collect(),
    }
}

fn contact_block(contact: &Contact) -> SectionBlock {
    let details = [&contact.email, &contact.phone, &contact.location]
        .into_iter()
        .filter_map(|v| non_blank(v))
        .collect();
    let links = [&contact.linkedin, &contact.website]
        .into_iter()
        .filter_map(|v| v.as_deref().and_then(non_blank))
        .collect();
    SectionBlock {
        section: SectionType::Contact,
        heading: None,
        body: BlockBody::Contact(ContactCard {
            name: contact.full_name.clone(),
            details,
            links,
        }),
    }
}

fn entries_block<T>(
    section: SectionType,
    heading: &str,
    records: &[T],
    render: fn(&T) -> RenderedEntry,
) -> Vec<SectionBlock> {
    if records.is_empty() {
        return vec![];
    }
    vec![SectionBlock {
        section,
        heading: Some(heading.to_string()),
        body: BlockBody::Entries(records.iter().map(render).collect()),
    }]
}

fn skills_block(skills: &[Skill]) -> Vec<SectionBlock> {
    if skills.is_empty() {
        return vec![];
    }
    vec![SectionBlock {
        section: SectionType::Skills,
        heading: Some("SKILLS".to_string()),
        body: BlockBody::List(skills.iter().map(|s| s.name.clone()).collect()),
    }]
}

fn custom_section_block(section: &CustomSection) -> Option<SectionBlock> {
    if section.items.is_empty() {
        return None;
    }
    let entries = section
        .items
        .iter()
        .map(|item| RenderedEntry {
            title: item.title.clone(),
            subtitle: item.subtitle.as_deref().and_then(non_blank),
            aside: item.date.iter().filter_map(|d| non_blank(d)).collect(),
            description: item.description.as_deref().and_then(non_blank),
            note: None,
        })
        .collect();
    Some(SectionBlock {
        section: SectionType::CustomSections,
        heading: Some(section.title.to_uppercase()),
        body: BlockBody::Entries(entries),
    })
}

fn work_entry(job: &WorkExperience) -> RenderedEntry {
    RenderedEntry {
        title: job.title.clone(),
        subtitle: non_blank(&job.company),
        aside: aside(&job.location, date_range(&job.start_date, &job.end_date, job.current)),
        description: non_blank(&job.description),
        note: None,
    }
}

fn education_entry(edu: &Education) -> RenderedEntry {
    RenderedEntry {
        title: format!("{} in {}", edu.degree, edu.field),
        subtitle: non_blank(&edu.institution),
        aside: aside(&edu.location, date_range(&edu.start_date, &edu.end_date, edu.current)),
        description: edu.description.as_deref().and_then(non_blank),
        note: None,
    }
}

fn project_entry(project: &Project) -> RenderedEntry {
    let note = if project.skills.is_empty() {
        None
    } else {
        Some(format!("Skills: {}", project.skills.join(", ")))
    };
    RenderedEntry {
        title: project.name.clone(),
        subtitle: project.link.as_deref().and_then(non_blank),
        aside: vec![],
        description: non_blank(&project.description),
        note,
    }
}

fn certification_entry(cert: &Certification) -> RenderedEntry {
    let dates = match cert.expiry_date.as_deref().and_then(non_blank) {
        Some(expiry) => format!("{} – {}", cert.date, expiry),
        None => cert.date.clone(),
    };
    RenderedEntry {
        title: cert.name.clone(),
        subtitle: non_blank(&cert.issuer),
        aside: non_blank(&dates).into_iter().collect(),
        description: None,
        note: None,
    }
}

fn aside(location: &str, dates: Option<String>) -> Vec<String> {
    non_blank(location).into_iter().chain(dates).collect()
}

/// `"{start} – {end}"`, with `end` replaced by "Present" for a current position.
/// A blank side drops the separator.
pub fn date_range(start: &str, end: &str, current: bool) -> Option<String> {
    let end = if current { "Present" } else { end.trim() };
    match (start.trim(), end) {
        ("", "") => None,
        ("", end) => Some(end.to_string()),
        (start, "") => Some(start.to_string()),
        (start, end) => Some(format!("{start} – {end}")),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::models::{
        default_section_order, CustomSectionItemDraft, SkillDraft, WorkExperienceDraft,
    };
    use crate::resume::models::{CertificationDraft, EducationDraft, ProjectDraft};
    use crate::resume::store::DocumentStore;

    fn sections(doc: &RenderedDocument) -> Vec<SectionType> {
        doc.blocks.iter().map(|b| b.section).collect()
    }

    fn only_entry(doc: &RenderedDocument, section: SectionType) -> RenderedEntry {
        let block = doc
            .blocks
            .iter()
            .find(|b| b.section == section)
            .expect("block present");
        match &block.body {
            BlockBody::Entries(entries) if entries.len() == 1 => entries[0].clone(),
            other => panic!("expected a single entry, got {other:?}"),
        }
    }

    fn make_job(current: bool) -> WorkExperienceDraft {
        WorkExperienceDraft {
            company: "Initech".to_string(),
            title: "Developer".to_string(),
            location: "Austin".to_string(),
            start_date: "2019".to_string(),
            end_date: "2021".to_string(),
            current,
            description: "TPS reports".to_string(),
        }
    }

    #[test]
    fn test_empty_state_projects_contact_only() {
        let doc = project(&ResumeState::default());
        assert_eq!(sections(&doc), vec![SectionType::Contact]);
        match &doc.blocks[0].body {
            BlockBody::Contact(card) => {
                assert_eq!(card.name, "");
                assert!(card.details.is_empty());
                assert!(card.links.is_empty());
            }
            other => panic!("expected contact body, got {other:?}"),
        }
    }

    #[test]
    fn test_skills_render_in_insertion_order() {
        let mut store = DocumentStore::default();
        store.add_skill(SkillDraft {
            name: "SQL".to_string(),
        });
        store.add_skill(SkillDraft {
            name: "Go".to_string(),
        });
        let doc = project(&store.state());
        let skills = doc
            .blocks
            .iter()
            .find(|b| b.section == SectionType::Skills)
            .expect("skills block present");
        assert_eq!(
            skills.body,
            BlockBody::List(vec!["SQL".to_string(), "Go".to_string()])
        );
    }

    #[test]
    fn test_projection_is_deterministic() {
        let mut store = DocumentStore::default();
        store.add_work_experience(make_job(false));
        store.add_skill(SkillDraft {
            name: "Rust".to_string(),
        });
        let state = store.state();
        assert_eq!(project(&state), project(&state));
    }

    #[test]
    fn test_reordered_sections_follow_order_list() {
        let mut store = DocumentStore::default();
        store.add_work_experience(make_job(false));
        store.add_skill(SkillDraft {
            name: "Rust".to_string(),
        });
        let before = project(&store.state());
        assert_eq!(
            sections(&before),
            vec![
                SectionType::Contact,
                SectionType::WorkExperience,
                SectionType::Skills
            ]
        );

        let mut order = default_section_order();
        let skills = order.remove(3);
        order.insert(1, skills);
        store.update_section_order(order);
        let after = project(&store.state());
        assert_eq!(
            sections(&after),
            vec![
                SectionType::Contact,
                SectionType::Skills,
                SectionType::WorkExperience
            ]
        );
        // Same blocks, different order.
        assert_eq!(before.blocks[1], after.blocks[2]);
        assert_eq!(before.blocks[2], after.blocks[1]);
    }

    #[test]
    fn test_disabled_section_is_omitted() {
        let mut store = DocumentStore::default();
        store.add_skill(SkillDraft {
            name: "Rust".to_string(),
        });
        store.toggle_section_enabled(SectionType::Skills);
        store.toggle_section_enabled(SectionType::Contact);
        assert!(project(&store.state()).blocks.is_empty());
    }

    #[test]
    fn test_current_job_renders_present() {
        let mut store = DocumentStore::default();
        store.add_work_experience(make_job(true));
        let doc = project(&store.state());
        match &doc.blocks[1].body {
            BlockBody::Entries(entries) => {
                assert_eq!(entries[0].aside, vec!["Austin", "2019 – Present"]);
                assert_eq!(entries[0].subtitle.as_deref(), Some("Initech"));
            }
            other => panic!("expected entries, got {other:?}"),
        }
    }

    #[test]
    fn test_each_nonempty_custom_section_is_its_own_block() {
        let mut store = DocumentStore::default();
        let awards = store.add_custom_section("Awards");
        store.add_custom_section("Empty");
        let talks = store.add_custom_section("Talks");
        for (section, title) in [(awards, "Prize"), (talks, "Keynote")] {
            store
                .add_custom_section_item(
                    section,
                    CustomSectionItemDraft {
                        title: title.to_string(),
                        ..Default::default()
                    },
                )
                .unwrap();
        }
        let doc = project(&store.state());
        let headings: Vec<Option<String>> = doc
            .blocks
            .iter()
            .filter(|b| b.section == SectionType::CustomSections)
            .map(|b| b.heading.clone())
            .collect();
        assert_eq!(
            headings,
            vec![Some("AWARDS".to_string()), Some("TALKS".to_string())]
        );
    }

    #[test]
    fn test_date_range_variants() {
        assert_eq!(date_range("2020", "2022", false).as_deref(), Some("2020 – 2022"));
        assert_eq!(date_range("2020", "2022", true).as_deref(), Some("2020 – Present"));
        assert_eq!(date_range("2020", "", false).as_deref(), Some("2020"));
        assert_eq!(date_range("", "", false), None);
    }

    #[test]
    fn test_date_range_blank_start_has_no_leading_separator() {
        assert_eq!(date_range("", "2022", false).as_deref(), Some("2022"));
        assert_eq!(date_range("  ", "", true).as_deref(), Some("Present"));
    }

    #[test]
    fn test_education_entry_rendering() {
        let mut store = DocumentStore::default();
        store.add_education(EducationDraft {
            institution: "MIT".to_string(),
            degree: "BSc".to_string(),
            field: "Computer Science".to_string(),
            location: "Cambridge".to_string(),
            start_date: "2015".to_string(),
            end_date: "2019".to_string(),
            current: false,
            description: Some("Thesis on type systems".to_string()),
        });
        let entry = only_entry(&project(&store.state()), SectionType::Education);
        assert_eq!(entry.title, "BSc in Computer Science");
        assert_eq!(entry.subtitle.as_deref(), Some("MIT"));
        assert_eq!(entry.aside, vec!["Cambridge", "2015 – 2019"]);
        assert_eq!(entry.description.as_deref(), Some("Thesis on type systems"));
        assert_eq!(entry.note, None);
    }

    #[test]
    fn test_project_entry_rendering() {
        let mut store = DocumentStore::default();
        store.add_project(ProjectDraft {
            name: "Compiler".to_string(),
            description: "A toy compiler".to_string(),
            link: Some("https://example.com/compiler".to_string()),
            skills: vec!["Rust".to_string(), "LLVM".to_string()],
        });
        let entry = only_entry(&project(&store.state()), SectionType::Projects);
        assert_eq!(entry.title, "Compiler");
        assert_eq!(entry.subtitle.as_deref(), Some("https://example.com/compiler"));
        assert!(entry.aside.is_empty());
        assert_eq!(entry.description.as_deref(), Some("A toy compiler"));
        assert_eq!(entry.note.as_deref(), Some("Skills: Rust, LLVM"));
    }

    #[test]
    fn test_project_without_link_or_skills() {
        let mut store = DocumentStore::default();
        store.add_project(ProjectDraft {
            name: "Blog".to_string(),
            description: "Static site".to_string(),
            ..Default::default()
        });
        let entry = only_entry(&project(&store.state()), SectionType::Projects);
        assert_eq!(entry.subtitle, None);
        assert_eq!(entry.note, None);
    }

    #[test]
    fn test_certification_entry_rendering() {
        let mut store = DocumentStore::default();
        store.add_certification(CertificationDraft {
            name: "CKA".to_string(),
            issuer: "CNCF".to_string(),
            date: "2022-05".to_string(),
            expiry_date: Some("2025-05".to_string()),
            ..Default::default()
        });
        let entry = only_entry(&project(&store.state()), SectionType::Certifications);
        assert_eq!(entry.title, "CKA");
        assert_eq!(entry.subtitle.as_deref(), Some("CNCF"));
        assert_eq!(entry.aside, vec!["2022-05 – 2025-05"]);
        assert_eq!(entry.description, None);
        assert_eq!(entry.note, None);
    }

    #[test]
    fn test_certification_without_expiry_shows_date_only() {
        let mut store = DocumentStore::default();
        store.add_certification(CertificationDraft {
            name: "OSCP".to_string(),
            issuer: "OffSec".to_string(),
            date: "2021".to_string(),
            ..Default::default()
        });
        let entry = only_entry(&project(&store.state()), SectionType::Certifications);
        assert_eq!(entry.aside, vec!["2021"]);
    }
}
