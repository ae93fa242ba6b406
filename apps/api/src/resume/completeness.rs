use serde::Serialize;

use crate::resume::models::ResumeState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormTab {
    Contact,
    Work,
    Education,
    Skills,
    Projects,
    Certifications,
    Custom,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabStatus {
    pub tab: FormTab,
    pub label: &'static str,
    pub required: bool,
    pub valid: bool,
    pub entry_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessReport {
    pub is_complete: bool,
    pub tabs: Vec<TabStatus>,
    pub missing: Vec<&'static str>,
}

/// Readiness of the form tabs. Advisory only: preview and export never check it.
pub fn compute_completeness_report(state: &ResumeState) -> CompletenessReport {
    let contact = &state.contact;
    let contact_valid =
        !contact.full_name.trim().is_empty() && !contact.email.trim().is_empty();
    let contact_filled = [
        &contact.full_name,
        &contact.email,
        &contact.phone,
        &contact.location,
    ]
    .iter()
    .filter(|v| !v.trim().is_empty())
    .count();

    let tabs = vec![
        TabStatus {
            tab: FormTab::Contact,
            label: "Contact Info",
            required: true,
            valid: contact_valid,
            entry_count: contact_filled,
        },
        required_collection(FormTab::Work, "Work Experience", state.work_experience.len()),
        required_collection(FormTab::Education, "Education", state.education.len()),
        required_collection(FormTab::Skills, "Skills", state.skills.len()),
        optional_collection(FormTab::Projects, "Projects", state.projects.len()),
        optional_collection(
            FormTab::Certifications,
            "Certifications",
            state.certifications.len(),
        ),
        optional_collection(
            FormTab::Custom,
            "Custom Sections",
            state.custom_sections.len(),
        ),
    ];

    let missing: Vec<&'static str> = tabs
        .iter()
        .filter(|t| t.required && !t.valid)
        .map(|t| t.label)
        .collect();

    CompletenessReport {
        is_complete: missing.is_empty(),
        tabs,
        missing,
    }
}

fn required_collection(tab: FormTab, label: &'static str, len: usize) -> TabStatus {
    TabStatus {
        tab,
        label,
        required: true,
        valid: len > 0,
        entry_count: len,
    }
}

fn optional_collection(tab: FormTab, label: &'static str, len: usize) -> TabStatus {
    TabStatus {
        tab,
        label,
        required: false,
        valid: true,
        entry_count: len,
    }
}
