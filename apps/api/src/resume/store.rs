//! Document Store: the single writer of résumé state.
//!
//! Every operation is total: it builds a new `ResumeState` from the current one and
//! swaps it in whole. Readers hold `Arc<ResumeState>` snapshots, so a snapshot taken
//! before a mutation never changes underneath them.
//!
//! Lookup misses (unknown id, unknown section) leave the state as it was. There is no
//! error channel at this layer: callers validate input before they get here.

use std::sync::Arc;

use uuid::Uuid;

use crate::resume::models::{
    CertificationDraft, CertificationPatch, ContactPatch, CustomSection, CustomSectionItemDraft,
    CustomSectionItemPatch, Draft, EducationDraft, EducationPatch, Merge, ProjectDraft,
    ProjectPatch, Record, ResumeState, SectionOrderEntry, SectionType, SkillDraft, SkillPatch,
    WorkExperienceDraft, WorkExperiencePatch,
};

#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    state: Arc<ResumeState>,
}

impl DocumentStore {
    pub fn new(initial: ResumeState) -> Self {
        DocumentStore {
            state: Arc::new(initial),
        }
    }

    /// Current state. Cheap: clones the `Arc`, not the document.
    pub fn state(&self) -> Arc<ResumeState> {
        Arc::clone(&self.state)
    }

    fn replace(&mut self, next: ResumeState) {
        self.state = Arc::new(next);
    }

    // ── Contact ─────────────────────────────────────────────────────────────

    pub fn update_contact(&mut self, patch: &ContactPatch) {
        let next = ResumeState {
            contact: self.state.contact.merge(patch),
            ..(*self.state).clone()
        };
        self.replace(next);
    }

    // ── Work experience ─────────────────────────────────────────────────────

    pub fn add_work_experience(&mut self, draft: WorkExperienceDraft) -> Uuid {
        let id = new_id();
        let next = ResumeState {
            work_experience: appended(&self.state.work_experience, draft.into_record(id)),
            ..(*self.state).clone()
        };
        self.replace(next);
        id
    }

    pub fn update_work_experience(&mut self, id: Uuid, patch: &WorkExperiencePatch) {
        let next = ResumeState {
            work_experience: updated(&self.state.work_experience, id, patch),
            ..(*self.state).clone()
        };
        self.replace(next);
    }

    pub fn remove_work_experience(&mut self, id: Uuid) {
        let next = ResumeState {
            work_experience: removed(&self.state.work_experience, id),
            ..(*self.state).clone()
        };
        self.replace(next);
    }

    // ── Education ───────────────────────────────────────────────────────────

    pub fn add_education(&mut self, draft: EducationDraft) -> Uuid {
        let id = new_id();
        let next = ResumeState {
            education: appended(&self.state.education, draft.into_record(id)),
            ..(*self.state).clone()
        };
        self.replace(next);
        id
    }

    pub fn update_education(&mut self, id: Uuid, patch: &EducationPatch) {
        let next = ResumeState {
            education: updated(&self.state.education, id, patch),
            ..(*self.state).clone()
        };
        self.replace(next);
    }

    pub fn remove_education(&mut self, id: Uuid) {
        let next = ResumeState {
            education: removed(&self.state.education, id),
            ..(*self.state).clone()
        };
        self.replace(next);
    }

    // ── Skills ──────────────────────────────────────────────────────────────

    pub fn add_skill(&mut self, draft: SkillDraft) -> Uuid {
        let id = new_id();
        let next = ResumeState {
            skills: appended(&self.state.skills, draft.into_record(id)),
            ..(*self.state).clone()
        };
        self.replace(next);
        id
    }

    /// Adds a skill unless one with the same name (case-insensitive) exists.
    /// Returns the id of the new or the existing skill.
    pub fn add_skill_if_absent(&mut self, name: &str) -> Uuid {
        let wanted = name.trim().to_lowercase();
        if let Some(existing) = self
            .state
            .skills
            .iter()
            .find(|s| s.name.trim().to_lowercase() == wanted)
        {
            return existing.id;
        }
        self.add_skill(SkillDraft {
            name: name.trim().to_string(),
        })
    }

    pub fn update_skill(&mut self, id: Uuid, patch: &SkillPatch) {
        let next = ResumeState {
            skills: updated(&self.state.skills, id, patch),
            ..(*self.state).clone()
        };
        self.replace(next);
    }

    pub fn remove_skill(&mut self, id: Uuid) {
        let next = ResumeState {
            skills: removed(&self.state.skills, id),
            ..(*self.state).clone()
        };
        self.replace(next);
    }

    // ── Projects ────────────────────────────────────────────────────────────

    pub fn add_project(&mut self, draft: ProjectDraft) -> Uuid {
        let id = new_id();
        let next = ResumeState {
            projects: appended(&self.state.projects, draft.into_record(id)),
            ..(*self.state).clone()
        };
        self.replace(next);
        id
    }

    pub fn update_project(&mut self, id: Uuid, patch: &ProjectPatch) {
        let next = ResumeState {
            projects: updated(&self.state.projects, id, patch),
            ..(*self.state).clone()
        };
        self.replace(next);
    }

    pub fn remove_project(&mut self, id: Uuid) {
        let next = ResumeState {
            projects: removed(&self.state.projects, id),
            ..(*self.state).clone()
        };
        self.replace(next);
    }

    // ── Certifications ──────────────────────────────────────────────────────

    pub fn add_certification(&mut self, draft: CertificationDraft) -> Uuid {
        let id = new_id();
        let next = ResumeState {
            certifications: appended(&self.state.certifications, draft.into_record(id)),
            ..(*self.state).clone()
        };
        self.replace(next);
        id
    }

    pub fn update_certification(&mut self, id: Uuid, patch: &CertificationPatch) {
        let next = ResumeState {
            certifications: updated(&self.state.certifications, id, patch),
            ..(*self.state).clone()
        };
        self.replace(next);
    }

    pub fn remove_certification(&mut self, id: Uuid) {
        let next = ResumeState {
            certifications: removed(&self.state.certifications, id),
            ..(*self.state).clone()
        };
        self.replace(next);
    }

    // ── Custom sections ─────────────────────────────────────────────────────

    pub fn add_custom_section(&mut self, title: &str) -> Uuid {
        let id = new_id();
        let section = CustomSection {
            id,
            title: title.to_string(),
            items: Vec::new(),
        };
        let next = ResumeState {
            custom_sections: appended(&self.state.custom_sections, section),
            ..(*self.state).clone()
        };
        self.replace(next);
        id
    }

    pub fn update_custom_section(&mut self, id: Uuid, title: &str) {
        let next = ResumeState {
            custom_sections: map_section(&self.state.custom_sections, id, |section| {
                CustomSection {
                    title: title.to_string(),
                    ..section.clone()
                }
            }),
            ..(*self.state).clone()
        };
        self.replace(next);
    }

    /// Removes the section together with every item it owns.
    pub fn remove_custom_section(&mut self, id: Uuid) {
        let next = ResumeState {
            custom_sections: removed(&self.state.custom_sections, id),
            ..(*self.state).clone()
        };
        self.replace(next);
    }

    /// Appends an item to the section's items. `None` (and no change) if the section is unknown.
    pub fn add_custom_section_item(
        &mut self,
        section_id: Uuid,
        draft: CustomSectionItemDraft,
    ) -> Option<Uuid> {
        if !self.state.custom_sections.iter().any(|s| s.id == section_id) {
            return None;
        }
        let item = draft.into_record(new_id());
        let item_id = item.id;
        let next = ResumeState {
            custom_sections: map_section(&self.state.custom_sections, section_id, |section| {
                CustomSection {
                    items: appended(&section.items, item.clone()),
                    ..section.clone()
                }
            }),
            ..(*self.state).clone()
        };
        self.replace(next);
        Some(item_id)
    }

    pub fn update_custom_section_item(
        &mut self,
        section_id: Uuid,
        item_id: Uuid,
        patch: &CustomSectionItemPatch,
    ) {
        let next = ResumeState {
            custom_sections: map_section(&self.state.custom_sections, section_id, |section| {
                CustomSection {
                    items: updated(&section.items, item_id, patch),
                    ..section.clone()
                }
            }),
            ..(*self.state).clone()
        };
        self.replace(next);
    }

    pub fn remove_custom_section_item(&mut self, section_id: Uuid, item_id: Uuid) {
        let next = ResumeState {
            custom_sections: map_section(&self.state.custom_sections, section_id, |section| {
                CustomSection {
                    items: removed(&section.items, item_id),
                    ..section.clone()
                }
            }),
            ..(*self.state).clone()
        };
        self.replace(next);
    }

    // ── Section order ───────────────────────────────────────────────────────

    /// Replaces the order list wholesale. The caller must pass a permutation of the
    /// seven entries; a dropped entry simply stops rendering until it is put back.
    pub fn update_section_order(&mut self, order: Vec<SectionOrderEntry>) {
        let next = ResumeState {
            section_order: order,
            ..(*self.state).clone()
        };
        self.replace(next);
    }

    pub fn toggle_section_enabled(&mut self, section: SectionType) {
        let order = self
            .state
            .section_order
            .iter()
            .map(|entry| {
                if entry.id == section {
                    SectionOrderEntry {
                        enabled: !entry.enabled,
                        ..entry.clone()
                    }
                } else {
                    entry.clone()
                }
            })
            .collect();
        let next = ResumeState {
            section_order: order,
            ..(*self.state).clone()
        };
        self.replace(next);
    }

    /// Back to the canonical initial state.
    pub fn reset_all(&mut self) {
        self.replace(ResumeState::default());
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Collection helpers
// ────────────────────────────────────────────────────────────────────────────

fn new_id() -> Uuid {
    Uuid::new_v4()
}

fn appended<R: Clone>(items: &[R], record: R) -> Vec<R> {
    let mut next = Vec::with_capacity(items.len() + 1);
    next.extend_from_slice(items);
    next.push(record);
    next
}

fn updated<R, P>(items: &[R], id: Uuid, patch: &P) -> Vec<R>
where
    R: Record + Merge<P>,
{
    items
        .iter()
        .map(|item| {
            if item.id() == id {
                item.merge(patch)
            } else {
                item.clone()
            }
        })
        .collect()
}

fn removed<R: Record>(items: &[R], id: Uuid) -> Vec<R> {
    items.iter().filter(|item| item.id() != id).cloned().collect()
}

fn map_section<F>(sections: &[CustomSection], id: Uuid, f: F) -> Vec<CustomSection>
where
    F: Fn(&CustomSection) -> CustomSection,
{
    sections
        .iter()
        .map(|section| {
            if section.id == id {
                f(section)
            } else {
                section.clone()
            }
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::models::{default_section_order, WorkExperience};
    use std::collections::HashSet;

    fn make_job(company: &str) -> WorkExperienceDraft {
        WorkExperienceDraft {
            company: company.to_string(),
            title: "Engineer".to_string(),
            location: "Remote".to_string(),
            start_date: "2021-03".to_string(),
            end_date: "2023-09".to_string(),
            current: false,
            description: "Shipped features".to_string(),
        }
    }

    fn skill(name: &str) -> SkillDraft {
        SkillDraft {
            name: name.to_string(),
        }
    }

    fn item(title: &str) -> CustomSectionItemDraft {
        CustomSectionItemDraft {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_work_experience_appends_with_unique_ids() {
        let mut store = DocumentStore::default();
        for i in 0..50 {
            store.add_work_experience(make_job(&format!("Company {i}")));
        }
        let state = store.state();
        assert_eq!(state.work_experience.len(), 50);
        let ids: HashSet<Uuid> = state.work_experience.iter().map(|w| w.id).collect();
        assert_eq!(ids.len(), 50, "every generated id must be unique");
        assert_eq!(state.work_experience[0].company, "Company 0");
        assert_eq!(state.work_experience[49].company, "Company 49");
    }

    #[test]
    fn test_update_touches_only_target_record() {
        let mut store = DocumentStore::default();
        let first = store.add_work_experience(make_job("Acme"));
        let second = store.add_work_experience(make_job("Globex"));
        let before = store.state();

        store.update_work_experience(
            first,
            &WorkExperiencePatch {
                title: Some("Lead".to_string()),
                ..Default::default()
            },
        );

        let after = store.state();
        let updated = &after.work_experience[0];
        assert_eq!(updated.id, first);
        assert_eq!(updated.title, "Lead");
        let expected = WorkExperience {
            title: "Lead".to_string(),
            ..before.work_experience[0].clone()
        };
        assert_eq!(updated, &expected);
        assert_eq!(after.work_experience[1], before.work_experience[1]);
        assert_eq!(after.work_experience[1].id, second);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = DocumentStore::default();
        store.add_skill(skill("Rust"));
        let before = store.state();
        store.update_skill(
            Uuid::new_v4(),
            &SkillPatch {
                name: Some("Go".to_string()),
            },
        );
        assert_eq!(*store.state(), *before);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut store = DocumentStore::default();
        store.add_project(ProjectDraft {
            name: "Site".to_string(),
            description: "Static site".to_string(),
            ..Default::default()
        });
        let before = store.state();
        store.remove_project(Uuid::new_v4());
        assert_eq!(*store.state(), *before);
    }

    #[test]
    fn test_remove_filters_only_matching_record() {
        let mut store = DocumentStore::default();
        let a = store.add_education(EducationDraft {
            institution: "MIT".to_string(),
            ..Default::default()
        });
        let b = store.add_education(EducationDraft {
            institution: "ETH".to_string(),
            ..Default::default()
        });
        store.remove_education(a);
        let state = store.state();
        assert_eq!(state.education.len(), 1);
        assert_eq!(state.education[0].id, b);
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_mutation() {
        let mut store = DocumentStore::default();
        store.add_skill(skill("SQL"));
        let snapshot = store.state();
        store.add_skill(skill("Go"));
        assert_eq!(snapshot.skills.len(), 1);
        assert_eq!(store.state().skills.len(), 2);
    }

    #[test]
    fn test_update_contact_merges_fields() {
        let mut store = DocumentStore::default();
        store.update_contact(&ContactPatch {
            full_name: Some("Grace Hopper".to_string()),
            email: Some("grace@navy.mil".to_string()),
            ..Default::default()
        });
        store.update_contact(&ContactPatch {
            phone: Some("555-0100".to_string()),
            ..Default::default()
        });
        let contact = &store.state().contact;
        assert_eq!(contact.full_name, "Grace Hopper");
        assert_eq!(contact.email, "grace@navy.mil");
        assert_eq!(contact.phone, "555-0100");
    }

    #[test]
    fn test_remove_custom_section_cascades_items() {
        let mut store = DocumentStore::default();
        let awards = store.add_custom_section("Awards");
        let item_id = store
            .add_custom_section_item(awards, item("Employee of the Month"))
            .expect("section exists");
        store.remove_custom_section(awards);

        let state = store.state();
        assert!(state.custom_sections.is_empty());
        assert!(!state
            .custom_sections
            .iter()
            .flat_map(|s| s.items.iter())
            .any(|i| i.id == item_id));
    }

    #[test]
    fn test_custom_section_item_ops_are_compound_keyed() {
        let mut store = DocumentStore::default();
        let awards = store.add_custom_section("Awards");
        let talks = store.add_custom_section("Talks");
        let award = store.add_custom_section_item(awards, item("Prize")).unwrap();
        let talk = store.add_custom_section_item(talks, item("Keynote")).unwrap();

        // Right item id, wrong section id: nothing happens.
        store.update_custom_section_item(
            talks,
            award,
            &CustomSectionItemPatch {
                title: Some("Changed".to_string()),
                ..Default::default()
            },
        );
        store.remove_custom_section_item(talks, award);
        let state = store.state();
        assert_eq!(state.custom_sections[0].items[0].title, "Prize");
        assert_eq!(state.custom_sections[1].items.len(), 1);

        store.update_custom_section_item(
            awards,
            award,
            &CustomSectionItemPatch {
                date: Some("2024".to_string()),
                ..Default::default()
            },
        );
        store.remove_custom_section_item(talks, talk);
        let state = store.state();
        assert_eq!(state.custom_sections[0].items[0].date.as_deref(), Some("2024"));
        assert!(state.custom_sections[1].items.is_empty());
    }

    #[test]
    fn test_add_item_to_unknown_section_is_noop() {
        let mut store = DocumentStore::default();
        store.add_custom_section("Awards");
        let before = store.state();
        assert!(store
            .add_custom_section_item(Uuid::new_v4(), item("Orphan"))
            .is_none());
        assert_eq!(*store.state(), *before);
    }

    #[test]
    fn test_rename_custom_section_keeps_items() {
        let mut store = DocumentStore::default();
        let id = store.add_custom_section("Awards");
        store.add_custom_section_item(id, item("Prize")).unwrap();
        store.update_custom_section(id, "Honors");
        let state = store.state();
        assert_eq!(state.custom_sections[0].title, "Honors");
        assert_eq!(state.custom_sections[0].items.len(), 1);
    }

    #[test]
    fn test_toggle_section_twice_restores_flag() {
        let mut store = DocumentStore::default();
        let original = store.state().section_order.clone();
        store.toggle_section_enabled(SectionType::Skills);
        let toggled = store.state();
        let skills = toggled
            .section_order
            .iter()
            .find(|e| e.id == SectionType::Skills)
            .unwrap();
        assert!(!skills.enabled);
        store.toggle_section_enabled(SectionType::Skills);
        assert_eq!(store.state().section_order, original);
    }

    #[test]
    fn test_toggle_missing_entry_is_noop() {
        let mut store = DocumentStore::default();
        let order: Vec<SectionOrderEntry> = default_section_order()
            .into_iter()
            .filter(|e| e.id != SectionType::Projects)
            .collect();
        store.update_section_order(order.clone());
        store.toggle_section_enabled(SectionType::Projects);
        assert_eq!(store.state().section_order, order);
    }

    #[test]
    fn test_update_section_order_replaces_wholesale() {
        let mut store = DocumentStore::default();
        let mut order = default_section_order();
        order.swap(1, 3);
        store.update_section_order(order.clone());
        assert_eq!(store.state().section_order, order);
        assert_eq!(store.state().section_order[1].id, SectionType::Skills);
    }

    #[test]
    fn test_add_skill_if_absent_is_case_insensitive() {
        let mut store = DocumentStore::default();
        let first = store.add_skill(skill("Python"));
        let again = store.add_skill_if_absent("python");
        assert_eq!(first, again);
        assert_eq!(store.state().skills.len(), 1);
        store.add_skill_if_absent("Docker");
        assert_eq!(store.state().skills.len(), 2);
    }

    #[test]
    fn test_reset_all_restores_initial_state() {
        let mut store = DocumentStore::default();
        store.add_skill(skill("SQL"));
        store.add_custom_section("Awards");
        store.toggle_section_enabled(SectionType::Education);
        store.reset_all();
        assert_eq!(*store.state(), ResumeState::default());
    }
}
