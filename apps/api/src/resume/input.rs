//! Loose form-value normalization and the suggested skill catalogue.

use serde::{Deserialize, Deserializer, Serialize};

/// Suggested skills offered by the skills tab, grouped by category.
#[derive(Debug, Clone, Serialize)]
pub struct SkillCategory {
    pub category: &'static str,
    pub skills: &'static [&'static str],
}

pub const SUGGESTED_SKILLS: &[SkillCategory] = &[
    SkillCategory {
        category: "technical",
        skills: &[
            "JavaScript",
            "Python",
            "React",
            "SQL",
            "AWS",
            "Git",
            "Docker",
            "Node.js",
        ],
    },
    SkillCategory {
        category: "soft",
        skills: &[
            "Communication",
            "Teamwork",
            "Leadership",
            "Problem Solving",
            "Time Management",
        ],
    },
    SkillCategory {
        category: "languages",
        skills: &["English", "Spanish", "French", "German", "Chinese"],
    },
    SkillCategory {
        category: "tools",
        skills: &[
            "Microsoft Office",
            "Adobe Creative Suite",
            "Figma",
            "Jira",
            "Tableau",
        ],
    },
];

/// Splits a comma-separated skill string, trimming entries and dropping blanks.
pub fn split_skill_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseList {
    Many(Vec<String>),
    One(String),
}

impl LooseList {
    fn normalize(self) -> Vec<String> {
        match self {
            LooseList::Many(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            LooseList::One(text) => split_skill_list(&text),
        }
    }
}

/// Deserializes either `["a", "b"]` or `"a, b"` into a trimmed list without blanks.
pub fn deserialize_skill_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(LooseList::deserialize(deserializer)?.normalize())
}

/// Patch form of `deserialize_skill_list`: `null` means "leave unchanged".
pub fn deserialize_optional_skill_list<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LooseList>::deserialize(deserializer)?.map(LooseList::normalize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_skill_list_trims_and_drops_blanks() {
        assert_eq!(
            split_skill_list(" Rust ,Go,, ,SQL"),
            vec!["Rust".to_string(), "Go".to_string(), "SQL".to_string()]
        );
    }

    #[test]
    fn test_split_skill_list_empty_input() {
        assert!(split_skill_list("").is_empty());
        assert!(split_skill_list(" , ").is_empty());
    }

    #[test]
    fn test_catalogue_has_four_categories() {
        let categories: Vec<&str> = SUGGESTED_SKILLS.iter().map(|c| c.category).collect();
        assert_eq!(categories, vec!["technical", "soft", "languages", "tools"]);
        assert!(SUGGESTED_SKILLS.iter().all(|c| !c.skills.is_empty()));
    }
}
