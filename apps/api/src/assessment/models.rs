use serde::{Deserialize, Serialize};

/// One entry of a select control: the submitted value and its display label.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> SelectOption {
    SelectOption { value, label }
}

pub const EDUCATION_LEVELS: &[SelectOption] = &[
    opt("highschool", "High School"),
    opt("undergraduate", "Undergraduate"),
    opt("graduate", "Graduate"),
    opt("postgraduate", "Post Graduate"),
    opt("bootcamp", "Bootcamp"),
    opt("self-taught", "Self Taught"),
];

pub const EXPERIENCE_LEVELS: &[SelectOption] = &[
    opt("beginner", "Beginner (0-1 years)"),
    opt("intermediate", "Intermediate (1-3 years)"),
    opt("advanced", "Advanced (3-5 years)"),
    opt("expert", "Expert (5+ years)"),
];

pub const WORK_PREFERENCES: &[SelectOption] = &[
    opt("remote", "Remote Work"),
    opt("hybrid", "Hybrid"),
    opt("onsite", "Onsite"),
    opt("flexible", "Flexible"),
];

pub const LEARNING_STYLES: &[SelectOption] = &[
    opt("visual", "Visual (videos, diagrams)"),
    opt("reading", "Reading/Writing"),
    opt("interactive", "Interactive (hands-on projects)"),
    opt("social", "Social (group learning)"),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub education: String,
    pub major: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Skills {
    pub programming_experience: String,
    pub preferred_languages: String,
    pub project_experience: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Interests {
    pub career_interests: String,
    pub work_preference: String,
    pub learning_style: String,
}

/// Validated data accumulated across the wizard's steps.
///
/// Sections for steps not yet submitted hold empty strings. Updates never
/// mutate a section in place: each `with_*` call yields a new record with
/// exactly one section swapped out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub personal_info: PersonalInfo,
    pub skills: Skills,
    pub interests: Interests,
}

impl AssessmentRecord {
    pub fn with_personal_info(&self, personal_info: PersonalInfo) -> Self {
        Self {
            personal_info,
            ..self.clone()
        }
    }

    pub fn with_skills(&self, skills: Skills) -> Self {
        Self {
            skills,
            ..self.clone()
        }
    }

    pub fn with_interests(&self, interests: Interests) -> Self {
        Self {
            interests,
            ..self.clone()
        }
    }
}
