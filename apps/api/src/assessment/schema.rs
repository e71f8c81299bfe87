//! Field schemas: declarative constraints for each wizard step.
//!
//! A schema is a static table of `FieldRule`s. `validate` evaluates every rule
//! against a candidate and either hands the candidate back untouched or returns
//! one message per failing field. There is no partial acceptance.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::assessment::models::{
    Interests, PersonalInfo, SelectOption, Skills, EDUCATION_LEVELS, EXPERIENCE_LEVELS,
    LEARNING_STYLES, WORK_PREFERENCES,
};

/// Field name → human-readable failure message.
pub type FieldErrors = BTreeMap<String, String>;

// Local part may not start with '.', and no ".." anywhere; checked outside the
// pattern since the regex crate has no lookahead.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$")
        .expect("email pattern is a valid regex")
});

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// At least this many characters (not bytes).
    MinLength(usize),
    Email,
    OneOf(&'static [SelectOption]),
    NonEmpty,
}

impl Rule {
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Rule::MinLength(min) => value.chars().count() >= *min,
            Rule::Email => is_email(value),
            Rule::OneOf(options) => options.iter().any(|o| o.value == value),
            Rule::NonEmpty => !value.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub rule: Rule,
    pub message: &'static str,
}

/// A form section bound to a static rule table.
pub trait StepSchema: Sized {
    const RULES: &'static [FieldRule];

    /// Current value of a field by its wire name; unknown names read as empty.
    fn value(&self, field: &str) -> &str;
}

pub fn is_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_PATTERN.is_match(value)
}

/// Validates a candidate against its schema.
///
/// Returns the candidate unchanged when every rule holds, otherwise the full
/// set of field errors.
pub fn validate<T: StepSchema>(candidate: T) -> Result<T, FieldErrors> {
    let errors = field_errors(&candidate);
    if errors.is_empty() {
        Ok(candidate)
    } else {
        Err(errors)
    }
}

/// Every failing field of `candidate`, first failing rule wins per field.
pub fn field_errors<T: StepSchema>(candidate: &T) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for rule in T::RULES {
        if errors.contains_key(rule.field) {
            continue;
        }
        if !rule.rule.accepts(candidate.value(rule.field)) {
            errors.insert(rule.field.to_string(), rule.message.to_string());
        }
    }
    errors
}

impl StepSchema for PersonalInfo {
    const RULES: &'static [FieldRule] = &[
        FieldRule {
            field: "name",
            rule: Rule::MinLength(2),
            message: "Name must be at least 2 characters",
        },
        FieldRule {
            field: "email",
            rule: Rule::Email,
            message: "Please enter a valid email",
        },
        FieldRule {
            field: "education",
            rule: Rule::OneOf(EDUCATION_LEVELS),
            message: "Please select your education level",
        },
        FieldRule {
            field: "major",
            rule: Rule::NonEmpty,
            message: "Please enter your major/field of study",
        },
    ];

    fn value(&self, field: &str) -> &str {
        match field {
            "name" => &self.name,
            "email" => &self.email,
            "education" => &self.education,
            "major" => &self.major,
            _ => "",
        }
    }
}

impl StepSchema for Skills {
    const RULES: &'static [FieldRule] = &[
        FieldRule {
            field: "programmingExperience",
            rule: Rule::OneOf(EXPERIENCE_LEVELS),
            message: "Please select your programming experience",
        },
        FieldRule {
            field: "preferredLanguages",
            rule: Rule::NonEmpty,
            message: "Please enter your preferred programming languages",
        },
        FieldRule {
            field: "projectExperience",
            rule: Rule::NonEmpty,
            message: "Please describe your project experience",
        },
    ];

    fn value(&self, field: &str) -> &str {
        match field {
            "programmingExperience" => &self.programming_experience,
            "preferredLanguages" => &self.preferred_languages,
            "projectExperience" => &self.project_experience,
            _ => "",
        }
    }
}

impl StepSchema for Interests {
    const RULES: &'static [FieldRule] = &[
        FieldRule {
            field: "careerInterests",
            rule: Rule::NonEmpty,
            message: "Please enter your career interests",
        },
        FieldRule {
            field: "workPreference",
            rule: Rule::OneOf(WORK_PREFERENCES),
            message: "Please select your work preference",
        },
        FieldRule {
            field: "learningStyle",
            rule: Rule::OneOf(LEARNING_STYLES),
            message: "Please select your learning style",
        },
    ];

    fn value(&self, field: &str) -> &str {
        match field {
            "careerInterests" => &self.career_interests,
            "workPreference" => &self.work_preference,
            "learningStyle" => &self.learning_style,
            _ => "",
        }
    }
}
