//! Step components: the render/submit contract of each form section.
//!
//! A step is stateless between renders: it is given initial values (so that
//! back navigation re-populates the form) and, on submit, either invokes the
//! supplied callback with validated data or returns the field errors.

use serde::Serialize;

use crate::assessment::models::{
    Interests, PersonalInfo, SelectOption, Skills, EDUCATION_LEVELS, EXPERIENCE_LEVELS,
    LEARNING_STYLES, WORK_PREFERENCES,
};
use crate::assessment::schema::{validate, FieldErrors, StepSchema};

pub const TOTAL_STEPS: u8 = 3;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Text,
    Email,
    Select,
}

/// Static description of one input control.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub control: ControlKind,
    pub placeholder: &'static str,
    pub description: Option<&'static str>,
    pub options: &'static [SelectOption],
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub control: ControlKind,
    pub placeholder: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "no_options")]
    pub options: &'static [SelectOption],
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StepView {
    pub step: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub fields: Vec<FieldView>,
    pub can_go_back: bool,
    pub submit_label: &'static str,
}

fn no_options(options: &&'static [SelectOption]) -> bool {
    options.is_empty()
}

pub trait StepForm: StepSchema {
    const STEP: u8;
    const TITLE: &'static str;
    const DESCRIPTION: &'static str;
    const FIELDS: &'static [FieldSpec];
}

/// Builds the view of a step from its initial values and any errors from the
/// last rejected submission.
pub fn render<T: StepForm>(initial: &T, errors: Option<&FieldErrors>) -> StepView {
    let fields = T::FIELDS
        .iter()
        .map(|spec| FieldView {
            name: spec.name,
            label: spec.label,
            control: spec.control,
            placeholder: spec.placeholder,
            description: spec.description,
            options: spec.options,
            value: initial.value(spec.name).to_string(),
            error: errors.and_then(|e| e.get(spec.name).cloned()),
        })
        .collect();

    StepView {
        step: T::STEP,
        title: T::TITLE,
        description: T::DESCRIPTION,
        fields,
        can_go_back: T::STEP > 1,
        submit_label: if T::STEP == TOTAL_STEPS {
            "Complete Assessment"
        } else {
            "Next"
        },
    }
}

/// Validates `candidate` and passes it to `on_submit` only if it is accepted.
pub fn submit<T, F>(candidate: T, on_submit: F) -> Result<(), FieldErrors>
where
    T: StepForm,
    F: FnOnce(T),
{
    let accepted = validate(candidate)?;
    on_submit(accepted);
    Ok(())
}

impl StepForm for PersonalInfo {
    const STEP: u8 = 1;
    const TITLE: &'static str = "Personal Information";
    const DESCRIPTION: &'static str = "Tell us a bit about yourself";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            name: "name",
            label: "Full Name",
            control: ControlKind::Text,
            placeholder: "Enter your name",
            description: None,
            options: &[],
        },
        FieldSpec {
            name: "email",
            label: "Email",
            control: ControlKind::Email,
            placeholder: "your.email@example.com",
            description: None,
            options: &[],
        },
        FieldSpec {
            name: "education",
            label: "Education Level",
            control: ControlKind::Select,
            placeholder: "Select your education level",
            description: None,
            options: EDUCATION_LEVELS,
        },
        FieldSpec {
            name: "major",
            label: "Major/Field of Study",
            control: ControlKind::Text,
            placeholder: "E.g., Computer Science, Engineering",
            description: None,
            options: &[],
        },
    ];
}

impl StepForm for Skills {
    const STEP: u8 = 2;
    const TITLE: &'static str = "Skills & Experience";
    const DESCRIPTION: &'static str = "Tell us about your technical background";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            name: "programmingExperience",
            label: "Programming Experience",
            control: ControlKind::Select,
            placeholder: "Select your experience level",
            description: None,
            options: EXPERIENCE_LEVELS,
        },
        FieldSpec {
            name: "preferredLanguages",
            label: "Preferred Programming Languages",
            control: ControlKind::Text,
            placeholder: "E.g., Python, JavaScript, Java",
            description: Some("List languages you know or are interested in learning"),
            options: &[],
        },
        FieldSpec {
            name: "projectExperience",
            label: "Project Experience",
            control: ControlKind::Text,
            placeholder: "Describe your key projects or experiences",
            description: Some("Briefly describe your most notable project(s)"),
            options: &[],
        },
    ];
}

impl StepForm for Interests {
    const STEP: u8 = 3;
    const TITLE: &'static str = "Interests & Preferences";
    const DESCRIPTION: &'static str = "Tell us about your career interests";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            name: "careerInterests",
            label: "Career Interests",
            control: ControlKind::Text,
            placeholder: "E.g., Web Development, Data Science, Cloud",
            description: Some("List tech fields you're most interested in"),
            options: &[],
        },
        FieldSpec {
            name: "workPreference",
            label: "Work Preference",
            control: ControlKind::Select,
            placeholder: "Select your work preference",
            description: None,
            options: WORK_PREFERENCES,
        },
        FieldSpec {
            name: "learningStyle",
            label: "Learning Style",
            control: ControlKind::Select,
            placeholder: "Select your learning style",
            description: None,
            options: LEARNING_STYLES,
        },
    ];
}
