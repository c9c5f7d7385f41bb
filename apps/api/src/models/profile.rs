use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

/// Profile submitted for recommendation. Manual input carries `interests`;
/// resume-derived input is a bare `{ "skills": [...] }` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileInput {
    Manual(ManualProfile),
    Resume(ResumeProfile),
}

impl ProfileInput {
    /// Parses a request body, choosing the shape by its `interests` key so
    /// type errors name the offending field instead of "no variant matched".
    pub fn from_json(body: Value) -> Result<Self, AppError> {
        let Some(object) = body.as_object() else {
            return Err(AppError::Validation(
                "profile must be a JSON object".to_string(),
            ));
        };
        if object.contains_key("interests") {
            serde_json::from_value(body)
                .map(ProfileInput::Manual)
                .map_err(|e| AppError::Validation(format!("invalid manual profile: {e}")))
        } else if object.contains_key("skills") {
            serde_json::from_value(body)
                .map(ProfileInput::Resume)
                .map_err(|e| AppError::Validation(format!("invalid resume profile: {e}")))
        } else {
            Err(AppError::Validation(
                "profile needs either `interests` (manual input) or `skills` (resume input)"
                    .to_string(),
            ))
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            ProfileInput::Manual(_) => "manual",
            ProfileInput::Resume(_) => "resume",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualProfile {
    pub interests: Interests,
    pub skill_levels: SkillLevels,
    pub problem_solving: i64,
    pub creativity: i64,
    #[serde(default)]
    pub work_style: Option<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub selected_tools: Vec<String>,
}

/// Interest sliders, 1–5.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interests {
    pub tech: i64,
    pub design: i64,
    pub business: i64,
}

/// Skill-level sliders, 1–5.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillLevels {
    pub programming: i64,
    pub analytical: i64,
    pub communication: i64,
}

/// Skills extracted upstream from an uploaded resume. Other parsed fields
/// (name, email, education, ...) are accepted and ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub skills: Vec<String>,
}
