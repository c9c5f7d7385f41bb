//! Feature Normalizer — turns a submitted profile into a `FeatureVector`.
//!
//! Manual input is validated strictly; resume-derived keywords are matched
//! against the tool/trait vocabularies and anything unknown is dropped.

use tracing::debug;

use crate::errors::AppError;
use crate::models::profile::{ManualProfile, ProfileInput, ResumeProfile};
use crate::recommendation::features::{
    self, FeatureVector, CREATIVITY, INTEREST_BUSINESS, INTEREST_DESIGN, INTEREST_TECH,
    PROBLEM_SOLVING, SKILL_ANALYTICAL, SKILL_COMMUNICATION, SKILL_PROGRAMMING,
};

pub const SLIDER_MIN: i64 = 1;
pub const SLIDER_MAX: i64 = 5;
pub const MAX_SELECTED_TOOLS: usize = 3;
pub const MAX_SELECTED_TRAITS: usize = 2;

pub fn normalize(input: &ProfileInput) -> Result<FeatureVector, AppError> {
    match input {
        ProfileInput::Manual(profile) => normalize_manual(profile),
        ProfileInput::Resume(profile) => normalize_resume(profile),
    }
}

/// Linear rescale of a 1–5 slider to [0, 1].
pub fn rescale_slider(field: &str, value: i64) -> Result<f64, AppError> {
    if !(SLIDER_MIN..=SLIDER_MAX).contains(&value) {
        return Err(AppError::Validation(format!(
            "'{field}' must be between {SLIDER_MIN} and {SLIDER_MAX}, got {value}"
        )));
    }
    Ok((value - SLIDER_MIN) as f64 / (SLIDER_MAX - SLIDER_MIN) as f64)
}

fn normalize_manual(profile: &ManualProfile) -> Result<FeatureVector, AppError> {
    let mut vector = FeatureVector::zeroed();

    let sliders = [
        (INTEREST_TECH, profile.interests.tech),
        (INTEREST_DESIGN, profile.interests.design),
        (INTEREST_BUSINESS, profile.interests.business),
        (SKILL_PROGRAMMING, profile.skill_levels.programming),
        (SKILL_ANALYTICAL, profile.skill_levels.analytical),
        (SKILL_COMMUNICATION, profile.skill_levels.communication),
        (PROBLEM_SOLVING, profile.problem_solving),
        (CREATIVITY, profile.creativity),
    ];
    for (feature, value) in sliders {
        vector.set(feature, rescale_slider(feature, value)?)?;
    }

    // Work style is optional: absent or blank leaves all three at zero.
    if let Some(style) = profile
        .work_style
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let feature = features::work_style_feature(style).ok_or_else(|| {
            AppError::Validation(format!(
                "workStyle must be one of team, solo, hybrid; got '{style}'"
            ))
        })?;
        vector.set(&feature, 1.0)?;
    }

    if profile.selected_tools.len() > MAX_SELECTED_TOOLS {
        return Err(AppError::Validation(format!(
            "at most {MAX_SELECTED_TOOLS} tools may be selected, got {}",
            profile.selected_tools.len()
        )));
    }
    for tool in &profile.selected_tools {
        let entry = features::lookup_tool(tool)
            .ok_or_else(|| AppError::Validation(format!("unknown tool '{tool}'")))?;
        vector.set(&features::tool_feature(entry), 1.0)?;
    }

    if profile.soft_skills.len() > MAX_SELECTED_TRAITS {
        return Err(AppError::Validation(format!(
            "at most {MAX_SELECTED_TRAITS} traits may be selected, got {}",
            profile.soft_skills.len()
        )));
    }
    for skill in &profile.soft_skills {
        let entry = features::lookup_trait(skill)
            .ok_or_else(|| AppError::Validation(format!("unknown trait '{skill}'")))?;
        vector.set(&features::trait_feature(entry), 1.0)?;
    }

    Ok(vector)
}

fn normalize_resume(profile: &ResumeProfile) -> Result<FeatureVector, AppError> {
    let mut vector = FeatureVector::zeroed();
    let mut dropped = 0usize;

    for keyword in &profile.skills {
        let feature = features::lookup_tool(keyword)
            .map(features::tool_feature)
            .or_else(|| features::lookup_trait(keyword).map(features::trait_feature));
        match feature {
            Some(name) => vector.set(&name, 1.0)?,
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(
            dropped,
            total = profile.skills.len(),
            "Unmatched resume keywords dropped"
        );
    }
    Ok(vector)
}
