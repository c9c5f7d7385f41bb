//! Explanation Formatter — renders the strongest contributions of a scored
//! career as a sentence that quotes the user's own inputs, e.g.
//! "communication (4/5)".

use crate::recommendation::features::{self, FeatureKind, FeatureVector};
use crate::recommendation::normalizer::{SLIDER_MAX, SLIDER_MIN};
use crate::recommendation::scoring::{Contribution, ScoredCareer};

pub const DEFAULT_TOP_N: usize = 2;

/// Placeholder in a career's description template.
pub const REASONS_PLACEHOLDER: &str = "{reasons}";

#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    pub text: String,
    /// Positively contributing features behind the text, strongest first.
    pub top_features: Vec<String>,
    /// Display names of the tools and traits among `top_features`.
    pub supporting_skills: Vec<String>,
}

/// Builds the explanation from the top `top_n` contributions by magnitude.
/// Zero contributions are never mentioned.
pub fn format_explanation(
    scored: &ScoredCareer,
    features: &FeatureVector,
    template: &str,
    top_n: usize,
) -> Explanation {
    let top: Vec<&Contribution> = scored
        .contributions
        .iter()
        .filter(|c| c.value != 0.0)
        .take(top_n)
        .collect();
    let (supporting, opposing): (Vec<&Contribution>, Vec<&Contribution>) =
        top.into_iter().partition(|c| c.value > 0.0);

    let mut text = if supporting.is_empty() {
        format!(
            "No single input stands out for {}; this match reflects the role's baseline.",
            scored.title
        )
    } else {
        let reasons = join_phrases(
            &supporting
                .iter()
                .map(|c| describe(&c.feature, features))
                .collect::<Vec<_>>(),
        );
        if template.contains(REASONS_PLACEHOLDER) {
            template.replace(REASONS_PLACEHOLDER, &reasons)
        } else {
            format!("{template} Strongest signals: {reasons}.")
        }
    };

    if !opposing.is_empty() {
        let against = join_phrases(
            &opposing
                .iter()
                .map(|c| describe(&c.feature, features))
                .collect::<Vec<_>>(),
        );
        text.push_str(&format!(" Working against this match: {against}."));
    }

    let supporting_skills = supporting
        .iter()
        .filter_map(|c| features::descriptor(&c.feature))
        .filter(|d| matches!(d.kind, FeatureKind::Tool | FeatureKind::Trait))
        .filter_map(|d| d.display.map(String::from))
        .collect();

    Explanation {
        text,
        top_features: supporting.iter().map(|c| c.feature.clone()).collect(),
        supporting_skills,
    }
}

/// Human label for a feature, quoting the literal slider level where relevant.
fn describe(feature: &str, features: &FeatureVector) -> String {
    let Some(descriptor) = features::descriptor(feature) else {
        return feature.to_string();
    };
    match descriptor.kind {
        FeatureKind::Slider => {
            let value = features.get(feature).unwrap_or(0.0);
            format!(
                "{} ({}/{SLIDER_MAX})",
                descriptor.label,
                slider_level(value)
            )
        }
        FeatureKind::WorkStyle | FeatureKind::Tool | FeatureKind::Trait => {
            descriptor.label.clone()
        }
    }
}

/// Inverse of the normalizer's rescale.
fn slider_level(value: f64) -> i64 {
    (value * (SLIDER_MAX - SLIDER_MIN) as f64).round() as i64 + SLIDER_MIN
}

/// "a", "a and b", "a, b and c".
fn join_phrases(phrases: &[String]) -> String {
    match phrases {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}
