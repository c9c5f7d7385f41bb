//! Feature schema — the fixed, versioned feature space shared by the normalizer,
//! the career registry and the scoring engine.
//!
//! Every declared feature has a value in [0, 1]. Names outside the schema are
//! rejected wherever a vector or a weight map is built.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Serialize, Serializer};

use crate::errors::AppError;

/// Bumped whenever a feature is added, removed or renamed.
pub const SCHEMA_VERSION: &str = "v1";

pub const INTEREST_TECH: &str = "interest.tech";
pub const INTEREST_DESIGN: &str = "interest.design";
pub const INTEREST_BUSINESS: &str = "interest.business";
pub const SKILL_PROGRAMMING: &str = "skill.programming";
pub const SKILL_ANALYTICAL: &str = "skill.analytical";
pub const SKILL_COMMUNICATION: &str = "skill.communication";
pub const PROBLEM_SOLVING: &str = "problem_solving";
pub const CREATIVITY: &str = "creativity";

/// Slider features (1–5 on input) and the label used in explanations.
pub const SLIDER_FEATURES: &[(&str, &str)] = &[
    (INTEREST_TECH, "technology interest"),
    (INTEREST_DESIGN, "design interest"),
    (INTEREST_BUSINESS, "business interest"),
    (SKILL_PROGRAMMING, "programming"),
    (SKILL_ANALYTICAL, "analytical skills"),
    (SKILL_COMMUNICATION, "communication"),
    (PROBLEM_SOLVING, "problem solving"),
    (CREATIVITY, "creativity"),
];

/// Work-style values, one-hot encoded as `work_style.<value>`.
pub const WORK_STYLES: &[(&str, &str)] = &[
    ("team", "a preference for team work"),
    ("solo", "a preference for solo work"),
    ("hybrid", "a preference for hybrid work"),
];

/// An entry in one of the closed tool/trait vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub display: &'static str,
    pub slug: &'static str,
    pub aliases: &'static [&'static str],
}

const fn entry(
    display: &'static str,
    slug: &'static str,
    aliases: &'static [&'static str],
) -> VocabularyEntry {
    VocabularyEntry {
        display,
        slug,
        aliases,
    }
}

pub const TOOLS: &[VocabularyEntry] = &[
    entry("JavaScript", "javascript", &["js"]),
    entry("TypeScript", "typescript", &["ts"]),
    entry("Python", "python", &[]),
    entry("Java", "java", &[]),
    entry("React", "react", &["react.js", "reactjs"]),
    entry("Angular", "angular", &[]),
    entry("Vue", "vue", &["vue.js", "vuejs"]),
    entry("Node.js", "nodejs", &["node", "express", "express.js"]),
    entry("C++", "cpp", &[]),
    entry("Django", "django", &[]),
    entry("Flask", "flask", &[]),
    entry("FastAPI", "fastapi", &[]),
    entry("SQL", "sql", &[]),
    entry("MongoDB", "mongodb", &[]),
    entry("Git", "git", &["github"]),
    entry("Docker", "docker", &[]),
    entry("Kubernetes", "kubernetes", &["k8s"]),
    entry("AWS", "aws", &[]),
    entry("Azure", "azure", &[]),
    entry("GCP", "gcp", &["google cloud"]),
    entry("Figma", "figma", &[]),
    entry("Adobe Creative Suite", "adobe_creative_suite", &[]),
    entry("Tableau", "tableau", &[]),
    entry("Power BI", "power_bi", &["powerbi"]),
    entry("Excel", "excel", &["microsoft excel"]),
    entry("R", "r", &[]),
    entry("MATLAB", "matlab", &[]),
    entry("Pandas", "pandas", &[]),
    entry("PyTorch", "pytorch", &[]),
    entry("TensorFlow", "tensorflow", &[]),
    entry("NumPy", "numpy", &[]),
    entry("Scikit-learn", "scikit_learn", &["sklearn", "scikit learn"]),
    entry("Machine Learning", "machine_learning", &["ml"]),
    entry("NLP", "nlp", &["natural language processing"]),
    entry("Data Analysis", "data_analysis", &[]),
];

pub const TRAITS: &[VocabularyEntry] = &[
    entry("Analytical Thinker", "analytical_thinker", &[]),
    entry("Communicator", "communicator", &[]),
    entry("Problem Solver", "problem_solver", &[]),
    entry("Logical Thinker", "logical_thinker", &[]),
    entry("Persuasive", "persuasive", &[]),
    entry("Creative Thinker", "creative_thinker", &[]),
    entry("Leader", "leader", &[]),
    entry("Empathetic", "empathetic", &[]),
    entry("Curious", "curious", &[]),
    entry("Detail-Oriented", "detail_oriented", &["detail oriented"]),
    entry("Organizer", "organizer", &[]),
];

impl VocabularyEntry {
    /// Exact, case-insensitive match against the display name, slug or an alias.
    pub fn matches(&self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        keyword.eq_ignore_ascii_case(self.display)
            || keyword.eq_ignore_ascii_case(self.slug)
            || self.aliases.iter().any(|a| keyword.eq_ignore_ascii_case(a))
    }
}

pub fn lookup_tool(keyword: &str) -> Option<&'static VocabularyEntry> {
    TOOLS.iter().find(|t| t.matches(keyword))
}

pub fn lookup_trait(keyword: &str) -> Option<&'static VocabularyEntry> {
    TRAITS.iter().find(|t| t.matches(keyword))
}

pub fn tool_feature(tool: &VocabularyEntry) -> String {
    format!("tool.{}", tool.slug)
}

pub fn trait_feature(t: &VocabularyEntry) -> String {
    format!("trait.{}", t.slug)
}

/// Maps a work-style value (`team`, `solo`, `hybrid`, any case) to its feature name.
pub fn work_style_feature(style: &str) -> Option<String> {
    let style = style.trim();
    WORK_STYLES
        .iter()
        .find(|(value, _)| style.eq_ignore_ascii_case(value))
        .map(|(value, _)| format!("work_style.{value}"))
}

// ────────────────────────────────────────────────────────────────────────────
// Descriptors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Slider,
    WorkStyle,
    Tool,
    Trait,
}

/// Static metadata for one declared feature.
#[derive(Debug, Clone)]
pub struct FeatureDescriptor {
    pub name: String,
    /// Human label used by the explanation formatter.
    pub label: String,
    /// Display name for tools and traits (e.g. "Node.js"); `None` otherwise.
    pub display: Option<&'static str>,
    pub kind: FeatureKind,
}

/// All declared features in schema order.
pub fn descriptors() -> &'static [FeatureDescriptor] {
    static DESCRIPTORS: OnceLock<Vec<FeatureDescriptor>> = OnceLock::new();
    DESCRIPTORS.get_or_init(|| {
        let mut out = Vec::with_capacity(
            SLIDER_FEATURES.len() + WORK_STYLES.len() + TOOLS.len() + TRAITS.len(),
        );
        for (name, label) in SLIDER_FEATURES {
            out.push(FeatureDescriptor {
                name: name.to_string(),
                label: label.to_string(),
                display: None,
                kind: FeatureKind::Slider,
            });
        }
        for (value, label) in WORK_STYLES {
            out.push(FeatureDescriptor {
                name: format!("work_style.{value}"),
                label: label.to_string(),
                display: None,
                kind: FeatureKind::WorkStyle,
            });
        }
        for tool in TOOLS {
            out.push(FeatureDescriptor {
                name: tool_feature(tool),
                label: tool.display.to_string(),
                display: Some(tool.display),
                kind: FeatureKind::Tool,
            });
        }
        for t in TRAITS {
            out.push(FeatureDescriptor {
                name: trait_feature(t),
                label: format!("the {} trait", t.display),
                display: Some(t.display),
                kind: FeatureKind::Trait,
            });
        }
        out
    })
}

/// Position of each declared feature in `descriptors()`.
fn schema_index() -> &'static HashMap<&'static str, usize> {
    static INDEX: OnceLock<HashMap<&'static str, usize>> = OnceLock::new();
    INDEX.get_or_init(|| {
        descriptors()
            .iter()
            .enumerate()
            .map(|(i, d)| (d.name.as_str(), i))
            .collect()
    })
}

pub fn descriptor(name: &str) -> Option<&'static FeatureDescriptor> {
    schema_index().get(name).map(|&i| &descriptors()[i])
}

pub fn is_declared(name: &str) -> bool {
    descriptor(name).is_some()
}

// ────────────────────────────────────────────────────────────────────────────
// FeatureVector
// ────────────────────────────────────────────────────────────────────────────

/// Normalized user profile: one value in [0, 1] per declared feature, kept in
/// schema order (sliders, work styles, tools, traits).
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// A vector with every declared feature present and set to zero.
    pub fn zeroed() -> Self {
        Self {
            values: vec![0.0; descriptors().len()],
        }
    }

    /// Builds a vector from explicit values; unspecified features stay at zero.
    pub fn from_values<I, K>(values: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut vector = Self::zeroed();
        for (name, value) in values {
            vector.set(name.as_ref(), value)?;
        }
        Ok(vector)
    }

    pub fn set(&mut self, name: &str, value: f64) -> Result<(), AppError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(AppError::Validation(format!(
                "feature '{name}' must be within [0, 1], got {value}"
            )));
        }
        let index = schema_index()
            .get(name)
            .ok_or_else(|| AppError::Validation(format!("unknown feature '{name}'")))?;
        self.values[*index] = value;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        schema_index().get(name).map(|&i| self.values[i])
    }

    /// Iterates features in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        descriptors()
            .iter()
            .zip(&self.values)
            .map(|(d, v)| (d.name.as_str(), *v))
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }
}

/// Serialized as a JSON object in schema order.
impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_vector_declares_every_feature() {
        let fv = FeatureVector::zeroed();
        assert_eq!(fv.iter().count(), descriptors().len());
        assert!(fv.is_zero());
        assert_eq!(fv.get(SKILL_COMMUNICATION), Some(0.0));
        assert_eq!(fv.get("tool.python"), Some(0.0));
        assert_eq!(fv.get("work_style.hybrid"), Some(0.0));
    }

    #[test]
    fn test_unknown_feature_rejected() {
        let err = FeatureVector::from_values([("interest.music", 1.0)]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_out_of_range_value_rejected() {
        assert!(FeatureVector::from_values([(CREATIVITY, 1.5)]).is_err());
        assert!(FeatureVector::from_values([(CREATIVITY, -0.1)]).is_err());
        assert!(FeatureVector::from_values([(CREATIVITY, f64::NAN)]).is_err());
    }

    #[test]
    fn test_iteration_follows_schema_order() {
        let names: Vec<&str> = FeatureVector::zeroed().iter().map(|(n, _)| n).collect();
        let declared: Vec<&str> = descriptors().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, declared);
        assert_eq!(names[0], INTEREST_TECH);
        assert_eq!(names[SLIDER_FEATURES.len()], "work_style.team");
    }

    #[test]
    fn test_serializes_in_schema_order() {
        let fv = FeatureVector::from_values([(CREATIVITY, 0.5)]).unwrap();
        let json = serde_json::to_string(&fv).unwrap();
        assert!(json.starts_with(r#"{"interest.tech":0.0,"#));
        assert!(json.contains(r#""creativity":0.5"#));
    }

    #[test]
    fn test_descriptor_names_are_unique() {
        let mut names: Vec<&str> = descriptors().iter().map(|d| d.name.as_str()).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_uses_aliases() {
        assert_eq!(lookup_tool("python").map(|t| t.slug), Some("python"));
        assert_eq!(lookup_tool("  NODE ").map(|t| t.slug), Some("nodejs"));
        assert_eq!(lookup_tool("GitHub").map(|t| t.slug), Some("git"));
        assert_eq!(lookup_trait("detail-oriented").map(|t| t.slug), Some("detail_oriented"));
        assert_eq!(lookup_tool("express").map(|t| t.slug), Some("nodejs"));
        assert_eq!(lookup_tool("scikit-learn").map(|t| t.slug), Some("scikit_learn"));
        assert!(lookup_tool("cobol").is_none());
    }

    #[test]
    fn test_work_style_feature() {
        assert_eq!(work_style_feature("Team").as_deref(), Some("work_style.team"));
        assert_eq!(work_style_feature("remote"), None);
    }

    #[test]
    fn test_tool_and_trait_feature_names() {
        let node = lookup_tool("Node.js").unwrap();
        assert_eq!(tool_feature(node), "tool.nodejs");
        let leader = lookup_trait("Leader").unwrap();
        assert_eq!(trait_feature(leader), "trait.leader");
        assert!(is_declared("trait.leader"));
    }
}
