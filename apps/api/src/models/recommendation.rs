use serde::{Deserialize, Serialize};

/// External-facing recommendation returned to the UI/API layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub title: String,
    /// Match probability in [1, 99].
    pub probability: f64,
    pub explanation: String,
    /// Feature names behind the explanation, strongest first.
    pub top_features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supporting_skills: Option<Vec<String>>,
}
