//! Scoring Engine — pluggable, trait-based scorer that turns a feature vector
//! and a career model into a match probability plus its contribution breakdown.
//!
//! Default: `LogisticScoringEngine` (linear logit, logistic squash).
//!
//! Contributions are additive terms of the logit, not probability points:
//! `bias + Σ contributions == raw_score`, and the probability is derived from
//! `raw_score` afterwards.

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::AppError;
use crate::recommendation::features::FeatureVector;
use crate::recommendation::registry::CareerModel;

pub const MIN_PROBABILITY: f64 = 1.0;
pub const MAX_PROBABILITY: f64 = 99.0;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// One feature's additive share of the raw score (logit units).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub feature: String,
    pub value: f64,
}

/// Raw scoring result for one career.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub raw_score: f64,
    /// Percentage in [MIN_PROBABILITY, MAX_PROBABILITY].
    pub probability: f64,
    /// Non-zero contributions, largest absolute value first.
    pub contributions: Vec<Contribution>,
}

/// A scored career for one request. The explanation is filled in by the
/// formatter once the career survives ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCareer {
    pub title: String,
    pub bias: f64,
    pub raw_score: f64,
    pub probability: f64,
    pub contributions: Vec<Contribution>,
    pub explanation: String,
    pub supporting_skills: Vec<String>,
}

impl ScoredCareer {
    pub fn new(model: &CareerModel, score: Score) -> Self {
        Self {
            title: model.title.clone(),
            bias: model.bias,
            raw_score: score.raw_score,
            probability: score.probability,
            contributions: score.contributions,
            explanation: String::new(),
            supporting_skills: Vec::new(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The scoring engine trait. Implement this to swap models without touching
/// the handlers or the recommendation pipeline.
///
/// Carried in `AppState` as `Arc<dyn ScoringEngine>`.
#[async_trait]
pub trait ScoringEngine: Send + Sync {
    /// Short label reported alongside results, e.g. "logistic".
    fn backend(&self) -> &'static str;

    async fn score(&self, features: &FeatureVector, model: &CareerModel)
        -> Result<Score, AppError>;
}

/// Linear logit over the feature vector, squashed to a clamped percentage.
/// Pure and deterministic.
pub struct LogisticScoringEngine;

#[async_trait]
impl ScoringEngine for LogisticScoringEngine {
    fn backend(&self) -> &'static str {
        "logistic"
    }

    async fn score(
        &self,
        features: &FeatureVector,
        model: &CareerModel,
    ) -> Result<Score, AppError> {
        Ok(compute_score(features, model))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core scoring algorithm
// ────────────────────────────────────────────────────────────────────────────

/// raw = bias + Σ weight[f] × x[f]; probability = 100 / (1 + e^-raw), clamped.
pub fn compute_score(features: &FeatureVector, model: &CareerModel) -> Score {
    let mut raw_score = model.bias;
    let mut contributions = Vec::new();

    for (feature, weight) in &model.weights {
        let term = weight * features.get(feature).unwrap_or(0.0);
        raw_score += term;
        if term != 0.0 {
            contributions.push(Contribution {
                feature: feature.clone(),
                value: term,
            });
        }
    }

    sort_contributions(&mut contributions);

    Score {
        raw_score,
        probability: logistic_percent(raw_score),
        contributions,
    }
}

pub fn logistic_percent(raw_score: f64) -> f64 {
    (100.0 / (1.0 + (-raw_score).exp())).clamp(MIN_PROBABILITY, MAX_PROBABILITY)
}

/// Descending absolute value; equal magnitudes fall back to feature name.
pub fn sort_contributions(contributions: &mut [Contribution]) {
    contributions.sort_by(|a, b| {
        b.value
            .abs()
            .total_cmp(&a.value.abs())
            .then_with(|| a.feature.cmp(&b.feature))
    });
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
