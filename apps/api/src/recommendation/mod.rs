// Career Recommendation Engine
// Implements: feature normalization, career registry, scoring, ranking, explanations.
// Handlers only see the `ScoringEngine` trait — never a concrete model.

pub mod explanation;
pub mod features;
pub mod handlers;
pub mod normalizer;
pub mod pipeline;
pub mod ranker;
pub mod registry;
pub mod scoring;
