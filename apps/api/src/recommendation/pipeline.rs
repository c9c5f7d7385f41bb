//! Recommendation pipeline: normalize → score → rank → explain.
//!
//! Pure with respect to shared state: reads an immutable registry snapshot and
//! returns fresh results, so requests run concurrently without locking.

use tracing::debug;

use crate::errors::AppError;
use crate::models::profile::ProfileInput;
use crate::models::recommendation::Recommendation;
use crate::recommendation::explanation::format_explanation;
use crate::recommendation::features::FeatureVector;
use crate::recommendation::normalizer::normalize;
use crate::recommendation::ranker::rank;
use crate::recommendation::registry::CareerRegistry;
use crate::recommendation::scoring::{ScoredCareer, ScoringEngine};

/// Scores every career in registry order.
pub async fn score_all(
    engine: &dyn ScoringEngine,
    registry: &CareerRegistry,
    features: &FeatureVector,
) -> Result<Vec<ScoredCareer>, AppError> {
    let mut scored = Vec::with_capacity(registry.len());
    for model in registry.list() {
        let score = engine.score(features, model).await?;
        debug!(
            career = %model.title,
            raw_score = score.raw_score,
            probability = score.probability,
            "Career scored"
        );
        scored.push(ScoredCareer::new(model, score));
    }
    Ok(scored)
}

/// Fills in the explanation and supporting skills of a scored career.
fn explain(
    registry: &CareerRegistry,
    features: &FeatureVector,
    mut career: ScoredCareer,
    top_n: usize,
) -> Result<(ScoredCareer, Vec<String>), AppError> {
    let model = registry.get(&career.title)?;
    let explanation = format_explanation(&career, features, &model.description, top_n);
    career.explanation = explanation.text;
    career.supporting_skills = explanation.supporting_skills;
    Ok((career, explanation.top_features))
}

/// Top-`k` recommendations for a profile.
pub async fn recommend(
    engine: &dyn ScoringEngine,
    registry: &CareerRegistry,
    input: &ProfileInput,
    k: usize,
    top_n: usize,
) -> Result<Vec<Recommendation>, AppError> {
    let features = normalize(input)?;
    if features.is_zero() {
        debug!("Profile has no active features; scores reflect career bias only");
    } else {
        debug!(
            active = features.iter().filter(|(_, v)| *v > 0.0).count(),
            "Profile normalized"
        );
    }
    let scored = score_all(engine, registry, &features).await?;
    let ranked = rank(scored, k)?;

    ranked
        .into_iter()
        .map(|career| -> Result<Recommendation, AppError> {
            let (career, top_features) = explain(registry, &features, career, top_n)?;
            Ok(Recommendation {
                title: career.title,
                probability: career.probability,
                explanation: career.explanation,
                top_features,
                supporting_skills: Some(career.supporting_skills).filter(|s| !s.is_empty()),
            })
        })
        .collect()
}

/// Full breakdown for a single, explicitly requested career.
pub async fn score_career(
    engine: &dyn ScoringEngine,
    registry: &CareerRegistry,
    title: &str,
    input: &ProfileInput,
    top_n: usize,
) -> Result<ScoredCareer, AppError> {
    let model = registry.get(title)?;
    let features = normalize(input)?;
    let score = engine.score(&features, model).await?;
    let (career, _) = explain(registry, &features, ScoredCareer::new(model, score), top_n)?;
    Ok(career)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{Interests, ManualProfile, ResumeProfile, SkillLevels};
    use crate::recommendation::explanation::DEFAULT_TOP_N;
    use crate::recommendation::scoring::LogisticScoringEngine;

    fn manual_profile() -> ProfileInput {
        ProfileInput::Manual(ManualProfile {
            interests: Interests {
                tech: 3,
                design: 1,
                business: 5,
            },
            skill_levels: SkillLevels {
                programming: 2,
                analytical: 3,
                communication: 4,
            },
            problem_solving: 3,
            creativity: 2,
            work_style: Some("team".to_string()),
            soft_skills: vec!["Leader".to_string()],
            selected_tools: vec!["Excel".to_string(), "SQL".to_string()],
        })
    }

    #[tokio::test]
    async fn test_recommend_returns_k_results_in_rank_order() {
        let registry = CareerRegistry::bundled().unwrap();
        let recs = recommend(
            &LogisticScoringEngine,
            &registry,
            &manual_profile(),
            3,
            DEFAULT_TOP_N,
        )
        .await
        .unwrap();

        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].title, "Product Manager");
        for pair in recs.windows(2) {
            assert!(pair[0].probability >= pair[1].probability);
        }
        for rec in &recs {
            assert!((1.0..=99.0).contains(&rec.probability));
            assert!(!rec.explanation.is_empty());
        }
        assert!(recs[0].explanation.contains("business interest (5/5)"));
    }

    #[tokio::test]
    async fn test_recommend_is_deterministic() {
        let registry = CareerRegistry::bundled().unwrap();
        let first = recommend(&LogisticScoringEngine, &registry, &manual_profile(), 5, 2)
            .await
            .unwrap();
        let second = recommend(&LogisticScoringEngine, &registry, &manual_profile(), 5, 2)
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_resume_profile_surfaces_supporting_skills() {
        let registry = CareerRegistry::bundled().unwrap();
        let input = ProfileInput::Resume(ResumeProfile {
            skills: vec![
                "docker".to_string(),
                "kubernetes".to_string(),
                "aws".to_string(),
                "communication skills".to_string(),
            ],
        });
        let recs = recommend(&LogisticScoringEngine, &registry, &input, 3, 2)
            .await
            .unwrap();

        assert_eq!(recs[0].title, "DevOps / Cloud Engineer");
        assert_eq!(
            recs[0].supporting_skills.as_deref(),
            Some(&["Kubernetes".to_string(), "Docker".to_string()][..])
        );
    }

    #[tokio::test]
    async fn test_validation_error_yields_no_partial_result() {
        let registry = CareerRegistry::bundled().unwrap();
        let ProfileInput::Manual(mut profile) = manual_profile() else {
            unreachable!()
        };
        profile.selected_tools = vec!["Python", "SQL", "Excel", "Git"]
            .into_iter()
            .map(String::from)
            .collect();

        let err = recommend(
            &LogisticScoringEngine,
            &registry,
            &ProfileInput::Manual(profile),
            3,
            2,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_k_zero_rejected() {
        let registry = CareerRegistry::bundled().unwrap();
        let err = recommend(&LogisticScoringEngine, &registry, &manual_profile(), 0, 2)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_score_career_breakdown_and_not_found() {
        let registry = CareerRegistry::bundled().unwrap();
        let career = score_career(
            &LogisticScoringEngine,
            &registry,
            "Product Manager",
            &manual_profile(),
            2,
        )
        .await
        .unwrap();

        let rebuilt: f64 = career.bias + career.contributions.iter().map(|c| c.value).sum::<f64>();
        assert!((rebuilt - career.raw_score).abs() < 1e-9);
        assert!(career.contributions.iter().all(|c| c.value != 0.0));
        assert!(career.explanation.contains("business interest (5/5)"));

        let err = score_career(&LogisticScoringEngine, &registry, "Astronaut", &manual_profile(), 2)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    mod properties {
        use super::*;
        use crate::recommendation::features::{TOOLS, TRAITS};
        use proptest::prelude::*;

        fn arb_manual_profile() -> impl Strategy<Value = ProfileInput> {
            let tools: Vec<&'static str> = TOOLS.iter().map(|t| t.display).collect();
            let traits: Vec<&'static str> = TRAITS.iter().map(|t| t.display).collect();
            (
                prop::array::uniform8(1i64..=5),
                prop::sample::subsequence(tools, 0..=3),
                prop::sample::subsequence(traits, 0..=2),
                prop::option::of(prop::sample::select(vec!["team", "solo", "hybrid"])),
            )
                .prop_map(|(s, tools, traits, work_style)| {
                    ProfileInput::Manual(ManualProfile {
                        interests: Interests {
                            tech: s[0],
                            design: s[1],
                            business: s[2],
                        },
                        skill_levels: SkillLevels {
                            programming: s[3],
                            analytical: s[4],
                            communication: s[5],
                        },
                        problem_solving: s[6],
                        creativity: s[7],
                        work_style: work_style.map(String::from),
                        soft_skills: traits.into_iter().map(String::from).collect(),
                        selected_tools: tools.into_iter().map(String::from).collect(),
                    })
                })
        }

        fn run(input: &ProfileInput, k: usize) -> Vec<Recommendation> {
            let registry = CareerRegistry::bundled().unwrap();
            tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap()
                .block_on(recommend(&LogisticScoringEngine, &registry, input, k, DEFAULT_TOP_N))
                .unwrap()
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn valid_manual_profiles_rank_deterministically(
                input in arb_manual_profile(),
                k in 1usize..=12,
            ) {
                let first = run(&input, k);
                let second = run(&input, k);
                prop_assert_eq!(
                    serde_json::to_string(&first).unwrap(),
                    serde_json::to_string(&second).unwrap()
                );
                prop_assert_eq!(first.len(), k);
                for rec in &first {
                    prop_assert!((1.0..=99.0).contains(&rec.probability));
                }
            }

            #[test]
            fn every_registry_career_holds_sum_invariant(input in arb_manual_profile()) {
                let registry = CareerRegistry::bundled().unwrap();
                let features = normalize(&input).unwrap();
                for model in registry.list() {
                    let score = crate::recommendation::scoring::compute_score(&features, model);
                    let sum: f64 = score.contributions.iter().map(|c| c.value).sum();
                    prop_assert!((model.bias + sum - score.raw_score).abs() < 1e-9);
                    prop_assert!((1.0..=99.0).contains(&score.probability));
                }
            }
        }
    }

    #[tokio::test]
    async fn test_ml_resume_ranks_machine_learning_engineer_first() {
        let registry = CareerRegistry::bundled().unwrap();
        let input = ProfileInput::Resume(ResumeProfile {
            skills: ["machine learning", "numpy", "scikit-learn", "nlp", "data analysis"]
                .into_iter()
                .map(String::from)
                .collect(),
        });
        let recs = recommend(&LogisticScoringEngine, &registry, &input, 3, 2)
            .await
            .unwrap();
        assert_eq!(recs[0].title, "Machine Learning Engineer");
        assert_eq!(
            recs[0].supporting_skills.as_deref(),
            Some(&["Machine Learning".to_string(), "NLP".to_string()][..])
        );
    }
}
