//! Ranker — top-K selection over scored careers.

use std::cmp::Ordering;

use crate::errors::AppError;
use crate::recommendation::scoring::ScoredCareer;

/// Descending probability, then ascending title.
pub fn rank(mut scored: Vec<ScoredCareer>, k: usize) -> Result<Vec<ScoredCareer>, AppError> {
    if k == 0 {
        return Err(AppError::InvalidArgument(
            "k must be greater than zero".to_string(),
        ));
    }
    scored.sort_by(compare_ranked);
    scored.truncate(k);
    Ok(scored)
}

fn compare_ranked(a: &ScoredCareer, b: &ScoredCareer) -> Ordering {
    b.probability
        .total_cmp(&a.probability)
        .then_with(|| a.title.cmp(&b.title))
}

/// Resolves the caller-supplied `top_k`, falling back to `default` when absent.
pub fn resolve_top_k(requested: Option<i64>, default: usize) -> Result<usize, AppError> {
    match requested {
        None => Ok(default),
        Some(k) if k <= 0 => Err(AppError::InvalidArgument(format!(
            "top_k must be greater than zero, got {k}"
        ))),
        Some(k) => usize::try_from(k)
            .map_err(|_| AppError::InvalidArgument(format!("top_k {k} is out of range"))),
    }
}
