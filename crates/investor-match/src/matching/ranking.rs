use super::domain::{Candidate, QueryProfile, QueryViolation};
use super::scoring::{ScoreBreakdown, ScoringEngine};

/// Errors raised while ranking a candidate set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatchingError {
    #[error("invalid query: {0}")]
    InvalidQuery(#[from] QueryViolation),
}

/// Score every candidate, then order by descending total.
///
/// The query is validated before any candidate is scored. Equal totals keep
/// their input order, and `top_n` truncates only after the full set has been
/// scored and sorted. An empty candidate list yields an empty result.
pub fn rank(
    candidates: &[Candidate],
    query: &QueryProfile,
    top_n: Option<usize>,
) -> Result<Vec<ScoreBreakdown>, MatchingError> {
    ScoringEngine::new().rank(candidates, query, top_n)
}

impl ScoringEngine {
    pub fn rank(
        &self,
        candidates: &[Candidate],
        query: &QueryProfile,
        top_n: Option<usize>,
    ) -> Result<Vec<ScoreBreakdown>, MatchingError> {
        query.validate()?;

        let mut ranked: Vec<ScoreBreakdown> = candidates
            .iter()
            .map(|candidate| self.score(candidate, query))
            .collect();

        // `sort_by` is stable, which is what keeps ties in input order.
        ranked.sort_by(|a, b| b.total.total_cmp(&a.total));

        if let Some(limit) = top_n {
            ranked.truncate(limit);
        }

        Ok(ranked)
    }
}
