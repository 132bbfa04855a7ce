use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::{Candidate, CandidateError, CandidateId, CandidateKind, QueryProfile};
use super::ranking::MatchingError;
use super::repository::{CandidateRepository, RepositoryError};
use super::scheme::SCORING_SCHEME_VERSION;
use super::scoring::{ScoreBreakdown, ScoringEngine};
use super::views::{RankingEntryView, RankingReport};

pub const DEFAULT_TOP_N: usize = 5;

/// Service composing the candidate registry with the scoring engine.
pub struct MatchmakingService<R> {
    repository: Arc<R>,
    engine: ScoringEngine,
    default_top_n: usize,
}

impl<R> MatchmakingService<R>
where
    R: CandidateRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_default_top_n(repository, DEFAULT_TOP_N)
    }

    pub fn with_default_top_n(repository: Arc<R>, default_top_n: usize) -> Self {
        Self {
            repository,
            engine: ScoringEngine::new(),
            default_top_n: default_top_n.max(1),
        }
    }

    pub fn default_top_n(&self) -> usize {
        self.default_top_n
    }

    /// Validate and store a candidate in the registry.
    pub fn register(&self, candidate: Candidate) -> Result<Candidate, MatchingServiceError> {
        candidate.validate()?;
        let stored = self.repository.insert(candidate)?;
        debug!(candidate = %stored.id, kind = stored.kind.label(), "candidate registered");
        Ok(stored)
    }

    /// Rank every registered candidate of `kind` against the query.
    pub fn recommend(
        &self,
        kind: CandidateKind,
        query: &QueryProfile,
        top_n: Option<usize>,
    ) -> Result<RankingReport, MatchingServiceError> {
        let candidates = self.repository.list(kind)?;
        let limit = top_n.unwrap_or(self.default_top_n);

        let ranked = match self.engine.rank(&candidates, query, Some(limit)) {
            Ok(ranked) => ranked,
            Err(err) => {
                warn!(kind = kind.label(), %err, "ranking request rejected");
                return Err(err.into());
            }
        };

        for breakdown in &ranked {
            debug!(
                candidate = %breakdown.candidate_id,
                total = breakdown.total,
                "candidate scored"
            );
        }

        info!(
            kind = kind.label(),
            evaluated = candidates.len(),
            returned = ranked.len(),
            "ranking completed"
        );

        Ok(RankingReport {
            kind,
            scheme_version: SCORING_SCHEME_VERSION.to_string(),
            generated_at: Utc::now(),
            evaluated: candidates.len(),
            entries: ranked
                .iter()
                .enumerate()
                .map(|(index, breakdown)| RankingEntryView::from_breakdown(index + 1, breakdown))
                .collect(),
        })
    }

    /// Score a single registered candidate, e.g. to explain why it ranked low.
    pub fn explain(
        &self,
        candidate_id: &CandidateId,
        query: &QueryProfile,
    ) -> Result<ScoreBreakdown, MatchingServiceError> {
        query.validate().map_err(MatchingError::from)?;
        let candidate = self.get(candidate_id)?;
        Ok(self.engine.score(&candidate, query))
    }

    pub fn get(&self, candidate_id: &CandidateId) -> Result<Candidate, MatchingServiceError> {
        let candidate = self
            .repository
            .fetch(candidate_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(candidate)
    }
}

/// Error raised by the matchmaking service.
#[derive(Debug, thiserror::Error)]
pub enum MatchingServiceError {
    #[error(transparent)]
    Matching(#[from] MatchingError),
    #[error(transparent)]
    Candidate(#[from] CandidateError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
