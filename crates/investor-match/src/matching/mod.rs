//! Weighted multi-factor matching of investment zones and service partners.
//!
//! A query profile is scored against each candidate across nine independent,
//! bounded sub-scores whose maxima sum to 100. Ranking is stable and pure; the
//! candidate registry is supplied by the caller through [`CandidateRepository`].

pub mod domain;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod scheme;
pub mod scoring;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    Candidate, CandidateError, CandidateId, CandidateKind, Location, QueryProfile,
    QueryViolation, Rating, Urgency,
};
pub use ranking::{rank, MatchingError};
pub use repository::{CandidateRepository, RepositoryError};
pub use router::{matching_router, RankingRequest};
pub use scheme::{SubScoreKind, SCORING_SCHEME_VERSION};
pub use scoring::{ScoreBreakdown, ScoringEngine, SubScore, SubScoreStatus};
pub use service::{MatchingServiceError, MatchmakingService, DEFAULT_TOP_N};
pub use views::{RankingEntryView, RankingReport};
