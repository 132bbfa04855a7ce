use super::domain::{Candidate, CandidateId, CandidateKind};

/// Caller-owned candidate store; the scoring engine only ever reads from it.
pub trait CandidateRepository: Send + Sync {
    fn insert(&self, candidate: Candidate) -> Result<Candidate, RepositoryError>;
    fn fetch(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError>;
    /// Candidates of one kind, in registration order.
    fn list(&self, kind: CandidateKind) -> Result<Vec<Candidate>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("candidate already registered")]
    Conflict,
    #[error("candidate not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
