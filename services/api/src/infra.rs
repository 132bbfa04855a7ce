use chrono::NaiveDate;
use investor_match::matching::{
    Candidate, CandidateId, CandidateKind, CandidateRepository, RepositoryError, Urgency,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Registration-ordered candidate store backing the service and CLI.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCandidateRepository {
    records: Arc<Mutex<Vec<Candidate>>>,
}

impl InMemoryCandidateRepository {
    fn guard(&self) -> Result<MutexGuard<'_, Vec<Candidate>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl CandidateRepository for InMemoryCandidateRepository {
    fn insert(&self, candidate: Candidate) -> Result<Candidate, RepositoryError> {
        let mut guard = self.guard()?;
        if guard.iter().any(|existing| existing.id == candidate.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(candidate.clone());
        Ok(candidate)
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        let guard = self.guard()?;
        Ok(guard.iter().find(|candidate| &candidate.id == id).cloned())
    }

    fn list(&self, kind: CandidateKind) -> Result<Vec<Candidate>, RepositoryError> {
        let guard = self.guard()?;
        Ok(guard
            .iter()
            .filter(|candidate| candidate.kind == kind)
            .cloned()
            .collect())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_kind(raw: &str) -> Result<CandidateKind, String> {
    CandidateKind::parse(raw).ok_or_else(|| format!("'{raw}' is neither zone nor partner"))
}

pub(crate) fn parse_urgency(raw: &str) -> Result<Urgency, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "flexible" => Ok(Urgency::Flexible),
        "standard" => Ok(Urgency::Standard),
        "urgent" => Ok(Urgency::Urgent),
        other => Err(format!(
            "unknown urgency '{other}' (expected flexible, standard or urgent)"
        )),
    }
}
