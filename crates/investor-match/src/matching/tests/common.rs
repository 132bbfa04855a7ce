use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::matching::domain::{
    Candidate, CandidateId, CandidateKind, Location, QueryProfile, Rating, Urgency,
};
use crate::matching::repository::{CandidateRepository, RepositoryError};
use crate::matching::{matching_router, MatchmakingService};

pub(super) fn pharma_zone() -> Candidate {
    Candidate {
        id: CandidateId("zone-genome-valley".to_string()),
        name: "Genome Valley".to_string(),
        kind: CandidateKind::Zone,
        sectors: vec!["Pharmaceuticals".to_string(), "Biotechnology".to_string()],
        specialties: vec!["API manufacturing".to_string()],
        location: Location::new("Telangana", Some("South")),
        available_capacity: 24,
        years_active: 25,
        clients_served: 200,
        domain_clients: 40,
        badges: vec![
            "Single Window".to_string(),
            "Green Channel".to_string(),
            "ISO 14001".to_string(),
        ],
        languages: vec!["English".to_string(), "Telugu".to_string()],
        rating: Rating {
            average: 4.6,
            reviews: 38,
        },
    }
}

pub(super) fn textile_zone() -> Candidate {
    Candidate {
        id: CandidateId("zone-pm-mitra".to_string()),
        name: "PM MITRA Park".to_string(),
        kind: CandidateKind::Zone,
        sectors: vec!["Textiles".to_string()],
        specialties: vec!["Technical textiles".to_string()],
        location: Location::new("Maharashtra", Some("West")),
        available_capacity: 3,
        years_active: 2,
        clients_served: 12,
        domain_clients: 1,
        badges: Vec::new(),
        languages: vec!["Marathi".to_string()],
        rating: Rating {
            average: 3.1,
            reviews: 4,
        },
    }
}

pub(super) fn legal_partner() -> Candidate {
    Candidate {
        id: CandidateId("partner-lex".to_string()),
        name: "Lex Advisory".to_string(),
        kind: CandidateKind::Partner,
        sectors: vec!["Pharmaceuticals - Generics".to_string()],
        specialties: vec!["Regulatory approvals".to_string()],
        location: Location::new("Karnataka", Some("South")),
        available_capacity: 6,
        years_active: 8,
        clients_served: 65,
        domain_clients: 12,
        badges: vec!["Bar Council".to_string()],
        languages: vec!["English".to_string(), "Japanese".to_string()],
        rating: Rating {
            average: 4.2,
            reviews: 17,
        },
    }
}

/// Partner that matches nothing in [`constrained_query`] and has a zero rating on record.
pub(super) fn empty_partner() -> Candidate {
    Candidate {
        id: CandidateId("partner-none".to_string()),
        name: "Nobody Consulting".to_string(),
        kind: CandidateKind::Partner,
        sectors: vec!["Fisheries".to_string()],
        specialties: vec!["Boat repair".to_string()],
        location: Location::new("Goa", Some("West")),
        available_capacity: 0,
        years_active: 0,
        clients_served: 0,
        domain_clients: 0,
        badges: Vec::new(),
        languages: vec!["Konkani".to_string()],
        rating: Rating {
            average: 0.0,
            reviews: 2,
        },
    }
}

pub(super) fn pharma_query() -> QueryProfile {
    QueryProfile::new("Pharmaceuticals", 120.0)
}

/// Query constraining every dimension.
pub(super) fn constrained_query() -> QueryProfile {
    QueryProfile::new("Pharmaceuticals", 120.0)
        .with_location(Location::new("Telangana", Some("South")))
        .with_languages(["English", "Japanese"])
        .with_specialty("API manufacturing")
        .with_urgency(Urgency::Standard)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<Vec<Candidate>>>,
}

impl MemoryRepository {
    pub(super) fn seeded(candidates: Vec<Candidate>) -> Self {
        Self {
            records: Arc::new(Mutex::new(candidates)),
        }
    }
}

impl CandidateRepository for MemoryRepository {
    fn insert(&self, candidate: Candidate) -> Result<Candidate, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == candidate.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(candidate.clone());
        Ok(candidate)
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|candidate| &candidate.id == id).cloned())
    }

    fn list(&self, kind: CandidateKind) -> Result<Vec<Candidate>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|candidate| candidate.kind == kind)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl CandidateRepository for UnavailableRepository {
    fn insert(&self, _candidate: Candidate) -> Result<Candidate, RepositoryError> {
        Err(RepositoryError::Unavailable("registry offline".to_string()))
    }

    fn fetch(&self, _id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        Err(RepositoryError::Unavailable("registry offline".to_string()))
    }

    fn list(&self, _kind: CandidateKind) -> Result<Vec<Candidate>, RepositoryError> {
        Err(RepositoryError::Unavailable("registry offline".to_string()))
    }
}

pub(super) fn build_service() -> (MatchmakingService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::seeded(vec![
        textile_zone(),
        pharma_zone(),
        legal_partner(),
        empty_partner(),
    ]));
    let service = MatchmakingService::new(repository.clone());
    (service, repository)
}

pub(super) fn router_with_service(service: MatchmakingService<MemoryRepository>) -> axum::Router {
    matching_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn ids_in_order(entries: &[crate::matching::ScoreBreakdown]) -> Vec<&str> {
    entries
        .iter()
        .map(|entry| entry.candidate_id.0.as_str())
        .collect()
}

