//! CSV import of zone and partner registries.

mod normalizer;
mod parser;

use crate::matching::domain::{
    Candidate, CandidateError, CandidateId, CandidateKind, Location, Rating,
};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::warn;

use parser::RegistryRecord;

#[derive(Debug)]
pub enum RegistryImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownKind { line: u64, value: String },
    InvalidEstablished { line: u64, value: String },
    Candidate { line: u64, source: CandidateError },
}

impl std::fmt::Display for RegistryImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryImportError::Io(err) => write!(f, "failed to read registry export: {}", err),
            RegistryImportError::Csv(err) => write!(f, "invalid registry CSV data: {}", err),
            RegistryImportError::UnknownKind { line, value } => write!(
                f,
                "line {}: kind '{}' is neither zone nor partner",
                line, value
            ),
            RegistryImportError::InvalidEstablished { line, value } => write!(
                f,
                "line {}: established date '{}' is not a past YYYY-MM-DD or RFC 3339 date",
                line, value
            ),
            RegistryImportError::Candidate { line, source } => {
                write!(f, "line {}: {}", line, source)
            }
        }
    }
}

impl std::error::Error for RegistryImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryImportError::Io(err) => Some(err),
            RegistryImportError::Csv(err) => Some(err),
            RegistryImportError::UnknownKind { .. }
            | RegistryImportError::InvalidEstablished { .. } => None,
            RegistryImportError::Candidate { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for RegistryImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RegistryImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Builds validated candidates from a registry CSV export.
///
/// `as_of` anchors the `Established` column so `years_active` is reproducible.
pub struct RegistryImporter;

impl RegistryImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        as_of: NaiveDate,
    ) -> Result<Vec<Candidate>, RegistryImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, as_of)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        as_of: NaiveDate,
    ) -> Result<Vec<Candidate>, RegistryImportError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut candidates = Vec::new();

        for record in parser::parse_records(reader)? {
            let line = record.line;
            let candidate = candidate_from_record(record, as_of)?;
            if !seen.insert(candidate.id.0.clone()) {
                warn!(candidate = %candidate.id, line, "duplicate registry row skipped");
                continue;
            }

            candidates.push(candidate);
        }

        Ok(candidates)
    }
}

fn candidate_from_record(
    record: RegistryRecord,
    as_of: NaiveDate,
) -> Result<Candidate, RegistryImportError> {
    let line = record.line;
    let kind = CandidateKind::parse(&record.kind).ok_or_else(|| {
        RegistryImportError::UnknownKind {
            line,
            value: record.kind.clone(),
        }
    })?;

    let years_active = match record.established {
        None => 0,
        Some(value) => parser::parse_date(&value)
            .and_then(|established| as_of.years_since(established))
            .ok_or(RegistryImportError::InvalidEstablished { line, value })?,
    };

    let candidate = Candidate {
        id: CandidateId(record.id),
        name: record.name,
        kind,
        sectors: record.sectors,
        specialties: record.specialties,
        location: Location {
            region: record.region,
            macro_region: record.macro_region.filter(|value| !value.is_empty()),
        },
        available_capacity: record.available_capacity,
        years_active,
        clients_served: record.clients_served,
        domain_clients: record.foreign_clients,
        badges: record.badges,
        languages: record.languages,
        rating: Rating {
            average: record.rating,
            reviews: record.reviews,
        },
    };

    candidate
        .validate()
        .map_err(|source| RegistryImportError::Candidate { line, source })?;

    Ok(candidate)
}
