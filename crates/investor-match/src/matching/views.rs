use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{CandidateId, CandidateKind};
use super::scoring::ScoreBreakdown;

/// Serialized shape of one ranked candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntryView {
    pub rank: usize,
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    pub kind: CandidateKind,
    pub total: f64,
    pub sub_scores: BTreeMap<String, f64>,
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
}

impl RankingEntryView {
    pub fn from_breakdown(rank: usize, breakdown: &ScoreBreakdown) -> Self {
        let sub_scores = breakdown
            .sub_scores
            .iter()
            .map(|score| (score.kind.label().to_string(), score.points))
            .collect();

        Self {
            rank,
            candidate_id: breakdown.candidate_id.clone(),
            candidate_name: breakdown.candidate_name.clone(),
            kind: breakdown.kind,
            total: breakdown.total,
            sub_scores,
            reasons: breakdown.reasons.clone(),
            warnings: breakdown.warnings.clone(),
        }
    }
}

/// Ranking response returned by the matchmaking service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingReport {
    pub kind: CandidateKind,
    pub scheme_version: String,
    pub generated_at: DateTime<Utc>,
    /// Number of candidates scored before truncation.
    pub evaluated: usize,
    pub entries: Vec<RankingEntryView>,
}
