mod narrative;
mod rules;

use serde::{Deserialize, Serialize};

use super::domain::{Candidate, CandidateId, CandidateKind, QueryProfile};
use super::scheme::{round_points, SubScoreKind, TOTAL_MAX};

/// How a sub-score was reached, independent of its point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubScoreStatus {
    Full,
    Partial,
    /// The query expressed no preference; a documented default applies.
    Neutral,
    Miss,
}

/// One bounded dimension of match quality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub kind: SubScoreKind,
    pub points: f64,
    pub max: f64,
    pub status: SubScoreStatus,
    pub detail: String,
}

/// Per-candidate scoring result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    pub kind: CandidateKind,
    pub sub_scores: Vec<SubScore>,
    pub total: f64,
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
}

impl ScoreBreakdown {
    pub fn sub_score(&self, kind: SubScoreKind) -> Option<&SubScore> {
        self.sub_scores.iter().find(|score| score.kind == kind)
    }

    pub fn points(&self, kind: SubScoreKind) -> f64 {
        self.sub_score(kind).map(|score| score.points).unwrap_or(0.0)
    }
}

/// Stateless scorer applying the fixed scheme to a candidate/query pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    /// Score one candidate. The query is assumed valid; [`super::rank`] checks it.
    pub fn score(&self, candidate: &Candidate, query: &QueryProfile) -> ScoreBreakdown {
        let sub_scores: Vec<SubScore> = rules::RULES
            .iter()
            .map(|(_, rule)| rule(candidate, query))
            .collect();

        let sum: f64 = sub_scores.iter().map(|score| score.points).sum();
        let total = round_points(sum.clamp(0.0, TOTAL_MAX));

        let reasons = narrative::reasons(&sub_scores);
        let warnings = narrative::warnings(&sub_scores);

        ScoreBreakdown {
            candidate_id: candidate.id.clone(),
            candidate_name: candidate.name.clone(),
            kind: candidate.kind,
            sub_scores,
            total,
            reasons,
            warnings,
        }
    }
}
