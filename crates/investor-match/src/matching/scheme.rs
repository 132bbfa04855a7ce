//! Constants of the scoring scheme.
//!
//! Maxima, partial-match fractions, neutral defaults and saturation points all
//! live here. Changing any of them is a scheme revision and must bump
//! [`SCORING_SCHEME_VERSION`].

use serde::{Deserialize, Serialize};

use super::domain::Urgency;

pub const SCORING_SCHEME_VERSION: &str = "2024.1";

/// Upper bound of the composite total; the sum of every sub-score maximum.
pub const TOTAL_MAX: f64 = 100.0;

pub const SECTOR_PARTIAL_FRACTION: f64 = 2.0 / 3.0;

pub const EXPERIENCE_FULL_YEARS: u32 = 10;
pub const EXPERIENCE_FULL_CLIENTS: u32 = 100;

pub const LOCATION_MACRO_REGION_FRACTION: f64 = 0.5;
pub const LOCATION_NEUTRAL_FRACTION: f64 = 0.5;

/// Quality points for a candidate with no reviews on record.
pub const RATING_NEUTRAL_POINTS: f64 = 5.0;

/// Minimum prior domain clients before any domain-experience points accrue.
pub const DOMAIN_CLIENT_THRESHOLD: u32 = 5;
pub const DOMAIN_CLIENT_SATURATION: u32 = 20;

pub const SPECIALTY_NEUTRAL_FRACTION: f64 = 0.5;

pub const VERIFICATION_FULL_BADGES: usize = 3;

/// Sub-scores at or above this share of their maximum are strong reasons.
pub const STRONG_BAND_FRACTION: f64 = 0.8;
/// Sub-scores below this share of their maximum raise a warning.
pub const CONCERN_THRESHOLD_FRACTION: f64 = 0.4;

pub const MAX_REASONS: usize = 3;
pub const MAX_WARNINGS: usize = 3;

/// Available capacity units needed for a full capacity-fit score.
pub const fn capacity_viability_threshold(urgency: Urgency) -> u32 {
    match urgency {
        Urgency::Flexible => 5,
        Urgency::Standard => 10,
        Urgency::Urgent => 20,
    }
}

/// Independent dimensions of match quality, in declaration (tie-break) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubScoreKind {
    SectorAlignment,
    Experience,
    CapacityFit,
    LocationProximity,
    QualityRating,
    LanguageMatch,
    DomainExperience,
    SpecialtyMatch,
    Verification,
}

impl SubScoreKind {
    pub const ALL: [SubScoreKind; 9] = [
        SubScoreKind::SectorAlignment,
        SubScoreKind::Experience,
        SubScoreKind::CapacityFit,
        SubScoreKind::LocationProximity,
        SubScoreKind::QualityRating,
        SubScoreKind::LanguageMatch,
        SubScoreKind::DomainExperience,
        SubScoreKind::SpecialtyMatch,
        SubScoreKind::Verification,
    ];

    pub const fn max_points(self) -> f64 {
        match self {
            SubScoreKind::SectorAlignment => 20.0,
            SubScoreKind::Experience => 15.0,
            SubScoreKind::CapacityFit
            | SubScoreKind::LocationProximity
            | SubScoreKind::QualityRating
            | SubScoreKind::LanguageMatch
            | SubScoreKind::DomainExperience
            | SubScoreKind::SpecialtyMatch => 10.0,
            SubScoreKind::Verification => 5.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SubScoreKind::SectorAlignment => "sector_alignment",
            SubScoreKind::Experience => "experience",
            SubScoreKind::CapacityFit => "capacity_fit",
            SubScoreKind::LocationProximity => "location_proximity",
            SubScoreKind::QualityRating => "quality_rating",
            SubScoreKind::LanguageMatch => "language_match",
            SubScoreKind::DomainExperience => "domain_experience",
            SubScoreKind::SpecialtyMatch => "specialty_match",
            SubScoreKind::Verification => "verification",
        }
    }
}

/// Round to one decimal so equal inputs serialize identically.
pub(crate) fn round_points(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Clamp `value` into `[0, max]` and round it.
pub(crate) fn bounded(value: f64, max: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    round_points(value.clamp(0.0, max))
}
