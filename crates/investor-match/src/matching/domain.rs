use serde::{Deserialize, Serialize};

/// Identifier wrapper for registry candidates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a candidate is an investment zone or a B2B service partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    Zone,
    Partner,
}

impl CandidateKind {
    pub const fn label(self) -> &'static str {
        match self {
            CandidateKind::Zone => "zone",
            CandidateKind::Partner => "partner",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "zone" | "zones" => Some(Self::Zone),
            "partner" | "partners" => Some(Self::Partner),
            _ => None,
        }
    }
}

/// Administrative region plus the broader region it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Location {
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macro_region: Option<String>,
}

impl Location {
    pub fn new(region: impl Into<String>, macro_region: Option<&str>) -> Self {
        Self {
            region: region.into(),
            macro_region: macro_region.map(str::to_string),
        }
    }
}

/// Aggregate review score on a 0-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rating {
    pub average: f32,
    pub reviews: u32,
}

impl Rating {
    pub const MAX_AVERAGE: f32 = 5.0;

    pub fn unrated() -> Self {
        Self {
            average: 0.0,
            reviews: 0,
        }
    }
}

/// A zone or partner being ranked against an investor query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub kind: CandidateKind,
    #[serde(default)]
    pub sectors: Vec<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub location: Location,
    #[serde(default)]
    pub available_capacity: u32,
    #[serde(default)]
    pub years_active: u32,
    #[serde(default)]
    pub clients_served: u32,
    /// Prior clients from the querying domain, e.g. foreign direct investors.
    #[serde(default)]
    pub domain_clients: u32,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default = "Rating::unrated")]
    pub rating: Rating,
}

impl Candidate {
    /// Reject records that would break the scoring bounds.
    pub fn validate(&self) -> Result<(), CandidateError> {
        if self.id.0.trim().is_empty() {
            return Err(CandidateError::MissingId);
        }

        if self.name.trim().is_empty() {
            return Err(CandidateError::MissingName {
                id: self.id.clone(),
            });
        }

        let average = self.rating.average;
        if !average.is_finite() || !(0.0..=Rating::MAX_AVERAGE).contains(&average) {
            return Err(CandidateError::RatingOutOfRange {
                id: self.id.clone(),
                average,
            });
        }

        Ok(())
    }
}

/// Validation errors for candidate records.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CandidateError {
    #[error("candidate id must not be empty")]
    MissingId,
    #[error("candidate {id} has no name")]
    MissingName { id: CandidateId },
    #[error("candidate {id} rating {average} is outside 0-5")]
    RatingOutOfRange { id: CandidateId, average: f32 },
}

/// How quickly the investor needs the capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Flexible,
    #[default]
    Standard,
    Urgent,
}

impl Urgency {
    pub const fn label(self) -> &'static str {
        match self {
            Urgency::Flexible => "flexible",
            Urgency::Standard => "standard",
            Urgency::Urgent => "urgent",
        }
    }
}

/// The investor's stated matching requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryProfile {
    pub sector: String,
    /// Planned investment in USD millions.
    pub investment_size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_location: Option<Location>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferred_languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default)]
    pub urgency: Urgency,
}

impl QueryProfile {
    pub fn new(sector: impl Into<String>, investment_size: f64) -> Self {
        Self {
            sector: sector.into(),
            investment_size,
            preferred_location: None,
            preferred_languages: Vec::new(),
            specialty: None,
            urgency: Urgency::default(),
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.preferred_location = Some(location);
        self
    }

    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into());
        self
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    /// True when any dimension besides the sector narrows the search.
    pub fn has_filter_dimension(&self) -> bool {
        self.preferred_location
            .as_ref()
            .is_some_and(|location| !location.region.trim().is_empty())
            || self
                .preferred_languages
                .iter()
                .any(|language| !language.trim().is_empty())
            || self
                .specialty
                .as_deref()
                .is_some_and(|specialty| !specialty.trim().is_empty())
    }

    pub fn validate(&self) -> Result<(), QueryViolation> {
        if !self.investment_size.is_finite() {
            return Err(QueryViolation::NonFiniteInvestmentSize);
        }

        if self.investment_size < 0.0 {
            return Err(QueryViolation::NegativeInvestmentSize(self.investment_size));
        }

        if self.sector.trim().is_empty() && !self.has_filter_dimension() {
            return Err(QueryViolation::Unconstrained);
        }

        Ok(())
    }
}

/// Reasons a query profile is rejected before scoring.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryViolation {
    #[error("investment size must not be negative (found {0})")]
    NegativeInvestmentSize(f64),
    #[error("investment size must be a finite number")]
    NonFiniteInvestmentSize,
    #[error("query has no sector and no other filter dimension")]
    Unconstrained,
}
