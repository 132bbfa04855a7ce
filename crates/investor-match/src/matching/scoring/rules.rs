use std::collections::BTreeSet;

use super::super::domain::{Candidate, QueryProfile};
use super::super::scheme::{
    bounded, capacity_viability_threshold, SubScoreKind, DOMAIN_CLIENT_SATURATION,
    DOMAIN_CLIENT_THRESHOLD, EXPERIENCE_FULL_CLIENTS, EXPERIENCE_FULL_YEARS,
    LOCATION_MACRO_REGION_FRACTION, LOCATION_NEUTRAL_FRACTION, RATING_NEUTRAL_POINTS,
    SECTOR_PARTIAL_FRACTION, SPECIALTY_NEUTRAL_FRACTION, VERIFICATION_FULL_BADGES,
};
use super::{SubScore, SubScoreStatus};

pub(crate) type RuleFn = fn(&Candidate, &QueryProfile) -> SubScore;

/// Sub-score rules in declaration order; none reads another's output.
pub(crate) const RULES: [(SubScoreKind, RuleFn); 9] = [
    (SubScoreKind::SectorAlignment, sector_alignment),
    (SubScoreKind::Experience, experience),
    (SubScoreKind::CapacityFit, capacity_fit),
    (SubScoreKind::LocationProximity, location_proximity),
    (SubScoreKind::QualityRating, quality_rating),
    (SubScoreKind::LanguageMatch, language_match),
    (SubScoreKind::DomainExperience, domain_experience),
    (SubScoreKind::SpecialtyMatch, specialty_match),
    (SubScoreKind::Verification, verification),
];

/// Case-insensitive, whitespace-collapsed form used for tag comparison.
pub(crate) fn fold(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn sub_score(
    kind: SubScoreKind,
    fraction: f64,
    status: SubScoreStatus,
    detail: impl Into<String>,
) -> SubScore {
    let max = kind.max_points();
    SubScore {
        kind,
        points: bounded(fraction * max, max),
        max,
        status,
        detail: detail.into(),
    }
}

fn status_for(fraction: f64) -> SubScoreStatus {
    if fraction >= 1.0 {
        SubScoreStatus::Full
    } else if fraction > 0.0 {
        SubScoreStatus::Partial
    } else {
        SubScoreStatus::Miss
    }
}

pub(crate) fn sector_alignment(candidate: &Candidate, query: &QueryProfile) -> SubScore {
    let kind = SubScoreKind::SectorAlignment;
    let wanted = fold(&query.sector);
    if wanted.is_empty() {
        return sub_score(kind, 0.0, SubScoreStatus::Neutral, "any sector");
    }

    let mut partial: Option<&str> = None;
    for tag in &candidate.sectors {
        let folded = fold(tag);
        if folded.is_empty() {
            continue;
        }
        if folded == wanted {
            return sub_score(kind, 1.0, SubScoreStatus::Full, tag.trim());
        }
        if partial.is_none() && (folded.contains(&wanted) || wanted.contains(&folded)) {
            partial = Some(tag.trim());
        }
    }

    match partial {
        Some(tag) => sub_score(kind, SECTOR_PARTIAL_FRACTION, SubScoreStatus::Partial, tag),
        None => sub_score(kind, 0.0, SubScoreStatus::Miss, query.sector.trim()),
    }
}

pub(crate) fn experience(candidate: &Candidate, _query: &QueryProfile) -> SubScore {
    let years = candidate.years_active as f64 / EXPERIENCE_FULL_YEARS as f64;
    let clients = candidate.clients_served as f64 / EXPERIENCE_FULL_CLIENTS as f64;
    let fraction = years.max(clients).min(1.0);

    sub_score(
        SubScoreKind::Experience,
        fraction,
        status_for(fraction),
        format!(
            "{} years, {} clients",
            candidate.years_active, candidate.clients_served
        ),
    )
}

pub(crate) fn capacity_fit(candidate: &Candidate, query: &QueryProfile) -> SubScore {
    let threshold = capacity_viability_threshold(query.urgency);
    let available = candidate.available_capacity;
    let fraction = if available == 0 {
        0.0
    } else {
        (available as f64 / threshold as f64).min(1.0)
    };

    sub_score(
        SubScoreKind::CapacityFit,
        fraction,
        status_for(fraction),
        format!("{available} of {threshold} units available"),
    )
}

pub(crate) fn location_proximity(candidate: &Candidate, query: &QueryProfile) -> SubScore {
    let kind = SubScoreKind::LocationProximity;
    let preferred = match &query.preferred_location {
        Some(location) if !fold(&location.region).is_empty() => location,
        _ => {
            return sub_score(
                kind,
                LOCATION_NEUTRAL_FRACTION,
                SubScoreStatus::Neutral,
                "no preference",
            )
        }
    };

    let region = fold(&candidate.location.region);
    if !region.is_empty() && region == fold(&preferred.region) {
        return sub_score(
            kind,
            1.0,
            SubScoreStatus::Full,
            candidate.location.region.trim(),
        );
    }

    let same_macro = match (&candidate.location.macro_region, &preferred.macro_region) {
        (Some(ours), Some(theirs)) => {
            let ours = fold(ours);
            !ours.is_empty() && ours == fold(theirs)
        }
        _ => false,
    };
    if same_macro {
        let detail = candidate
            .location
            .macro_region
            .as_deref()
            .unwrap_or_default()
            .trim();
        return sub_score(
            kind,
            LOCATION_MACRO_REGION_FRACTION,
            SubScoreStatus::Partial,
            detail,
        );
    }

    let region_label = if region.is_empty() {
        "unknown location"
    } else {
        candidate.location.region.trim()
    };
    sub_score(
        kind,
        0.0,
        SubScoreStatus::Miss,
        format!("{} (preferred {})", region_label, preferred.region.trim()),
    )
}

pub(crate) fn quality_rating(candidate: &Candidate, _query: &QueryProfile) -> SubScore {
    let kind = SubScoreKind::QualityRating;
    let rating = candidate.rating;
    if rating.reviews == 0 {
        return sub_score(
            kind,
            RATING_NEUTRAL_POINTS / kind.max_points(),
            SubScoreStatus::Neutral,
            "no reviews yet",
        );
    }

    let fraction = rating.average as f64 / 5.0;
    sub_score(
        kind,
        fraction,
        status_for(fraction),
        format!("{:.1}/5 from {} reviews", rating.average, rating.reviews),
    )
}

pub(crate) fn language_match(candidate: &Candidate, query: &QueryProfile) -> SubScore {
    let kind = SubScoreKind::LanguageMatch;

    let mut seen = BTreeSet::new();
    let preferred: Vec<(String, &str)> = query
        .preferred_languages
        .iter()
        .map(|language| (fold(language), language.trim()))
        .filter(|(folded, _)| !folded.is_empty() && seen.insert(folded.clone()))
        .collect();

    if preferred.is_empty() {
        return sub_score(kind, 1.0, SubScoreStatus::Neutral, "no preference");
    }

    let spoken: BTreeSet<String> = candidate
        .languages
        .iter()
        .map(|language| fold(language))
        .collect();

    let (matched, missing): (Vec<_>, Vec<_>) = preferred
        .iter()
        .partition(|(folded, _)| spoken.contains(folded));
    let fraction = matched.len() as f64 / preferred.len() as f64;

    let detail = if missing.is_empty() {
        matched
            .iter()
            .map(|(_, label)| *label)
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        format!(
            "missing {}",
            missing
                .iter()
                .map(|(_, label)| *label)
                .collect::<Vec<_>>()
                .join(", ")
        )
    };

    sub_score(kind, fraction, status_for(fraction), detail)
}

pub(crate) fn domain_experience(candidate: &Candidate, _query: &QueryProfile) -> SubScore {
    let count = candidate.domain_clients;
    let fraction = if count >= DOMAIN_CLIENT_THRESHOLD {
        (count as f64 / DOMAIN_CLIENT_SATURATION as f64).min(1.0)
    } else {
        0.0
    };

    sub_score(
        SubScoreKind::DomainExperience,
        fraction,
        status_for(fraction),
        format!("{count} prior clients"),
    )
}

pub(crate) fn specialty_match(candidate: &Candidate, query: &QueryProfile) -> SubScore {
    let kind = SubScoreKind::SpecialtyMatch;
    let wanted = query.specialty.as_deref().map(fold).unwrap_or_default();
    if wanted.is_empty() {
        return sub_score(
            kind,
            SPECIALTY_NEUTRAL_FRACTION,
            SubScoreStatus::Neutral,
            "no preference",
        );
    }

    match candidate
        .specialties
        .iter()
        .find(|specialty| fold(specialty) == wanted)
    {
        Some(specialty) => sub_score(kind, 1.0, SubScoreStatus::Full, specialty.trim()),
        None => sub_score(
            kind,
            0.0,
            SubScoreStatus::Miss,
            query.specialty.as_deref().unwrap_or_default().trim(),
        ),
    }
}

pub(crate) fn verification(candidate: &Candidate, _query: &QueryProfile) -> SubScore {
    let mut seen = BTreeSet::new();
    let badges: Vec<&str> = candidate
        .badges
        .iter()
        .filter(|badge| {
            let folded = fold(badge);
            !folded.is_empty() && seen.insert(folded)
        })
        .map(|badge| badge.trim())
        .collect();

    let fraction = (badges.len() as f64 / VERIFICATION_FULL_BADGES as f64).min(1.0);
    let detail = if badges.is_empty() {
        "no verification badges".to_string()
    } else {
        badges.join(", ")
    };

    sub_score(
        SubScoreKind::Verification,
        fraction,
        status_for(fraction),
        detail,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::domain::{CandidateId, CandidateKind, Location, Rating};

    fn blank_candidate() -> Candidate {
        Candidate {
            id: CandidateId("blank".to_string()),
            name: "Blank".to_string(),
            kind: CandidateKind::Partner,
            sectors: Vec::new(),
            specialties: Vec::new(),
            location: Location::new("", None),
            available_capacity: 0,
            years_active: 0,
            clients_served: 0,
            domain_clients: 0,
            badges: Vec::new(),
            languages: Vec::new(),
            rating: Rating::unrated(),
        }
    }

    #[test]
    fn rules_follow_declaration_order() {
        let kinds: Vec<SubScoreKind> = RULES.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(kinds, SubScoreKind::ALL.to_vec());

        let candidate = blank_candidate();
        let query = QueryProfile::new("Logistics", 1.0);
        for (kind, rule) in RULES {
            assert_eq!(rule(&candidate, &query).kind, kind);
        }
    }

    #[test]
    fn fold_ignores_case_and_spacing() {
        assert_eq!(fold("  Food   Processing "), "food processing");
        assert_eq!(fold("ÉLECTRONICS"), "électronics");
    }

    #[test]
    fn duplicate_badges_count_once() {
        let mut candidate = blank_candidate();
        candidate.badges = vec![
            "ISO 9001".to_string(),
            "iso 9001".to_string(),
            " ".to_string(),
        ];
        let score = verification(&candidate, &QueryProfile::new("Logistics", 1.0));
        assert_eq!(score.points, 1.7);
        assert_eq!(score.detail, "ISO 9001");
    }
}
