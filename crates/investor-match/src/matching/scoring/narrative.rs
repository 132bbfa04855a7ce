use super::super::scheme::{
    SubScoreKind, CONCERN_THRESHOLD_FRACTION, MAX_REASONS, MAX_WARNINGS, STRONG_BAND_FRACTION,
};
use super::{SubScore, SubScoreStatus};

/// Position of a sub-score relative to its maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Band {
    Strong,
    Moderate,
    Concern,
}

impl Band {
    pub(crate) fn of(score: &SubScore) -> Self {
        if score.max <= 0.0 {
            return Band::Concern;
        }
        let fraction = score.points / score.max;
        if fraction >= STRONG_BAND_FRACTION {
            Band::Strong
        } else if fraction >= CONCERN_THRESHOLD_FRACTION {
            Band::Moderate
        } else {
            Band::Concern
        }
    }
}

/// `(sub-score, band) -> template`; `{detail}` is replaced with the sub-score detail.
const TEMPLATES: &[(SubScoreKind, Band, &str)] = &[
    (SubScoreKind::SectorAlignment, Band::Strong, "Strong sector fit: {detail}"),
    (SubScoreKind::SectorAlignment, Band::Moderate, "Adjacent sector fit: {detail}"),
    (SubScoreKind::SectorAlignment, Band::Concern, "Limited sector alignment with {detail}"),
    (SubScoreKind::Experience, Band::Strong, "Established track record: {detail}"),
    (SubScoreKind::Experience, Band::Moderate, "Growing track record: {detail}"),
    (SubScoreKind::Experience, Band::Concern, "Limited track record: {detail}"),
    (SubScoreKind::CapacityFit, Band::Strong, "Ready capacity: {detail}"),
    (SubScoreKind::CapacityFit, Band::Moderate, "Partial capacity: {detail}"),
    (SubScoreKind::CapacityFit, Band::Concern, "Capacity constrained: {detail}"),
    (SubScoreKind::LocationProximity, Band::Strong, "Located in preferred region: {detail}"),
    (SubScoreKind::LocationProximity, Band::Moderate, "Within preferred broader region: {detail}"),
    (SubScoreKind::LocationProximity, Band::Concern, "Outside preferred location: {detail}"),
    (SubScoreKind::QualityRating, Band::Strong, "Highly rated: {detail}"),
    (SubScoreKind::QualityRating, Band::Moderate, "Solid rating: {detail}"),
    (SubScoreKind::QualityRating, Band::Concern, "Below-average rating: {detail}"),
    (SubScoreKind::LanguageMatch, Band::Strong, "Speaks preferred languages: {detail}"),
    (SubScoreKind::LanguageMatch, Band::Moderate, "Partial language coverage: {detail}"),
    (SubScoreKind::LanguageMatch, Band::Concern, "Language gap: {detail}"),
    (SubScoreKind::DomainExperience, Band::Strong, "Deep foreign-investor experience: {detail}"),
    (SubScoreKind::DomainExperience, Band::Moderate, "Some foreign-investor experience: {detail}"),
    (SubScoreKind::DomainExperience, Band::Concern, "Little foreign-investor experience: {detail}"),
    (SubScoreKind::SpecialtyMatch, Band::Strong, "Specialty match: {detail}"),
    (SubScoreKind::SpecialtyMatch, Band::Moderate, "Related specialty: {detail}"),
    (SubScoreKind::SpecialtyMatch, Band::Concern, "Specialty not offered: {detail}"),
    (SubScoreKind::Verification, Band::Strong, "Verified: {detail}"),
    (SubScoreKind::Verification, Band::Moderate, "Partially verified: {detail}"),
    (SubScoreKind::Verification, Band::Concern, "Limited verification: {detail}"),
];

fn render(score: &SubScore, band: Band) -> Option<String> {
    TEMPLATES
        .iter()
        .find(|(kind, rule_band, _)| *kind == score.kind && *rule_band == band)
        .map(|(_, _, template)| template.replace("{detail}", &score.detail))
}

/// Positive explanations, strongest contribution first.
pub(crate) fn reasons(sub_scores: &[SubScore]) -> Vec<String> {
    let mut ranked: Vec<(&SubScore, Band)> = sub_scores
        .iter()
        .filter(|score| score.status != SubScoreStatus::Neutral)
        .map(|score| (score, Band::of(score)))
        .filter(|(_, band)| matches!(band, Band::Strong | Band::Moderate))
        .collect();

    ranked.sort_by(|(a, _), (b, _)| b.points.total_cmp(&a.points));

    ranked
        .into_iter()
        .filter_map(|(score, band)| render(score, band))
        .take(MAX_REASONS)
        .collect()
}

/// Gap explanations for sub-scores under the concern threshold, largest gap first.
pub(crate) fn warnings(sub_scores: &[SubScore]) -> Vec<String> {
    let mut gaps: Vec<&SubScore> = sub_scores
        .iter()
        .filter(|score| score.status != SubScoreStatus::Neutral)
        .filter(|score| Band::of(score) == Band::Concern)
        .collect();

    gaps.sort_by(|a, b| (b.max - b.points).total_cmp(&(a.max - a.points)));

    gaps.into_iter()
        .filter_map(|score| render(score, Band::Concern))
        .take(MAX_WARNINGS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(kind: SubScoreKind, points: f64, status: SubScoreStatus, detail: &str) -> SubScore {
        SubScore {
            kind,
            points,
            max: kind.max_points(),
            status,
            detail: detail.to_string(),
        }
    }

    #[test]
    fn every_kind_has_a_template_per_band() {
        for kind in SubScoreKind::ALL {
            for band in [Band::Strong, Band::Moderate, Band::Concern] {
                assert!(
                    TEMPLATES.iter().any(|(k, b, _)| *k == kind && *b == band),
                    "missing template for {kind:?}/{band:?}"
                );
            }
        }
    }

    #[test]
    fn band_boundaries_follow_the_concern_threshold() {
        let at_threshold = score(SubScoreKind::CapacityFit, 4.0, SubScoreStatus::Partial, "");
        let below = score(SubScoreKind::CapacityFit, 3.9, SubScoreStatus::Partial, "");
        let strong = score(SubScoreKind::CapacityFit, 8.0, SubScoreStatus::Partial, "");
        assert_eq!(Band::of(&at_threshold), Band::Moderate);
        assert_eq!(Band::of(&below), Band::Concern);
        assert_eq!(Band::of(&strong), Band::Strong);
    }

    #[test]
    fn reasons_are_ordered_by_contribution_and_capped() {
        let scores = vec![
            score(SubScoreKind::SectorAlignment, 20.0, SubScoreStatus::Full, "Pharmaceuticals"),
            score(SubScoreKind::Experience, 9.0, SubScoreStatus::Partial, "6 years, 40 clients"),
            score(SubScoreKind::CapacityFit, 10.0, SubScoreStatus::Full, "12 of 10 units available"),
            score(SubScoreKind::QualityRating, 9.0, SubScoreStatus::Partial, "4.5/5 from 20 reviews"),
            score(SubScoreKind::Verification, 5.0, SubScoreStatus::Full, "ISO 9001"),
        ];

        let reasons = reasons(&scores);

        assert_eq!(
            reasons,
            vec![
                "Strong sector fit: Pharmaceuticals".to_string(),
                "Ready capacity: 12 of 10 units available".to_string(),
                "Growing track record: 6 years, 40 clients".to_string(),
            ]
        );
    }

    #[test]
    fn neutral_scores_never_produce_text() {
        let scores = vec![
            score(SubScoreKind::QualityRating, 5.0, SubScoreStatus::Neutral, "no reviews yet"),
            score(SubScoreKind::SectorAlignment, 0.0, SubScoreStatus::Neutral, "any sector"),
        ];

        assert!(reasons(&scores).is_empty());
        assert!(warnings(&scores).is_empty());
    }

    #[test]
    fn warnings_put_the_largest_gap_first() {
        let scores = vec![
            score(SubScoreKind::Verification, 0.0, SubScoreStatus::Miss, "no verification badges"),
            score(SubScoreKind::SectorAlignment, 0.0, SubScoreStatus::Miss, "Textiles"),
            score(SubScoreKind::CapacityFit, 2.0, SubScoreStatus::Partial, "2 of 10 units available"),
            score(SubScoreKind::LanguageMatch, 0.0, SubScoreStatus::Miss, "missing Japanese"),
        ];

        let warnings = warnings(&scores);

        assert_eq!(warnings.len(), 3);
        assert_eq!(warnings[0], "Limited sector alignment with Textiles");
        assert_eq!(warnings[1], "Language gap: missing Japanese");
        assert_eq!(warnings[2], "Capacity constrained: 2 of 10 units available");
    }
}
