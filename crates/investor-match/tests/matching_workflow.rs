use chrono::NaiveDate;
use investor_match::matching::{
    rank, CandidateKind, Location, MatchingError, QueryProfile, QueryViolation, RankingEntryView,
    SubScoreKind, SubScoreStatus,
};
use investor_match::registry::RegistryImporter;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid as-of date")
}

fn sample_registry() -> Vec<investor_match::matching::Candidate> {
    let data = include_bytes!("../registry_sample.csv");
    RegistryImporter::from_reader(&data[..], as_of()).expect("sample registry imports")
}

fn of_kind(
    candidates: &[investor_match::matching::Candidate],
    kind: CandidateKind,
) -> Vec<investor_match::matching::Candidate> {
    candidates
        .iter()
        .filter(|candidate| candidate.kind == kind)
        .cloned()
        .collect()
}

#[test]
fn sample_registry_imports_every_row() {
    let candidates = sample_registry();

    assert_eq!(candidates.len(), 9);
    assert_eq!(of_kind(&candidates, CandidateKind::Zone).len(), 5);
    assert_eq!(of_kind(&candidates, CandidateKind::Partner).len(), 4);

    let dholera = &candidates[0];
    assert_eq!(dholera.id.0, "zone-dholera");
    assert_eq!(dholera.years_active, 11);
    assert_eq!(dholera.languages, vec!["English", "Gujarati", "Hindi"]);
}

#[test]
fn zone_recommendation_for_a_pharma_investor() {
    let zones = of_kind(&sample_registry(), CandidateKind::Zone);
    let query = QueryProfile::new("Pharmaceuticals", 250.0)
        .with_location(Location::new("Telangana", Some("South")))
        .with_languages(["English"])
        .with_specialty("API manufacturing");

    let ranked = rank(&zones, &query, Some(3)).expect("valid query");

    let ids: Vec<&str> = ranked
        .iter()
        .map(|entry| entry.candidate_id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["zone-genome-valley", "zone-sricity", "zone-dholera"]);
    assert_eq!(ranked[0].total, 99.2);
    assert_eq!(ranked[1].total, 59.9);
    assert_eq!(ranked[2].total, 58.8);
    assert_eq!(
        ranked[0].reasons.first().map(String::as_str),
        Some("Strong sector fit: Pharmaceuticals")
    );
}

#[test]
fn adjacent_sector_scores_two_thirds() {
    let zones = of_kind(&sample_registry(), CandidateKind::Zone);
    let query = QueryProfile::new("Pharmaceuticals", 40.0);

    let ranked = rank(&zones, &query, None).expect("valid query");
    let bulk_drug = ranked
        .iter()
        .find(|entry| entry.candidate_id.0 == "zone-bulk-drug")
        .expect("bulk drug park ranked");

    assert_eq!(bulk_drug.points(SubScoreKind::SectorAlignment), 13.3);
}

#[test]
fn unreviewed_partner_gets_a_neutral_rating() {
    let partners = of_kind(&sample_registry(), CandidateKind::Partner);
    let query = QueryProfile::new("Pharmaceuticals", 15.0);

    let ranked = rank(&partners, &query, None).expect("valid query");
    let newcomer = ranked
        .iter()
        .find(|entry| entry.candidate_id.0 == "partner-new")
        .expect("new partner ranked");
    let rating = newcomer
        .sub_score(SubScoreKind::QualityRating)
        .expect("rating scored");

    assert_eq!(rating.points, 5.0);
    assert_eq!(rating.status, SubScoreStatus::Neutral);
    assert!(newcomer
        .reasons
        .iter()
        .chain(newcomer.warnings.iter())
        .all(|text| !text.contains("rating") && !text.contains("rated")));
}

#[test]
fn identical_candidates_keep_registry_order() {
    let partners = of_kind(&sample_registry(), CandidateKind::Partner);
    let mut first = partners[0].clone();
    first.id.0 = "A".to_string();
    let mut second = partners[0].clone();
    second.id.0 = "B".to_string();

    let ranked = rank(&[first, second], &QueryProfile::new("Legal", 1.0), None)
        .expect("valid query");

    assert_eq!(ranked[0].total, ranked[1].total);
    assert_eq!(ranked[0].candidate_id.0, "A");
    assert_eq!(ranked[1].candidate_id.0, "B");
}

#[test]
fn invalid_queries_are_rejected_before_scoring() {
    let zones = of_kind(&sample_registry(), CandidateKind::Zone);

    let negative = rank(&zones, &QueryProfile::new("Electronics", -1.0), None);
    assert_eq!(
        negative,
        Err(MatchingError::InvalidQuery(
            QueryViolation::NegativeInvestmentSize(-1.0)
        ))
    );

    let unconstrained = rank(&zones, &QueryProfile::new("", 10.0), None);
    assert_eq!(
        unconstrained,
        Err(MatchingError::InvalidQuery(QueryViolation::Unconstrained))
    );
}

#[test]
fn empty_registry_ranks_to_nothing() {
    let ranked = rank(&[], &QueryProfile::new("Electronics", 10.0), Some(5)).expect("valid query");
    assert!(ranked.is_empty());
}

#[test]
fn ranking_entry_view_serializes_camel_case() {
    let zones = of_kind(&sample_registry(), CandidateKind::Zone);
    let ranked = rank(&zones, &QueryProfile::new("Electronics", 10.0), Some(1)).expect("valid query");

    let view = RankingEntryView::from_breakdown(1, &ranked[0]);
    let json = serde_json::to_value(&view).expect("view serializes");

    assert_eq!(json["candidateId"], "zone-dholera");
    assert_eq!(json["rank"], 1);
    assert!(json["subScores"]["sector_alignment"].is_number());
    assert_eq!(
        json["subScores"].as_object().map(|scores| scores.len()),
        Some(9)
    );
    assert!(json["reasons"].is_array());
    assert!(json["warnings"].is_array());
}
