use crate::infra::{parse_date, parse_kind, parse_urgency, InMemoryCandidateRepository};
use chrono::{Local, NaiveDate};
use clap::Args;
use investor_match::config::{AppConfig, ConfigError};
use investor_match::error::AppError;
use investor_match::matching::{
    Candidate, CandidateId, CandidateKind, Location, MatchmakingService, QueryProfile,
    RankingReport, ScoreBreakdown, Urgency, DEFAULT_TOP_N,
};
use investor_match::registry::RegistryImporter;
use std::path::PathBuf;
use std::sync::Arc;

const SAMPLE_REGISTRY: &str = include_str!("../../../crates/investor-match/registry_sample.csv");

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Registry CSV export (defaults to MATCH_REGISTRY_CSV)
    #[arg(long)]
    pub(crate) registry: Option<PathBuf>,
    /// Candidate kind to rank: zone or partner
    #[arg(long, value_parser = parse_kind, default_value = "zone")]
    pub(crate) kind: CandidateKind,
    /// Target sector; may be blank when another filter is given
    #[arg(long, default_value = "")]
    pub(crate) sector: String,
    /// Planned investment in USD millions
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub(crate) investment_size: f64,
    /// Preferred region
    #[arg(long)]
    pub(crate) region: Option<String>,
    /// Broader region the preferred region belongs to
    #[arg(long, requires = "region")]
    pub(crate) macro_region: Option<String>,
    /// Preferred working language (repeatable)
    #[arg(long = "language")]
    pub(crate) languages: Vec<String>,
    /// Required specialty
    #[arg(long)]
    pub(crate) specialty: Option<String>,
    /// flexible, standard or urgent
    #[arg(long, value_parser = parse_urgency)]
    pub(crate) urgency: Option<Urgency>,
    /// Number of entries to return (defaults to MATCH_DEFAULT_TOP_N)
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Date used to derive years active from the registry (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Print the ranking report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl RankArgs {
    fn query(&self) -> QueryProfile {
        let mut query = QueryProfile::new(self.sector.clone(), self.investment_size)
            .with_languages(self.languages.iter().cloned())
            .with_urgency(self.urgency.unwrap_or_default());
        if let Some(region) = &self.region {
            query = query.with_location(Location::new(region.clone(), self.macro_region.as_deref()));
        }
        if let Some(specialty) = &self.specialty {
            query = query.with_specialty(specialty.clone());
        }
        query
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Date used to derive years active (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Number of entries per ranking
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Skip the partner matchmaking portion of the demo
    #[arg(long)]
    pub(crate) skip_partners: bool,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let path = args
        .registry
        .clone()
        .or(config.matching.registry_csv)
        .ok_or(ConfigError::MissingRegistry)?;
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    let candidates = RegistryImporter::from_path(&path, as_of)?;
    let service = build_service(candidates, config.matching.default_top_n)?;

    let query = args.query();
    let report = service.recommend(args.kind, &query, args.top)?;

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("Ranking payload unavailable: {err}"),
        }
    } else {
        for line in report_lines(&query, &report) {
            println!("{line}");
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        as_of,
        top,
        skip_partners,
    } = args;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    println!("Investor matchmaking demo (registry as of {as_of})");
    let candidates = RegistryImporter::from_reader(SAMPLE_REGISTRY.as_bytes(), as_of)?;
    let service = build_service(candidates, DEFAULT_TOP_N)?;

    let zone_query = demo_query();
    let zones = service.recommend(CandidateKind::Zone, &zone_query, top)?;
    println!();
    for line in report_lines(&zone_query, &zones) {
        println!("{line}");
    }

    let textile = service.explain(&CandidateId("zone-pm-mitra".to_string()), &zone_query)?;
    println!();
    for line in breakdown_lines(&textile) {
        println!("{line}");
    }

    if skip_partners {
        return Ok(());
    }

    let partner_query = demo_query().with_specialty("Regulatory approvals");
    let partners = service.recommend(CandidateKind::Partner, &partner_query, top)?;
    println!();
    for line in report_lines(&partner_query, &partners) {
        println!("{line}");
    }

    Ok(())
}

fn demo_query() -> QueryProfile {
    QueryProfile::new("Pharmaceuticals", 250.0)
        .with_location(Location::new("Telangana", Some("South")))
        .with_languages(["English", "Japanese"])
        .with_specialty("API manufacturing")
        .with_urgency(Urgency::Standard)
}

fn build_service(
    candidates: Vec<Candidate>,
    default_top_n: usize,
) -> Result<MatchmakingService<InMemoryCandidateRepository>, AppError> {
    let service = MatchmakingService::with_default_top_n(
        Arc::new(InMemoryCandidateRepository::default()),
        default_top_n,
    );
    for candidate in candidates {
        service.register(candidate)?;
    }
    Ok(service)
}

fn describe_query(query: &QueryProfile) -> String {
    let mut parts = Vec::new();
    if !query.sector.trim().is_empty() {
        parts.push(format!("sector {}", query.sector.trim()));
    }
    parts.push(format!("USD {:.1}M", query.investment_size));
    if let Some(location) = &query.preferred_location {
        match &location.macro_region {
            Some(macro_region) => parts.push(format!("in {} ({})", location.region, macro_region)),
            None => parts.push(format!("in {}", location.region)),
        }
    }
    if !query.preferred_languages.is_empty() {
        parts.push(format!("languages {}", query.preferred_languages.join("/")));
    }
    if let Some(specialty) = &query.specialty {
        parts.push(format!("specialty {specialty}"));
    }
    parts.push(format!("{} urgency", query.urgency.label()));
    parts.join(", ")
}

pub(crate) fn report_lines(query: &QueryProfile, report: &RankingReport) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Top {} {} matches for {} (scheme {})",
            report.entries.len(),
            report.kind.label(),
            describe_query(query),
            report.scheme_version
        ),
        format!("Evaluated {} candidates", report.evaluated),
    ];

    if report.entries.is_empty() {
        lines.push("No candidates registered for this kind".to_string());
        return lines;
    }

    for entry in &report.entries {
        lines.push(format!(
            "{}. {} [{}] {:.1}/100",
            entry.rank, entry.candidate_name, entry.candidate_id, entry.total
        ));
        for reason in &entry.reasons {
            lines.push(format!("   + {reason}"));
        }
        for warning in &entry.warnings {
            lines.push(format!("   ! {warning}"));
        }
    }

    lines
}

fn breakdown_lines(breakdown: &ScoreBreakdown) -> Vec<String> {
    let mut lines = vec![format!(
        "Why {} scored {:.1}/100",
        breakdown.candidate_name, breakdown.total
    )];
    for score in &breakdown.sub_scores {
        lines.push(format!(
            "  - {}: {:.1}/{:.0} ({})",
            score.kind.label(),
            score.points,
            score.max,
            score.detail
        ));
    }
    lines
}
