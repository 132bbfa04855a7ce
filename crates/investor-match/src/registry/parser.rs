use super::normalizer::{normalize_cell, split_list};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// A registry row after cell normalization, before domain validation.
#[derive(Debug)]
pub(crate) struct RegistryRecord {
    pub(crate) line: u64,
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) kind: String,
    pub(crate) sectors: Vec<String>,
    pub(crate) specialties: Vec<String>,
    pub(crate) region: String,
    pub(crate) macro_region: Option<String>,
    pub(crate) available_capacity: u32,
    /// Raw `Established` cell; blank cells are `None`.
    pub(crate) established: Option<String>,
    pub(crate) clients_served: u32,
    pub(crate) foreign_clients: u32,
    pub(crate) badges: Vec<String>,
    pub(crate) languages: Vec<String>,
    pub(crate) rating: f32,
    pub(crate) reviews: u32,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<RegistryRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let raw = result?;
        let line = raw.position().map(|position| position.line()).unwrap_or_default();
        let row: RegistryRow = raw.deserialize(Some(&headers))?;
        records.push(row.into_record(line));
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RegistryRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Kind")]
    kind: String,
    #[serde(rename = "Sectors", default)]
    sectors: String,
    #[serde(rename = "Specialties", default)]
    specialties: String,
    #[serde(rename = "Region", default)]
    region: String,
    #[serde(
        rename = "Macro Region",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    macro_region: Option<String>,
    #[serde(rename = "Available Capacity", default)]
    available_capacity: Option<u32>,
    #[serde(
        rename = "Established",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    established: Option<String>,
    #[serde(rename = "Clients Served", default)]
    clients_served: Option<u32>,
    #[serde(rename = "Foreign Clients", default)]
    foreign_clients: Option<u32>,
    #[serde(rename = "Badges", default)]
    badges: String,
    #[serde(rename = "Languages", default)]
    languages: String,
    #[serde(rename = "Rating", default)]
    rating: Option<f32>,
    #[serde(rename = "Reviews", default)]
    reviews: Option<u32>,
}

impl RegistryRow {
    fn into_record(self, line: u64) -> RegistryRecord {
        RegistryRecord {
            line,
            id: normalize_cell(&self.id),
            name: normalize_cell(&self.name),
            kind: normalize_cell(&self.kind),
            sectors: split_list(&self.sectors),
            specialties: split_list(&self.specialties),
            region: normalize_cell(&self.region),
            macro_region: self.macro_region.as_deref().map(normalize_cell),
            available_capacity: self.available_capacity.unwrap_or_default(),
            established: self.established.as_deref().map(normalize_cell),
            clients_served: self.clients_served.unwrap_or_default(),
            foreign_clients: self.foreign_clients.unwrap_or_default(),
            badges: split_list(&self.badges),
            languages: split_list(&self.languages),
            rating: self.rating.unwrap_or_default(),
            reviews: self.reviews.unwrap_or_default(),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    None
}
