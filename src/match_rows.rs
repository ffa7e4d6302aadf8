use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::IngestError;
use crate::parsing::{ParsedResult, parse_result, parse_stat};
use crate::stat_fields::StatSchema;
use crate::team_names::{TeamNormalizer, TeamSlug};

pub const MATCH_ID_FIELD: &str = "match_id";
pub const TEAM_FIELD: &str = "team";
pub const OPPONENT_FIELD: &str = "opponent";
pub const RESULT_FIELD: &str = "RESULT";

/// One scraped row, as handed over by the scraper: column name -> raw cell,
/// in source column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Self::new();
        for (k, v) in pairs {
            row.insert(k, v);
        }
        row
    }

    /// Later values for the same column replace earlier ones in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Fixture identifier as scraped. Ordered by recency: numeric ids compare
/// numerically, non-numeric ids sort before every numeric one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn numeric(&self) -> Option<u64> {
        self.0.parse::<u64>().ok()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Ord for MatchId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.numeric()
            .cmp(&other.numeric())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for MatchId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCell {
    pub raw: String,
    pub value: f64,
}

impl StatCell {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            value: parse_stat(raw),
        }
    }
}

/// One side's view of a fixture. `result` is the score cell as scraped,
/// which is always in fixture (home–away) order regardless of the side.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRow {
    pub match_id: MatchId,
    pub team: TeamSlug,
    pub opponent: TeamSlug,
    pub raw_result: String,
    pub result: ParsedResult,
    pub schema: StatSchema,
    /// Aligned with `schema.fields()`; missing columns are empty cells.
    pub stats: Vec<StatCell>,
    /// Columns outside the fixed schema, in source order.
    pub extra: Vec<(String, String)>,
}

impl MatchRow {
    pub fn stat(&self, name: &str) -> f64 {
        self.schema
            .position(name)
            .and_then(|idx| self.stats.get(idx))
            .map(|cell| cell.value)
            .unwrap_or(0.0)
    }

    pub fn stat_cell(&self, name: &str) -> Option<&StatCell> {
        self.schema.position(name).and_then(|idx| self.stats.get(idx))
    }

    pub fn extra_field(&self, name: &str) -> Option<&str> {
        self.extra
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Types every raw row. Input order is preserved; the only failure is a row
/// that cannot be grouped (no match id, or no team columns at all).
pub fn ingest(
    rows: &[RawRow],
    normalizer: &TeamNormalizer,
    schema: &StatSchema,
) -> Result<Vec<MatchRow>, IngestError> {
    let out = rows
        .iter()
        .enumerate()
        .map(|(idx, raw)| ingest_row(idx, raw, normalizer, schema))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(rows = out.len(), "ingested match rows");
    Ok(out)
}

fn ingest_row(
    idx: usize,
    raw: &RawRow,
    normalizer: &TeamNormalizer,
    schema: &StatSchema,
) -> Result<MatchRow, IngestError> {
    let match_id = required(raw, idx, MATCH_ID_FIELD)?;
    if match_id.trim().is_empty() {
        return Err(IngestError::EmptyField {
            row: idx,
            field: MATCH_ID_FIELD,
        });
    }
    let team = required(raw, idx, TEAM_FIELD)?;
    let opponent = required(raw, idx, OPPONENT_FIELD)?;
    let raw_result = raw.get(RESULT_FIELD).unwrap_or_default().to_string();

    let stats = schema
        .fields()
        .iter()
        .map(|field| StatCell::parse(raw.get(field).unwrap_or_default()))
        .collect();

    let extra = raw
        .iter()
        .filter(|(k, _)| {
            !matches!(*k, MATCH_ID_FIELD | TEAM_FIELD | OPPONENT_FIELD | RESULT_FIELD)
                && !schema.contains(k)
        })
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    Ok(MatchRow {
        match_id: MatchId::new(match_id),
        team: normalizer.normalize(team),
        opponent: normalizer.normalize(opponent),
        result: parse_result(&raw_result),
        raw_result,
        schema: schema.clone(),
        stats,
        extra,
    })
}

fn required<'a>(raw: &'a RawRow, row: usize, field: &'static str) -> Result<&'a str, IngestError> {
    raw.get(field)
        .ok_or(IngestError::MissingField { row, field })
}
