use serde::{Serialize, Serializer};

use crate::grouping::{MatchGroups, Perspective};
use crate::match_rows::MatchRow;
use crate::parsing::{ParsedResult, invert_result};
use crate::stat_fields::StatSchema;
use crate::team_names::TeamSlug;

/// Per-column means for one team at one venue. `values` follows
/// `StatSchema::averages_columns` order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamVenueAverages {
    pub venue: Perspective,
    pub matches: usize,
    pub columns: Vec<String>,
    #[serde(serialize_with = "serialize_two_decimals")]
    pub values: Vec<f64>,
}

fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn serialize_two_decimals<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().copied().map(round_two_decimals))
}

impl TeamVenueAverages {
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.values.get(idx).copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Values rendered the way the report shows them.
    pub fn formatted_values(&self) -> Vec<String> {
        self.values.iter().map(|v| format!("{v:.2}")).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAverages {
    pub team: TeamSlug,
    pub home: TeamVenueAverages,
    pub away: TeamVenueAverages,
}

impl TeamAverages {
    pub fn venue(&self, venue: Perspective) -> &TeamVenueAverages {
        match venue {
            Perspective::Home => &self.home,
            Perspective::Away => &self.away,
        }
    }
}

struct VenueAccumulator {
    venue: Perspective,
    matches: usize,
    // goals scored, goals conceded, then schema fields
    sums: Vec<f64>,
}

impl VenueAccumulator {
    fn new(venue: Perspective, schema: &StatSchema) -> Self {
        Self {
            venue,
            matches: 0,
            sums: vec![0.0; schema.len() + 2],
        }
    }

    /// `result` must already be oriented to the team (scored first).
    fn add(&mut self, result: ParsedResult, row: &MatchRow, schema: &StatSchema) {
        self.matches += 1;
        self.sums[0] += f64::from(result.first);
        self.sums[1] += f64::from(result.second);
        let stats = &mut self.sums[2..];
        if row.schema.same_as(schema) {
            for (sum, cell) in stats.iter_mut().zip(&row.stats) {
                *sum += cell.value;
            }
        } else {
            for (sum, field) in stats.iter_mut().zip(schema.fields()) {
                *sum += row.stat(field);
            }
        }
    }

    fn finish(self, schema: &StatSchema) -> TeamVenueAverages {
        let values = if self.matches == 0 {
            self.sums
        } else {
            let n = self.matches as f64;
            self.sums.into_iter().map(|sum| sum / n).collect()
        };
        TeamVenueAverages {
            venue: self.venue,
            matches: self.matches,
            columns: schema
                .averages_columns()
                .into_iter()
                .map(str::to_string)
                .collect(),
            values,
        }
    }
}

/// Venue-split means over every fixture `team` took part in. Goals are
/// always counted from the team's own side.
pub fn compute_averages(
    groups: &MatchGroups,
    team: &TeamSlug,
    schema: &StatSchema,
) -> TeamAverages {
    let mut home = VenueAccumulator::new(Perspective::Home, schema);
    let mut away = VenueAccumulator::new(Perspective::Away, schema);

    for group in groups {
        match group.side_of(team) {
            Some(Perspective::Home) => home.add(group.home.result, &group.home, schema),
            Some(Perspective::Away) => {
                if let Some(row) = group.away.as_ref() {
                    away.add(invert_result(row.result), row, schema);
                }
            }
            None => {}
        }
    }

    TeamAverages {
        team: team.clone(),
        home: home.finish(schema),
        away: away.finish(schema),
    }
}
