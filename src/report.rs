use serde::Serialize;

use crate::averages::{TeamAverages, compute_averages};
use crate::grouping::{MatchGroup, MatchGroups, Perspective};
use crate::lookup::{find_last_head_to_head, find_recent_form};
use crate::match_rows::{MATCH_ID_FIELD, MatchRow, OPPONENT_FIELD, RESULT_FIELD, TEAM_FIELD};
use crate::parsing::invert_result_str;
use crate::period::Period;
use crate::stat_fields::StatSchema;
use crate::team_names::TeamSlug;

pub const PERSPECTIVE_COLUMN: &str = "Perspective";
pub const ADJUSTED_RESULT_COLUMN: &str = "Adjusted_RESULT";
pub const TEAM_PERSPECTIVE_COLUMN: &str = "Team_Perspective";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TeamFlag {
    Yes,
    No,
    /// No team of interest for this section.
    Unset,
}

impl TeamFlag {
    pub fn label(self) -> &'static str {
        match self {
            TeamFlag::Yes => "Yes",
            TeamFlag::No => "No",
            TeamFlag::Unset => "",
        }
    }
}

/// One side of a fixture as it appears in a report section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub match_id: String,
    pub team: TeamSlug,
    pub opponent: TeamSlug,
    pub result: String,
    /// Raw stat cells in schema order.
    pub stats: Vec<String>,
    pub extra: Vec<(String, String)>,
    pub perspective: Perspective,
    pub adjusted_result: String,
    pub team_perspective: TeamFlag,
}

impl ReportRow {
    /// Positional cells matching `match_row_header`.
    pub fn cells(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.stats.len() + 7);
        out.push(self.match_id.clone());
        out.push(self.team.to_string());
        out.push(self.opponent.to_string());
        out.push(self.result.clone());
        out.extend(self.stats.iter().cloned());
        out.push(self.perspective.label().to_string());
        out.push(self.adjusted_result.clone());
        out.push(self.team_perspective.label().to_string());
        out
    }
}

/// Tags a row with its side, the score from that side, and whether it
/// belongs to `team_of_interest`. Stat cells follow `schema`, whatever schema
/// the row was ingested with.
pub fn annotate_row(
    row: &MatchRow,
    schema: &StatSchema,
    perspective: Perspective,
    team_of_interest: Option<&TeamSlug>,
) -> ReportRow {
    let adjusted_result = match perspective {
        Perspective::Home => row.raw_result.clone(),
        Perspective::Away => invert_result_str(&row.raw_result),
    };
    let team_perspective = match team_of_interest {
        Some(team) if *team == row.team => TeamFlag::Yes,
        Some(_) => TeamFlag::No,
        None => TeamFlag::Unset,
    };
    ReportRow {
        match_id: row.match_id.to_string(),
        team: row.team.clone(),
        opponent: row.opponent.clone(),
        result: row.raw_result.clone(),
        stats: stat_cells(row, schema),
        extra: row.extra.clone(),
        perspective,
        adjusted_result,
        team_perspective,
    }
}

fn stat_cells(row: &MatchRow, schema: &StatSchema) -> Vec<String> {
    if row.schema.same_as(schema) {
        return row.stats.iter().map(|cell| cell.raw.clone()).collect();
    }
    schema
        .fields()
        .iter()
        .map(|field| {
            row.stat_cell(field)
                .map(|cell| cell.raw.clone())
                .unwrap_or_default()
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMatch {
    pub match_id: String,
    pub rows: Vec<ReportRow>,
}

impl ReportMatch {
    pub fn from_group(
        group: &MatchGroup,
        schema: &StatSchema,
        team_of_interest: Option<&TeamSlug>,
    ) -> Self {
        Self {
            match_id: group.match_id().to_string(),
            rows: group
                .rows()
                .map(|(side, row)| annotate_row(row, schema, side, team_of_interest))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "match", rename_all = "snake_case")]
pub enum HeadToHead {
    Found(ReportMatch),
    NoneFound,
}

impl HeadToHead {
    pub fn found(&self) -> Option<&ReportMatch> {
        match self {
            HeadToHead::Found(m) => Some(m),
            HeadToHead::NoneFound => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSection {
    pub team: TeamSlug,
    pub matches: Vec<ReportMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub period: Option<Period>,
    pub team_a: TeamSlug,
    pub team_b: TeamSlug,
    pub form_limit: usize,
    pub stat_fields: Vec<String>,
    pub head_to_head: HeadToHead,
    pub team_a_form: FormSection,
    pub team_b_form: FormSection,
    pub team_a_averages: TeamAverages,
    pub team_b_averages: TeamAverages,
}

/// Composes head-to-head, form for both teams and averages for both teams.
/// Team slugs must already be normalized.
pub fn build_report(
    groups: &MatchGroups,
    team_a: &TeamSlug,
    team_b: &TeamSlug,
    schema: &StatSchema,
    form_limit: usize,
) -> Report {
    let head_to_head = match find_last_head_to_head(groups, team_a, team_b) {
        Some(group) => HeadToHead::Found(ReportMatch::from_group(group, schema, None)),
        None => HeadToHead::NoneFound,
    };
    let form = |team: &TeamSlug| FormSection {
        team: team.clone(),
        matches: find_recent_form(groups, team, form_limit)
            .into_iter()
            .map(|group| ReportMatch::from_group(group, schema, Some(team)))
            .collect(),
    };

    Report {
        period: None,
        team_a: team_a.clone(),
        team_b: team_b.clone(),
        form_limit,
        stat_fields: schema.fields().to_vec(),
        head_to_head,
        team_a_form: form(team_a),
        team_b_form: form(team_b),
        team_a_averages: compute_averages(groups, team_a, schema),
        team_b_averages: compute_averages(groups, team_b, schema),
    }
}

impl Report {
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn title(&self) -> String {
        match self.period {
            Some(period) => format!("{} Analysis", period.label()),
            None => "Analysis".to_string(),
        }
    }

    pub fn match_row_header(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.stat_fields.len() + 7);
        out.extend(
            [MATCH_ID_FIELD, TEAM_FIELD, OPPONENT_FIELD, RESULT_FIELD]
                .iter()
                .map(|s| s.to_string()),
        );
        out.extend(self.stat_fields.iter().cloned());
        out.extend(
            [
                PERSPECTIVE_COLUMN,
                ADJUSTED_RESULT_COLUMN,
                TEAM_PERSPECTIVE_COLUMN,
            ]
            .iter()
            .map(|s| s.to_string()),
        );
        out
    }

    /// Sheet layout: one `Vec<String>` per line, blank lines as empty rows.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let mut out: Vec<Vec<String>> = Vec::new();
        out.push(vec![self.title()]);
        out.push(Vec::new());

        out.push(vec!["Head-to-Head Match".to_string()]);
        match &self.head_to_head {
            HeadToHead::Found(m) => {
                out.push(self.match_row_header());
                out.extend(m.rows.iter().map(ReportRow::cells));
            }
            HeadToHead::NoneFound => out.push(vec!["No head-to-head match found.".to_string()]),
        }
        out.push(Vec::new());

        for section in [&self.team_a_form, &self.team_b_form] {
            out.push(vec![format!(
                "Last {} Matches for {}",
                self.form_limit, section.team
            )]);
            if section.matches.is_empty() {
                out.push(vec![format!("No matches found for {}.", section.team)]);
            } else {
                out.push(self.match_row_header());
                for m in &section.matches {
                    out.extend(m.rows.iter().map(ReportRow::cells));
                    out.push(Vec::new());
                }
            }
            out.push(Vec::new());
        }

        out.push(vec!["Averages".to_string()]);
        for (idx, averages) in [&self.team_a_averages, &self.team_b_averages]
            .into_iter()
            .enumerate()
        {
            if idx > 0 {
                out.push(Vec::new());
            }
            out.push(vec![format!("Averages for {}", averages.team)]);
            for venue in [Perspective::Home, Perspective::Away] {
                let values = averages.venue(venue);
                let mut header = vec!["Venue".to_string(), "Matches".to_string()];
                header.extend(values.columns.iter().cloned());
                out.push(header);
                let mut row = vec![venue.label().to_string(), values.matches.to_string()];
                row.extend(values.formatted_values());
                out.push(row);
            }
        }
        out
    }
}
