use tracing::debug;

use crate::averages::{TeamAverages, compute_averages};
use crate::error::IngestError;
use crate::grouping::{MatchGroup, MatchGroups, group_matches};
use crate::lookup::{DEFAULT_FORM_LIMIT, find_last_head_to_head, find_recent_form};
use crate::match_rows::{MatchRow, RawRow, ingest};
use crate::report::{Report, build_report};
use crate::stat_fields::StatSchema;
use crate::team_names::{AliasTable, TeamNormalizer, TeamSlug};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub aliases: AliasTable,
    pub schema: StatSchema,
    pub form_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            aliases: AliasTable::premier_league(),
            schema: StatSchema::default(),
            form_limit: DEFAULT_FORM_LIMIT,
        }
    }
}

/// Read-only reporting pipeline. Holds no per-request state, so one engine
/// can serve concurrent requests against the same corpus.
#[derive(Debug, Clone)]
pub struct ReportEngine {
    normalizer: TeamNormalizer,
    schema: StatSchema,
    form_limit: usize,
}

impl Default for ReportEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ReportEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            normalizer: TeamNormalizer::new(config.aliases),
            schema: config.schema,
            form_limit: config.form_limit,
        }
    }

    pub fn schema(&self) -> &StatSchema {
        &self.schema
    }

    pub fn form_limit(&self) -> usize {
        self.form_limit
    }

    pub fn normalize(&self, raw: &str) -> TeamSlug {
        self.normalizer.normalize(raw)
    }

    pub fn ingest(&self, rows: &[RawRow]) -> Result<Vec<MatchRow>, IngestError> {
        ingest(rows, &self.normalizer, &self.schema)
    }

    /// Ingest + group in one step.
    pub fn load(&self, rows: &[RawRow]) -> Result<MatchGroups, IngestError> {
        Ok(group_matches(self.ingest(rows)?))
    }

    pub fn head_to_head<'a>(
        &self,
        groups: &'a MatchGroups,
        team_a: &str,
        team_b: &str,
    ) -> Option<&'a MatchGroup> {
        find_last_head_to_head(groups, &self.normalize(team_a), &self.normalize(team_b))
    }

    pub fn recent_form<'a>(&self, groups: &'a MatchGroups, team: &str) -> Vec<&'a MatchGroup> {
        find_recent_form(groups, &self.normalize(team), self.form_limit)
    }

    pub fn averages(&self, groups: &MatchGroups, team: &str) -> TeamAverages {
        compute_averages(groups, &self.normalize(team), &self.schema)
    }

    pub fn build_report(&self, groups: &MatchGroups, team_a: &str, team_b: &str) -> Report {
        let a = self.normalize(team_a);
        let b = self.normalize(team_b);
        debug!(team_a = %a, team_b = %b, fixtures = groups.len(), "building report");
        build_report(groups, &a, &b, &self.schema, self.form_limit)
    }

    pub fn report_from_rows(
        &self,
        rows: &[RawRow],
        team_a: &str,
        team_b: &str,
    ) -> Result<Report, IngestError> {
        let groups = self.load(rows)?;
        Ok(self.build_report(&groups, team_a, team_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, team: &str, opp: &str) -> RawRow {
        RawRow::new()
            .with("match_id", id)
            .with("team", team)
            .with("opponent", opp)
            .with("RESULT", "1–1")
    }

    #[test]
    fn raw_names_are_normalized_at_the_boundary() {
        let engine = ReportEngine::default();
        let groups = engine
            .load(&[
                row("5", "Manchester United", "Chelsea"),
                row("5", "Chelsea", "Manchester Utd"),
            ])
            .unwrap();
        assert!(engine.head_to_head(&groups, "man utd", "CHELSEA").is_some());
        assert_eq!(engine.recent_form(&groups, "Manchester Utd").len(), 1);
        assert_eq!(engine.averages(&groups, "Man Utd").home.matches, 1);
    }

    #[test]
    fn engines_with_different_aliases_coexist() {
        let custom = ReportEngine::new(EngineConfig {
            aliases: AliasTable::from_pairs([("the blues", "chelsea")]).unwrap(),
            form_limit: 1,
            ..EngineConfig::default()
        });
        let stock = ReportEngine::default();
        assert_eq!(custom.normalize("The Blues"), "chelsea");
        assert_eq!(stock.normalize("The Blues"), "the-blues");
        assert_eq!(custom.normalize("Manchester Utd"), "manchester-utd");
        assert_eq!(custom.form_limit(), 1);
    }
}
