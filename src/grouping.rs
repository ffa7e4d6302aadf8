use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::match_rows::{MatchId, MatchRow};
use crate::team_names::TeamSlug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Perspective {
    Home,
    Away,
}

impl Perspective {
    pub fn label(self) -> &'static str {
        match self {
            Perspective::Home => "Home",
            Perspective::Away => "Away",
        }
    }
}

impl fmt::Display for Perspective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Both sides of one fixture. The first row scraped for a match id is the
/// home side; the away side may be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchGroup {
    pub home: MatchRow,
    pub away: Option<MatchRow>,
}

impl MatchGroup {
    pub fn match_id(&self) -> &MatchId {
        &self.home.match_id
    }

    pub fn home_team(&self) -> &TeamSlug {
        &self.home.team
    }

    pub fn away_team(&self) -> Option<&TeamSlug> {
        self.away.as_ref().map(|row| &row.team)
    }

    /// Which side `team` played on, home taking precedence.
    pub fn side_of(&self, team: &TeamSlug) -> Option<Perspective> {
        if self.home_team() == team {
            Some(Perspective::Home)
        } else if self.away_team() == Some(team) {
            Some(Perspective::Away)
        } else {
            None
        }
    }

    pub fn involves(&self, team: &TeamSlug) -> bool {
        self.side_of(team).is_some()
    }

    pub fn is_between(&self, a: &TeamSlug, b: &TeamSlug) -> bool {
        let Some(away) = self.away_team() else {
            return false;
        };
        let home = self.home_team();
        (home == a && away == b) || (home == b && away == a)
    }

    pub fn row(&self, side: Perspective) -> Option<&MatchRow> {
        match side {
            Perspective::Home => Some(&self.home),
            Perspective::Away => self.away.as_ref(),
        }
    }

    /// Rows in display order, tagged with their side.
    pub fn rows(&self) -> impl Iterator<Item = (Perspective, &MatchRow)> {
        std::iter::once((Perspective::Home, &self.home))
            .chain(self.away.iter().map(|row| (Perspective::Away, row)))
    }
}

/// Fixtures keyed by match id, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct MatchGroups {
    groups: Vec<MatchGroup>,
    index: HashMap<MatchId, usize>,
    dropped_rows: usize,
}

impl MatchGroups {
    pub fn get(&self, id: &str) -> Option<&MatchGroup> {
        self.index
            .get(&MatchId::new(id))
            .and_then(|idx| self.groups.get(*idx))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Rows beyond the second one for a match id.
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }
}

impl<'a> IntoIterator for &'a MatchGroups {
    type Item = &'a MatchGroup;
    type IntoIter = std::slice::Iter<'a, MatchGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

pub fn group_matches(rows: Vec<MatchRow>) -> MatchGroups {
    let mut out = MatchGroups::default();
    for row in rows {
        if let Some(&idx) = out.index.get(&row.match_id) {
            let group = &mut out.groups[idx];
            if group.away.is_none() {
                group.away = Some(row);
            } else {
                warn!(match_id = %row.match_id, team = %row.team, "extra row for match ignored");
                out.dropped_rows += 1;
            }
            continue;
        }
        if row.match_id.numeric().is_none() {
            warn!(match_id = %row.match_id, "non-numeric match id ranks as least recent");
        }
        out.index.insert(row.match_id.clone(), out.groups.len());
        out.groups.push(MatchGroup {
            home: row,
            away: None,
        });
    }
    debug!(
        groups = out.groups.len(),
        dropped = out.dropped_rows,
        "grouped match rows"
    );
    out
}
