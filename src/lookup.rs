use crate::grouping::{MatchGroup, MatchGroups};
use crate::team_names::TeamSlug;

pub const DEFAULT_FORM_LIMIT: usize = 5;

// Recency is taken from the match id ordering; the scraped rows carry no
// kickoff time.

/// Most recent fixture between `a` and `b`, in either orientation.
pub fn find_last_head_to_head<'a>(
    groups: &'a MatchGroups,
    a: &TeamSlug,
    b: &TeamSlug,
) -> Option<&'a MatchGroup> {
    groups
        .iter()
        .filter(|group| group.is_between(a, b))
        .max_by(|x, y| x.match_id().cmp(y.match_id()))
}

/// Up to `limit` fixtures involving `team`, newest first.
pub fn find_recent_form<'a>(
    groups: &'a MatchGroups,
    team: &TeamSlug,
    limit: usize,
) -> Vec<&'a MatchGroup> {
    let mut out: Vec<&MatchGroup> = groups.iter().filter(|g| g.involves(team)).collect();
    out.sort_by(|x, y| y.match_id().cmp(x.match_id()));
    out.truncate(limit);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group_matches;
    use crate::match_rows::{RawRow, ingest};
    use crate::stat_fields::StatSchema;
    use crate::team_names::{AliasTable, TeamNormalizer};

    fn normalizer() -> TeamNormalizer {
        TeamNormalizer::new(AliasTable::premier_league())
    }

    fn fixtures(plan: &[(&str, &str, &str)]) -> MatchGroups {
        let mut raw = Vec::new();
        for (id, home, away) in plan {
            for (team, opp) in [(home, away), (away, home)] {
                raw.push(
                    RawRow::new()
                        .with("match_id", *id)
                        .with("team", *team)
                        .with("opponent", *opp)
                        .with("RESULT", "1–0"),
                );
            }
        }
        group_matches(ingest(&raw, &normalizer(), &StatSchema::default()).unwrap())
    }

    fn ids(groups: &[&MatchGroup]) -> Vec<String> {
        groups.iter().map(|g| g.match_id().to_string()).collect()
    }

    #[test]
    fn head_to_head_picks_greatest_id() {
        let groups = fixtures(&[
            ("20", "Arsenal", "Chelsea"),
            ("30", "Chelsea", "Arsenal"),
            ("10", "Arsenal", "Chelsea"),
            ("40", "Arsenal", "Everton"),
        ]);
        let n = normalizer();
        let found =
            find_last_head_to_head(&groups, &n.normalize("Arsenal"), &n.normalize("Chelsea"))
                .unwrap();
        assert_eq!(found.match_id().as_str(), "30");
        let swapped =
            find_last_head_to_head(&groups, &n.normalize("chelsea"), &n.normalize("arsenal"))
                .unwrap();
        assert_eq!(swapped.match_id().as_str(), "30");
    }

    #[test]
    fn head_to_head_compares_ids_numerically() {
        let groups = fixtures(&[("9", "Arsenal", "Chelsea"), ("10", "Arsenal", "Chelsea")]);
        let n = normalizer();
        let found =
            find_last_head_to_head(&groups, &n.normalize("Arsenal"), &n.normalize("Chelsea"))
                .unwrap();
        assert_eq!(found.match_id().as_str(), "10");
    }

    #[test]
    fn head_to_head_none_when_never_met() {
        let groups = fixtures(&[("1", "Arsenal", "Chelsea")]);
        let n = normalizer();
        assert!(
            find_last_head_to_head(&groups, &n.normalize("Arsenal"), &n.normalize("Wolves"))
                .is_none()
        );
    }

    #[test]
    fn form_is_newest_first_and_capped() {
        let groups = fixtures(&[
            ("1", "Arsenal", "Chelsea"),
            ("2", "Wolves", "Arsenal"),
            ("3", "Arsenal", "Everton"),
            ("4", "Fulham", "Chelsea"),
            ("5", "Arsenal", "Fulham"),
            ("6", "Brentford", "Arsenal"),
            ("7", "Arsenal", "Liverpool"),
            ("8", "Arsenal", "Brighton"),
        ]);
        let n = normalizer();
        let arsenal = n.normalize("Arsenal");
        let form = find_recent_form(&groups, &arsenal, DEFAULT_FORM_LIMIT);
        assert_eq!(ids(&form), vec!["8", "7", "6", "5", "3"]);

        let chelsea = n.normalize("Chelsea");
        let form = find_recent_form(&groups, &chelsea, DEFAULT_FORM_LIMIT);
        assert_eq!(ids(&form), vec!["4", "1"]);
    }

    #[test]
    fn form_for_unknown_team_is_empty() {
        let groups = fixtures(&[("1", "Arsenal", "Chelsea")]);
        let n = normalizer();
        assert!(find_recent_form(&groups, &n.normalize("Luton Town"), 5).is_empty());
        assert!(find_recent_form(&groups, &n.normalize("Arsenal"), 0).is_empty());
    }
}
