use std::path::PathBuf;

use approx::assert_relative_eq;

use premier_h2h::corpus_csv::{load_csv, load_period};
use premier_h2h::grouping::Perspective;
use premier_h2h::match_rows::RawRow;
use premier_h2h::period::Period;
use premier_h2h::report::{HeadToHead, TeamFlag};
use premier_h2h::report_export::{export_report_xlsx, report_file_name, write_report_json};
use premier_h2h::stat_fields::{GOALS_CONCEDED, GOALS_SCORED};
use premier_h2h::{IngestError, ReportEngine};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn fixtures_dir() -> PathBuf {
    fixture_path("")
}

#[test]
fn four_fixture_corpus_report() {
    let engine = ReportEngine::default();
    let rows = load_csv(&fixture_path("matches_ALL.csv")).expect("fixture should load");
    let report = engine
        .report_from_rows(&rows, "Man Utd", "Chelsea")
        .expect("fixture rows are well formed")
        .with_period(Period::FullMatch);

    assert_eq!(report.team_a, "man-utd");
    assert_eq!(report.team_b, "chelsea");

    let HeadToHead::Found(h2h) = &report.head_to_head else {
        panic!("expected a head-to-head match");
    };
    assert_eq!(h2h.match_id, "104");
    assert_eq!(h2h.rows.len(), 2);
    assert_eq!(h2h.rows[0].team, "chelsea");
    assert_eq!(h2h.rows[0].perspective, Perspective::Home);
    assert_eq!(h2h.rows[1].adjusted_result, "2–1");
    assert!(h2h.rows.iter().all(|r| r.team_perspective == TeamFlag::Unset));

    for form in [&report.team_a_form, &report.team_b_form] {
        let ids: Vec<_> = form.matches.iter().map(|m| m.match_id.as_str()).collect();
        assert_eq!(ids, vec!["104", "103", "102", "101"]);
    }
    let flags: Vec<_> = report.team_a_form.matches[0]
        .rows
        .iter()
        .map(|r| r.team_perspective)
        .collect();
    assert_eq!(flags, vec![TeamFlag::No, TeamFlag::Yes]);

    let mu = &report.team_a_averages;
    assert_eq!(mu.home.matches, 2);
    assert_eq!(mu.away.matches, 2);
    assert_relative_eq!(mu.home.get(GOALS_SCORED).unwrap(), 1.5);
    assert_relative_eq!(mu.home.get(GOALS_CONCEDED).unwrap(), 2.0);
    assert_relative_eq!(mu.home.get("Ball possession").unwrap(), 51.5);
    assert_relative_eq!(mu.home.get("Expected goals").unwrap(), 1.4, epsilon = 1e-9);
    assert_relative_eq!(mu.home.get("Accurate passes").unwrap(), 390.0);
    assert_relative_eq!(mu.home.get("Yellow cards").unwrap(), 1.5);
    assert_relative_eq!(mu.away.get(GOALS_SCORED).unwrap(), 1.0);
    assert_relative_eq!(mu.away.get(GOALS_CONCEDED).unwrap(), 0.5);
    assert_relative_eq!(mu.away.get("Ball possession").unwrap(), 45.0);
    assert_relative_eq!(mu.away.get("Expected goals").unwrap(), 0.9, epsilon = 1e-9);
    assert_relative_eq!(mu.away.get("Yellow cards").unwrap(), 3.0);

    let che = &report.team_b_averages;
    assert_relative_eq!(che.home.get(GOALS_SCORED).unwrap(), 0.5);
    assert_relative_eq!(che.home.get(GOALS_CONCEDED).unwrap(), 1.0);
    assert_relative_eq!(che.home.get("Accurate passes").unwrap(), 460.0);
    assert_relative_eq!(che.home.get("Yellow cards").unwrap(), 0.0);
    assert_relative_eq!(che.away.get(GOALS_SCORED).unwrap(), 2.0);
    assert_relative_eq!(che.away.get(GOALS_CONCEDED).unwrap(), 1.5);
    assert_relative_eq!(che.away.get("Expected goals").unwrap(), 1.7, epsilon = 1e-9);
    assert_relative_eq!(che.away.get("Shots on target").unwrap(), 0.0);
}

#[test]
fn averages_table_is_rendered_with_two_decimals() {
    let engine = ReportEngine::default();
    let rows = load_csv(&fixture_path("matches_ALL.csv")).unwrap();
    let report = engine
        .report_from_rows(&rows, "Manchester United", "Chelsea")
        .unwrap()
        .with_period(Period::FullMatch);
    let table = report.to_rows();

    assert_eq!(table[0], vec!["Full Match Analysis"]);
    let header_idx = table
        .iter()
        .position(|r| r.first().map(String::as_str) == Some("Venue"))
        .expect("averages header");
    let header = &table[header_idx];
    assert_eq!(&header[..4], &["Venue", "Matches", GOALS_SCORED, GOALS_CONCEDED]);
    assert_eq!(header.len(), 2 + 2 + engine.schema().len());
    assert_eq!(header[4], "Accurate passes");

    let home = &table[header_idx + 1];
    assert_eq!(&home[..4], &["Home", "2", "1.50", "2.00"]);
    assert_eq!(home.len(), header.len());
}

#[test]
fn first_half_file_tolerates_sentinels_and_short_rows() {
    let engine = ReportEngine::default();
    let rows = load_period(&fixtures_dir(), Period::FirstHalf)
        .unwrap()
        .expect("first half fixture exists");
    let groups = engine.load(&rows).unwrap();
    assert_eq!(groups.len(), 2);
    assert!(groups.get("202").unwrap().away.is_none());

    let report = engine.build_report(&groups, "Arsenal", "Chelsea");
    let h2h = report.head_to_head.found().expect("201 is a head-to-head");
    assert_eq!(h2h.rows[1].adjusted_result, "0–0");

    // 202 only has a home row for Wolves, so it never counts for Arsenal.
    let arsenal = &report.team_a_averages;
    assert_eq!(arsenal.home.matches, 1);
    assert_eq!(arsenal.away.matches, 0);
    let ids: Vec<_> = report
        .team_a_form
        .matches
        .iter()
        .map(|m| m.match_id.as_str())
        .collect();
    assert_eq!(ids, vec!["201"]);
}

#[test]
fn missing_period_file_is_not_an_error() {
    assert!(
        load_period(&fixtures_dir(), Period::SecondHalf)
            .unwrap()
            .is_none()
    );
}

#[test]
fn rows_without_match_id_are_rejected() {
    let engine = ReportEngine::default();
    let rows = load_csv(&fixture_path("missing_match_id.csv")).unwrap();
    let err = engine.report_from_rows(&rows, "Arsenal", "Chelsea").unwrap_err();
    assert!(matches!(err, IngestError::MissingField { row: 0, field: "match_id" }));
}

#[test]
fn exports_workbook_and_json() {
    let engine = ReportEngine::default();
    let rows = load_csv(&fixture_path("matches_ALL.csv")).unwrap();
    let report = engine
        .report_from_rows(&rows, "Man Utd", "Chelsea")
        .unwrap()
        .with_period(Period::FullMatch);
    assert_eq!(report_file_name(&report), "full_match_man-utd_vs_chelsea.xlsx");

    let dir = std::env::temp_dir().join(format!("premier_h2h_export_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = export_report_xlsx(&dir, &report).expect("workbook should save");
    assert!(path.exists());
    let _ = std::fs::remove_dir_all(&dir);

    let mut buf = Vec::new();
    write_report_json(&mut buf, &report).unwrap();
    let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(v["report"]["team_a"], "man-utd");
    assert_eq!(v["report"]["head_to_head"]["status"], "found");
    assert_eq!(v["report"]["head_to_head"]["match"]["match_id"], "104");
    assert!(v["generated_at"].is_string());
}

#[test]
fn json_averages_are_rounded_to_two_decimals() {
    let mut rows = Vec::new();
    for (id, result) in [("1", "1–0"), ("2", "0–2"), ("3", "0–1")] {
        for (team, opponent) in [("Arsenal", "Chelsea"), ("Chelsea", "Arsenal")] {
            rows.push(
                RawRow::new()
                    .with("match_id", id)
                    .with("team", team)
                    .with("opponent", opponent)
                    .with("RESULT", result),
            );
        }
    }
    let report = ReportEngine::default()
        .report_from_rows(&rows, "Arsenal", "Chelsea")
        .unwrap();
    assert_relative_eq!(report.team_a_averages.home.values[0], 1.0 / 3.0);

    let mut buf = Vec::new();
    write_report_json(&mut buf, &report).unwrap();
    let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    let home = &v["report"]["team_a_averages"]["home"];
    assert_eq!(home["matches"], 3);
    assert_eq!(home["values"][0], 0.33);
    assert_eq!(home["values"][1], 1.0);
    let away = &v["report"]["team_b_averages"]["away"];
    assert_eq!(away["values"][0], 1.0);
    assert_eq!(away["values"][1], 0.33);
}
