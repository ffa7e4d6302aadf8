use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{error, info};

use premier_h2h::corpus_csv;
use premier_h2h::period::Period;
use premier_h2h::report_export;
use premier_h2h::settings::{self, Settings};
use premier_h2h::{Report, ReportEngine};

struct PeriodOutcome {
    period: Period,
    path: PathBuf,
    report: Report,
}

fn main() -> Result<()> {
    settings::load_dotenv();
    settings::init_tracing();

    let settings = Settings::from_env().apply_args(std::env::args().skip(1))?;
    let (team_a, team_b) = settings.teams()?;
    let engine = ReportEngine::new(settings.engine_config()?);

    fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "failed creating output dir {}",
            settings.output_dir.display()
        )
    })?;

    // Periods share nothing but the engine, so they run side by side.
    let results = settings
        .periods
        .par_iter()
        .map(|period| {
            let outcome = run_period(&engine, &settings, *period, team_a, team_b);
            (*period, outcome)
        })
        .collect::<Vec<_>>();

    let written = finish_periods(results, &settings.data_dir)?;
    info!(written, "done");
    Ok(())
}

/// Prints every written report, then fails if any period failed or nothing
/// was written at all.
fn finish_periods(
    results: Vec<(Period, Result<Option<PeriodOutcome>>)>,
    data_dir: &Path,
) -> Result<usize> {
    let mut written = 0usize;
    let mut failed = Vec::new();
    for (period, result) in results {
        match result {
            Ok(Some(outcome)) => {
                written += 1;
                print_summary(&outcome);
            }
            Ok(None) => {}
            Err(err) => {
                error!("{err:#}");
                failed.push(period.label());
            }
        }
    }

    if !failed.is_empty() {
        anyhow::bail!(
            "{} of {} period reports failed: {}",
            failed.len(),
            written + failed.len(),
            failed.join(", ")
        );
    }
    if written == 0 {
        anyhow::bail!(
            "no reports written; expected period files in {}",
            data_dir.display()
        );
    }
    Ok(written)
}

fn run_period(
    engine: &ReportEngine,
    settings: &Settings,
    period: Period,
    team_a: &str,
    team_b: &str,
) -> Result<Option<PeriodOutcome>> {
    let Some(rows) = corpus_csv::load_period(&settings.data_dir, period)? else {
        return Ok(None);
    };
    let report = engine
        .report_from_rows(&rows, team_a, team_b)
        .with_context(|| format!("{period} data is malformed"))?
        .with_period(period);
    let path = report_export::export_report_xlsx(&settings.output_dir, &report)?;
    Ok(Some(PeriodOutcome {
        period,
        path,
        report,
    }))
}

fn print_summary(outcome: &PeriodOutcome) {
    let report = &outcome.report;
    println!("{} report: {}", outcome.period, outcome.path.display());
    match report.head_to_head.found() {
        Some(m) => println!("  head-to-head: match {}", m.match_id),
        None => println!("  head-to-head: none found"),
    }
    for form in [&report.team_a_form, &report.team_b_form] {
        println!("  {} form: {} matches", form.team, form.matches.len());
    }
    for averages in [&report.team_a_averages, &report.team_b_averages] {
        println!(
            "  {} averages: {} home / {} away",
            averages.team, averages.home.matches, averages.away.matches
        );
    }
}
