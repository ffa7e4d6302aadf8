use std::io;

use anyhow::{Context, Result};

use premier_h2h::ReportEngine;
use premier_h2h::corpus_csv;
use premier_h2h::period::Period;
use premier_h2h::report_export::write_report_json;
use premier_h2h::settings::{self, Settings};

// Prints one period's report as JSON. Defaults to the full-match data.
fn main() -> Result<()> {
    settings::load_dotenv();
    settings::init_tracing();

    let settings = Settings::from_env().apply_args(std::env::args().skip(1))?;
    let (team_a, team_b) = settings.teams()?;
    let period = settings
        .periods
        .first()
        .copied()
        .unwrap_or(Period::FullMatch);
    let engine = ReportEngine::new(settings.engine_config()?);

    let rows = corpus_csv::load_period(&settings.data_dir, period)?.with_context(|| {
        format!(
            "no {} file in {}",
            period.csv_file_name(),
            settings.data_dir.display()
        )
    })?;
    let report = engine.report_from_rows(&rows, team_a, team_b)?.with_period(period);

    let stdout = io::stdout();
    write_report_json(stdout.lock(), &report)?;
    println!();
    Ok(())
}
