use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::match_rows::RawRow;
use crate::period::Period;

/// Reads a scraped statistics CSV (header row + one row per team per match).
pub fn read_raw_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()
        .context("missing csv header row")?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut out = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("invalid csv record {}", idx + 1))?;
        let row = RawRow::from_pairs(
            headers
                .iter()
                .zip(record.iter())
                .map(|(name, value)| (name.clone(), value.to_string())),
        );
        out.push(row);
    }
    Ok(out)
}

pub fn load_csv(path: &Path) -> Result<Vec<RawRow>> {
    let file = File::open(path).with_context(|| format!("failed opening {}", path.display()))?;
    let rows = read_raw_rows(file).with_context(|| format!("failed reading {}", path.display()))?;
    debug!(path = %path.display(), rows = rows.len(), "loaded csv");
    Ok(rows)
}

/// Rows for one period from `dir/matches_<CODE>.csv`; `None` when the
/// period was never scraped.
pub fn load_period(dir: &Path, period: Period) -> Result<Option<Vec<RawRow>>> {
    let path = dir.join(period.csv_file_name());
    if !path.exists() {
        warn!(period = %period, path = %path.display(), "no data file for period");
        return Ok(None);
    }
    load_csv(&path).map(Some)
}
