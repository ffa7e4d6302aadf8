use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use rust_xlsxwriter::{Workbook, Worksheet};
use serde::Serialize;

use crate::report::Report;

/// `<period>_<team a>_vs_<team b>.xlsx`, e.g. `full_match_man-utd_vs_chelsea.xlsx`.
pub fn report_file_name(report: &Report) -> String {
    let stem = report
        .period
        .map(|p| p.file_stem())
        .unwrap_or_else(|| "report".to_string());
    format!("{stem}_{}_vs_{}.xlsx", report.team_a, report.team_b)
}

pub fn export_report_xlsx(dir: &Path, report: &Report) -> Result<PathBuf> {
    let path = dir.join(report_file_name(report));
    write_report_xlsx(&path, report)?;
    Ok(path)
}

pub fn write_report_xlsx(path: &Path, report: &Report) -> Result<()> {
    let rows = report.to_rows();
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        let name = report.period.map(|p| p.label()).unwrap_or("Report");
        sheet.set_name(name)?;
        write_rows(sheet, &rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(())
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct ReportEnvelope<'a> {
    generated_at: String,
    report: &'a Report,
}

pub fn write_report_json<W: Write>(writer: W, report: &Report) -> Result<()> {
    let envelope = ReportEnvelope {
        generated_at: Utc::now().to_rfc3339(),
        report,
    };
    serde_json::to_writer_pretty(writer, &envelope).context("serialize report")?;
    Ok(())
}
