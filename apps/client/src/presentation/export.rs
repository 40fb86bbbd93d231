//! Exported artifacts: the JSON download and the clipboard summary.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::analytics::format::{format_lakhs, format_number, ordinal};
use crate::analytics::percentile::clamp_percentile;
use crate::errors::AppError;
use crate::models::analysis::PercentileResult;
use crate::models::AnalyzeResult;

/// Pretty-printed JSON of the full result, as offered for download. The
/// service's response is exported verbatim when it is available.
pub fn export_json(result: &AnalyzeResult) -> Result<String, AppError> {
    let json = match result.raw() {
        Some(body) => serde_json::to_string_pretty(body)?,
        None => serde_json::to_string_pretty(result)?,
    };
    Ok(json)
}

/// `fairdeal-analysis-20261016-142501.json`
pub fn export_file_name(at: DateTime<Utc>) -> String {
    format!("fairdeal-analysis-{}.json", at.format("%Y%m%d-%H%M%S"))
}

/// Writes the JSON export into `dir` and returns the file's path.
pub async fn write_export(dir: &Path, result: &AnalyzeResult) -> Result<PathBuf, AppError> {
    let json = export_json(result)?;
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(export_file_name(Utc::now()));
    tokio::fs::write(&path, json).await?;
    info!(path = %path.display(), "analysis exported");
    Ok(path)
}

/// Fixed-template plain-text summary for the clipboard.
pub fn clipboard_summary(result: &AnalyzeResult) -> String {
    let salary = match result.extraction.salary() {
        Some(amount) => format!(
            "{}{}",
            format_lakhs(amount),
            percentile_suffix(result.percentiles.salary.as_ref())
        ),
        None => "Not available".to_string(),
    };
    let notice = match result.extraction.notice_days() {
        Some(days) => format!(
            "{} days{}",
            format_number(days),
            percentile_suffix(result.percentiles.notice_period.as_ref())
        ),
        None => "Not available".to_string(),
    };

    format!(
        "FairDeal Contract Analysis: {title}\n\
         Score: {score}/100 ({grade})\n\
         Salary: {salary}\n\
         Notice period: {notice}\n\
         Red flags: {flags}\n",
        title = result.title(),
        score = format_number(result.scoring.overall_score),
        grade = result.scoring.grade.as_str(),
        flags = result.red_flags.len(),
    )
}

fn percentile_suffix(percentile: Option<&PercentileResult>) -> String {
    percentile
        .map(|p| {
            format!(
                " ({} percentile)",
                ordinal(clamp_percentile(p.value).round() as u32)
            )
        })
        .unwrap_or_default()
}
