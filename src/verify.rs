//! Data Source Verification Module
//!
//! Checks every registered reporting period against the configured CSV
//! source to see which period files are reachable and contain data.
//!
//! Run this before publishing to catch missing or empty period files.

use chrono::Utc;
use serde::Serialize;

use crate::chart::select_value_column;
use crate::ingest::fetch::{fetch_csv, CsvSource};
use crate::periods::{Period, PERIOD_REGISTRY};

// ============================================================================
// Verification Results
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub timestamp: String,
    pub periods: Vec<PeriodVerification>,
    pub summary: VerificationSummary,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub working: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodVerification {
    pub name: String,
    pub status: VerificationStatus,
    pub row_count: usize,
    pub header_count: usize,
    pub chart_column: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum VerificationStatus {
    Success,
    PartialSuccess,
    Failed,
}

// ============================================================================
// Period Verification
// ============================================================================

pub fn verify_period(
    client: &reqwest::blocking::Client,
    source: &CsvSource,
    period: &Period,
) -> PeriodVerification {
    let mut result = PeriodVerification {
        name: period.name.to_string(),
        status: VerificationStatus::Failed,
        row_count: 0,
        header_count: 0,
        chart_column: None,
        error_message: None,
    };

    match fetch_csv(client, source, period.name) {
        Ok(dataset) => {
            result.row_count = dataset.len();
            result.header_count = dataset.headers.len();
            result.chart_column = select_value_column(&dataset.headers, None);
            result.status = if dataset.is_empty() {
                VerificationStatus::PartialSuccess
            } else {
                VerificationStatus::Success
            };
        }
        Err(e) => {
            result.error_message = Some(e.to_string());
        }
    }

    result
}

pub fn verify_all(client: &reqwest::blocking::Client, source: &CsvSource) -> VerificationReport {
    let mut report = VerificationReport {
        timestamp: Utc::now().to_rfc3339(),
        periods: Vec::new(),
        summary: VerificationSummary {
            total: PERIOD_REGISTRY.len(),
            ..Default::default()
        },
    };

    for period in PERIOD_REGISTRY {
        let result = verify_period(client, source, period);
        match result.status {
            VerificationStatus::Success | VerificationStatus::PartialSuccess => {
                report.summary.working += 1
            }
            VerificationStatus::Failed => report.summary.failed += 1,
        }
        report.periods.push(result);
    }

    report
}

pub fn print_summary(report: &VerificationReport) {
    println!("\n═══════════════════════════════════════════════════════════");
    println!("📊 PERIOD FILE VERIFICATION");
    println!("═══════════════════════════════════════════════════════════");
    for result in &report.periods {
        match result.status {
            VerificationStatus::Success => println!(
                "  {:<16} ✓ OK ({} rows, chart column {:?})",
                result.name, result.row_count, result.chart_column
            ),
            VerificationStatus::PartialSuccess => {
                println!("  {:<16} ⚠ Loaded but empty", result.name)
            }
            VerificationStatus::Failed => println!(
                "  {:<16} ✗ FAILED: {}",
                result.name,
                result.error_message.as_deref().unwrap_or("Unknown")
            ),
        }
    }
    println!();
    println!(
        "Periods: {}/{} working ({} failed)",
        report.summary.working, report.summary.total, report.summary.failed
    );
    println!("═══════════════════════════════════════════════════════════");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::periods::find_period;

    #[test]
    fn test_verify_reports_success_partial_and_failure() {
        let dir = std::env::temp_dir().join(format!("rainfall_verify_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("june.csv"), "District,Actual (mm)\nPune,100\n").unwrap();
        std::fs::write(dir.join("july.csv"), "District,Actual (mm)\n").unwrap();

        let client = reqwest::blocking::Client::new();
        let source = CsvSource::Local { dir: dir.clone() };
        let report = verify_all(&client, &source);

        assert_eq!(report.summary.total, 5);
        assert_eq!(report.summary.working, 2);
        assert_eq!(report.summary.failed, 3);

        let june = &report.periods[0];
        assert_eq!(june.status, VerificationStatus::Success);
        assert_eq!(june.chart_column.as_deref(), Some("Actual (mm)"));
        assert_eq!(report.periods[1].status, VerificationStatus::PartialSuccess);

        let august = verify_period(&client, &source, find_period("august").unwrap());
        assert_eq!(august.status, VerificationStatus::Failed);
        assert!(august.error_message.unwrap().contains("august.csv"));

        let json = serde_json::to_string(&report).expect("report should serialize");
        assert!(json.contains("\"PartialSuccess\""));

        std::fs::remove_dir_all(&dir).ok();
    }
}
