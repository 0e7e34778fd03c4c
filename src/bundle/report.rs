//! Human-readable batch summaries
//!
//! Rendering only; every number comes from a finalized [`RunSummary`].

use std::fmt::Write;

use super::executor::Operation;
use crate::parallel::RunSummary;

/// Width of the label column in summary tables
const LABEL_WIDTH: usize = 22;

/// One `Failed to <verb> '<name>'` line per failed item, in recorded order
pub fn render_failures(operation: Operation, summary: &RunSummary) -> String {
    let mut out = String::new();
    for name in &summary.failed_names {
        let _ = writeln!(out, "Failed to {} '{}'", operation.verb(), name);
    }
    out
}

/// Summary table for a bundling run
pub fn render_bundle_summary(summary: &RunSummary, workers: usize) -> String {
    let mut out = String::from("Summary:\n");
    row(&mut out, "Total repositories:", summary.total);
    row(&mut out, "Successfully bundled:", summary.succeeded);
    row(&mut out, "Failed:", summary.failed);
    row(&mut out, "Parallel jobs used:", workers);
    out
}

/// Summary table for a restore run
pub fn render_restore_summary(summary: &RunSummary) -> String {
    let mut out = String::from("Restore Summary:\n");
    row(&mut out, "Total bundles:", summary.total);
    row(&mut out, "Successfully restored:", summary.succeeded);
    row(&mut out, "Failed:", summary.failed);
    out
}

fn row(out: &mut String, label: &str, value: usize) {
    let _ = writeln!(out, "    {label:<LABEL_WIDTH$} {value}");
}
