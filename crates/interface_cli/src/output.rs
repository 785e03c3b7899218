//! Console rendering of batch outcomes

use std::io::{self, Write};

use domain_claims::ClaimReport;

use crate::batch::DocumentOutcome;

/// Writes the banner and pretty-printed report for one document
pub fn render_report<W: Write>(out: &mut W, name: &str, report: &ClaimReport) -> io::Result<()> {
    writeln!(out, "-------------Result for: {}--------------", name)?;
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}

/// Writes a success report or a single failure line
pub fn render_outcome<W: Write>(out: &mut W, outcome: &DocumentOutcome) -> io::Result<()> {
    match &outcome.result {
        Ok(report) => render_report(out, &outcome.name, report),
        Err(error) => writeln!(out, "FAILED {}: {}", outcome.name, error),
    }
}
