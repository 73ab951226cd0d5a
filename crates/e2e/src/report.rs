//! Machine-readable run reports

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use clap::ValueEnum;
use tracing::info;

use crate::error::E2eResult;
use crate::session::{CaseOutcome, CaseStatus};
use crate::suite::SuiteResult;

/// Name of the single `<testsuite>` element
pub const SUITE_NAME: &str = "reporter-e2e";

/// Report format
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// JUnit XML, one file per run
    #[default]
    Junit,
    /// Serialized suite result
    Json,
}

/// Write one report for `result` into `dir` and return its path.
pub fn write_report(result: &SuiteResult, dir: &Path, format: ReportFormat) -> E2eResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let now = Local::now();

    let (path, body) = match format {
        ReportFormat::Junit => {
            let host = hostname::get()
                .map(|h| h.to_string_lossy().into_owned())
                .unwrap_or_else(|_| "localhost".to_string());
            let name = format!("TEST-{}-{}.xml", SUITE_NAME, now.format("%Y%m%d%H%M%S"));
            (dir.join(name), render_junit(result, now, &host))
        }
        ReportFormat::Json => (
            dir.join("test-results.json"),
            serde_json::to_string_pretty(result)?,
        ),
    };

    std::fs::write(&path, body)?;
    info!("Results written to: {}", path.display());
    Ok(path)
}

pub fn render_junit(result: &SuiteResult, timestamp: DateTime<Local>, hostname: &str) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        xml,
        r#"<testsuite name="{}" tests="{}" failures="{}" errors="{}" skipped="{}" time="{}" timestamp="{}" hostname="{}">"#,
        SUITE_NAME,
        result.total,
        result.failed,
        result.errored,
        result.skipped,
        seconds(result.duration_ms),
        timestamp.format("%Y-%m-%dT%H:%M:%S"),
        escape(hostname),
    );

    for case in &result.results {
        render_case(&mut xml, case);
    }

    xml.push_str("</testsuite>\n");
    xml
}

fn render_case(xml: &mut String, case: &CaseOutcome) {
    let _ = write!(
        xml,
        r#"  <testcase classname="{}.{}" name="{}" time="{}""#,
        SUITE_NAME,
        escape(&case.name),
        escape(&case.name),
        seconds(case.duration_ms),
    );

    let (tag, kind) = match case.status {
        CaseStatus::Passed => {
            xml.push_str("/>\n");
            return;
        }
        CaseStatus::Failed => ("failure", "AssertionFailure"),
        CaseStatus::Errored => ("error", "Error"),
        CaseStatus::Skipped => ("skipped", "Skipped"),
    };

    let messages = case.messages();
    let summary = messages.first().map(String::as_str).unwrap_or("");
    let _ = writeln!(xml, ">");
    let _ = writeln!(
        xml,
        r#"    <{tag} type="{kind}" message="{}">{}</{tag}>"#,
        escape(summary),
        escape(&messages.join("\n")),
    );
    xml.push_str("  </testcase>\n");
}

fn seconds(ms: u64) -> String {
    format!("{:.3}", ms as f64 / 1000.0)
}

/// Escape text for attribute or element content, dropping characters XML 1.0
/// does not allow.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}
