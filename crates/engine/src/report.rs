//! HTML report rendering and persistence

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::error::EngineResult;
use crate::executor::{RunResult, RunStatus};

/// Sink for the final run result.
///
/// The engine invokes this exactly once per run, after teardown, whatever
/// the outcome was.
pub trait ReportEmitter {
    fn emit(&self, result: &RunResult) -> EngineResult<()>;
}

/// Writes a self-contained HTML report for one run
pub struct HtmlReport {
    path: PathBuf,
}

impl HtmlReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the report document.
    ///
    /// Total over every valid result, an empty entry list included; only
    /// persisting the rendered document can fail.
    pub fn render(result: &RunResult) -> String {
        let status_color = match result.status {
            RunStatus::Passed => "green",
            RunStatus::Failed => "red",
        };

        let mut body = String::new();
        body.push_str(&format!(
            "    <p><strong>Status:</strong> <span class=\"status\">{}</span></p>\n",
            result.status
        ));
        if let Some(failure) = &result.failure {
            body.push_str(&format!(
                "    <p class=\"error\"><strong>Error:</strong> {}</p>\n",
                escape(failure)
            ));
        }
        for entry in &result.entries {
            body.push_str(&format!(
                "    <p>{} - {}</p>\n",
                entry.timestamp.format("%H:%M:%S"),
                escape(&entry.message)
            ));
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Scenario Report - {name}</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 20px; }}
        h1 {{ color: #333; }}
        .status {{ font-weight: bold; color: {status_color}; }}
        .error {{ color: red; }}
        .generated {{ color: #777; font-size: 0.9em; }}
        p {{ margin: 5px 0; }}
    </style>
</head>
<body>
    <h1>Scenario Report - {name}</h1>
{body}    <p class="generated">Generated: {generated} ({duration} ms)</p>
</body>
</html>
"#,
            name = escape(&result.scenario),
            generated = Local::now().format("%Y-%m-%d %H:%M:%S"),
            duration = result.duration_ms,
        )
    }
}

impl ReportEmitter for HtmlReport {
    fn emit(&self, result: &RunResult) -> EngineResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, Self::render(result))?;
        info!("report written to {}", self.path.display());
        Ok(())
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::LogEntry;
    use chrono::Local;

    fn sample_result(status: RunStatus, failure: Option<&str>, messages: &[&str]) -> RunResult {
        RunResult {
            scenario: "checkout".to_string(),
            status,
            failure: failure.map(String::from),
            entries: messages
                .iter()
                .map(|m| LogEntry {
                    timestamp: Local::now(),
                    message: m.to_string(),
                })
                .collect(),
            duration_ms: 1234,
        }
    }

    #[test]
    fn renders_every_entry_in_order() {
        let result = sample_result(RunStatus::Passed, None, &["one", "two", "three"]);
        let html = HtmlReport::render(&result);
        assert!(html.contains("PASSED"));
        let one = html.find("one").unwrap();
        let two = html.find("two").unwrap();
        let three = html.find("three").unwrap();
        assert!(one < two && two < three);
    }

    #[test]
    fn failed_run_keeps_the_trail_and_the_error() {
        let result = sample_result(
            RunStatus::Failed,
            Some("expected \"Total: $55.97\", found \"Total: $55.98\""),
            &["Logged in", "Added item 1 to the cart"],
        );
        let html = HtmlReport::render(&result);
        assert!(html.contains("FAILED"));
        assert!(html.contains("Total: $55.97"));
        assert!(html.contains("Added item 1 to the cart"));
    }

    #[test]
    fn renders_an_empty_run() {
        let result = sample_result(RunStatus::Failed, Some("setup exploded"), &[]);
        let html = HtmlReport::render(&result);
        assert!(html.contains("setup exploded"));
    }

    #[test]
    fn markup_in_messages_is_escaped() {
        let result = sample_result(RunStatus::Passed, None, &["<script>alert(1)</script>"]);
        let html = HtmlReport::render(&result);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn emit_writes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("checkout-report.html");
        let emitter = HtmlReport::new(&path);
        emitter
            .emit(&sample_result(RunStatus::Passed, None, &["done"]))
            .unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("PASSED"));
        assert!(written.contains("done"));
    }
}
