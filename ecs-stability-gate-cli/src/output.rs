//! Reporting to the CI host: named outputs and failure annotations.

use anyhow::{Context, Result};
use ecs_stability_gate_core::Outcome;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Name of the output carrying the attempt count.
pub const RETRIES_OUTPUT: &str = "retries";

pub struct Reporter {
    output_file: Option<PathBuf>,
    annotate: bool,
}

impl Reporter {
    /// Read `GITHUB_OUTPUT` and `GITHUB_ACTIONS` from the environment.
    pub fn from_env() -> Self {
        Self {
            output_file: std::env::var_os("GITHUB_OUTPUT")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            annotate: std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true"),
        }
    }

    /// Set the `retries` output when the outcome is a success; no-op otherwise.
    pub fn report_success(&self, outcome: &Outcome) -> Result<()> {
        let Some(value) = outcome.retries_output() else {
            return Ok(());
        };
        let line = format!("{RETRIES_OUTPUT}={value}");

        match &self.output_file {
            Some(path) => {
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open output file {}", path.display()))?;
                writeln!(file, "{line}")
                    .with_context(|| format!("Failed to write output file {}", path.display()))?;
            }
            None => println!("{line}"),
        }
        Ok(())
    }

    /// Emit a failure annotation when running under the CI host.
    pub fn report_failure(&self, message: &str) {
        if self.annotate {
            println!("::error::{}", escape_annotation(message));
        }
    }
}

/// Escape a workflow command message so it stays on one line.
fn escape_annotation(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_success_appends_to_output_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("output");
        std::fs::write(&path, "previous=1\n").expect("seed output file");

        let reporter = Reporter {
            output_file: Some(path.clone()),
            annotate: false,
        };
        reporter
            .report_success(&Outcome::Stable { attempts: 2 })
            .expect("write succeeds");

        let contents = std::fs::read_to_string(&path).expect("read output file");
        assert_eq!(contents, "previous=1\nretries=2\n");
    }

    #[test]
    fn test_report_success_skips_failed_outcomes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("output");

        let reporter = Reporter {
            output_file: Some(path.clone()),
            annotate: false,
        };
        reporter
            .report_success(&Outcome::Unstable {
                attempts: 3,
                max_retries: 2,
            })
            .expect("nothing to write");

        assert!(!path.exists());
    }

    #[test]
    fn test_report_success_fails_on_unwritable_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let reporter = Reporter {
            output_file: Some(dir.path().join("missing").join("output")),
            annotate: false,
        };
        let err = reporter
            .report_success(&Outcome::Stable { attempts: 1 })
            .expect_err("parent directory does not exist");
        assert!(err.to_string().contains("Failed to open output file"));
    }

    #[test]
    fn test_escape_annotation() {
        assert_eq!(
            escape_annotation("100% broken\r\nsecond line"),
            "100%25 broken%0D%0Asecond line"
        );
    }
}
