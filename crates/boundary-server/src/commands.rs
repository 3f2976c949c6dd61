//! Offline runs of the request pipelines on JSON files.
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use boundary_classifiers::handler::{handle_gbdt_request, ErrorEnvelope};

/// Run the tree pipeline on a request file and write the response.
pub fn run_predict(input: &Path, output: Option<&PathBuf>) -> Result<()> {
    let raw = read_request(input)?;
    finish(handle_gbdt_request(&raw), output)
}

/// Run the SVM pipeline on a points file and write the hyperplane.
#[cfg(feature = "svm")]
pub fn run_hyperplane(input: &Path, output: Option<&PathBuf>) -> Result<()> {
    use boundary_classifiers::handler::handle_svm_request;

    let raw = read_request(input)?;
    finish(handle_svm_request(&raw), output)
}

fn read_request(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read request: {}", path.display()))
}

fn finish<T: Serialize>(
    outcome: std::result::Result<T, ErrorEnvelope>,
    output: Option<&PathBuf>,
) -> Result<()> {
    match outcome {
        Ok(payload) => write_json(&payload, output),
        Err(envelope) => {
            let json = serde_json::to_string_pretty(&envelope)?;
            eprintln!("{}", json);
            anyhow::bail!(envelope.detail)
        }
    }
}

/// Pretty-print `value` to `output`, or to stdout when no path is given.
pub fn write_json<T: Serialize>(value: &T, output: Option<&PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => std::fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write output: {}", path.display())),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", json)?;
            Ok(())
        }
    }
}
