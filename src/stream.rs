//! Building operations from a JSON Lines stream of descriptors.

use crate::config::BuildConfig;
use crate::operations::OperationBuilder;
use anyhow::Context;
use opdesc_json::descriptor_from_str;
use std::io::{BufRead, Write};

/// A descriptor that failed to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFailure {
    /// 1-based line number in the input
    pub line: usize,
    pub message: String,
}

/// Outcome of processing one stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub built: usize,
    pub failures: Vec<LineFailure>,
}

impl BuildSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Read one descriptor per line from `input`, build it, and write the
/// built operation as one JSON object per line to `output`.
///
/// Blank lines are skipped; a line that is not UTF-8 counts as a failed
/// descriptor. Unless `config.continue_on_error` is set,
/// processing stops at the first descriptor that fails. I/O failures abort
/// the stream and are returned as errors.
pub fn build_stream<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    config: &BuildConfig,
) -> anyhow::Result<BuildSummary> {
    let builder = OperationBuilder::new(config.serializer.policy());
    let mut summary = BuildSummary::default();

    for (idx, line) in input.split(b'\n').enumerate() {
        let line_no = idx + 1;
        let mut line = line.with_context(|| format!("Failed to read input line {line_no}"))?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let built = std::str::from_utf8(&line)
            .map_err(|e| format!("Line is not valid UTF-8: {e}"))
            .and_then(|text| descriptor_from_str(text).map_err(|e| e.to_string()))
            .and_then(|descriptor| builder.build(&descriptor).map_err(|e| e.to_string()));

        match built {
            Ok(operation) => {
                serde_json::to_writer(&mut output, &operation.to_json())
                    .with_context(|| format!("Failed to write operation from line {line_no}"))?;
                writeln!(output)?;
                summary.built += 1;
            }
            Err(message) => {
                tracing::warn!(line = line_no, error = %message, "Failed to build operation");
                summary.failures.push(LineFailure {
                    line: line_no,
                    message,
                });
                if !config.continue_on_error {
                    break;
                }
            }
        }
    }

    output.flush().context("Failed to flush output")?;
    tracing::info!(
        built = summary.built,
        failed = summary.failures.len(),
        "Finished building operations"
    );
    Ok(summary)
}
