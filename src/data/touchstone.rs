use std::fs;
use std::path::Path;

use thiserror::Error;

use super::model::{Sample, Sweep};
use crate::perf::ScopedTimer;

// ---------------------------------------------------------------------------
// Touchstone (.s1p) reader – RI convention only
// ---------------------------------------------------------------------------

/// Line grammar accepted by [`load_sweep`] / [`parse_sweep`]:
///
/// ```text
/// ! comment lines are skipped
/// # Hz S RI R 50          <- option line; exact tokens, impedance unused
/// 1000000 0.5 0.1         <- frequency(Hz)  real  imaginary
/// ```
///
/// Malformed data lines (fewer than three tokens, or a token that is not a
/// finite number) are dropped without aborting the parse; real-world files
/// routinely carry stray annotation lines. The option line is only a format
/// gate; its reference-impedance value is read but never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Invalid Touchstone file format. Expected format: # Hz S RI R 50")]
    InvalidFormat,
    #[error("File contains no valid data points")]
    EmptyFile,
}

/// Rough bytes-per-data-line used to pre-size the sweep from the file length.
const BYTES_PER_LINE_ESTIMATE: u64 = 50;

/// Read and parse a `.s1p` file from disk.
pub fn load_sweep(path: &Path) -> Result<Sweep, LoadError> {
    let not_found = || LoadError::FileNotFound(path.display().to_string());

    if !path.exists() {
        return Err(not_found());
    }

    let estimated_lines = fs::metadata(path)
        .map(|m| (m.len() / BYTES_PER_LINE_ESTIMATE) as usize)
        .unwrap_or(0);
    let text = fs::read_to_string(path).map_err(|_| not_found())?;

    parse_with_capacity(&text, estimated_lines)
}

/// Parse Touchstone text that is already in memory.
pub fn parse_sweep(text: &str) -> Result<Sweep, LoadError> {
    parse_with_capacity(text, 0)
}

fn parse_with_capacity(text: &str, capacity: usize) -> Result<Sweep, LoadError> {
    let _timer = ScopedTimer::new("touchstone parse");

    let mut sweep = Sweep::with_capacity(capacity);
    let mut header_seen = false;

    for line in text.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('!') {
            continue;
        }

        if line.starts_with('#') {
            // Option lines are never data, whether or not they match.
            if is_option_line(line) {
                header_seen = true;
            }
            continue;
        }

        match parse_data_line(line) {
            Some(sample) => sweep.push(sample),
            None => log::debug!("skipping malformed data line: {line:?}"),
        }
    }

    if sweep.is_empty() {
        return Err(LoadError::EmptyFile);
    }
    if !header_seen {
        return Err(LoadError::InvalidFormat);
    }
    Ok(sweep)
}

/// `# Hz S RI R <impedance>`: token-exact and case-sensitive, at least six
/// whitespace-separated tokens. The impedance token must be present but its
/// value is not checked.
fn is_option_line(line: &str) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    tokens.len() >= 6
        && tokens[0] == "#"
        && tokens[1] == "Hz"
        && tokens[2] == "S"
        && tokens[3] == "RI"
        && tokens[4] == "R"
}

/// One sample from `frequency real imaginary [...]`; extra tokens are
/// ignored. Non-finite values disqualify the line.
fn parse_data_line(line: &str) -> Option<Sample> {
    let mut tokens = line.split_whitespace();
    let frequency = parse_finite(tokens.next()?)?;
    let re = parse_finite(tokens.next()?)?;
    let im = parse_finite(tokens.next()?)?;
    Some(Sample::new(frequency, re, im))
}

fn parse_finite(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}
