//! Verification and configuration error types.
//!
//! The model itself never fails: every input vector is legal once it has been
//! constructed. Errors come from the layers around it:
//! 1. **Verification:** the checker and the stimulus runner report the first
//!    observed violation together with the cycle it happened on.
//! 2. **Loading:** configuration and stimulus scripts read from JSON.

use std::path::PathBuf;

use thiserror::Error;

/// A fatal verification failure.
///
/// Every variant carries the clock cycle it was detected on. Cycle `0` means
/// "before the first clock edge".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// An observed output is disallowed by the unit's invariants or by an
    /// explicit expectation.
    #[error("cycle {cycle}: {signal} mismatch, expected={expected} actual={actual}")]
    AssertionMismatch {
        /// Cycle the mismatch was observed on.
        cycle: u64,
        /// Name of the checked signal or monitor.
        signal: &'static str,
        /// Expected value, rendered as the harness prints it.
        expected: String,
        /// Observed value.
        actual: String,
    },

    /// The harness tried to present a value the pins cannot carry.
    #[error("cycle {cycle}: invalid stimulus {field}={actual:#x}, expected {expected}")]
    InvalidStimulus {
        /// Cycle the stimulus would have been applied on.
        cycle: u64,
        /// Stimulus field that was out of range.
        field: &'static str,
        /// Description of the accepted range.
        expected: String,
        /// Rejected value.
        actual: u32,
    },

    /// A script ran past the configured cycle budget.
    #[error("cycle limit of {limit} reached")]
    CycleLimit {
        /// Configured limit.
        limit: u64,
    },
}

impl VerifyError {
    /// Builds an [`AssertionMismatch`](Self::AssertionMismatch).
    pub fn mismatch(
        cycle: u64,
        signal: &'static str,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Self::AssertionMismatch {
            cycle,
            signal,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Builds an [`InvalidStimulus`](Self::InvalidStimulus) not yet tied to a cycle.
    pub fn invalid(field: &'static str, expected: impl ToString, actual: u32) -> Self {
        Self::InvalidStimulus {
            cycle: 0,
            field,
            expected: expected.to_string(),
            actual,
        }
    }

    /// Stamps the cycle an [`InvalidStimulus`](Self::InvalidStimulus) was presented on.
    #[must_use]
    pub fn at_cycle(self, at: u64) -> Self {
        match self {
            Self::InvalidStimulus {
                field,
                expected,
                actual,
                ..
            } => Self::InvalidStimulus {
                cycle: at,
                field,
                expected,
                actual,
            },
            other => other,
        }
    }

    /// Cycle the error was detected on (the limit itself for `CycleLimit`).
    pub const fn cycle(&self) -> u64 {
        match self {
            Self::AssertionMismatch { cycle, .. } | Self::InvalidStimulus { cycle, .. } => *cycle,
            Self::CycleLimit { limit } => *limit,
        }
    }
}

/// Failure to load a configuration or stimulus script.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The JSON did not match the expected schema.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Pin layout masks overlap or are malformed.
    #[error("invalid pin layout: {0}")]
    Layout(String),

    /// Timing parameters are out of range.
    #[error("invalid timing: {0}")]
    Timing(String),
}
