//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, the four pass-aborting placement conditions (sampling
//! exhaustion, insufficient visible capacity, an empty asset pool and a degenerate
//! camera), host instantiation failures, IO, and generic errors.
use std::fmt;

use thiserror::Error;

use crate::domain::Domain;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(
        "sampling produced no points after {attempts} attempts (radius {radius}, domain {domain})"
    )]
    SamplingExhausted {
        attempts: usize,
        radius: f32,
        domain: Domain,
    },

    #[error(
        "requested {requested} placements but only {available} visible candidates{}",
        context_suffix(.context)
    )]
    CapacityExceeded {
        requested: usize,
        available: usize,
        context: Option<PassContext>,
    },

    #[error("asset pool '{pool}' has no sources")]
    EmptyAssetPool { pool: String },

    #[error("degenerate camera: {0}")]
    DegenerateCamera(String),

    #[error("asset instantiation failed: {0}")]
    Instantiation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Sampling parameters of the pass an error was raised in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassContext {
    pub radius: f32,
    pub domain: Domain,
}

impl fmt::Display for PassContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "radius {}, domain {}", self.radius, self.domain)
    }
}

fn context_suffix(context: &Option<PassContext>) -> String {
    context.map(|c| format!(" ({c})")).unwrap_or_default()
}

impl Error {
    /// Returns `true` for the conditions a host may retry with adjusted parameters.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::SamplingExhausted { .. })
    }

    /// Attaches pass parameters to a context-free [`Error::CapacityExceeded`].
    pub fn with_pass_context(self, pass: PassContext) -> Self {
        match self {
            Error::CapacityExceeded {
                requested,
                available,
                context: None,
            } => Error::CapacityExceeded {
                requested,
                available,
                context: Some(pass),
            },
            other => other,
        }
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_conversions_land_in_other() {
        let owned: Error = format!("layer {} failed", 2).into();
        let borrowed: Error = "no camera".into();
        assert_eq!(owned.to_string(), "layer 2 failed");
        assert!(matches!(borrowed, Error::Other(ref msg) if msg == "no camera"));
    }

    #[test]
    fn capacity_message_reports_counts_and_domain() {
        let bare = Error::CapacityExceeded {
            requested: 10,
            available: 3,
            context: None,
        };
        assert_eq!(
            bare.to_string(),
            "requested 10 placements but only 3 visible candidates"
        );

        let err = bare.with_pass_context(PassContext {
            radius: 1.5,
            domain: Domain::new(9.0, 7.0, 4.0),
        });
        let msg = err.to_string();
        assert!(msg.contains("requested 10"));
        assert!(msg.contains("only 3"));
        assert!(msg.contains("radius 1.5"));
        assert!(msg.contains("9x7x4"));
    }

    #[test]
    fn only_sampling_exhaustion_is_recoverable() {
        let exhausted = Error::SamplingExhausted {
            attempts: 4,
            radius: 2.0,
            domain: Domain::new(1.0, 1.0, 1.0),
        };
        assert!(exhausted.is_recoverable());
        assert!(!Error::EmptyAssetPool { pool: "humans".into() }.is_recoverable());
        assert!(!Error::DegenerateCamera("near >= far".into()).is_recoverable());
    }
}
