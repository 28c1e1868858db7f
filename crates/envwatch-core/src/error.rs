//! Error taxonomy for the reconciliation engine.
//!
//! Upstream problems ([`SourceError`]) are absorbed per field by the report
//! assembler. Everything in [`CoreError`] other than `Source` is a caller or
//! configuration defect and is surfaced as-is.

use std::time::Duration;
use thiserror::Error;

/// Failure of a single upstream data source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// Transport failure or non-success HTTP status.
    #[error("upstream unavailable: {0}")]
    Unavailable(String),

    /// A response arrived but was not in the expected shape.
    #[error("malformed upstream payload: {0}")]
    Malformed(String),

    /// The per-fetch deadline elapsed before the source answered.
    #[error("upstream timed out after {0:?}")]
    TimedOut(Duration),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("station catalog is empty")]
    EmptyCatalog,

    #[error("unparseable station listing line: {line}")]
    MalformedListing { line: String },

    #[error(transparent)]
    Source(#[from] SourceError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
