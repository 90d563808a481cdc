//! Custom error types for the converter.
//!
//! This module defines the primary error type, `ConversionError`, for the whole
//! crate. Using the `thiserror` crate, it provides one consistent way to report
//! everything that can stop a conversion, from an unreadable instrument export to
//! metadata that does not reconcile.
//!
//! ## Error Hierarchy
//!
//! `ConversionError` consolidates the following sources:
//!
//! - **`UpstreamParse`**: Any failure while building the intermediate model from the raw
//!   export. The original error is kept as the `source()` so diagnostics still see it.
//! - **`MissingWellCount`**, **`MissingMeasurementTime`**, **`InvalidMeasurementTime`**:
//!   Run-wide fields the output document cannot be built without.
//! - **`MissingPlateMap`** / **`MissingWellInPlateMap`**: A plate (or one of its wells) with
//!   readings but no sample layout to resolve roles against.
//! - **`Config`**, **`Serialization`**: Ambient failures around the pipeline.
//!
//! Every variant is fatal. A conversion either yields a complete document or one of these.

use crate::config::ConfigError;
use thiserror::Error;

/// Convenience alias for results using the crate error type.
pub type AppResult<T> = std::result::Result<T, ConversionError>;

/// Every way a conversion can fail.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The intermediate model could not be built
    #[error("Unable to parse instrument export: {source}")]
    UpstreamParse {
        /// Original error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The run has no well count
    #[error("Unable to get number of the wells in the plate")]
    MissingWellCount,

    /// No plate has a measurement time
    #[error("Unable to find valid measurement date")]
    MissingMeasurementTime,

    /// A measurement time matches no known format
    #[error("Invalid measurement time '{value}'")]
    InvalidMeasurementTime {
        /// Raw timestamp
        value: String,
    },

    /// A plate with results has no plate map
    #[error("Unable to find plate map of {barcode}")]
    MissingPlateMap {
        /// Plate barcode
        barcode: String,
    },

    /// A result well is not in its plate map
    #[error("Plate map of {barcode} has no entry for well {location}")]
    MissingWellInPlateMap {
        /// Plate barcode
        barcode: String,
        /// Well location, e.g. `"A1"`
        location: String,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ConversionError {
    /// Wraps an error raised while constructing the intermediate model.
    pub fn upstream(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        ConversionError::UpstreamParse {
            source: source.into(),
        }
    }
}
