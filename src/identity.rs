//! Converter and instrument identity stamped into every output document.

use once_cell::sync::Lazy;

/// Schema manifest for plate-reader documents.
pub const ASM_MANIFEST: &str =
    "http://purl.allotrope.org/manifests/plate-reader/BENCHLING/2023/09/plate-reader.manifest";

/// Model number reported for every EnVision run.
pub const MODEL_NUMBER: &str = "EnVision";

/// Name of this converter as recorded in the data system document.
pub const CONVERTER_NAME: &str = env!("CARGO_PKG_NAME");

/// Version of this converter as recorded in the data system document.
pub const CONVERTER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed identity injected into document assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterIdentity {
    /// Schema manifest URI
    pub manifest: String,
    /// Instrument model number
    pub model_number: String,
    /// Converter name
    pub converter_name: String,
    /// Converter version
    pub converter_version: String,
}

impl Default for ConverterIdentity {
    fn default() -> Self {
        Self {
            manifest: ASM_MANIFEST.to_string(),
            model_number: MODEL_NUMBER.to_string(),
            converter_name: CONVERTER_NAME.to_string(),
            converter_version: CONVERTER_VERSION.to_string(),
        }
    }
}

/// Process-wide identity shared by all converters built with defaults.
pub static CONVERTER_IDENTITY: Lazy<ConverterIdentity> = Lazy::new(ConverterIdentity::default);
