//! Unit-tagged quantities.

use serde::{Deserialize, Serialize};

/// Units used by plate-reader documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    /// Milli absorbance units
    #[serde(rename = "mAU")]
    MilliAbsorbance,
    /// Relative fluorescence units
    #[serde(rename = "RFU")]
    RelativeFluorescence,
    /// Relative light units
    #[serde(rename = "RLU")]
    RelativeLight,
    /// Millimeters
    #[serde(rename = "mm")]
    Millimeter,
    /// Nanometers
    #[serde(rename = "nm")]
    Nanometer,
    /// Degrees Celsius
    #[serde(rename = "degC")]
    DegreeCelsius,
    /// Dimensionless count
    #[serde(rename = "#")]
    Number,
}

/// A numeric value with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantityValue {
    /// Numeric value
    pub value: f64,
    /// Unit of `value`
    pub unit: Unit,
}

impl QuantityValue {
    /// Creates a quantity.
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Wraps `value` only when it is known; an unknown value stays unknown.
    pub fn optional(value: Option<f64>, unit: Unit) -> Option<Self> {
        value.map(|value| Self::new(value, unit))
    }
}
