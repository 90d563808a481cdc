//! Read-type classification.

use crate::model::Labels;
use crate::schema::Unit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Detection principle of a run. One per run, not per well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadType {
    /// Absorbance read
    Absorbance,
    /// Fluorescence read
    Fluorescence,
    /// Luminescence read
    Luminescence,
}

/// Label-name patterns in precedence order. The first substring match wins.
const READ_TYPE_PATTERNS: &[(&str, ReadType)] = &[
    ("ABS", ReadType::Absorbance),
    ("Absorbance", ReadType::Absorbance),
    ("LUM", ReadType::Luminescence),
    ("Luminescence", ReadType::Luminescence),
    ("Fluorescence", ReadType::Fluorescence),
];

impl ReadType {
    /// Classifies a run from its label name.
    ///
    /// Labels that match no pattern are read as fluorescence. Some exports name
    /// their labels after the fluorophore (e.g. `"Europium 615"`), so this stays
    /// until it is checked against real exports of every label kind.
    pub fn classify(labels: &Labels) -> ReadType {
        match READ_TYPE_PATTERNS
            .iter()
            .find(|(pattern, _)| labels.label.contains(pattern))
        {
            Some((pattern, read_type)) => {
                tracing::debug!(label = %labels.label, pattern, ?read_type, "Classified read type");
                *read_type
            }
            None => {
                tracing::warn!(
                    label = %labels.label,
                    "No read type pattern matched label, defaulting to fluorescence"
                );
                ReadType::Fluorescence
            }
        }
    }

    /// Display name of the read type.
    pub fn name(self) -> &'static str {
        match self {
            ReadType::Absorbance => "Absorbance",
            ReadType::Fluorescence => "Fluorescence",
            ReadType::Luminescence => "Luminescence",
        }
    }

    /// Unit the readings are reported in.
    pub fn unit(self) -> Unit {
        match self {
            ReadType::Absorbance => Unit::MilliAbsorbance,
            ReadType::Fluorescence => Unit::RelativeFluorescence,
            ReadType::Luminescence => Unit::RelativeLight,
        }
    }

    /// Device type recorded in the device control document.
    pub fn device_type(self) -> &'static str {
        match self {
            ReadType::Absorbance => "absorbance detector",
            ReadType::Fluorescence => "fluorescence detector",
            ReadType::Luminescence => "luminescence detector",
        }
    }
}

impl fmt::Display for ReadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn labels(name: &str) -> Labels {
        Labels {
            label: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_absorbance_patterns() {
        assert_eq!(ReadType::classify(&labels("Absorbance @ 450")), ReadType::Absorbance);
        assert_eq!(ReadType::classify(&labels("ABS 600")), ReadType::Absorbance);
    }

    #[test]
    fn test_luminescence_patterns() {
        assert_eq!(ReadType::classify(&labels("LUM 700")), ReadType::Luminescence);
        assert_eq!(
            ReadType::classify(&labels("Luminescence 0.1s")),
            ReadType::Luminescence
        );
    }

    #[test]
    fn test_fluorescence_pattern() {
        assert_eq!(
            ReadType::classify(&labels("Fluorescence 485/535")),
            ReadType::Fluorescence
        );
    }

    #[test]
    fn test_precedence_follows_table_order() {
        // "ABS" is checked before "LUM"
        assert_eq!(ReadType::classify(&labels("LUM then ABS")), ReadType::Absorbance);
        // "Luminescence" is checked before "Fluorescence"
        assert_eq!(
            ReadType::classify(&labels("Fluorescence / Luminescence")),
            ReadType::Luminescence
        );
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert_eq!(ReadType::classify(&labels("absorbance")), ReadType::Fluorescence);
    }

    #[test]
    #[traced_test]
    fn test_unmatched_label_defaults_to_fluorescence() {
        assert_eq!(ReadType::classify(&labels("XYZ")), ReadType::Fluorescence);
        assert!(logs_contain("defaulting to fluorescence"));
    }

    #[test]
    fn test_unit_and_device_type() {
        assert_eq!(ReadType::Absorbance.unit(), Unit::MilliAbsorbance);
        assert_eq!(ReadType::Luminescence.device_type(), "luminescence detector");
        assert_eq!(ReadType::Fluorescence.to_string(), "Fluorescence");
    }
}
