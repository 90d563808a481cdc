//! Sources of the intermediate model.
//!
//! Tokenizing a raw EnVision export into plate, plate-map and label blocks happens
//! outside the conversion pipeline. Anything that can produce a [`RunData`]
//! implements [`RunDataSource`]; [`RunData::create`] is the single entry point
//! the converter calls. Errors are returned as `anyhow::Error` because every
//! source fails differently and the converter folds them all into one domain
//! error anyway.

use crate::model::RunData;
use anyhow::{Context, Result};
use std::io::Read;

/// Produces the intermediate model of one run.
pub trait RunDataSource {
    /// Reads the whole run.
    fn read_run_data(&mut self) -> Result<RunData>;
}

impl RunData {
    /// Builds the intermediate model from a source.
    pub fn create<S: RunDataSource + ?Sized>(source: &mut S) -> Result<RunData> {
        source.read_run_data()
    }
}

/// Reads the intermediate model serialized as JSON.
pub struct JsonRunDataSource<R> {
    reader: R,
}

impl<R: Read> JsonRunDataSource<R> {
    /// Wraps a reader over JSON content.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> RunDataSource for JsonRunDataSource<R> {
    fn read_run_data(&mut self) -> Result<RunData> {
        let data: RunData = serde_json::from_reader(&mut self.reader)
            .context("Failed to deserialize run data from JSON")?;
        tracing::debug!(
            plates = data.plates.len(),
            plate_maps = data.plate_maps.len(),
            label = %data.labels.label,
            "Read run data"
        );
        Ok(data)
    }
}

/// A source over an already built model. Useful when the caller tokenized the
/// export itself.
impl RunDataSource for RunData {
    fn read_run_data(&mut self) -> Result<RunData> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_source_reads_model() {
        let raw = r#"{
            "labels": {"label": "Absorbance @ 450"},
            "number_of_wells": 96,
            "plates": [
                {"plate_info": {"number": 1, "barcode": "PLT1"},
                 "results": [{"col": "A", "row": 1, "value": 0.452}]}
            ],
            "plate_maps": {"1": {"plate_n": 1, "wells": [{"col": "A", "row": 1, "role": "sample role"}]}}
        }"#;

        let mut source = JsonRunDataSource::new(raw.as_bytes());
        let data = RunData::create(&mut source).unwrap();

        assert_eq!(data.number_of_wells, Some(96.0));
        assert_eq!(data.plates.len(), 1);
        assert!(data.plate_maps.contains_key(&1));
    }

    #[test]
    fn test_json_source_reports_malformed_input() {
        let mut source = JsonRunDataSource::new("{ not json".as_bytes());
        let err = RunData::create(&mut source).unwrap_err();
        assert!(err.to_string().contains("Failed to deserialize run data"));
    }

    #[test]
    fn test_missing_labels_block_is_an_error() {
        let mut source = JsonRunDataSource::new(r#"{"plates": []}"#.as_bytes());
        assert!(RunData::create(&mut source).is_err());
    }
}
