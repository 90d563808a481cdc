//! Grouping of measurements into well-level documents.
//!
//! Measurements are accumulated per well across all plates and label passes,
//! then emitted in ascending `(plate number, column, row)` order. The order is
//! part of the output contract and does not depend on the order plates or
//! results were read in.

use crate::schema::{
    ContainerType, MeasurementAggregateDocument, MeasurementDocument, PlateReaderDocumentItem,
    QuantityValue, Unit,
};
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::fmt;

/// Identifies one well of one plate. Ordered by plate number, then column,
/// then row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WellKey {
    /// Plate number
    pub plate_number: u32,
    /// Well letter
    pub col: String,
    /// Well number
    pub row: u32,
}

impl WellKey {
    /// Creates a key.
    pub fn new(plate_number: u32, col: impl Into<String>, row: u32) -> Self {
        Self {
            plate_number,
            col: col.into(),
            row,
        }
    }
}

impl fmt::Display for WellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}{}", self.plate_number, self.col, self.row)
    }
}

/// Fields every well-level document carries.
#[derive(Debug, Clone, PartialEq)]
pub struct RunFields {
    /// Run-wide measurement time
    pub measurement_time: DateTime<FixedOffset>,
    /// Wells per plate
    pub number_of_wells: f64,
    /// Protocol identifier from the assay block
    pub protocol_id: Option<String>,
    /// Assay identifier from the assay block
    pub assay_id: Option<String>,
}

/// Accumulates measurements per well.
#[derive(Debug, Default)]
pub struct MeasurementGrouper {
    wells: BTreeMap<WellKey, Vec<MeasurementDocument>>,
}

impl MeasurementGrouper {
    /// Creates an empty grouper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a measurement to its well.
    pub fn push(&mut self, key: WellKey, measurement: MeasurementDocument) {
        self.wells.entry(key).or_default().push(measurement);
    }

    /// Number of distinct wells seen.
    pub fn well_count(&self) -> usize {
        self.wells.len()
    }

    /// Total number of measurements.
    pub fn measurement_count(&self) -> usize {
        self.wells.values().map(Vec::len).sum()
    }

    /// Emits one well-level document per well, in key order.
    pub fn into_documents(self, run: &RunFields) -> Vec<PlateReaderDocumentItem> {
        self.wells
            .into_values()
            .map(|measurements| PlateReaderDocumentItem {
                measurement_aggregate_document: MeasurementAggregateDocument {
                    measurement_time: run.measurement_time,
                    plate_well_count: QuantityValue::new(run.number_of_wells, Unit::Number),
                    measurement_document: measurements,
                    analytical_method_identifier: run.protocol_id.clone(),
                    experimental_data_identifier: run.assay_id.clone(),
                    container_type: ContainerType::WellPlate,
                },
            })
            .collect()
    }
}
