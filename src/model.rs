//! Intermediate model of one EnVision run.
//!
//! These are the structures a tokenizer produces from the raw export: plate
//! blocks with their result matrices, plate maps, label/filter metadata and the
//! instrument/software identity. The conversion pipeline only reads them.
//!
//! ## Entities
//!
//! - **`RunData`**: Everything known about the run, including the total well count.
//! - **`Labels`**: The acquisition configuration. Its `label` name decides the read type.
//! - **`Plate`**: One physical plate read. `results` is `None` for plates that only
//!   carried metadata (e.g. background blocks); such plates produce no output.
//! - **`PlateMap`**: Sample roles per well for one plate number.
//!
//! Everything optional in the export is an `Option` here. An unknown value is never
//! stored as zero.

pub use crate::schema::SampleRoleType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Software that produced the export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Software {
    /// Software name
    #[serde(default)]
    pub software_name: Option<String>,
    /// Software version
    #[serde(default)]
    pub software_version: Option<String>,
}

/// Identity of the physical instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Instrument serial number
    #[serde(default)]
    pub serial_number: Option<String>,
    /// Instrument nickname
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Protocol and assay identifiers from the "Basic assay information" block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicAssayInfo {
    /// Protocol identifier
    #[serde(default)]
    pub protocol_id: Option<String>,
    /// Assay identifier
    #[serde(default)]
    pub assay_id: Option<String>,
}

/// An optical filter. Wavelength and bandwidth are in nanometers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Filter name
    pub name: String,
    /// Center wavelength
    pub wavelength: f64,
    /// Bandwidth
    pub bandwidth: f64,
}

/// Where the detector reads the plate from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPosition {
    /// Read from above
    Top,
    /// Read from below
    Bottom,
}

/// Label metadata shared by every plate in the run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Labels {
    /// Label name, e.g. `"Europium 615"` or `"Absorbance @ 450 (1.0s)"`
    pub label: String,
    /// Excitation filter, fluorescence only
    #[serde(default)]
    pub excitation_filter: Option<Filter>,
    /// Emission filters keyed by the filter id plates refer to
    #[serde(default)]
    pub emission_filters: HashMap<String, Filter>,
    /// Flashes averaged per well
    #[serde(default)]
    pub number_of_flashes: Option<f64>,
    /// Detector gain as exported
    #[serde(default)]
    pub detector_gain_setting: Option<String>,
    /// Detector read position
    #[serde(default)]
    pub scan_position_setting: Option<ScanPosition>,
}

impl Labels {
    /// Look up the emission filter a plate was read through.
    pub fn emission_filter(&self, id: Option<&str>) -> Option<&Filter> {
        id.and_then(|id| self.emission_filters.get(id))
    }
}

/// Per-plate metadata from the "Plate information" block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlateInfo {
    /// Plate number; the key into `RunData::plate_maps`
    pub number: u32,
    /// Plate barcode
    pub barcode: String,
    /// Emission filter the plate was read through
    #[serde(default)]
    pub emission_filter_id: Option<String>,
    /// Measured plate height in millimeters
    #[serde(default)]
    pub measured_height: Option<f64>,
    /// Chamber temperature at start in degrees Celsius
    #[serde(default)]
    pub chamber_temperature_at_start: Option<f64>,
    /// Raw measurement timestamp as exported
    #[serde(default)]
    pub measurement_time: Option<String>,
}

/// One well reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellResult {
    /// Well letter
    pub col: String,
    /// Well number
    pub row: u32,
    /// Reading
    pub value: f64,
}

impl WellResult {
    /// Location string, e.g. `"A1"`.
    pub fn location(&self) -> String {
        format!("{}{}", self.col, self.row)
    }
}

/// One plate read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    /// Plate metadata
    pub plate_info: PlateInfo,
    /// Well readings
    #[serde(default)]
    pub results: Option<Vec<WellResult>>,
}

/// Serialized form of a plate map entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PlateMapEntry {
    col: String,
    row: u32,
    role: SampleRoleType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct PlateMapRecord {
    plate_n: u32,
    #[serde(default)]
    wells: Vec<PlateMapEntry>,
}

/// Sample roles for every well of one plate number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PlateMapRecord", into = "PlateMapRecord")]
pub struct PlateMap {
    /// Plate number the map applies to
    pub plate_n: u32,
    wells: BTreeMap<(String, u32), SampleRoleType>,
}

impl PlateMap {
    /// Creates an empty plate map.
    pub fn new(plate_n: u32) -> Self {
        Self {
            plate_n,
            wells: BTreeMap::new(),
        }
    }

    /// Builder-style insert.
    pub fn with_well(mut self, col: &str, row: u32, role: SampleRoleType) -> Self {
        self.insert(col, row, role);
        self
    }

    /// Assigns a role to a well, replacing any previous role.
    pub fn insert(&mut self, col: &str, row: u32, role: SampleRoleType) {
        self.wells.insert((col.to_string(), row), role);
    }

    /// Role of the well at (`col`, `row`), if mapped.
    pub fn sample_role_type(&self, col: &str, row: u32) -> Option<SampleRoleType> {
        self.wells.get(&(col.to_string(), row)).copied()
    }

    /// Number of mapped wells.
    pub fn len(&self) -> usize {
        self.wells.len()
    }

    /// True if no well is mapped.
    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }
}

impl From<PlateMapRecord> for PlateMap {
    fn from(record: PlateMapRecord) -> Self {
        record
            .wells
            .into_iter()
            .fold(PlateMap::new(record.plate_n), |map, entry| {
                map.with_well(&entry.col, entry.row, entry.role)
            })
    }
}

impl From<PlateMap> for PlateMapRecord {
    fn from(map: PlateMap) -> Self {
        Self {
            plate_n: map.plate_n,
            wells: map
                .wells
                .into_iter()
                .map(|((col, row), role)| PlateMapEntry { col, row, role })
                .collect(),
        }
    }
}

/// Everything the tokenizer extracted from one export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunData {
    /// Exporting software
    #[serde(default)]
    pub software: Software,
    /// Instrument identity
    #[serde(default)]
    pub instrument: Instrument,
    /// Plate reads in export order
    #[serde(default)]
    pub plates: Vec<Plate>,
    /// Plate maps keyed by plate number
    #[serde(default)]
    pub plate_maps: HashMap<u32, PlateMap>,
    /// Label metadata
    pub labels: Labels,
    /// Protocol and assay identifiers
    #[serde(default)]
    pub basic_assay_info: BasicAssayInfo,
    /// Wells per plate; required for conversion
    #[serde(default)]
    pub number_of_wells: Option<f64>,
}
