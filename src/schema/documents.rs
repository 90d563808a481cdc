//! Plate-reader document shapes.
//!
//! Field names serialize to the schema's key names, which are space separated
//! words with `(plate reader)` qualifiers. Optional fields are omitted when
//! absent, never written as `null` or zero.

use super::units::QuantityValue;
use crate::error::AppResult;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Role of a well's content in the assay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleRoleType {
    /// Standard
    #[serde(rename = "standard sample role")]
    Standard,
    /// Sample
    #[serde(rename = "sample role")]
    Sample,
    /// Control
    #[serde(rename = "control sample role")]
    Control,
    /// Blank
    #[serde(rename = "blank role")]
    Blank,
    /// Unknown
    #[serde(rename = "unknown sample role")]
    Unknown,
    /// Calibration
    #[serde(rename = "calibration sample role")]
    Calibration,
    /// Reference
    #[serde(rename = "reference sample role")]
    Reference,
    /// Quality control
    #[serde(rename = "quality control sample role")]
    QualityControl,
}

/// Detector read position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanPositionSetting {
    /// Top read
    #[serde(rename = "top scan position (plate reader)")]
    Top,
    /// Bottom read
    #[serde(rename = "bottom scan position (plate reader)")]
    Bottom,
}

/// Container the samples were read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerType {
    /// Microplate
    #[serde(rename = "well plate")]
    WellPlate,
}

/// Identity of the sample in one well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleDocument {
    /// `"{barcode} {location}"`
    #[serde(rename = "sample identifier")]
    pub sample_identifier: String,
    /// Plate barcode
    #[serde(
        rename = "well plate identifier",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub well_plate_identifier: Option<String>,
    /// Well location, e.g. `"A1"`
    #[serde(rename = "location identifier")]
    pub location_identifier: String,
    /// Role from the plate map
    #[serde(rename = "sample role type")]
    pub sample_role_type: SampleRoleType,
}

/// Detector settings shared by every read type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorSettings {
    /// Detector kind
    #[serde(rename = "device type")]
    pub device_type: String,
    /// Measured plate height
    #[serde(
        rename = "detector distance setting (plate reader)",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub detector_distance_setting: Option<QuantityValue>,
    /// Flashes per well
    #[serde(
        rename = "number of averages",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub number_of_averages: Option<QuantityValue>,
    /// Detector gain
    #[serde(
        rename = "detector gain setting",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub detector_gain_setting: Option<String>,
    /// Read position
    #[serde(
        rename = "scan position setting (plate reader)",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub scan_position_setting: Option<ScanPositionSetting>,
    /// Emission filter wavelength
    #[serde(
        rename = "detector wavelength setting",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub detector_wavelength_setting: Option<QuantityValue>,
    /// Emission filter bandwidth
    #[serde(
        rename = "detector bandwidth setting",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub detector_bandwidth_setting: Option<QuantityValue>,
}

/// Device control item of an absorbance read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UltravioletAbsorbanceDeviceControlItem {
    /// Shared detector settings
    #[serde(flatten)]
    pub settings: DetectorSettings,
}

/// Device control item of a luminescence read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuminescenceDeviceControlItem {
    /// Shared detector settings
    #[serde(flatten)]
    pub settings: DetectorSettings,
}

/// Device control item of a fluorescence read, which also records excitation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluorescenceDeviceControlItem {
    /// Shared detector settings
    #[serde(flatten)]
    pub settings: DetectorSettings,
    /// Excitation filter wavelength
    #[serde(
        rename = "excitation wavelength setting",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub excitation_wavelength_setting: Option<QuantityValue>,
    /// Excitation filter bandwidth
    #[serde(
        rename = "excitation bandwidth setting",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub excitation_bandwidth_setting: Option<QuantityValue>,
}

/// List wrapper around device control items. Conversions always produce one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceControlAggregate<T> {
    /// Device control items
    #[serde(rename = "device control document")]
    pub device_control_document: Vec<T>,
}

impl<T> DeviceControlAggregate<T> {
    /// Wraps a single item.
    pub fn single(item: T) -> Self {
        Self {
            device_control_document: vec![item],
        }
    }
}

/// Device control aggregate for one of the three read types.
///
/// Serialize only. The three item shapes overlap, so the variant cannot be
/// recovered from JSON on its own; measurements carry the typed aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DeviceControlAggregateDocument {
    /// Absorbance
    UltravioletAbsorbance(DeviceControlAggregate<UltravioletAbsorbanceDeviceControlItem>),
    /// Fluorescence
    Fluorescence(DeviceControlAggregate<FluorescenceDeviceControlItem>),
    /// Luminescence
    Luminescence(DeviceControlAggregate<LuminescenceDeviceControlItem>),
}

impl DeviceControlAggregateDocument {
    /// Settings of the first device control item.
    pub fn settings(&self) -> Option<&DetectorSettings> {
        match self {
            Self::UltravioletAbsorbance(agg) => {
                agg.device_control_document.first().map(|i| &i.settings)
            }
            Self::Fluorescence(agg) => agg.device_control_document.first().map(|i| &i.settings),
            Self::Luminescence(agg) => agg.device_control_document.first().map(|i| &i.settings),
        }
    }
}

/// One absorbance reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UltravioletAbsorbanceMeasurement {
    /// Generated identifier
    #[serde(rename = "measurement identifier")]
    pub measurement_identifier: String,
    /// Sample that was read
    #[serde(rename = "sample document")]
    pub sample_document: SampleDocument,
    /// Detector settings of the plate
    #[serde(rename = "device control aggregate document")]
    pub device_control_aggregate_document:
        DeviceControlAggregate<UltravioletAbsorbanceDeviceControlItem>,
    /// Reading in mAU
    pub absorbance: QuantityValue,
    /// Chamber temperature at start
    #[serde(
        rename = "compartment temperature",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub compartment_temperature: Option<QuantityValue>,
}

/// One fluorescence reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluorescenceMeasurement {
    /// Generated identifier
    #[serde(rename = "measurement identifier")]
    pub measurement_identifier: String,
    /// Sample that was read
    #[serde(rename = "sample document")]
    pub sample_document: SampleDocument,
    /// Detector settings of the plate
    #[serde(rename = "device control aggregate document")]
    pub device_control_aggregate_document: DeviceControlAggregate<FluorescenceDeviceControlItem>,
    /// Reading in RFU
    pub fluorescence: QuantityValue,
    /// Chamber temperature at start
    #[serde(
        rename = "compartment temperature",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub compartment_temperature: Option<QuantityValue>,
}

/// One luminescence reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuminescenceMeasurement {
    /// Generated identifier
    #[serde(rename = "measurement identifier")]
    pub measurement_identifier: String,
    /// Sample that was read
    #[serde(rename = "sample document")]
    pub sample_document: SampleDocument,
    /// Detector settings of the plate
    #[serde(rename = "device control aggregate document")]
    pub device_control_aggregate_document: DeviceControlAggregate<LuminescenceDeviceControlItem>,
    /// Reading in RLU
    pub luminescence: QuantityValue,
    /// Chamber temperature at start
    #[serde(
        rename = "compartment temperature",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub compartment_temperature: Option<QuantityValue>,
}

/// A reading at one well under one label pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasurementDocument {
    /// Absorbance
    UltravioletAbsorbance(UltravioletAbsorbanceMeasurement),
    /// Fluorescence
    Fluorescence(FluorescenceMeasurement),
    /// Luminescence
    Luminescence(LuminescenceMeasurement),
}

impl MeasurementDocument {
    /// The generated measurement identifier.
    pub fn measurement_identifier(&self) -> &str {
        match self {
            Self::UltravioletAbsorbance(m) => &m.measurement_identifier,
            Self::Fluorescence(m) => &m.measurement_identifier,
            Self::Luminescence(m) => &m.measurement_identifier,
        }
    }

    /// Replaces the measurement identifier.
    pub fn set_measurement_identifier(&mut self, id: String) {
        match self {
            Self::UltravioletAbsorbance(m) => m.measurement_identifier = id,
            Self::Fluorescence(m) => m.measurement_identifier = id,
            Self::Luminescence(m) => m.measurement_identifier = id,
        }
    }

    /// Identity of the sample that was read.
    pub fn sample_document(&self) -> &SampleDocument {
        match self {
            Self::UltravioletAbsorbance(m) => &m.sample_document,
            Self::Fluorescence(m) => &m.sample_document,
            Self::Luminescence(m) => &m.sample_document,
        }
    }

    /// The reading with its unit.
    pub fn reading(&self) -> QuantityValue {
        match self {
            Self::UltravioletAbsorbance(m) => m.absorbance,
            Self::Fluorescence(m) => m.fluorescence,
            Self::Luminescence(m) => m.luminescence,
        }
    }

    /// Compartment temperature, if recorded.
    pub fn compartment_temperature(&self) -> Option<QuantityValue> {
        match self {
            Self::UltravioletAbsorbance(m) => m.compartment_temperature,
            Self::Fluorescence(m) => m.compartment_temperature,
            Self::Luminescence(m) => m.compartment_temperature,
        }
    }
}

/// All readings for one well plus run-wide fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementAggregateDocument {
    /// Run-wide measurement time
    #[serde(rename = "measurement time")]
    pub measurement_time: DateTime<FixedOffset>,
    /// Wells per plate
    #[serde(rename = "plate well count")]
    pub plate_well_count: QuantityValue,
    /// Readings of the well
    #[serde(rename = "measurement document")]
    pub measurement_document: Vec<MeasurementDocument>,
    /// Protocol identifier
    #[serde(
        rename = "analytical method identifier",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub analytical_method_identifier: Option<String>,
    /// Assay identifier
    #[serde(
        rename = "experimental data identifier",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub experimental_data_identifier: Option<String>,
    /// Always a well plate
    #[serde(rename = "container type")]
    pub container_type: ContainerType,
}

/// One well-level document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateReaderDocumentItem {
    /// Readings and run fields of one well
    #[serde(rename = "measurement aggregate document")]
    pub measurement_aggregate_document: MeasurementAggregateDocument,
}

/// Software that produced the data and the converter that produced the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSystemDocument {
    /// Converted file name
    #[serde(rename = "file name")]
    pub file_name: String,
    /// Exporting software name
    #[serde(
        rename = "software name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub software_name: Option<String>,
    /// Exporting software version
    #[serde(
        rename = "software version",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub software_version: Option<String>,
    /// Converter name
    #[serde(rename = "ASM converter name")]
    pub asm_converter_name: String,
    /// Converter version
    #[serde(rename = "ASM converter version")]
    pub asm_converter_version: String,
}

/// The instrument that produced the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSystemDocument {
    /// Instrument model number
    #[serde(rename = "model number")]
    pub model_number: String,
    /// Instrument serial number
    #[serde(
        rename = "equipment serial number",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub equipment_serial_number: Option<String>,
    /// Instrument nickname
    #[serde(
        rename = "device identifier",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub device_identifier: Option<String>,
}

/// Well-level documents wrapped with system identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateReaderAggregateDocument {
    /// Well-level documents
    #[serde(rename = "plate reader document")]
    pub plate_reader_document: Vec<PlateReaderDocumentItem>,
    /// Software identity
    #[serde(rename = "data system document")]
    pub data_system_document: DataSystemDocument,
    /// Instrument identity
    #[serde(rename = "device system document")]
    pub device_system_document: DeviceSystemDocument,
}

/// The complete output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Schema manifest URI
    #[serde(rename = "$asm.manifest")]
    pub field_asm_manifest: String,
    /// Document body
    #[serde(rename = "plate reader aggregate document")]
    pub plate_reader_aggregate_document: PlateReaderAggregateDocument,
}

impl Model {
    /// Serializes the document to JSON.
    pub fn to_json(&self, pretty: bool) -> AppResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// The well-level documents in output order.
    pub fn plate_reader_document(&self) -> &[PlateReaderDocumentItem] {
        &self.plate_reader_aggregate_document.plate_reader_document
    }
}
