//! Conversion of an EnVision run into a plate-reader document.
//!
//! # Pipeline
//!
//! ```text
//! RunData
//!   │  ReadType::classify (once)
//!   │  resolve_measurement_time (once)
//!   │
//!   ├── for each plate with results
//!   │     plate map lookup ── build_device_control (once per plate)
//!   │     └── for each well result
//!   │           resolve_sample + build_measurement ──► MeasurementGrouper
//!   │
//!   └── MeasurementGrouper::into_documents ──► Model
//! ```
//!
//! The conversion is a pure function of its input: no I/O, no shared state.
//! An [`EnvisionConverter`] holds only immutable configuration, so independent
//! files may be converted in parallel with clones of one converter.

pub mod device_control;
pub mod grouping;
pub mod measurement;
pub mod measurement_time;
pub mod read_type;
pub mod sample;

use crate::config::Settings;
use crate::error::{AppResult, ConversionError};
use crate::identity::{ConverterIdentity, CONVERTER_IDENTITY};
use crate::model::RunData;
use crate::reader::{JsonRunDataSource, RunDataSource};
use crate::schema::{
    DataSystemDocument, DeviceSystemDocument, Model, PlateReaderAggregateDocument,
    PlateReaderDocumentItem,
};
use crate::timestamp::TimestampParser;
use std::io::Read;

pub use device_control::build_device_control;
pub use grouping::{MeasurementGrouper, RunFields, WellKey};
pub use measurement::build_measurement;
pub use measurement_time::resolve_measurement_time;
pub use read_type::ReadType;
pub use sample::resolve_sample;

/// Converts EnVision runs into plate-reader documents.
#[derive(Debug, Clone)]
pub struct EnvisionConverter {
    identity: ConverterIdentity,
    timestamps: TimestampParser,
}

impl Default for EnvisionConverter {
    fn default() -> Self {
        Self::new(CONVERTER_IDENTITY.clone(), TimestampParser::default())
    }
}

impl EnvisionConverter {
    /// Creates a converter with explicit identity and timestamp handling.
    pub fn new(identity: ConverterIdentity, timestamps: TimestampParser) -> Self {
        Self {
            identity,
            timestamps,
        }
    }

    /// Creates a converter from loaded settings.
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        let offset = settings.default_utc_offset()?;
        Ok(Self::new(
            CONVERTER_IDENTITY.clone(),
            TimestampParser::new(offset),
        ))
    }

    /// Converts raw export content.
    ///
    /// Any failure while building the intermediate model is reported as
    /// [`ConversionError::UpstreamParse`] with the original error as its source.
    pub fn parse<R: Read>(&self, raw_contents: R, filename: &str) -> AppResult<Model> {
        let mut source = JsonRunDataSource::new(raw_contents);
        self.parse_source(&mut source, filename)
    }

    /// Converts the run produced by any source.
    pub fn parse_source<S: RunDataSource + ?Sized>(
        &self,
        source: &mut S,
        filename: &str,
    ) -> AppResult<Model> {
        let data = RunData::create(source).map_err(ConversionError::upstream)?;
        self.get_model(&data, filename)
    }

    /// Converts an already built intermediate model.
    pub fn get_model(&self, data: &RunData, filename: &str) -> AppResult<Model> {
        if data.number_of_wells.is_none() {
            return Err(ConversionError::MissingWellCount);
        }

        let plate_reader_document = self.plate_reader_document(data)?;
        tracing::info!(
            file = filename,
            wells = plate_reader_document.len(),
            "Converted EnVision run"
        );

        Ok(Model {
            field_asm_manifest: self.identity.manifest.clone(),
            plate_reader_aggregate_document: PlateReaderAggregateDocument {
                plate_reader_document,
                data_system_document: DataSystemDocument {
                    file_name: filename.to_string(),
                    software_name: data.software.software_name.clone(),
                    software_version: data.software.software_version.clone(),
                    asm_converter_name: self.identity.converter_name.clone(),
                    asm_converter_version: self.identity.converter_version.clone(),
                },
                device_system_document: DeviceSystemDocument {
                    model_number: self.identity.model_number.clone(),
                    equipment_serial_number: data.instrument.serial_number.clone(),
                    device_identifier: data.instrument.nickname.clone(),
                },
            },
        })
    }

    fn plate_reader_document(&self, data: &RunData) -> AppResult<Vec<PlateReaderDocumentItem>> {
        let number_of_wells = data
            .number_of_wells
            .ok_or(ConversionError::MissingWellCount)?;
        let measurement_time = resolve_measurement_time(&data.plates, &self.timestamps)?;
        let read_type = ReadType::classify(&data.labels);

        let mut grouper = MeasurementGrouper::new();
        for plate in &data.plates {
            let info = &plate.plate_info;
            let Some(results) = &plate.results else {
                tracing::warn!(barcode = %info.barcode, "Plate has no results, skipping");
                continue;
            };

            let plate_map = data.plate_maps.get(&info.number).ok_or_else(|| {
                ConversionError::MissingPlateMap {
                    barcode: info.barcode.clone(),
                }
            })?;

            let device_control = build_device_control(data, plate, read_type);
            tracing::debug!(
                barcode = %info.barcode,
                plate_number = info.number,
                results = results.len(),
                "Processing plate"
            );

            for result in results {
                let measurement = build_measurement(plate, result, plate_map, &device_control)?;
                grouper.push(
                    WellKey::new(info.number, result.col.clone(), result.row),
                    measurement,
                );
            }
        }

        tracing::info!(
            %read_type,
            wells = grouper.well_count(),
            measurements = grouper.measurement_count(),
            "Grouped measurements"
        );

        let run = RunFields {
            measurement_time,
            number_of_wells,
            protocol_id: data.basic_assay_info.protocol_id.clone(),
            assay_id: data.basic_assay_info.assay_id.clone(),
        };
        Ok(grouper.into_documents(&run))
    }
}
