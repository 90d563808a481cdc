//! Common test utilities for envision_asm integration tests
//!
//! This module provides reusable fixture builders for:
//! - Run data in the JSON form the converter reads
//! - Plates, result matrices and plate maps
//! - Normalizing generated identifiers before comparing documents

#![allow(dead_code)] // Utilities may not all be used by every test binary

use envision_asm::Model;
use serde_json::{json, Value};

/// A plate block with one result per `(col, row, value)`.
pub fn plate(number: u32, barcode: &str, wells: &[(&str, u32, f64)]) -> Value {
    let results: Vec<Value> = wells
        .iter()
        .map(|(col, row, value)| json!({"col": col, "row": row, "value": value}))
        .collect();

    json!({
        "plate_info": {
            "number": number,
            "barcode": barcode,
            "emission_filter_id": "102",
            "measured_height": 11.5,
            "chamber_temperature_at_start": 23.4,
            "measurement_time": "10/13/2022 3:08:06 PM"
        },
        "results": results
    })
}

/// A plate map assigning `role` to every listed well.
pub fn plate_map(number: u32, wells: &[(&str, u32)], role: &str) -> Value {
    let entries: Vec<Value> = wells
        .iter()
        .map(|(col, row)| json!({"col": col, "row": row, "role": role}))
        .collect();

    json!({"plate_n": number, "wells": entries})
}

/// A complete single-plate run with the given label and readings.
pub fn run(label: &str, wells: &[(&str, u32, f64)]) -> Value {
    let locations: Vec<(&str, u32)> = wells.iter().map(|(c, r, _)| (*c, *r)).collect();

    json!({
        "software": {"software_name": "EnVision Workstation", "software_version": "1.14.3049.1193"},
        "instrument": {"serial_number": "1050209", "nickname": "EnVision"},
        "labels": {
            "label": label,
            "excitation_filter": {"name": "FITC 485", "wavelength": 485.0, "bandwidth": 14.0},
            "emission_filters": {
                "102": {"name": "Photometric 450", "wavelength": 450.0, "bandwidth": 8.0}
            },
            "number_of_flashes": 10.0,
            "detector_gain_setting": "120",
            "scan_position_setting": "top"
        },
        "basic_assay_info": {"protocol_id": "100302", "assay_id": "3134"},
        "number_of_wells": 96.0,
        "plates": [plate(1, "PLT1", wells)],
        "plate_maps": {"1": plate_map(1, &locations, "sample role")}
    })
}

/// Serializes a fixture for `EnvisionConverter::parse`.
pub fn to_bytes(value: &Value) -> Vec<u8> {
    serde_json::to_vec(value).unwrap()
}

/// Replaces every measurement identifier with a fixed value.
pub fn blank_identifiers(mut model: Model) -> Model {
    for item in &mut model.plate_reader_aggregate_document.plate_reader_document {
        for doc in &mut item.measurement_aggregate_document.measurement_document {
            doc.set_measurement_identifier(String::new());
        }
    }
    model
}
