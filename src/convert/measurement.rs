//! Measurement documents.

use super::sample::resolve_sample;
use crate::error::AppResult;
use crate::model::{Plate, PlateMap, WellResult};
use crate::schema::{
    DeviceControlAggregateDocument, FluorescenceMeasurement, LuminescenceMeasurement,
    MeasurementDocument, QuantityValue, UltravioletAbsorbanceMeasurement, Unit,
};
use uuid::Uuid;

/// Generate a new measurement identifier
pub fn new_measurement_id() -> String {
    Uuid::new_v4().to_string()
}

/// Builds the measurement document for one well reading.
///
/// The variant follows the plate's device control aggregate, which was built
/// for the run's read type. Every call gets a fresh identifier.
pub fn build_measurement(
    plate: &Plate,
    result: &WellResult,
    plate_map: &PlateMap,
    device_control: &DeviceControlAggregateDocument,
) -> AppResult<MeasurementDocument> {
    let sample_document = resolve_sample(&plate.plate_info.barcode, result, plate_map)?;
    let compartment_temperature = QuantityValue::optional(
        plate.plate_info.chamber_temperature_at_start,
        Unit::DegreeCelsius,
    );
    let unit = device_control.read_type().unit();

    let document = match device_control {
        DeviceControlAggregateDocument::UltravioletAbsorbance(agg) => {
            MeasurementDocument::UltravioletAbsorbance(UltravioletAbsorbanceMeasurement {
                measurement_identifier: new_measurement_id(),
                sample_document,
                device_control_aggregate_document: agg.clone(),
                absorbance: QuantityValue::new(result.value, unit),
                compartment_temperature,
            })
        }
        DeviceControlAggregateDocument::Fluorescence(agg) => {
            MeasurementDocument::Fluorescence(FluorescenceMeasurement {
                measurement_identifier: new_measurement_id(),
                sample_document,
                device_control_aggregate_document: agg.clone(),
                fluorescence: QuantityValue::new(result.value, unit),
                compartment_temperature,
            })
        }
        DeviceControlAggregateDocument::Luminescence(agg) => {
            MeasurementDocument::Luminescence(LuminescenceMeasurement {
                measurement_identifier: new_measurement_id(),
                sample_document,
                device_control_aggregate_document: agg.clone(),
                luminescence: QuantityValue::new(result.value, unit),
                compartment_temperature,
            })
        }
    };

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::device_control::build_device_control;
    use crate::convert::read_type::ReadType;
    use crate::convert::test_support::{run_data, sample_plate};
    use crate::error::ConversionError;
    use crate::model::SampleRoleType;

    #[test]
    fn test_absorbance_measurement() {
        let data = run_data("Absorbance");
        let mut plate = sample_plate(1, "PLT1", &[("A", 1, 0.452)]);
        plate.plate_info.chamber_temperature_at_start = Some(23.4);
        let map = PlateMap::new(1).with_well("A", 1, SampleRoleType::Sample);
        let device_control = build_device_control(&data, &plate, ReadType::Absorbance);
        let result = &plate.results.as_ref().unwrap()[0];

        let doc = build_measurement(&plate, result, &map, &device_control).unwrap();

        let MeasurementDocument::UltravioletAbsorbance(m) = &doc else {
            panic!("expected absorbance measurement, got {doc:?}");
        };
        assert_eq!(m.absorbance, QuantityValue::new(0.452, Unit::MilliAbsorbance));
        assert_eq!(
            m.compartment_temperature,
            Some(QuantityValue::new(23.4, Unit::DegreeCelsius))
        );
        assert_eq!(m.sample_document.sample_identifier, "PLT1 A1");
        assert_eq!(
            m.device_control_aggregate_document.device_control_document[0]
                .settings
                .device_type,
            "absorbance detector"
        );
    }

    #[test]
    fn test_reading_unit_follows_read_type() {
        let plate = sample_plate(1, "PLT1", &[("A", 1, 812.0)]);
        let map = PlateMap::new(1).with_well("A", 1, SampleRoleType::Sample);
        let result = &plate.results.as_ref().unwrap()[0];

        for (label, read_type, unit) in [
            ("LUM", ReadType::Luminescence, Unit::RelativeLight),
            ("Fluorescence", ReadType::Fluorescence, Unit::RelativeFluorescence),
        ] {
            let device_control = build_device_control(&run_data(label), &plate, read_type);
            let doc = build_measurement(&plate, result, &map, &device_control).unwrap();
            assert_eq!(doc.reading(), QuantityValue::new(812.0, unit));
            assert!(doc.compartment_temperature().is_none());
        }
    }

    #[test]
    fn test_identifiers_are_fresh() {
        let data = run_data("LUM");
        let plate = sample_plate(1, "PLT1", &[("A", 1, 1.0)]);
        let map = PlateMap::new(1).with_well("A", 1, SampleRoleType::Sample);
        let device_control = build_device_control(&data, &plate, ReadType::Luminescence);
        let result = &plate.results.as_ref().unwrap()[0];

        let first = build_measurement(&plate, result, &map, &device_control).unwrap();
        let second = build_measurement(&plate, result, &map, &device_control).unwrap();
        assert_ne!(first.measurement_identifier(), second.measurement_identifier());
    }

    #[test]
    fn test_unmapped_well_propagates() {
        let data = run_data("LUM");
        let plate = sample_plate(1, "PLT1", &[("C", 3, 1.0)]);
        let map = PlateMap::new(1);
        let device_control = build_device_control(&data, &plate, ReadType::Luminescence);
        let result = &plate.results.as_ref().unwrap()[0];

        let err = build_measurement(&plate, result, &map, &device_control).unwrap_err();
        assert!(matches!(err, ConversionError::MissingWellInPlateMap { .. }));
    }
}
