//! Device control documents.
//!
//! Detector settings come from two places: the run's label metadata (flashes,
//! gain, scan position, filters) and the plate itself (measured height, which
//! emission filter it was read through). One aggregate is built per plate and
//! shared by every measurement on it.

use super::read_type::ReadType;
use crate::model::{Filter, Plate, RunData, ScanPosition};
use crate::schema::{
    DetectorSettings, DeviceControlAggregate, DeviceControlAggregateDocument,
    FluorescenceDeviceControlItem, LuminescenceDeviceControlItem, QuantityValue,
    ScanPositionSetting, UltravioletAbsorbanceDeviceControlItem, Unit,
};

impl From<ScanPosition> for ScanPositionSetting {
    fn from(position: ScanPosition) -> Self {
        match position {
            ScanPosition::Top => ScanPositionSetting::Top,
            ScanPosition::Bottom => ScanPositionSetting::Bottom,
        }
    }
}

impl DeviceControlAggregateDocument {
    /// Read type the aggregate was built for.
    pub fn read_type(&self) -> ReadType {
        match self {
            Self::UltravioletAbsorbance(_) => ReadType::Absorbance,
            Self::Fluorescence(_) => ReadType::Fluorescence,
            Self::Luminescence(_) => ReadType::Luminescence,
        }
    }
}

fn filter_wavelength(filter: Option<&Filter>) -> Option<QuantityValue> {
    QuantityValue::optional(filter.map(|f| f.wavelength), Unit::Nanometer)
}

fn filter_bandwidth(filter: Option<&Filter>) -> Option<QuantityValue> {
    QuantityValue::optional(filter.map(|f| f.bandwidth), Unit::Nanometer)
}

/// Settings common to every read type.
fn detector_settings(data: &RunData, plate: &Plate, read_type: ReadType) -> DetectorSettings {
    let labels = &data.labels;
    let emission_filter = labels.emission_filter(plate.plate_info.emission_filter_id.as_deref());
    if emission_filter.is_none() {
        tracing::debug!(
            barcode = %plate.plate_info.barcode,
            filter_id = ?plate.plate_info.emission_filter_id,
            "No emission filter for plate, detector wavelength left unset"
        );
    }

    DetectorSettings {
        device_type: read_type.device_type().to_string(),
        detector_distance_setting: QuantityValue::optional(
            plate.plate_info.measured_height,
            Unit::Millimeter,
        ),
        number_of_averages: QuantityValue::optional(labels.number_of_flashes, Unit::Number),
        detector_gain_setting: labels.detector_gain_setting.clone(),
        scan_position_setting: labels.scan_position_setting.map(ScanPositionSetting::from),
        detector_wavelength_setting: filter_wavelength(emission_filter),
        detector_bandwidth_setting: filter_bandwidth(emission_filter),
    }
}

/// Builds the device control aggregate for one plate.
pub fn build_device_control(
    data: &RunData,
    plate: &Plate,
    read_type: ReadType,
) -> DeviceControlAggregateDocument {
    let settings = detector_settings(data, plate, read_type);

    match read_type {
        ReadType::Absorbance => DeviceControlAggregateDocument::UltravioletAbsorbance(
            DeviceControlAggregate::single(UltravioletAbsorbanceDeviceControlItem { settings }),
        ),
        ReadType::Luminescence => DeviceControlAggregateDocument::Luminescence(
            DeviceControlAggregate::single(LuminescenceDeviceControlItem { settings }),
        ),
        ReadType::Fluorescence => {
            let excitation_filter = data.labels.excitation_filter.as_ref();
            DeviceControlAggregateDocument::Fluorescence(DeviceControlAggregate::single(
                FluorescenceDeviceControlItem {
                    settings,
                    excitation_wavelength_setting: filter_wavelength(excitation_filter),
                    excitation_bandwidth_setting: filter_bandwidth(excitation_filter),
                },
            ))
        }
    }
}
