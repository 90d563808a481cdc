//! Run-wide measurement time.

use crate::error::{AppResult, ConversionError};
use crate::model::Plate;
use crate::timestamp::TimestampParser;
use chrono::{DateTime, FixedOffset};

/// Picks the earliest measurement time across all plates.
///
/// Plates without a timestamp (or with a blank one) are ignored. A timestamp
/// that is present but unreadable fails the conversion rather than being
/// skipped, as is a run where no plate has one at all.
pub fn resolve_measurement_time(
    plates: &[Plate],
    parser: &TimestampParser,
) -> AppResult<DateTime<FixedOffset>> {
    let mut earliest: Option<DateTime<FixedOffset>> = None;

    for raw in plates
        .iter()
        .filter_map(|plate| plate.plate_info.measurement_time.as_deref())
        .filter(|raw| !raw.trim().is_empty())
    {
        let parsed = parser
            .parse(raw)
            .ok_or_else(|| ConversionError::InvalidMeasurementTime {
                value: raw.to_string(),
            })?;

        earliest = Some(match earliest {
            Some(current) if current <= parsed => current,
            _ => parsed,
        });
    }

    earliest.ok_or(ConversionError::MissingMeasurementTime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlateInfo;

    fn plate(number: u32, time: Option<&str>) -> Plate {
        Plate {
            plate_info: PlateInfo {
                number,
                barcode: format!("PLT{number}"),
                measurement_time: time.map(str::to_string),
                ..Default::default()
            },
            results: None,
        }
    }

    #[test]
    fn test_earliest_time_wins() {
        let plates = vec![
            plate(1, Some("10/13/2022 3:08:06 PM")),
            plate(2, Some("10/13/2022 9:15:00 AM")),
            plate(3, None),
        ];

        let time = resolve_measurement_time(&plates, &TimestampParser::default()).unwrap();
        assert_eq!(time.to_rfc3339(), "2022-10-13T09:15:00+00:00");
    }

    #[test]
    fn test_comparison_is_chronological() {
        // As strings "12/01/2021" sorts after "02/01/2022"
        let plates = vec![
            plate(1, Some("02/01/2022 10:00:00 AM")),
            plate(2, Some("12/01/2021 10:00:00 AM")),
        ];

        let time = resolve_measurement_time(&plates, &TimestampParser::default()).unwrap();
        assert_eq!(time.to_rfc3339(), "2021-12-01T10:00:00+00:00");
    }

    #[test]
    fn test_no_timestamps_is_an_error() {
        let plates = vec![plate(1, None), plate(2, Some("  "))];

        let err = resolve_measurement_time(&plates, &TimestampParser::default()).unwrap_err();
        assert!(matches!(err, ConversionError::MissingMeasurementTime));
    }

    #[test]
    fn test_unreadable_timestamp_is_an_error() {
        let plates = vec![plate(1, Some("10/13/2022 3:08:06 PM")), plate(2, Some("soon"))];

        let err = resolve_measurement_time(&plates, &TimestampParser::default()).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::InvalidMeasurementTime { value } if value == "soon"
        ));
    }
}
