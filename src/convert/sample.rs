//! Sample identity of a well.

use crate::error::{AppResult, ConversionError};
use crate::model::{PlateMap, WellResult};
use crate::schema::SampleDocument;

/// Builds the sample document for one well on a plate.
///
/// The sample identifier is `"{barcode} {col}{row}"`. The role comes from the
/// plate map; a well the map does not cover fails the conversion.
pub fn resolve_sample(
    barcode: &str,
    result: &WellResult,
    plate_map: &PlateMap,
) -> AppResult<SampleDocument> {
    let location = result.location();
    let role = plate_map
        .sample_role_type(&result.col, result.row)
        .ok_or_else(|| ConversionError::MissingWellInPlateMap {
            barcode: barcode.to_string(),
            location: location.clone(),
        })?;

    Ok(SampleDocument {
        sample_identifier: format!("{barcode} {location}"),
        well_plate_identifier: Some(barcode.to_string()),
        location_identifier: location,
        sample_role_type: role,
    })
}
