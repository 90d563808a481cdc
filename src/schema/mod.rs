//! Output document model for plate-reader runs.
//!
//! Three read types share one document shape and differ in the reading field,
//! its unit, and (for fluorescence) the excitation settings:
//!
//! ```text
//! Model
//!  └── PlateReaderAggregateDocument
//!        ├── PlateReaderDocumentItem (one per well)
//!        │     └── MeasurementAggregateDocument
//!        │           └── MeasurementDocument (one per label pass)
//!        │                 ├── SampleDocument
//!        │                 └── DeviceControlAggregate
//!        ├── DataSystemDocument
//!        └── DeviceSystemDocument
//! ```

pub mod documents;
pub mod units;

pub use documents::*;
pub use units::{QuantityValue, Unit};
