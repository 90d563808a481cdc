//! Core library for the envision_asm converter.
//!
//! This library turns the intermediate model of a PerkinElmer EnVision plate-reader
//! export into an Allotrope plate-reader document. It is used by the
//! `envision_asm` command line tool and can be embedded directly.
//!
//! # Layout
//!
//! - [`model`]: the intermediate run model a tokenizer produces
//! - [`reader`]: the [`RunDataSource`](reader::RunDataSource) seam and a JSON source
//! - [`convert`]: the conversion pipeline and [`EnvisionConverter`]
//! - [`schema`]: the output document types
//! - [`config`], [`error`], [`identity`], [`timestamp`]: ambient support
//!
//! # Example
//!
//! ```no_run
//! use envision_asm::EnvisionConverter;
//! use std::fs::File;
//!
//! fn main() -> anyhow::Result<()> {
//!     let converter = EnvisionConverter::default();
//!     let model = converter.parse(File::open("run.json")?, "run.json")?;
//!     println!("{}", model.to_json(true)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod identity;
pub mod model;
pub mod reader;
pub mod schema;
pub mod timestamp;

pub use convert::{EnvisionConverter, ReadType};
pub use error::{AppResult, ConversionError};
pub use model::RunData;
pub use schema::Model;
