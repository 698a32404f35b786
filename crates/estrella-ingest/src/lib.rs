//! CSV-to-relational ingestion for Estrella.
//!
//! This crate reads the flat demographic CSV, drives the dependency-ordered
//! insertion pipeline over the core table models, and executes the resulting
//! statement batch through a pluggable SQL store.

pub mod continent;
pub mod engine;
pub mod errors;
pub mod model;
pub mod record;
pub mod script;
pub mod store;

pub use continent::{ContinentLookup, IsoContinentTable, continent_name};
pub use engine::InsertionEngine;
pub use errors::IngestError;
pub use model::LoadReport;
pub use record::{DemographicRecord, RecordReader, SOURCE_FIELD_COUNT, SOURCE_HEADERS};
pub use script::split_statements;
pub use store::{SqlStore, StoreError};
