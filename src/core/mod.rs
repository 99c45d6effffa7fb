//! Core sink types: fields, records, levels, and the write path

pub mod error;
pub mod field;
pub mod field_store;
pub mod level;
pub mod record;
pub mod sink;

pub use error::{Result, SinkError};
pub use field::{extract_error, fields_to_map, EncodeObject, Field, FieldValue, ObjectEncoder};
pub use field_store::FieldStore;
pub use level::Level;
pub use record::{Caller, Record};
pub use sink::{ShipperSink, SinkOptions};
