//! # logship
//!
//! A pluggable structured-log sink that ships each accepted record to a
//! remote collector as a JSON document.
//!
//! ## Features
//!
//! - **Level gate**: records below the configured threshold are rejected
//! - **Bound context**: `with` attaches fields that are merged into exactly
//!   the next shipped document (consume-on-write)
//! - **Thread safe**: handles derived from one root share a single
//!   mutex-guarded field store
//! - **Transport agnostic**: delivery happens behind the [`LogSender`]
//!   capability trait; a newline-delimited TCP sender is included

pub mod core;
pub mod sender;

pub mod prelude {
    pub use crate::core::{
        extract_error, fields_to_map, Caller, EncodeObject, Field, FieldStore, FieldValue, Level,
        ObjectEncoder, Record, Result, ShipperSink, SinkError, SinkOptions,
    };
    pub use crate::sender::{LogSender, TcpSender};
}

pub use crate::core::{
    extract_error, fields_to_map, Caller, EncodeObject, Field, FieldStore, FieldValue, Level,
    ObjectEncoder, Record, Result, ShipperSink, SinkError, SinkOptions,
};
pub use crate::sender::{LogSender, TcpSender};
