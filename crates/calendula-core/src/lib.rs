//! Core types for calendula.
//!
//! This crate holds what the expansion, aggregation and layout crates share:
//! - the event data model (`model`)
//! - calendar-local day and range arithmetic (`time`)
//! - settings loaded through the `config` crate (`config`)
//! - the `CoreError` type

pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod time;

pub use error::{CoreError, CoreResult};
pub use time::{TimeRange, Timestamp};
