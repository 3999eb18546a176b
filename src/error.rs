//! Error handling for ADC image operations
//!
//! This module re-exports the error types used throughout the crate.
//! Header resolution and decoding share one thiserror-derived enum so
//! callers propagate a single error type with `?`.

pub use crate::common::AdcError;
pub use crate::common::Result;
