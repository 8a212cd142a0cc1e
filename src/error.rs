use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum GeoRadiusError {
    /// Kd-sorted arrays handed to a tree view don't describe the same number of items.
    #[error("Expected {expected} coordinate values for {num_items} items, got {actual}.")]
    LengthMismatch {
        num_items: usize,
        expected: usize,
        actual: usize,
    },

    /// A benchmark was configured in a way that can't produce any measurement.
    #[error("Invalid benchmark configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GeoRadiusError>;
