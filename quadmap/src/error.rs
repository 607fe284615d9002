use thiserror::Error;

/// Errors that can occur when sizing a probing map
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// The requested capacity is zero or not a power of two
    #[error("capacity must be a non-zero power of two, got {0}")]
    InvalidCapacity(usize),

    /// Doubling the slot array would overflow `usize`
    #[error("capacity overflow while growing a table of {capacity} slots")]
    CapacityOverflow { capacity: usize },
}

pub type Result<T> = std::result::Result<T, MapError>;

/// Validates a slot count for a new table.
pub(crate) fn check_capacity(capacity: usize) -> Result<usize> {
    if capacity.is_power_of_two() {
        Ok(capacity)
    } else {
        Err(MapError::InvalidCapacity(capacity))
    }
}
