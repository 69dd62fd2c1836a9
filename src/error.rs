//! Error taxonomy for the event hand-off.
//!
//! None of these are fatal. `BufferFull` is dropped and logged by the emitter,
//! `BufferEmpty` just ends a drain cycle, `InvalidInstance` is absorbed by the
//! `Option` entry points in [`crate::emitter`].

use core::fmt;

/// Errors reported by the event buffer and its callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Write attempted onto an occupied slot.
    BufferFull,
    /// Read attempted on an unoccupied slot.
    BufferEmpty,
    /// Operation invoked without a valid instance.
    InvalidInstance,
    /// Requested capacity is zero or larger than the slot storage.
    InvalidCapacity { requested: usize, max: usize },
}

pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BufferFull => f.write_str("event buffer full"),
            Error::BufferEmpty => f.write_str("event buffer empty"),
            Error::InvalidInstance => f.write_str("invalid instance"),
            Error::InvalidCapacity { requested, max } => {
                write!(f, "invalid capacity {requested} (expected 1..={max})")
            }
        }
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;
    use std::string::ToString;

    #[test]
    fn display_names_the_capacity_bounds() {
        let err = Error::InvalidCapacity {
            requested: 9,
            max: 8,
        };
        assert_eq!(err.to_string(), "invalid capacity 9 (expected 1..=8)");
        assert_eq!(Error::BufferFull.to_string(), "event buffer full");
    }
}
