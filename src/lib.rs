use thiserror::Error;

/// Speed-over-distance tracker implementation
pub mod trackers;

/// Utility primitives: bounding boxes and centroids
pub mod utils;

/// Time sources used to stamp band observations
pub mod clock;

/// Synthetic traffic generators
pub mod examples;

pub mod prelude;

#[cfg(feature = "python")]
mod py;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Errors {
    #[error("Identity capacity of {capacity} is exhausted, new identity cannot be allocated.")]
    CapacityExceeded { capacity: usize },
    #[error("Identity {0} is not known to the tracker.")]
    UnknownIdentity(u64),
    #[error("Elapsed time {0} s is not plausible for a speed measurement.")]
    InvalidTiming(f64),
    #[error("The stream is finished, reset the tracker to process a new one.")]
    StreamFinished,
    #[error("Dataset lists differ in length: {ids} identities, {speeds} speeds.")]
    DatasetLengthMismatch { ids: usize, speeds: usize },
}
