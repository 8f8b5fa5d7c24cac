use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
///
/// Every variant is fatal for the run: there is no partial step to resume from.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// Invalid configuration, detected before any step runs
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A pair collapsed close enough to produce an unbounded force
    #[error("numerical instability: particles {i} and {j} are {distance:e} apart")]
    NumericalInstability { i: usize, j: usize, distance: f64 },

    /// A force worker failed before the join barrier
    #[error("worker pool error: {0}")]
    ThreadPool(String),

    /// A previous step failed; the particle state is no longer valid
    #[error("simulation halted after an earlier failure")]
    Halted,
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }
}
