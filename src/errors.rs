use crate::psychrometrics::PsychrometricError;
use thiserror::Error;

/// Errors raised while importing input series or deriving tower figures.
///
/// No operation retries or recovers; every error propagates to the caller.
#[derive(Debug, Error)]
pub enum TowerError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("psychrometric domain error: {0}")]
    PsychrometricDomain(#[from] PsychrometricError),
    #[error("unsupported cooling load units \"{0}\" (expected \"btuh\" or \"tons\")")]
    UnsupportedUnits(String),
    #[error("{0} series has not been imported")]
    SeriesNotImported(&'static str),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
