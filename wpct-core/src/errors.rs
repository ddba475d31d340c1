use crate::timeseries::FloatValue;
use thiserror::Error;

/// Error type for the carbon tracker.
///
/// Only [`WpctError::InvalidParameter`] can be raised by the flux models themselves.
/// Numerical degeneracies (log of an empty pool, rates outside `[0, 1]`, rounding noise in
/// decay fluxes) are recovered by clamping and never surface here.
#[derive(Error, Debug)]
pub enum WpctError {
    #[error("Invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: String,
        value: FloatValue,
        reason: String,
    },
    #[error("No parameter found for product {product:?} and variable {variable:?}")]
    MissingParameter { product: String, variable: String },
    #[error("No production series named {0:?}")]
    MissingSeries(String),
    #[error("Invalid input data: {0}")]
    InvalidData(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

impl WpctError {
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: FloatValue,
        reason: impl Into<String>,
    ) -> Self {
        WpctError::InvalidParameter {
            name: name.into(),
            value,
            reason: reason.into(),
        }
    }
}

/// Convenience type for `Result<T, WpctError>`.
pub type WpctResult<T> = Result<T, WpctError>;
