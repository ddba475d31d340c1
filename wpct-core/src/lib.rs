//! Core types for the wood products carbon tracker.
//!
//! - [`timeseries`]: annual carbon-mass series with zero-extension
//! - [`integrate`]: definite integrals behind a swappable [`integrate::Integrator`]
//! - [`parameters`]: product × variable parameter lookup
//! - [`standard_variables`]: names and metadata of the ledger columns
//! - [`errors`]: the crate-wide error type

pub mod errors;
pub mod integrate;
pub mod parameters;
pub mod standard_variables;
pub mod timeseries;
