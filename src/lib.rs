//! Wood products carbon tracker.
//!
//! Estimates annual carbon pools and fluxes for harvested wood products: biofuel
//! combustion and charcoal, products in use, disposals, recycling and landfill decay.
//! The flux models live in [`wpct_components`]; this crate wires them into product
//! streams, reads the input tables and writes the resulting ledger.
//!
//! ```rust,no_run
//! use wpct::config::TrackerConfig;
//! use wpct::io::ProductionTable;
//! use wpct::tracker::Tracker;
//! use wpct_core::parameters::ParameterTable;
//!
//! # fn main() -> wpct_core::errors::WpctResult<()> {
//! let data = ProductionTable::from_path("production.csv")?;
//! let parameters = ParameterTable::from_path("parameters.csv")?;
//! let ledger = Tracker::new(TrackerConfig::default())?.run(&data, &parameters)?;
//! ledger.write_path("carbon_ledger.csv")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod io;
pub mod ledger;
pub mod logging;
pub mod tracker;
