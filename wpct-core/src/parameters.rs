//! Scalar parameter lookup.
//!
//! Model coefficients are keyed by a product name and a variable name, for example
//! `("Construction", "disposal_1")` or `("Landfill", "pap_decay2")`. The flux models
//! themselves never query a provider; the tracker resolves every coefficient up front and
//! hands the models plain parameter structs.

use crate::errors::{WpctError, WpctResult};
use crate::timeseries::FloatValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Source of named scalar parameters.
pub trait ParameterProvider: Send + Sync {
    fn get(&self, product: &str, variable: &str) -> WpctResult<FloatValue>;
}

/// A row of a parameter table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRecord {
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Variable")]
    pub variable: String,
    #[serde(rename = "Parameter")]
    pub parameter: FloatValue,
}

/// In-memory [`ParameterProvider`].
///
/// Later records with the same key replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ParameterTable {
    values: HashMap<(String, String), FloatValue>,
}

impl ParameterTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        product: impl Into<String>,
        variable: impl Into<String>,
        value: FloatValue,
    ) -> &mut Self {
        self.values.insert((product.into(), variable.into()), value);
        self
    }

    pub fn from_records(records: impl IntoIterator<Item = ParameterRecord>) -> Self {
        let mut table = Self::new();
        for record in records {
            table.insert(record.product, record.variable, record.parameter);
        }
        table
    }

    /// Read a `Product,Variable,Parameter` CSV table.
    pub fn from_reader<R: Read>(reader: R) -> WpctResult<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let records = reader
            .deserialize::<ParameterRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_records(records))
    }

    pub fn from_path(path: impl AsRef<Path>) -> WpctResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ParameterProvider for ParameterTable {
    fn get(&self, product: &str, variable: &str) -> WpctResult<FloatValue> {
        self.values
            .get(&(product.to_string(), variable.to_string()))
            .copied()
            .ok_or_else(|| WpctError::MissingParameter {
                product: product.to_string(),
                variable: variable.to_string(),
            })
    }
}

/// Interpret a fraction given either on a 0..1 or a 0..100 scale.
///
/// Values above one are treated as percentages.
pub fn normalise_fraction(value: FloatValue) -> FloatValue {
    if value > 1.0 {
        value / 100.0
    } else {
        value
    }
}
