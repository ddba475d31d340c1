//! Biofuel split component
//!
//! Splits carbon in burned biofuel into the part that forms charcoal and the part that is
//! emitted. Years are independent of each other.

use serde::{Deserialize, Serialize};
use tracing::debug;
use wpct_core::errors::WpctResult;
use wpct_core::timeseries::{clamp_fraction, AnnualSeries, FloatValue};

/// Parameters for the biofuel split
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiofuelParameters {
    /// Fraction of fuel carbon emitted on combustion
    /// unit: dimensionless, clamped to [0, 1]
    pub efficiency: FloatValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BiofuelOutputs {
    /// Carbon entering the charcoal pool
    pub charcoal_inflow: AnnualSeries,
    /// Carbon emitted
    pub emissions: AnnualSeries,
}

/// Biofuel combustion
///
/// $$ \text{charcoal} = (1 - e) \cdot F, \quad \text{emissions} = e \cdot F $$
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiofuelSplit {
    parameters: BiofuelParameters,
}

impl BiofuelSplit {
    pub fn from_parameters(parameters: BiofuelParameters) -> Self {
        Self { parameters }
    }

    pub fn efficiency(&self) -> FloatValue {
        clamp_fraction(self.parameters.efficiency)
    }

    /// Split one year's fuel into (charcoal, emissions)
    pub fn split(&self, fuel: FloatValue) -> (FloatValue, FloatValue) {
        let efficiency = self.efficiency();
        ((1.0 - efficiency) * fuel, efficiency * fuel)
    }

    pub fn solve(&self, fuel: &AnnualSeries, years: usize) -> WpctResult<BiofuelOutputs> {
        debug!(years, input_len = fuel.len(), "solving biofuel split");

        let (charcoal_inflow, emissions): (Vec<_>, Vec<_>) =
            (0..years).map(|i| self.split(fuel.value_at(i))).unzip();

        Ok(BiofuelOutputs {
            charcoal_inflow: charcoal_inflow.into(),
            emissions: emissions.into(),
        })
    }
}
