//! Biochar pool component
//!
//! Tracks the charcoal stock. Each year the inflow is added to the pool, then a fraction
//! of the pool decays. The decay rate grows logarithmically with the size of the stock:
//!
//! $$ d = \text{clamp}_{[0,1]}\left(d_1 + d_2 \ln(\max(P, 10^{-12}))\right) $$
//!
//! Because the rate is clamped to `[0, 1]`, the pool can never go negative and
//! `stock[i] = stock[i-1] + inflow[i] - decay[i]` holds every year.

use serde::{Deserialize, Serialize};
use tracing::debug;
use wpct_core::errors::WpctResult;
use wpct_core::timeseries::{clamp_fraction, AnnualSeries, FloatValue};

/// Smallest pool size used inside the logarithm
const POOL_FLOOR: FloatValue = 1e-12;

/// Parameters for the biochar pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiocharParameters {
    /// Base decay rate
    /// unit: 1 / yr
    pub decay_1: FloatValue,
    /// Sensitivity of the decay rate to the log of the pool size
    /// unit: 1 / yr
    pub decay_2: FloatValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BiocharOutputs {
    /// Pool after the year's decay
    pub stock: AnnualSeries,
    /// Carbon decayed during the year
    pub decay: AnnualSeries,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiocharPool {
    parameters: BiocharParameters,
}

impl BiocharPool {
    pub fn from_parameters(parameters: BiocharParameters) -> Self {
        Self { parameters }
    }

    /// Decay rate for a pool of the given size
    pub fn decay_rate(&self, pool: FloatValue) -> FloatValue {
        let rate = self.parameters.decay_1 + self.parameters.decay_2 * pool.max(POOL_FLOOR).ln();
        clamp_fraction(rate)
    }

    /// Advance the pool by one year.
    ///
    /// Returns (pool after decay, decayed mass)
    pub fn step(&self, pool: FloatValue, inflow: FloatValue) -> (FloatValue, FloatValue) {
        let pool = pool + inflow;
        let decayed = pool * self.decay_rate(pool);
        (pool - decayed, decayed)
    }

    pub fn solve(&self, inflow: &AnnualSeries, years: usize) -> WpctResult<BiocharOutputs> {
        debug!(years, input_len = inflow.len(), "solving biochar pool");

        let mut stock = AnnualSeries::zeros(years);
        let mut decay = AnnualSeries::zeros(years);
        let mut pool = 0.0;

        for i in 0..years {
            let (new_pool, decayed) = self.step(pool, inflow.value_at(i));
            pool = new_pool;
            stock.set(i, pool);
            decay.set(i, decayed);
        }

        Ok(BiocharOutputs { stock, decay })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn component(decay_1: FloatValue, decay_2: FloatValue) -> BiocharPool {
        BiocharPool::from_parameters(BiocharParameters { decay_1, decay_2 })
    }

    #[test]
    fn constant_rate_decay() {
        let outputs = component(0.1, 0.0)
            .solve(&AnnualSeries::from_vec(vec![100.0, 0.0, 0.0]), 3)
            .unwrap();

        let expected_decay = [10.0, 9.0, 8.1];
        let expected_stock = [90.0, 81.0, 72.9];
        for i in 0..3 {
            assert_relative_eq!(outputs.decay[i], expected_decay[i], max_relative = 1e-12);
            assert_relative_eq!(outputs.stock[i], expected_stock[i], max_relative = 1e-12);
        }
    }

    #[test]
    fn rate_grows_with_pool_size() {
        let pool = component(0.01, 0.005);
        assert!(pool.decay_rate(1000.0) > pool.decay_rate(10.0));
        assert_relative_eq!(
            pool.decay_rate(100.0),
            0.01 + 0.005 * 100.0_f64.ln(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn empty_pool_uses_log_floor() {
        // ln(1e-12) is about -27.6, so the raw rate is negative and clamps to zero
        let pool = component(0.1, 0.05);
        assert_eq!(pool.decay_rate(0.0), 0.0);
        assert_eq!(pool.step(0.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn rate_above_one_empties_pool() {
        let pool = component(2.0, 0.0);
        let (remaining, decayed) = pool.step(0.0, 50.0);
        assert_eq!(remaining, 0.0);
        assert_eq!(decayed, 50.0);
    }

    #[test]
    fn output_length_matches_horizon() {
        let outputs = component(0.1, 0.01)
            .solve(&AnnualSeries::from_vec(vec![5.0]), 12)
            .unwrap();
        assert_eq!(outputs.stock.len(), 12);
        assert_eq!(outputs.decay.len(), 12);
    }
}
