//! Landfill cohort component
//!
//! Carbon placed in landfill decomposes following a lognormal survival curve in cohort
//! age `a`:
//!
//! $$ S(a) = \text{clamp}_{[0,1]}\left(1 - \Phi\left(\frac{\ln a - k_1}{k_2}\right)\right), \quad S(a \le 0) = 1 $$
//!
//! where $\Phi$ is the standard normal CDF. Survival is not linear in age, so the pool is
//! rebuilt from the full cohort history each year rather than carried forward:
//!
//! $$ P_i = \sum_{j=0}^{i} I_j \, S(i - j + 1) $$
//!
//! and the decay flux is whatever mass is unaccounted for, $D_i = P_{i-1} + I_i - P_i$.
//! Survival values for every age are computed once per call.
//!
//! The time horizon of a landfill run is the length of its input series.

use serde::{Deserialize, Serialize};
use statrs::function::erf::erf;
use std::f64::consts::SQRT_2;
use tracing::{debug, warn};
use wpct_core::errors::{WpctError, WpctResult};
use wpct_core::timeseries::{clamp_fraction, AnnualSeries, FloatValue};

/// Negative decay fluxes smaller than this are rounding noise
const DECAY_NOISE_FLOOR: FloatValue = 1e-12;

/// Parameters for the landfill survival curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandfillParameters {
    /// Location of the lognormal (log of the median residence time)
    /// unit: ln(yr)
    pub decay_1: FloatValue,
    /// Scale of the lognormal, must be positive
    /// unit: dimensionless
    pub decay_2: FloatValue,
}

impl LandfillParameters {
    pub fn validate(&self) -> WpctResult<()> {
        if !self.decay_1.is_finite() {
            return Err(WpctError::invalid_parameter(
                "decay_1",
                self.decay_1,
                "landfill survival location must be finite",
            ));
        }
        if !(self.decay_2.is_finite() && self.decay_2 > 0.0) {
            return Err(WpctError::invalid_parameter(
                "decay_2",
                self.decay_2,
                "landfill survival scale must be > 0",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LandfillOutputs {
    /// Carbon remaining in landfill at the end of the year
    pub pool: AnnualSeries,
    /// Carbon decomposed during the year
    pub decay: AnnualSeries,
}

#[derive(Debug, Clone, Serialize)]
pub struct LandfillCohorts {
    parameters: LandfillParameters,
}

impl LandfillCohorts {
    /// Create a landfill component, rejecting a non-positive survival scale.
    pub fn from_parameters(parameters: LandfillParameters) -> WpctResult<Self> {
        parameters.validate()?;
        Ok(Self { parameters })
    }

    /// Fraction of a cohort remaining at `age`
    pub fn survival(&self, age: FloatValue) -> FloatValue {
        if age <= 0.0 {
            return 1.0;
        }
        let z = (age.ln() - self.parameters.decay_1) / self.parameters.decay_2;
        let cdf = 0.5 * (1.0 + erf(z / SQRT_2));
        clamp_fraction(1.0 - cdf)
    }

    /// Survival for each integer age `0..=max_age`
    pub fn survival_table(&self, max_age: usize) -> Vec<FloatValue> {
        (0..=max_age)
            .map(|age| self.survival(age as FloatValue))
            .collect()
    }

    pub fn solve(&self, input: &AnnualSeries) -> WpctResult<LandfillOutputs> {
        let years = input.len();
        debug!(years, "solving landfill cohorts");

        let survival = self.survival_table(years);

        let pool: AnnualSeries = (0..years)
            .map(|i| {
                (0..=i)
                    .map(|j| input[j] * survival[i - j + 1])
                    .sum::<FloatValue>()
            })
            .collect();

        let mut decay = AnnualSeries::zeros(years);
        let mut previous = 0.0;
        for i in 0..years {
            let flux = previous + input[i] - pool[i];
            if flux < -DECAY_NOISE_FLOOR {
                warn!(
                    year = i,
                    decay = flux,
                    "landfill pool grew by more than its input; clamping decay to zero"
                );
            }
            decay.set(i, flux.max(0.0));
            previous = pool[i];
        }

        Ok(LandfillOutputs { pool, decay })
    }
}
