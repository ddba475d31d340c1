//! Recycling split component
//!
//! Divides disposed carbon into a recycled part and a part sent to landfill. The recycling
//! rate changes logarithmically with elapsed program time (not cohort age):
//!
//! $$ r_i = \text{clamp}_{[0,1]}\left(r_1 + r_2 \ln(i + 1)\right) $$

use serde::{Deserialize, Serialize};
use tracing::debug;
use wpct_core::errors::WpctResult;
use wpct_core::timeseries::{clamp_fraction, AnnualSeries, FloatValue};

/// Parameters for the recycling rate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecyclingParameters {
    /// Recycling rate in the first year
    /// unit: dimensionless
    pub recycle_1: FloatValue,
    /// Change of the recycling rate per unit log-year
    /// unit: dimensionless
    pub recycle_2: FloatValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecyclingOutputs {
    pub recycled: AnnualSeries,
    /// Disposals not recycled, entering landfill
    pub landfill: AnnualSeries,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecyclingSplit {
    parameters: RecyclingParameters,
}

impl RecyclingSplit {
    pub fn from_parameters(parameters: RecyclingParameters) -> Self {
        Self { parameters }
    }

    /// Recycling rate for year index `year` (0-based)
    pub fn recycling_rate(&self, year: usize) -> FloatValue {
        let elapsed = (year + 1) as FloatValue;
        clamp_fraction(self.parameters.recycle_1 + self.parameters.recycle_2 * elapsed.ln())
    }

    pub fn solve(&self, disposed: &AnnualSeries, years: usize) -> WpctResult<RecyclingOutputs> {
        debug!(years, input_len = disposed.len(), "solving recycling split");

        let (recycled, landfill): (Vec<_>, Vec<_>) = (0..years)
            .map(|i| {
                let flow = disposed.value_at(i);
                let recycled = self.recycling_rate(i) * flow;
                (recycled, flow - recycled)
            })
            .unzip();

        Ok(RecyclingOutputs {
            recycled: recycled.into(),
            landfill: landfill.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    fn component(recycle_1: FloatValue, recycle_2: FloatValue) -> RecyclingSplit {
        RecyclingSplit::from_parameters(RecyclingParameters {
            recycle_1,
            recycle_2,
        })
    }

    #[test]
    fn constant_rate_split() {
        let outputs = component(0.5, 0.0)
            .solve(&AnnualSeries::from_vec(vec![10.0, 10.0]), 2)
            .unwrap();
        assert_eq!(outputs.recycled.to_vec(), vec![5.0, 5.0]);
        assert_eq!(outputs.landfill.to_vec(), vec![5.0, 5.0]);
    }

    #[test]
    fn rate_follows_log_of_elapsed_years() {
        let split = component(0.1, 0.05);
        assert!(is_close!(split.recycling_rate(0), 0.1));
        assert!(is_close!(split.recycling_rate(9), 0.1 + 0.05 * 10.0_f64.ln()));
        assert!(split.recycling_rate(50) > split.recycling_rate(10));
    }

    #[test]
    fn rate_is_clamped() {
        assert_eq!(component(0.9, 0.5).recycling_rate(100), 1.0);
        assert_eq!(component(0.2, -0.5).recycling_rate(100), 0.0);
    }

    #[test]
    fn split_conserves_disposals() {
        let disposed = AnnualSeries::from_vec(vec![4.0, 8.0, 1.5]);
        let outputs = component(0.3, 0.1).solve(&disposed, 5).unwrap();
        assert_eq!(outputs.recycled.len(), 5);
        for i in 0..5 {
            assert!(is_close!(
                outputs.recycled[i] + outputs.landfill[i],
                disposed.value_at(i)
            ));
            assert!(outputs.landfill[i] >= 0.0);
        }
    }
}
