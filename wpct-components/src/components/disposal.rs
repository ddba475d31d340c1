//! Disposal component for in-use wood products
//!
//! Products leave use according to a bell-shaped hazard in cohort age `t`:
//!
//! $$ h(t) = \max\left(0,\ \frac{p_1}{e^{\sqrt{2\pi}}} \exp\left(\frac{-p_2 (t - p_3)^2}{\max(p_3, 10^{-12})}\right)\right) $$
//!
//! The fraction of a cohort still in use at age `a` is
//!
//! $$ U(a) = \text{clamp}_{[0,1]}\left(1 - \int_0^a h(t)\,dt\right) $$
//!
//! Every year the in-use stock and the disposal flow are re-aggregated over all earlier
//! production cohorts, with a cohort produced in year `j` having age `i - j + 1` in year
//! `i`. Cost is quadratic in the number of years. The hazard and `U` only depend on age,
//! so both are tabulated once per call before the cohort loop, with `U` built from
//! year-long integrals accumulated in age order.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::sync::Arc;
use tracing::debug;
use wpct_core::errors::WpctResult;
use wpct_core::integrate::{Integrator, IntegratorKind};
use wpct_core::timeseries::{clamp_fraction, AnnualSeries, FloatValue};

/// Parameters for the disposal hazard curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisposalParameters {
    /// Peak scale of the hazard
    /// unit: 1 / yr
    pub disposal_1: FloatValue,
    /// Narrowness of the bell; larger values give a sharper peak
    /// unit: dimensionless
    pub disposal_2: FloatValue,
    /// Cohort age at which disposals peak
    /// unit: yr
    pub disposal_3: FloatValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisposalOutputs {
    /// Carbon still in use at the end of the year
    pub in_use: AnnualSeries,
    /// Carbon disposed during the year
    pub disposed: AnnualSeries,
}

/// Hazard and in-use fraction for each integer age `0..=max_age`
#[derive(Debug, Clone, PartialEq)]
pub struct AgeTable {
    pub in_use: Vec<FloatValue>,
    pub hazard: Vec<FloatValue>,
}

#[derive(Debug, Clone)]
pub struct DisposalCurve {
    parameters: DisposalParameters,
    integrator: Arc<dyn Integrator>,
}

impl DisposalCurve {
    /// Create a disposal curve using the default integrator
    pub fn from_parameters(parameters: DisposalParameters) -> Self {
        Self {
            parameters,
            integrator: IntegratorKind::default().build(),
        }
    }

    pub fn with_integrator(self, integrator: Arc<dyn Integrator>) -> Self {
        Self {
            parameters: self.parameters,
            integrator,
        }
    }

    pub fn parameters(&self) -> &DisposalParameters {
        &self.parameters
    }

    /// Instantaneous disposal rate at cohort age `t`
    pub fn disposal_rate(&self, t: FloatValue) -> FloatValue {
        let DisposalParameters {
            disposal_1,
            disposal_2,
            disposal_3,
        } = self.parameters;

        let scale = disposal_1 / (2.0 * PI).sqrt().exp();
        let shape = (-disposal_2 * (t - disposal_3).powi(2) / disposal_3.max(1e-12)).exp();
        (scale * shape).max(0.0)
    }

    /// Fraction of a cohort still in use at `age`
    pub fn in_use_fraction(&self, age: FloatValue) -> FloatValue {
        let hazard = |t: FloatValue| self.disposal_rate(t);
        let disposed = self.integrator.integrate(&hazard, 0.0, age).value;
        clamp_fraction(1.0 - disposed)
    }

    /// Tabulate the hazard and in-use fraction for ages `0..=max_age`.
    ///
    /// The disposed fraction is accumulated one year at a time,
    /// `D(k + 1) = D(k) + ∫ₖᵏ⁺¹ h(t) dt`, so every integral spans a single year and the
    /// in-use fraction is non-increasing in age.
    pub fn age_table(&self, max_age: usize) -> AgeTable {
        let hazard = |t: FloatValue| self.disposal_rate(t);

        let mut in_use = Vec::with_capacity(max_age + 1);
        let mut disposed = 0.0;
        for age in 0..=max_age {
            if age > 0 {
                let lower = (age - 1) as FloatValue;
                disposed += self
                    .integrator
                    .integrate(&hazard, lower, lower + 1.0)
                    .value
                    .max(0.0);
            }
            in_use.push(clamp_fraction(1.0 - disposed));
        }

        AgeTable {
            in_use,
            hazard: (0..=max_age)
                .map(|age| self.disposal_rate(age as FloatValue))
                .collect(),
        }
    }

    pub fn solve(&self, production: &AnnualSeries, years: usize) -> WpctResult<DisposalOutputs> {
        debug!(
            years,
            input_len = production.len(),
            "solving disposal curve"
        );

        let production = production.padded(years);
        let table = self.age_table(years);

        let mut in_use = AnnualSeries::zeros(years);
        let mut disposed = AnnualSeries::zeros(years);

        for i in 0..years {
            let (stock, flow) = (0..=i).fold((0.0, 0.0), |(stock, flow), j| {
                let cohort = production[j];
                let age = i - j + 1;
                (
                    stock + cohort * table.in_use[age],
                    flow + cohort * table.hazard[age],
                )
            });
            in_use.set(i, stock);
            disposed.set(i, flow);
        }

        Ok(DisposalOutputs { in_use, disposed })
    }
}
