//! Annual carbon-mass series.
//!
//! Every quantity the tracker moves between models is an [`AnnualSeries`]: one value per
//! year index `0..n`, in chronological order. Reads past the end of a series return zero,
//! which is how shorter inputs are extended to the requested horizon.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::ops::Index;

pub type FloatValue = f64;

/// Clamp a rate or fraction to `[0, 1]`.
///
/// NaN maps to zero.
pub fn clamp_fraction(value: FloatValue) -> FloatValue {
    value.max(0.0).min(1.0)
}

/// Ordered sequence of annual carbon-mass values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnualSeries {
    values: Array1<FloatValue>,
}

impl AnnualSeries {
    pub fn from_values(values: Array1<FloatValue>) -> Self {
        Self { values }
    }

    pub fn from_vec(values: Vec<FloatValue>) -> Self {
        Self::from_values(Array1::from_vec(values))
    }

    pub fn zeros(len: usize) -> Self {
        Self::from_values(Array1::zeros(len))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value for year `index`, or zero if the series does not reach that year.
    pub fn value_at(&self, index: usize) -> FloatValue {
        self.values.get(index).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, index: usize, value: FloatValue) {
        self.values[index] = value;
    }

    /// Series of exactly `years` elements, zero-extended or truncated.
    pub fn padded(&self, years: usize) -> Self {
        Self::from_values(Array1::from_shape_fn(years, |i| self.value_at(i)))
    }

    pub fn values(&self) -> &Array1<FloatValue> {
        &self.values
    }

    pub fn to_vec(&self) -> Vec<FloatValue> {
        self.values.to_vec()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FloatValue> {
        self.values.iter()
    }

    pub fn sum(&self) -> FloatValue {
        self.values.sum()
    }

    /// Elementwise sum. The shorter series is zero-extended.
    pub fn add(&self, other: &AnnualSeries) -> AnnualSeries {
        let len = self.len().max(other.len());
        Self::from_values(Array1::from_shape_fn(len, |i| {
            self.value_at(i) + other.value_at(i)
        }))
    }

    /// Elementwise sum of several series, as used when merging landfill inputs.
    pub fn sum_all<'a>(series: impl IntoIterator<Item = &'a AnnualSeries>) -> AnnualSeries {
        series
            .into_iter()
            .fold(AnnualSeries::default(), |acc, s| acc.add(s))
    }
}

impl From<Vec<FloatValue>> for AnnualSeries {
    fn from(values: Vec<FloatValue>) -> Self {
        Self::from_vec(values)
    }
}

impl FromIterator<FloatValue> for AnnualSeries {
    fn from_iter<T: IntoIterator<Item = FloatValue>>(iter: T) -> Self {
        Self::from_values(iter.into_iter().collect())
    }
}

impl Index<usize> for AnnualSeries {
    type Output = FloatValue;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}
