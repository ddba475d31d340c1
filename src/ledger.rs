//! The carbon ledger: one column of annual values per pool or flux.

use crate::io::YEAR_COLUMN;
use indexmap::IndexMap;
use std::io::Write;
use std::path::Path;
use wpct_core::errors::WpctResult;
use wpct_core::timeseries::AnnualSeries;

/// Ordered set of named annual series sharing one year axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    years: Vec<i32>,
    columns: IndexMap<String, AnnualSeries>,
}

impl Ledger {
    pub fn new(years: Vec<i32>) -> Self {
        Self {
            years,
            columns: IndexMap::new(),
        }
    }

    /// Append a column, padded or truncated to the ledger's horizon.
    ///
    /// A column with an existing name replaces the earlier one in place.
    pub fn insert(&mut self, name: impl Into<String>, series: &AnnualSeries) {
        self.columns
            .insert(name.into(), series.padded(self.years.len()));
    }

    pub fn column(&self, name: &str) -> Option<&AnnualSeries> {
        self.columns.get(name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn horizon(&self) -> usize {
        self.years.len()
    }

    /// Write the ledger as CSV, `Year` first then every column in insertion order.
    pub fn write_csv<W: Write>(&self, writer: W) -> WpctResult<()> {
        let mut writer = csv::Writer::from_writer(writer);

        writer.write_record(std::iter::once(YEAR_COLUMN).chain(self.column_names()))?;
        for (i, year) in self.years.iter().enumerate() {
            let row = std::iter::once(year.to_string())
                .chain(self.columns.values().map(|series| series[i].to_string()));
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_path(&self, path: impl AsRef<Path>) -> WpctResult<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_padded_to_horizon() {
        let mut ledger = Ledger::new(vec![2000, 2001, 2002]);
        ledger.insert("Short", &AnnualSeries::from_vec(vec![1.0]));
        ledger.insert("Long", &AnnualSeries::from_vec(vec![1.0, 2.0, 3.0, 4.0]));

        assert_eq!(ledger.column("Short").unwrap().to_vec(), vec![1.0, 0.0, 0.0]);
        assert_eq!(ledger.column("Long").unwrap().to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(ledger.column_names().collect::<Vec<_>>(), vec!["Short", "Long"]);
    }

    #[test]
    fn writes_csv() {
        let mut ledger = Ledger::new(vec![2020, 2021]);
        ledger.insert("Fuel_Emissions", &AnnualSeries::from_vec(vec![30.0, 1.5]));
        ledger.insert("Biochar_Stock", &AnnualSeries::from_vec(vec![63.0, 0.25]));

        let mut buffer = Vec::new();
        ledger.write_csv(&mut buffer).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Year,Fuel_Emissions,Biochar_Stock\n2020,30,63\n2021,1.5,0.25\n"
        );
    }
}
