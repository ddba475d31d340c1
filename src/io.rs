//! Annual production tables.
//!
//! Production is read from a CSV table with a `Year` column and one column of carbon mass
//! per product:
//!
//! ```text
//! Year,Biofuel,Biochar,Construction,Exterior,...
//! 2000,12.5,0.4,80.1,10.0,...
//! ```
//!
//! The number of rows sets the time horizon of a run. Empty cells are read as zero.

use indexmap::IndexMap;
use std::io::Read;
use std::path::Path;
use wpct_core::errors::{WpctError, WpctResult};
use wpct_core::timeseries::{AnnualSeries, FloatValue};

pub const YEAR_COLUMN: &str = "Year";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductionTable {
    years: Vec<i32>,
    series: IndexMap<String, AnnualSeries>,
}

impl ProductionTable {
    pub fn new(years: Vec<i32>) -> Self {
        Self {
            years,
            series: IndexMap::new(),
        }
    }

    /// Add a production series. Series shorter than the horizon are zero-extended when
    /// read by the models.
    pub fn with_series(mut self, name: &str, series: impl Into<AnnualSeries>) -> Self {
        self.series.insert(name.to_string(), series.into());
        self
    }

    pub fn from_reader<R: Read>(reader: R) -> WpctResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let year_index = headers
            .iter()
            .position(|h| h == YEAR_COLUMN)
            .ok_or_else(|| WpctError::InvalidData(format!("no {YEAR_COLUMN:?} column")))?;

        let mut years = Vec::new();
        let mut columns: Vec<Vec<FloatValue>> = vec![Vec::new(); headers.len()];

        for (row, record) in reader.records().enumerate() {
            let record = record?;
            for (index, cell) in record.iter().enumerate() {
                if index == year_index {
                    let year = cell.parse::<i32>().map_err(|_| {
                        WpctError::InvalidData(format!("row {}: invalid year {:?}", row + 1, cell))
                    })?;
                    years.push(year);
                } else {
                    columns[index].push(parse_cell(cell).ok_or_else(|| {
                        WpctError::InvalidData(format!(
                            "row {}, column {:?}: invalid value {:?}",
                            row + 1,
                            &headers[index],
                            cell
                        ))
                    })?);
                }
            }
        }

        let mut table = Self::new(years);
        for (index, (header, values)) in headers.iter().zip(columns).enumerate() {
            if index != year_index {
                table = table.with_series(header, values);
            }
        }
        Ok(table)
    }

    pub fn from_path(path: impl AsRef<Path>) -> WpctResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Number of years in the run
    pub fn horizon(&self) -> usize {
        self.years.len()
    }

    pub fn series(&self, name: &str) -> WpctResult<&AnnualSeries> {
        self.series
            .get(name)
            .ok_or_else(|| WpctError::MissingSeries(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }
}

fn parse_cell(cell: &str) -> Option<FloatValue> {
    if cell.is_empty() {
        Some(0.0)
    } else {
        cell.parse::<FloatValue>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_production_csv() {
        let data = "Year,Biofuel,Construction\n\
                    2000,10.5,100\n\
                    2001,,90\n\
                    2002,7,80.25\n";
        let table = ProductionTable::from_reader(data.as_bytes()).unwrap();

        assert_eq!(table.years(), &[2000, 2001, 2002]);
        assert_eq!(table.horizon(), 3);
        assert_eq!(
            table.series("Biofuel").unwrap().to_vec(),
            vec![10.5, 0.0, 7.0]
        );
        assert_eq!(
            table.series("Construction").unwrap().to_vec(),
            vec![100.0, 90.0, 80.25]
        );
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["Biofuel", "Construction"]);
    }

    #[test]
    fn missing_series_is_reported() {
        let table = ProductionTable::new(vec![2000]);
        assert!(matches!(
            table.series("Exterior"),
            Err(WpctError::MissingSeries(name)) if name == "Exterior"
        ));
    }

    #[test]
    fn year_column_is_required() {
        let data = "Biofuel\n1.0\n";
        assert!(matches!(
            ProductionTable::from_reader(data.as_bytes()),
            Err(WpctError::InvalidData(_))
        ));
    }

    #[test]
    fn non_numeric_cell_is_rejected() {
        let data = "Year,Biofuel\n2000,lots\n";
        assert!(matches!(
            ProductionTable::from_reader(data.as_bytes()),
            Err(WpctError::InvalidData(_))
        ));
    }
}
