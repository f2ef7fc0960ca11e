//! Tabular export of bootstrap estimates
//!
//! Rows are labelled by parameter name and an external covariate `x`
//! (for example a growth condition), so several fits can be collected in
//! one table and later filtered by parameter.

use crate::bootstrap::MleBootstrapResult;
use crate::percentile::validate_quantiles;
use crate::ConfidenceInterval;
use cgrowth_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io;

/// One parameter estimate with its interval bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRow {
    pub parameter: String,
    pub value: f64,
    pub x: f64,
    pub lower: f64,
    pub upper: f64,
}

/// A collection of estimate rows sharing one percentile pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateTable {
    lower_quantile: f64,
    upper_quantile: f64,
    rows: Vec<EstimateRow>,
}

impl Default for EstimateTable {
    fn default() -> Self {
        Self {
            lower_quantile: crate::percentile::DEFAULT_LOWER_QUANTILE,
            upper_quantile: crate::percentile::DEFAULT_UPPER_QUANTILE,
            rows: Vec::new(),
        }
    }
}

impl EstimateTable {
    /// Create an empty table for intervals at the given percentiles
    pub fn new(lower_quantile: f64, upper_quantile: f64) -> Result<Self> {
        validate_quantiles(lower_quantile, upper_quantile)?;
        Ok(Self {
            lower_quantile,
            upper_quantile,
            rows: Vec::new(),
        })
    }

    pub fn push(&mut self, row: EstimateRow) {
        self.rows.push(row);
    }

    /// Append one row per parameter
    ///
    /// `names`, `values` and `intervals` are zipped in order and must have
    /// equal lengths. Intervals must use this table's percentile pair.
    pub fn push_estimates(
        &mut self,
        names: &[&str],
        values: &[f64],
        intervals: &[ConfidenceInterval],
        x: f64,
    ) -> Result<()> {
        if names.len() != values.len() {
            return Err(Error::size_mismatch(names.len(), values.len(), "estimate values"));
        }
        if names.len() != intervals.len() {
            return Err(Error::size_mismatch(names.len(), intervals.len(), "estimate intervals"));
        }
        if let Some(ci) = intervals.iter().find(|ci| {
            ci.lower_quantile != self.lower_quantile || ci.upper_quantile != self.upper_quantile
        }) {
            return Err(Error::InvalidInput(format!(
                "Interval percentiles ({}, {}) do not match table percentiles ({}, {})",
                ci.lower_quantile, ci.upper_quantile, self.lower_quantile, self.upper_quantile
            )));
        }

        self.rows.extend(names.iter().zip(values).zip(intervals).map(
            |((name, &value), ci)| EstimateRow {
                parameter: (*name).to_string(),
                value,
                x,
                lower: ci.lower,
                upper: ci.upper,
            },
        ));
        Ok(())
    }

    /// Append every parameter of a bootstrap MLE result
    pub fn push_result(&mut self, result: &MleBootstrapResult, x: f64) -> Result<()> {
        self.push_estimates(
            result.model.param_names(),
            result.estimate.as_slice(),
            &result.intervals,
            x,
        )
    }

    /// Rows for a single parameter, in insertion order
    pub fn for_parameter<'a>(&'a self, parameter: &'a str) -> impl Iterator<Item = &'a EstimateRow> {
        self.rows.iter().filter(move |row| row.parameter == parameter)
    }

    pub fn rows(&self) -> &[EstimateRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column headers; the bound columns are named after their percentiles
    pub fn headers(&self) -> [String; 5] {
        [
            "parameter".to_string(),
            "value".to_string(),
            "x".to_string(),
            format!("{} percentile", self.lower_quantile),
            format!("{} percentile", self.upper_quantile),
        ]
    }

    /// Write the table as CSV with a header row
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        wtr.write_record(self.headers())?;
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
