//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zi.
//! The Zi project belongs to the Dunimd project team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! Pearson correlation matrix over numeric-coercible columns.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

use crate::analysis::ZiAnalysisOutput;
use crate::analyzer::{optional_columns, ZiAnalyzer};
use crate::config::{ZiEngineConfig, ZiPairingMode};
use crate::dataset::ZiDataset;
use crate::errors::Result;
use crate::value::parse_numeric;

/// Symmetric correlation matrix; both `(a, b)` and `(b, a)` are populated.
#[derive(Clone, Debug, PartialEq)]
pub struct ZiCorrelationMatrix {
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl ZiCorrelationMatrix {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Coefficient for a column pair, in either order.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        Some(self.values[i][j])
    }

    /// Coefficient by matrix position.
    pub fn at(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied()
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

impl Serialize for ZiCorrelationMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut outer = serializer.serialize_map(Some(self.columns.len()))?;
        for (i, name) in self.columns.iter().enumerate() {
            outer.serialize_entry(name, &Row { matrix: self, row: i })?;
        }
        outer.end()
    }
}

struct Row<'a> {
    matrix: &'a ZiCorrelationMatrix,
    row: usize,
}

impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let columns = &self.matrix.columns;
        let mut inner = serializer.serialize_map(Some(columns.len()))?;
        for (j, name) in columns.iter().enumerate() {
            inner.serialize_entry(name, &self.matrix.values[self.row][j])?;
        }
        inner.end()
    }
}

/// Pearson coefficient over the common prefix of `x` and `y`.
///
/// Returns 0 for fewer than two pairs or when either side has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut numerator = 0.0;
    let mut denom_x = 0.0;
    let mut denom_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        numerator += dx * dy;
        denom_x += dx * dx;
        denom_y += dy * dy;
    }

    let denom = (denom_x * denom_y).sqrt();
    if denom == 0.0 {
        0.0
    } else {
        numerator / denom
    }
}

fn paired_series(dataset: &ZiDataset, a: &str, b: &str, mode: ZiPairingMode) -> (Vec<f64>, Vec<f64>) {
    match mode {
        ZiPairingMode::RowWise => dataset
            .rows()
            .iter()
            .filter_map(|row| {
                let x = row.get(a).and_then(parse_numeric)?;
                let y = row.get(b).and_then(parse_numeric)?;
                Some((x, y))
            })
            .unzip(),
        ZiPairingMode::Independent => (numeric_column(dataset, a), numeric_column(dataset, b)),
    }
}

fn numeric_column(dataset: &ZiDataset, column: &str) -> Vec<f64> {
    dataset.column_values(column).filter_map(parse_numeric).collect()
}

/// Correlates every pair of `columns` with the default engine config.
pub fn correlate<S: AsRef<str> + Sync>(dataset: &ZiDataset, columns: &[S]) -> ZiCorrelationMatrix {
    correlate_with_config(dataset, columns, &ZiEngineConfig::default())
}

pub fn correlate_with_config<S: AsRef<str> + Sync>(
    dataset: &ZiDataset,
    columns: &[S],
    config: &ZiEngineConfig,
) -> ZiCorrelationMatrix {
    let names: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
    let n = names.len();

    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect();
    let coefficient = |&(i, j): &(usize, usize)| {
        let (x, y) = paired_series(dataset, &names[i], &names[j], config.pairing);
        pearson(&x, &y)
    };

    #[cfg(feature = "parallel")]
    let upper: Vec<f64> = pairs.par_iter().map(coefficient).collect();
    #[cfg(not(feature = "parallel"))]
    let upper: Vec<f64> = pairs.iter().map(coefficient).collect();

    let mut values = vec![vec![0.0; n]; n];
    for (i, row) in values.iter_mut().enumerate() {
        row[i] = 1.0;
    }
    for (&(i, j), r) in pairs.iter().zip(upper) {
        values[i][j] = r;
        values[j][i] = r;
    }

    ZiCorrelationMatrix {
        columns: names,
        values,
    }
}

/// Correlation analyzer; without explicit columns it uses every header.
#[derive(Debug)]
pub struct ZiCorrelator {
    columns: Option<Vec<String>>,
    config: ZiEngineConfig,
}

impl ZiCorrelator {
    #[allow(non_snake_case)]
    pub fn new(columns: Option<Vec<String>>) -> Self {
        Self {
            columns,
            config: ZiEngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ZiEngineConfig) -> Self {
        self.config = config;
        self
    }
}

impl ZiAnalyzer for ZiCorrelator {
    fn name(&self) -> &'static str {
        "correlation"
    }

    fn analyze(&self, dataset: &ZiDataset) -> Result<ZiAnalysisOutput> {
        let columns = self.columns.as_deref().unwrap_or(dataset.headers());
        Ok(ZiAnalysisOutput::Correlation(correlate_with_config(
            dataset,
            columns,
            &self.config,
        )))
    }
}

pub fn correlation_factory(
    config: &Value,
    engine: &ZiEngineConfig,
) -> Result<Box<dyn ZiAnalyzer + Send + Sync>> {
    let columns = optional_columns(config, "columns")?;
    Ok(Box::new(ZiCorrelator::new(columns).with_config(engine.clone())))
}
