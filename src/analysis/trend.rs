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

//! Linear trend over the row order of one numeric column.
//!
//! Row order is the time axis: the slope is fitted against the 0-based
//! position among the numeric values, and the time column only supplies the
//! start and end labels. Parsed timestamps are never used.

use serde::Serialize;
use serde_json::Value;

use crate::analysis::ZiAnalysisOutput;
use crate::analyzer::{required_str, ZiAnalyzer};
use crate::config::ZiEngineConfig;
use crate::dataset::ZiDataset;
use crate::errors::Result;
use crate::value::parse_numeric;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZiTrendDirection {
    Increasing,
    /// Also reported for a slope of exactly zero.
    Decreasing,
}

/// Fitted trend.
///
/// `percent_change` is non-finite when the first value is 0, and
/// `volatility` is non-finite when any value before the last is 0. Both
/// serialize as `null` in that case.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ZiTrend {
    pub direction: ZiTrendDirection,
    pub slope: f64,
    pub intercept: f64,
    pub start_value: f64,
    pub end_value: f64,
    /// `(end - start) / start * 100`, rounded to two decimals.
    pub percent_change: f64,
    /// Mean of `|v[i] - v[i-1]| / v[i-1]`.
    pub volatility: f64,
    pub points: usize,
    pub start_label: Value,
    pub end_label: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ZiTrendOutcome {
    Insufficient { required: usize, actual: usize },
    Trend(ZiTrend),
}

impl ZiTrendOutcome {
    pub fn trend(&self) -> Option<&ZiTrend> {
        match self {
            ZiTrendOutcome::Trend(t) => Some(t),
            ZiTrendOutcome::Insufficient { .. } => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, ZiTrendOutcome::Insufficient { .. })
    }
}

pub fn analyze_trend(dataset: &ZiDataset, time_column: &str, value_column: &str) -> ZiTrendOutcome {
    analyze_trend_with_config(dataset, time_column, value_column, &ZiEngineConfig::default())
}

pub fn analyze_trend_with_config(
    dataset: &ZiDataset,
    time_column: &str,
    value_column: &str,
    config: &ZiEngineConfig,
) -> ZiTrendOutcome {
    let points: Vec<(&Value, f64)> = dataset
        .rows()
        .iter()
        .zip(dataset.column_values(time_column))
        .filter_map(|(row, label)| {
            let value = row.get(value_column).and_then(parse_numeric)?;
            Some((label, value))
        })
        .collect();

    // A slope needs two points whatever the config says.
    let required = config.min_trend_points.max(2);
    if points.len() < required {
        return ZiTrendOutcome::Insufficient {
            required,
            actual: points.len(),
        };
    }

    let values: Vec<f64> = points.iter().map(|(_, v)| *v).collect();
    let (slope, intercept) = linear_fit(&values);
    let start = values[0];
    let end = values[values.len() - 1];

    ZiTrendOutcome::Trend(ZiTrend {
        direction: if slope > 0.0 {
            ZiTrendDirection::Increasing
        } else {
            ZiTrendDirection::Decreasing
        },
        slope,
        intercept,
        start_value: start,
        end_value: end,
        percent_change: round2((end - start) / start * 100.0),
        volatility: volatility(&values),
        points: values.len(),
        start_label: points[0].0.clone(),
        end_label: points[points.len() - 1].0.clone(),
    })
}

/// Ordinary least squares of value against index, mean-centered.
fn linear_fit(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n;

    let (numerator, denominator) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(num, den), (i, y)| {
            let dx = i as f64 - mean_x;
            (num + dx * (y - mean_y), den + dx * dx)
        });

    let slope = if denominator == 0.0 { 0.0 } else { numerator / denominator };
    (slope, mean_y - slope * mean_x)
}

fn volatility(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let changes: f64 = values
        .windows(2)
        .map(|w| (w[1] - w[0]).abs() / w[0])
        .sum();
    changes / (values.len() - 1) as f64
}

fn round2(value: f64) -> f64 {
    if value.is_finite() {
        (value * 100.0).round() / 100.0
    } else {
        value
    }
}

/// Trend analyzer over a label column and a value column.
#[derive(Debug)]
pub struct ZiTrendAnalyzer {
    time_column: String,
    value_column: String,
    config: ZiEngineConfig,
}

impl ZiTrendAnalyzer {
    #[allow(non_snake_case)]
    pub fn new(time_column: impl Into<String>, value_column: impl Into<String>) -> Self {
        Self {
            time_column: time_column.into(),
            value_column: value_column.into(),
            config: ZiEngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ZiEngineConfig) -> Self {
        self.config = config;
        self
    }
}

impl ZiAnalyzer for ZiTrendAnalyzer {
    fn name(&self) -> &'static str {
        "trends"
    }

    fn analyze(&self, dataset: &ZiDataset) -> Result<ZiAnalysisOutput> {
        Ok(ZiAnalysisOutput::Trend(analyze_trend_with_config(
            dataset,
            &self.time_column,
            &self.value_column,
            &self.config,
        )))
    }
}

pub fn trend_factory(
    config: &Value,
    engine: &ZiEngineConfig,
) -> Result<Box<dyn ZiAnalyzer + Send + Sync>> {
    let time_column = required_str(config, "trends", "time_column")?;
    let value_column = required_str(config, "trends", "value_column")?;
    Ok(Box::new(
        ZiTrendAnalyzer::new(time_column, value_column).with_config(engine.clone()),
    ))
}
