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

//! IQR fence outlier detection.
//!
//! Quartiles are positional, not interpolated: with `n` sorted values,
//! Q1 is the element at `floor(0.25 * n)` and Q3 the element at
//! `floor(0.75 * n)`.

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
pub enum ZiAnomalyKind {
    Low,
    High,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ZiAnomaly {
    /// Position of the row in the dataset.
    pub index: usize,
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: ZiAnomalyKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ZiBounds {
    pub lower: f64,
    pub upper: f64,
}

impl ZiBounds {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ZiAnomalyReport {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub bounds: ZiBounds,
    /// Outliers in row order.
    pub anomalies: Vec<ZiAnomaly>,
    pub count: usize,
}

/// `Insufficient` is distinct from a report with no anomalies.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "method")]
pub enum ZiAnomalyOutcome {
    #[serde(rename = "insufficient_data")]
    Insufficient { required: usize, actual: usize },
    #[serde(rename = "iqr")]
    Detected(ZiAnomalyReport),
}

impl ZiAnomalyOutcome {
    pub fn report(&self) -> Option<&ZiAnomalyReport> {
        match self {
            ZiAnomalyOutcome::Detected(r) => Some(r),
            ZiAnomalyOutcome::Insufficient { .. } => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, ZiAnomalyOutcome::Insufficient { .. })
    }

    /// Flagged values; empty when there was too little data.
    pub fn anomalies(&self) -> &[ZiAnomaly] {
        self.report().map(|r| r.anomalies.as_slice()).unwrap_or(&[])
    }
}

pub fn detect_anomalies(dataset: &ZiDataset, column: &str) -> ZiAnomalyOutcome {
    detect_anomalies_with_config(dataset, column, &ZiEngineConfig::default())
}

pub fn detect_anomalies_with_config(
    dataset: &ZiDataset,
    column: &str,
    config: &ZiEngineConfig,
) -> ZiAnomalyOutcome {
    let indexed: Vec<(usize, f64)> = dataset
        .column_values(column)
        .enumerate()
        .filter_map(|(index, raw)| parse_numeric(raw).map(|v| (index, v)))
        .collect();

    let required = config.min_anomaly_points.max(1);
    if indexed.len() < required {
        return ZiAnomalyOutcome::Insufficient {
            required,
            actual: indexed.len(),
        };
    }

    let mut sorted: Vec<f64> = indexed.iter().map(|&(_, v)| v).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len() as f64;
    let q1 = sorted[(0.25 * n).floor() as usize];
    let q3 = sorted[(0.75 * n).floor() as usize];
    let iqr = q3 - q1;
    let bounds = ZiBounds {
        lower: q1 - config.iqr_multiplier * iqr,
        upper: q3 + config.iqr_multiplier * iqr,
    };

    let anomalies: Vec<ZiAnomaly> = indexed
        .into_iter()
        .filter(|&(_, v)| !bounds.contains(v))
        .map(|(index, value)| ZiAnomaly {
            index,
            value,
            kind: if value < bounds.lower {
                ZiAnomalyKind::Low
            } else {
                ZiAnomalyKind::High
            },
        })
        .collect();

    ZiAnomalyOutcome::Detected(ZiAnomalyReport {
        q1,
        q3,
        iqr,
        bounds,
        count: anomalies.len(),
        anomalies,
    })
}

/// Anomaly analyzer for one column.
#[derive(Debug)]
pub struct ZiAnomalyDetector {
    column: String,
    config: ZiEngineConfig,
}

impl ZiAnomalyDetector {
    #[allow(non_snake_case)]
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            config: ZiEngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ZiEngineConfig) -> Self {
        self.config = config;
        self
    }
}

impl ZiAnalyzer for ZiAnomalyDetector {
    fn name(&self) -> &'static str {
        "anomalies"
    }

    fn analyze(&self, dataset: &ZiDataset) -> Result<ZiAnalysisOutput> {
        Ok(ZiAnalysisOutput::Anomalies(detect_anomalies_with_config(
            dataset,
            &self.column,
            &self.config,
        )))
    }
}

pub fn anomaly_factory(
    config: &Value,
    engine: &ZiEngineConfig,
) -> Result<Box<dyn ZiAnalyzer + Send + Sync>> {
    let column = required_str(config, "anomalies", "column")?;
    Ok(Box::new(ZiAnomalyDetector::new(column).with_config(engine.clone())))
}
