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

//! # Analysis Module
//!
//! Pure statistics over a [`ZiDataset`](crate::dataset::ZiDataset):
//!
//! - **summary**: per-column numeric or categorical summaries
//! - **correlation**: symmetric Pearson matrix
//! - **trend**: least-squares direction, percent change and volatility
//! - **anomaly**: IQR fence outliers
//! - **grouping**: group-by with sum/avg/count/min/max
//!
//! Every function here is deterministic and free of I/O. Each module also
//! provides a [`ZiAnalyzer`](crate::analyzer::ZiAnalyzer) wrapper and its
//! factory.

pub mod anomaly;
pub mod correlation;
pub mod grouping;
pub mod summary;
pub mod trend;

use serde::Serialize;

use crate::errors::Result;

pub use anomaly::{
    detect_anomalies, detect_anomalies_with_config, ZiAnomaly, ZiAnomalyDetector, ZiAnomalyKind,
    ZiAnomalyOutcome, ZiAnomalyReport, ZiBounds,
};
pub use correlation::{
    correlate, correlate_with_config, pearson, ZiCorrelationMatrix, ZiCorrelator,
};
pub use grouping::{
    group_and_aggregate, group_and_aggregate_with_config, ZiAggregation, ZiGroupAggregator,
    ZiGroupRow,
};
pub use summary::{
    summarize, summarize_with_config, ZiCategoricalSummary, ZiColumnSummary, ZiNumericSummary,
    ZiSummarizer, ZiSummary, ZiValueCount,
};
pub use trend::{
    analyze_trend, analyze_trend_with_config, ZiTrend, ZiTrendAnalyzer, ZiTrendDirection,
    ZiTrendOutcome,
};

/// Result of any analyzer, tagged by kind when serialized.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum ZiAnalysisOutput {
    Summary(ZiSummary),
    Correlation(ZiCorrelationMatrix),
    Trend(ZiTrendOutcome),
    Anomalies(ZiAnomalyOutcome),
    Grouped(Vec<ZiGroupRow>),
}

impl ZiAnalysisOutput {
    pub fn as_summary(&self) -> Option<&ZiSummary> {
        match self {
            ZiAnalysisOutput::Summary(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_correlation(&self) -> Option<&ZiCorrelationMatrix> {
        match self {
            ZiAnalysisOutput::Correlation(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_trend(&self) -> Option<&ZiTrendOutcome> {
        match self {
            ZiAnalysisOutput::Trend(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_anomalies(&self) -> Option<&ZiAnomalyOutcome> {
        match self {
            ZiAnalysisOutput::Anomalies(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_grouped(&self) -> Option<&[ZiGroupRow]> {
        match self {
            ZiAnalysisOutput::Grouped(rows) => Some(rows),
            _ => None,
        }
    }

    /// The bare result as JSON, without the kind tag.
    pub fn result_json(&self) -> Result<serde_json::Value> {
        let value = match self {
            ZiAnalysisOutput::Summary(s) => serde_json::to_value(s),
            ZiAnalysisOutput::Correlation(m) => serde_json::to_value(m),
            ZiAnalysisOutput::Trend(t) => serde_json::to_value(t),
            ZiAnalysisOutput::Anomalies(a) => serde_json::to_value(a),
            ZiAnalysisOutput::Grouped(rows) => serde_json::to_value(rows),
        }?;
        Ok(value)
    }
}
