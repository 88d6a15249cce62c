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

//! # Zi Analysis Engine
//!
//! Maps an [`ZiAnalysisRequest`] onto one analyzer, runs it and, on request,
//! asks an insight provider for commentary on the result.
//!
//! ## Request shapes
//!
//! | `analysis_type` | arguments |
//! |-----------------|-----------|
//! | `summary`       | `columns` (defaults to every header) |
//! | `correlation`   | `columns` (defaults to every header) |
//! | `trends`        | `columns[0]` time label, `columns[1]` value |
//! | `anomalies`     | `columns[0]` |
//! | `grouped`       | `group_by` plus `aggregations`, or `columns` summed |
//!
//! Names registered through [`ZiAnalysisEngine::register`] are also
//! accepted; their factory receives the request itself as configuration.
//!
//! ```rust
//! use zi_insight::engine::{ZiAnalysisEngine, ZiAnalysisRequest};
//!
//! let engine = ZiAnalysisEngine::new();
//! let request = ZiAnalysisRequest::new("anomalies").with_columns(["latency"]);
//! let output = engine.run(&dataset, &request)?;
//! ```

use std::fmt;
use std::str::FromStr;

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::analysis::ZiAnalysisOutput;
use crate::analyzer::{execute_analyzer, AnalyzerFactory, ZiAnalyzer, ZiAnalyzerRegistry};
use crate::config::ZiEngineConfig;
use crate::dataset::ZiDataset;
use crate::errors::{Result, ZiError};
use crate::insight::{ZiInsight, ZiInsightProvider, ZiInsightRequest};

/// The five built-in analyses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZiAnalysisKind {
    Summary,
    Correlation,
    Trends,
    Anomalies,
    Grouped,
}

impl ZiAnalysisKind {
    pub const ALL: [ZiAnalysisKind; 5] = [
        ZiAnalysisKind::Summary,
        ZiAnalysisKind::Correlation,
        ZiAnalysisKind::Trends,
        ZiAnalysisKind::Anomalies,
        ZiAnalysisKind::Grouped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ZiAnalysisKind::Summary => "summary",
            ZiAnalysisKind::Correlation => "correlation",
            ZiAnalysisKind::Trends => "trends",
            ZiAnalysisKind::Anomalies => "anomalies",
            ZiAnalysisKind::Grouped => "grouped",
        }
    }

    /// Suggested visualization for this kind of result.
    pub fn chart(&self) -> ZiChartKind {
        match self {
            ZiAnalysisKind::Summary => ZiChartKind::Table,
            ZiAnalysisKind::Trends => ZiChartKind::Line,
            ZiAnalysisKind::Correlation => ZiChartKind::Heatmap,
            ZiAnalysisKind::Anomalies => ZiChartKind::Scatter,
            ZiAnalysisKind::Grouped => ZiChartKind::Bar,
        }
    }
}

impl fmt::Display for ZiAnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZiAnalysisKind {
    type Err = ZiError;

    fn from_str(s: &str) -> Result<Self> {
        ZiAnalysisKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ZiError::validation(format!("unknown analysis type '{s}'")))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZiChartKind {
    Table,
    Line,
    Heatmap,
    Scatter,
    Bar,
}

/// One analysis to run, as sent by a client.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZiAnalysisRequest {
    pub analysis_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    /// `{"column": "kind"}` or `[["column", "kind"], ...]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Value>,
}

impl ZiAnalysisRequest {
    #[allow(non_snake_case)]
    pub fn new(analysis_type: impl Into<String>) -> Self {
        Self {
            analysis_type: analysis_type.into(),
            ..Default::default()
        }
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_group_by(mut self, column: impl Into<String>) -> Self {
        self.group_by = Some(column.into());
        self
    }

    pub fn with_aggregations(mut self, aggregations: Value) -> Self {
        self.aggregations = Some(aggregations);
        self
    }

    fn column_at(&self, index: usize, needed: usize) -> Result<&str> {
        self.columns
            .as_deref()
            .filter(|cols| cols.len() >= needed)
            .map(|cols| cols[index].as_str())
            .ok_or_else(|| {
                ZiError::validation(format!(
                    "{} analysis requires at least {needed} column(s)",
                    self.analysis_type
                ))
            })
    }
}

/// Result plus commentary, ready to hand to a client.
#[derive(Clone, Debug, Serialize)]
pub struct ZiAnalysisReport {
    pub analysis_type: String,
    #[serde(serialize_with = "serialize_result")]
    pub result: ZiAnalysisOutput,
    pub insights: ZiInsight,
    pub chart: ZiChartKind,
}

fn serialize_result<S: Serializer>(
    output: &ZiAnalysisOutput,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match output {
        ZiAnalysisOutput::Summary(s) => s.serialize(serializer),
        ZiAnalysisOutput::Correlation(m) => m.serialize(serializer),
        ZiAnalysisOutput::Trend(t) => t.serialize(serializer),
        ZiAnalysisOutput::Anomalies(a) => a.serialize(serializer),
        ZiAnalysisOutput::Grouped(rows) => rows.serialize(serializer),
    }
}

/// Request dispatcher over an analyzer registry.
pub struct ZiAnalysisEngine {
    registry: ZiAnalyzerRegistry,
}

impl Default for ZiAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ZiAnalysisEngine {
    #[allow(non_snake_case)]
    pub fn new() -> Self {
        Self {
            registry: ZiAnalyzerRegistry::with_defaults(),
        }
    }

    pub fn with_config(mut self, config: ZiEngineConfig) -> Self {
        self.registry = self.registry.with_config(config);
        self
    }

    pub fn config(&self) -> &ZiEngineConfig {
        self.registry.config()
    }

    /// Adds an analysis under a new name, or replaces a built-in one.
    pub fn register(&mut self, name: impl Into<String>, factory: AnalyzerFactory) {
        self.registry.register(name, factory);
    }

    /// Builds the analyzer a request asks for without running it.
    pub fn analyzer_for(
        &self,
        dataset: &ZiDataset,
        request: &ZiAnalysisRequest,
    ) -> Result<Box<dyn ZiAnalyzer + Send + Sync>> {
        let name = request.analysis_type.as_str();
        match name.parse::<ZiAnalysisKind>() {
            Ok(kind) => {
                let config = Self::factory_config(kind, dataset, request)?;
                self.registry.build(kind.as_str(), &config)
            }
            Err(_) if self.registry.contains(name) => {
                self.registry.build(name, &serde_json::to_value(request)?)
            }
            Err(err) => Err(err),
        }
    }

    pub fn run(&self, dataset: &ZiDataset, request: &ZiAnalysisRequest) -> Result<ZiAnalysisOutput> {
        let analyzer = self.analyzer_for(dataset, request)?;
        log::debug!(
            "running {} analysis over {} rows and {} columns",
            analyzer.name(),
            dataset.row_count(),
            dataset.column_count()
        );
        execute_analyzer(analyzer.as_ref(), dataset)
    }

    /// Runs the analysis, then hands the finished result to `provider`.
    pub fn run_with_insights(
        &self,
        dataset: &ZiDataset,
        request: &ZiAnalysisRequest,
        document_name: &str,
        provider: &dyn ZiInsightProvider,
    ) -> Result<ZiAnalysisReport> {
        let result = self.run(dataset, request)?;
        let insights = provider.generate(&ZiInsightRequest {
            analysis_type: request.analysis_type.clone(),
            document_name: document_name.to_string(),
            data: result.result_json()?,
        })?;
        let chart = request
            .analysis_type
            .parse::<ZiAnalysisKind>()
            .map(|kind| kind.chart())
            .unwrap_or(ZiChartKind::Table);

        Ok(ZiAnalysisReport {
            analysis_type: request.analysis_type.clone(),
            result,
            insights,
            chart,
        })
    }

    fn factory_config(
        kind: ZiAnalysisKind,
        dataset: &ZiDataset,
        request: &ZiAnalysisRequest,
    ) -> Result<Value> {
        let config = match kind {
            ZiAnalysisKind::Summary | ZiAnalysisKind::Correlation => {
                let columns = request
                    .columns
                    .clone()
                    .unwrap_or_else(|| dataset.headers().to_vec());
                json!({ "columns": columns })
            }
            ZiAnalysisKind::Trends => json!({
                "time_column": request.column_at(0, 2)?,
                "value_column": request.column_at(1, 2)?,
            }),
            ZiAnalysisKind::Anomalies => json!({ "column": request.column_at(0, 1)? }),
            ZiAnalysisKind::Grouped => {
                let group_by = request
                    .group_by
                    .as_deref()
                    .ok_or_else(|| ZiError::validation("grouped analysis requires 'group_by'"))?;
                let aggregations = match (&request.aggregations, &request.columns) {
                    (Some(aggregations), _) => aggregations.clone(),
                    (None, Some(columns)) if !columns.is_empty() => Value::Array(
                        columns.iter().map(|c| json!([c, "sum"])).collect(),
                    ),
                    _ => {
                        return Err(ZiError::validation(
                            "grouped analysis requires 'aggregations' or 'columns'",
                        ))
                    }
                };
                json!({ "group_by": group_by, "aggregations": aggregations })
            }
        };
        Ok(config)
    }
}
