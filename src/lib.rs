//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zi.
//! The Zi project belongs to the Dunimd Team.
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

//! # Zi Insight Library
//!
//! Descriptive statistics over uploaded tabular data: column summaries,
//! Pearson correlation, linear trends, IQR anomalies and grouped aggregates.
//! Results are plain serializable values; turning them into prose is left to
//! a pluggable insight provider.
//!
//! ## Module Overview
//!
//! - **dataset**: ordered rows of raw JSON values plus column names
//! - **value**: the numeric rule and value identity shared by every analysis
//! - **analysis**: the five analyses as pure functions
//! - **analyzer**: the analyzer trait and its name-to-factory registry
//! - **engine**: request dispatch, chart suggestion and insight reports
//! - **insight**: the insight provider boundary
//! - **ingest**: CSV/JSON readers that produce datasets
//! - **config**: engine constants and legacy-compatibility switches
//!
//! ## Feature Flags
//!
//! - `csv`: CSV ingestion
//! - `parallel`: per-column work on the Rayon thread pool
//! - `full`: both of the above (default)
//!
//! ## Quick Start
//!
//! ```rust
//! use zi_insight::{ZiAnalysisEngine, ZiAnalysisRequest, ZiDatasetReader};
//!
//! let dataset = ZiDatasetReader::new().read_str("sales.csv", "region,amount\nnorth,10\nsouth,4\n")?;
//! let request = ZiAnalysisRequest::new("grouped").with_group_by("region").with_columns(["amount"]);
//! let output = ZiAnalysisEngine::new().run(&dataset, &request)?;
//! ```
//!
//! ## Error Handling
//!
//! Degenerate statistics are values, not errors. `Result<T, ZiError>` is
//! returned only for malformed requests, unreadable input and failing
//! insight providers.

pub mod errors;
pub mod value;
pub mod dataset;
pub mod config;
pub mod analysis;
pub mod analyzer;
pub mod engine;
pub mod insight;
pub mod ingest;

pub use errors::{Result, ZiError};
pub use dataset::{ZiDataset, ZiDatasetOverview, ZiRow};
pub use config::{ZiEmptyExtrema, ZiEngineConfig, ZiEngineConfigBuilder, ZiPairingMode};
pub use analysis::{
    analyze_trend, correlate, detect_anomalies, group_and_aggregate, summarize,
    ZiAggregation, ZiAnalysisOutput, ZiAnomaly, ZiAnomalyKind, ZiAnomalyOutcome, ZiBounds,
    ZiColumnSummary, ZiCorrelationMatrix, ZiGroupRow, ZiSummary, ZiTrend, ZiTrendDirection,
    ZiTrendOutcome,
};
pub use analyzer::{execute_analyzer, AnalyzerFactory, ZiAnalyzer, ZiAnalyzerRegistry};
pub use engine::{ZiAnalysisEngine, ZiAnalysisKind, ZiAnalysisReport, ZiAnalysisRequest, ZiChartKind};
pub use insight::{
    extract_recommendations, ZiFallbackInsightProvider, ZiInsight, ZiInsightProvider,
    ZiInsightRequest, ZiNarrativeInsightProvider, ZiOfflineInsightProvider,
};
pub use ingest::{ZiDataFormat, ZiDatasetReader, ZiFormatDetector, ZiReaderConfig};
