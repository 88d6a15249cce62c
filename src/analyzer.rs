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

//! # Zi Analyzer Module
//!
//! The trait every analysis implements, and the registry that builds
//! analyzers from JSON configuration.
//!
//! ## Analyzer Design
//!
//! An analyzer is configured once (columns, group key, aggregations) and can
//! then be applied to any number of datasets. Applying it never mutates the
//! dataset or the analyzer, so one analyzer can serve concurrent callers.
//!
//! ```rust
//! use zi_insight::analyzer::{ZiAnalyzer, ZiAnalyzerRegistry};
//! use serde_json::json;
//!
//! let registry = ZiAnalyzerRegistry::with_defaults();
//! let analyzer = registry.build("anomalies", &json!({"column": "latency"}))?;
//! let output = analyzer.analyze(&dataset)?;
//! ```

use std::collections::HashMap;

use serde_json::Value;

use crate::analysis::ZiAnalysisOutput;
use crate::config::ZiEngineConfig;
use crate::dataset::ZiDataset;
use crate::errors::{Result, ZiError};

/// Contract shared by the five analyses.
pub trait ZiAnalyzer: std::fmt::Debug {
    /// Registry name, e.g. `"summary"`.
    fn name(&self) -> &'static str;

    /// Runs the analysis. Insufficient data is reported inside the output,
    /// not as an error.
    fn analyze(&self, dataset: &ZiDataset) -> Result<ZiAnalysisOutput>;
}

/// Runs an analyzer and tags any error with the analyzer name.
pub fn execute_analyzer(
    analyzer: &dyn ZiAnalyzer,
    dataset: &ZiDataset,
) -> Result<ZiAnalysisOutput> {
    analyzer
        .analyze(dataset)
        .map_err(|err| ZiError::analysis(analyzer.name(), err.to_string()))
}

pub type AnalyzerFactory =
    fn(&Value, &ZiEngineConfig) -> Result<Box<dyn ZiAnalyzer + Send + Sync>>;

/// Name-to-factory table used by the engine and by config-driven callers.
pub struct ZiAnalyzerRegistry {
    factories: HashMap<String, AnalyzerFactory>,
    config: ZiEngineConfig,
}

impl Default for ZiAnalyzerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ZiAnalyzerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        ZiAnalyzerRegistry {
            factories: HashMap::new(),
            config: ZiEngineConfig::default(),
        }
    }

    /// Creates a registry with the built-in analyzers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_defaults();
        registry
    }

    pub fn with_config(mut self, config: ZiEngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ZiEngineConfig {
        &self.config
    }

    /// Registers a factory for the given analyzer name.
    pub fn register(&mut self, name: impl Into<String>, factory: AnalyzerFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    fn register_defaults(&mut self) {
        self.register(
            "summary",
            crate::analysis::summary::summary_factory as AnalyzerFactory,
        );
        self.register(
            "correlation",
            crate::analysis::correlation::correlation_factory as AnalyzerFactory,
        );
        self.register(
            "trends",
            crate::analysis::trend::trend_factory as AnalyzerFactory,
        );
        self.register(
            "anomalies",
            crate::analysis::anomaly::anomaly_factory as AnalyzerFactory,
        );
        self.register(
            "grouped",
            crate::analysis::grouping::grouping_factory as AnalyzerFactory,
        );
    }

    /// Builds the named analyzer from its JSON configuration.
    pub fn build(&self, name: &str, config: &Value) -> Result<Box<dyn ZiAnalyzer + Send + Sync>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ZiError::validation(format!("unknown analysis type '{name}'")))?;
        factory(config, &self.config)
    }
}

/// Reads an optional array of column names from a factory config.
pub(crate) fn optional_columns(config: &Value, key: &str) -> Result<Option<Vec<String>>> {
    match config.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| ZiError::validation(format!("'{key}' must contain only strings")))
            })
            .collect::<Result<Vec<_>>>()
            .map(Some),
        Some(_) => Err(ZiError::validation(format!("'{key}' must be an array"))),
    }
}

/// Reads a required string from a factory config.
pub(crate) fn required_str(config: &Value, analysis: &str, key: &str) -> Result<String> {
    config
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ZiError::validation(format!("{analysis} requires string '{key}'")))
}
