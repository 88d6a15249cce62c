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

//! Per-column descriptive statistics.
//!
//! A column is summarized as numeric as soon as one of its present values
//! passes the numeric rule; otherwise it is categorical. A column that no row
//! carries is categorical with `count == 0`.

use std::collections::{HashMap, HashSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

use crate::analysis::ZiAnalysisOutput;
use crate::analyzer::{optional_columns, ZiAnalyzer};
use crate::config::ZiEngineConfig;
use crate::dataset::ZiDataset;
use crate::errors::Result;
use crate::value::{display_key, identity_key, is_present, parse_numeric};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ZiNumericSummary {
    /// Numeric-parseable values.
    pub count: usize,
    /// All non-null raw values, numeric or not.
    pub present: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Distinct raw values over every present value.
    pub unique_values: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ZiValueCount {
    pub value: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ZiCategoricalSummary {
    pub count: usize,
    pub unique_values: usize,
    /// Highest frequency; ties go to the value seen first.
    pub most_common: Option<String>,
    /// Most frequent values, descending, ties in first-seen order.
    pub top_values: Vec<ZiValueCount>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ZiColumnSummary {
    Numeric(ZiNumericSummary),
    Categorical(ZiCategoricalSummary),
}

impl ZiColumnSummary {
    pub fn count(&self) -> usize {
        match self {
            ZiColumnSummary::Numeric(n) => n.count,
            ZiColumnSummary::Categorical(c) => c.count,
        }
    }

    pub fn as_numeric(&self) -> Option<&ZiNumericSummary> {
        match self {
            ZiColumnSummary::Numeric(n) => Some(n),
            ZiColumnSummary::Categorical(_) => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&ZiCategoricalSummary> {
        match self {
            ZiColumnSummary::Categorical(c) => Some(c),
            ZiColumnSummary::Numeric(_) => None,
        }
    }
}

/// Summaries keyed by column in request order, or the empty-dataset marker.
#[derive(Clone, Debug, PartialEq)]
pub enum ZiSummary {
    NoData,
    Columns(Vec<(String, ZiColumnSummary)>),
}

impl ZiSummary {
    pub fn is_no_data(&self) -> bool {
        matches!(self, ZiSummary::NoData)
    }

    pub fn get(&self, column: &str) -> Option<&ZiColumnSummary> {
        match self {
            ZiSummary::NoData => None,
            ZiSummary::Columns(entries) => entries
                .iter()
                .find(|(name, _)| name == column)
                .map(|(_, summary)| summary),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ZiSummary::NoData => 0,
            ZiSummary::Columns(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for ZiSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ZiSummary::NoData => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", "No data provided")?;
                map.end()
            }
            ZiSummary::Columns(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (name, summary) in entries {
                    map.serialize_entry(name, summary)?;
                }
                map.end()
            }
        }
    }
}

/// Summarizes `columns` with the default engine config.
pub fn summarize<S: AsRef<str> + Sync>(dataset: &ZiDataset, columns: &[S]) -> ZiSummary {
    summarize_with_config(dataset, columns, &ZiEngineConfig::default())
}

pub fn summarize_with_config<S: AsRef<str> + Sync>(
    dataset: &ZiDataset,
    columns: &[S],
    config: &ZiEngineConfig,
) -> ZiSummary {
    if dataset.is_empty() {
        return ZiSummary::NoData;
    }

    #[cfg(feature = "parallel")]
    let entries = columns
        .par_iter()
        .map(|c| (c.as_ref().to_string(), summarize_column(dataset, c.as_ref(), config)))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let entries = columns
        .iter()
        .map(|c| (c.as_ref().to_string(), summarize_column(dataset, c.as_ref(), config)))
        .collect();

    ZiSummary::Columns(entries)
}

fn summarize_column(dataset: &ZiDataset, column: &str, config: &ZiEngineConfig) -> ZiColumnSummary {
    let present: Vec<&Value> = dataset.column_values(column).filter(|v| is_present(v)).collect();
    let numeric: Vec<f64> = present.iter().filter_map(|v| parse_numeric(v)).collect();
    let unique_values = present
        .iter()
        .map(|v| identity_key(v))
        .collect::<HashSet<_>>()
        .len();

    if numeric.is_empty() {
        ZiColumnSummary::Categorical(categorical_summary(&present, unique_values, config.top_values))
    } else {
        ZiColumnSummary::Numeric(numeric_summary(numeric, present.len(), unique_values))
    }
}

fn numeric_summary(mut values: Vec<f64>, present: usize, unique_values: usize) -> ZiNumericSummary {
    let count = values.len();
    values.sort_by(|a, b| a.total_cmp(b));

    let mean = values.iter().sum::<f64>() / count as f64;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;
    let mid = count / 2;
    let median = if count % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    };

    ZiNumericSummary {
        count,
        present,
        min: values[0],
        max: values[count - 1],
        mean,
        median,
        std_dev: variance.sqrt(),
        unique_values,
    }
}

fn categorical_summary(values: &[&Value], unique_values: usize, top: usize) -> ZiCategoricalSummary {
    // First-seen order is kept in `counts`; `index` only locates entries.
    let mut counts: Vec<ZiValueCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for value in values {
        let key = display_key(value);
        match index.get(&key) {
            Some(&pos) => counts[pos].count += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push(ZiValueCount { value: key, count: 1 });
            }
        }
    }

    // Stable sort: equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    let most_common = counts.first().map(|c| c.value.clone());
    counts.truncate(top);

    ZiCategoricalSummary {
        count: values.len(),
        unique_values,
        most_common,
        top_values: counts,
    }
}

/// Summary analyzer; without explicit columns it summarizes every header.
#[derive(Debug)]
pub struct ZiSummarizer {
    columns: Option<Vec<String>>,
    config: ZiEngineConfig,
}

impl ZiSummarizer {
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

impl ZiAnalyzer for ZiSummarizer {
    fn name(&self) -> &'static str {
        "summary"
    }

    fn analyze(&self, dataset: &ZiDataset) -> Result<ZiAnalysisOutput> {
        let columns = self.columns.as_deref().unwrap_or(dataset.headers());
        Ok(ZiAnalysisOutput::Summary(summarize_with_config(
            dataset,
            columns,
            &self.config,
        )))
    }
}

pub fn summary_factory(
    config: &Value,
    engine: &ZiEngineConfig,
) -> Result<Box<dyn ZiAnalyzer + Send + Sync>> {
    let columns = optional_columns(config, "columns")?;
    Ok(Box::new(ZiSummarizer::new(columns).with_config(engine.clone())))
}
