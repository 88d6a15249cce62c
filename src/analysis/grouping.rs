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

//! Group-by partitioning with per-column aggregates.
//!
//! Groups appear in the order their key is first seen. Keys are the display
//! text of the raw value, so `1` and `"1"` share a group; rows where the key
//! column is missing or null share the `null` group.
//!
//! Aggregates only see the numeric-parseable values of their column. In
//! particular `count` is the number of such values in the group, not the
//! number of rows.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::ZiAnalysisOutput;
use crate::analyzer::{required_str, ZiAnalyzer};
use crate::config::{ZiEmptyExtrema, ZiEngineConfig};
use crate::dataset::ZiDataset;
use crate::errors::{Result, ZiError};
use crate::value::{display_key, parse_numeric};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZiAggregation {
    Sum,
    Avg,
    Count,
    Min,
    Max,
}

impl ZiAggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZiAggregation::Sum => "sum",
            ZiAggregation::Avg => "avg",
            ZiAggregation::Count => "count",
            ZiAggregation::Min => "min",
            ZiAggregation::Max => "max",
        }
    }

    /// Output field name, `<column>_<kind>`.
    pub fn field_name(&self, column: &str) -> String {
        format!("{}_{}", column, self.as_str())
    }

    fn apply(&self, values: &[f64], empty: ZiEmptyExtrema) -> Option<f64> {
        match self {
            ZiAggregation::Sum => Some(values.iter().sum()),
            ZiAggregation::Count => Some(values.len() as f64),
            ZiAggregation::Avg if values.is_empty() => None,
            ZiAggregation::Avg => Some(values.iter().sum::<f64>() / values.len() as f64),
            ZiAggregation::Min => extreme(values, empty, f64::INFINITY, f64::min),
            ZiAggregation::Max => extreme(values, empty, f64::NEG_INFINITY, f64::max),
        }
    }
}

fn extreme(values: &[f64], empty: ZiEmptyExtrema, identity: f64, pick: fn(f64, f64) -> f64) -> Option<f64> {
    if values.is_empty() && empty == ZiEmptyExtrema::Null {
        return None;
    }
    Some(values.iter().copied().fold(identity, pick))
}

impl fmt::Display for ZiAggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZiAggregation {
    type Err = ZiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sum" => Ok(ZiAggregation::Sum),
            "avg" | "mean" => Ok(ZiAggregation::Avg),
            "count" => Ok(ZiAggregation::Count),
            "min" => Ok(ZiAggregation::Min),
            "max" => Ok(ZiAggregation::Max),
            other => Err(ZiError::validation(format!("unknown aggregation '{other}'"))),
        }
    }
}

/// One output group: the key plus one aggregate per requested pair.
#[derive(Clone, Debug, PartialEq)]
pub struct ZiGroupRow {
    pub group_by: String,
    pub key: Option<String>,
    /// `(<column>_<kind>, value)` in request order. `None` marks an empty
    /// numeric subset for avg (and for min/max under `ZiEmptyExtrema::Null`).
    pub values: Vec<(String, Option<f64>)>,
}

impl ZiGroupRow {
    /// Aggregate by output field name; `None` if absent or empty.
    pub fn value(&self, field: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .and_then(|(_, v)| *v)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.values.iter().any(|(name, _)| name == field)
    }
}

impl Serialize for ZiGroupRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry(&self.group_by, &self.key)?;
        for (name, value) in &self.values {
            map.serialize_entry(name, &value.map(aggregate_json))?;
        }
        map.end()
    }
}

/// Whole aggregates within the exact `f64` integer range serialize as JSON
/// integers, so counts and sums of integer columns read `30`, not `30.0`.
/// Non-finite values become `null`.
fn aggregate_json(value: f64) -> Value {
    const EXACT: f64 = 9_007_199_254_740_992.0;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= EXACT {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

pub fn group_and_aggregate(
    dataset: &ZiDataset,
    group_by: &str,
    aggregations: &[(String, ZiAggregation)],
) -> Vec<ZiGroupRow> {
    group_and_aggregate_with_config(dataset, group_by, aggregations, &ZiEngineConfig::default())
}

pub fn group_and_aggregate_with_config(
    dataset: &ZiDataset,
    group_by: &str,
    aggregations: &[(String, ZiAggregation)],
    config: &ZiEngineConfig,
) -> Vec<ZiGroupRow> {
    let mut groups: Vec<(Option<String>, Vec<usize>)> = Vec::new();
    let mut index: HashMap<Option<String>, usize> = HashMap::new();

    for (row_idx, raw) in dataset.column_values(group_by).enumerate() {
        let key = (!raw.is_null()).then(|| display_key(raw));
        match index.get(&key) {
            Some(&pos) => groups[pos].1.push(row_idx),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![row_idx]));
            }
        }
    }

    groups
        .into_iter()
        .map(|(key, rows)| {
            let values = aggregations
                .iter()
                .map(|(column, kind)| {
                    let numeric: Vec<f64> = rows
                        .iter()
                        .filter_map(|&r| parse_numeric(dataset.value(r, column)))
                        .collect();
                    (kind.field_name(column), kind.apply(&numeric, config.empty_extrema))
                })
                .collect();
            ZiGroupRow {
                group_by: group_by.to_string(),
                key,
                values,
            }
        })
        .collect()
}

/// Parses `{"col": "sum"}` or `[["col", "sum"], ...]` into ordered pairs.
pub fn parse_aggregations(value: &Value) -> Result<Vec<(String, ZiAggregation)>> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(column, kind)| {
                let kind = kind
                    .as_str()
                    .ok_or_else(|| ZiError::validation("aggregation kind must be a string"))?;
                Ok((column.clone(), kind.parse::<ZiAggregation>()?))
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item.as_array().map(Vec::as_slice) {
                Some([Value::String(column), Value::String(kind)]) => {
                    Ok((column.clone(), kind.parse::<ZiAggregation>()?))
                }
                _ => Err(ZiError::validation(
                    "aggregation pairs must be [column, kind] string arrays",
                )),
            })
            .collect(),
        _ => Err(ZiError::validation("aggregations must be an object or an array")),
    }
}

/// Grouped aggregate analyzer.
#[derive(Debug)]
pub struct ZiGroupAggregator {
    group_by: String,
    aggregations: Vec<(String, ZiAggregation)>,
    config: ZiEngineConfig,
}

impl ZiGroupAggregator {
    #[allow(non_snake_case)]
    pub fn new(group_by: impl Into<String>, aggregations: Vec<(String, ZiAggregation)>) -> Self {
        Self {
            group_by: group_by.into(),
            aggregations,
            config: ZiEngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ZiEngineConfig) -> Self {
        self.config = config;
        self
    }
}

impl ZiAnalyzer for ZiGroupAggregator {
    fn name(&self) -> &'static str {
        "grouped"
    }

    fn analyze(&self, dataset: &ZiDataset) -> Result<ZiAnalysisOutput> {
        Ok(ZiAnalysisOutput::Grouped(group_and_aggregate_with_config(
            dataset,
            &self.group_by,
            &self.aggregations,
            &self.config,
        )))
    }
}

pub fn grouping_factory(
    config: &Value,
    engine: &ZiEngineConfig,
) -> Result<Box<dyn ZiAnalyzer + Send + Sync>> {
    let group_by = required_str(config, "grouped", "group_by")?;
    let aggregations = config
        .get("aggregations")
        .ok_or_else(|| ZiError::validation("grouped requires 'aggregations'"))
        .and_then(parse_aggregations)?;
    Ok(Box::new(
        ZiGroupAggregator::new(group_by, aggregations).with_config(engine.clone()),
    ))
}
