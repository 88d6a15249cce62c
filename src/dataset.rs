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

//! # Zi Dataset Module
//!
//! The tabular input of every analysis: an ordered list of rows plus an
//! ordered list of column names.
//!
//! ## Design Principles
//!
//! - **Raw values**: a row is a `serde_json::Map`, so values keep the type the
//!   parser gave them (string, number, null). Interpretation happens in the
//!   analyses, never here.
//! - **Ragged rows**: rows need not share the same keys. A missing key reads
//!   as JSON null.
//! - **Order matters**: row order is insertion order and serves as the time
//!   axis for trend analysis.
//!
//! ## Usage Example
//!
//! ```rust
//! use zi_insight::dataset::ZiDataset;
//! use serde_json::json;
//!
//! let dataset = ZiDataset::from_values(vec![
//!     json!({"region": "north", "sales": 10}),
//!     json!({"region": "south", "sales": "12.5"}),
//! ])?;
//! assert_eq!(dataset.headers(), ["region", "sales"]);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Result, ZiError};

/// A single row: column name to raw value.
pub type ZiRow = Map<String, Value>;

static NULL: Value = Value::Null;

/// Ordered rows plus unique, ordered column names.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ZiDatasetParts")]
pub struct ZiDataset {
    headers: Vec<String>,
    rows: Vec<ZiRow>,
}

#[derive(Deserialize)]
struct ZiDatasetParts {
    headers: Vec<String>,
    rows: Vec<ZiRow>,
}

impl TryFrom<ZiDatasetParts> for ZiDataset {
    type Error = ZiError;

    fn try_from(parts: ZiDatasetParts) -> Result<Self> {
        ZiDataset::new(parts.headers, parts.rows)
    }
}

impl ZiDataset {
    /// Builds a dataset from explicit headers. Duplicate header names are a
    /// schema error.
    #[allow(non_snake_case)]
    pub fn new(headers: Vec<String>, rows: Vec<ZiRow>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(headers.len());
        for header in &headers {
            if !seen.insert(header.as_str()) {
                return Err(ZiError::schema(format!("duplicate column name '{header}'")));
            }
        }
        Ok(Self { headers, rows })
    }

    /// Builds a dataset whose headers are the row keys in first-seen order.
    pub fn from_rows(rows: Vec<ZiRow>) -> Self {
        let mut seen = HashSet::new();
        let mut headers = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if seen.insert(key.clone()) {
                    headers.push(key.clone());
                }
            }
        }
        Self { headers, rows }
    }

    /// Builds a dataset from JSON objects. Any non-object value is a schema error.
    pub fn from_values(values: Vec<Value>) -> Result<Self> {
        let rows = values
            .into_iter()
            .enumerate()
            .map(|(idx, value)| match value {
                Value::Object(map) => Ok(map),
                other => Err(ZiError::schema(format!(
                    "row {idx} must be an object, found {}",
                    type_name(&other)
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_rows(rows))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[ZiRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Raw value at `row`/`column`; absent keys and out-of-range rows read as null.
    pub fn value(&self, row: usize, column: &str) -> &Value {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL)
    }

    /// Iterates one column's raw values in row order, null where absent.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows
            .iter()
            .map(move |row| row.get(column).unwrap_or(&NULL))
    }

    /// True if at least one row carries the column key.
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column) || self.rows.iter().any(|r| r.contains_key(column))
    }

    /// Short description used when handing a fresh upload to an insight provider.
    pub fn overview(&self, source: &str) -> ZiDatasetOverview {
        ZiDatasetOverview {
            source: source.to_string(),
            row_count: self.row_count(),
            columns: self.headers.clone(),
            sample_rows: self.rows.iter().take(3).cloned().collect(),
            summary: format!(
                "{} file with {} columns and {} rows. Columns: {}",
                source.to_ascii_uppercase(),
                self.column_count(),
                self.row_count(),
                self.headers.join(", ")
            ),
        }
    }
}

/// Upload-time description of a dataset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiDatasetOverview {
    pub source: String,
    pub row_count: usize,
    pub columns: Vec<String>,
    pub sample_rows: Vec<ZiRow>,
    pub summary: String,
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
