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

use std::path::Path;

use serde_json::Value;

use crate::dataset::{ZiDataset, ZiRow};
use crate::errors::{Result, ZiError};
use crate::ingest::format::{ZiDataFormat, ZiFormatDetector};

#[derive(Clone, Debug)]
pub struct ZiReaderConfig {
    pub delimiter: u8,
    pub skip_errors: bool,
    pub max_errors: usize,
}

impl Default for ZiReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            skip_errors: true,
            max_errors: 100,
        }
    }
}

/// Turns uploaded CSV or JSON text into a [`ZiDataset`].
#[derive(Clone, Debug, Default)]
pub struct ZiDatasetReader {
    config: ZiReaderConfig,
    detector: ZiFormatDetector,
}

impl ZiDatasetReader {
    #[allow(non_snake_case)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ZiReaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ZiReaderConfig {
        &self.config
    }

    /// Reads a file, choosing the parser from its name and then its content.
    pub fn read_path(&self, path: &Path) -> Result<ZiDataset> {
        let content = std::fs::read_to_string(path)?;
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        self.read_str(name, &content)
    }

    /// Same as [`read_path`](Self::read_path) for content already in memory.
    pub fn read_str(&self, name: &str, content: &str) -> Result<ZiDataset> {
        match self.detector.detect(name, content) {
            ZiDataFormat::Csv => self.read_csv_str(content),
            ZiDataFormat::Json => self.read_json_str(content),
            ZiDataFormat::Text => Err(ZiError::validation(format!(
                "'{name}' is plain text and has no tabular structure"
            ))),
        }
    }

    /// Reads an array of objects, or a single object as one row.
    pub fn read_json_str(&self, content: &str) -> Result<ZiDataset> {
        match serde_json::from_str::<Value>(content)? {
            Value::Array(items) => ZiDataset::from_values(items),
            Value::Object(map) => Ok(ZiDataset::from_rows(vec![map])),
            _ => Err(ZiError::schema("JSON input must be an array of objects or an object")),
        }
    }

    /// Reads delimited text whose first line is the header row. Every field
    /// is kept as a trimmed string; short rows are padded with `""` and
    /// fields past the last header are dropped.
    #[cfg(feature = "csv")]
    pub fn read_csv_str(&self, content: &str) -> Result<ZiDataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ZiError::validation(format!("CSV headers error: {}", e)))?
            .iter()
            .map(str::to_string)
            .collect();
        if headers.iter().all(String::is_empty) {
            return Err(ZiError::schema("CSV input has no header row"));
        }

        let mut rows = Vec::new();
        let mut error_count = 0;

        for (idx, result) in reader.records().enumerate() {
            match result {
                Ok(record) => {
                    let row: ZiRow = headers
                        .iter()
                        .enumerate()
                        .map(|(i, header)| {
                            let field = record.get(i).unwrap_or("");
                            (header.clone(), Value::String(field.to_string()))
                        })
                        .collect();
                    rows.push(row);
                }
                Err(e) => {
                    error_count += 1;
                    if !self.config.skip_errors || error_count > self.config.max_errors {
                        return Err(ZiError::Csv(format!(
                            "Too many errors ({}): last error at row {}: {}",
                            error_count, idx, e
                        )));
                    }
                    log::warn!("Skipping invalid CSV row {}: {}", idx, e);
                }
            }
        }

        ZiDataset::new(headers, rows)
    }

    #[cfg(not(feature = "csv"))]
    pub fn read_csv_str(&self, _content: &str) -> Result<ZiDataset> {
        Err(ZiError::validation("CSV reading requires the 'csv' feature"))
    }
}
