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

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZiDataFormat {
    Csv,
    Json,
    /// Plain prose. Readable, but never tabular.
    Text,
}

impl ZiDataFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZiDataFormat::Csv => "csv",
            ZiDataFormat::Json => "json",
            ZiDataFormat::Text => "text",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ZiFormatDetector {
    sample_size: usize,
}

impl Default for ZiFormatDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ZiFormatDetector {
    #[allow(non_snake_case)]
    pub fn new() -> Self {
        Self { sample_size: 8192 }
    }

    /// Limits how many leading bytes content sniffing looks at.
    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.sample_size = size.max(1);
        self
    }

    /// Format implied by the file extension, if it is one we know.
    pub fn detect_from_name(&self, name: &str) -> Option<ZiDataFormat> {
        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "csv" => Some(ZiDataFormat::Csv),
            "json" => Some(ZiDataFormat::Json),
            "txt" | "md" => Some(ZiDataFormat::Text),
            _ => None,
        }
    }

    pub fn detect_from_content(&self, content: &str) -> ZiDataFormat {
        let end = floor_char_boundary(content, self.sample_size);
        let sample = content[..end].trim();

        if sample.starts_with('{') || sample.starts_with('[') {
            return ZiDataFormat::Json;
        }
        if sample.contains(',') && sample.contains('\n') {
            return ZiDataFormat::Csv;
        }
        ZiDataFormat::Text
    }

    /// Extension first, content sniffing second.
    pub fn detect(&self, name: &str, content: &str) -> ZiDataFormat {
        self.detect_from_name(name)
            .unwrap_or_else(|| self.detect_from_content(content))
    }
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    (0..=index).rev().find(|&i| text.is_char_boundary(i)).unwrap_or(0)
}
