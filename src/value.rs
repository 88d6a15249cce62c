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

//! # Raw Value Helpers
//!
//! Rows hold raw JSON values exactly as the ingest step produced them. Every
//! analysis interprets those values through the three helpers in this
//! module, so the numeric rule and the notion of "same value" are identical
//! everywhere.
//!
//! ## Numeric rule
//!
//! - JSON numbers are numeric.
//! - Strings are trimmed; the rest must be non-empty, parse as an `f64`
//!   (`+1`, `-2.5`, `.5`, `5.`, `1e3` are accepted) and be finite.
//!   `"NaN"`, `"inf"`, `"12abc"`, `"0x10"` and blank strings are rejected.
//! - Booleans, arrays, objects and null are never numeric.
//!
//! ## Identity
//!
//! [`identity_key`] distinguishes `1` from `"1"` and is used for distinct
//! counts. [`display_key`] renders both as `1` and is used for frequency
//! buckets and group keys.

use serde_json::Value;

/// Parses a raw value under the numeric rule.
pub fn parse_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_numeric_str(s),
        _ => None,
    }
}

/// Parses text under the numeric rule.
pub fn parse_numeric_str(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    // f64::from_str accepts "inf"/"nan" spellings; only finite results count.
    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Returns true when a value is present, i.e. not JSON null.
pub fn is_present(value: &Value) -> bool {
    !value.is_null()
}

/// Type-aware key: `1` and `"1"` produce different keys.
pub fn identity_key(value: &Value) -> String {
    value.to_string()
}

/// Display key: strings render without quotes, everything else as JSON text.
pub fn display_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
