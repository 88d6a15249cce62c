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

//! # Zi Insight Error Module
//!
//! Error types shared by every part of Zi Insight.
//!
//! ## What is (and is not) an error
//!
//! The statistics themselves never fail. Too few data points, zero variance
//! or an empty numeric subset are reported as ordinary values (for example
//! [`ZiTrendOutcome::Insufficient`](crate::analysis::ZiTrendOutcome)), so a
//! caller can branch on them without error handling.
//!
//! `ZiError` covers the remaining cases:
//!
//! - **Validation**: malformed analysis requests or configuration
//! - **Schema**: datasets or inputs with an unusable shape
//! - **Analysis**: an analyzer rejected its arguments
//! - **Provider**: an insight provider failed to produce commentary
//! - **Io / Serde / Csv**: ingest and serialization failures
//! - **Internal**: unexpected situations
//!
//! ## Usage
//!
//! ```rust
//! use zi_insight::errors::{Result, ZiError};
//!
//! fn require_group(group_by: Option<&str>) -> Result<&str> {
//!     group_by.ok_or_else(|| ZiError::validation("grouped analysis requires 'group_by'"))
//! }
//! ```

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Zi Insight.
pub type Result<T> = std::result::Result<T, ZiError>;

/// Canonical error enumeration for Zi Insight.
#[derive(Debug, Error, Serialize, Deserialize, PartialEq)]
pub enum ZiError {
    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Errors caused by malformed schema or incompatible data layout.
    #[error("schema error: {message}")]
    Schema { message: String },

    /// Validation errors triggered by invalid parameters or inputs.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// An analyzer refused to run with the arguments it was given.
    #[error("analysis '{analysis}' failed: {message}")]
    Analysis { analysis: String, message: String },

    /// An insight provider could not produce commentary.
    #[error("insight provider '{provider}' failed: {message}")]
    Provider { provider: String, message: String },

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Errors raised by the CSV reader.
    #[error("csv error: {0}")]
    Csv(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for ZiError {
    fn from(err: io::Error) -> Self {
        ZiError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ZiError {
    fn from(err: serde_json::Error) -> Self {
        ZiError::Serde(err.to_string())
    }
}

#[cfg(feature = "csv")]
impl From<csv::Error> for ZiError {
    fn from(err: csv::Error) -> Self {
        ZiError::Csv(err.to_string())
    }
}

impl ZiError {
    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        ZiError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct schema errors.
    pub fn schema<T: Into<String>>(message: T) -> Self {
        ZiError::Schema {
            message: message.into(),
        }
    }

    /// Helper to construct analysis errors.
    pub fn analysis(name: impl Into<String>, message: impl Into<String>) -> Self {
        ZiError::Analysis {
            analysis: name.into(),
            message: message.into(),
        }
    }

    /// Helper to construct provider errors.
    pub fn provider(name: impl Into<String>, message: impl Into<String>) -> Self {
        ZiError::Provider {
            provider: name.into(),
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        ZiError::Internal(message.into())
    }
}
