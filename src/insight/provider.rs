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

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ZiError};
use crate::insight::recommendations::extract_recommendations;

/// What a provider receives: the analysis kind, the source document name and
/// the result already serialized to JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiInsightRequest {
    pub analysis_type: String,
    pub document_name: String,
    pub data: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiInsightMetadata {
    /// Provider that produced the text.
    pub engine: String,
    /// RFC 3339 timestamp.
    pub generated_at: String,
}

impl ZiInsightMetadata {
    pub fn now(engine: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Narrative commentary on one analysis result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiInsight {
    pub summary: String,
    pub recommendations: Vec<String>,
    pub metadata: ZiInsightMetadata,
}

/// Turns a structured result into commentary.
pub trait ZiInsightProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn generate(&self, request: &ZiInsightRequest) -> Result<ZiInsight>;
}

/// Deterministic provider that needs no network. Used on its own in tests
/// and offline deployments, and as the fallback of [`ZiFallbackInsightProvider`].
#[derive(Clone, Debug, Default)]
pub struct ZiOfflineInsightProvider;

impl ZiOfflineInsightProvider {
    const RECOMMENDATIONS: [&'static str; 3] = [
        "Review data quality and completeness",
        "Validate assumptions against business context",
        "Consider seasonal or external factors",
    ];
}

impl ZiInsightProvider for ZiOfflineInsightProvider {
    fn name(&self) -> &'static str {
        "offline"
    }

    fn generate(&self, request: &ZiInsightRequest) -> Result<ZiInsight> {
        Ok(ZiInsight {
            summary: format!(
                "{} analysis shows interesting patterns in {}. Further investigation recommended.",
                request.analysis_type, request.document_name
            ),
            recommendations: Self::RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
            metadata: ZiInsightMetadata::now(self.name()),
        })
    }
}

/// Adapts a plain `request -> text` function into a provider. Recommendations
/// are extracted from the returned text.
pub struct ZiNarrativeInsightProvider<F>
where
    F: Fn(&ZiInsightRequest) -> Result<String> + Send + Sync,
{
    engine: &'static str,
    narrate: F,
}

impl<F> ZiNarrativeInsightProvider<F>
where
    F: Fn(&ZiInsightRequest) -> Result<String> + Send + Sync,
{
    #[allow(non_snake_case)]
    pub fn new(engine: &'static str, narrate: F) -> Self {
        Self { engine, narrate }
    }
}

impl<F> ZiInsightProvider for ZiNarrativeInsightProvider<F>
where
    F: Fn(&ZiInsightRequest) -> Result<String> + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.engine
    }

    fn generate(&self, request: &ZiInsightRequest) -> Result<ZiInsight> {
        let summary = (self.narrate)(request)
            .map_err(|err| ZiError::provider(self.engine, err.to_string()))?;
        if summary.trim().is_empty() {
            return Err(ZiError::provider(self.engine, "empty narrative"));
        }
        Ok(ZiInsight {
            recommendations: extract_recommendations(&summary),
            summary,
            metadata: ZiInsightMetadata::now(self.engine),
        })
    }
}

/// Tries the primary provider and answers offline when it fails.
pub struct ZiFallbackInsightProvider<P: ZiInsightProvider> {
    primary: P,
    fallback: ZiOfflineInsightProvider,
}

impl<P: ZiInsightProvider> ZiFallbackInsightProvider<P> {
    #[allow(non_snake_case)]
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            fallback: ZiOfflineInsightProvider,
        }
    }
}

impl<P: ZiInsightProvider> ZiInsightProvider for ZiFallbackInsightProvider<P> {
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    fn generate(&self, request: &ZiInsightRequest) -> Result<ZiInsight> {
        match self.primary.generate(request) {
            Ok(insight) => Ok(insight),
            Err(err) => {
                log::warn!(
                    "insight provider '{}' failed for {} analysis: {}, using offline insights",
                    self.primary.name(),
                    request.analysis_type,
                    err
                );
                self.fallback.generate(request)
            }
        }
    }
}
