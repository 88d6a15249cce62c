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

//! # Insight Module
//!
//! The boundary to whatever turns an analysis result into prose. Zi Insight
//! ships no model client: a provider is anything implementing
//! [`ZiInsightProvider`], and the analysis functions never call one. Only
//! [`ZiAnalysisEngine::run_with_insights`](crate::engine::ZiAnalysisEngine::run_with_insights)
//! hands a finished result to a provider.
//!
//! - **provider**: the trait, the request/response types, an offline
//!   provider, a closure adapter and a fallback wrapper
//! - **recommendations**: pulls recommendation lines out of free text

pub mod provider;
pub mod recommendations;

pub use provider::{
    ZiFallbackInsightProvider, ZiInsight, ZiInsightMetadata, ZiInsightProvider, ZiInsightRequest,
    ZiNarrativeInsightProvider, ZiOfflineInsightProvider,
};
pub use recommendations::extract_recommendations;
