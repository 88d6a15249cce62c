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

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ZiError};

/// How correlation pairs values from two columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZiPairingMode {
    /// Drop a row from both series when either column is non-numeric there.
    #[default]
    RowWise,
    /// Filter each column on its own, then pair the survivors by position.
    /// Misaligns pairs when the columns have different gaps; kept for parity
    /// with older dashboards.
    Independent,
}

/// What `min`/`max` report for a group with no numeric values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZiEmptyExtrema {
    /// No value (`null` in JSON).
    #[default]
    Null,
    /// `min` is +Infinity and `max` is -Infinity.
    Infinite,
}

/// Tunables of the analysis engine. The defaults are the reference constants.
///
/// Deserializing goes through [`ZiEngineConfigBuilder::build`], so missing
/// fields take their defaults and out-of-range values are rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ZiEngineConfigBuilder")]
pub struct ZiEngineConfig {
    /// Number of frequency pairs kept in a categorical summary.
    pub top_values: usize,
    /// Fence multiplier applied to the IQR.
    pub iqr_multiplier: f64,
    /// Minimum numeric points for trend analysis.
    pub min_trend_points: usize,
    /// Minimum numeric points for anomaly detection.
    pub min_anomaly_points: usize,
    pub pairing: ZiPairingMode,
    pub empty_extrema: ZiEmptyExtrema,
}

impl Default for ZiEngineConfig {
    fn default() -> Self {
        ZiEngineConfig {
            top_values: 5,
            iqr_multiplier: 1.5,
            min_trend_points: 2,
            min_anomaly_points: 4,
            pairing: ZiPairingMode::RowWise,
            empty_extrema: ZiEmptyExtrema::Null,
        }
    }
}

impl ZiEngineConfig {
    /// Builds a config from partial JSON; unspecified fields keep their defaults.
    pub fn from_json(value: &Value) -> Result<Self> {
        let builder: ZiEngineConfigBuilder = serde_json::from_value(value.clone())
            .map_err(|e| ZiError::validation(format!("invalid engine config: {e}")))?;
        builder.build()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZiEngineConfigBuilder {
    pub top_values: Option<usize>,
    pub iqr_multiplier: Option<f64>,
    pub min_trend_points: Option<usize>,
    pub min_anomaly_points: Option<usize>,
    pub pairing: Option<ZiPairingMode>,
    pub empty_extrema: Option<ZiEmptyExtrema>,
}

impl ZiEngineConfigBuilder {
    pub fn build(self) -> Result<ZiEngineConfig> {
        let base = ZiEngineConfig::default();
        let config = ZiEngineConfig {
            top_values: self.top_values.unwrap_or(base.top_values),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(base.iqr_multiplier),
            min_trend_points: self.min_trend_points.unwrap_or(base.min_trend_points),
            min_anomaly_points: self.min_anomaly_points.unwrap_or(base.min_anomaly_points),
            pairing: self.pairing.unwrap_or(base.pairing),
            empty_extrema: self.empty_extrema.unwrap_or(base.empty_extrema),
        };

        if !config.iqr_multiplier.is_finite() || config.iqr_multiplier < 0.0 {
            return Err(ZiError::validation("iqr_multiplier must be a non-negative number"));
        }
        // Slope needs two points; quartile positions need at least one.
        if config.min_trend_points < 2 {
            return Err(ZiError::validation("min_trend_points must be at least 2"));
        }
        if config.min_anomaly_points < 1 {
            return Err(ZiError::validation("min_anomaly_points must be at least 1"));
        }
        Ok(config)
    }
}

impl TryFrom<ZiEngineConfigBuilder> for ZiEngineConfig {
    type Error = ZiError;

    fn try_from(builder: ZiEngineConfigBuilder) -> Result<Self> {
        builder.build()
    }
}
