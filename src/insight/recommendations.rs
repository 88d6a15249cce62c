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

use std::sync::OnceLock;

use regex::Regex;

const MAX_RECOMMENDATIONS: usize = 3;
const KEYWORDS: [&str; 3] = ["recommend", "suggest", "consider"];

fn bullet_pattern() -> &'static Regex {
    static BULLET: OnceLock<Regex> = OnceLock::new();
    BULLET.get_or_init(|| Regex::new(r"^\s*[-*•]\s*").expect("bullet pattern is valid"))
}

/// Picks up to three lines that read like recommendations, without their
/// bullet markers. Keyword matching is case-sensitive.
pub fn extract_recommendations(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| KEYWORDS.iter().any(|k| line.contains(k)))
        .take(MAX_RECOMMENDATIONS)
        .map(|line| bullet_pattern().replace(line, "").trim().to_string())
        .collect()
}
