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

use serde_json::{json, Value};
use zi_insight::analysis::summary::{summarize, summarize_with_config, ZiColumnSummary, ZiSummary};
use zi_insight::config::ZiEngineConfig;
use zi_insight::dataset::ZiDataset;

fn dataset(rows: Vec<Value>) -> ZiDataset {
    ZiDataset::from_values(rows).unwrap()
}

#[test]
fn test_categorical_column() {
    let ds = dataset(vec![json!({"c": "red"}), json!({"c": "blue"}), json!({"c": "red"})]);
    let summary = summarize(&ds, &["c"]);
    let cat = summary.get("c").and_then(ZiColumnSummary::as_categorical).unwrap();

    assert_eq!(cat.count, 3);
    assert_eq!(cat.unique_values, 2);
    assert_eq!(cat.most_common.as_deref(), Some("red"));
    assert_eq!(cat.top_values[0].value, "red");
    assert_eq!(cat.top_values[0].count, 2);
    assert_eq!(cat.top_values[1].value, "blue");
}

#[test]
fn test_numeric_column_with_mixed_values() {
    let ds = dataset(vec![
        json!({"v": 3}),
        json!({"v": " 1.5 "}),
        json!({"v": "n/a"}),
        json!({"v": null}),
        json!({"other": 1}),
        json!({"v": "6"}),
    ]);
    let summary = summarize(&ds, &["v"]);
    let num = summary.get("v").and_then(ZiColumnSummary::as_numeric).unwrap();

    assert_eq!(num.count, 3);
    assert_eq!(num.present, 4);
    assert_eq!(num.min, 1.5);
    assert_eq!(num.max, 6.0);
    assert_eq!(num.median, 3.0);
    assert_eq!(num.mean, 3.5);
    assert_eq!(num.unique_values, 4);
}

#[test]
fn test_unique_values_distinguish_types() {
    let ds = dataset(vec![json!({"v": 1}), json!({"v": "1"}), json!({"v": 1})]);
    let summary = summarize(&ds, &["v"]);
    let num = summary.get("v").and_then(ZiColumnSummary::as_numeric).unwrap();
    assert_eq!(num.count, 3);
    assert_eq!(num.unique_values, 2);
}

#[test]
fn test_categorical_buckets_use_display_text() {
    let ds = dataset(vec![json!({"c": true}), json!({"c": "true"}), json!({"c": "x"})]);
    let summary = summarize(&ds, &["c"]);
    let cat = summary.get("c").and_then(ZiColumnSummary::as_categorical).unwrap();
    assert_eq!(cat.unique_values, 3);
    assert_eq!(cat.top_values[0].value, "true");
    assert_eq!(cat.top_values[0].count, 2);
}

#[test]
fn test_ties_keep_first_seen_order() {
    let ds = dataset(vec![
        json!({"c": "b"}),
        json!({"c": "a"}),
        json!({"c": "a"}),
        json!({"c": "b"}),
        json!({"c": "c"}),
    ]);
    let summary = summarize(&ds, &["c"]);
    let cat = summary.get("c").and_then(ZiColumnSummary::as_categorical).unwrap();
    let order: Vec<&str> = cat.top_values.iter().map(|v| v.value.as_str()).collect();
    assert_eq!(order, ["b", "a", "c"]);
    assert_eq!(cat.most_common.as_deref(), Some("b"));
}

#[test]
fn test_undefined_column_is_empty_categorical() {
    let ds = dataset(vec![json!({"a": 1})]);
    let summary = summarize(&ds, &["missing"]);
    let cat = summary.get("missing").and_then(ZiColumnSummary::as_categorical).unwrap();
    assert_eq!(cat.count, 0);
    assert_eq!(cat.unique_values, 0);
    assert!(cat.most_common.is_none());
    assert!(cat.top_values.is_empty());
}

#[test]
fn test_empty_dataset_reports_no_data() {
    let summary = summarize(&ZiDataset::default(), &["a"]);
    assert_eq!(summary, ZiSummary::NoData);
}

#[test]
fn test_columns_keep_request_order() {
    let ds = dataset(vec![json!({"a": 1, "b": "x", "c": 2})]);
    let summary = summarize(&ds, &["c", "a", "b"]);
    let json = serde_json::to_value(&summary).unwrap();
    let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["c", "a", "b"]);
    assert_eq!(json["b"]["type"], "categorical");
    assert_eq!(json["a"]["type"], "numeric");
}

#[test]
fn test_top_values_limit_from_config() {
    let ds = dataset((0..10).map(|i| json!({"c": format!("v{i}")})).collect());
    let summary = summarize(&ds, &["c"]);
    let cat = summary.get("c").and_then(ZiColumnSummary::as_categorical).unwrap();
    assert_eq!(cat.top_values.len(), 5);

    let config = ZiEngineConfig::from_json(&json!({"top_values": 8})).unwrap();
    let summary = summarize_with_config(&ds, &["c"], &config);
    assert_eq!(summary.get("c").unwrap().as_categorical().unwrap().top_values.len(), 8);
}
