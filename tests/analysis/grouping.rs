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
use zi_insight::analysis::grouping::{
    group_and_aggregate, group_and_aggregate_with_config, parse_aggregations, ZiAggregation,
};
use zi_insight::config::{ZiEmptyExtrema, ZiEngineConfig};
use zi_insight::dataset::ZiDataset;

fn dataset(rows: Vec<Value>) -> ZiDataset {
    ZiDataset::from_values(rows).unwrap()
}

fn aggs(pairs: &[(&str, ZiAggregation)]) -> Vec<(String, ZiAggregation)> {
    pairs.iter().map(|(c, k)| (c.to_string(), *k)).collect()
}

#[test]
fn test_sum_by_group_in_first_seen_order() {
    let ds = dataset(vec![
        json!({"g": "a", "v": 10}),
        json!({"g": "a", "v": 20}),
        json!({"g": "b", "v": 5}),
    ]);
    let rows = group_and_aggregate(&ds, "g", &aggs(&[("v", ZiAggregation::Sum)]));

    assert_eq!(
        serde_json::to_value(&rows).unwrap(),
        json!([{"g": "a", "v_sum": 30}, {"g": "b", "v_sum": 5}])
    );
}

#[test]
fn test_all_aggregations() {
    let ds = dataset(vec![
        json!({"g": "x", "v": "4"}),
        json!({"g": "x", "v": 8}),
        json!({"g": "x", "v": "bad"}),
    ]);
    let rows = group_and_aggregate(
        &ds,
        "g",
        &aggs(&[
            ("v", ZiAggregation::Sum),
            ("v", ZiAggregation::Avg),
            ("v", ZiAggregation::Count),
            ("v", ZiAggregation::Min),
            ("v", ZiAggregation::Max),
        ]),
    );

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.key.as_deref(), Some("x"));
    assert_eq!(row.value("v_sum"), Some(12.0));
    assert_eq!(row.value("v_avg"), Some(6.0));
    // count only sees numeric-parseable values
    assert_eq!(row.value("v_count"), Some(2.0));
    assert_eq!(row.value("v_min"), Some(4.0));
    assert_eq!(row.value("v_max"), Some(8.0));

    let json = serde_json::to_value(row).unwrap();
    assert!(json["v_count"].is_u64());
    assert_eq!(json["v_count"], json!(2));
    assert_eq!(json["v_sum"], json!(12));
}

#[test]
fn test_fractional_aggregates_stay_floats() {
    let ds = dataset(vec![json!({"g": "a", "v": 1}), json!({"g": "a", "v": 2})]);
    let rows = group_and_aggregate(&ds, "g", &aggs(&[("v", ZiAggregation::Avg)]));
    assert_eq!(serde_json::to_value(&rows).unwrap(), json!([{"g": "a", "v_avg": 1.5}]));
}

#[test]
fn test_empty_numeric_subset() {
    let ds = dataset(vec![json!({"g": "a", "v": "none"})]);
    let pairs = aggs(&[
        ("v", ZiAggregation::Sum),
        ("v", ZiAggregation::Count),
        ("v", ZiAggregation::Avg),
        ("v", ZiAggregation::Min),
    ]);
    let rows = group_and_aggregate(&ds, "g", &pairs);
    let row = &rows[0];

    assert_eq!(row.value("v_sum"), Some(0.0));
    assert_eq!(row.value("v_count"), Some(0.0));
    assert!(row.has_field("v_avg"));
    assert_eq!(row.value("v_avg"), None);
    assert_eq!(row.value("v_min"), None);

    let legacy = ZiEngineConfig { empty_extrema: ZiEmptyExtrema::Infinite, ..ZiEngineConfig::default() };
    let rows = group_and_aggregate_with_config(&ds, "g", &pairs, &legacy);
    assert_eq!(rows[0].value("v_min"), Some(f64::INFINITY));
}

#[test]
fn test_null_and_missing_keys_share_a_group() {
    let ds = dataset(vec![
        json!({"g": null, "v": 1}),
        json!({"g": "a", "v": 2}),
        json!({"v": 3}),
    ]);
    let rows = group_and_aggregate(&ds, "g", &aggs(&[("v", ZiAggregation::Sum)]));

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].key, None);
    assert_eq!(rows[0].value("v_sum"), Some(4.0));
    assert_eq!(serde_json::to_value(&rows[0]).unwrap()["g"], Value::Null);
}

#[test]
fn test_numbers_and_strings_share_display_key() {
    let ds = dataset(vec![json!({"g": 1, "v": 1}), json!({"g": "1", "v": 2})]);
    let rows = group_and_aggregate(&ds, "g", &aggs(&[("v", ZiAggregation::Sum)]));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].key.as_deref(), Some("1"));
}

#[test]
fn test_parse_aggregations_from_object_keeps_order() {
    let pairs = parse_aggregations(&json!({"revenue": "sum", "units": "avg"})).unwrap();
    assert_eq!(pairs, aggs(&[("revenue", ZiAggregation::Sum), ("units", ZiAggregation::Avg)]));
    assert!(parse_aggregations(&json!({"revenue": "median"})).is_err());
    assert!(parse_aggregations(&json!("sum")).is_err());
}

#[test]
fn test_empty_dataset_has_no_groups() {
    let rows = group_and_aggregate(&ZiDataset::default(), "g", &aggs(&[("v", ZiAggregation::Sum)]));
    assert!(rows.is_empty());
}
