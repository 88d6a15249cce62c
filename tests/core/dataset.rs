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

use serde_json::{json, Map, Value};
use zi_insight::dataset::{ZiDataset, ZiRow};
use zi_insight::errors::ZiError;

fn row(value: Value) -> ZiRow {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[test]
fn test_headers_follow_first_seen_key_order() {
    let dataset = ZiDataset::from_values(vec![
        json!({"zeta": 1, "alpha": 2}),
        json!({"alpha": 3, "mid": 4}),
    ])
    .unwrap();

    assert_eq!(dataset.headers(), ["zeta", "alpha", "mid"]);
    assert_eq!(dataset.row_count(), 2);
    assert_eq!(dataset.column_count(), 3);
}

#[test]
fn test_missing_keys_read_as_null() {
    let dataset = ZiDataset::from_values(vec![json!({"a": 1}), json!({"b": 2})]).unwrap();

    assert_eq!(dataset.value(0, "b"), &Value::Null);
    assert_eq!(dataset.value(5, "a"), &Value::Null);
    let column: Vec<&Value> = dataset.column_values("a").collect();
    assert_eq!(column, vec![&json!(1), &Value::Null]);
    assert!(dataset.has_column("b"));
    assert!(!dataset.has_column("c"));
}

#[test]
fn test_non_object_rows_are_rejected() {
    let err = ZiDataset::from_values(vec![json!({"a": 1}), json!([1, 2])]).unwrap_err();
    assert!(matches!(err, ZiError::Schema { .. }));
}

#[test]
fn test_duplicate_headers_are_rejected() {
    let err = ZiDataset::new(vec!["a".into(), "a".into()], vec![]).unwrap_err();
    assert!(matches!(err, ZiError::Schema { .. }));
}

#[test]
fn test_deserialize_checks_headers() {
    let err = serde_json::from_value::<ZiDataset>(json!({"headers": ["a", "a"], "rows": []}));
    assert!(err.is_err());

    let dataset = ZiDataset::from_values(vec![json!({"a": 1, "b": "x"})]).unwrap();
    let restored: ZiDataset =
        serde_json::from_value(serde_json::to_value(&dataset).unwrap()).unwrap();
    assert_eq!(restored, dataset);
}

#[test]
fn test_explicit_headers_are_kept_as_given() {
    let dataset = ZiDataset::new(
        vec!["b".into(), "a".into()],
        vec![row(json!({"a": 1, "b": 2}))],
    )
    .unwrap();
    assert_eq!(dataset.headers(), ["b", "a"]);
    assert_eq!(dataset.value(0, "b"), &json!(2));
}

#[test]
fn test_overview_describes_upload() {
    let dataset = ZiDataset::from_values(
        (0..5).map(|i| json!({"id": i, "name": format!("n{i}")})).collect(),
    )
    .unwrap();
    let overview = dataset.overview("csv");

    assert_eq!(overview.row_count, 5);
    assert_eq!(overview.sample_rows.len(), 3);
    assert_eq!(
        overview.summary,
        "CSV file with 2 columns and 5 rows. Columns: id, name"
    );
}

#[test]
fn test_empty_dataset() {
    let dataset = ZiDataset::default();
    assert!(dataset.is_empty());
    assert!(dataset.headers().is_empty());
    assert_eq!(dataset.column_values("x").count(), 0);
}
