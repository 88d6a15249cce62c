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
use zi_insight::analysis::correlation::correlate_with_config;
use zi_insight::analysis::{correlate, pearson};
use zi_insight::config::{ZiEngineConfig, ZiPairingMode};
use zi_insight::dataset::ZiDataset;

fn dataset(rows: Vec<Value>) -> ZiDataset {
    ZiDataset::from_values(rows).unwrap()
}

#[test]
fn test_perfect_linear_relationship() {
    let ds = dataset(vec![
        json!({"x": 1, "y": 2}),
        json!({"x": 2, "y": 4}),
        json!({"x": 3, "y": 6}),
    ]);
    let matrix = correlate(&ds, &["x", "y"]);
    assert!((matrix.get("x", "y").unwrap() - 1.0).abs() < 1e-12);
    assert_eq!(matrix.get("x", "x"), Some(1.0));
}

#[test]
fn test_matrix_is_symmetric() {
    let ds = dataset(vec![
        json!({"a": 1, "b": 9, "c": 2}),
        json!({"a": 2, "b": 7, "c": 2}),
        json!({"a": 4, "b": 3, "c": 5}),
        json!({"a": 5, "b": 4, "c": 1}),
    ]);
    let matrix = correlate(&ds, &["a", "b", "c"]);
    for x in ["a", "b", "c"] {
        for y in ["a", "b", "c"] {
            assert_eq!(matrix.get(x, y), matrix.get(y, x));
        }
    }
    assert!(matrix.get("a", "b").unwrap() < 0.0);
}

#[test]
fn test_single_column_matrix() {
    let ds = dataset(vec![json!({"x": "text"})]);
    let matrix = correlate(&ds, &["x"]);
    assert_eq!(serde_json::to_value(&matrix).unwrap(), json!({"x": {"x": 1.0}}));
}

#[test]
fn test_serialized_matrix_has_both_triangles() {
    let ds = dataset(vec![json!({"x": 1, "y": 1}), json!({"x": 2, "y": 3})]);
    let json = serde_json::to_value(correlate(&ds, &["x", "y"])).unwrap();
    assert_eq!(json["x"]["y"], json["y"]["x"]);
}

#[test]
fn test_zero_variance_yields_zero() {
    let ds = dataset(vec![json!({"x": 5, "y": 1}), json!({"x": 5, "y": 2}), json!({"x": 5, "y": 3})]);
    assert_eq!(correlate(&ds, &["x", "y"]).get("x", "y"), Some(0.0));
}

#[test]
fn test_row_wise_pairing_skips_gaps() {
    // y is missing in the second row; row-wise pairing keeps x/y aligned.
    let ds = dataset(vec![
        json!({"x": 1, "y": 10}),
        json!({"x": 100, "y": "-"}),
        json!({"x": 2, "y": 20}),
        json!({"x": 3, "y": 30}),
    ]);
    let matrix = correlate(&ds, &["x", "y"]);
    assert!((matrix.get("x", "y").unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn test_independent_pairing_matches_positional_filtering() {
    let ds = dataset(vec![
        json!({"x": 1, "y": 10}),
        json!({"x": 100, "y": "-"}),
        json!({"x": 2, "y": 20}),
        json!({"x": 3, "y": 30}),
    ]);
    let config = ZiEngineConfig {
        pairing: ZiPairingMode::Independent,
        ..ZiEngineConfig::default()
    };
    let matrix = correlate_with_config(&ds, &["x", "y"], &config);
    let expected = pearson(&[1.0, 100.0, 2.0], &[10.0, 20.0, 30.0]);
    assert_eq!(matrix.get("x", "y"), Some(expected));
}

#[test]
fn test_unknown_column_pairs_are_zero() {
    let ds = dataset(vec![json!({"x": 1}), json!({"x": 2})]);
    let matrix = correlate(&ds, &["x", "ghost"]);
    assert_eq!(matrix.get("x", "ghost"), Some(0.0));
    assert_eq!(matrix.get("ghost", "ghost"), Some(1.0));
    assert_eq!(matrix.get("x", "nope"), None);
}
