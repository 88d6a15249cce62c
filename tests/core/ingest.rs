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

use std::io::Write;

use serde_json::json;
use tempfile::NamedTempFile;
use zi_insight::errors::ZiError;
use zi_insight::ingest::{ZiDataFormat, ZiDatasetReader, ZiFormatDetector, ZiReaderConfig};

fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().expect("tmp");
    file.write_all(content.as_bytes()).expect("write");
    file.flush().expect("flush");
    file
}

#[test]
fn test_detector_prefers_extension() {
    let detector = ZiFormatDetector::new();
    assert_eq!(detector.detect_from_name("report.csv"), Some(ZiDataFormat::Csv));
    assert_eq!(detector.detect_from_name("report.JSON"), Some(ZiDataFormat::Json));
    assert_eq!(detector.detect_from_name("readme.txt"), Some(ZiDataFormat::Text));
    assert_eq!(detector.detect_from_name("archive.tar"), None);
}

#[test]
fn test_detector_sniffs_content() {
    let detector = ZiFormatDetector::new();
    assert_eq!(detector.detect_from_content("{\"a\": 1}"), ZiDataFormat::Json);
    assert_eq!(detector.detect_from_content("a,b\n1,2"), ZiDataFormat::Csv);
    assert_eq!(detector.detect_from_content("a,b"), ZiDataFormat::Text);
}

#[test]
fn test_read_csv_file_keeps_strings() {
    let file = write_temp(".csv", "month,sales\nJan, 10\nFeb,20.5\n");
    let dataset = ZiDatasetReader::new().read_path(file.path()).unwrap();

    assert_eq!(dataset.headers(), ["month", "sales"]);
    assert_eq!(dataset.row_count(), 2);
    assert_eq!(dataset.value(0, "sales"), &json!("10"));
    assert_eq!(dataset.value(1, "sales"), &json!("20.5"));
}

#[test]
fn test_read_json_file_array_and_object() {
    let array = write_temp(".json", r#"[{"a": 1, "b": "x"}, {"a": 2}]"#);
    let dataset = ZiDatasetReader::new().read_path(array.path()).unwrap();
    assert_eq!(dataset.row_count(), 2);
    assert_eq!(dataset.value(0, "a"), &json!(1));

    let object = write_temp(".json", r#"{"a": 1}"#);
    let dataset = ZiDatasetReader::new().read_path(object.path()).unwrap();
    assert_eq!(dataset.row_count(), 1);
}

#[test]
fn test_json_scalars_are_schema_errors() {
    let reader = ZiDatasetReader::new();
    assert!(matches!(reader.read_json_str("42").unwrap_err(), ZiError::Schema { .. }));
    assert!(matches!(reader.read_json_str("[1, 2]").unwrap_err(), ZiError::Schema { .. }));
    assert!(matches!(reader.read_json_str("{oops").unwrap_err(), ZiError::Serde(_)));
}

#[test]
fn test_text_files_are_not_tabular() {
    let file = write_temp(".txt", "Quarterly notes, nothing tabular here.\nSecond line.");
    let err = ZiDatasetReader::new().read_path(file.path()).unwrap_err();
    assert!(matches!(err, ZiError::Validation { .. }));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ZiDatasetReader::new()
        .read_path(&dir.path().join("absent.csv"))
        .unwrap_err();
    assert!(matches!(err, ZiError::Io(_)));
}

#[test]
fn test_tab_delimited_content() {
    let reader = ZiDatasetReader::new().with_config(ZiReaderConfig {
        delimiter: b'\t',
        ..Default::default()
    });
    let dataset = reader.read_csv_str("g\tv\na\t1\nb\t2\n").unwrap();
    assert_eq!(dataset.value(1, "g"), &json!("b"));
    assert_eq!(reader.config().delimiter, b'\t');
}
