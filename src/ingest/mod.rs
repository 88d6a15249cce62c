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

//! # Data Ingestion Module
//!
//! Turns uploaded files into [`ZiDataset`](crate::dataset::ZiDataset)s. The
//! analyses never read files themselves; this module is the only place that
//! does.
//!
//! ## Module Components
//!
//! - **Format Detection** ([format.rs](format/index.html)): extension first, then content sniffing
//! - **Reader** ([reader.rs](reader/index.html)): CSV and JSON parsing into rows
//!
//! ## Supported Input Formats
//!
//! - **CSV**: header line plus rows; every field is kept as a trimmed string
//! - **JSON**: an array of objects, or a single object read as one row
//! - **Text**: detected so it can be rejected with a clear error
//!
//! ## Usage
//!
//! ```rust
//! use zi_insight::ingest::ZiDatasetReader;
//!
//! let dataset = ZiDatasetReader::new().read_str("sales.csv", "region,amount\nnorth,10\n")?;
//! assert_eq!(dataset.row_count(), 1);
//! ```

pub mod format;
pub mod reader;

pub use format::{ZiDataFormat, ZiFormatDetector};
pub use reader::{ZiDatasetReader, ZiReaderConfig};
