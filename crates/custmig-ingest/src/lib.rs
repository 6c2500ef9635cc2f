//! Customer source ingestion.
//!
//! Reads a comma-delimited file whose first record holds the field keys and
//! yields one [`SourceRow`](custmig_model::SourceRow) per following record,
//! without buffering the file.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use custmig_ingest::SourceReader;
//!
//! let mut reader = SourceReader::open(Path::new("customers.csv"))?;
//! let header = reader.header().clone();
//! for row in reader {
//!     let row = row?;
//!     println!("{} cells", row.cells.len());
//! }
//! ```

mod error;
mod reader;

pub use error::{IngestError, Result};
pub use reader::SourceReader;
