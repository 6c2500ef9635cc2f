//! Record-at-a-time reader over a comma-delimited source file.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ByteRecord, Reader, ReaderBuilder};
use tracing::debug;

use custmig_model::{SourceHeader, SourceRow};

use crate::error::{IngestError, Result};

/// Streams data rows from a source file whose first record is the header.
///
/// Rows may be shorter or longer than the header. Cells are decoded as UTF-8
/// with invalid sequences replaced, so an encoding problem in one cell never
/// aborts the stream.
pub struct SourceReader<R: Read = File> {
    path: PathBuf,
    reader: Reader<R>,
    header: SourceHeader,
    record: ByteRecord,
    records_read: u64,
}

impl SourceReader<File> {
    /// Opens `path` and reads its header record.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IngestError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Self::from_reader(file, path)
    }
}

impl<R: Read> SourceReader<R> {
    /// Wraps any byte stream; `path` is only used in error messages.
    pub fn from_reader(input: R, path: &Path) -> Result<Self> {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input);
        let mut source = Self {
            path: path.to_path_buf(),
            reader,
            header: SourceHeader::default(),
            record: ByteRecord::new(),
            records_read: 0,
        };
        if let Some(cells) = source.read_cells()? {
            source.header = SourceHeader::new(cells);
        }
        debug!(
            path = %source.path.display(),
            columns = source.header.len(),
            "read source header"
        );
        Ok(source)
    }

    /// Header of the file; empty when the file has no records at all.
    pub fn header(&self) -> &SourceHeader {
        &self.header
    }

    /// Number of records consumed so far, header included.
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    fn read_cells(&mut self) -> Result<Option<Vec<String>>> {
        let more = self
            .reader
            .read_byte_record(&mut self.record)
            .map_err(|source| IngestError::CsvRead {
                path: self.path.clone(),
                record: self.records_read + 1,
                source,
            })?;
        if !more {
            return Ok(None);
        }
        self.records_read += 1;
        Ok(Some(
            self.record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        ))
    }
}

impl<R: Read> Iterator for SourceReader<R> {
    type Item = Result<SourceRow>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_cells() {
            Ok(Some(cells)) => Some(Ok(SourceRow::new(self.records_read, cells))),
            Ok(None) => None,
            Err(error) => Some(Err(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(contents: &str) -> SourceReader<&[u8]> {
        SourceReader::from_reader(contents.as_bytes(), Path::new("inline.csv"))
            .expect("open inline source")
    }

    #[test]
    fn empty_input_has_empty_header() {
        let mut source = reader("");
        assert!(source.header().is_empty());
        assert!(source.next().is_none());
    }

    #[test]
    fn record_numbers_count_the_header() {
        let rows: Vec<SourceRow> = reader("id,email\n1,a@b.c\n2,d@e.f\n")
            .collect::<Result<_>>()
            .expect("rows");
        assert_eq!(rows[0].record, 2);
        assert_eq!(rows[1].record, 3);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let bytes: &[u8] = b"id,name\n1,Jo\xffn Smith\n";
        let mut source =
            SourceReader::from_reader(bytes, Path::new("latin1.csv")).expect("open source");
        let row = source.next().expect("row").expect("decoded row");
        assert_eq!(row.cells[1], "Jo\u{fffd}n Smith");
    }
}
