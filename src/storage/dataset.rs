use crate::storage::traits::{PostSink, StorageError, StorageResult};
use crate::storage::ArticleRecord;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Column set shared with the downstream analysis
pub const POST_COLUMNS: [&str; 9] = [
    "platform",
    "competitor",
    "author",
    "date",
    "url",
    "content",
    "likes",
    "comments",
    "reposts",
];

/// Post dataset stored as a CSV file with a header row
///
/// Rows are only ever appended; the file is opened in append mode so bytes
/// already on disk are never rewritten.
#[derive(Debug, Clone)]
pub struct CsvPostStore {
    path: PathBuf,
}

impl CsvPostStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every row of the dataset
    pub fn read_all(&self) -> StorageResult<Vec<ArticleRecord>> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize::<ArticleRecord>() {
            records.push(row?);
        }
        Ok(records)
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn is_missing_or_empty(&self) -> StorageResult<bool> {
        match std::fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() == 0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Rejects a dataset whose header is not exactly [`POST_COLUMNS`]
    fn check_header(&self) -> StorageResult<()> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let headers = reader.headers()?;
        if headers.iter().ne(POST_COLUMNS) {
            return Err(StorageError::Header {
                path: self.path.display().to_string(),
                found: headers.iter().collect::<Vec<_>>().join(","),
            });
        }
        Ok(())
    }
}

/// Whether a file opened for reading ends with a newline; empty files do
fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

impl PostSink for CsvPostStore {
    fn ensure_initialized(&self) -> StorageResult<()> {
        if !self.is_missing_or_empty()? {
            return self.check_header();
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(POST_COLUMNS)?;
        writer.flush().map_err(|e| self.io_error(e))?;

        tracing::info!("Initialized post dataset at {}", self.path.display());
        Ok(())
    }

    fn append(&self, records: &[ArticleRecord]) -> StorageResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        self.ensure_initialized()?;

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        // A last row without its terminator would absorb the first new row
        if !ends_with_newline(&mut file).map_err(|e| self.io_error(e))? {
            file.write_all(b"\n").map_err(|e| self.io_error(e))?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        for record in records {
            writer.serialize(record)?;
        }
        writer.flush().map_err(|e| self.io_error(e))?;

        tracing::debug!(
            "Appended {} rows to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}
