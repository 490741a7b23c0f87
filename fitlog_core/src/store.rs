//! CSV persistence for fitness entries.
//!
//! Files live under a storage directory (`data` by default) and consist of a
//! header line followed by one entry per line. Saving reports failure as a
//! logged `false`; loading never fails and skips any line it cannot turn
//! into a valid entry.

use crate::entry::CSV_HEADER;
use crate::{Error, FitnessEntry, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Default storage directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default data file name
pub const DEFAULT_FILE_NAME: &str = "fitness.csv";

/// Reads and writes entry files inside a storage directory
#[derive(Clone, Debug)]
pub struct CsvStore {
    data_dir: PathBuf,
}

impl Default for CsvStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl CsvStore {
    /// Create a store rooted at the given storage directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Create the storage directory (and parents) if it is missing
    pub fn ensure_directory(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Map a file name into the storage directory
    ///
    /// Names already qualified with the directory (using either `/` or `\`)
    /// are returned unchanged.
    pub fn resolve_path(&self, filename: &str) -> PathBuf {
        let dir = self.data_dir.to_string_lossy();
        let prefix = dir.trim_end_matches(['/', '\\']);
        if let Some(rest) = filename.strip_prefix(prefix) {
            if rest.starts_with('/') || rest.starts_with('\\') {
                return PathBuf::from(filename);
            }
        }
        self.data_dir.join(filename)
    }

    /// Overwrite `filename` with the header and one line per entry
    ///
    /// `None` means no collection was supplied and is rejected with
    /// [`Error::InvalidArgument`]; an empty slice is valid and writes a
    /// header-only file. I/O failures are logged and reported as `Ok(false)`.
    pub fn save(&self, entries: Option<&[FitnessEntry]>, filename: &str) -> Result<bool> {
        let entries = entries
            .ok_or_else(|| Error::InvalidArgument("Entries list cannot be null".into()))?;

        let path = self.resolve_path(filename);
        match self.write_entries(entries, &path) {
            Ok(()) => {
                tracing::debug!("Saved {} entries to {:?}", entries.len(), path);
                Ok(true)
            }
            Err(e) => {
                tracing::error!("Save failed for file '{}': {}", filename, e);
                Ok(false)
            }
        }
    }

    fn write_entries(&self, entries: &[FitnessEntry], path: &Path) -> Result<()> {
        self.ensure_directory()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(BufWriter::new(file));

        writer.write_record(CSV_HEADER.split(','))?;
        for entry in entries {
            writer.write_record(&entry.csv_fields())?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Load every valid entry from `filename`, in file order
    ///
    /// The first line is treated as the header and discarded. Blank lines are
    /// ignored; lines with the wrong column count, unparseable numbers or
    /// out-of-range values are skipped with a warning. A missing or unreadable
    /// file yields an empty vector.
    pub fn load(&self, filename: &str) -> Vec<FitnessEntry> {
        let path = self.resolve_path(filename);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Load failed for file '{}': {}", filename, e);
                return Vec::new();
            }
        };

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line_result) in reader.split(b'\n').enumerate().skip(1) {
            let bytes = match line_result {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!("Load failed for file '{}': {}", filename, e);
                    break;
                }
            };

            let line = match std::str::from_utf8(&bytes) {
                Ok(line) => line.trim_end_matches('\r'),
                Err(e) => {
                    tracing::warn!("Skipping line {}: not valid UTF-8 ({})", line_num + 1, e);
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<FitnessEntry>() {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!("Skipping invalid line {} '{}': {}", line_num + 1, line, e);
                }
            }
        }

        tracing::debug!("Loaded {} entries from {:?}", entries.len(), path);
        entries
    }

    /// Whether `filename` resolves to an existing file
    pub fn exists(&self, filename: &str) -> bool {
        self.resolve_path(filename).is_file()
    }
}
