//! File-based registration status cache
//!
//! A single pretty-printed JSON object mapping each registration candidate
//! to its last known status, e.g. `{"TN09DE1111": "NOT_AVAILABLE"}`.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;
use vahan_domain::repository::StatusCacheRepository;
use vahan_types::{CacheError, RegistrationStatus};

/// Status cache persisted as one JSON file
#[derive(Debug)]
pub struct FileStatusCache {
    path: PathBuf,
    entries: BTreeMap<String, RegistrationStatus>,
}

impl FileStatusCache {
    /// Load the cache file, starting empty when it does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();

        let entries: BTreeMap<String, RegistrationStatus> = if path.exists() {
            let file = File::open(&path).map_err(|e| io_error(&path, e))?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader)
                .map_err(|e| CacheError::Corrupted(format!("{}: {}", path.display(), e)))?
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), entries = entries.len(), "opened status cache");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, candidate: &str) -> Option<RegistrationStatus> {
        self.entries.get(candidate).copied()
    }

    /// Insert or replace a status and write the file
    pub fn set(&mut self, candidate: &str, status: RegistrationStatus) -> Result<(), CacheError> {
        self.entries.insert(candidate.to_string(), status);
        self.persist()
    }

    /// Returns whether an entry was removed
    pub fn remove(&mut self, candidate: &str) -> Result<bool, CacheError> {
        let removed = self.entries.remove(candidate).is_some();
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Drop every entry; returns how many were removed
    pub fn clear(&mut self) -> Result<usize, CacheError> {
        let count = self.entries.len();
        self.entries.clear();
        self.persist()?;
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, RegistrationStatus)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn stats(&self) -> CacheStats {
        let count_of = |wanted: RegistrationStatus| {
            self.entries.values().filter(|s| **s == wanted).count()
        };
        CacheStats {
            entry_count: self.entries.len(),
            available: count_of(RegistrationStatus::Available),
            not_available: count_of(RegistrationStatus::NotAvailable),
            unknown: count_of(RegistrationStatus::Unknown),
            size_bytes: fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0),
            path: self.path.clone(),
        }
    }

    fn persist(&self) -> Result<(), CacheError> {
        write_atomic(&self.path, |w| {
            serde_json::to_writer_pretty(w, &self.entries).map_err(io::Error::from)
        })
    }
}

/// Write `path` through a temporary sibling file renamed into place, so an
/// interrupted write leaves the previous contents intact.
fn write_atomic<F>(path: &Path, fill: F) -> Result<(), CacheError>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
            parent
        }
        None => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| io_error(dir, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        fill(&mut writer).map_err(|e| io_error(path, e))?;
        writer.flush().map_err(|e| io_error(path, e))?;
    }
    tmp.persist(path).map_err(|e| io_error(path, e.error))?;
    Ok(())
}

fn io_error(path: &Path, err: io::Error) -> CacheError {
    CacheError::IoError(format!("{}: {}", path.display(), err))
}

impl StatusCacheRepository for FileStatusCache {
    fn find(&self, candidate: &str) -> Option<RegistrationStatus> {
        self.get(candidate)
    }

    fn save(&mut self, candidate: &str, status: RegistrationStatus) -> Result<(), CacheError> {
        self.set(candidate, status)
    }
}

/// Cache statistics
#[derive(Debug)]
pub struct CacheStats {
    pub entry_count: usize,
    pub available: usize,
    pub not_available: usize,
    pub unknown: usize,
    pub size_bytes: u64,
    pub path: PathBuf,
}

impl CacheStats {
    pub fn display(&self) -> String {
        let size_kb = self.size_bytes as f64 / 1024.0;
        format!(
            "Cache Statistics\n\
             ================\n\
             Entries:       {}\n\
             Available:     {}\n\
             Not available: {}\n\
             Unknown:       {}\n\
             Size:          {:.2} KB\n\
             Location:      {}",
            self.entry_count,
            self.available,
            self.not_available,
            self.unknown,
            size_kb,
            self.path.display()
        )
    }
}
