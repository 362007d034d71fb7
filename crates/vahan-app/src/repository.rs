//! Wiring of the file-based repositories and the registry lookup

use std::path::Path;

use vahan_infra::command_lookup::CommandLookup;
use vahan_infra::persistence::FileStatusCache;
use vahan_infra::report_csv::CsvReportWriter;
use vahan_types::{LookupError, Result};

use crate::config::Config;

/// Open the status cache configured in `config`
pub fn open_status_cache(config: &Config) -> Result<FileStatusCache> {
    open_status_cache_at(&config.cache_path()?)
}

/// Open the status cache at a custom path
pub fn open_status_cache_at(path: &Path) -> Result<FileStatusCache> {
    FileStatusCache::open(path).map_err(Into::into)
}

/// Create (truncate) the CSV report
pub fn create_report(path: &Path) -> Result<CsvReportWriter> {
    CsvReportWriter::create(path).map_err(Into::into)
}

/// Build the registry lookup from the configured command
pub fn open_registry_lookup(config: &Config) -> Result<CommandLookup> {
    let command = config
        .lookup_command
        .as_deref()
        .ok_or(LookupError::NotConfigured)?;
    CommandLookup::from_command_line(command).map_err(Into::into)
}
