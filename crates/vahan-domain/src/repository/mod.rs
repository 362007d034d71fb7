//! Repository trait definitions for data persistence and the registry lookup

use vahan_types::{CacheError, LookupError, RegistrationStatus, ReportError};

/// Last known registration status per candidate
pub trait StatusCacheRepository {
    /// Cached status for a candidate, if any
    fn find(&self, candidate: &str) -> Option<RegistrationStatus>;

    /// Store a status and persist it
    fn save(&mut self, candidate: &str, status: RegistrationStatus) -> Result<(), CacheError>;
}

/// Append-only `candidate, status` record stream
pub trait ReportSink {
    fn append(&mut self, candidate: &str, status: RegistrationStatus) -> Result<(), ReportError>;
}

/// Queries the vehicle registry for a single candidate
pub trait RegistryLookup {
    fn lookup(&self, candidate: &str) -> Result<RegistrationStatus, LookupError>;
}

impl<T: StatusCacheRepository + ?Sized> StatusCacheRepository for &mut T {
    fn find(&self, candidate: &str) -> Option<RegistrationStatus> {
        (**self).find(candidate)
    }

    fn save(&mut self, candidate: &str, status: RegistrationStatus) -> Result<(), CacheError> {
        (**self).save(candidate, status)
    }
}

impl<T: ReportSink + ?Sized> ReportSink for &mut T {
    fn append(&mut self, candidate: &str, status: RegistrationStatus) -> Result<(), ReportError> {
        (**self).append(candidate, status)
    }
}

impl<T: RegistryLookup + ?Sized> RegistryLookup for &T {
    fn lookup(&self, candidate: &str) -> Result<RegistrationStatus, LookupError> {
        (**self).lookup(candidate)
    }
}
