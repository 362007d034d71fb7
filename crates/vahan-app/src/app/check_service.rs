//! Registration check pipeline
//!
//! Walks the fancy candidates in ranking order, answers each one from the
//! status cache when possible and from the registry otherwise, and writes
//! every answered candidate to the report in the same order. A failed lookup
//! is logged and skipped; cache and report failures end the run.

use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use vahan_domain::model::{Category, Identifier};
use vahan_domain::repository::{RegistryLookup, ReportSink, StatusCacheRepository};
use vahan_domain::service::{generate_classified, FancyCandidate};
use vahan_types::{LookupError, RegistrationStatus, Result};

use crate::config::Config;

/// Options for a check run
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub prefix: String,
    pub start: i64,
    pub end: i64,
    pub include_others: bool,
    /// Ignore cached statuses and query the registry again
    pub refresh: bool,
    /// Only check the first N candidates
    pub limit: Option<usize>,
    /// Pause between two registry lookups
    pub lookup_delay: Duration,
}

impl CheckOptions {
    pub fn new(prefix: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            prefix: prefix.into(),
            start,
            end,
            include_others: false,
            refresh: false,
            limit: None,
            lookup_delay: Duration::ZERO,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.prefix.clone(), config.start, config.end)
            .with_include_others(config.include_others)
            .with_lookup_delay(Duration::from_millis(config.lookup_delay_ms))
    }

    pub fn with_include_others(mut self, include_others: bool) -> Self {
        self.include_others = include_others;
        self
    }

    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_lookup_delay(mut self, delay: Duration) -> Self {
        self.lookup_delay = delay;
        self
    }
}

/// Where a status came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    Cache,
    Lookup,
}

/// A candidate that received a status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRecord {
    pub candidate: String,
    pub number: Identifier,
    pub category: Category,
    pub status: RegistrationStatus,
    pub source: RecordSource,
}

/// A candidate whose lookup failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedCheck {
    pub candidate: String,
    pub error: String,
}

/// What happened to one candidate
#[derive(Debug)]
pub enum CheckOutcome<'a> {
    Cached(RegistrationStatus),
    Checked(RegistrationStatus),
    Failed(&'a LookupError),
}

/// Progress report handed to the caller after each candidate
#[derive(Debug)]
pub struct CheckProgress<'a> {
    /// 1-based position of this candidate
    pub position: usize,
    pub total: usize,
    pub candidate: &'a str,
    pub outcome: CheckOutcome<'a>,
}

/// Result of a check run
#[derive(Debug, Clone, Serialize)]
pub struct CheckSummary {
    pub total: usize,
    pub cached: usize,
    pub looked_up: usize,
    pub records: Vec<CheckRecord>,
    pub failed: Vec<FailedCheck>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl CheckSummary {
    pub fn count(&self, status: RegistrationStatus) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }

    /// Candidates still free to register, in ranking order
    pub fn available(&self) -> impl Iterator<Item = &CheckRecord> {
        self.records
            .iter()
            .filter(|r| r.status == RegistrationStatus::Available)
    }

    pub fn duration_secs(&self) -> f64 {
        (self.completed_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

/// Lookup for runs answered entirely from the cache; any call fails
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheOnlyLookup;

impl RegistryLookup for CacheOnlyLookup {
    fn lookup(&self, _candidate: &str) -> std::result::Result<RegistrationStatus, LookupError> {
        Err(LookupError::NotConfigured)
    }
}

/// Validated list of candidates, ready to check
#[derive(Debug, Clone)]
pub struct CheckPlan {
    options: CheckOptions,
    candidates: Vec<FancyCandidate>,
}

impl CheckPlan {
    /// Generate the candidates. Range errors surface here, before any cache
    /// or report file is touched.
    pub fn new(options: CheckOptions) -> Result<Self> {
        let mut candidates = generate_classified(
            &options.prefix,
            options.start,
            options.end,
            options.include_others,
        )?;
        if let Some(limit) = options.limit {
            candidates.truncate(limit);
        }
        Ok(Self {
            options,
            candidates,
        })
    }

    pub fn candidates(&self) -> &[FancyCandidate] {
        &self.candidates
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// How many candidates would need a registry lookup
    pub fn pending_lookups<C>(&self, cache: &C) -> usize
    where
        C: StatusCacheRepository + ?Sized,
    {
        if self.options.refresh {
            return self.candidates.len();
        }
        self.candidates
            .iter()
            .filter(|c| cache.find(&c.candidate).is_none())
            .count()
    }

    /// Check every candidate in order
    pub fn run<C, R, L>(
        &self,
        cache: &mut C,
        report: &mut R,
        lookup: &L,
        mut progress: Option<&mut dyn FnMut(CheckProgress<'_>)>,
    ) -> Result<CheckSummary>
    where
        C: StatusCacheRepository + ?Sized,
        R: ReportSink + ?Sized,
        L: RegistryLookup + ?Sized,
    {
        let started_at = Utc::now();
        let total = self.candidates.len();
        info!(total, refresh = self.options.refresh, "starting registration check");

        let mut records = Vec::with_capacity(total);
        let mut failed = Vec::new();
        let mut cached = 0;
        let mut looked_up = 0;
        let mut lookups_started = 0;

        for (index, fancy) in self.candidates.iter().enumerate() {
            let candidate = fancy.candidate.as_str();

            let cached_status = if self.options.refresh {
                None
            } else {
                cache.find(candidate)
            };

            let (status, source) = match cached_status {
                Some(status) => {
                    debug!(candidate, %status, "cache hit");
                    cached += 1;
                    (status, RecordSource::Cache)
                }
                None => {
                    if lookups_started > 0 && !self.options.lookup_delay.is_zero() {
                        thread::sleep(self.options.lookup_delay);
                    }
                    lookups_started += 1;

                    match lookup.lookup(candidate) {
                        Ok(status) => {
                            debug!(candidate, %status, "registry lookup");
                            cache.save(candidate, status)?;
                            looked_up += 1;
                            (status, RecordSource::Lookup)
                        }
                        Err(err) => {
                            warn!(candidate, error = %err, "lookup failed, skipping");
                            if let Some(cb) = progress.as_deref_mut() {
                                cb(CheckProgress {
                                    position: index + 1,
                                    total,
                                    candidate,
                                    outcome: CheckOutcome::Failed(&err),
                                });
                            }
                            failed.push(FailedCheck {
                                candidate: candidate.to_string(),
                                error: err.to_string(),
                            });
                            continue;
                        }
                    }
                }
            };

            report.append(candidate, status)?;
            records.push(CheckRecord {
                candidate: candidate.to_string(),
                number: fancy.number,
                category: fancy.category,
                status,
                source,
            });

            if let Some(cb) = progress.as_deref_mut() {
                let outcome = match source {
                    RecordSource::Cache => CheckOutcome::Cached(status),
                    RecordSource::Lookup => CheckOutcome::Checked(status),
                };
                cb(CheckProgress {
                    position: index + 1,
                    total,
                    candidate,
                    outcome,
                });
            }
        }

        let summary = CheckSummary {
            total,
            cached,
            looked_up,
            records,
            failed,
            started_at,
            completed_at: Utc::now(),
        };
        info!(
            total,
            cached,
            looked_up,
            failed = summary.failed.len(),
            "registration check finished"
        );
        Ok(summary)
    }
}
