//! Use cases

pub mod check_service;

pub use check_service::{
    CacheOnlyLookup, CheckOptions, CheckOutcome, CheckPlan, CheckProgress, CheckRecord,
    CheckSummary, FailedCheck, RecordSource,
};
