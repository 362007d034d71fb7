//! Persistence implementations
//!
//! This module provides file-based implementations of the repository traits.

mod file_status_cache;

pub use file_status_cache::{CacheStats, FileStatusCache};
