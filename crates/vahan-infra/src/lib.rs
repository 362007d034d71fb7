//! Infrastructure layer - file persistence, report writing, registry lookup

pub mod command_lookup;
pub mod persistence;
pub mod report_csv;
