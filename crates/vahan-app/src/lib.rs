//! Application service layer - config, check pipeline, repository wiring

pub mod app;
pub mod config;
pub mod repository;
