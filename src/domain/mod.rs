//! Core domain types and logic.

pub mod bar;
pub mod returns;
pub mod engine;
pub mod schedule;
pub mod indicator;
pub mod trend;
pub mod strategy;
pub mod study;
pub mod config_validation;
pub mod error;
