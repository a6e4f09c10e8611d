//! Report persistence adapters.

mod memory;

pub use memory::{AccountRecord, CompetitorRow, InMemoryReportStore, ReportRecord};
