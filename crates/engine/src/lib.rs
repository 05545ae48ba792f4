//! Repair engine and report builder for linkmend
//!
//! The engine layer orchestrates the leaves: the report builder walks a
//! subtree and joins it against the link index; the repair engine consumes
//! a report record and rewrites the referencing field across every version
//! of the referring item, keeping the index consistent as it goes.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod repair;
pub mod report;

pub use repair::{RepairEngine, RepairOutcome};
pub use report::{FieldLabel, RecordToken, ReportBuilder, ReportOptions, ReportRecord};
