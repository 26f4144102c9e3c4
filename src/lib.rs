//! Mortgage Schedule - amortization engine for indexed mortgage tracks
//!
//! This library provides:
//! - Per-track schedules for three repayment methods (straight annuity,
//!   declining equal-principal, bullet interest-only)
//! - Monthly indexation of principal, interest and balance
//! - Multi-track aggregation into a mortgage-level ledger
//! - Track loading from CSV/JSON and ledger output as CSV, tables or JSON

pub mod error;
pub mod track;
pub mod schedule;
pub mod mortgage;
pub mod output;

// Re-export commonly used types
pub use error::ScheduleError;
pub use track::{RepaymentMethod, TrackParams};
pub use schedule::{generate_schedule, LedgerRow, LedgerSummary, Schedule, ScheduleGenerator};
pub use mortgage::{MortgageResult, MortgageRunner};
