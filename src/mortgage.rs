//! Mortgage runner: schedules for a batch of tracks, summed per period
//!
//! Each track is independent, so the runner fans tracks out across the rayon
//! pool and joins before aggregating. A track that fails (e.g. zero periods)
//! is logged and left out; the rest of the mortgage is still computed.

use crate::error::ScheduleError;
use crate::schedule::{accumulate_payments, generate_schedule, LedgerRow, LedgerSummary, Schedule};
use crate::track::TrackParams;
use rayon::prelude::*;
use serde::Serialize;

/// A track that could not be scheduled
#[derive(Debug)]
pub struct TrackFailure {
    /// Position of the track in the input batch
    pub index: usize,
    pub name: Option<String>,
    pub error: ScheduleError,
}

impl TrackFailure {
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("track {} ({})", self.index + 1, name),
            None => format!("track {}", self.index + 1),
        }
    }
}

/// Aggregated result for all tracks of a mortgage
#[derive(Debug)]
pub struct MortgageResult {
    /// Successful per-track schedules, in input order
    pub schedules: Vec<Schedule>,

    /// Tracks left out of the aggregate
    pub failures: Vec<TrackFailure>,

    /// Element-wise sum of the track ledgers
    pub ledger: Vec<LedgerRow>,

    /// Sum of successful track principals
    pub total_principal: f64,

    /// Sum of successful track nominal interest totals
    pub total_nominal_interest: f64,
}

impl MortgageResult {
    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary::from_ledger(&self.ledger, self.total_principal, self.total_nominal_interest)
    }

    /// Rows for periods `start..=end` (1-indexed, clamped to the ledger)
    pub fn rows_in_range(&self, start: u32, end: u32) -> &[LedgerRow] {
        let len = self.ledger.len();
        let from = (start.max(1) as usize - 1).min(len);
        let to = (end as usize).clamp(from, len);
        &self.ledger[from..to]
    }

    pub fn report(&self) -> MortgageReport<'_> {
        MortgageReport {
            summary: self.summary(),
            tracks: self
                .schedules
                .iter()
                .map(|s| TrackReport {
                    name: s.name.as_deref(),
                    method: s.method.as_str(),
                    summary: s.summary(),
                })
                .collect(),
            failures: self
                .failures
                .iter()
                .map(|f| format!("{}: {}", f.label(), f.error))
                .collect(),
            ledger: &self.ledger,
        }
    }
}

/// Serializable view of a mortgage result
#[derive(Debug, Serialize)]
pub struct MortgageReport<'a> {
    pub summary: LedgerSummary,
    pub tracks: Vec<TrackReport<'a>>,
    pub failures: Vec<String>,
    pub ledger: &'a [LedgerRow],
}

#[derive(Debug, Serialize)]
pub struct TrackReport<'a> {
    pub name: Option<&'a str>,
    pub method: &'static str,
    pub summary: LedgerSummary,
}

/// Sum ledgers period by period.
///
/// Shorter ledgers count as zero past their own end. `cumulative_payment` is
/// rebuilt from the summed totals so every aggregate row carries it.
pub fn aggregate_ledgers<'a, I>(ledgers: I) -> Vec<LedgerRow>
where
    I: IntoIterator<Item = &'a [LedgerRow]>,
{
    let mut aggregated: Vec<LedgerRow> = Vec::new();

    for ledger in ledgers {
        if ledger.len() > aggregated.len() {
            let start = aggregated.len() as u32 + 1;
            aggregated.extend((start..=ledger.len() as u32).map(LedgerRow::zero));
        }
        for (agg, row) in aggregated.iter_mut().zip(ledger) {
            agg.principal_payment += row.principal_payment;
            agg.interest_payment += row.interest_payment;
            agg.total_payment += row.total_payment;
            agg.balance += row.balance;
        }
    }

    accumulate_payments(&mut aggregated);
    aggregated
}

/// Runs schedules for a batch of tracks
#[derive(Debug, Clone)]
pub struct MortgageRunner {
    parallel: bool,
}

impl MortgageRunner {
    pub fn new() -> Self {
        Self { parallel: true }
    }

    /// Compute tracks one after another on the calling thread
    pub fn sequential() -> Self {
        Self { parallel: false }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run every track and aggregate the ones that succeed
    pub fn run(&self, tracks: &[TrackParams]) -> MortgageResult {
        let outcomes: Vec<Result<Schedule, ScheduleError>> = if self.parallel {
            tracks.par_iter().map(generate_schedule).collect()
        } else {
            tracks.iter().map(generate_schedule).collect()
        };

        let mut schedules = Vec::with_capacity(tracks.len());
        let mut failures = Vec::new();

        for (index, (track, outcome)) in tracks.iter().zip(outcomes).enumerate() {
            match outcome {
                Ok(schedule) => schedules.push(schedule),
                Err(error) => {
                    let failure = TrackFailure {
                        index,
                        name: track.name.clone(),
                        error,
                    };
                    log::warn!("Skipping {}: {}", failure.label(), failure.error);
                    failures.push(failure);
                }
            }
        }

        let ledger = aggregate_ledgers(schedules.iter().map(|s| s.ledger.as_slice()));
        let total_principal = schedules.iter().map(|s| s.principal).sum();
        let total_nominal_interest = schedules.iter().map(|s| s.total_nominal_interest).sum();

        log::info!(
            "Mortgage computed: {} tracks, {} skipped, {} periods",
            schedules.len(),
            failures.len(),
            ledger.len()
        );

        MortgageResult {
            schedules,
            failures,
            ledger,
            total_principal,
            total_nominal_interest,
        }
    }
}

impl Default for MortgageRunner {
    fn default() -> Self {
        Self::new()
    }
}
