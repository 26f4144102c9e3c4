//! Amortization schedule generation for a single track
//!
//! Three calculators, one per [`RepaymentMethod`], share the
//! [`ScheduleGenerator`] interface and the indexed ledger contract:
//! - **Straight**: level nominal payment ([`AnnuityCalculator`])
//! - **Declining**: equal principal ([`DecliningCalculator`])
//! - **Bullet**: interest only, principal at maturity ([`BulletCalculator`])
//!
//! # Example
//!
//! ```rust
//! use mortgage_schedule::{generate_schedule, RepaymentMethod, TrackParams};
//!
//! let track = TrackParams::new(RepaymentMethod::Straight, 120_000.0, 3.0, 12);
//! let schedule = generate_schedule(&track).unwrap();
//! assert_eq!(schedule.ledger.len(), 12);
//! ```

mod annuity;
mod bullet;
mod declining;
mod indexation;
mod ledger;

pub use annuity::{level_payment, nominal_components, AnnuityCalculator};
pub use bullet::BulletCalculator;
pub use declining::DecliningCalculator;
pub use indexation::Indexation;
pub use ledger::{accumulate_payments, LedgerRow, LedgerSummary, Schedule};

use crate::error::Result;
use crate::track::{RepaymentMethod, TrackParams};

/// Produces a ledger and nominal interest total from one track's parameters
pub trait ScheduleGenerator {
    /// Method this generator implements
    fn method(&self) -> RepaymentMethod;

    /// Build the schedule. Fails only on invalid periods or non-finite amounts.
    fn generate(&self, track: &TrackParams) -> Result<Schedule>;
}

impl RepaymentMethod {
    /// Calculator for this method
    pub fn generator(&self) -> &'static dyn ScheduleGenerator {
        match self {
            RepaymentMethod::Straight => &AnnuityCalculator,
            RepaymentMethod::Declining => &DecliningCalculator,
            RepaymentMethod::Bullet => &BulletCalculator,
        }
    }
}

/// Generate the schedule for a track using its own repayment method
pub fn generate_schedule(track: &TrackParams) -> Result<Schedule> {
    let mut schedule = track.method.generator().generate(track)?;
    schedule.name = track.name.clone();

    log::debug!(
        "{} schedule: principal={:.2} periods={} first_payment={:.2} nominal_interest={:.2}",
        track.method,
        track.principal,
        schedule.len(),
        schedule.first_payment(),
        schedule.total_nominal_interest,
    );

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleError;

    #[test]
    fn test_dispatch_by_method() {
        for method in RepaymentMethod::ALL {
            assert_eq!(method.generator().method(), method);

            let track = TrackParams::new(method, 24_000.0, 3.0, 24).with_name("track");
            let schedule = generate_schedule(&track).unwrap();
            assert_eq!(schedule.method, method);
            assert_eq!(schedule.name.as_deref(), Some("track"));
            assert_eq!(schedule.len(), 24);
        }
    }

    #[test]
    fn test_zero_periods_rejected_for_every_method() {
        for method in RepaymentMethod::ALL {
            let track = TrackParams::new(method, 24_000.0, 3.0, 0);
            assert!(matches!(
                generate_schedule(&track),
                Err(ScheduleError::InvalidPeriod { .. })
            ));
        }
    }

    #[test]
    fn test_only_straight_has_cumulative() {
        for method in RepaymentMethod::ALL {
            let track = TrackParams::new(method, 10_000.0, 2.0, 6);
            let schedule = generate_schedule(&track).unwrap();
            let has_cumulative = schedule.ledger.iter().all(|r| r.cumulative_payment.is_some());
            assert_eq!(has_cumulative, method == RepaymentMethod::Straight);
        }
    }

    #[test]
    fn test_period_numbering() {
        let track = TrackParams::new(RepaymentMethod::Declining, 10_000.0, 2.0, 5);
        let schedule = generate_schedule(&track).unwrap();
        let periods: Vec<u32> = schedule.ledger.iter().map(|r| r.period).collect();
        assert_eq!(periods, vec![1, 2, 3, 4, 5]);
    }
}
