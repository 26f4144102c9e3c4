//! Bullet (interest-only) schedule

use super::indexation::Indexation;
use super::ledger::{LedgerRow, Schedule};
use super::ScheduleGenerator;
use crate::error::Result;
use crate::track::{RepaymentMethod, TrackParams};

#[derive(Debug, Clone, Copy, Default)]
pub struct BulletCalculator;

impl ScheduleGenerator for BulletCalculator {
    fn method(&self) -> RepaymentMethod {
        RepaymentMethod::Bullet
    }

    fn generate(&self, track: &TrackParams) -> Result<Schedule> {
        track.validate()?;

        let idx = Indexation::from_track(track);
        let period_count = track.period_count;

        // Interest on the original principal, never on a declining balance
        let nominal_interest = track.principal * idx.monthly_rate;

        let mut schedule = Schedule::new(RepaymentMethod::Bullet, track.principal);
        schedule.total_nominal_interest = nominal_interest * period_count as f64;

        for (i, f) in idx.factors(period_count).into_iter().enumerate() {
            let period = i as u32 + 1;
            let indexed_principal = track.principal * f;

            let row = if period == period_count {
                LedgerRow::new(period, indexed_principal, nominal_interest * f, 0.0)
            } else {
                LedgerRow::new(period, 0.0, nominal_interest * f, indexed_principal)
            };
            schedule.add_row(row);
        }

        Ok(schedule)
    }
}
