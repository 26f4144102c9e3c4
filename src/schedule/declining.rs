//! Equal-principal (declining) schedule

use super::indexation::Indexation;
use super::ledger::{LedgerRow, Schedule};
use super::ScheduleGenerator;
use crate::error::Result;
use crate::track::{RepaymentMethod, TrackParams};

/// Interest stream on the declining balance.
///
/// Period 1 charges interest on `principal * first_factor`; every later
/// period charges on the previous period's closing balance. Passing the index
/// factor gives the indexed stream, passing 1.0 gives the nominal one.
fn interest_stream(
    principal: f64,
    balances: &[f64],
    monthly_rate: f64,
    first_factor: f64,
) -> Vec<f64> {
    let first = principal * first_factor * monthly_rate;
    std::iter::once(first)
        .chain(
            balances
                .iter()
                .take(balances.len().saturating_sub(1))
                .map(|b| b * monthly_rate),
        )
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DecliningCalculator;

impl ScheduleGenerator for DecliningCalculator {
    fn method(&self) -> RepaymentMethod {
        RepaymentMethod::Declining
    }

    fn generate(&self, track: &TrackParams) -> Result<Schedule> {
        track.validate()?;

        let idx = Indexation::from_track(track);
        let nominal_principal = track.principal / track.period_count as f64;

        let indexed_principal: Vec<f64> = idx
            .factors(track.period_count)
            .into_iter()
            .map(|f| nominal_principal * f)
            .collect();
        let balances = idx.roll_balance(track.principal, &indexed_principal);

        let indexed_interest =
            interest_stream(track.principal, &balances, idx.monthly_rate, idx.monthly_index_factor);
        // Later periods still charge on the indexed balance; only period 1 differs
        let nominal_interest = interest_stream(track.principal, &balances, idx.monthly_rate, 1.0);

        let mut schedule = Schedule::new(RepaymentMethod::Declining, track.principal);
        schedule.total_nominal_interest = nominal_interest.iter().sum();

        for (i, ((&principal_payment, &interest), &balance)) in indexed_principal
            .iter()
            .zip(&indexed_interest)
            .zip(&balances)
            .enumerate()
        {
            schedule.add_row(LedgerRow::new(i as u32 + 1, principal_payment, interest, balance));
        }

        Ok(schedule)
    }
}
