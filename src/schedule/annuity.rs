//! Constant-payment (annuity) schedule
//!
//! The nominal payment is level across periods. Interest is charged on the
//! remaining nominal balance and the rest of the payment retires principal.
//! Both components are then scaled by the compounded index factor.

use super::indexation::Indexation;
use super::ledger::{accumulate_payments, LedgerRow, Schedule};
use super::ScheduleGenerator;
use crate::error::Result;
use crate::track::{RepaymentMethod, TrackParams};

/// Level nominal payment for a fixed-rate, fixed-term loan.
///
/// Falls back to straight division when the rate is zero.
pub fn level_payment(principal: f64, monthly_rate: f64, period_count: u32) -> f64 {
    let n = period_count as f64;
    if monthly_rate == 0.0 {
        return principal / n;
    }
    principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-n))
}

/// Nominal (interest, principal) split of each level payment, periods 1..=N
pub fn nominal_components(principal: f64, monthly_rate: f64, period_count: u32) -> Vec<(f64, f64)> {
    let payment = level_payment(principal, monthly_rate, period_count);
    let mut balance = principal;

    (0..period_count)
        .map(|_| {
            let interest = balance * monthly_rate;
            let principal_part = payment - interest;
            balance -= principal_part;
            (interest, principal_part)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnnuityCalculator;

impl ScheduleGenerator for AnnuityCalculator {
    fn method(&self) -> RepaymentMethod {
        RepaymentMethod::Straight
    }

    fn generate(&self, track: &TrackParams) -> Result<Schedule> {
        track.validate()?;

        let idx = Indexation::from_track(track);
        let nominal = nominal_components(track.principal, idx.monthly_rate, track.period_count);
        let factors = idx.factors(track.period_count);

        let indexed_principal: Vec<f64> = nominal
            .iter()
            .zip(&factors)
            .map(|(&(_, principal), &f)| principal * f)
            .collect();
        let balances = idx.roll_balance(track.principal, &indexed_principal);

        let mut schedule = Schedule::new(RepaymentMethod::Straight, track.principal);
        schedule.total_nominal_interest = nominal.iter().map(|&(interest, _)| interest).sum();

        for (i, ((&(interest, _), &f), (&principal_payment, &balance))) in nominal
            .iter()
            .zip(&factors)
            .zip(indexed_principal.iter().zip(&balances))
            .enumerate()
        {
            let period = i as u32 + 1;
            schedule.add_row(LedgerRow::new(period, principal_payment, interest * f, balance));
        }
        accumulate_payments(&mut schedule.ledger);

        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn straight(principal: f64, rate: f64, periods: u32) -> TrackParams {
        TrackParams::new(RepaymentMethod::Straight, principal, rate, periods)
    }

    #[test]
    fn test_level_payment() {
        // 100k over 30 years at 6%: well-known 599.55
        let pmt = level_payment(100_000.0, 0.005, 360);
        assert_abs_diff_eq!(pmt, 599.55, epsilon = 0.01);

        assert_eq!(level_payment(1200.0, 0.0, 12), 100.0);
    }

    #[test]
    fn test_level_payment_huge_term() {
        // Term beyond i32 range tends to pure interest
        let pmt = level_payment(100_000.0, 0.005, 1 << 31);
        assert_relative_eq!(pmt, 500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_over_long_term_rejected() {
        let err = AnnuityCalculator.generate(&straight(100_000.0, 6.0, 1 << 31)).unwrap_err();
        assert!(matches!(err, crate::error::ScheduleError::InvalidPeriod { .. }));
    }

    #[test]
    fn test_twelve_month_scenario() {
        let schedule = AnnuityCalculator.generate(&straight(120_000.0, 3.0, 12)).unwrap();

        assert_eq!(schedule.len(), 12);
        assert_abs_diff_eq!(schedule.ledger[11].balance, 0.0, epsilon = 1e-6);

        let principal_paid: f64 = schedule.ledger.iter().map(|r| r.principal_payment).sum();
        assert_abs_diff_eq!(principal_paid, 120_000.0, epsilon = 1e-6);

        // First period interest is one month on the full balance
        assert_relative_eq!(schedule.ledger[0].interest_payment, 300.0, epsilon = 1e-9);

        // Nominal payment is level without indexation
        let first = schedule.ledger[0].total_payment;
        for row in &schedule.ledger {
            assert_abs_diff_eq!(row.total_payment, first, epsilon = 1e-9);
        }

        let interest: f64 = schedule.ledger.iter().map(|r| r.interest_payment).sum();
        assert_abs_diff_eq!(schedule.total_nominal_interest, interest, epsilon = 1e-9);
    }

    #[test]
    fn test_cumulative_payment() {
        let track = straight(50_000.0, 4.5, 24).with_indexation(1.5, vec![1.0]);
        let schedule = AnnuityCalculator.generate(&track).unwrap();

        let ledger = &schedule.ledger;
        assert_eq!(ledger[0].cumulative_payment, Some(ledger[0].total_payment));
        for n in 1..ledger.len() {
            let prev = ledger[n - 1].cumulative_payment.unwrap();
            let curr = ledger[n].cumulative_payment.unwrap();
            assert_relative_eq!(curr, prev + ledger[n].total_payment, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        let track = straight(300_000.0, 3.2, 240).with_indexation(2.5, vec![1.0, 1.0]);
        let schedule = AnnuityCalculator.generate(&track).unwrap();

        for row in &schedule.ledger {
            assert_eq!(row.total_payment, row.principal_payment + row.interest_payment);
        }
    }

    #[test]
    fn test_indexation_scales_payments() {
        let base = straight(100_000.0, 3.0, 120);
        let indexed = base.clone().with_indexation(2.4, vec![1.0]);

        let nominal = AnnuityCalculator.generate(&base).unwrap();
        let cpi = AnnuityCalculator.generate(&indexed).unwrap();

        // f = 1.002; period n is scaled by f^n
        for (n, (a, b)) in nominal.ledger.iter().zip(&cpi.ledger).enumerate() {
            let f = 1.002_f64.powi(n as i32 + 1);
            assert_relative_eq!(b.interest_payment, a.interest_payment * f, max_relative = 1e-12);
            assert_relative_eq!(b.principal_payment, a.principal_payment * f, max_relative = 1e-12);
        }

        // Nominal interest total ignores indexation
        assert_relative_eq!(
            cpi.total_nominal_interest,
            nominal.total_nominal_interest,
            max_relative = 1e-12
        );

        // Balance still runs off with indexation applied to it
        assert_abs_diff_eq!(cpi.ledger.last().unwrap().balance, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_index_neutral_without_rate() {
        let plain = straight(80_000.0, 2.0, 36);
        let zero_rate = plain.clone().with_indexation(0.0, vec![1.0, 2.0, 3.0]);

        let a = AnnuityCalculator.generate(&plain).unwrap();
        let b = AnnuityCalculator.generate(&zero_rate).unwrap();
        assert_eq!(a.ledger, b.ledger);
    }

    #[test]
    fn test_zero_rate_is_equal_principal() {
        let schedule = AnnuityCalculator.generate(&straight(12_000.0, 0.0, 12)).unwrap();

        assert_eq!(schedule.total_nominal_interest, 0.0);
        for row in &schedule.ledger {
            assert_abs_diff_eq!(row.principal_payment, 1000.0, epsilon = 1e-9);
            assert_eq!(row.interest_payment, 0.0);
        }
    }

    #[test]
    fn test_single_period() {
        let schedule = AnnuityCalculator.generate(&straight(10_000.0, 6.0, 1)).unwrap();

        assert_eq!(schedule.len(), 1);
        assert_relative_eq!(schedule.ledger[0].total_payment, 10_050.0, epsilon = 1e-9);
        assert_abs_diff_eq!(schedule.ledger[0].balance, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_rate_flows_through() {
        let schedule = AnnuityCalculator.generate(&straight(10_000.0, -1.2, 10)).unwrap();

        assert!(schedule.total_nominal_interest < 0.0);
        assert_abs_diff_eq!(schedule.ledger[9].balance, 0.0, epsilon = 1e-6);
    }
}
