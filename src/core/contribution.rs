use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::BeitragError;
use super::schedule::invoice_period;
use super::types::{ContributionCalculation, RecurrenceInterval};

/// Full contribution calculation for one billing period starting `today`.
///
/// Association fees are typically untaxed, so `tax_rate` is usually 0; the
/// rate is a percentage applied to `base_amount` with commercial (half-up)
/// rounding to 2 decimal places. Negative inputs are caller errors and are
/// rejected rather than propagated into control sums downstream.
pub fn contribution_amount(
    base_amount: Decimal,
    tax_rate: Decimal,
    interval: RecurrenceInterval,
    today: NaiveDate,
) -> Result<ContributionCalculation, BeitragError> {
    if base_amount < Decimal::ZERO {
        return Err(BeitragError::InvalidAmount(format!(
            "base amount must not be negative, got {base_amount}"
        )));
    }
    if tax_rate < Decimal::ZERO {
        return Err(BeitragError::InvalidAmount(format!(
            "tax rate must not be negative, got {tax_rate}"
        )));
    }

    let tax_amount = round_half_up(base_amount * tax_rate / dec!(100), 2);
    let total_amount = base_amount + tax_amount;
    let period = invoice_period(today, interval)?;

    Ok(ContributionCalculation {
        base_amount,
        tax_amount,
        total_amount,
        period,
        interval,
    })
}

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
pub(crate) fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
