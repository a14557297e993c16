use chrono::{Days, Months, NaiveDate};

use super::error::BeitragError;
use super::types::{Period, RecurrenceInterval};

/// Next due date after `start` for the given recurrence interval.
///
/// Month arithmetic clamps to the end of the target month (Jan 31 + 1 month
/// = Feb 28/29). `OneTime` contributions have no following due date and
/// return `start` unchanged.
pub fn next_due_date(
    start: NaiveDate,
    interval: RecurrenceInterval,
) -> Result<NaiveDate, BeitragError> {
    let next = match interval {
        RecurrenceInterval::Monthly => start.checked_add_months(Months::new(1)),
        RecurrenceInterval::Quarterly => start.checked_add_months(Months::new(3)),
        RecurrenceInterval::SemiAnnual => start.checked_add_months(Months::new(6)),
        RecurrenceInterval::Annual => start.checked_add_months(Months::new(12)),
        RecurrenceInterval::OneTime => Some(start),
    };
    next.ok_or_else(|| {
        BeitragError::Arithmetic(format!(
            "next due date out of range for {start} + {}",
            interval.code()
        ))
    })
}

/// Billing period starting at `start`: ends the day before the next due
/// date, so consecutive periods neither gap nor overlap.
pub fn invoice_period(
    start: NaiveDate,
    interval: RecurrenceInterval,
) -> Result<Period, BeitragError> {
    let end = next_due_date(start, interval)?
        .checked_sub_days(Days::new(1))
        .ok_or_else(|| BeitragError::Arithmetic(format!("period end out of range for {start}")))?;
    Ok(Period { start, end })
}
