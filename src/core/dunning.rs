use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::BeitragError;
use super::types::*;

/// Escalation thresholds in days overdue. Fixed policy, not configurable.
const FIRST_REMINDER_AFTER_DAYS: i64 = 7;
const SECOND_REMINDER_AFTER_DAYS: i64 = 21;
const THIRD_REMINDER_AFTER_DAYS: i64 = 35;

/// Days granted to settle a reminder.
const REMINDER_PAYMENT_TERM_DAYS: u64 = 7;

/// Whether an invoice counts as overdue on `today`.
///
/// Paid and cancelled invoices are never overdue, regardless of dates.
pub fn is_invoice_overdue(invoice: &ContributionInvoice, today: NaiveDate) -> bool {
    if matches!(
        invoice.payment_status,
        PaymentStatus::Paid | PaymentStatus::Cancelled
    ) {
        return false;
    }
    today > invoice.due_date
}

/// Whole days past the due date, 0 if not overdue.
pub fn days_overdue(invoice: &ContributionInvoice, today: NaiveDate) -> i64 {
    if !is_invoice_overdue(invoice, today) {
        return 0;
    }
    (today - invoice.due_date).num_days()
}

/// Escalation level warranted by the given days overdue, `None` inside the
/// grace window.
pub fn determine_reminder_level(days_overdue: i64) -> Option<ReminderLevel> {
    if days_overdue < FIRST_REMINDER_AFTER_DAYS {
        None
    } else if days_overdue < SECOND_REMINDER_AFTER_DAYS {
        Some(ReminderLevel::First)
    } else if days_overdue < THIRD_REMINDER_AFTER_DAYS {
        Some(ReminderLevel::Second)
    } else {
        Some(ReminderLevel::Third)
    }
}

/// Flat dunning fee per escalation level, in EUR.
pub fn reminder_fee(level: ReminderLevel) -> Decimal {
    match level {
        ReminderLevel::First => dec!(5.00),
        ReminderLevel::Second => dec!(10.00),
        ReminderLevel::Third => dec!(15.00),
    }
}

/// Outcome of [`should_send_reminder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderDecision {
    pub send: bool,
    pub level: Option<ReminderLevel>,
}

impl ReminderDecision {
    fn no() -> Self {
        Self {
            send: false,
            level: None,
        }
    }
}

/// Decide whether a reminder is due for this invoice on `today`.
///
/// Idempotent and monotonic: a level at or below the invoice's stored
/// `reminder_level` never fires again, so re-running a dunning sweep cannot
/// re-send a reminder as long as the caller bumps `reminder_level` when it
/// persists the generated notice.
pub fn should_send_reminder(invoice: &ContributionInvoice, today: NaiveDate) -> ReminderDecision {
    if !is_invoice_overdue(invoice, today) {
        return ReminderDecision::no();
    }

    match determine_reminder_level(days_overdue(invoice, today)) {
        Some(level) if level.code() > invoice.reminder_level => ReminderDecision {
            send: true,
            level: Some(level),
        },
        _ => ReminderDecision::no(),
    }
}

fn reminder_text(level: ReminderLevel) -> &'static str {
    match level {
        ReminderLevel::First => "Erste Zahlungserinnerung",
        ReminderLevel::Second => "Zweite Mahnung",
        ReminderLevel::Third => "Letzte Mahnung vor rechtlichen Schritten",
    }
}

/// Draft a dunning notice for an overdue invoice at the given level.
///
/// Pure and append-only: the invoice itself is not touched. The caller must
/// persist the notice and raise `invoice.reminder_level` atomically,
/// otherwise a concurrent sweep can double-remind.
pub fn generate_reminder(
    invoice: &ContributionInvoice,
    member: &Member,
    level: ReminderLevel,
    today: NaiveDate,
) -> Result<DraftReminder, BeitragError> {
    let outstanding = invoice.total_amount - invoice.paid_amount;
    let fee = reminder_fee(level);

    let payment_deadline = today
        .checked_add_days(Days::new(REMINDER_PAYMENT_TERM_DAYS))
        .ok_or_else(|| {
            BeitragError::Arithmetic(format!("payment deadline out of range for {today}"))
        })?;

    let sent_via = if member.email.as_deref().is_some_and(|e| !e.is_empty()) {
        ReminderChannel::Email
    } else {
        ReminderChannel::Post
    };

    Ok(DraftReminder {
        invoice_id: invoice.id.clone(),
        member_id: member.id.clone(),
        reminder_level: level,
        reminder_date: today,
        original_amount: outstanding,
        reminder_fee: fee,
        total_amount: outstanding + fee,
        currency: invoice.currency.clone(),
        payment_deadline,
        description: format!(
            "{} für Rechnung {}",
            reminder_text(level),
            invoice.invoice_number
        ),
        sent_via,
    })
}
