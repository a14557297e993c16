use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use super::contribution::contribution_amount;
use super::error::BeitragError;
use super::types::*;

/// Payment term granted on contribution invoices.
const PAYMENT_TERM_DAYS: u64 = 14;

/// Draft an invoice for one member contribution and billing period.
///
/// The effective interval and amount are the contribution's overrides when
/// set, otherwise the definition's values (interval falls back to annual).
/// Members with an active SEPA mandate are billed by direct debit, everyone
/// else by bank transfer. The draft carries no invoice number — that is
/// assigned by the storage sequence on insert.
pub fn generate_invoice(
    member: &Member,
    contribution: &MemberContribution,
    definition: &ContributionDefinition,
    invoice_date: NaiveDate,
) -> Result<DraftInvoice, BeitragError> {
    let interval = contribution
        .custom_interval
        .or(definition.recurrence_interval)
        .unwrap_or(RecurrenceInterval::Annual);
    let amount = contribution.custom_amount.unwrap_or(definition.amount);

    let calculation = contribution_amount(amount, Decimal::ZERO, interval, invoice_date)?;
    let period = calculation.period;

    let due_date = invoice_date
        .checked_add_days(Days::new(PAYMENT_TERM_DAYS))
        .ok_or_else(|| BeitragError::Arithmetic(format!("due date out of range for {invoice_date}")))?;

    let payment_method = if member.sepa_mandate_status == Some(SepaMandateStatus::Active) {
        PaymentMethod::SepaDebit
    } else {
        PaymentMethod::BankTransfer
    };

    let description = format!(
        "{} für Zeitraum {} - {}",
        definition.name,
        period.start.format("%d.%m.%Y"),
        period.end.format("%d.%m.%Y"),
    );

    Ok(DraftInvoice {
        member_id: member.id.clone(),
        member_contribution_id: Some(contribution.id.clone()),
        invoice_date,
        due_date,
        period_start: period.start,
        period_end: period.end,
        amount: calculation.base_amount,
        currency: definition.currency.clone(),
        tax_rate: Decimal::ZERO,
        tax_amount: calculation.tax_amount,
        total_amount: calculation.total_amount,
        payment_method,
        description,
        line_items: vec![InvoiceLineItem {
            description: definition.name.clone(),
            quantity: Decimal::ONE,
            unit_price: calculation.base_amount,
            total: calculation.base_amount,
            tax_rate: Decimal::ZERO,
        }],
    })
}
