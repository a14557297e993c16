use chrono::{Datelike, Days, NaiveDate, Weekday};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::mandate::{sanitize_iban, validate_bic};
use crate::core::{BeitragError, ContributionInvoice, Member, ValidationError};

/// Upper bound for a single instructed amount.
const MAX_INSTRUCTED_AMOUNT: Decimal = dec!(999999.99);

/// One instructed direct debit, immutable once created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SepaDirectDebitTransaction {
    /// Mandate reference communicated to the debtor bank (max 35 chars).
    pub mandate_reference: String,
    /// Date the mandate was signed.
    pub mandate_date: NaiveDate,
    /// Account holder name (max 70 chars).
    pub debtor_name: String,
    pub debtor_iban: String,
    /// Optional; the document carries `NOTPROVIDED` when absent.
    pub debtor_bic: Option<String>,
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// End-to-end reference, here the invoice number (max 35 chars).
    pub end_to_end_id: String,
    /// Unstructured remittance text (max 140 chars).
    pub remittance_info: String,
}

/// A named, dated collection of direct debits sharing one collection date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SepaBatch {
    /// Externally assigned batch number, also used as `PmtInfId`.
    pub batch_number: String,
    pub batch_date: NaiveDate,
    /// Requested collection date for every transaction in the batch.
    pub execution_date: NaiveDate,
    pub total_transactions: u32,
    pub total_amount: Decimal,
    pub currency: String,
}

/// Build a direct-debit transaction for the outstanding amount of an
/// invoice.
///
/// Fails with [`BeitragError::MissingMandate`] unless the member carries an
/// IBAN, a mandate reference, and a mandate signature date. Mandate *status*
/// is not checked here — gate on [`super::is_mandate_valid`] when selecting
/// members for a batch.
pub fn transaction_from_invoice(
    member: &Member,
    invoice: &ContributionInvoice,
) -> Result<SepaDirectDebitTransaction, BeitragError> {
    let (Some(iban), Some(mandate_reference), Some(mandate_date)) = (
        member.iban.as_deref().filter(|s| !s.is_empty()),
        member
            .sepa_mandate_reference
            .as_deref()
            .filter(|s| !s.is_empty()),
        member.sepa_mandate_date,
    ) else {
        return Err(BeitragError::MissingMandate(format!(
            "member {} has incomplete SEPA mandate data",
            member.member_number
        )));
    };

    let debtor_name = member
        .account_holder
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} {}", member.first_name, member.last_name));

    let remittance_info = invoice
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Rechnung {}", invoice.invoice_number));

    Ok(SepaDirectDebitTransaction {
        mandate_reference: mandate_reference.to_string(),
        mandate_date,
        debtor_name,
        debtor_iban: iban.to_string(),
        debtor_bic: member.bic.clone().filter(|b| !b.is_empty()),
        amount: invoice.total_amount - invoice.paid_amount,
        currency: invoice.currency.clone(),
        end_to_end_id: invoice.invoice_number.clone(),
        remittance_info,
    })
}

/// Validate a transaction against the pain.008 field constraints.
///
/// Never fails — every violated rule is collected so the caller can report a
/// whole batch to an operator and decide per transaction whether to exclude
/// it or halt. The XML generator does not re-validate.
pub fn validate_transaction(tx: &SepaDirectDebitTransaction) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !has_iban_shape(&sanitize_iban(&tx.debtor_iban)) {
        errors.push(ValidationError::new("debtor_iban", "invalid IBAN format"));
    }

    if let Some(bic) = tx.debtor_bic.as_deref().filter(|b| !b.is_empty()) {
        if !validate_bic(bic) {
            errors.push(ValidationError::new("debtor_bic", "invalid BIC format"));
        }
    }

    if tx.amount <= Decimal::ZERO {
        errors.push(ValidationError::new(
            "amount",
            "amount must be greater than zero",
        ));
    }
    if tx.amount > MAX_INSTRUCTED_AMOUNT {
        errors.push(ValidationError::new(
            "amount",
            "amount exceeds maximum allowed",
        ));
    }

    if tx.mandate_reference.is_empty() || tx.mandate_reference.chars().count() > 35 {
        errors.push(ValidationError::new(
            "mandate_reference",
            "mandate reference must be 1-35 characters",
        ));
    }

    if tx.debtor_name.is_empty() || tx.debtor_name.chars().count() > 70 {
        errors.push(ValidationError::new(
            "debtor_name",
            "debtor name must be 1-70 characters",
        ));
    }

    if tx.end_to_end_id.is_empty() || tx.end_to_end_id.chars().count() > 35 {
        errors.push(ValidationError::new(
            "end_to_end_id",
            "end-to-end id must be 1-35 characters",
        ));
    }

    if tx.remittance_info.chars().count() > 140 {
        errors.push(ValidationError::new(
            "remittance_info",
            "remittance info must not exceed 140 characters",
        ));
    }

    errors
}

/// Structural IBAN check: two uppercase letters, two digits, alphanumeric
/// rest. The full checksum lives in [`super::validate_iban`]; batch
/// validation only guards the document format.
fn has_iban_shape(iban: &str) -> bool {
    let bytes = iban.as_bytes();
    bytes.len() > 4
        && bytes[..2].iter().all(u8::is_ascii_uppercase)
        && bytes[2..4].iter().all(u8::is_ascii_digit)
        && bytes[4..]
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

/// Latest submission date for a collection due on `due_date`: banks need 5
/// business days of lead time for a first collection, 2 for a recurring one.
/// Weekends are skipped backwards.
pub fn execution_date(due_date: NaiveDate, is_first_debit: bool) -> Result<NaiveDate, BeitragError> {
    let lead_days = if is_first_debit { 5 } else { 2 };

    let mut date = due_date
        .checked_sub_days(Days::new(lead_days))
        .ok_or_else(|| BeitragError::Arithmetic(format!("execution date out of range for {due_date}")))?;

    while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        date = date.checked_sub_days(Days::new(1)).ok_or_else(|| {
            BeitragError::Arithmetic(format!("execution date out of range for {due_date}"))
        })?;
    }

    Ok(date)
}

/// Aggregate figures over a prospective batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchTotals {
    pub total_transactions: usize,
    pub total_amount: Decimal,
    pub average_amount: Decimal,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub currency: String,
}

/// Compute batch totals. An empty slice yields all zeros and EUR.
pub fn batch_totals(transactions: &[SepaDirectDebitTransaction]) -> BatchTotals {
    let Some(first) = transactions.first() else {
        return BatchTotals {
            currency: "EUR".to_string(),
            ..BatchTotals::default()
        };
    };

    let total_amount: Decimal = transactions.iter().map(|tx| tx.amount).sum();
    let min_amount = transactions
        .iter()
        .map(|tx| tx.amount)
        .fold(first.amount, Decimal::min);
    let max_amount = transactions
        .iter()
        .map(|tx| tx.amount)
        .fold(first.amount, Decimal::max);

    BatchTotals {
        total_transactions: transactions.len(),
        total_amount,
        average_amount: total_amount / Decimal::from(transactions.len()),
        min_amount,
        max_amount,
        currency: first.currency.clone(),
    }
}
