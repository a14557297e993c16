use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BeitragError;

/// Lifecycle state of a member's SEPA direct-debit mandate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SepaMandateStatus {
    /// Mandate issued but not yet signed/confirmed.
    Pending,
    /// Signed and usable for collection.
    Active,
    /// Revoked by the member.
    Revoked,
    /// Lapsed (36 months without collection under SEPA rules).
    Expired,
}

impl SepaMandateStatus {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Revoked => "revoked",
            Self::Expired => "expired",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(Self::Pending),
            "active" => Some(Self::Active),
            "revoked" => Some(Self::Revoked),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }
}

/// Billing recurrence of a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceInterval {
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
    OneTime,
}

impl RecurrenceInterval {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::SemiAnnual => "semi_annual",
            Self::Annual => "annual",
            Self::OneTime => "one_time",
        }
    }

    /// Parse from the storage representation (e.g. `"quarterly"`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "semi_annual" => Some(Self::SemiAnnual),
            "annual" => Some(Self::Annual),
            "one_time" => Some(Self::OneTime),
            _ => None,
        }
    }
}

impl std::str::FromStr for RecurrenceInterval {
    type Err = BeitragError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| BeitragError::InvalidInterval(s.to_string()))
    }
}

/// Payment state of an invoice. Mutated only by the external
/// payment-processing collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Partial,
    Paid,
    Overdue,
    Cancelled,
    Refunded,
}

/// How an invoice is expected to be settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    SepaDebit,
    BankTransfer,
    Cash,
    Card,
    Other,
}

/// Dunning escalation level (first reminder through final notice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum ReminderLevel {
    First = 1,
    Second = 2,
    Third = 3,
}

impl ReminderLevel {
    /// Numeric level as stored on the invoice (1..=3).
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::First),
            2 => Some(Self::Second),
            3 => Some(Self::Third),
            _ => None,
        }
    }
}

impl From<ReminderLevel> for u8 {
    fn from(level: ReminderLevel) -> Self {
        level.code()
    }
}

impl TryFrom<u8> for ReminderLevel {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        ReminderLevel::from_code(code).ok_or_else(|| format!("invalid reminder level: {code}"))
    }
}

/// Dispatch channel for a dunning notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderChannel {
    Email,
    Post,
}

/// A billable member as handed over by the membership-management layer.
///
/// Identifiers are opaque strings assigned by storage. This core never
/// creates or mutates members; mandate state changes happen upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Member {
    /// Storage identifier.
    pub id: String,
    /// Human-facing member number (e.g. "M-2025-0042").
    pub member_number: String,
    pub first_name: String,
    pub last_name: String,
    /// Preferred dunning channel is email when present.
    pub email: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    /// Account to debit. Required (with an active mandate) for direct debit.
    pub iban: Option<String>,
    pub bic: Option<String>,
    /// Account holder if different from the member's own name.
    pub account_holder: Option<String>,
    /// Unique mandate reference communicated to the member's bank.
    pub sepa_mandate_reference: Option<String>,
    /// Date the mandate was signed.
    pub sepa_mandate_date: Option<NaiveDate>,
    pub sepa_mandate_status: Option<SepaMandateStatus>,
}

/// A billing plan template ("Jahresbeitrag", "Aufnahmegebühr", …).
///
/// Conceptually immutable once referenced by invoices; enforcement lives in
/// the persistence layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContributionDefinition {
    pub id: String,
    /// Display name, also used as the invoice line description.
    pub name: String,
    pub description: Option<String>,
    /// Base amount per billing period.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// None for non-recurring definitions.
    pub recurrence_interval: Option<RecurrenceInterval>,
}

/// Binds a member to a contribution definition, optionally overriding
/// amount and interval.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberContribution {
    pub id: String,
    pub member_id: String,
    pub contribution_definition_id: String,
    /// Overrides the definition's amount when set.
    pub custom_amount: Option<Decimal>,
    /// Overrides the definition's interval when set.
    pub custom_interval: Option<RecurrenceInterval>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// One line on an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total: Decimal,
    /// Percentage, 0 for untaxed association fees.
    pub tax_rate: Decimal,
}

/// The central billing record, as persisted.
///
/// Invariants: `total_amount = amount + tax_amount`; `paid_amount <=
/// total_amount`; `reminder_level` only ever increases, and only through the
/// dunning engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContributionInvoice {
    pub id: String,
    /// Unique, externally generated (DB sequence).
    pub invoice_number: String,
    pub member_id: String,
    pub member_contribution_id: Option<String>,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    /// Net amount for the billing period.
    pub amount: Decimal,
    pub currency: String,
    /// Percentage applied to `amount`.
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    /// `amount + tax_amount`.
    pub total_amount: Decimal,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: PaymentStatus,
    /// Mutated by the external payment-processing collaborator.
    pub paid_amount: Decimal,
    /// 0 = never reminded; 1..=3 mirror [`ReminderLevel`].
    pub reminder_level: u8,
    pub last_reminder_date: Option<NaiveDate>,
    pub description: Option<String>,
    #[serde(default)]
    pub line_items: Vec<InvoiceLineItem>,
}

/// A generated invoice before persistence.
///
/// Carries no `invoice_number`: global uniqueness under concurrent creation
/// is guaranteed by the storage sequence, not by this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftInvoice {
    pub member_id: String,
    pub member_contribution_id: Option<String>,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub amount: Decimal,
    pub currency: String,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub description: String,
    pub line_items: Vec<InvoiceLineItem>,
}

/// One dunning notice for one invoice at one escalation level.
///
/// Append-only: the caller persists it and bumps the invoice's
/// `reminder_level` in the same transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftReminder {
    pub invoice_id: String,
    pub member_id: String,
    pub reminder_level: ReminderLevel,
    pub reminder_date: NaiveDate,
    /// Outstanding invoice amount at generation time (total - paid).
    pub original_amount: Decimal,
    pub reminder_fee: Decimal,
    /// `original_amount + reminder_fee`.
    pub total_amount: Decimal,
    pub currency: String,
    pub payment_deadline: NaiveDate,
    pub description: String,
    pub sent_via: ReminderChannel,
}

/// A billing period. Consecutive periods tile: one period's end is the day
/// before the next one's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Result of a full contribution calculation for one billing period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionCalculation {
    pub base_amount: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    pub period: Period,
    pub interval: RecurrenceInterval,
}
