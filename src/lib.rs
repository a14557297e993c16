//! # beitrag
//!
//! Contribution billing library for German associations (Vereine):
//! recurring billing periods, invoice drafting, dunning escalation, and
//! SEPA direct-debit batches in pain.008.001.02 XML.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! Every function is pure: "today" and generation timestamps are passed in
//! explicitly, and nothing here touches a database, the network, or the
//! filesystem. Persistence (and the assignment of invoice/reminder/batch
//! numbers) is the caller's job.
//!
//! ## Quick Start
//!
//! ```rust
//! use beitrag::core::*;
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let definition = ContributionDefinition {
//!     name: "Jahresbeitrag".into(),
//!     amount: dec!(120),
//!     currency: "EUR".into(),
//!     recurrence_interval: Some(RecurrenceInterval::Annual),
//!     ..Default::default()
//! };
//! let contribution = MemberContribution {
//!     start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
//!     ..Default::default()
//! };
//! let member = Member {
//!     first_name: "Max".into(),
//!     last_name: "Mustermann".into(),
//!     ..Default::default()
//! };
//!
//! let invoice_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let draft = generate_invoice(&member, &contribution, &definition, invoice_date).unwrap();
//!
//! assert_eq!(draft.total_amount, dec!(120));
//! assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
//! assert_eq!(draft.period_end, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Billing types, period/contribution calculation, invoice drafting, dunning |
//! | `sepa` | IBAN/mandate validation, direct-debit transactions, pain.008.001.02 XML |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "sepa")]
pub mod sepa;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
