//! SEPA direct debit: mandate/IBAN validation, transaction building, and
//! pain.008.001.02 batch XML generation.
//!
//! The generator produces one complete `CstmrDrctDbtInitn` document per
//! batch; writing the file and submitting it to the bank is the caller's
//! responsibility.
//!
//! # Example
//!
//! ```no_run
//! use beitrag::sepa;
//!
//! let config: sepa::SepaConfig = todo!();
//! let batch: sepa::SepaBatch = todo!();
//! let transactions: Vec<sepa::SepaDirectDebitTransaction> = todo!();
//! let xml = sepa::to_pain008_xml(&config, &batch, &transactions, chrono::Utc::now()).unwrap();
//! ```

mod mandate;
mod pain008;
mod transaction;
pub(crate) mod xml_utils;

pub use mandate::*;
pub use pain008::to_pain008_xml;
pub use transaction::*;

use serde::{Deserialize, Serialize};

/// pain.008.001.02 namespace URIs.
pub mod pain008_ns {
    pub const DOCUMENT: &str = "urn:iso:std:iso:20022:tech:xsd:pain.008.001.02";
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
}

/// Creditor-side configuration for direct-debit batches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SepaConfig {
    /// Creditor (association) name, used as initiating party.
    pub creditor_name: String,
    pub creditor_iban: String,
    pub creditor_bic: String,
    /// SEPA creditor identifier (Gläubiger-ID, e.g. "DE98ZZZ09999999999").
    pub creditor_id: String,
    /// Prefix for generated message ids: `{prefix}-{batch_number}`.
    pub message_id_prefix: String,
}
