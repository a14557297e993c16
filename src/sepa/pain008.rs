use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::mandate::sanitize_iban;
use super::transaction::{SepaBatch, SepaDirectDebitTransaction};
use super::xml_utils::{XmlResult, XmlWriter, format_amount};
use super::{SepaConfig, pain008_ns};
use crate::core::BeitragError;

/// Generate a pain.008.001.02 direct-debit initiation document for one
/// batch.
///
/// One `PmtInf` block per document: every transaction in the batch shares
/// the batch's collection date. `NbOfTxs` and `CtrlSum` are computed from
/// the transaction slice, not taken from the batch record. Transactions are
/// expected to have passed [`super::validate_transaction`] — field limits
/// are not re-checked here.
///
/// `SeqTp` is always `RCUR`; first/one-off/final collections are not
/// distinguished.
///
/// `generated_at` becomes `CreDtTm` and is injected by the caller, which
/// keeps document generation reproducible.
pub fn to_pain008_xml(
    config: &SepaConfig,
    batch: &SepaBatch,
    transactions: &[SepaDirectDebitTransaction],
    generated_at: DateTime<Utc>,
) -> XmlResult {
    let message_id = format!("{}-{}", config.message_id_prefix, batch.batch_number);
    let creation_time = generated_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();
    let nb_of_txs = transactions.len().to_string();
    let control_sum = format_amount(transactions.iter().map(|tx| tx.amount).sum::<Decimal>());

    let mut w = XmlWriter::new()?;
    w.start_element_with_attrs(
        "Document",
        &[
            ("xmlns", pain008_ns::DOCUMENT),
            ("xmlns:xsi", pain008_ns::XSI),
        ],
    )?;
    w.start_element("CstmrDrctDbtInitn")?;

    w.start_element("GrpHdr")?;
    w.text_element("MsgId", &message_id)?;
    w.text_element("CreDtTm", &creation_time)?;
    w.text_element("NbOfTxs", &nb_of_txs)?;
    w.text_element("CtrlSum", &control_sum)?;
    w.start_element("InitgPty")?;
    w.text_element("Nm", &config.creditor_name)?;
    w.end_element("InitgPty")?;
    w.end_element("GrpHdr")?;

    w.start_element("PmtInf")?;
    w.text_element("PmtInfId", &batch.batch_number)?;
    w.text_element("PmtMtd", "DD")?;
    w.text_element("BtchBookg", "true")?;
    w.text_element("NbOfTxs", &nb_of_txs)?;
    w.text_element("CtrlSum", &control_sum)?;

    w.start_element("PmtTpInf")?;
    w.start_element("SvcLvl")?;
    w.text_element("Cd", "SEPA")?;
    w.end_element("SvcLvl")?;
    w.start_element("LclInstrm")?;
    w.text_element("Cd", "CORE")?;
    w.end_element("LclInstrm")?;
    w.text_element("SeqTp", "RCUR")?;
    w.end_element("PmtTpInf")?;

    w.text_element(
        "ReqdColltnDt",
        &batch.execution_date.format("%Y-%m-%d").to_string(),
    )?;

    w.start_element("Cdtr")?;
    w.text_element("Nm", &config.creditor_name)?;
    w.end_element("Cdtr")?;

    w.start_element("CdtrAcct")?;
    w.start_element("Id")?;
    w.text_element("IBAN", &sanitize_iban(&config.creditor_iban))?;
    w.end_element("Id")?;
    w.end_element("CdtrAcct")?;

    w.start_element("CdtrAgt")?;
    w.start_element("FinInstnId")?;
    w.text_element("BIC", &config.creditor_bic)?;
    w.end_element("FinInstnId")?;
    w.end_element("CdtrAgt")?;

    w.start_element("CdtrSchmeId")?;
    w.start_element("Id")?;
    w.start_element("PrvtId")?;
    w.start_element("Othr")?;
    w.text_element("Id", &config.creditor_id)?;
    w.start_element("SchmeNm")?;
    w.text_element("Prtry", "SEPA")?;
    w.end_element("SchmeNm")?;
    w.end_element("Othr")?;
    w.end_element("PrvtId")?;
    w.end_element("Id")?;
    w.end_element("CdtrSchmeId")?;

    for tx in transactions {
        write_transaction(&mut w, tx)?;
    }

    w.end_element("PmtInf")?;
    w.end_element("CstmrDrctDbtInitn")?;
    w.end_element("Document")?;

    w.into_string()
}

fn write_transaction(
    w: &mut XmlWriter,
    tx: &SepaDirectDebitTransaction,
) -> Result<(), BeitragError> {
    w.start_element("DrctDbtTxInf")?;

    w.start_element("PmtId")?;
    w.text_element("EndToEndId", &tx.end_to_end_id)?;
    w.end_element("PmtId")?;

    w.amount_element("InstdAmt", tx.amount, &tx.currency)?;

    w.start_element("DrctDbtTx")?;
    w.start_element("MndtRltdInf")?;
    w.text_element("MndtId", &tx.mandate_reference)?;
    w.text_element("DtOfSgntr", &tx.mandate_date.format("%Y-%m-%d").to_string())?;
    w.end_element("MndtRltdInf")?;
    w.end_element("DrctDbtTx")?;

    w.start_element("DbtrAgt")?;
    w.start_element("FinInstnId")?;
    match tx.debtor_bic.as_deref().filter(|b| !b.is_empty()) {
        Some(bic) => {
            w.text_element("BIC", bic)?;
        }
        // The schema requires this sentinel when the debtor BIC is unknown.
        None => {
            w.start_element("Othr")?;
            w.text_element("Id", "NOTPROVIDED")?;
            w.end_element("Othr")?;
        }
    }
    w.end_element("FinInstnId")?;
    w.end_element("DbtrAgt")?;

    w.start_element("Dbtr")?;
    w.text_element("Nm", &tx.debtor_name)?;
    w.end_element("Dbtr")?;

    w.start_element("DbtrAcct")?;
    w.start_element("Id")?;
    w.text_element("IBAN", &sanitize_iban(&tx.debtor_iban))?;
    w.end_element("Id")?;
    w.end_element("DbtrAcct")?;

    w.start_element("RmtInf")?;
    w.text_element("Ustrd", &tx.remittance_info)?;
    w.end_element("RmtInf")?;

    w.end_element("DrctDbtTxInf")?;
    Ok(())
}
