use beitrag::core::*;
use beitrag::sepa::*;
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;

fn main() {
    let config = SepaConfig {
        creditor_name: "Musterverein e.V.".into(),
        creditor_iban: "DE89 3704 0044 0532 0130 00".into(),
        creditor_bic: "COBADEFFXXX".into(),
        creditor_id: "DE98ZZZ09999999999".into(),
        message_id_prefix: "MSG".into(),
    };

    let members = vec![
        Member {
            id: "m-1".into(),
            member_number: "M-2025-0001".into(),
            first_name: "Erika".into(),
            last_name: "Musterfrau".into(),
            iban: Some("DE89370400440532013000".into()),
            bic: Some("COBADEFFXXX".into()),
            account_holder: Some("Erika Musterfrau".into()),
            sepa_mandate_reference: Some("MAND-M-2025-0001-A".into()),
            sepa_mandate_date: Some(NaiveDate::from_ymd_opt(2024, 11, 20).unwrap()),
            sepa_mandate_status: Some(SepaMandateStatus::Active),
            ..Default::default()
        },
        Member {
            id: "m-2".into(),
            member_number: "M-2025-0002".into(),
            first_name: "Max".into(),
            last_name: "Mustermann".into(),
            iban: Some("NL91ABNA0417164300".into()),
            account_holder: Some("Max Mustermann".into()),
            sepa_mandate_reference: Some("MAND-M-2025-0002-A".into()),
            sepa_mandate_date: Some(NaiveDate::from_ymd_opt(2023, 5, 2).unwrap()),
            sepa_mandate_status: Some(SepaMandateStatus::Active),
            ..Default::default()
        },
    ];

    let invoices = vec![
        ContributionInvoice {
            id: "inv-1".into(),
            invoice_number: "RE-2025-001".into(),
            member_id: "m-1".into(),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            total_amount: dec!(120),
            currency: "EUR".into(),
            description: Some("Jahresbeitrag 2025".into()),
            ..Default::default()
        },
        ContributionInvoice {
            id: "inv-2".into(),
            invoice_number: "RE-2025-002".into(),
            member_id: "m-2".into(),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            total_amount: dec!(30),
            paid_amount: dec!(10),
            currency: "EUR".into(),
            ..Default::default()
        },
    ];

    // Build and validate one transaction per member with a usable mandate
    let mut transactions = Vec::new();
    for (member, invoice) in members.iter().zip(&invoices) {
        if !is_mandate_valid(member) {
            println!("{}: mandate not usable, skipping", member.member_number);
            continue;
        }
        let tx = transaction_from_invoice(member, invoice).expect("mandate data checked above");
        let errors = validate_transaction(&tx);
        if errors.is_empty() {
            transactions.push(tx);
        } else {
            println!("{}: excluded from batch", invoice.invoice_number);
            for e in &errors {
                println!("  - {}", e);
            }
        }
    }

    let collection_date = execution_date(invoices[0].due_date, false).expect("date in range");
    let totals = batch_totals(&transactions);
    let batch = SepaBatch {
        batch_number: "BATCH-2025-001".into(),
        batch_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        execution_date: collection_date,
        total_transactions: totals.total_transactions as u32,
        total_amount: totals.total_amount,
        currency: totals.currency.clone(),
    };

    println!("=== Batch {} ===", batch.batch_number);
    println!("Collection date: {}", batch.execution_date);
    println!(
        "{} transactions, {} {} total",
        totals.total_transactions, totals.total_amount, totals.currency
    );

    let generated_at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let xml = to_pain008_xml(&config, &batch, &transactions, generated_at)
        .expect("XML generation failed");

    println!("\n=== pain.008.001.02 ===");
    println!("{}", &xml[..800.min(xml.len())]);
    println!("... ({} bytes total)", xml.len());
}
