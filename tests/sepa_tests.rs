#![cfg(feature = "sepa")]

use beitrag::core::*;
use beitrag::sepa::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn debtor() -> Member {
    Member {
        id: "m-1".into(),
        member_number: "M-2025-0001".into(),
        first_name: "Erika".into(),
        last_name: "Musterfrau".into(),
        iban: Some("DE89370400440532013000".into()),
        bic: Some("COBADEFFXXX".into()),
        account_holder: Some("Erika Musterfrau".into()),
        sepa_mandate_reference: Some("MAND-M-2025-0001-ABC".into()),
        sepa_mandate_date: Some(date(2024, 11, 20)),
        sepa_mandate_status: Some(SepaMandateStatus::Active),
        ..Default::default()
    }
}

fn open_invoice() -> ContributionInvoice {
    ContributionInvoice {
        id: "inv-1".into(),
        invoice_number: "RE-2025-001".into(),
        member_id: "m-1".into(),
        due_date: date(2025, 2, 1),
        total_amount: dec!(120),
        paid_amount: dec!(20),
        currency: "EUR".into(),
        payment_status: PaymentStatus::Partial,
        ..Default::default()
    }
}

fn valid_tx() -> SepaDirectDebitTransaction {
    SepaDirectDebitTransaction {
        mandate_reference: "MAND-M-2025-0001-ABC".into(),
        mandate_date: date(2024, 11, 20),
        debtor_name: "Erika Musterfrau".into(),
        debtor_iban: "DE89370400440532013000".into(),
        debtor_bic: Some("COBADEFFXXX".into()),
        amount: dec!(100),
        currency: "EUR".into(),
        end_to_end_id: "RE-2025-001".into(),
        remittance_info: "Rechnung RE-2025-001".into(),
    }
}

// --- Mandate gating ---

#[test]
fn complete_active_mandate_is_valid() {
    assert!(is_mandate_valid(&debtor()));
}

#[test]
fn inactive_or_incomplete_mandates_are_invalid() {
    let pending = Member {
        sepa_mandate_status: Some(SepaMandateStatus::Pending),
        ..debtor()
    };
    assert!(!is_mandate_valid(&pending));

    let revoked = Member {
        sepa_mandate_status: Some(SepaMandateStatus::Revoked),
        ..debtor()
    };
    assert!(!is_mandate_valid(&revoked));

    let no_holder = Member {
        account_holder: None,
        ..debtor()
    };
    assert!(!is_mandate_valid(&no_holder));

    let bad_iban = Member {
        iban: Some("DE00370400440532013000".into()),
        ..debtor()
    };
    assert!(!is_mandate_valid(&bad_iban));
}

// --- Transaction building ---

#[test]
fn transaction_carries_outstanding_amount() {
    let tx = transaction_from_invoice(&debtor(), &open_invoice()).unwrap();

    assert_eq!(tx.amount, dec!(100));
    assert_eq!(tx.currency, "EUR");
    assert_eq!(tx.end_to_end_id, "RE-2025-001");
    assert_eq!(tx.mandate_reference, "MAND-M-2025-0001-ABC");
    assert_eq!(tx.mandate_date, date(2024, 11, 20));
    assert_eq!(tx.debtor_name, "Erika Musterfrau");
    assert_eq!(tx.debtor_iban, "DE89370400440532013000");
    assert_eq!(tx.remittance_info, "Rechnung RE-2025-001");
}

#[test]
fn invoice_description_becomes_remittance_info() {
    let invoice = ContributionInvoice {
        description: Some("Jahresbeitrag 2025".into()),
        ..open_invoice()
    };
    let tx = transaction_from_invoice(&debtor(), &invoice).unwrap();
    assert_eq!(tx.remittance_info, "Jahresbeitrag 2025");
}

#[test]
fn debtor_name_falls_back_to_member_name() {
    let member = Member {
        account_holder: None,
        ..debtor()
    };
    let tx = transaction_from_invoice(&member, &open_invoice()).unwrap();
    assert_eq!(tx.debtor_name, "Erika Musterfrau");
}

#[test]
fn missing_mandate_data_is_rejected() {
    for member in [
        Member {
            iban: None,
            ..debtor()
        },
        Member {
            sepa_mandate_reference: None,
            ..debtor()
        },
        Member {
            sepa_mandate_date: None,
            ..debtor()
        },
    ] {
        let err = transaction_from_invoice(&member, &open_invoice()).unwrap_err();
        assert!(matches!(err, BeitragError::MissingMandate(_)));
    }
}

// --- Transaction validation ---

#[test]
fn valid_transaction_has_no_errors() {
    assert!(validate_transaction(&valid_tx()).is_empty());
}

#[test]
fn bic_is_optional_but_checked_when_present() {
    let without_bic = SepaDirectDebitTransaction {
        debtor_bic: None,
        ..valid_tx()
    };
    assert!(validate_transaction(&without_bic).is_empty());

    let bad_bic = SepaDirectDebitTransaction {
        debtor_bic: Some("COBADE".into()),
        ..valid_tx()
    };
    let errors = validate_transaction(&bad_bic);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "debtor_bic");
}

#[test]
fn field_violations_are_all_collected() {
    let tx = SepaDirectDebitTransaction {
        debtor_iban: "NOT-AN-IBAN".into(),
        debtor_name: "x".repeat(71),
        amount: Decimal::ZERO,
        mandate_reference: "x".repeat(36),
        end_to_end_id: String::new(),
        remittance_info: "x".repeat(141),
        ..valid_tx()
    };

    let errors = validate_transaction(&tx);
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();

    assert_eq!(errors.len(), 6);
    for field in [
        "debtor_iban",
        "debtor_name",
        "amount",
        "mandate_reference",
        "end_to_end_id",
        "remittance_info",
    ] {
        assert!(fields.contains(&field), "missing error for {field}");
    }
}

#[test]
fn amount_bounds_are_enforced() {
    let too_big = SepaDirectDebitTransaction {
        amount: dec!(1000000.00),
        ..valid_tx()
    };
    let errors = validate_transaction(&too_big);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "amount");

    let at_limit = SepaDirectDebitTransaction {
        amount: dec!(999999.99),
        ..valid_tx()
    };
    assert!(validate_transaction(&at_limit).is_empty());

    let negative = SepaDirectDebitTransaction {
        amount: dec!(-1),
        ..valid_tx()
    };
    assert_eq!(validate_transaction(&negative).len(), 1);
}

#[test]
fn boundary_lengths_are_accepted() {
    let tx = SepaDirectDebitTransaction {
        mandate_reference: "x".repeat(35),
        debtor_name: "x".repeat(70),
        end_to_end_id: "x".repeat(35),
        remittance_info: "x".repeat(140),
        ..valid_tx()
    };
    assert!(validate_transaction(&tx).is_empty());
}

// --- Execution date ---

#[test]
fn first_debit_needs_five_business_days() {
    // Wed 2025-01-15 minus 5 days is Fri 2025-01-10, already a weekday.
    assert_eq!(
        execution_date(date(2025, 1, 15), true).unwrap(),
        date(2025, 1, 10)
    );
}

#[test]
fn recurring_debit_needs_two_days() {
    assert_eq!(
        execution_date(date(2025, 1, 15), false).unwrap(),
        date(2025, 1, 13)
    );
}

#[test]
fn weekends_are_walked_backwards() {
    // Mon 2025-01-06 minus 2 days is Sat 2025-01-04 → Fri 2025-01-03.
    assert_eq!(
        execution_date(date(2025, 1, 6), false).unwrap(),
        date(2025, 1, 3)
    );
    // Tue 2025-01-07 minus 2 days is Sun 2025-01-05 → Fri 2025-01-03.
    assert_eq!(
        execution_date(date(2025, 1, 7), false).unwrap(),
        date(2025, 1, 3)
    );
}

// --- Batch totals ---

#[test]
fn batch_totals_aggregate_amounts() {
    let txs = vec![
        SepaDirectDebitTransaction {
            amount: dec!(10),
            ..valid_tx()
        },
        SepaDirectDebitTransaction {
            amount: dec!(20),
            ..valid_tx()
        },
        SepaDirectDebitTransaction {
            amount: dec!(30),
            ..valid_tx()
        },
    ];

    let totals = batch_totals(&txs);
    assert_eq!(totals.total_transactions, 3);
    assert_eq!(totals.total_amount, dec!(60));
    assert_eq!(totals.average_amount, dec!(20));
    assert_eq!(totals.min_amount, dec!(10));
    assert_eq!(totals.max_amount, dec!(30));
    assert_eq!(totals.currency, "EUR");
}

#[test]
fn empty_batch_totals_are_zero() {
    let totals = batch_totals(&[]);
    assert_eq!(totals.total_transactions, 0);
    assert_eq!(totals.total_amount, Decimal::ZERO);
    assert_eq!(totals.currency, "EUR");
}
