use beitrag::core::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn member() -> Member {
    Member {
        id: "m-1".into(),
        member_number: "M-2025-0001".into(),
        first_name: "Max".into(),
        last_name: "Mustermann".into(),
        email: Some("max@example.org".into()),
        country: "DE".into(),
        ..Default::default()
    }
}

fn annual_definition() -> ContributionDefinition {
    ContributionDefinition {
        id: "def-1".into(),
        name: "Jahresbeitrag".into(),
        amount: dec!(120),
        currency: "EUR".into(),
        recurrence_interval: Some(RecurrenceInterval::Annual),
        ..Default::default()
    }
}

fn contribution() -> MemberContribution {
    MemberContribution {
        id: "mc-1".into(),
        member_id: "m-1".into(),
        contribution_definition_id: "def-1".into(),
        start_date: date(2025, 1, 1),
        ..Default::default()
    }
}

// --- Invoice generation ---

#[test]
fn annual_invoice_from_definition() {
    let draft =
        generate_invoice(&member(), &contribution(), &annual_definition(), date(2025, 1, 1))
            .unwrap();

    assert_eq!(draft.period_start, date(2025, 1, 1));
    assert_eq!(draft.period_end, date(2025, 12, 31));
    assert_eq!(draft.due_date, date(2025, 1, 15));
    assert_eq!(draft.amount, dec!(120));
    assert_eq!(draft.tax_amount, Decimal::ZERO);
    assert_eq!(draft.total_amount, dec!(120));
    assert_eq!(draft.currency, "EUR");
    assert_eq!(draft.payment_method, PaymentMethod::BankTransfer);
    assert_eq!(draft.member_id, "m-1");
    assert_eq!(
        draft.description,
        "Jahresbeitrag für Zeitraum 01.01.2025 - 31.12.2025"
    );

    assert_eq!(draft.line_items.len(), 1);
    let line = &draft.line_items[0];
    assert_eq!(line.description, "Jahresbeitrag");
    assert_eq!(line.quantity, Decimal::ONE);
    assert_eq!(line.unit_price, dec!(120));
    assert_eq!(line.total, dec!(120));
    assert_eq!(line.tax_rate, Decimal::ZERO);
}

#[test]
fn custom_overrides_take_precedence() {
    let contribution = MemberContribution {
        custom_amount: Some(dec!(7.50)),
        custom_interval: Some(RecurrenceInterval::Monthly),
        ..contribution()
    };

    let draft =
        generate_invoice(&member(), &contribution, &annual_definition(), date(2025, 3, 1))
            .unwrap();

    assert_eq!(draft.amount, dec!(7.50));
    assert_eq!(draft.period_start, date(2025, 3, 1));
    assert_eq!(draft.period_end, date(2025, 3, 31));
}

#[test]
fn interval_falls_back_to_annual() {
    let definition = ContributionDefinition {
        recurrence_interval: None,
        ..annual_definition()
    };

    let draft =
        generate_invoice(&member(), &contribution(), &definition, date(2025, 1, 1)).unwrap();
    assert_eq!(draft.period_end, date(2025, 12, 31));
}

#[test]
fn active_mandate_selects_direct_debit() {
    let member = Member {
        sepa_mandate_status: Some(SepaMandateStatus::Active),
        ..member()
    };

    let draft =
        generate_invoice(&member, &contribution(), &annual_definition(), date(2025, 1, 1))
            .unwrap();
    assert_eq!(draft.payment_method, PaymentMethod::SepaDebit);
}

#[test]
fn pending_mandate_falls_back_to_bank_transfer() {
    let member = Member {
        sepa_mandate_status: Some(SepaMandateStatus::Pending),
        ..member()
    };

    let draft =
        generate_invoice(&member, &contribution(), &annual_definition(), date(2025, 1, 1))
            .unwrap();
    assert_eq!(draft.payment_method, PaymentMethod::BankTransfer);
}

#[test]
fn quarterly_periods_tile_a_year() {
    let mut start = date(2025, 1, 1);
    let mut ends = Vec::new();
    for _ in 0..4 {
        let period = invoice_period(start, RecurrenceInterval::Quarterly).unwrap();
        ends.push(period.end);
        start = next_due_date(start, RecurrenceInterval::Quarterly).unwrap();
    }

    assert_eq!(
        ends,
        vec![
            date(2025, 3, 31),
            date(2025, 6, 30),
            date(2025, 9, 30),
            date(2025, 12, 31),
        ]
    );
    assert_eq!(start, date(2026, 1, 1));
}

// --- Interval parsing ---

#[test]
fn interval_codes_round_trip() {
    for interval in [
        RecurrenceInterval::Monthly,
        RecurrenceInterval::Quarterly,
        RecurrenceInterval::SemiAnnual,
        RecurrenceInterval::Annual,
        RecurrenceInterval::OneTime,
    ] {
        assert_eq!(
            RecurrenceInterval::from_code(interval.code()),
            Some(interval)
        );
    }
}

#[test]
fn unknown_interval_code_is_rejected() {
    assert_eq!(RecurrenceInterval::from_code("weekly"), None);
    assert_eq!(RecurrenceInterval::from_code(""), None);

    let err = "weekly".parse::<RecurrenceInterval>().unwrap_err();
    assert!(matches!(err, BeitragError::InvalidInterval(_)));
    assert_eq!(
        "quarterly".parse::<RecurrenceInterval>().unwrap(),
        RecurrenceInterval::Quarterly
    );
}

// --- Statistics ---

fn invoice(
    total: Decimal,
    paid: Decimal,
    status: PaymentStatus,
    due: NaiveDate,
) -> ContributionInvoice {
    ContributionInvoice {
        total_amount: total,
        paid_amount: paid,
        payment_status: status,
        due_date: due,
        currency: "EUR".into(),
        ..Default::default()
    }
}

#[test]
fn statistics_split_revenue_by_state() {
    let today = date(2025, 2, 1);
    let invoices = vec![
        invoice(dec!(120), dec!(120), PaymentStatus::Paid, date(2025, 1, 1)),
        invoice(dec!(60), dec!(20), PaymentStatus::Partial, date(2025, 1, 1)),
        invoice(dec!(30), Decimal::ZERO, PaymentStatus::Pending, date(2025, 3, 1)),
    ];

    let stats = contribution_statistics(&invoices, today);

    assert_eq!(stats.invoice_count, 3);
    assert_eq!(stats.total_revenue, dec!(210));
    assert_eq!(stats.paid_count, 1);
    assert_eq!(stats.paid_revenue, dec!(120));
    assert_eq!(stats.overdue_count, 1);
    assert_eq!(stats.overdue_revenue, dec!(40));
    assert_eq!(stats.pending_revenue, dec!(30));
}
