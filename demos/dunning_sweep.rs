use beitrag::core::*;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn open_invoice(number: &str, due: NaiveDate, reminder_level: u8) -> ContributionInvoice {
    ContributionInvoice {
        id: format!("inv-{number}"),
        invoice_number: number.into(),
        member_id: "m-1".into(),
        due_date: due,
        total_amount: dec!(120),
        currency: "EUR".into(),
        payment_status: PaymentStatus::Pending,
        reminder_level,
        ..Default::default()
    }
}

fn main() {
    let today = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
    let member = Member {
        id: "m-1".into(),
        member_number: "M-2025-0042".into(),
        first_name: "Max".into(),
        last_name: "Mustermann".into(),
        email: Some("max@example.org".into()),
        ..Default::default()
    };

    let invoices = vec![
        open_invoice("RE-2025-001", NaiveDate::from_ymd_opt(2025, 2, 8).unwrap(), 0),
        open_invoice("RE-2025-002", NaiveDate::from_ymd_opt(2025, 1, 28).unwrap(), 0),
        open_invoice("RE-2025-003", NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(), 1),
        open_invoice("RE-2025-004", NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(), 3),
    ];

    println!("=== Mahnlauf {} ===", today);
    for invoice in &invoices {
        let days = days_overdue(invoice, today);
        let decision = should_send_reminder(invoice, today);
        println!(
            "\n{}: {} Tage überfällig, Mahnstufe {}",
            invoice.invoice_number, days, invoice.reminder_level
        );

        let Some(level) = decision.level.filter(|_| decision.send) else {
            println!("  keine Mahnung fällig");
            continue;
        };

        let reminder = generate_reminder(invoice, &member, level, today)
            .expect("reminder generation failed");
        println!("  -> {}", reminder.description);
        println!(
            "     offen {} + Gebühr {} = {} {}, zahlbar bis {}, per {:?}",
            reminder.original_amount,
            reminder.reminder_fee,
            reminder.total_amount,
            reminder.currency,
            reminder.payment_deadline,
            reminder.sent_via
        );
        // The caller now persists the reminder and bumps the invoice's
        // reminder_level in the same transaction.
    }
}
