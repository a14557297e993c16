use beitrag::core::*;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn main() {
    let member = Member {
        id: "m-1".into(),
        member_number: "M-2025-0042".into(),
        first_name: "Max".into(),
        last_name: "Mustermann".into(),
        email: Some("max@example.org".into()),
        country: "DE".into(),
        sepa_mandate_status: Some(SepaMandateStatus::Active),
        ..Default::default()
    };

    let definition = ContributionDefinition {
        id: "def-1".into(),
        name: "Jahresbeitrag".into(),
        amount: dec!(120),
        currency: "EUR".into(),
        recurrence_interval: Some(RecurrenceInterval::Annual),
        ..Default::default()
    };

    let contribution = MemberContribution {
        id: "mc-1".into(),
        member_id: "m-1".into(),
        contribution_definition_id: "def-1".into(),
        start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        ..Default::default()
    };

    let invoice_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let draft = generate_invoice(&member, &contribution, &definition, invoice_date)
        .expect("invoice generation failed");

    println!("=== Jahresbeitrag ===");
    println!("Member:   {} {}", member.first_name, member.last_name);
    println!("Period:   {} - {}", draft.period_start, draft.period_end);
    println!("Due:      {}", draft.due_date);
    println!("Payment:  {:?}", draft.payment_method);
    println!("Total:    {} {}", draft.total_amount, draft.currency);
    for line in &draft.line_items {
        println!(
            "  {} x {} @ {} = {}",
            line.quantity, line.description, line.unit_price, line.total
        );
    }

    // Reduced student rate, billed quarterly
    let student = MemberContribution {
        custom_amount: Some(dec!(15)),
        custom_interval: Some(RecurrenceInterval::Quarterly),
        ..contribution
    };
    let draft = generate_invoice(&member, &student, &definition, invoice_date)
        .expect("invoice generation failed");

    println!("\n=== Ermäßigter Beitrag (quartalsweise) ===");
    println!("Period:   {} - {}", draft.period_start, draft.period_end);
    println!("Total:    {} {}", draft.total_amount, draft.currency);
    println!("Text:     {}", draft.description);
}
