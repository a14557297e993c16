use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::dunning::is_invoice_overdue;
use super::types::{ContributionInvoice, PaymentStatus};

/// Aggregate revenue figures over a set of contribution invoices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionStatistics {
    /// Sum of all invoice totals, regardless of payment state.
    pub total_revenue: Decimal,
    /// Totals of fully paid invoices.
    pub paid_revenue: Decimal,
    /// Outstanding amounts on invoices that are not yet due.
    pub pending_revenue: Decimal,
    /// Outstanding amounts on overdue invoices.
    pub overdue_revenue: Decimal,
    pub invoice_count: usize,
    pub paid_count: usize,
    pub overdue_count: usize,
}

/// Fold a set of invoices into revenue statistics as of `today`.
pub fn contribution_statistics(
    invoices: &[ContributionInvoice],
    today: NaiveDate,
) -> ContributionStatistics {
    let mut stats = ContributionStatistics::default();

    for invoice in invoices {
        stats.total_revenue += invoice.total_amount;
        stats.invoice_count += 1;

        let outstanding = invoice.total_amount - invoice.paid_amount;
        if invoice.payment_status == PaymentStatus::Paid {
            stats.paid_revenue += invoice.total_amount;
            stats.paid_count += 1;
        } else if is_invoice_overdue(invoice, today) {
            stats.overdue_revenue += outstanding;
            stats.overdue_count += 1;
        } else {
            stats.pending_revenue += outstanding;
        }
    }

    stats
}
