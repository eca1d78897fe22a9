//! Aggregate statistics over receivables and payment records

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Snapshot of receivable and payment health, derived from the current
/// collections without mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivableStatistics {
    /// Sum of remaining amounts over all receivables
    pub total_outstanding: BigDecimal,
    /// Number of overdue receivables
    pub overdue_count: usize,
    /// Sum of remaining amounts over overdue receivables
    pub total_overdue_amount: BigDecimal,
    /// Number of unmatched payment records
    pub unmatched_payment_count: usize,
    /// Sum of unmatched payment amounts
    pub total_unmatched_amount: BigDecimal,
    /// Number of receivables that are unpaid or partially paid
    pub unpaid_or_partial_count: usize,
}

impl ReceivableStatistics {
    /// Compute statistics from entity snapshots. Pure function of its
    /// inputs; safe to call any number of times.
    pub fn compute(receivables: &[AccountsReceivable], payments: &[PaymentRecord]) -> Self {
        let total_outstanding = receivables
            .iter()
            .map(|r| &r.remaining_amount)
            .sum::<BigDecimal>();

        let overdue: Vec<_> = receivables
            .iter()
            .filter(|r| r.status == ReceivableStatus::Overdue)
            .collect();
        let total_overdue_amount = overdue
            .iter()
            .map(|r| &r.remaining_amount)
            .sum::<BigDecimal>();

        let unmatched: Vec<_> = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Unmatched)
            .collect();
        let total_unmatched_amount = unmatched.iter().map(|p| &p.amount).sum::<BigDecimal>();

        let unpaid_or_partial_count = receivables
            .iter()
            .filter(|r| {
                matches!(
                    r.status,
                    ReceivableStatus::Unpaid | ReceivableStatus::PartiallyPaid
                )
            })
            .count();

        Self {
            total_outstanding,
            overdue_count: overdue.len(),
            total_overdue_amount,
            unmatched_payment_count: unmatched.len(),
            total_unmatched_amount,
            unpaid_or_partial_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn receivable(id: &str, amount: i64, paid: i64, status: ReceivableStatus) -> AccountsReceivable {
        AccountsReceivable {
            id: id.to_string(),
            invoice_id: format!("inv-{id}"),
            invoice_number: format!("INV-{id}"),
            company_id: "c1".to_string(),
            amount: BigDecimal::from(amount),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            paid_amount: BigDecimal::from(paid),
            remaining_amount: BigDecimal::from(amount - paid),
            status,
            overdue_days: 0,
            version: 0,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    fn payment(id: &str, amount: i64, status: PaymentStatus) -> PaymentRecord {
        PaymentRecord {
            id: id.to_string(),
            receivable_id: if status == PaymentStatus::Matched {
                Some("ar1".to_string())
            } else {
                None
            },
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            amount: BigDecimal::from(amount),
            account_name: "ACME CORP".to_string(),
            memo: String::new(),
            status,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn statistics_over_known_fixture() {
        let receivables = vec![
            receivable("a", 50000, 0, ReceivableStatus::Unpaid),
            receivable("b", 40000, 15000, ReceivableStatus::PartiallyPaid),
            receivable("c", 30000, 0, ReceivableStatus::Overdue),
            receivable("d", 20000, 20000, ReceivableStatus::Paid),
        ];
        let payments = vec![
            payment("p1", 35000, PaymentStatus::Unmatched),
            payment("p2", 15000, PaymentStatus::Unmatched),
            payment("p3", 20000, PaymentStatus::Matched),
            payment("p4", 9999, PaymentStatus::Manual),
        ];

        let stats = ReceivableStatistics::compute(&receivables, &payments);
        assert_eq!(stats.total_outstanding, BigDecimal::from(105000));
        assert_eq!(stats.overdue_count, 1);
        assert_eq!(stats.total_overdue_amount, BigDecimal::from(30000));
        assert_eq!(stats.unmatched_payment_count, 2);
        assert_eq!(stats.total_unmatched_amount, BigDecimal::from(50000));
        assert_eq!(stats.unpaid_or_partial_count, 2);
    }

    #[test]
    fn statistics_over_empty_collections_are_zero() {
        let stats = ReceivableStatistics::compute(&[], &[]);
        assert_eq!(stats.total_outstanding, BigDecimal::from(0));
        assert_eq!(stats.overdue_count, 0);
        assert_eq!(stats.unmatched_payment_count, 0);
        assert_eq!(stats.unpaid_or_partial_count, 0);
    }
}
