//! Payment matching and overdue recomputation

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::reconciliation::stats::ReceivableStatistics;
use crate::traits::ReceivablesStorage;
use crate::types::*;

use bigdecimal::BigDecimal;

/// Result of matching a payment to a receivable.
///
/// Carries the updated pair so callers can refresh just these two records
/// instead of re-fetching whole collections.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// The receivable after the payment was applied
    pub receivable: AccountsReceivable,
    /// The payment record after linking
    pub payment: PaymentRecord,
    /// Excess over the outstanding balance, if the payment overshot.
    /// The receivable keeps the negative remaining amount; nothing is
    /// clamped.
    pub overpayment: Option<BigDecimal>,
}

/// Reconciliation engine coordinating receivables and payment records
/// over a storage backend.
///
/// The engine is the exclusive writer of `paid_amount`, `remaining_amount`,
/// the match linkage, and the receivable status.
pub struct ReconciliationEngine<S: ReceivablesStorage> {
    storage: S,
}

impl<S: ReceivablesStorage> ReconciliationEngine<S> {
    /// Create a new engine over the given storage backend
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Match an unmatched payment to a receivable.
    ///
    /// Links the payment, adds its amount to the receivable's paid total,
    /// recomputes the remaining balance, and derives the new status. Both
    /// records are persisted as one atomic unit through
    /// [`ReceivablesStorage::commit_match`]; on any failure neither record
    /// is written.
    ///
    /// # Errors
    ///
    /// - [`ReceivablesError::PaymentNotFound`] / [`ReceivablesError::ReceivableNotFound`]
    ///   if either id does not exist
    /// - [`ReceivablesError::AlreadyMatched`] if the payment is already linked;
    ///   there is no re-matching
    /// - [`ReceivablesError::Conflict`] if the receivable changed underneath
    ///   this call (stale version)
    pub async fn match_payment(
        &mut self,
        payment_id: &str,
        receivable_id: &str,
    ) -> ReceivablesResult<MatchOutcome> {
        let mut payment = self
            .storage
            .get_payment(payment_id)
            .await?
            .ok_or_else(|| ReceivablesError::PaymentNotFound(payment_id.to_string()))?;

        if payment.receivable_id.is_some() || payment.status == PaymentStatus::Matched {
            return Err(ReceivablesError::AlreadyMatched(payment.id));
        }
        if payment.status == PaymentStatus::Manual {
            return Err(ReceivablesError::Validation(format!(
                "Payment {} is set aside for manual handling",
                payment.id
            )));
        }

        let mut receivable = self
            .storage
            .get_receivable(receivable_id)
            .await?
            .ok_or_else(|| ReceivablesError::ReceivableNotFound(receivable_id.to_string()))?;

        payment.receivable_id = Some(receivable.id.clone());
        payment.status = PaymentStatus::Matched;

        let overpayment = receivable.apply_payment(&payment.amount);
        if let Some(excess) = &overpayment {
            warn!(
                receivable_id = %receivable.id,
                payment_id = %payment.id,
                excess = %excess,
                "payment exceeds outstanding balance"
            );
        }

        self.storage.commit_match(&receivable, &payment).await?;

        debug!(
            receivable_id = %receivable.id,
            payment_id = %payment.id,
            remaining = %receivable.remaining_amount,
            status = ?receivable.status,
            "payment matched"
        );

        Ok(MatchOutcome {
            receivable,
            payment,
            overpayment,
        })
    }

    /// Recompute overdue status for every receivable as of the given date.
    ///
    /// Every receivable that is not paid and whose due date has passed
    /// becomes overdue with `overdue_days` set to the whole days elapsed.
    /// Paid receivables are never reclassified. The sweep is a full scan
    /// with no ordering dependency between receivables, and running it
    /// twice with the same date leaves every receivable unchanged the
    /// second time.
    ///
    /// Returns only the receivables it actually changed.
    pub async fn recompute_overdue_status(
        &mut self,
        as_of: NaiveDate,
    ) -> ReceivablesResult<Vec<AccountsReceivable>> {
        let receivables = self.storage.list_receivables().await?;
        let mut changed = Vec::new();

        for mut receivable in receivables {
            if !receivable.mark_overdue(as_of) {
                continue;
            }
            match self.storage.save_receivable_versioned(&receivable).await {
                Ok(()) => changed.push(receivable),
                Err(ReceivablesError::Conflict(_)) => {
                    // The receivable moved underneath the sweep (e.g. a
                    // payment was matched after the listing); reapply
                    // against the fresh state. A settled receivable drops
                    // out here because mark_overdue skips paid.
                    let fresh = self.storage.get_receivable(&receivable.id).await?;
                    if let Some(mut fresh) = fresh {
                        if fresh.mark_overdue(as_of) {
                            self.storage.save_receivable_versioned(&fresh).await?;
                            changed.push(fresh);
                        }
                    }
                }
                Err(e) => return Err(e),
            }
        }

        if !changed.is_empty() {
            debug!(count = changed.len(), %as_of, "receivables marked overdue");
        }
        Ok(changed)
    }

    /// Derive aggregate statistics from the current receivable and payment
    /// collections. Pure with respect to storage: nothing is mutated.
    pub async fn statistics(&self) -> ReceivablesResult<ReceivableStatistics> {
        let receivables = self.storage.list_receivables().await?;
        let payments = self.storage.list_payments().await?;
        Ok(ReceivableStatistics::compute(&receivables, &payments))
    }
}
