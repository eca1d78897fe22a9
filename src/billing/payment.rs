//! Intake of bank payment records

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::traits::*;
use crate::types::*;

/// Manager for recording incoming payments.
///
/// This is the boundary where bank-statement lines (e.g. from a CSV
/// import) enter the system as unmatched payment records; the
/// reconciliation engine links them to receivables later.
pub struct PaymentIntake<S: ReceivablesStorage> {
    pub(crate) storage: S,
    validator: Box<dyn PaymentValidator>,
}

impl<S: ReceivablesStorage> PaymentIntake<S> {
    /// Create a new payment intake
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultPaymentValidator),
        }
    }

    /// Create a new payment intake with a custom validator
    pub fn with_validator(storage: S, validator: Box<dyn PaymentValidator>) -> Self {
        Self { storage, validator }
    }

    /// Record an incoming payment as an unmatched payment record
    pub async fn record_payment(
        &mut self,
        date: NaiveDate,
        amount: BigDecimal,
        account_name: String,
        memo: String,
    ) -> ReceivablesResult<PaymentRecord> {
        let payment = PaymentRecord::new(
            Uuid::new_v4().to_string(),
            date,
            amount,
            account_name,
            memo,
        );
        self.validator.validate_payment(&payment)?;
        self.storage.save_payment(&payment).await?;
        Ok(payment)
    }

    /// Set an unmatched payment aside for manual handling.
    ///
    /// Manual payments are excluded from the unmatched statistics and can
    /// no longer be matched automatically.
    pub async fn mark_manual(&mut self, payment_id: &str) -> ReceivablesResult<PaymentRecord> {
        let mut payment = self
            .storage
            .get_payment(payment_id)
            .await?
            .ok_or_else(|| ReceivablesError::PaymentNotFound(payment_id.to_string()))?;

        if payment.status == PaymentStatus::Matched {
            return Err(ReceivablesError::AlreadyMatched(payment.id));
        }

        payment.status = PaymentStatus::Manual;
        self.storage.save_payment(&payment).await?;
        Ok(payment)
    }

    /// Get a payment record by ID
    pub async fn get_payment(&self, payment_id: &str) -> ReceivablesResult<Option<PaymentRecord>> {
        self.storage.get_payment(payment_id).await
    }

    /// List all payment records
    pub async fn list_payments(&self) -> ReceivablesResult<Vec<PaymentRecord>> {
        self.storage.list_payments().await
    }
}
