//! Traits for storage abstraction and extensibility

use async_trait::async_trait;

use crate::types::*;

/// Storage abstraction for the receivables system
///
/// This trait allows the core to work with any storage backend (a REST
/// resource per entity, PostgreSQL, in-memory, etc.) by implementing these
/// methods. All writes are upserts keyed by id.
#[async_trait]
pub trait ReceivablesStorage: Send + Sync {
    /// Get a company by ID
    async fn get_company(&self, company_id: &str) -> ReceivablesResult<Option<Company>>;

    /// Save a company
    async fn save_company(&mut self, company: &Company) -> ReceivablesResult<()>;

    /// List all companies
    async fn list_companies(&self) -> ReceivablesResult<Vec<Company>>;

    /// Get a delivery note by ID
    async fn get_delivery_note(&self, note_id: &str) -> ReceivablesResult<Option<DeliveryNote>>;

    /// Save a delivery note
    async fn save_delivery_note(&mut self, note: &DeliveryNote) -> ReceivablesResult<()>;

    /// List all delivery notes, optionally filtered by issuance status
    async fn list_delivery_notes(
        &self,
        status: Option<DocumentStatus>,
    ) -> ReceivablesResult<Vec<DeliveryNote>>;

    /// Get an invoice by ID
    async fn get_invoice(&self, invoice_id: &str) -> ReceivablesResult<Option<Invoice>>;

    /// Save an invoice
    async fn save_invoice(&mut self, invoice: &Invoice) -> ReceivablesResult<()>;

    /// List all invoices
    async fn list_invoices(&self) -> ReceivablesResult<Vec<Invoice>>;

    /// Get a receivable by ID
    async fn get_receivable(
        &self,
        receivable_id: &str,
    ) -> ReceivablesResult<Option<AccountsReceivable>>;

    /// Save a receivable (blind upsert, used when creating the record)
    async fn save_receivable(&mut self, receivable: &AccountsReceivable) -> ReceivablesResult<()>;

    /// Save an existing receivable only if its `version` is exactly one
    /// ahead of the stored version; otherwise fail with
    /// [`ReceivablesError::Conflict`]. Every write to a live receivable
    /// goes through this check so no writer can clobber another's update
    /// from a stale snapshot.
    async fn save_receivable_versioned(
        &mut self,
        receivable: &AccountsReceivable,
    ) -> ReceivablesResult<()>;

    /// List all receivables
    async fn list_receivables(&self) -> ReceivablesResult<Vec<AccountsReceivable>>;

    /// Get a payment record by ID
    async fn get_payment(&self, payment_id: &str) -> ReceivablesResult<Option<PaymentRecord>>;

    /// Save a payment record
    async fn save_payment(&mut self, payment: &PaymentRecord) -> ReceivablesResult<()>;

    /// List all payment records
    async fn list_payments(&self) -> ReceivablesResult<Vec<PaymentRecord>>;

    /// Persist a matched receivable/payment pair as one atomic unit.
    ///
    /// Either both records are written or neither is. Implementations must
    /// reject a receivable whose `version` is not exactly one ahead of the
    /// stored version with [`ReceivablesError::Conflict`], so a concurrent
    /// match against the same receivable cannot lose an update.
    async fn commit_match(
        &mut self,
        receivable: &AccountsReceivable,
        payment: &PaymentRecord,
    ) -> ReceivablesResult<()>;
}

/// Trait for implementing custom invoice validation rules
pub trait InvoiceValidator: Send + Sync {
    /// Validate an invoice before saving
    fn validate_invoice(&self, invoice: &Invoice) -> ReceivablesResult<()>;

    /// Validate a delivery note before saving
    fn validate_delivery_note(&self, note: &DeliveryNote) -> ReceivablesResult<()>;
}

/// Trait for implementing custom payment validation rules
pub trait PaymentValidator: Send + Sync {
    /// Validate an incoming payment record before saving
    fn validate_payment(&self, payment: &PaymentRecord) -> ReceivablesResult<()>;
}

/// Default invoice validator with the structural rules from the types
pub struct DefaultInvoiceValidator;

impl InvoiceValidator for DefaultInvoiceValidator {
    fn validate_invoice(&self, invoice: &Invoice) -> ReceivablesResult<()> {
        if invoice.id.trim().is_empty() {
            return Err(ReceivablesError::Validation(
                "Invoice ID cannot be empty".to_string(),
            ));
        }
        if invoice.invoice_number.trim().is_empty() {
            return Err(ReceivablesError::Validation(
                "Invoice number cannot be empty".to_string(),
            ));
        }
        invoice.validate()
    }

    fn validate_delivery_note(&self, note: &DeliveryNote) -> ReceivablesResult<()> {
        if note.id.trim().is_empty() {
            return Err(ReceivablesError::Validation(
                "Delivery note ID cannot be empty".to_string(),
            ));
        }
        note.validate()
    }
}

/// Default payment validator with basic rules
pub struct DefaultPaymentValidator;

impl PaymentValidator for DefaultPaymentValidator {
    fn validate_payment(&self, payment: &PaymentRecord) -> ReceivablesResult<()> {
        if payment.id.trim().is_empty() {
            return Err(ReceivablesError::Validation(
                "Payment ID cannot be empty".to_string(),
            ));
        }
        if payment.amount <= bigdecimal::BigDecimal::from(0) {
            return Err(ReceivablesError::Validation(
                "Payment amount must be positive".to_string(),
            ));
        }
        if payment.status == PaymentStatus::Matched && payment.receivable_id.is_none() {
            return Err(ReceivablesError::Validation(
                "Matched payment must reference a receivable".to_string(),
            ));
        }
        Ok(())
    }
}
