//! Main facade that coordinates billing and reconciliation

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::billing::{DeliveryNoteManager, InvoiceManager, IssueInvoiceParams, PaymentIntake};
use crate::reconciliation::{MatchOutcome, ReceivableStatistics, ReconciliationEngine};
use crate::traits::*;
use crate::types::*;

/// Receivables ledger orchestrating the full workflow over one storage
/// backend: delivery notes, invoice issuance, payment intake, and
/// reconciliation.
pub struct ReceivablesLedger<S: ReceivablesStorage> {
    delivery_manager: DeliveryNoteManager<S>,
    invoice_manager: InvoiceManager<S>,
    payment_intake: PaymentIntake<S>,
    engine: ReconciliationEngine<S>,
}

impl<S: ReceivablesStorage + Clone> ReceivablesLedger<S> {
    /// Create a new ledger with the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            delivery_manager: DeliveryNoteManager::new(storage.clone()),
            invoice_manager: InvoiceManager::new(storage.clone()),
            payment_intake: PaymentIntake::new(storage.clone()),
            engine: ReconciliationEngine::new(storage),
        }
    }

    /// Create a new ledger with custom validators. The invoice validator
    /// is shared between delivery note creation and invoice issuance.
    pub fn with_validators(
        storage: S,
        invoice_validator: Arc<dyn InvoiceValidator>,
        payment_validator: Box<dyn PaymentValidator>,
    ) -> Self {
        Self {
            delivery_manager: DeliveryNoteManager::with_validator(
                storage.clone(),
                invoice_validator.clone(),
            ),
            invoice_manager: InvoiceManager::with_validator(storage.clone(), invoice_validator),
            payment_intake: PaymentIntake::with_validator(storage.clone(), payment_validator),
            engine: ReconciliationEngine::new(storage),
        }
    }

    // Company master operations
    /// Register a company in the customer master
    pub async fn register_company(&mut self, company: Company) -> ReceivablesResult<Company> {
        if company.id.trim().is_empty() || company.name.trim().is_empty() {
            return Err(ReceivablesError::Validation(
                "Company ID and name cannot be empty".to_string(),
            ));
        }
        self.delivery_manager.storage.save_company(&company).await?;
        Ok(company)
    }

    /// Get a company by ID
    pub async fn get_company(&self, company_id: &str) -> ReceivablesResult<Option<Company>> {
        self.delivery_manager.storage.get_company(company_id).await
    }

    /// List all companies
    pub async fn list_companies(&self) -> ReceivablesResult<Vec<Company>> {
        self.delivery_manager.storage.list_companies().await
    }

    // Delivery note operations
    /// Create a new delivery note
    #[allow(clippy::too_many_arguments)]
    pub async fn create_delivery_note(
        &mut self,
        id: String,
        company_id: String,
        product_code: String,
        product_name: String,
        quantity: u32,
        unit_price: BigDecimal,
        delivery_date: NaiveDate,
    ) -> ReceivablesResult<DeliveryNote> {
        self.delivery_manager
            .create_delivery_note(
                id,
                company_id,
                product_code,
                product_name,
                quantity,
                unit_price,
                delivery_date,
            )
            .await
    }

    /// Get a delivery note by ID
    pub async fn get_delivery_note(&self, note_id: &str) -> ReceivablesResult<Option<DeliveryNote>> {
        self.delivery_manager.get_delivery_note(note_id).await
    }

    /// List delivery notes, optionally filtered by issuance status
    pub async fn list_delivery_notes(
        &self,
        status: Option<DocumentStatus>,
    ) -> ReceivablesResult<Vec<DeliveryNote>> {
        self.delivery_manager.list_delivery_notes(status).await
    }

    /// Mark a delivery note as issued
    pub async fn mark_delivery_note_issued(
        &mut self,
        note_id: &str,
    ) -> ReceivablesResult<DeliveryNote> {
        self.delivery_manager.mark_issued(note_id).await
    }

    // Invoice operations
    /// Issue an invoice from delivery notes and derive its receivable
    pub async fn issue_invoice(
        &mut self,
        params: IssueInvoiceParams,
    ) -> ReceivablesResult<(Invoice, AccountsReceivable)> {
        self.invoice_manager.issue_invoice(params).await
    }

    /// Get an invoice by ID
    pub async fn get_invoice(&self, invoice_id: &str) -> ReceivablesResult<Option<Invoice>> {
        self.invoice_manager.get_invoice(invoice_id).await
    }

    /// List all invoices
    pub async fn list_invoices(&self) -> ReceivablesResult<Vec<Invoice>> {
        self.invoice_manager.list_invoices().await
    }

    // Receivable operations
    /// Get a receivable by ID
    pub async fn get_receivable(
        &self,
        receivable_id: &str,
    ) -> ReceivablesResult<Option<AccountsReceivable>> {
        self.invoice_manager.storage.get_receivable(receivable_id).await
    }

    /// List all receivables
    pub async fn list_receivables(&self) -> ReceivablesResult<Vec<AccountsReceivable>> {
        self.invoice_manager.storage.list_receivables().await
    }

    // Payment operations
    /// Record an incoming payment as an unmatched payment record
    pub async fn record_payment(
        &mut self,
        date: NaiveDate,
        amount: BigDecimal,
        account_name: String,
        memo: String,
    ) -> ReceivablesResult<PaymentRecord> {
        self.payment_intake
            .record_payment(date, amount, account_name, memo)
            .await
    }

    /// Set an unmatched payment aside for manual handling
    pub async fn mark_payment_manual(&mut self, payment_id: &str) -> ReceivablesResult<PaymentRecord> {
        self.payment_intake.mark_manual(payment_id).await
    }

    /// Get a payment record by ID
    pub async fn get_payment(&self, payment_id: &str) -> ReceivablesResult<Option<PaymentRecord>> {
        self.payment_intake.get_payment(payment_id).await
    }

    /// List all payment records
    pub async fn list_payments(&self) -> ReceivablesResult<Vec<PaymentRecord>> {
        self.payment_intake.list_payments().await
    }

    // Reconciliation operations
    /// Match an unmatched payment to a receivable
    pub async fn match_payment(
        &mut self,
        payment_id: &str,
        receivable_id: &str,
    ) -> ReceivablesResult<MatchOutcome> {
        self.engine.match_payment(payment_id, receivable_id).await
    }

    /// Recompute overdue status for all receivables as of the given date
    pub async fn recompute_overdue_status(
        &mut self,
        as_of: NaiveDate,
    ) -> ReceivablesResult<Vec<AccountsReceivable>> {
        self.engine.recompute_overdue_status(as_of).await
    }

    /// Derive aggregate statistics from the current collections
    pub async fn statistics(&self) -> ReceivablesResult<ReceivableStatistics> {
        self.engine.statistics().await
    }
}
