//! Invoice issuance from delivery notes

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::traits::*;
use crate::types::*;

/// Parameters for issuing an invoice from delivery notes
pub struct IssueInvoiceParams {
    pub id: String,
    pub invoice_number: String,
    pub company_id: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub delivery_note_ids: Vec<String>,
}

/// Manager for invoice operations
pub struct InvoiceManager<S: ReceivablesStorage> {
    pub(crate) storage: S,
    validator: Arc<dyn InvoiceValidator>,
}

impl<S: ReceivablesStorage> InvoiceManager<S> {
    /// Create a new invoice manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Arc::new(DefaultInvoiceValidator),
        }
    }

    /// Create a new invoice manager with a custom validator
    pub fn with_validator(storage: S, validator: Arc<dyn InvoiceValidator>) -> Self {
        Self { storage, validator }
    }

    /// Issue an invoice aggregating one or more delivery notes of a single
    /// company, and derive its accounts receivable.
    ///
    /// The invoice total is the sum of the source note totals. The source
    /// notes are marked issued, and a fresh receivable is created with the
    /// invoice amount and due date, status unpaid.
    pub async fn issue_invoice(
        &mut self,
        params: IssueInvoiceParams,
    ) -> ReceivablesResult<(Invoice, AccountsReceivable)> {
        if self.storage.get_invoice(&params.id).await?.is_some() {
            return Err(ReceivablesError::Validation(format!(
                "Invoice with ID '{}' already exists",
                params.id
            )));
        }

        let existing = self.storage.list_invoices().await?;
        if existing
            .iter()
            .any(|inv| inv.invoice_number == params.invoice_number)
        {
            return Err(ReceivablesError::Validation(format!(
                "Invoice number '{}' is already in use",
                params.invoice_number
            )));
        }

        if self.storage.get_company(&params.company_id).await?.is_none() {
            return Err(ReceivablesError::CompanyNotFound(params.company_id.clone()));
        }

        let mut notes = Vec::with_capacity(params.delivery_note_ids.len());
        for note_id in &params.delivery_note_ids {
            let note = self
                .storage
                .get_delivery_note(note_id)
                .await?
                .ok_or_else(|| ReceivablesError::DeliveryNoteNotFound(note_id.clone()))?;

            if note.company_id != params.company_id {
                return Err(ReceivablesError::Validation(format!(
                    "Delivery note '{}' belongs to company '{}', not '{}'",
                    note.id, note.company_id, params.company_id
                )));
            }
            // The issued flag is the re-invoicing gate: a note already on
            // an invoice cannot be billed a second time.
            if note.status == DocumentStatus::Issued {
                return Err(ReceivablesError::Validation(format!(
                    "Delivery note '{}' has already been invoiced",
                    note.id
                )));
            }
            notes.push(note);
        }

        let total_amount = notes
            .iter()
            .map(|n| &n.total_amount)
            .sum::<BigDecimal>();

        let invoice = Invoice {
            id: params.id,
            invoice_number: params.invoice_number,
            company_id: params.company_id,
            total_amount,
            issue_date: params.issue_date,
            due_date: params.due_date,
            status: DocumentStatus::Issued,
            delivery_note_ids: params.delivery_note_ids,
            created_at: chrono::Utc::now().naive_utc(),
        };
        self.validator.validate_invoice(&invoice)?;

        let receivable = AccountsReceivable::from_invoice(Uuid::new_v4().to_string(), &invoice);

        self.storage.save_invoice(&invoice).await?;
        self.storage.save_receivable(&receivable).await?;

        for mut note in notes {
            note.status = DocumentStatus::Issued;
            self.storage.save_delivery_note(&note).await?;
        }

        debug!(
            invoice_id = %invoice.id,
            receivable_id = %receivable.id,
            total = %invoice.total_amount,
            "invoice issued"
        );

        Ok((invoice, receivable))
    }

    /// Get an invoice by ID
    pub async fn get_invoice(&self, invoice_id: &str) -> ReceivablesResult<Option<Invoice>> {
        self.storage.get_invoice(invoice_id).await
    }

    /// Get an invoice by ID, returning an error if not found
    pub async fn get_invoice_required(&self, invoice_id: &str) -> ReceivablesResult<Invoice> {
        self.storage
            .get_invoice(invoice_id)
            .await?
            .ok_or_else(|| ReceivablesError::InvoiceNotFound(invoice_id.to_string()))
    }

    /// List all invoices
    pub async fn list_invoices(&self) -> ReceivablesResult<Vec<Invoice>> {
        self.storage.list_invoices().await
    }
}
