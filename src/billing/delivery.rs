//! Delivery note management

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::traits::*;
use crate::types::*;

/// Manager for delivery note operations
pub struct DeliveryNoteManager<S: ReceivablesStorage> {
    pub(crate) storage: S,
    validator: Arc<dyn InvoiceValidator>,
}

impl<S: ReceivablesStorage> DeliveryNoteManager<S> {
    /// Create a new delivery note manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Arc::new(DefaultInvoiceValidator),
        }
    }

    /// Create a new delivery note manager with a custom validator
    pub fn with_validator(storage: S, validator: Arc<dyn InvoiceValidator>) -> Self {
        Self { storage, validator }
    }

    /// Create a new unissued delivery note
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
        let note = DeliveryNote::new(
            id,
            company_id,
            product_code,
            product_name,
            quantity,
            unit_price,
            delivery_date,
        );

        self.validator.validate_delivery_note(&note)?;

        if self.storage.get_delivery_note(&note.id).await?.is_some() {
            return Err(ReceivablesError::Validation(format!(
                "Delivery note with ID '{}' already exists",
                note.id
            )));
        }

        if self.storage.get_company(&note.company_id).await?.is_none() {
            return Err(ReceivablesError::CompanyNotFound(note.company_id.clone()));
        }

        self.storage.save_delivery_note(&note).await?;
        Ok(note)
    }

    /// Get a delivery note by ID
    pub async fn get_delivery_note(&self, note_id: &str) -> ReceivablesResult<Option<DeliveryNote>> {
        self.storage.get_delivery_note(note_id).await
    }

    /// Get a delivery note by ID, returning an error if not found
    pub async fn get_delivery_note_required(
        &self,
        note_id: &str,
    ) -> ReceivablesResult<DeliveryNote> {
        self.storage
            .get_delivery_note(note_id)
            .await?
            .ok_or_else(|| ReceivablesError::DeliveryNoteNotFound(note_id.to_string()))
    }

    /// List delivery notes, optionally filtered by issuance status
    pub async fn list_delivery_notes(
        &self,
        status: Option<DocumentStatus>,
    ) -> ReceivablesResult<Vec<DeliveryNote>> {
        self.storage.list_delivery_notes(status).await
    }

    /// Mark a delivery note as issued
    pub async fn mark_issued(&mut self, note_id: &str) -> ReceivablesResult<DeliveryNote> {
        let mut note = self.get_delivery_note_required(note_id).await?;
        note.status = DocumentStatus::Issued;
        self.storage.save_delivery_note(&note).await?;
        Ok(note)
    }
}
