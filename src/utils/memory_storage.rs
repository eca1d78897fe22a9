//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    companies: Arc<RwLock<HashMap<String, Company>>>,
    delivery_notes: Arc<RwLock<HashMap<String, DeliveryNote>>>,
    invoices: Arc<RwLock<HashMap<String, Invoice>>>,
    receivables: Arc<RwLock<HashMap<String, AccountsReceivable>>>,
    payments: Arc<RwLock<HashMap<String, PaymentRecord>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            companies: Arc::new(RwLock::new(HashMap::new())),
            delivery_notes: Arc::new(RwLock::new(HashMap::new())),
            invoices: Arc::new(RwLock::new(HashMap::new())),
            receivables: Arc::new(RwLock::new(HashMap::new())),
            payments: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.companies.write().unwrap().clear();
        self.delivery_notes.write().unwrap().clear();
        self.invoices.write().unwrap().clear();
        self.receivables.write().unwrap().clear();
        self.payments.write().unwrap().clear();
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReceivablesStorage for MemoryStorage {
    async fn get_company(&self, company_id: &str) -> ReceivablesResult<Option<Company>> {
        Ok(self.companies.read().unwrap().get(company_id).cloned())
    }

    async fn save_company(&mut self, company: &Company) -> ReceivablesResult<()> {
        self.companies
            .write()
            .unwrap()
            .insert(company.id.clone(), company.clone());
        Ok(())
    }

    async fn list_companies(&self) -> ReceivablesResult<Vec<Company>> {
        Ok(self.companies.read().unwrap().values().cloned().collect())
    }

    async fn get_delivery_note(&self, note_id: &str) -> ReceivablesResult<Option<DeliveryNote>> {
        Ok(self.delivery_notes.read().unwrap().get(note_id).cloned())
    }

    async fn save_delivery_note(&mut self, note: &DeliveryNote) -> ReceivablesResult<()> {
        self.delivery_notes
            .write()
            .unwrap()
            .insert(note.id.clone(), note.clone());
        Ok(())
    }

    async fn list_delivery_notes(
        &self,
        status: Option<DocumentStatus>,
    ) -> ReceivablesResult<Vec<DeliveryNote>> {
        let notes = self.delivery_notes.read().unwrap();
        let filtered: Vec<DeliveryNote> = notes
            .values()
            .filter(|note| status.as_ref().is_none_or(|s| &note.status == s))
            .cloned()
            .collect();
        Ok(filtered)
    }

    async fn get_invoice(&self, invoice_id: &str) -> ReceivablesResult<Option<Invoice>> {
        Ok(self.invoices.read().unwrap().get(invoice_id).cloned())
    }

    async fn save_invoice(&mut self, invoice: &Invoice) -> ReceivablesResult<()> {
        self.invoices
            .write()
            .unwrap()
            .insert(invoice.id.clone(), invoice.clone());
        Ok(())
    }

    async fn list_invoices(&self) -> ReceivablesResult<Vec<Invoice>> {
        Ok(self.invoices.read().unwrap().values().cloned().collect())
    }

    async fn get_receivable(
        &self,
        receivable_id: &str,
    ) -> ReceivablesResult<Option<AccountsReceivable>> {
        Ok(self.receivables.read().unwrap().get(receivable_id).cloned())
    }

    async fn save_receivable(&mut self, receivable: &AccountsReceivable) -> ReceivablesResult<()> {
        self.receivables
            .write()
            .unwrap()
            .insert(receivable.id.clone(), receivable.clone());
        Ok(())
    }

    async fn save_receivable_versioned(
        &mut self,
        receivable: &AccountsReceivable,
    ) -> ReceivablesResult<()> {
        let mut receivables = self.receivables.write().unwrap();

        let stored = receivables
            .get(&receivable.id)
            .ok_or_else(|| ReceivablesError::ReceivableNotFound(receivable.id.clone()))?;

        if receivable.version != stored.version + 1 {
            return Err(ReceivablesError::Conflict(receivable.id.clone()));
        }

        receivables.insert(receivable.id.clone(), receivable.clone());
        Ok(())
    }

    async fn list_receivables(&self) -> ReceivablesResult<Vec<AccountsReceivable>> {
        Ok(self.receivables.read().unwrap().values().cloned().collect())
    }

    async fn get_payment(&self, payment_id: &str) -> ReceivablesResult<Option<PaymentRecord>> {
        Ok(self.payments.read().unwrap().get(payment_id).cloned())
    }

    async fn save_payment(&mut self, payment: &PaymentRecord) -> ReceivablesResult<()> {
        self.payments
            .write()
            .unwrap()
            .insert(payment.id.clone(), payment.clone());
        Ok(())
    }

    async fn list_payments(&self) -> ReceivablesResult<Vec<PaymentRecord>> {
        Ok(self.payments.read().unwrap().values().cloned().collect())
    }

    async fn commit_match(
        &mut self,
        receivable: &AccountsReceivable,
        payment: &PaymentRecord,
    ) -> ReceivablesResult<()> {
        // Both locks are held for the whole commit so the pair lands
        // together or not at all.
        let mut receivables = self.receivables.write().unwrap();
        let mut payments = self.payments.write().unwrap();

        let stored = receivables
            .get(&receivable.id)
            .ok_or_else(|| ReceivablesError::ReceivableNotFound(receivable.id.clone()))?;

        if receivable.version != stored.version + 1 {
            return Err(ReceivablesError::Conflict(receivable.id.clone()));
        }

        if !payments.contains_key(&payment.id) {
            return Err(ReceivablesError::PaymentNotFound(payment.id.clone()));
        }

        receivables.insert(receivable.id.clone(), receivable.clone());
        payments.insert(payment.id.clone(), payment.clone());
        Ok(())
    }
}
