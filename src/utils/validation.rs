//! Validation utilities

use crate::traits::*;
use crate::types::*;
use bigdecimal::BigDecimal;

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: &BigDecimal) -> ReceivablesResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(ReceivablesError::Validation(
            "Amount must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that an entity ID is valid
pub fn validate_entity_id(id: &str) -> ReceivablesResult<()> {
    if id.trim().is_empty() {
        return Err(ReceivablesError::Validation(
            "ID cannot be empty".to_string(),
        ));
    }

    if id.len() > 64 {
        return Err(ReceivablesError::Validation(
            "ID cannot exceed 64 characters".to_string(),
        ));
    }

    // Check for valid characters (alphanumeric, dashes, underscores)
    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ReceivablesError::Validation(
            "ID can only contain alphanumeric characters, dashes, and underscores".to_string(),
        ));
    }

    Ok(())
}

/// Validate an invoice number
pub fn validate_invoice_number(invoice_number: &str) -> ReceivablesResult<()> {
    if invoice_number.trim().is_empty() {
        return Err(ReceivablesError::Validation(
            "Invoice number cannot be empty".to_string(),
        ));
    }

    if invoice_number.len() > 50 {
        return Err(ReceivablesError::Validation(
            "Invoice number cannot exceed 50 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate a bank account name from a statement line
pub fn validate_account_name(account_name: &str) -> ReceivablesResult<()> {
    if account_name.trim().is_empty() {
        return Err(ReceivablesError::Validation(
            "Account name cannot be empty".to_string(),
        ));
    }

    if account_name.len() > 100 {
        return Err(ReceivablesError::Validation(
            "Account name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced invoice validator with detailed checks
pub struct EnhancedInvoiceValidator;

impl InvoiceValidator for EnhancedInvoiceValidator {
    fn validate_invoice(&self, invoice: &Invoice) -> ReceivablesResult<()> {
        validate_entity_id(&invoice.id)?;
        validate_invoice_number(&invoice.invoice_number)?;
        invoice.validate()?;
        validate_positive_amount(&invoice.total_amount)?;

        // A delivery note cannot appear twice on the same invoice
        let mut seen = std::collections::HashSet::new();
        for note_id in &invoice.delivery_note_ids {
            if !seen.insert(note_id) {
                return Err(ReceivablesError::Validation(format!(
                    "Delivery note '{}' appears multiple times on the invoice",
                    note_id
                )));
            }
        }

        Ok(())
    }

    fn validate_delivery_note(&self, note: &DeliveryNote) -> ReceivablesResult<()> {
        validate_entity_id(&note.id)?;
        validate_entity_id(&note.company_id)?;
        note.validate()
    }
}

/// Enhanced payment validator with detailed checks
pub struct EnhancedPaymentValidator;

impl PaymentValidator for EnhancedPaymentValidator {
    fn validate_payment(&self, payment: &PaymentRecord) -> ReceivablesResult<()> {
        validate_positive_amount(&payment.amount)?;
        validate_account_name(&payment.account_name)?;

        if payment.memo.len() > 500 {
            return Err(ReceivablesError::Validation(
                "Payment memo cannot exceed 500 characters".to_string(),
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
