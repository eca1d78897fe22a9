//! Core types and data structures for the receivables system

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Status of a company in the customer master
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    Active,
    Inactive,
}

/// Customer company referenced by delivery notes, invoices, and receivables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier for the company
    pub id: String,
    /// Company name
    pub name: String,
    /// Postal address
    pub address: String,
    /// Contact phone number
    pub phone: String,
    /// Contact email address
    pub email: String,
    /// Whether the company is an active trading partner
    pub status: CompanyStatus,
}

impl Company {
    /// Create a new active company
    pub fn new(id: String, name: String, address: String, phone: String, email: String) -> Self {
        Self {
            id,
            name,
            address,
            phone,
            email,
            status: CompanyStatus::Active,
        }
    }
}

/// Issuance status shared by delivery notes and invoices
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// The document has been issued to the customer
    Issued,
    /// The document exists but has not been issued yet
    Unissued,
}

/// Delivery note recording goods delivered to a customer.
///
/// One or more delivery notes of the same company become the basis for an
/// invoice. Immutable after creation except for the issuance status toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryNote {
    /// Unique identifier for the delivery note
    pub id: String,
    /// Company the goods were delivered to
    pub company_id: String,
    /// Product code from the product master
    pub product_code: String,
    /// Product name at the time of delivery
    pub product_name: String,
    /// Quantity delivered (positive)
    pub quantity: u32,
    /// Unit price at the time of delivery (non-negative)
    pub unit_price: BigDecimal,
    /// Line total, always quantity x unit_price
    pub total_amount: BigDecimal,
    /// Date of delivery
    pub delivery_date: NaiveDate,
    /// Issuance status
    pub status: DocumentStatus,
    /// When the record was created
    pub created_at: NaiveDateTime,
}

impl DeliveryNote {
    /// Create a new unissued delivery note. The total is computed from
    /// quantity and unit price.
    pub fn new(
        id: String,
        company_id: String,
        product_code: String,
        product_name: String,
        quantity: u32,
        unit_price: BigDecimal,
        delivery_date: NaiveDate,
    ) -> Self {
        let total_amount = &unit_price * BigDecimal::from(quantity);
        Self {
            id,
            company_id,
            product_code,
            product_name,
            quantity,
            unit_price,
            total_amount,
            delivery_date,
            status: DocumentStatus::Unissued,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Validate the delivery note
    pub fn validate(&self) -> ReceivablesResult<()> {
        if self.quantity == 0 {
            return Err(ReceivablesError::Validation(
                "Delivery note quantity must be positive".to_string(),
            ));
        }
        if self.unit_price < BigDecimal::from(0) {
            return Err(ReceivablesError::Validation(
                "Delivery note unit price cannot be negative".to_string(),
            ));
        }
        if self.total_amount != &self.unit_price * BigDecimal::from(self.quantity) {
            return Err(ReceivablesError::Validation(
                "Delivery note total must equal quantity x unit price".to_string(),
            ));
        }
        Ok(())
    }
}

/// Invoice aggregating one or more delivery notes of a single company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier for the invoice
    pub id: String,
    /// Human-facing invoice number, unique across invoices
    pub invoice_number: String,
    /// Company being billed
    pub company_id: String,
    /// Sum of the source delivery note totals (positive)
    pub total_amount: BigDecimal,
    /// Date the invoice was issued
    pub issue_date: NaiveDate,
    /// Payment due date, never before the issue date
    pub due_date: NaiveDate,
    /// Issuance status
    pub status: DocumentStatus,
    /// Delivery notes this invoice was created from
    pub delivery_note_ids: Vec<String>,
    /// When the record was created
    pub created_at: NaiveDateTime,
}

impl Invoice {
    /// Validate the invoice
    pub fn validate(&self) -> ReceivablesResult<()> {
        if self.total_amount <= BigDecimal::from(0) {
            return Err(ReceivablesError::Validation(
                "Invoice total must be positive".to_string(),
            ));
        }
        if self.due_date < self.issue_date {
            return Err(ReceivablesError::Validation(format!(
                "Invoice due date {} is before issue date {}",
                self.due_date, self.issue_date
            )));
        }
        if self.delivery_note_ids.is_empty() {
            return Err(ReceivablesError::Validation(
                "Invoice must reference at least one delivery note".to_string(),
            ));
        }
        Ok(())
    }
}

/// Payment status of an accounts receivable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceivableStatus {
    /// No payment received yet
    Unpaid,
    /// Some payment received, balance still outstanding
    PartiallyPaid,
    /// Fully settled. Terminal: a paid receivable is never reclassified.
    Paid,
    /// Due date passed with money still outstanding
    Overdue,
}

/// Money owed by a customer, tied 1:1 to an invoice.
///
/// This is the sole mutable ledger entity: payment matching updates
/// `paid_amount`, `remaining_amount`, and `status` together, and nothing
/// else writes those fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountsReceivable {
    /// Unique identifier for the receivable
    pub id: String,
    /// Invoice this receivable was derived from (1:1)
    pub invoice_id: String,
    /// Invoice number, denormalized for display and bank-statement matching
    pub invoice_number: String,
    /// Company that owes the amount
    pub company_id: String,
    /// Amount owed, fixed at creation to the invoice total
    pub amount: BigDecimal,
    /// Payment due date, taken from the invoice
    pub due_date: NaiveDate,
    /// Total matched so far; never decreases
    pub paid_amount: BigDecimal,
    /// Always amount - paid_amount. Negative means overpayment.
    pub remaining_amount: BigDecimal,
    /// Current payment status
    pub status: ReceivableStatus,
    /// Whole days past due as of the last overdue sweep
    pub overdue_days: u32,
    /// Optimistic-concurrency counter, bumped on every mutation
    pub version: u64,
    /// When the record was created
    pub created_at: NaiveDateTime,
}

impl AccountsReceivable {
    /// Derive a fresh receivable from an invoice
    pub fn from_invoice(id: String, invoice: &Invoice) -> Self {
        Self {
            id,
            invoice_id: invoice.id.clone(),
            invoice_number: invoice.invoice_number.clone(),
            company_id: invoice.company_id.clone(),
            amount: invoice.total_amount.clone(),
            due_date: invoice.due_date,
            paid_amount: BigDecimal::from(0),
            remaining_amount: invoice.total_amount.clone(),
            status: ReceivableStatus::Unpaid,
            overdue_days: 0,
            version: 0,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Apply a matched payment amount to this receivable, recomputing the
    /// balance and deriving the new status.
    ///
    /// Status precedence: a zero-or-negative remaining balance settles the
    /// receivable, a positive paid amount marks it partially paid, and
    /// otherwise the prior status (e.g. overdue) persists. Overpayment is
    /// kept as a negative remaining balance rather than clamped, so the
    /// excess stays visible; the excess is returned to the caller.
    pub fn apply_payment(&mut self, amount: &BigDecimal) -> Option<BigDecimal> {
        self.paid_amount += amount;
        self.remaining_amount = &self.amount - &self.paid_amount;

        if self.remaining_amount <= BigDecimal::from(0) {
            self.status = ReceivableStatus::Paid;
        } else if self.paid_amount > BigDecimal::from(0) {
            self.status = ReceivableStatus::PartiallyPaid;
        }
        self.version += 1;

        if self.remaining_amount < BigDecimal::from(0) {
            Some(self.remaining_amount.clone().abs())
        } else {
            None
        }
    }

    /// Mark this receivable overdue as of the given date. Paid receivables
    /// are left untouched. Returns whether anything changed, so a repeated
    /// sweep with the same date is a no-op.
    pub fn mark_overdue(&mut self, as_of: NaiveDate) -> bool {
        if self.status == ReceivableStatus::Paid || self.due_date >= as_of {
            return false;
        }
        let days = (as_of - self.due_date).num_days().max(0) as u32;
        if self.status == ReceivableStatus::Overdue && self.overdue_days == days {
            return false;
        }
        self.status = ReceivableStatus::Overdue;
        self.overdue_days = days;
        self.version += 1;
        true
    }

    /// Whether the balance invariants hold: the remaining amount equals
    /// amount minus paid, and paid status coincides with a settled balance
    pub fn is_consistent(&self) -> bool {
        self.remaining_amount == &self.amount - &self.paid_amount
            && (self.status == ReceivableStatus::Paid)
                == (self.remaining_amount <= BigDecimal::from(0))
    }
}

/// Match status of an incoming payment record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Imported but not yet linked to a receivable
    Unmatched,
    /// Linked to a receivable; `receivable_id` is set
    Matched,
    /// Set aside for manual handling, excluded from unmatched totals
    Manual,
}

/// Incoming payment as it appears on a bank statement.
///
/// Arrives unmatched (typically from a CSV import) and transitions to
/// matched exactly once; there is no unmatch operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Unique identifier for the payment record
    pub id: String,
    /// Receivable this payment settles, once matched
    pub receivable_id: Option<String>,
    /// Value date of the payment
    pub date: NaiveDate,
    /// Amount received (positive)
    pub amount: BigDecimal,
    /// Payer account name as printed on the bank statement
    pub account_name: String,
    /// Free-text memo from the statement line
    pub memo: String,
    /// Match status
    pub status: PaymentStatus,
    /// When the record was created
    pub created_at: NaiveDateTime,
}

impl PaymentRecord {
    /// Create a new unmatched payment record
    pub fn new(
        id: String,
        date: NaiveDate,
        amount: BigDecimal,
        account_name: String,
        memo: String,
    ) -> Self {
        Self {
            id,
            receivable_id: None,
            date,
            amount,
            account_name,
            memo,
            status: PaymentStatus::Unmatched,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Whether the linkage invariant holds: matched iff a receivable is set
    pub fn is_consistent(&self) -> bool {
        (self.status == PaymentStatus::Matched) == self.receivable_id.is_some()
    }
}

/// Errors that can occur in the receivables system
#[derive(Debug, thiserror::Error)]
pub enum ReceivablesError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Company not found: {0}")]
    CompanyNotFound(String),
    #[error("Delivery note not found: {0}")]
    DeliveryNoteNotFound(String),
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),
    #[error("Receivable not found: {0}")]
    ReceivableNotFound(String),
    #[error("Payment record not found: {0}")]
    PaymentNotFound(String),
    #[error("Payment {0} is already matched to a receivable")]
    AlreadyMatched(String),
    #[error("Concurrent update on receivable {0}: stale version")]
    Conflict(String),
}

/// Result type for receivables operations
pub type ReceivablesResult<T> = Result<T, ReceivablesError>;
