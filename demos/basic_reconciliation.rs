//! Basic invoice-to-cash reconciliation example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use receivables_core::{Company, IssueInvoiceParams, MemoryStorage, ReceivablesLedger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Receivables Core - Basic Reconciliation Example\n");

    let storage = MemoryStorage::new();
    let mut ledger = ReceivablesLedger::new(storage);

    // 1. Register a customer
    println!("🏢 Registering customer...");
    let company = ledger
        .register_company(Company::new(
            "c1".to_string(),
            "ACME Corp".to_string(),
            "1-2-3 Example St".to_string(),
            "03-1234-5678".to_string(),
            "billing@acme.example".to_string(),
        ))
        .await?;
    println!("  ✓ Registered: {} ({})\n", company.name, company.id);

    // 2. Record deliveries
    println!("🚚 Creating delivery notes...");
    for (id, product, qty, price) in [
        ("dn1", "Widget", 10u32, 3000i64),
        ("dn2", "Gadget", 4, 5000),
    ] {
        let note = ledger
            .create_delivery_note(
                id.to_string(),
                company.id.clone(),
                format!("P-{id}"),
                product.to_string(),
                qty,
                BigDecimal::from(price),
                NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            )
            .await?;
        println!(
            "  ✓ {} x{} @ {} = {}",
            note.product_name, note.quantity, note.unit_price, note.total_amount
        );
    }
    println!();

    // 3. Issue an invoice aggregating both notes
    println!("📄 Issuing invoice...");
    let (invoice, receivable) = ledger
        .issue_invoice(IssueInvoiceParams {
            id: "inv1".to_string(),
            invoice_number: "INV-2024-001".to_string(),
            company_id: company.id.clone(),
            issue_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            delivery_note_ids: vec!["dn1".to_string(), "dn2".to_string()],
        })
        .await?;
    println!(
        "  ✓ {} total {} due {}; receivable {} outstanding {}\n",
        invoice.invoice_number,
        invoice.total_amount,
        invoice.due_date,
        receivable.id,
        receivable.remaining_amount
    );

    // 4. A bank payment arrives and gets matched
    println!("💰 Recording and matching a payment...");
    let payment = ledger
        .record_payment(
            NaiveDate::from_ymd_opt(2024, 2, 25).unwrap(),
            BigDecimal::from(30000),
            "ACME CORP".to_string(),
            "partial payment".to_string(),
        )
        .await?;
    let outcome = ledger.match_payment(&payment.id, &receivable.id).await?;
    println!(
        "  ✓ Matched {}: paid {} / remaining {} ({:?})\n",
        payment.id,
        outcome.receivable.paid_amount,
        outcome.receivable.remaining_amount,
        outcome.receivable.status
    );

    // 5. Aggregate health check
    let stats = ledger.statistics().await?;
    println!("📊 Statistics:");
    println!("  Total outstanding:  {}", stats.total_outstanding);
    println!("  Overdue:            {}", stats.overdue_count);
    println!("  Unmatched payments: {}", stats.unmatched_payment_count);
    println!("  Open receivables:   {}", stats.unpaid_or_partial_count);

    Ok(())
}
