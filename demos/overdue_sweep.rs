//! Overdue sweep example: late receivables gain overdue status, settled
//! ones are never reclassified

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use receivables_core::{Company, IssueInvoiceParams, MemoryStorage, ReceivablesLedger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("⏰ Receivables Core - Overdue Sweep Example\n");

    let storage = MemoryStorage::new();
    let mut ledger = ReceivablesLedger::new(storage);

    let company = ledger
        .register_company(Company::new(
            "c1".to_string(),
            "Globex".to_string(),
            "9-8-7 Sample Ave".to_string(),
            "06-9876-5432".to_string(),
            "ap@globex.example".to_string(),
        ))
        .await?;

    // Two invoices: one due mid-January, one due end of February
    for (dn, inv, number, amount, due) in [
        ("dn1", "inv1", "INV-2024-001", 30000i64, (2024, 1, 15)),
        ("dn2", "inv2", "INV-2024-002", 50000, (2024, 2, 29)),
    ] {
        ledger
            .create_delivery_note(
                dn.to_string(),
                company.id.clone(),
                "P-100".to_string(),
                "Widget".to_string(),
                1,
                BigDecimal::from(amount),
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            )
            .await?;
        ledger
            .issue_invoice(IssueInvoiceParams {
                id: inv.to_string(),
                invoice_number: number.to_string(),
                company_id: company.id.clone(),
                issue_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                due_date: NaiveDate::from_ymd_opt(due.0, due.1, due.2).unwrap(),
                delivery_note_ids: vec![dn.to_string()],
            })
            .await?;
    }

    // Sweep as of January 30th: only the first invoice is late
    let as_of = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap();
    let changed = ledger.recompute_overdue_status(as_of).await?;
    println!("Sweep as of {as_of}:");
    for r in &changed {
        println!(
            "  ⚠ {} is overdue by {} days ({} outstanding)",
            r.invoice_number, r.overdue_days, r.remaining_amount
        );
    }

    // A second sweep with the same date is a no-op
    let changed_again = ledger.recompute_overdue_status(as_of).await?;
    println!("Repeat sweep changed {} receivables\n", changed_again.len());

    let stats = ledger.statistics().await?;
    println!("📊 Overdue: {} receivable(s), {} total", stats.overdue_count, stats.total_overdue_amount);

    Ok(())
}
