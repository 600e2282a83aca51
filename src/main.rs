// ==========================================
// GST Billing Core - CLI Entry Point
// ==========================================
// Small utility around the library: preview an import as the staged,
// finalized records, or write the sample templates.
//
// Usage:
//   gst-billing-core inventory <file.xlsx|file.csv>
//   gst-billing-core invoices <file.xlsx|file.csv>
//   gst-billing-core inventory-template <out.xlsx|out.csv>
//   gst-billing-core invoice-template <out.xlsx|out.csv>
// ==========================================

use gst_billing_core::{
    exporter, ImportDefaults, ImportService, InvoiceReviewSession, ProductDraft, ReviewSession,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    gst_billing_core::logging::init();

    tracing::info!("{} v{}", gst_billing_core::APP_NAME, gst_billing_core::VERSION);

    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_else(|| "help".to_string());
    let path = args.next();

    match (command.as_str(), path) {
        ("inventory", Some(file)) => preview_inventory(&file),
        ("invoices", Some(file)) => preview_invoices(&file),
        ("inventory-template", Some(out)) => {
            exporter::template::write_inventory_template(&out)?;
            tracing::info!(file = %out, "inventory template written");
            Ok(())
        }
        ("invoice-template", Some(out)) => {
            exporter::template::write_invoice_template(&out)?;
            tracing::info!(file = %out, "invoice template written");
            Ok(())
        }
        _ => {
            eprintln!(
                "usage: gst-billing-core <inventory|invoices|inventory-template|invoice-template> <file>"
            );
            Ok(())
        }
    }
}

/// Parse, stage and finalize an inventory sheet, printing the records that
/// a commit would send.
fn preview_inventory(file: &str) -> Result<(), Box<dyn std::error::Error>> {
    let service = ImportService::default();
    let products = service.import_inventory_file(file)?;

    let mut session = ReviewSession::new(ImportDefaults::default());
    session.stage(products.iter().map(ProductDraft::from).collect())?;
    session.validate()?;
    let confirmed = session.begin_commit()?;

    println!("{}", serde_json::to_string_pretty(&confirmed)?);
    tracing::info!(count = confirmed.len(), "inventory records ready to commit");
    Ok(())
}

fn preview_invoices(file: &str) -> Result<(), Box<dyn std::error::Error>> {
    let service = ImportService::default();
    let bundle = service.import_invoice_file(file)?;

    let mut session = InvoiceReviewSession::new(ImportDefaults::default());
    session.stage(&bundle)?;
    session.validate()?;
    let (invoices, products) = session.begin_commit()?;

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "invoices": &invoices,
            "products": &products,
        }))?
    );
    tracing::info!(
        invoices = invoices.len(),
        products = products.len(),
        "invoice batch ready to commit"
    );
    Ok(())
}
