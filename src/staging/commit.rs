// ==========================================
// GST Billing Core - Commit Loop
// ==========================================
// Responsibility: hand confirmed records to the billing API, one request
// per record, sequentially, continuing past individual failures
// No timeout or cancellation governs the loop; it runs to completion.
// ==========================================

use crate::api::BillingApi;
use crate::domain::{InvoiceRecord, ProductRecord};
use serde::Serialize;
use tracing::{info, warn};

// ==========================================
// CommitReport - aggregate outcome of one commit
// ==========================================
// Carries the identities of failed records alongside the counts, so a
// partial failure can be retried by hand.
#[derive(Debug, Default, Serialize)]
pub struct CommitReport {
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<CommitFailure>,
}

#[derive(Debug, Serialize)]
pub struct CommitFailure {
    /// sku for products, invoice number for invoices
    pub identity: String,
    pub error: String,
}

impl CommitReport {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Human-readable aggregate line, e.g. "1 succeeded, 1 failed".
    pub fn summary(&self) -> String {
        format!("{} succeeded, {} failed", self.succeeded, self.failed)
    }

    fn record_ok(&mut self) {
        self.succeeded += 1;
    }

    fn record_failure(&mut self, identity: String, error: String) {
        self.failed += 1;
        self.failures.push(CommitFailure { identity, error });
    }
}

/// Commit confirmed products, in staged order.
pub async fn commit_products(api: &dyn BillingApi, products: &[ProductRecord]) -> CommitReport {
    let mut report = CommitReport::default();

    for product in products {
        match api.create_product(product).await {
            Ok(_) => report.record_ok(),
            Err(err) => {
                warn!(sku = %product.sku, error = %err, "product create failed");
                report.record_failure(product.sku.clone(), err.to_string());
            }
        }
    }

    info!(
        succeeded = report.succeeded,
        failed = report.failed,
        "product commit finished"
    );
    report
}

/// Commit a confirmed invoice batch: invoices first, then the derived
/// products, all sequentially in staged order.
pub async fn commit_invoice_batch(
    api: &dyn BillingApi,
    invoices: &[InvoiceRecord],
    products: &[ProductRecord],
) -> CommitReport {
    let mut report = CommitReport::default();

    for invoice in invoices {
        match api.create_invoice(invoice).await {
            Ok(_) => report.record_ok(),
            Err(err) => {
                warn!(invoice = %invoice.invoice_number, error = %err, "invoice create failed");
                report.record_failure(invoice.invoice_number.clone(), err.to_string());
            }
        }
    }

    for product in products {
        match api.create_product(product).await {
            Ok(_) => report.record_ok(),
            Err(err) => {
                warn!(sku = %product.sku, error = %err, "product create failed");
                report.record_failure(product.sku.clone(), err.to_string());
            }
        }
    }

    info!(
        succeeded = report.succeeded,
        failed = report.failed,
        "invoice batch commit finished"
    );
    report
}
