// ==========================================
// GST Billing Core - Library Root
// ==========================================
// Spreadsheet import, review staging and export core for a small-business
// billing dashboard. The surrounding CRUD UI and the REST backend live
// outside this crate; the BillingApi trait is the seam between them.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer: billing entities
pub mod domain;

// Import layer: files to validated records
pub mod importer;

// Staging layer: review/edit before commit
pub mod staging;

// API seam: the external billing backend
pub mod api;

// Export layer: records back to flat files
pub mod exporter;

// Import defaults (injected, never ambient)
pub mod config;

// Logging setup
pub mod logging;

// ==========================================
// Re-exports
// ==========================================

pub use config::ImportDefaults;
pub use domain::{InvoiceLineItem, InvoiceRecord, InvoiceStatus, ProductRecord};

pub use importer::{
    CellCoercer, HeaderResolver, ImportError, ImportResult, ImportService, InvoiceImportBundle,
    InvoiceRowGrouper, InventoryRowTransformer, RawRow, UniversalFileParser,
};

pub use staging::{
    commit_invoice_batch, commit_products, CommitReport, InvoiceDraft, InvoiceReviewSession,
    ProductDraft, ReviewSession, StageState, StagedItem, StagingError,
};

pub use api::{ApiError, BillingApi};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "GST Billing Core";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
