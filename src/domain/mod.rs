// ==========================================
// GST Billing Core - Domain Layer
// ==========================================
// Responsibility: billing entities shared by importer, staging and exporter
// ==========================================

pub mod invoice;
pub mod product;
pub mod types;

pub use invoice::{InvoiceLineItem, InvoiceRecord};
pub use product::ProductRecord;
pub use types::InvoiceStatus;
