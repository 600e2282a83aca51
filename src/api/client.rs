// ==========================================
// GST Billing Core - Billing API Trait
// ==========================================
// Responsibility: define the create interface the commit loop calls
// (no implementation; transports live outside this core)
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::{InvoiceRecord, ProductRecord};
use async_trait::async_trait;

// ==========================================
// BillingApi Trait
// ==========================================
// The commit loop issues one call per confirmed record, sequentially, in
// staged order. Implementations own the durable lifecycle of records they
// accept.
#[async_trait]
pub trait BillingApi: Send + Sync {
    /// Persist one product. Returns the record as stored (the backend may
    /// assign its own id).
    async fn create_product(&self, product: &ProductRecord) -> ApiResult<ProductRecord>;

    /// Persist one invoice with its line items.
    async fn create_invoice(&self, invoice: &InvoiceRecord) -> ApiResult<InvoiceRecord>;
}
