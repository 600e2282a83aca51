// ==========================================
// GST Billing Core - External API Seam
// ==========================================
// Responsibility: the abstract billing REST backend this core commits to
// Only `create` operations are needed here; list/update/delete belong to
// the CRUD surfaces outside this core.
// ==========================================

pub mod client;
pub mod error;

pub use client::BillingApi;
pub use error::{ApiError, ApiResult};
