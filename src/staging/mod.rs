// ==========================================
// GST Billing Core - Review/Edit Staging
// ==========================================
// Responsibility: the editable holding area between parse and commit
// Staged drafts are deep copies; edits never touch the parsed batch.
// ==========================================

pub mod commit;
pub mod draft;
pub mod error;
pub mod session;

pub use commit::{commit_invoice_batch, commit_products, CommitFailure, CommitReport};
pub use draft::{FieldErrors, InvoiceDraft, LineItemDraft, ProductDraft, Stageable};
pub use error::StagingError;
pub use session::{InvoiceReviewSession, ReviewSession, StageState, StagedItem};
