// ==========================================
// GST Billing Core - Review Sessions
// ==========================================
// Responsibility: the per-import state machine between parse and commit
// States: Idle -> Staged -> (editing)* -> Validated -> Committing -> Closed
//         Staged -> Cancelled
// A failed validation or any mutation drops the session back to Staged.
// ==========================================

use crate::config::ImportDefaults;
use crate::domain::{InvoiceRecord, ProductRecord};
use crate::importer::invoice::InvoiceImportBundle;
use crate::staging::draft::{FieldErrors, InvoiceDraft, ProductDraft, Stageable};
use crate::staging::error::StagingError;

// ==========================================
// StageState
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    Idle,
    Staged,
    Validated,
    Committing,
    Closed,
    Cancelled,
}

impl StageState {
    pub fn name(&self) -> &'static str {
        match self {
            StageState::Idle => "idle",
            StageState::Staged => "staged",
            StageState::Validated => "validated",
            StageState::Committing => "committing",
            StageState::Closed => "closed",
            StageState::Cancelled => "cancelled",
        }
    }
}

// ==========================================
// StagedItem - one reviewable record
// ==========================================
#[derive(Debug, Clone)]
pub struct StagedItem<D> {
    pub draft: D,
    pub selected: bool,
    pub errors: FieldErrors,
}

impl<D> StagedItem<D> {
    fn new(draft: D) -> Self {
        Self {
            draft,
            selected: true, // pre-checked for import
            errors: FieldErrors::new(),
        }
    }
}

// ==========================================
// ReviewSession - single-collection session (inventory import)
// ==========================================
pub struct ReviewSession<D: Stageable> {
    state: StageState,
    items: Vec<StagedItem<D>>,
    general_error: Option<String>,
    defaults: ImportDefaults,
}

impl<D: Stageable> ReviewSession<D> {
    pub fn new(defaults: ImportDefaults) -> Self {
        Self {
            state: StageState::Idle,
            items: Vec::new(),
            general_error: None,
            defaults,
        }
    }

    pub fn state(&self) -> StageState {
        self.state
    }

    pub fn items(&self) -> &[StagedItem<D>] {
        &self.items
    }

    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    pub fn selected_count(&self) -> usize {
        self.items.iter().filter(|item| item.selected).count()
    }

    /// Stage a parsed batch. The drafts are working copies; the parsed
    /// records themselves are never mutated by the session.
    pub fn stage(&mut self, drafts: Vec<D>) -> Result<(), StagingError> {
        self.ensure_state(StageState::Idle, "stage")?;
        self.items = drafts.into_iter().map(StagedItem::new).collect();
        self.general_error = None;
        self.state = StageState::Staged;
        Ok(())
    }

    /// Overwrite one field of one staged item, clearing only that
    /// item+field's previous error.
    pub fn edit_field(
        &mut self,
        index: usize,
        field: &str,
        value: &str,
    ) -> Result<(), StagingError> {
        self.ensure_mutable("edit")?;
        let item = self
            .items
            .get_mut(index)
            .ok_or(StagingError::UnknownIndex(index))?;
        item.draft.set_field(field, value)?;
        item.errors.remove(field);
        Ok(())
    }

    pub fn set_selected(&mut self, index: usize, selected: bool) -> Result<(), StagingError> {
        self.ensure_mutable("select")?;
        let item = self
            .items
            .get_mut(index)
            .ok_or(StagingError::UnknownIndex(index))?;
        item.selected = selected;
        Ok(())
    }

    pub fn select_all(&mut self, selected: bool) -> Result<(), StagingError> {
        self.ensure_mutable("select")?;
        for item in &mut self.items {
            item.selected = selected;
        }
        Ok(())
    }

    /// Commit-attempt validation over the current edited values of every
    /// staged item (selected or not). On failure the session stays Staged
    /// with per-field errors populated.
    pub fn validate(&mut self) -> Result<(), StagingError> {
        self.ensure_state(StageState::Staged, "validate")?;

        let mut any_errors = false;
        for item in &mut self.items {
            item.errors = item.draft.validate();
            any_errors |= !item.errors.is_empty();
        }
        if any_errors {
            return Err(StagingError::ValidationFailed);
        }

        if self.selected_count() == 0 {
            self.general_error = Some("Please select at least one item to import".to_string());
            return Err(StagingError::NothingSelected);
        }

        self.general_error = None;
        self.state = StageState::Validated;
        Ok(())
    }

    /// Finalize the selected drafts for commit, in original order. String
    /// fields are coerced to their final types here and nowhere earlier.
    pub fn begin_commit(&mut self) -> Result<Vec<D::Output>, StagingError> {
        self.ensure_state(StageState::Validated, "commit")?;
        self.state = StageState::Committing;
        Ok(self
            .items
            .iter()
            .filter(|item| item.selected)
            .map(|item| item.draft.finalize(&self.defaults))
            .collect())
    }

    pub fn finish_commit(&mut self) -> Result<(), StagingError> {
        self.ensure_state(StageState::Committing, "close")?;
        self.items.clear();
        self.state = StageState::Closed;
        Ok(())
    }

    /// Discard the staged copy. No effect on anything already persisted.
    pub fn cancel(&mut self) -> Result<(), StagingError> {
        match self.state {
            StageState::Idle | StageState::Staged | StageState::Validated => {
                self.items.clear();
                self.general_error = None;
                self.state = StageState::Cancelled;
                Ok(())
            }
            other => Err(StagingError::InvalidState {
                state: other.name(),
                action: "cancel",
            }),
        }
    }

    fn ensure_state(&self, expected: StageState, action: &'static str) -> Result<(), StagingError> {
        if self.state != expected {
            return Err(StagingError::InvalidState {
                state: self.state.name(),
                action,
            });
        }
        Ok(())
    }

    // Edits and selection are allowed while Staged; doing either after a
    // successful validation drops back to Staged so commit re-validates.
    fn ensure_mutable(&mut self, action: &'static str) -> Result<(), StagingError> {
        match self.state {
            StageState::Staged => Ok(()),
            StageState::Validated => {
                self.state = StageState::Staged;
                Ok(())
            }
            other => Err(StagingError::InvalidState {
                state: other.name(),
                action,
            }),
        }
    }
}

// ==========================================
// InvoiceReviewSession - invoices plus derived products together
// ==========================================
// The invoice import confirms two collections in one session; the
// zero-selected rule spans both.
pub struct InvoiceReviewSession {
    state: StageState,
    invoices: Vec<StagedItem<InvoiceDraft>>,
    products: Vec<StagedItem<ProductDraft>>,
    general_error: Option<String>,
    defaults: ImportDefaults,
}

impl InvoiceReviewSession {
    pub fn new(defaults: ImportDefaults) -> Self {
        Self {
            state: StageState::Idle,
            invoices: Vec::new(),
            products: Vec::new(),
            general_error: None,
            defaults,
        }
    }

    pub fn state(&self) -> StageState {
        self.state
    }

    pub fn invoices(&self) -> &[StagedItem<InvoiceDraft>] {
        &self.invoices
    }

    pub fn products(&self) -> &[StagedItem<ProductDraft>] {
        &self.products
    }

    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    pub fn selected_count(&self) -> usize {
        self.invoices.iter().filter(|i| i.selected).count()
            + self.products.iter().filter(|p| p.selected).count()
    }

    pub fn stage(&mut self, bundle: &InvoiceImportBundle) -> Result<(), StagingError> {
        self.ensure_state(StageState::Idle, "stage")?;
        self.invoices = bundle
            .invoices
            .iter()
            .map(|record| StagedItem::new(InvoiceDraft::from(record)))
            .collect();
        self.products = bundle
            .products
            .iter()
            .map(|record| StagedItem::new(ProductDraft::from(record)))
            .collect();
        self.general_error = None;
        self.state = StageState::Staged;
        Ok(())
    }

    pub fn edit_invoice_field(
        &mut self,
        index: usize,
        field: &str,
        value: &str,
    ) -> Result<(), StagingError> {
        self.ensure_mutable("edit")?;
        let item = self
            .invoices
            .get_mut(index)
            .ok_or(StagingError::UnknownIndex(index))?;
        item.draft.set_field(field, value)?;
        item.errors.remove(field);
        Ok(())
    }

    pub fn edit_invoice_item_field(
        &mut self,
        index: usize,
        item_idx: usize,
        field: &str,
        value: &str,
    ) -> Result<(), StagingError> {
        self.ensure_mutable("edit")?;
        let item = self
            .invoices
            .get_mut(index)
            .ok_or(StagingError::UnknownIndex(index))?;
        item.draft.set_item_field(item_idx, field, value)?;
        item.errors.remove(&format!("items[{item_idx}].{field}"));
        Ok(())
    }

    pub fn edit_product_field(
        &mut self,
        index: usize,
        field: &str,
        value: &str,
    ) -> Result<(), StagingError> {
        self.ensure_mutable("edit")?;
        let item = self
            .products
            .get_mut(index)
            .ok_or(StagingError::UnknownIndex(index))?;
        item.draft.set_field(field, value)?;
        item.errors.remove(field);
        Ok(())
    }

    pub fn set_invoice_selected(
        &mut self,
        index: usize,
        selected: bool,
    ) -> Result<(), StagingError> {
        self.ensure_mutable("select")?;
        self.invoices
            .get_mut(index)
            .ok_or(StagingError::UnknownIndex(index))?
            .selected = selected;
        Ok(())
    }

    pub fn set_product_selected(
        &mut self,
        index: usize,
        selected: bool,
    ) -> Result<(), StagingError> {
        self.ensure_mutable("select")?;
        self.products
            .get_mut(index)
            .ok_or(StagingError::UnknownIndex(index))?
            .selected = selected;
        Ok(())
    }

    pub fn select_all_invoices(&mut self, selected: bool) -> Result<(), StagingError> {
        self.ensure_mutable("select")?;
        for item in &mut self.invoices {
            item.selected = selected;
        }
        Ok(())
    }

    pub fn select_all_products(&mut self, selected: bool) -> Result<(), StagingError> {
        self.ensure_mutable("select")?;
        for item in &mut self.products {
            item.selected = selected;
        }
        Ok(())
    }

    pub fn validate(&mut self) -> Result<(), StagingError> {
        self.ensure_state(StageState::Staged, "validate")?;

        let mut any_errors = false;
        for item in &mut self.invoices {
            item.errors = item.draft.validate();
            any_errors |= !item.errors.is_empty();
        }
        for item in &mut self.products {
            item.errors = item.draft.validate();
            any_errors |= !item.errors.is_empty();
        }
        if any_errors {
            return Err(StagingError::ValidationFailed);
        }

        if self.selected_count() == 0 {
            self.general_error =
                Some("Please select at least one invoice or product to import".to_string());
            return Err(StagingError::NothingSelected);
        }

        self.general_error = None;
        self.state = StageState::Validated;
        Ok(())
    }

    pub fn begin_commit(
        &mut self,
    ) -> Result<(Vec<InvoiceRecord>, Vec<ProductRecord>), StagingError> {
        self.ensure_state(StageState::Validated, "commit")?;
        self.state = StageState::Committing;

        let invoices = self
            .invoices
            .iter()
            .filter(|item| item.selected)
            .map(|item| item.draft.finalize(&self.defaults))
            .collect();
        let products = self
            .products
            .iter()
            .filter(|item| item.selected)
            .map(|item| item.draft.finalize(&self.defaults))
            .collect();
        Ok((invoices, products))
    }

    pub fn finish_commit(&mut self) -> Result<(), StagingError> {
        self.ensure_state(StageState::Committing, "close")?;
        self.invoices.clear();
        self.products.clear();
        self.state = StageState::Closed;
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), StagingError> {
        match self.state {
            StageState::Idle | StageState::Staged | StageState::Validated => {
                self.invoices.clear();
                self.products.clear();
                self.general_error = None;
                self.state = StageState::Cancelled;
                Ok(())
            }
            other => Err(StagingError::InvalidState {
                state: other.name(),
                action: "cancel",
            }),
        }
    }

    fn ensure_state(&self, expected: StageState, action: &'static str) -> Result<(), StagingError> {
        if self.state != expected {
            return Err(StagingError::InvalidState {
                state: self.state.name(),
                action,
            });
        }
        Ok(())
    }

    fn ensure_mutable(&mut self, action: &'static str) -> Result<(), StagingError> {
        match self.state {
            StageState::Staged => Ok(()),
            StageState::Validated => {
                self.state = StageState::Staged;
                Ok(())
            }
            other => Err(StagingError::InvalidState {
                state: other.name(),
                action,
            }),
        }
    }
}
