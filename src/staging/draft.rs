// ==========================================
// GST Billing Core - Staged Drafts
// ==========================================
// Responsibility: string-typed, field-editable working copies of parsed
// records
// Numeric cells stay strings while the user edits; coercion back to final
// types happens once, at the commit boundary.
// ==========================================

use crate::config::ImportDefaults;
use crate::domain::{InvoiceLineItem, InvoiceRecord, InvoiceStatus, ProductRecord};
use crate::staging::error::StagingError;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Per-field validation messages, keyed by editable field name.
pub type FieldErrors = BTreeMap<String, String>;

const DATE_FORMAT: &str = "%Y-%m-%d";

// ==========================================
// Stageable - the seam between session and draft
// ==========================================
pub trait Stageable: Clone {
    /// The committed record type this draft finalizes into.
    type Output;

    /// Overwrite one named field with raw user input.
    fn set_field(&mut self, field: &str, value: &str) -> Result<(), StagingError>;

    /// Commit-time checks against the current edited values. A superset of
    /// the import-time checks: a record can pass import yet fail here after
    /// a bad edit, never the other way around.
    fn validate(&self) -> FieldErrors;

    /// Coerce the edited strings into the final record. Only called after
    /// `validate` returned no errors.
    fn finalize(&self, defaults: &ImportDefaults) -> Self::Output;
}

// ==========================================
// ProductDraft
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub price: String,
    pub stock: String,
    pub min_stock: String,
    pub unit: String,
    pub hsn_code: String,
    pub gst_rate: String,
    pub supplier: String,
    pub last_updated: NaiveDate,
}

impl From<&ProductRecord> for ProductDraft {
    fn from(record: &ProductRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            sku: record.sku.clone(),
            category: record.category.clone(),
            price: fmt_decimal(record.price),
            stock: record.stock.to_string(),
            min_stock: record.min_stock.to_string(),
            unit: record.unit.clone(),
            hsn_code: record.hsn_code.clone(),
            gst_rate: record.gst_rate.to_string(),
            supplier: record.supplier.clone(),
            last_updated: record.last_updated,
        }
    }
}

impl Stageable for ProductDraft {
    type Output = ProductRecord;

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), StagingError> {
        let slot = match field {
            "name" => &mut self.name,
            "sku" => &mut self.sku,
            "category" => &mut self.category,
            "price" => &mut self.price,
            "stock" => &mut self.stock,
            "min_stock" => &mut self.min_stock,
            "unit" => &mut self.unit,
            "hsn_code" => &mut self.hsn_code,
            "gst_rate" => &mut self.gst_rate,
            "supplier" => &mut self.supplier,
            other => return Err(StagingError::UnknownField(other.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.insert("name".to_string(), "Product name is required".to_string());
        }

        match self.price.trim().parse::<f64>() {
            Ok(price) if price > 0.0 => {}
            _ => {
                errors.insert("price".to_string(), "Valid price is required".to_string());
            }
        }

        match self.stock.trim().parse::<i64>() {
            Ok(stock) if stock >= 0 => {}
            _ => {
                errors.insert(
                    "stock".to_string(),
                    "Valid stock quantity is required".to_string(),
                );
            }
        }

        match self.gst_rate.trim().parse::<i64>() {
            Ok(rate) if rate >= 0 => {}
            _ => {
                errors.insert(
                    "gst_rate".to_string(),
                    "Valid GST rate is required".to_string(),
                );
            }
        }

        errors
    }

    fn finalize(&self, defaults: &ImportDefaults) -> ProductRecord {
        ProductRecord {
            id: self.id.clone(),
            name: self.name.trim().to_string(),
            sku: self.sku.trim().to_string(),
            category: self.category.trim().to_string(),
            price: self.price.trim().parse().unwrap_or(0.0),
            stock: self.stock.trim().parse().unwrap_or(0),
            // blank min_stock falls back to the configured default
            min_stock: self
                .min_stock
                .trim()
                .parse()
                .unwrap_or(defaults.min_stock),
            unit: self.unit.trim().to_string(),
            hsn_code: self.hsn_code.trim().to_string(),
            gst_rate: self.gst_rate.trim().parse().unwrap_or(defaults.gst_rate),
            supplier: self.supplier.trim().to_string(),
            last_updated: self.last_updated,
        }
    }
}

// ==========================================
// LineItemDraft
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemDraft {
    pub product_ref: String,
    pub name: String,
    pub quantity: String,
    pub unit_price: String,
    pub unit: String,
    pub hsn_code: String,
    pub gst_rate: String,
}

impl From<&InvoiceLineItem> for LineItemDraft {
    fn from(item: &InvoiceLineItem) -> Self {
        Self {
            product_ref: item.product_ref.clone(),
            name: item.name.clone(),
            quantity: item.quantity.to_string(),
            unit_price: fmt_decimal(item.unit_price),
            unit: item.unit.clone(),
            hsn_code: item.hsn_code.clone(),
            gst_rate: item.gst_rate.to_string(),
        }
    }
}

impl LineItemDraft {
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), StagingError> {
        let slot = match field {
            "name" => &mut self.name,
            "quantity" => &mut self.quantity,
            "unit_price" => &mut self.unit_price,
            "unit" => &mut self.unit,
            "hsn_code" => &mut self.hsn_code,
            "gst_rate" => &mut self.gst_rate,
            other => return Err(StagingError::UnknownField(other.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }

    fn validate_into(&self, idx: usize, errors: &mut FieldErrors) {
        match self.quantity.trim().parse::<i64>() {
            Ok(q) if q >= 1 => {}
            _ => {
                errors.insert(
                    format!("items[{idx}].quantity"),
                    "Valid quantity is required".to_string(),
                );
            }
        }
        if self.unit_price.trim().parse::<f64>().map_or(true, |p| p < 0.0) {
            errors.insert(
                format!("items[{idx}].unit_price"),
                "Valid price is required".to_string(),
            );
        }
        if self.gst_rate.trim().parse::<i64>().map_or(true, |r| r < 0) {
            errors.insert(
                format!("items[{idx}].gst_rate"),
                "Valid GST rate is required".to_string(),
            );
        }
    }

    fn finalize(&self, defaults: &ImportDefaults) -> InvoiceLineItem {
        let mut item = InvoiceLineItem {
            product_ref: self.product_ref.clone(),
            name: self.name.trim().to_string(),
            quantity: self.quantity.trim().parse().unwrap_or(defaults.quantity),
            unit_price: self.unit_price.trim().parse().unwrap_or(0.0),
            unit: self.unit.trim().to_string(),
            hsn_code: self.hsn_code.trim().to_string(),
            gst_rate: self.gst_rate.trim().parse().unwrap_or(defaults.gst_rate),
            amount: 0.0,
        };
        item.derive_amount();
        item
    }
}

// ==========================================
// InvoiceDraft
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    pub id: String,
    pub invoice_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_gstin: String,
    pub date: String,
    pub due_date: String,
    pub items: Vec<LineItemDraft>,
    pub notes: String,
    pub status: InvoiceStatus,
}

impl From<&InvoiceRecord> for InvoiceDraft {
    fn from(record: &InvoiceRecord) -> Self {
        Self {
            id: record.id.clone(),
            invoice_number: record.invoice_number.clone(),
            customer_name: record.customer_name.clone(),
            customer_email: record.customer_email.clone().unwrap_or_default(),
            customer_phone: record.customer_phone.clone().unwrap_or_default(),
            customer_address: record.customer_address.clone().unwrap_or_default(),
            customer_gstin: record.customer_gstin.clone().unwrap_or_default(),
            date: record.date.format(DATE_FORMAT).to_string(),
            due_date: record.due_date.format(DATE_FORMAT).to_string(),
            items: record.items.iter().map(LineItemDraft::from).collect(),
            notes: record.notes.clone().unwrap_or_default(),
            status: record.status,
        }
    }
}

impl InvoiceDraft {
    pub fn set_item_field(
        &mut self,
        item_idx: usize,
        field: &str,
        value: &str,
    ) -> Result<(), StagingError> {
        let item = self
            .items
            .get_mut(item_idx)
            .ok_or(StagingError::UnknownIndex(item_idx))?;
        item.set_field(field, value)
    }
}

impl Stageable for InvoiceDraft {
    type Output = InvoiceRecord;

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), StagingError> {
        let slot = match field {
            "invoice_number" => &mut self.invoice_number,
            "customer_name" => &mut self.customer_name,
            "customer_email" => &mut self.customer_email,
            "customer_phone" => &mut self.customer_phone,
            "customer_address" => &mut self.customer_address,
            "customer_gstin" => &mut self.customer_gstin,
            "date" => &mut self.date,
            "due_date" => &mut self.due_date,
            "notes" => &mut self.notes,
            other => return Err(StagingError::UnknownField(other.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.invoice_number.trim().is_empty() {
            errors.insert(
                "invoice_number".to_string(),
                "Invoice number is required".to_string(),
            );
        }
        if self.customer_name.trim().is_empty() {
            errors.insert(
                "customer_name".to_string(),
                "Customer name is required".to_string(),
            );
        }
        if self.date.trim().is_empty() {
            errors.insert("date".to_string(), "Invoice date is required".to_string());
        } else if parse_draft_date(&self.date).is_none() {
            errors.insert("date".to_string(), "Valid invoice date is required".to_string());
        }
        if !self.due_date.trim().is_empty() && parse_draft_date(&self.due_date).is_none() {
            errors.insert(
                "due_date".to_string(),
                "Valid due date is required".to_string(),
            );
        }

        for (idx, item) in self.items.iter().enumerate() {
            item.validate_into(idx, &mut errors);
        }

        errors
    }

    fn finalize(&self, defaults: &ImportDefaults) -> InvoiceRecord {
        let date = parse_draft_date(&self.date).unwrap_or_default();
        let due_date = parse_draft_date(&self.due_date)
            .unwrap_or_else(|| date + chrono::Duration::days(defaults.due_in_days));

        let mut record = InvoiceRecord {
            id: self.id.clone(),
            invoice_number: self.invoice_number.trim().to_string(),
            customer_name: self.customer_name.trim().to_string(),
            customer_email: none_if_blank(&self.customer_email),
            customer_phone: none_if_blank(&self.customer_phone),
            customer_address: none_if_blank(&self.customer_address),
            customer_gstin: none_if_blank(&self.customer_gstin),
            date,
            due_date,
            items: self
                .items
                .iter()
                .map(|item| item.finalize(defaults))
                .collect(),
            notes: none_if_blank(&self.notes),
            status: self.status,
            subtotal: 0.0,
            tax_amount: 0.0,
            total_amount: 0.0,
        };
        crate::importer::totals::apply_totals(&mut record);
        record
    }
}

fn parse_draft_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

fn none_if_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Render a stored decimal back to an editable string without a trailing
/// ".0" on whole amounts.
fn fmt_decimal(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
