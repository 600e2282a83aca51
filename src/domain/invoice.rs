// ==========================================
// GST Billing Core - Invoice Domain Model
// ==========================================
// Responsibility: invoice record with nested line items, as grouped from
// flat spreadsheet rows by the invoice importer
// ==========================================

use crate::domain::types::InvoiceStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// InvoiceLineItem - one line of an invoice
// ==========================================
// amount is always derived as quantity * unit_price, never supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineItem {
    pub product_ref: String, // sku, or generated id when the sheet had none
    pub name: String,
    pub quantity: i64, // >= 1
    pub unit_price: f64,
    pub unit: String,
    pub hsn_code: String,
    pub gst_rate: i64,
    pub amount: f64, // derived: quantity * unit_price
}

impl InvoiceLineItem {
    /// Recompute the derived amount from the current quantity and price.
    pub fn derive_amount(&mut self) {
        self.amount = self.quantity as f64 * self.unit_price;
    }
}

// ==========================================
// InvoiceRecord - grouped invoice
// ==========================================
// One record per distinct invoice number in a source file. Header-level
// fields come from the first contributing row; later rows with the same
// invoice number only append line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    // ===== Identity =====
    pub id: String, // UUID, unique within one import batch
    pub invoice_number: String,

    // ===== Customer (first row wins) =====
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub customer_gstin: Option<String>,

    // ===== Dates =====
    pub date: NaiveDate,
    pub due_date: NaiveDate, // defaults to date + 30 days

    // ===== Line items (append order = source row order) =====
    pub items: Vec<InvoiceLineItem>,

    // ===== Misc =====
    pub notes: Option<String>,
    pub status: InvoiceStatus, // always Draft at import time

    // ===== Derived totals (Totals Calculator) =====
    pub subtotal: f64,     // sum of item amounts
    pub tax_amount: f64,   // sum of amount * gst_rate / 100
    pub total_amount: f64, // subtotal + tax_amount
}
