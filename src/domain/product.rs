// ==========================================
// GST Billing Core - Product Domain Model
// ==========================================
// Responsibility: inventory product record produced by the import pipeline
// Serialized with the field names the billing REST API expects (camelCase)
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ProductRecord - inventory master record
// ==========================================
// Written by the importer, edited in staging, handed to the external API on
// commit. price and stock are mandatory at import time; their absence is a
// validation failure, never a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    // ===== Identity =====
    pub id: String,  // UUID, unique within one import batch
    pub name: String,
    pub sku: String, // supplied, or generated placeholder when blank

    // ===== Classification =====
    pub category: String, // defaults to "General"

    // ===== Pricing and stock =====
    pub price: f64,     // >= 0, mandatory
    pub stock: i64,     // >= 0, mandatory
    pub min_stock: i64, // low-stock threshold, defaults to 5

    // ===== Tax fields (opaque, no tax-law logic) =====
    pub unit: String, // defaults to "piece"
    pub hsn_code: String,
    pub gst_rate: i64, // percent, 0..=100, defaults to 18

    // ===== Sourcing =====
    pub supplier: String,

    // ===== Audit =====
    pub last_updated: NaiveDate,
}
