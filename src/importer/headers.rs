// ==========================================
// GST Billing Core - Header Resolution
// ==========================================
// Responsibility: map the column headers a sheet actually carries onto
// canonical schema fields
// New synonyms are additive data in SYNONYMS, not new code paths.
// ==========================================

use crate::importer::RawRow;

/// Canonical field names used by the transformers.
pub mod field {
    pub const NAME: &str = "name";
    pub const SKU: &str = "sku";
    pub const CATEGORY: &str = "category";
    pub const PRICE: &str = "price";
    pub const STOCK: &str = "stock";
    pub const UNIT: &str = "unit";
    pub const HSN_CODE: &str = "hsn_code";
    pub const GST_RATE: &str = "gst_rate";
    pub const SUPPLIER: &str = "supplier";
    pub const INVOICE_NUMBER: &str = "invoice_number";
    pub const CUSTOMER_NAME: &str = "customer_name";
    pub const CUSTOMER_EMAIL: &str = "customer_email";
    pub const CUSTOMER_PHONE: &str = "customer_phone";
    pub const CUSTOMER_ADDRESS: &str = "customer_address";
    pub const CUSTOMER_GSTIN: &str = "customer_gstin";
    pub const INVOICE_DATE: &str = "invoice_date";
    pub const DUE_DATE: &str = "due_date";
    pub const QUANTITY: &str = "quantity";
    pub const NOTES: &str = "notes";
}

// Ordered spelling lists per canonical field. Earlier spellings win; the
// starred variants are the ones our own templates emit. Matching is
// case-insensitive, so the lists only need to cover wording variants.
const SYNONYMS: &[(&str, &[&str])] = &[
    (field::NAME, &["Product Name *", "Product Name", "Name", "Product"]),
    (field::PRICE, &["Price *", "Price", "Unit Price"]),
    (field::STOCK, &["Stock Quantity *", "Stock Quantity", "Stock"]),
    (field::SKU, &["SKU", "Code"]),
    (field::CATEGORY, &["Category"]),
    (field::UNIT, &["Unit"]),
    (field::HSN_CODE, &["HSN Code", "HSN"]),
    (field::GST_RATE, &["GST Rate (%)", "GST Rate", "GST"]),
    (field::SUPPLIER, &["Supplier"]),
    (
        field::INVOICE_NUMBER,
        &["Invoice Number *", "Invoice Number", "Invoice"],
    ),
    (
        field::CUSTOMER_NAME,
        &["Customer Name *", "Customer Name", "Customer"],
    ),
    (field::CUSTOMER_EMAIL, &["Customer Email", "Email"]),
    (field::CUSTOMER_PHONE, &["Customer Phone", "Phone"]),
    (field::CUSTOMER_ADDRESS, &["Customer Address", "Address"]),
    (field::CUSTOMER_GSTIN, &["Customer GSTIN", "GSTIN"]),
    (
        field::INVOICE_DATE,
        &["Invoice Date *", "Invoice Date", "Date"],
    ),
    (field::DUE_DATE, &["Due Date", "DueDate"]),
    (
        // Invoice sheets reuse the inventory stock column for the line
        // quantity, so both spellings must resolve.
        field::QUANTITY,
        &["Stock Quantity *", "Stock Quantity", "Stock", "Quantity"],
    ),
    (field::NOTES, &["Notes", "Note"]),
];

pub struct HeaderResolver;

impl HeaderResolver {
    /// Resolve a canonical field against one raw row.
    ///
    /// Probes the field's spelling list in order and returns the first
    /// non-empty (after trim) cell value. Header comparison is
    /// case-insensitive. Returns an empty string when nothing matches;
    /// required-field policy is the caller's concern.
    pub fn resolve(row: &RawRow, field: &str) -> String {
        for spelling in Self::spellings(field) {
            // exact key first, then a case-insensitive scan
            if let Some(value) = row.get(*spelling) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
            }
            for (key, value) in row {
                if key.trim().eq_ignore_ascii_case(spelling) {
                    let trimmed = value.trim();
                    if !trimmed.is_empty() {
                        return trimmed.to_string();
                    }
                }
            }
        }
        String::new()
    }

    fn spellings(field: &str) -> &'static [&'static str] {
        SYNONYMS
            .iter()
            .find(|(canonical, _)| *canonical == field)
            .map(|(_, spellings)| *spellings)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_starred_header() {
        let r = row(&[("Product Name *", "Widget")]);
        assert_eq!(HeaderResolver::resolve(&r, field::NAME), "Widget");
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        for spelling in ["Price", "price", "PRICE", "unit price", "Unit Price"] {
            let r = row(&[(spelling, "100")]);
            assert_eq!(
                HeaderResolver::resolve(&r, field::PRICE),
                "100",
                "spelling {spelling:?} should resolve"
            );
        }
    }

    #[test]
    fn test_resolve_prefers_earlier_spelling() {
        let r = row(&[("Price *", "10"), ("Unit Price", "99")]);
        assert_eq!(HeaderResolver::resolve(&r, field::PRICE), "10");
    }

    #[test]
    fn test_resolve_skips_empty_cells() {
        let r = row(&[("Price *", "   "), ("Unit Price", "99")]);
        assert_eq!(HeaderResolver::resolve(&r, field::PRICE), "99");
    }

    #[test]
    fn test_resolve_missing_returns_empty() {
        let r = row(&[("Something Else", "x")]);
        assert_eq!(HeaderResolver::resolve(&r, field::PRICE), "");
    }

    #[test]
    fn test_quantity_accepts_both_stock_and_quantity() {
        let r = row(&[("Quantity", "4")]);
        assert_eq!(HeaderResolver::resolve(&r, field::QUANTITY), "4");
        let r = row(&[("Stock Quantity *", "7")]);
        assert_eq!(HeaderResolver::resolve(&r, field::QUANTITY), "7");
    }
}
