// ==========================================
// GST Billing Core - Import Defaults
// ==========================================
// Responsibility: the documented fallback values applied during import
// Passed by reference into the transformer, grouper and staging sessions;
// never read from ambient global state.
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ImportDefaults - fallbacks for absent optional cells
// ==========================================
// Defaults apply only to genuinely empty cells. A non-empty cell that fails
// coercion is a validation error, not a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportDefaults {
    /// GST percentage when the rate column is empty.
    pub gst_rate: i64,
    /// Low-stock threshold for imported products.
    pub min_stock: i64,
    /// Unit of measure when the unit column is empty.
    pub unit: String,
    /// Category when the category column is empty.
    pub category: String,
    /// Quantity for invoice lines with an empty quantity column.
    pub quantity: i64,
    /// Days added to the invoice date when the due date column is empty.
    pub due_in_days: i64,
    /// Supplier recorded on products derived from invoice line items.
    pub derived_supplier: String,
}

impl Default for ImportDefaults {
    fn default() -> Self {
        Self {
            gst_rate: 18,
            min_stock: 5,
            unit: "piece".to_string(),
            category: "General".to_string(),
            quantity: 1,
            due_in_days: 30,
            derived_supplier: "Imported".to_string(),
        }
    }
}

impl ImportDefaults {
    /// Load defaults from a JSON file, falling back to the built-ins for
    /// any key the file omits.
    pub fn from_json_file(path: &std::path::Path) -> Result<Self, anyhow::Error> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults() {
        let d = ImportDefaults::default();
        assert_eq!(d.gst_rate, 18);
        assert_eq!(d.min_stock, 5);
        assert_eq!(d.unit, "piece");
        assert_eq!(d.category, "General");
        assert_eq!(d.quantity, 1);
        assert_eq!(d.due_in_days, 30);
    }

    #[test]
    fn test_partial_json_keeps_builtins() {
        let d: ImportDefaults = serde_json::from_str(r#"{"gst_rate": 12}"#).unwrap();
        assert_eq!(d.gst_rate, 12);
        assert_eq!(d.min_stock, 5);
        assert_eq!(d.unit, "piece");
    }
}
