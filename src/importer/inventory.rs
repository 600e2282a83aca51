// ==========================================
// GST Billing Core - Inventory Row Transformer
// ==========================================
// Responsibility: one flat sheet row to one validated ProductRecord
// Required cells: product name, price, stock quantity
// ==========================================

use crate::config::ImportDefaults;
use crate::domain::ProductRecord;
use crate::importer::cell::CellCoercer;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::headers::{field, HeaderResolver};
use crate::importer::RawRow;
use chrono::{Local, Utc};
use uuid::Uuid;

pub struct InventoryRowTransformer<'a> {
    defaults: &'a ImportDefaults,
}

impl<'a> InventoryRowTransformer<'a> {
    pub fn new(defaults: &'a ImportDefaults) -> Self {
        Self { defaults }
    }

    /// Transform one raw row.
    ///
    /// `row_number` is the 1-based spreadsheet row (header row = 1, so the
    /// first data row is 2); it appears verbatim in error messages.
    pub fn transform(&self, row: &RawRow, row_number: usize) -> ImportResult<ProductRecord> {
        let name = HeaderResolver::resolve(row, field::NAME);
        let price_raw = HeaderResolver::resolve(row, field::PRICE);
        let stock_raw = HeaderResolver::resolve(row, field::STOCK);
        let sku = HeaderResolver::resolve(row, field::SKU);
        let category = HeaderResolver::resolve(row, field::CATEGORY);
        let unit = HeaderResolver::resolve(row, field::UNIT);
        let hsn_code = HeaderResolver::resolve(row, field::HSN_CODE);
        let gst_raw = HeaderResolver::resolve(row, field::GST_RATE);
        let supplier = HeaderResolver::resolve(row, field::SUPPLIER);

        if name.is_empty() || price_raw.is_empty() || stock_raw.is_empty() {
            return Err(ImportError::RowValidation {
                row: row_number,
                message: format!(
                    "Product Name, Price and Stock Quantity are required \
                     (found name=\"{name}\", price=\"{price_raw}\", stock=\"{stock_raw}\")"
                ),
            });
        }

        let price = CellCoercer::decimal(&price_raw).ok_or_else(|| ImportError::RowValidation {
            row: row_number,
            message: format!("Price is not a number: \"{price_raw}\""),
        })?;
        let stock = CellCoercer::integer(&stock_raw).ok_or_else(|| ImportError::RowValidation {
            row: row_number,
            message: format!("Stock Quantity is not a number: \"{stock_raw}\""),
        })?;

        // The default rate covers a genuinely empty cell only; non-empty
        // text that fails coercion is bad source data and fails the row.
        let gst_rate = if gst_raw.is_empty() {
            self.defaults.gst_rate
        } else {
            CellCoercer::integer(&gst_raw).ok_or_else(|| ImportError::RowValidation {
                row: row_number,
                message: format!("GST Rate is not a number: \"{gst_raw}\""),
            })?
        };

        if price < 0.0 {
            return Err(ImportError::RowValidation {
                row: row_number,
                message: format!("Price must not be negative: \"{price_raw}\""),
            });
        }
        if !(0..=100).contains(&gst_rate) {
            return Err(ImportError::RowValidation {
                row: row_number,
                message: format!("GST Rate must be between 0 and 100: \"{gst_raw}\""),
            });
        }

        let sku = if sku.is_empty() {
            generated_sku(row_number)
        } else {
            sku
        };

        Ok(ProductRecord {
            id: Uuid::new_v4().to_string(),
            name,
            sku,
            category: non_empty_or(category, &self.defaults.category),
            price,
            stock,
            min_stock: self.defaults.min_stock,
            unit: non_empty_or(unit, &self.defaults.unit),
            hsn_code,
            gst_rate,
            supplier,
            last_updated: Local::now().date_naive(),
        })
    }
}

/// Transform a whole parsed sheet, failing fast on the first bad row.
pub fn parse_inventory_rows(
    rows: &[RawRow],
    defaults: &ImportDefaults,
) -> ImportResult<Vec<ProductRecord>> {
    let transformer = InventoryRowTransformer::new(defaults);
    rows.iter()
        .enumerate()
        .map(|(idx, row)| transformer.transform(row, idx + 2))
        .collect()
}

/// Placeholder sku for rows without one: unique within one import batch,
/// not globally durable.
pub(crate) fn generated_sku(row_number: usize) -> String {
    format!("SKU-{}-{}", Utc::now().timestamp_millis(), row_number)
}

fn non_empty_or(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}
