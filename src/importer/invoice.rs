// ==========================================
// GST Billing Core - Invoice Row Grouper
// ==========================================
// Responsibility: accumulate flat rows sharing an invoice number into
// nested invoice records, and derive inventory products from the line
// items in the same pass
// Required cells per row: invoice number, customer name, product name,
// invoice date
// ==========================================

use crate::config::ImportDefaults;
use crate::domain::{InvoiceLineItem, InvoiceRecord, InvoiceStatus, ProductRecord};
use crate::importer::cell::CellCoercer;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::headers::{field, HeaderResolver};
use crate::importer::inventory::generated_sku;
use crate::importer::{totals, RawRow};
use chrono::{Duration, Local, NaiveDate};
use std::collections::HashMap;
use uuid::Uuid;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

// ==========================================
// InvoiceRowFacts - one validated, coerced row
// ==========================================
// Intermediate between raw rows and grouped records, so grouping and
// product derivation can stay pure and independently testable.
#[derive(Debug, Clone)]
pub struct InvoiceRowFacts {
    pub row_number: usize,
    pub invoice_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_gstin: String,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub product_name: String,
    pub sku: String, // generated when the sheet had none
    pub category: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub unit: String,
    pub hsn_code: String,
    pub gst_rate: i64,
    pub supplier: String,
    pub notes: String,
}

#[derive(Debug)]
pub struct InvoiceImportBundle {
    pub invoices: Vec<InvoiceRecord>,
    pub products: Vec<ProductRecord>,
}

// ==========================================
// InvoiceRowGrouper
// ==========================================
pub struct InvoiceRowGrouper<'a> {
    defaults: &'a ImportDefaults,
}

impl<'a> InvoiceRowGrouper<'a> {
    pub fn new(defaults: &'a ImportDefaults) -> Self {
        Self { defaults }
    }

    /// Group a whole parsed sheet.
    ///
    /// Fails fast: the first row that fails validation aborts the import,
    /// no partial bundle is returned.
    pub fn group(&self, rows: &[RawRow]) -> ImportResult<InvoiceImportBundle> {
        let facts = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.extract_facts(row, idx + 2))
            .collect::<ImportResult<Vec<_>>>()?;

        let mut invoices = group_invoices(&facts);
        for invoice in &mut invoices {
            totals::apply_totals(invoice);
        }

        let products = derive_products(&facts, self.defaults);

        Ok(InvoiceImportBundle { invoices, products })
    }

    /// Resolve, validate and coerce one row.
    fn extract_facts(&self, row: &RawRow, row_number: usize) -> ImportResult<InvoiceRowFacts> {
        let invoice_number = HeaderResolver::resolve(row, field::INVOICE_NUMBER);
        let customer_name = HeaderResolver::resolve(row, field::CUSTOMER_NAME);
        let product_name = HeaderResolver::resolve(row, field::NAME);
        let date_raw = HeaderResolver::resolve(row, field::INVOICE_DATE);

        if invoice_number.is_empty()
            || customer_name.is_empty()
            || product_name.is_empty()
            || date_raw.is_empty()
        {
            return Err(ImportError::RowValidation {
                row: row_number,
                message: format!(
                    "Invoice Number, Customer Name, Product Name and Invoice Date are required \
                     (found invoice=\"{invoice_number}\", customer=\"{customer_name}\", \
                     product=\"{product_name}\", date=\"{date_raw}\")"
                ),
            });
        }

        let date = parse_date(&date_raw).ok_or_else(|| ImportError::RowValidation {
            row: row_number,
            message: format!("Invoice Date is not a recognized date: \"{date_raw}\""),
        })?;

        let due_raw = HeaderResolver::resolve(row, field::DUE_DATE);
        let due_date = if due_raw.is_empty() {
            date + Duration::days(self.defaults.due_in_days)
        } else {
            parse_date(&due_raw).ok_or_else(|| ImportError::RowValidation {
                row: row_number,
                message: format!("Due Date is not a recognized date: \"{due_raw}\""),
            })?
        };

        let quantity_raw = HeaderResolver::resolve(row, field::QUANTITY);
        let quantity = if quantity_raw.is_empty() {
            self.defaults.quantity
        } else {
            CellCoercer::integer(&quantity_raw).ok_or_else(|| ImportError::RowValidation {
                row: row_number,
                message: format!("Quantity is not a number: \"{quantity_raw}\""),
            })?
        };

        let price_raw = HeaderResolver::resolve(row, field::PRICE);
        let unit_price = if price_raw.is_empty() {
            0.0
        } else {
            CellCoercer::decimal(&price_raw).ok_or_else(|| ImportError::RowValidation {
                row: row_number,
                message: format!("Price is not a number: \"{price_raw}\""),
            })?
        };
        if unit_price < 0.0 {
            return Err(ImportError::RowValidation {
                row: row_number,
                message: format!("Price must not be negative: \"{price_raw}\""),
            });
        }

        let gst_raw = HeaderResolver::resolve(row, field::GST_RATE);
        let gst_rate = if gst_raw.is_empty() {
            self.defaults.gst_rate
        } else {
            CellCoercer::integer(&gst_raw).ok_or_else(|| ImportError::RowValidation {
                row: row_number,
                message: format!("GST Rate is not a number: \"{gst_raw}\""),
            })?
        };
        if !(0..=100).contains(&gst_rate) {
            return Err(ImportError::RowValidation {
                row: row_number,
                message: format!("GST Rate must be between 0 and 100: \"{gst_raw}\""),
            });
        }

        let sku = HeaderResolver::resolve(row, field::SKU);
        let sku = if sku.is_empty() {
            generated_sku(row_number)
        } else {
            sku
        };

        let category = HeaderResolver::resolve(row, field::CATEGORY);
        let unit = HeaderResolver::resolve(row, field::UNIT);
        let supplier = HeaderResolver::resolve(row, field::SUPPLIER);

        Ok(InvoiceRowFacts {
            row_number,
            invoice_number,
            customer_name,
            customer_email: HeaderResolver::resolve(row, field::CUSTOMER_EMAIL),
            customer_phone: HeaderResolver::resolve(row, field::CUSTOMER_PHONE),
            customer_address: HeaderResolver::resolve(row, field::CUSTOMER_ADDRESS),
            customer_gstin: HeaderResolver::resolve(row, field::CUSTOMER_GSTIN),
            date,
            due_date,
            product_name,
            sku,
            category: if category.is_empty() {
                self.defaults.category.clone()
            } else {
                category
            },
            quantity,
            unit_price,
            unit: if unit.is_empty() {
                self.defaults.unit.clone()
            } else {
                unit
            },
            hsn_code: HeaderResolver::resolve(row, field::HSN_CODE),
            gst_rate,
            supplier: if supplier.is_empty() {
                self.defaults.derived_supplier.clone()
            } else {
                supplier
            },
            notes: HeaderResolver::resolve(row, field::NOTES),
        })
    }
}

/// Group validated rows into invoices, keyed by invoice number.
///
/// First occurrence wins for all header-level fields; later rows with the
/// same invoice number contribute only a new line item, even if their
/// customer cells differ. Item order and invoice order both follow the
/// source row order. Totals are not computed here.
pub fn group_invoices(facts: &[InvoiceRowFacts]) -> Vec<InvoiceRecord> {
    let mut invoices: Vec<InvoiceRecord> = Vec::new();
    let mut index_by_number: HashMap<String, usize> = HashMap::new();

    for fact in facts {
        let idx = *index_by_number
            .entry(fact.invoice_number.clone())
            .or_insert_with(|| {
                invoices.push(InvoiceRecord {
                    id: Uuid::new_v4().to_string(),
                    invoice_number: fact.invoice_number.clone(),
                    customer_name: fact.customer_name.clone(),
                    customer_email: none_if_empty(&fact.customer_email),
                    customer_phone: none_if_empty(&fact.customer_phone),
                    customer_address: none_if_empty(&fact.customer_address),
                    customer_gstin: none_if_empty(&fact.customer_gstin),
                    date: fact.date,
                    due_date: fact.due_date,
                    items: Vec::new(),
                    notes: none_if_empty(&fact.notes),
                    status: InvoiceStatus::Draft,
                    subtotal: 0.0,
                    tax_amount: 0.0,
                    total_amount: 0.0,
                });
                invoices.len() - 1
            });

        let mut item = InvoiceLineItem {
            product_ref: fact.sku.clone(),
            name: fact.product_name.clone(),
            quantity: fact.quantity,
            unit_price: fact.unit_price,
            unit: fact.unit.clone(),
            hsn_code: fact.hsn_code.clone(),
            gst_rate: fact.gst_rate,
            amount: 0.0,
        };
        item.derive_amount();
        invoices[idx].items.push(item);
    }

    invoices
}

/// Derive inventory products from validated rows, keyed by sku.
///
/// The first occurrence of a sku sets every descriptive field; every
/// occurrence accumulates its quantity into stock.
pub fn derive_products(facts: &[InvoiceRowFacts], defaults: &ImportDefaults) -> Vec<ProductRecord> {
    let mut products: Vec<ProductRecord> = Vec::new();
    let mut index_by_sku: HashMap<String, usize> = HashMap::new();

    for fact in facts {
        let idx = *index_by_sku.entry(fact.sku.clone()).or_insert_with(|| {
            products.push(ProductRecord {
                id: Uuid::new_v4().to_string(),
                name: fact.product_name.clone(),
                sku: fact.sku.clone(),
                category: fact.category.clone(),
                price: fact.unit_price,
                stock: 0, // accumulated below
                min_stock: defaults.min_stock,
                unit: fact.unit.clone(),
                hsn_code: fact.hsn_code.clone(),
                gst_rate: fact.gst_rate,
                supplier: fact.supplier.clone(),
                last_updated: Local::now().date_naive(),
            });
            products.len() - 1
        });

        products[idx].stock += fact.quantity;
    }

    products
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn none_if_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
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

    fn invoice_row(invoice: &str, product: &str, sku: &str, qty: &str, price: &str) -> RawRow {
        row(&[
            ("Invoice Number *", invoice),
            ("Customer Name *", "Acme Corporation"),
            ("Invoice Date *", "2024-07-20"),
            ("Product Name *", product),
            ("SKU", sku),
            ("Stock Quantity *", qty),
            ("Price *", price),
        ])
    }

    #[test]
    fn test_two_rows_one_invoice() {
        let d = ImportDefaults::default();
        let grouper = InvoiceRowGrouper::new(&d);
        let rows = vec![
            invoice_row("INV-1", "Widget", "W-1", "2", "100"),
            invoice_row("INV-1", "Gadget", "G-1", "1", "50"),
        ];

        let bundle = grouper.group(&rows).unwrap();

        assert_eq!(bundle.invoices.len(), 1);
        let invoice = &bundle.invoices[0];
        assert_eq!(invoice.items.len(), 2);
        assert_eq!(invoice.items[0].name, "Widget");
        assert_eq!(invoice.items[1].name, "Gadget");
        assert!((invoice.subtotal - 250.0).abs() < 1e-6);
        assert!((invoice.total_amount - (invoice.subtotal + invoice.tax_amount)).abs() < 1e-6);
    }

    #[test]
    fn test_first_row_wins_for_header_fields() {
        let d = ImportDefaults::default();
        let grouper = InvoiceRowGrouper::new(&d);
        let mut second = invoice_row("INV-1", "Gadget", "G-1", "1", "50");
        second.insert("Customer Name *".to_string(), "Someone Else".to_string());
        let rows = vec![invoice_row("INV-1", "Widget", "W-1", "2", "100"), second];

        let bundle = grouper.group(&rows).unwrap();

        assert_eq!(bundle.invoices.len(), 1);
        assert_eq!(bundle.invoices[0].customer_name, "Acme Corporation");
        assert_eq!(bundle.invoices[0].items.len(), 2);
    }

    #[test]
    fn test_missing_required_cell_fails_fast() {
        let d = ImportDefaults::default();
        let grouper = InvoiceRowGrouper::new(&d);
        let rows = vec![
            invoice_row("INV-1", "Widget", "W-1", "2", "100"),
            row(&[
                ("Invoice Number *", "INV-2"),
                ("Product Name *", "Gadget"),
                ("Invoice Date *", "2024-07-20"),
            ]),
        ];

        let err = grouper.group(&rows).unwrap_err();
        match err {
            ImportError::RowValidation { row, message } => {
                assert_eq!(row, 3);
                assert!(message.contains("Customer Name"));
            }
            other => panic!("expected RowValidation, got {other:?}"),
        }
    }

    #[test]
    fn test_stock_accumulates_per_sku() {
        let d = ImportDefaults::default();
        let grouper = InvoiceRowGrouper::new(&d);
        let rows = vec![
            invoice_row("INV-1", "Widget", "W-1", "2", "100"),
            invoice_row("INV-2", "Widget", "W-1", "5", "100"),
            invoice_row("INV-2", "Gadget", "G-1", "1", "50"),
        ];

        let bundle = grouper.group(&rows).unwrap();

        assert_eq!(bundle.products.len(), 2);
        let widget = bundle.products.iter().find(|p| p.sku == "W-1").unwrap();
        assert_eq!(widget.stock, 7);
        let gadget = bundle.products.iter().find(|p| p.sku == "G-1").unwrap();
        assert_eq!(gadget.stock, 1);
    }

    #[test]
    fn test_derived_product_supplier_defaults_to_imported() {
        let d = ImportDefaults::default();
        let grouper = InvoiceRowGrouper::new(&d);
        let rows = vec![invoice_row("INV-1", "Widget", "W-1", "2", "100")];

        let bundle = grouper.group(&rows).unwrap();
        assert_eq!(bundle.products[0].supplier, "Imported");
    }

    #[test]
    fn test_due_date_defaults_to_invoice_date_plus_30() {
        let d = ImportDefaults::default();
        let grouper = InvoiceRowGrouper::new(&d);
        let rows = vec![invoice_row("INV-1", "Widget", "W-1", "2", "100")];

        let bundle = grouper.group(&rows).unwrap();
        let invoice = &bundle.invoices[0];

        assert_eq!(invoice.date, NaiveDate::from_ymd_opt(2024, 7, 20).unwrap());
        assert_eq!(
            invoice.due_date,
            NaiveDate::from_ymd_opt(2024, 8, 19).unwrap()
        );
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        let d = ImportDefaults::default();
        let grouper = InvoiceRowGrouper::new(&d);
        let rows = vec![row(&[
            ("Invoice Number *", "INV-1"),
            ("Customer Name *", "Acme"),
            ("Invoice Date *", "2024-07-20"),
            ("Product Name *", "Widget"),
            ("Price *", "100"),
        ])];

        let bundle = grouper.group(&rows).unwrap();
        assert_eq!(bundle.invoices[0].items[0].quantity, 1);
        assert_eq!(bundle.products[0].stock, 1);
    }

    #[test]
    fn test_blank_sku_rows_stay_separate_products() {
        let d = ImportDefaults::default();
        let grouper = InvoiceRowGrouper::new(&d);
        let rows = vec![
            invoice_row("INV-1", "Widget", "", "2", "100"),
            invoice_row("INV-1", "Gadget", "", "3", "50"),
        ];

        let bundle = grouper.group(&rows).unwrap();

        // each blank-sku row gets its own placeholder, so no accumulation
        assert_eq!(bundle.products.len(), 2);
        assert!(bundle.products.iter().all(|p| p.sku.starts_with("SKU-")));
    }

    #[test]
    fn test_bad_date_fails() {
        let d = ImportDefaults::default();
        let grouper = InvoiceRowGrouper::new(&d);
        let mut bad = invoice_row("INV-1", "Widget", "W-1", "2", "100");
        bad.insert("Invoice Date *".to_string(), "next tuesday".to_string());

        let err = grouper.group(&[bad]).unwrap_err();
        assert!(err.to_string().contains("Invoice Date"));
    }
}
