// ==========================================
// GST Billing Core - Exporter
// ==========================================
// Responsibility: serialize domain records back to a flat tabular file
// Format chosen by extension: .csv (csv crate) or .xlsx (rust_xlsxwriter)
// Header rows are fixed and human-labeled; one row per record, in the
// order given.
// ==========================================

pub mod template;

use crate::domain::{InvoiceRecord, ProductRecord};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("unsupported export format: {0} (expected .xlsx/.csv)")]
    UnsupportedFormat(String),

    #[error("failed to write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write failure: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel write failure: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Inventory export columns, aligned with the import synonym table so an
/// exported file re-imports cleanly.
pub const INVENTORY_EXPORT_HEADERS: &[&str] = &[
    "Product Name",
    "SKU",
    "Category",
    "Price",
    "Stock Quantity",
    "Minimum Stock",
    "Unit",
    "HSN Code",
    "GST Rate (%)",
    "Supplier",
];

/// Invoice export columns. Line items are not flattened here; this is the
/// header-level summary view.
pub const INVOICE_EXPORT_HEADERS: &[&str] = &[
    "Invoice Number",
    "Customer Name",
    "Date",
    "Due Date",
    "Amount",
    "GST Amount",
    "Total Amount",
    "Status",
    "Notes",
];

// One typed output cell, so XLSX keeps real numbers while CSV renders text.
enum Cell {
    Text(String),
    Int(i64),
    Number(f64),
}

impl Cell {
    fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Int(i) => i.to_string(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
        }
    }
}

/// Export products, one row per record in the order given.
pub fn export_inventory<P: AsRef<Path>>(
    path: P,
    products: &[ProductRecord],
) -> ExportResult<()> {
    let rows: Vec<Vec<Cell>> = products.iter().map(product_row).collect();
    write_sheet(path.as_ref(), "Inventory", INVENTORY_EXPORT_HEADERS, &rows)
}

/// Export invoice summaries, one row per invoice in the order given.
pub fn export_invoices<P: AsRef<Path>>(
    path: P,
    invoices: &[InvoiceRecord],
) -> ExportResult<()> {
    let rows: Vec<Vec<Cell>> = invoices.iter().map(invoice_row).collect();
    write_sheet(path.as_ref(), "Invoices", INVOICE_EXPORT_HEADERS, &rows)
}

fn product_row(product: &ProductRecord) -> Vec<Cell> {
    vec![
        Cell::Text(product.name.clone()),
        Cell::Text(product.sku.clone()),
        Cell::Text(product.category.clone()),
        Cell::Number(product.price),
        Cell::Int(product.stock),
        Cell::Int(product.min_stock),
        Cell::Text(product.unit.clone()),
        Cell::Text(product.hsn_code.clone()),
        Cell::Int(product.gst_rate),
        Cell::Text(product.supplier.clone()),
    ]
}

fn invoice_row(invoice: &InvoiceRecord) -> Vec<Cell> {
    vec![
        Cell::Text(invoice.invoice_number.clone()),
        Cell::Text(invoice.customer_name.clone()),
        Cell::Text(invoice.date.format("%Y-%m-%d").to_string()),
        Cell::Text(invoice.due_date.format("%Y-%m-%d").to_string()),
        Cell::Number(invoice.subtotal),
        Cell::Number(invoice.tax_amount),
        Cell::Number(invoice.total_amount),
        Cell::Text(invoice.status.as_str().to_string()),
        Cell::Text(invoice.notes.clone().unwrap_or_default()),
    ]
}

// Extension dispatch mirrors the import side: the gate runs before any
// write is attempted.
fn write_sheet(
    path: &Path,
    sheet_name: &str,
    headers: &[&str],
    rows: &[Vec<Cell>],
) -> ExportResult<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => write_csv(path, headers, rows),
        "xlsx" => write_xlsx(path, sheet_name, headers, rows),
        _ => Err(ExportError::UnsupportedFormat(ext)),
    }
}

fn write_csv(path: &Path, headers: &[&str], rows: &[Vec<Cell>]) -> ExportResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row.iter().map(Cell::render))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xlsx(
    path: &Path,
    sheet_name: &str,
    headers: &[&str],
    rows: &[Vec<Cell>],
) -> ExportResult<()> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    for (col, header) in headers.iter().enumerate() {
        sheet.write(0, col as u16, *header)?;
    }
    for (row_idx, row) in rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            let (r, c) = (row_idx as u32 + 1, col as u16);
            match cell {
                Cell::Text(s) => sheet.write(r, c, s.as_str())?,
                Cell::Int(i) => sheet.write(r, c, *i as f64)?,
                Cell::Number(n) => sheet.write(r, c, *n)?,
            };
        }
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn product() -> ProductRecord {
        ProductRecord {
            id: "p-1".to_string(),
            name: "Widget".to_string(),
            sku: "W-1".to_string(),
            category: "General".to_string(),
            price: 99.5,
            stock: 20,
            min_stock: 5,
            unit: "piece".to_string(),
            hsn_code: "85183000".to_string(),
            gst_rate: 18,
            supplier: "Acme Supplies".to_string(),
            last_updated: NaiveDate::from_ymd_opt(2024, 7, 20).unwrap(),
        }
    }

    #[test]
    fn test_export_inventory_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.csv");

        export_inventory(&path, &[product()]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Product Name,SKU,Category,Price,Stock Quantity,Minimum Stock,Unit,HSN Code,GST Rate (%),Supplier"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Widget,W-1,General,99.5,20,5,piece,85183000,18,Acme Supplies"
        );
    }

    #[test]
    fn test_export_rejects_unknown_extension() {
        let result = export_inventory("out.pdf", &[product()]);
        assert!(matches!(result, Err(ExportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_whole_prices_render_without_decimal_point() {
        let mut p = product();
        p.price = 100.0;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.csv");
        export_inventory(&path, &[p]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains(",100,"), "got: {contents}");
    }
}
