// ==========================================
// GST Billing Core - Import Templates
// ==========================================
// Responsibility: generate the sample sheets users fill in before
// importing
// Starred headers mark the required columns.
// ==========================================

use crate::exporter::{ExportError, ExportResult};
use std::path::Path;

pub const INVENTORY_TEMPLATE_HEADERS: &[&str] = &[
    "Product Name *",
    "SKU",
    "Category",
    "Price *",
    "Stock Quantity *",
    "Unit",
    "GST Rate (%)",
    "HSN Code",
    "Supplier",
];

pub const INVOICE_TEMPLATE_HEADERS: &[&str] = &[
    "Invoice Number *",
    "Customer Name *",
    "Customer Email",
    "Customer Phone",
    "Customer Address",
    "Customer GSTIN",
    "Invoice Date *",
    "Due Date",
    "Product Name *",
    "SKU",
    "Category",
    "Price *",
    "Stock Quantity *",
    "Unit",
    "GST Rate (%)",
    "HSN Code",
    "Supplier",
    "Notes",
];

const INVENTORY_SAMPLE_ROWS: &[&[&str]] = &[
    &[
        "Wireless Bluetooth Headphones",
        "WBH-001",
        "Electronics",
        "2499",
        "50",
        "piece",
        "18",
        "85183000",
        "Audio Tech Supplies",
    ],
    &[
        "Smart LED Bulb",
        "SLB-002",
        "Electronics",
        "899",
        "100",
        "piece",
        "18",
        "85395000",
        "Lighting Solutions",
    ],
];

// Two rows under one invoice number, so the sample demonstrates line-item
// grouping.
const INVOICE_SAMPLE_ROWS: &[&[&str]] = &[
    &[
        "INV-001",
        "Acme Corporation",
        "billing@acme.com",
        "+91 9876543210",
        "789 Industrial Area, Delhi 110001",
        "07AAPFU0939F1ZV",
        "2024-07-20",
        "2024-08-19",
        "Wireless Bluetooth Headphones",
        "WBH-001",
        "Electronics",
        "2499",
        "10",
        "piece",
        "18",
        "85183000",
        "Audio Tech Supplies",
        "Payment due in 30 days",
    ],
    &[
        "INV-001",
        "Acme Corporation",
        "billing@acme.com",
        "+91 9876543210",
        "789 Industrial Area, Delhi 110001",
        "07AAPFU0939F1ZV",
        "2024-07-20",
        "2024-08-19",
        "Smart LED Bulb",
        "SLB-002",
        "Electronics",
        "899",
        "20",
        "piece",
        "18",
        "85395000",
        "Lighting Solutions",
        "Payment due in 30 days",
    ],
];

/// Write the inventory import template (.csv or .xlsx by extension).
pub fn write_inventory_template<P: AsRef<Path>>(path: P) -> ExportResult<()> {
    write_template(
        path.as_ref(),
        "Inventory Template",
        INVENTORY_TEMPLATE_HEADERS,
        INVENTORY_SAMPLE_ROWS,
    )
}

/// Write the invoice import template (.csv or .xlsx by extension).
pub fn write_invoice_template<P: AsRef<Path>>(path: P) -> ExportResult<()> {
    write_template(
        path.as_ref(),
        "Invoice Template",
        INVOICE_TEMPLATE_HEADERS,
        INVOICE_SAMPLE_ROWS,
    )
}

fn write_template(
    path: &Path,
    sheet_name: &str,
    headers: &[&str],
    rows: &[&[&str]],
) -> ExportResult<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => {
            let mut writer = csv::Writer::from_path(path)?;
            writer.write_record(headers)?;
            for row in rows {
                writer.write_record(*row)?;
            }
            writer.flush()?;
            Ok(())
        }
        "xlsx" => {
            let mut workbook = rust_xlsxwriter::Workbook::new();
            let sheet = workbook.add_worksheet();
            sheet.set_name(sheet_name)?;
            for (col, header) in headers.iter().enumerate() {
                sheet.write(0, col as u16, *header)?;
            }
            for (row_idx, row) in rows.iter().enumerate() {
                for (col, value) in row.iter().enumerate() {
                    sheet.write(row_idx as u32 + 1, col as u16, *value)?;
                }
            }
            workbook.save(path)?;
            Ok(())
        }
        _ => Err(ExportError::UnsupportedFormat(ext)),
    }
}
