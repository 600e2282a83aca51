// ==========================================
// Invoice import integration tests
// ==========================================
// Target: flat rows -> grouped invoices + derived products, with totals
// ==========================================

mod test_helpers;

use gst_billing_core::{logging, ImportError, ImportService};
use test_helpers::write_csv;

const HEADER: &str = "Invoice Number *,Customer Name *,Invoice Date *,Product Name *,SKU,Price *,Stock Quantity *,GST Rate (%)";

#[test]
fn test_two_rows_same_invoice_number_make_one_invoice() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "invoices.csv",
        &[
            HEADER,
            "INV-1,Acme Corporation,2024-07-20,Widget,W-1,100,2,18",
            "INV-1,Acme Corporation,2024-07-20,Gadget,G-1,50,1,18",
        ],
    );

    let bundle = ImportService::default().import_invoice_file(&path).unwrap();

    assert_eq!(bundle.invoices.len(), 1);
    let invoice = &bundle.invoices[0];
    assert_eq!(invoice.invoice_number, "INV-1");
    assert_eq!(invoice.items.len(), 2);

    // subtotal = 2*100 + 1*50
    assert!((invoice.subtotal - 250.0).abs() < 1e-6);
    assert!((invoice.tax_amount - 45.0).abs() < 1e-6);
    assert!((invoice.total_amount - 295.0).abs() < 1e-6);
}

#[test]
fn test_items_preserve_row_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "invoices.csv",
        &[
            HEADER,
            "INV-1,Acme,2024-07-20,Third Widget,C-3,10,1,18",
            "INV-1,Acme,2024-07-20,First Widget,A-1,10,1,18",
            "INV-1,Acme,2024-07-20,Second Widget,B-2,10,1,18",
        ],
    );

    let bundle = ImportService::default().import_invoice_file(&path).unwrap();

    let names: Vec<&str> = bundle.invoices[0]
        .items
        .iter()
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(names, ["Third Widget", "First Widget", "Second Widget"]);
}

#[test]
fn test_totals_invariant_across_invoices() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "invoices.csv",
        &[
            HEADER,
            "INV-1,Acme,2024-07-20,Widget,W-1,99.95,3,18",
            "INV-2,Bharat Traders,2024-07-21,Gadget,G-1,1250,1,12",
            "INV-2,Bharat Traders,2024-07-21,Widget,W-1,99.95,2,18",
        ],
    );

    let bundle = ImportService::default().import_invoice_file(&path).unwrap();

    assert_eq!(bundle.invoices.len(), 2);
    for invoice in &bundle.invoices {
        let item_sum: f64 = invoice.items.iter().map(|i| i.amount).sum();
        assert!((invoice.subtotal - item_sum).abs() < 1e-6);
        assert!(
            (invoice.total_amount - (invoice.subtotal + invoice.tax_amount)).abs() < 1e-6
        );
    }
}

#[test]
fn test_product_stock_accumulates_across_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "invoices.csv",
        &[
            HEADER,
            "INV-1,Acme,2024-07-20,Widget,W-1,100,2,18",
            "INV-2,Bharat Traders,2024-07-21,Widget,W-1,100,5,18",
            "INV-3,Chennai Mart,2024-07-22,Widget,W-1,100,4,18",
            "INV-3,Chennai Mart,2024-07-22,Gadget,G-1,50,1,18",
        ],
    );

    let bundle = ImportService::default().import_invoice_file(&path).unwrap();

    assert_eq!(bundle.products.len(), 2);
    let widget = bundle.products.iter().find(|p| p.sku == "W-1").unwrap();
    assert_eq!(widget.stock, 11);
}

#[test]
fn test_missing_customer_fails_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "invoices.csv",
        &[
            HEADER,
            "INV-1,Acme,2024-07-20,Widget,W-1,100,2,18",
            "INV-2,,2024-07-21,Gadget,G-1,50,1,18",
            "INV-3,Chennai Mart,2024-07-22,Widget,W-1,100,4,18",
        ],
    );

    let err = ImportService::default()
        .import_invoice_file(&path)
        .unwrap_err();

    // fail-fast: no partial batch, and the error names the bad row
    match err {
        ImportError::RowValidation { row, message } => {
            assert_eq!(row, 3);
            assert!(message.contains("Customer Name"));
        }
        other => panic!("expected RowValidation, got {other:?}"),
    }
}

#[test]
fn test_invoice_header_fields_take_first_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "invoices.csv",
        &[
            "Invoice Number *,Customer Name *,Customer Email,Invoice Date *,Product Name *,SKU,Price *,Stock Quantity *",
            "INV-1,Acme Corporation,billing@acme.com,2024-07-20,Widget,W-1,100,2",
            "INV-1,Different Name,other@acme.com,2024-07-25,Gadget,G-1,50,1",
        ],
    );

    let bundle = ImportService::default().import_invoice_file(&path).unwrap();
    let invoice = &bundle.invoices[0];

    assert_eq!(invoice.customer_name, "Acme Corporation");
    assert_eq!(invoice.customer_email.as_deref(), Some("billing@acme.com"));
    assert_eq!(
        invoice.date,
        chrono::NaiveDate::from_ymd_opt(2024, 7, 20).unwrap()
    );
    assert_eq!(invoice.items.len(), 2);
}

#[test]
fn test_invoice_defaults_for_optional_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "invoices.csv",
        &[
            "Invoice Number,Customer Name,Invoice Date,Product Name",
            "INV-9,Acme,2024-07-20,Widget",
        ],
    );

    let bundle = ImportService::default().import_invoice_file(&path).unwrap();
    let invoice = &bundle.invoices[0];
    let item = &invoice.items[0];

    assert_eq!(item.quantity, 1);
    assert_eq!(item.gst_rate, 18);
    assert_eq!(item.unit, "piece");
    assert_eq!(item.unit_price, 0.0);
    assert_eq!(
        invoice.due_date,
        chrono::NaiveDate::from_ymd_opt(2024, 8, 19).unwrap()
    );
    assert_eq!(bundle.products[0].supplier, "Imported");
}
