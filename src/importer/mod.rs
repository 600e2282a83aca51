// ==========================================
// GST Billing Core - Import Layer
// ==========================================
// Responsibility: turn user-supplied spreadsheet files into validated
// domain records
// Pipeline: sheet parse -> header resolve -> coerce/validate -> records
// Supports: Excel (.xlsx/.xls), CSV
// ==========================================

pub mod cell;
pub mod error;
pub mod file_parser;
pub mod headers;
pub mod inventory;
pub mod invoice;
pub mod service;
pub mod totals;

use std::collections::HashMap;

/// One parsed spreadsheet row: header text to cell text.
///
/// Ephemeral; owned by a single import operation.
pub type RawRow = HashMap<String, String>;

pub use cell::CellCoercer;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, UniversalFileParser};
pub use headers::HeaderResolver;
pub use inventory::{parse_inventory_rows, InventoryRowTransformer};
pub use invoice::{
    derive_products, group_invoices, InvoiceImportBundle, InvoiceRowFacts, InvoiceRowGrouper,
};
pub use service::ImportService;
