// ==========================================
// GST Billing Core - Totals Calculator
// ==========================================
// Responsibility: derived money totals over a set of line items
// Money stays f64 end to end; no rounding is applied here.
// ==========================================

use crate::domain::{InvoiceLineItem, InvoiceRecord};

/// Sum of line amounts.
pub fn subtotal(items: &[InvoiceLineItem]) -> f64 {
    items.iter().map(|item| item.amount).sum()
}

/// Sum of per-line GST: amount * gst_rate / 100.
pub fn tax_amount(items: &[InvoiceLineItem]) -> f64 {
    items
        .iter()
        .map(|item| item.amount * item.gst_rate as f64 / 100.0)
        .sum()
}

/// Recompute subtotal, tax_amount and total_amount on an invoice from its
/// current items.
pub fn apply_totals(invoice: &mut InvoiceRecord) {
    invoice.subtotal = subtotal(&invoice.items);
    invoice.tax_amount = tax_amount(&invoice.items);
    invoice.total_amount = invoice.subtotal + invoice.tax_amount;
}
