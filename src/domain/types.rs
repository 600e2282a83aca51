// ==========================================
// GST Billing Core - Shared Domain Types
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// InvoiceStatus - invoice lifecycle state
// ==========================================
// Imported invoices always start as Draft; the remaining states are owned
// by the external billing API once a record has been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    /// Label used in exported sheets ("draft", "paid", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default_is_draft() {
        assert_eq!(InvoiceStatus::default(), InvoiceStatus::Draft);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&InvoiceStatus::Draft).unwrap();
        assert_eq!(json, "\"draft\"");
    }
}
