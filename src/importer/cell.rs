// ==========================================
// GST Billing Core - Cell Value Coercion
// ==========================================
// Responsibility: strip-then-parse conversion of loose cell text into
// typed values
// ==========================================

pub struct CellCoercer;

impl CellCoercer {
    /// Coerce a cell into a decimal.
    ///
    /// Every character outside `[0-9.-]` is discarded before parsing, so
    /// currency symbols and thousands separators never fail a row. A cell
    /// that reduces to the empty string, or to something `f64` cannot
    /// parse, yields `None`.
    pub fn decimal(raw: &str) -> Option<f64> {
        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Coerce a cell into an integer.
    ///
    /// Every character outside `[0-9]` is discarded before parsing; the
    /// result is therefore never negative. Empty-after-strip yields `None`.
    pub fn integer(raw: &str) -> Option<i64> {
        let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        cleaned.parse::<i64>().ok()
    }

    /// Trim surrounding whitespace; empty after trim is treated as absent.
    pub fn trimmed(raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_plain() {
        assert_eq!(CellCoercer::decimal("100"), Some(100.0));
        assert_eq!(CellCoercer::decimal("99.95"), Some(99.95));
    }

    #[test]
    fn test_decimal_discards_currency_and_separators() {
        assert_eq!(CellCoercer::decimal("\u{20b9}100"), Some(100.0));
        assert_eq!(CellCoercer::decimal("\u{20b9} 2,499.50"), Some(2499.50));
        assert_eq!(CellCoercer::decimal("$ 1,000"), Some(1000.0));
    }

    #[test]
    fn test_decimal_keeps_sign() {
        assert_eq!(CellCoercer::decimal("-12.5"), Some(-12.5));
    }

    #[test]
    fn test_decimal_rejects_empty_and_garbage() {
        assert_eq!(CellCoercer::decimal(""), None);
        assert_eq!(CellCoercer::decimal("   "), None);
        assert_eq!(CellCoercer::decimal("eighteen"), None);
        assert_eq!(CellCoercer::decimal("-.-"), None);
    }

    #[test]
    fn test_integer_strips_everything_but_digits() {
        assert_eq!(CellCoercer::integer("20 pcs"), Some(20));
        assert_eq!(CellCoercer::integer("1,000"), Some(1000));
        // the strip set has no '-', so signs vanish rather than negate
        assert_eq!(CellCoercer::integer("-5"), Some(5));
    }

    #[test]
    fn test_integer_rejects_empty() {
        assert_eq!(CellCoercer::integer(""), None);
        assert_eq!(CellCoercer::integer("abc"), None);
    }

    #[test]
    fn test_trimmed() {
        assert_eq!(CellCoercer::trimmed("  Widget  "), Some("Widget".to_string()));
        assert_eq!(CellCoercer::trimmed("   "), None);
        assert_eq!(CellCoercer::trimmed(""), None);
    }
}
