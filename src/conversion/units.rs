//! Unit name normalization and quantity parsing

/// Canonical form of a unit name used for every table key and lookup
///
/// Unit names are case-insensitive; "ML", "Ml" and "ml" all refer to the same unit.
pub fn canonicalize_unit(unit: &str) -> String {
    unit.to_lowercase()
}

/// Parse a quantity written as "<value> <unit>" (e.g. "10 ml")
///
/// Returns the scalar and the unit as typed; canonicalization happens when the
/// unit reaches the converter.
pub fn parse_quantity(input: &str) -> Option<(f64, String)> {
    let mut parts = input.split_whitespace();
    let value = parts.next()?.parse::<f64>().ok()?;
    let unit = parts.next()?;

    if parts.next().is_some() {
        return None;
    }

    Some((value, unit.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_unit() {
        assert_eq!(canonicalize_unit("ML"), "ml");
        assert_eq!(canonicalize_unit("Kg"), "kg");
        assert_eq!(canonicalize_unit("tbsp"), "tbsp");
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("10 ml"), Some((10.0, "ml".to_string())));
        assert_eq!(parse_quantity("  2.5   L "), Some((2.5, "L".to_string())));
        assert_eq!(parse_quantity("-3 g"), Some((-3.0, "g".to_string())));
    }

    #[test]
    fn test_parse_quantity_rejects_malformed_input() {
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("10"), None);
        assert_eq!(parse_quantity("ml 10"), None);
        assert_eq!(parse_quantity("10 fl oz"), None);
    }
}
