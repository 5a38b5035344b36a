use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

/// Parse a rate flag. `0.035` is taken as a fraction, `3.5%` as a percentage.
///
/// This is the only place percentages are converted; the engine works in
/// fractions throughout.
pub fn parse_rate(raw: &str) -> Result<Decimal, String> {
    let trimmed = raw.trim();
    match trimmed.strip_suffix('%') {
        Some(pct) => Decimal::from_str(pct.trim())
            .map(|v| v / dec!(100))
            .map_err(|e| format!("invalid percentage '{raw}': {e}")),
        None => Decimal::from_str(trimmed).map_err(|e| format!("invalid rate '{raw}': {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_passthrough() {
        assert_eq!(parse_rate("0.045").unwrap(), dec!(0.045));
    }

    #[test]
    fn test_percentage_converted() {
        assert_eq!(parse_rate("4.5%").unwrap(), dec!(0.045));
        assert_eq!(parse_rate(" 10 % ").unwrap(), dec!(0.10));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(parse_rate("four percent").is_err());
        assert!(parse_rate("%").is_err());
    }
}
