//! Symbol validation.
//!
//! Per-symbol history tables are named verbatim after the instrument symbol,
//! so symbols must be restricted to identifier-safe characters before they
//! ever appear in a schema statement. Quote values themselves are always
//! bound as parameters; this guard covers the one place parameterization
//! cannot, the table name.

use crate::errors::{Error, Result};

/// Whether `symbol` consists only of identifier-safe characters.
///
/// The allow-list is ASCII alphanumerics plus `_` and `-`, which covers
/// every real exchange ticker while excluding quoting and punctuation
/// characters entirely.
pub fn is_identifier_safe(symbol: &str) -> bool {
    !symbol.is_empty()
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Validate a symbol for use as a table identifier.
///
/// # Errors
///
/// Returns [`Error::InvalidSymbol`] if the symbol is empty or contains any
/// character outside the allow-list.
pub fn validate_symbol(symbol: &str) -> Result<()> {
    if is_identifier_safe(symbol) {
        Ok(())
    } else {
        Err(Error::InvalidSymbol(symbol.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_tickers_are_valid() {
        for symbol in ["BTC", "ETH", "DOGE", "xmr", "BTC-USD", "WRAPPED_ETH", "1INCH"] {
            assert!(validate_symbol(symbol).is_ok(), "{} should be valid", symbol);
        }
    }

    #[test]
    fn test_empty_symbol_is_rejected() {
        assert!(validate_symbol("").is_err());
    }

    #[test]
    fn test_injection_attempts_are_rejected() {
        for symbol in [
            "BTC\" (x INT); --",
            "BTC;DROP TABLE ETH",
            "BTC USD",
            "BTC.USD",
            "BTC'",
            "₿TC",
        ] {
            assert!(
                validate_symbol(symbol).is_err(),
                "{} should be rejected",
                symbol
            );
        }
    }

    #[test]
    fn test_error_carries_the_symbol() {
        let err = validate_symbol("B C").unwrap_err();
        assert!(err.to_string().contains("B C"));
    }
}
