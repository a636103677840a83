use serde::{Deserialize, Serialize};

/// One symbol's market state at one hour boundary, quoted in USD.
///
/// Field names follow the CryptoCompare `histohour` wire format, with the
/// `volumefrom` / `volumeto` keys renamed to snake case.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Unix timestamp of the hour boundary
    pub time: i64,
    /// Closing price
    pub close: f64,
    /// Highest price within the hour
    pub high: f64,
    /// Lowest price within the hour
    pub low: f64,
    /// Opening price
    pub open: f64,
    /// Volume traded, in units of the base asset
    #[serde(rename = "volumefrom")]
    pub volume_from: f64,
    /// Volume traded, in units of the quote currency
    #[serde(rename = "volumeto")]
    pub volume_to: f64,
}

impl Quote {
    /// Create a full OHLCV quote.
    pub fn ohlcv(
        time: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume_from: f64,
        volume_to: f64,
    ) -> Self {
        Self {
            time,
            close,
            high,
            low,
            open,
            volume_from,
            volume_to,
        }
    }

    /// Create a sentinel (placeholder) quote at the given timestamp.
    pub fn sentinel(time: i64) -> Self {
        Self::ohlcv(time, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// Whether this quote is an end-of-history placeholder.
    ///
    /// The API pads pages with rows whose four price fields are all exactly
    /// zero once a symbol's history is exhausted within the requested window.
    /// Sentinels carry no meaningful volume data and must never be persisted.
    pub fn is_sentinel(&self) -> bool {
        self.open == 0.0 && self.high == 0.0 && self.low == 0.0 && self.close == 0.0
    }
}
