//! CryptoCompare `histohour` API response models.

use serde::Deserialize;

use crate::models::Quote;

/// Envelope returned by the `data/histohour` endpoint.
///
/// The interesting part is `Data`; the remaining fields are kept for error
/// classification and debugging.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HistoHourResponse {
    /// "Success" or "Error"
    #[serde(default)]
    pub response: String,
    /// Human-readable detail, populated on error payloads
    #[serde(default)]
    pub message: String,
    /// Quotes ascending up to the requested boundary timestamp
    #[serde(default)]
    pub data: Vec<Quote>,
    /// Earliest timestamp covered by this page
    #[serde(default)]
    pub time_from: i64,
    /// Latest timestamp covered by this page
    #[serde(default)]
    pub time_to: i64,
}
