//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching a page of quotes.
///
/// Every variant is terminal for the affected symbol's backfill run: the
/// driver must not continue paginating on partial or undecodable data.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// A transport-level failure talking to the remote API.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request exceeded the client-side timeout.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider whose request timed out
        provider: String,
    },

    /// The response body could not be decoded into the expected envelope.
    #[error("Decode error: {provider} - {message}")]
    Decode {
        /// The provider that returned the malformed body
        provider: String,
        /// The decode failure detail
        message: String,
    },

    /// The provider answered with an error envelope instead of data.
    #[error("Provider error: {provider} - {message}")]
    Provider {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },
}
