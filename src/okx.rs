//! Quote source boundary: the OKX DEX aggregator client
//!
//! The path calculator only depends on the `QuoteSource` capability, so it
//! can be exercised against a scripted fake in tests. `OkxDexClient` is the
//! production implementation: a signed GET against the aggregator's quote
//! endpoint, with every non-success response (transport error, non-2xx,
//! non-zero API code, empty data array) collapsed into `QuoteError`.

use crate::config::OkxConfig;
use crate::types::{QuoteData, QuoteResponse, Venue};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use sha2::Sha256;
use thiserror::Error;
use tracing::debug;

const BASE_URL: &str = "https://web3.okx.com";
const QUOTE_PATH: &str = "/api/v5/dex/aggregator/quote";

/// Placeholder wallet for quote-only requests (no execution)
const ZERO_WALLET: &str = "0x0000000000000000000000000000000000000000";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("quote request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed quote response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("quote API error {code}: {msg}")]
    Api { code: String, msg: String },
    #[error("quote response contained no data")]
    EmptyQuote,
    #[error("request signing failed: {0}")]
    Signing(String),
}

/// Abstract quote capability consumed by the path calculator
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Request a swap quote on `venue` from `from_token` to `to_token` for
    /// `raw_amount` smallest-denomination units of the source token.
    async fn get_quote(
        &self,
        venue: Venue,
        from_token: &str,
        to_token: &str,
        raw_amount: &str,
    ) -> Result<QuoteData, QuoteError>;
}

/// Signed HTTP client for the OKX DEX aggregator quote endpoint
pub struct OkxDexClient {
    client: reqwest::Client,
    config: OkxConfig,
    slippage: Decimal,
    base_url: String,
}

impl std::fmt::Debug for OkxDexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OkxDexClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl OkxDexClient {
    pub fn new(config: OkxConfig, slippage: Decimal) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            slippage,
            base_url: BASE_URL.to_string(),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Build the quote query string. Parameter order is fixed because the
    /// same string is covered by the request signature.
    fn quote_query(&self, venue: Venue, from_token: &str, to_token: &str, amount: &str) -> String {
        format!(
            "?chainId={}&amount={}&fromTokenAddress={}&toTokenAddress={}&slippage={}&userWalletAddress={}",
            venue.chain_id(),
            amount,
            from_token,
            to_token,
            self.slippage,
            ZERO_WALLET,
        )
    }

    /// Sign `timestamp + method + requestPath` with HMAC-SHA256 over the
    /// API secret, base64-encoded (OKX access signature scheme).
    fn sign(&self, timestamp: &str, method: &str, request_path: &str) -> Result<String, QuoteError> {
        let message = format!("{}{}{}", timestamp, method, request_path);

        // The secret is raw UTF-8 key material
        let mut mac = HmacSha256::new_from_slice(self.config.secret_key.as_bytes())
            .map_err(|e| QuoteError::Signing(e.to_string()))?;
        mac.update(message.as_bytes());

        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }
}

#[async_trait]
impl QuoteSource for OkxDexClient {
    async fn get_quote(
        &self,
        venue: Venue,
        from_token: &str,
        to_token: &str,
        raw_amount: &str,
    ) -> Result<QuoteData, QuoteError> {
        let query = self.quote_query(venue, from_token, to_token, raw_amount);
        let request_path = format!("{}{}", QUOTE_PATH, query);

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let signature = self.sign(&timestamp, "GET", &request_path)?;

        debug!(%venue, from_token, to_token, raw_amount, "requesting quote");

        let response = self
            .client
            .get(format!("{}{}", self.base_url, request_path))
            .header("OK-ACCESS-KEY", &self.config.api_key)
            .header("OK-ACCESS-SIGN", signature)
            .header("OK-ACCESS-TIMESTAMP", timestamp)
            .header("OK-ACCESS-PASSPHRASE", &self.config.passphrase)
            .header("Content-Type", "application/json")
            .send()
            .await?
            .error_for_status()?;

        let body: QuoteResponse = serde_json::from_str(&response.text().await?)?;

        if body.code != "0" {
            return Err(QuoteError::Api {
                code: body.code,
                msg: body.msg,
            });
        }

        body.data.into_iter().next().ok_or(QuoteError::EmptyQuote)
    }
}
