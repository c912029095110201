use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client as HttpClient;
use tracing::{debug, info, warn};

use super::models::{ApiError, Coin, CoinsResponse, ErrorResponse};
use crate::models::{ColorHex, SeriesRecord};

/// Used when a coin has no usable color of its own
pub const FALLBACK_COLOR: &str = "#666666";

/// Coinranking API client supplying price series for the chart
pub struct CoinrankingClient {
    http_client: HttpClient,
    base_url: String,
}

impl CoinrankingClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.coinranking.com/v1/public";

    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL.to_string())
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET request for `/coins`, with ids and period passed as encoded query pairs
    pub fn coins_request(&self, ids: &str, period: &str) -> reqwest::RequestBuilder {
        self.http_client
            .get(format!("{}/coins", self.base_url))
            .query(&[("ids", ids), ("period", period)])
            .headers(Self::create_headers())
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());
        let body_text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body_text)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or(body_text);

        match status.as_u16() {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            429 => {
                warn!("Rate limited by coinranking, retry after {:?} s", retry_after);
                ApiError::RateLimited { retry_after }
            }
            code @ 500..=599 => {
                warn!("Server error {}: {}", code, message);
                ApiError::ServerError(code, message)
            }
            code => ApiError::HttpError(code, message),
        }
    }

    /// GET /coins?ids={ids}&period={period}
    ///
    /// Fetches the price history of the given coins, in the order the API lists them.
    ///
    /// # Arguments
    /// * `ids` - Comma separated coinranking ids, e.g. `"2,4"`
    /// * `period` - Time window token, e.g. `"30d"`
    pub async fn get_coins(&self, ids: &str, period: &str) -> Result<Vec<SeriesRecord>, ApiError> {
        info!("📈 Fetching coins {} over {}", ids, period);

        let response = self
            .coins_request(ids, period)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response
            .json::<CoinsResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        let series = into_series(body)?;
        debug!("Received {} series", series.len());
        Ok(series)
    }
}

impl Default for CoinrankingClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a decoded response into series records
pub fn into_series(response: CoinsResponse) -> Result<Vec<SeriesRecord>, ApiError> {
    if response.status != "success" {
        return Err(ApiError::BadRequest(
            response
                .message
                .unwrap_or_else(|| format!("status '{}'", response.status)),
        ));
    }

    let data = response
        .data
        .ok_or_else(|| ApiError::DeserializationError("Response has no data".to_string()))?;

    data.coins.into_iter().map(coin_to_series).collect()
}

fn coin_to_series(coin: Coin) -> Result<SeriesRecord, ApiError> {
    let color = match coin.color.as_deref().map(ColorHex::parse) {
        Some(Ok(color)) => color,
        Some(Err(e)) => {
            warn!("{} for {}, using {}", e, coin.name, FALLBACK_COLOR);
            fallback_color()?
        }
        None => {
            warn!("No color for {}, using {}", coin.name, FALLBACK_COLOR);
            fallback_color()?
        }
    };

    let samples = coin
        .history
        .iter()
        .map(|p| p.value().map(round_up_cents))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SeriesRecord {
        name: coin.name,
        color,
        samples,
    })
}

fn fallback_color() -> Result<ColorHex, ApiError> {
    ColorHex::parse(FALLBACK_COLOR).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Round a price up to whole cents
pub fn round_up_cents(price: f64) -> f64 {
    (price * 100.0).ceil() / 100.0
}
