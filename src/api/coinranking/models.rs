use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Envelope of every coinranking response
#[derive(Debug, Clone, Deserialize)]
pub struct CoinsResponse {
    pub status: String,
    pub data: Option<CoinsData>,
    /// Present on `"fail"` responses
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinsData {
    pub coins: Vec<Coin>,
}

/// A coin and its price history over the requested period
#[derive(Debug, Clone, Deserialize)]
pub struct Coin {
    pub name: String,
    pub color: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryPrice>,
}

/// History entries come back as numeric strings, older payloads use plain numbers
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HistoryPrice {
    Number(f64),
    Text(String),
}

impl HistoryPrice {
    pub fn value(&self) -> Result<f64, ApiError> {
        match self {
            HistoryPrice::Number(n) => Ok(*n),
            HistoryPrice::Text(s) => s.trim().parse::<f64>().map_err(|e| {
                ApiError::DeserializationError(format!("Bad price '{}': {}", s, e))
            }),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<String>,
}

/// Errors talking to the coinranking API
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 400 Bad Request, or a `"fail"` status body
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 429 Too Many Requests; `retry_after` in seconds when the server says so
    #[error("Rate Limited. Retry after {retry_after:?} s")]
    RateLimited { retry_after: Option<u64> },
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}
