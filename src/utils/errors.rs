use thiserror::Error;

use crate::api::coinranking::ApiError;

/// Errors raised while configuring, building or rendering a chart
#[derive(Debug, Error)]
pub enum ChartError {
    /// Color is not `#RGB` or `#RRGGBB`
    #[error("Bad hex color: '{0}'")]
    InvalidColor(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The provider answered but returned no coins
    #[error("No series returned for ids '{0}'")]
    NoSeries(String),
    #[error("Failed to render chart: {0}")]
    Render(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Coin provider error: {0}")]
    Api(#[from] ApiError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Map any displayable drawing error into a render error
pub fn render_error<E: std::fmt::Display>(context: &str) -> impl FnOnce(E) -> ChartError + '_ {
    move |e| ChartError::Render(format!("{}: {}", context, e))
}
