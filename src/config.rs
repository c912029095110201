//! Runtime settings read from the environment (and `.env`)

use std::path::PathBuf;
use std::str::FromStr;

use crate::api::coinranking::CoinrankingClient;
use crate::models::FadePolicy;
use crate::services::chart_service::BuildSettings;
use crate::utils::ChartError;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub coin_ids: String,
    pub period: String,
    pub output: PathBuf,
    pub json_output: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub gradient_height: u32,
    pub fade: FadePolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ChartError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; unset or blank keys take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ChartError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            base_url: get("COINRANKING_BASE_URL")
                .unwrap_or_else(|| CoinrankingClient::DEFAULT_BASE_URL.to_string()),
            coin_ids: get("COIN_IDS").unwrap_or_else(|| "2,4".to_string()),
            period: get("COIN_PERIOD").unwrap_or_else(|| "30d".to_string()),
            output: get("CHART_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("coin_chart.png")),
            json_output: get("CHART_JSON_OUTPUT").map(PathBuf::from),
            width: parse_or("CHART_WIDTH", get("CHART_WIDTH"), 1024)?,
            height: parse_or("CHART_HEIGHT", get("CHART_HEIGHT"), 768)?,
            gradient_height: parse_or("GRADIENT_HEIGHT", get("GRADIENT_HEIGHT"), 650)?,
            fade: get("GRADIENT_FADE")
                .map(|v| v.parse::<FadePolicy>())
                .transpose()?
                .unwrap_or_default(),
        })
    }

    pub fn build_settings(&self) -> BuildSettings {
        BuildSettings {
            fade: self.fade,
            fill_height: self.gradient_height,
        }
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T, ChartError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ChartError::Config(format!("{} must be a whole number, got '{}'", key, raw))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ChartError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.base_url, "https://api.coinranking.com/v1/public");
        assert_eq!(config.coin_ids, "2,4");
        assert_eq!(config.period, "30d");
        assert_eq!(config.output, PathBuf::from("coin_chart.png"));
        assert_eq!(config.json_output, None);
        assert_eq!((config.width, config.height), (1024, 768));
        assert_eq!(config.gradient_height, 650);
        assert_eq!(config.fade, FadePolicy::Compatible);
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("COIN_IDS", "1"),
            ("COIN_PERIOD", "7d"),
            ("CHART_JSON_OUTPUT", "chart.json"),
            ("CHART_WIDTH", " 800 "),
            ("GRADIENT_FADE", "linear"),
            ("CHART_OUTPUT", ""),
        ])
        .unwrap();
        assert_eq!(config.coin_ids, "1");
        assert_eq!(config.period, "7d");
        assert_eq!(config.json_output, Some(PathBuf::from("chart.json")));
        assert_eq!(config.width, 800);
        assert_eq!(config.output, PathBuf::from("coin_chart.png"));
        assert_eq!(config.build_settings().fade, FadePolicy::Linear);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(config(&[("CHART_HEIGHT", "-1")]), Err(ChartError::Config(_))));
        assert!(matches!(config(&[("GRADIENT_FADE", "wavy")]), Err(ChartError::Config(_))));
    }
}
