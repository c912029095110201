use chrono::Local;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use coin_chart::api::coinranking::CoinrankingClient;
use coin_chart::config::Config;
use coin_chart::services::chart_service;
use coin_chart::services::render_service::PngRenderer;
use coin_chart::utils::ChartError;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("coin_chart=debug,reqwest=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🪙 Starting coin-chart...");

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(2);
        }
    };
    debug!("Configuration: {:?}", config);

    // A failed fetch never reaches the build: report it and exit non-zero
    if let Err(e) = run(&config).await {
        error!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(config: &Config) -> Result<(), ChartError> {
    let client = CoinrankingClient::with_base_url(config.base_url.clone());
    let series = client.get_coins(&config.coin_ids, &config.period).await?;
    if series.is_empty() {
        return Err(ChartError::NoSeries(config.coin_ids.clone()));
    }
    info!(
        "✓ Fetched {} series: {}",
        series.len(),
        series.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(", ")
    );

    let renderer = PngRenderer::new(config.width, config.height);
    let chart = chart_service::build_chart(
        &series,
        &renderer,
        config.build_settings(),
        Local::now().date_naive(),
    )?;

    if let Some(path) = &config.json_output {
        std::fs::write(path, serde_json::to_string_pretty(&chart)?)?;
        info!("✓ Chart description written to {}", path.display());
    }

    renderer.render_to_file(&chart, &config.output)?;
    Ok(())
}
