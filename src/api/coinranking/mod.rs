pub mod client;
pub mod models;

pub use client::CoinrankingClient;
pub use models::ApiError;
