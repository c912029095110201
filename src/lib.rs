//! Coin price charts: fetch price histories from coinranking and draw them
//! as gradient-filled line charts.

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;
