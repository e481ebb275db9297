pub mod client;
pub mod models;

pub use client::{ApiClient, ApiError, HttpClient, Transfer};
pub use models::SpeedtestConfig;
