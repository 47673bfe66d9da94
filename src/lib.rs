pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult, ErrorBody};
pub use services::{discovery::Discovery, providers::HttpRecommendationProvider};
