pub mod client;
pub mod common;
pub mod config;
pub mod crops;
pub mod routes;
pub mod scoring;
pub mod session;

pub use client::RecommendationClient;
pub use crops::{CropInput, CropRecommendation, InputField, ModelInfo};
pub use scoring::FallbackScorer;
pub use session::FormSession;
