pub mod catalog;
pub mod input;
pub mod models;

pub use catalog::Crop;
pub use input::{CropInput, FieldRange, InputField};
pub use models::{
    CropRecommendation, ErrorResponse, MODEL_INFO, ModelInfo, ModelsResponse, RecommendRequest,
    RecommendResponse,
};

/// Model requested when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "best_overall";
