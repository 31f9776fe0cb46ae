pub mod fallback;
pub mod registry;
pub mod rules;

pub use fallback::{FallbackScorer, FixedJitter, Jitter, SeededJitter, ThreadJitter, raw_score};
pub use registry::{CropClassifier, ModelRegistry, Prediction};
pub use rules::{knowledge_candidates, knowledge_recommendations};
