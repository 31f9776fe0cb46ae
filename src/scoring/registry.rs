use super::fallback::{MIN_CONFIDENCE, TOP_N};
use super::rules::{knowledge_candidates, knowledge_recommendations, top_up};
use crate::crops::catalog::label_name;
use crate::crops::{CropInput, CropRecommendation, DEFAULT_MODEL};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Probability under which a classifier's top picks are not trusted.
const LOW_PROBABILITY: f64 = 0.1;
/// Confidence reported for a bare label prediction.
const LABEL_CONFIDENCE: f64 = 0.9;

/// Output of a classifier run on one feature row.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// One probability per class id.
    Probabilities(Vec<f64>),
    /// A single class id, for models without probability output.
    Label(usize),
}

/// A trained crop model plugged into the service.
pub trait CropClassifier: Send + Sync {
    /// Feature count the model was trained on, if known. Rows shorter than
    /// this are zero-padded.
    fn expected_features(&self) -> Option<usize> {
        None
    }

    fn predict(&self, features: &[f64]) -> Result<Prediction>;
}

/// Named classifiers available to the recommend endpoint.
#[derive(Clone, Default)]
pub struct ModelRegistry {
    models: HashMap<String, Arc<dyn CropClassifier>>,
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("models", &self.model_names())
            .finish()
    }
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, model: impl CropClassifier + 'static) {
        let name = name.into();
        info!(model = %name, "Registered crop classifier");
        self.models.insert(name, Arc::new(model));
    }

    pub fn with_model(mut self, name: impl Into<String>, model: impl CropClassifier + 'static) -> Self {
        self.register(name, model);
        self
    }

    pub fn model_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.models.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Runs `model_name` (or `best_overall` when it is unknown) on `input`.
    /// With no usable model, or when the classifier fails, the knowledge
    /// rules answer instead.
    pub fn recommend(&self, input: &CropInput, model_name: &str) -> Vec<CropRecommendation> {
        let Some(model) = self
            .models
            .get(model_name)
            .or_else(|| self.models.get(DEFAULT_MODEL))
        else {
            debug!(model = model_name, "No classifier available, using knowledge rules");
            return knowledge_recommendations(input);
        };

        let features = pad_features(&input.features(), model.expected_features());
        let prediction = match model.predict(&features) {
            Ok(prediction) => prediction,
            Err(e) => {
                error!(model = model_name, error = %e, "Error during prediction");
                return knowledge_recommendations(input);
            }
        };

        let mut recommendations = match prediction {
            Prediction::Probabilities(probabilities) => rank_probabilities(&probabilities, input),
            Prediction::Label(index) => vec![CropRecommendation::from_label(
                label_name(index),
                LABEL_CONFIDENCE,
            )],
        };

        top_up(&mut recommendations, knowledge_candidates(input));
        recommendations
    }
}

/// Zero-pads the feature row when the model expects more columns.
pub fn pad_features(features: &[f64], expected: Option<usize>) -> Vec<f64> {
    let mut row = features.to_vec();
    if let Some(expected) = expected
        && expected > row.len()
    {
        debug!(
            expected,
            provided = row.len(),
            "Padding feature row with default values"
        );
        row.resize(expected, 0.0);
    }
    row
}

fn rank_probabilities(probabilities: &[f64], input: &CropInput) -> Vec<CropRecommendation> {
    let mut indices: Vec<usize> = (0..probabilities.len()).collect();
    indices.sort_by(|&a, &b| probabilities[b].total_cmp(&probabilities[a]));
    indices.truncate(TOP_N);

    if indices.len() < TOP_N || indices.iter().any(|&i| probabilities[i] < LOW_PROBABILITY) {
        warn!("Classifier confidence too low, answering from knowledge rules");
        let mut recommendations = Vec::with_capacity(TOP_N);
        top_up(&mut recommendations, knowledge_candidates(input));
        return recommendations;
    }

    indices
        .into_iter()
        .map(|i| {
            let mut confidence = probabilities[i];
            if confidence < MIN_CONFIDENCE {
                confidence = MIN_CONFIDENCE + confidence * 0.5;
            }
            CropRecommendation::from_label(label_name(i), confidence)
        })
        .collect()
}
