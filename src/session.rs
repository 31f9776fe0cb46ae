//! Headless state of the recommendation form.

use crate::client::RecommendationClient;
use crate::crops::{CropInput, CropRecommendation, DEFAULT_MODEL, InputField};
use tracing::{debug, info};

/// Input and model captured when a submission starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub input: CropInput,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct FormSession {
    input: CropInput,
    model: String,
    available_models: Vec<String>,
    api_available: bool,
    loading: bool,
    results: Vec<CropRecommendation>,
    used_model: String,
    show_results: bool,
}

impl Default for FormSession {
    fn default() -> Self {
        FormSession {
            input: CropInput::default(),
            model: DEFAULT_MODEL.to_string(),
            available_models: vec![],
            api_available: false,
            loading: false,
            results: vec![],
            used_model: DEFAULT_MODEL.to_string(),
            show_results: false,
        }
    }
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &CropInput {
        &self.input
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn available_models(&self) -> &[String] {
        &self.available_models
    }

    pub fn api_available(&self) -> bool {
        self.api_available
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn results(&self) -> &[CropRecommendation] {
        &self.results
    }

    pub fn used_model(&self) -> &str {
        &self.used_model
    }

    pub fn showing_results(&self) -> bool {
        self.show_results
    }

    /// Probes the service and, when it is up, loads the model picker.
    /// Prefers `best_overall`, otherwise the first advertised model.
    pub async fn connect(&mut self, client: &RecommendationClient) {
        self.api_available = client.check_health().await;
        if !self.api_available {
            info!(base_url = client.base_url(), "Recommendation API unavailable");
            return;
        }

        let models = client.list_models().await;
        if let Some(first) = models.first() {
            self.model = if models.iter().any(|m| m == DEFAULT_MODEL) {
                DEFAULT_MODEL.to_string()
            } else {
                first.clone()
            };
            self.available_models = models;
        }
    }

    pub fn set_value(&mut self, field: InputField, value: f64) {
        self.input.set(field, value);
    }

    /// Returns `false` if the text was not a number and nothing changed.
    pub fn enter_text(&mut self, field: InputField, text: &str) -> bool {
        self.input.enter_text(field, text)
    }

    pub fn select_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    /// Starts a submission, or returns `None` while one is in flight.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.loading {
            debug!("Submission ignored, a request is already in flight");
            return None;
        }
        self.loading = true;
        Some(Submission {
            input: self.input,
            model: self.model.clone(),
        })
    }

    pub fn finish_submit(&mut self, submission: Submission, results: Vec<CropRecommendation>) {
        self.results = results;
        self.used_model = submission.model;
        self.show_results = true;
        self.loading = false;
    }

    /// Runs a whole submission through `client`. Returns `false` when a
    /// request was already in flight.
    pub async fn submit(&mut self, client: &RecommendationClient) -> bool {
        let Some(submission) = self.begin_submit() else {
            return false;
        };
        let results = client
            .get_recommendations(&submission.input, Some(&submission.model))
            .await;
        self.finish_submit(submission, results);
        true
    }

    /// Returns to the input form.
    pub fn back(&mut self) {
        self.show_results = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crops::Crop;

    #[test]
    fn test_defaults_match_form_initial_state() {
        let session = FormSession::new();
        assert_eq!(session.input().features(), [90.0, 42.0, 43.0, 20.87, 82.0]);
        assert_eq!(session.model(), "best_overall");
        assert!(!session.is_loading());
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_loading_flag_blocks_second_submission() {
        let mut session = FormSession::new();
        let first = session.begin_submit().unwrap();
        assert!(session.is_loading());
        assert!(session.begin_submit().is_none());

        session.finish_submit(first, vec![CropRecommendation::new(Crop::Rice, 0.9)]);
        assert!(!session.is_loading());
        assert!(session.showing_results());
        assert_eq!(session.results().len(), 1);
        assert!(session.begin_submit().is_some());
    }

    #[test]
    fn test_submission_snapshots_input_and_model() {
        let mut session = FormSession::new();
        session.set_value(InputField::Nitrogen, 500.0);
        session.select_model("svm");
        let submission = session.begin_submit().unwrap();
        assert_eq!(submission.input.nitrogen(), 140.0);
        assert_eq!(submission.model, "svm");

        session.finish_submit(submission, vec![]);
        assert_eq!(session.used_model(), "svm");
        session.back();
        assert!(!session.showing_results());
    }

    #[test]
    fn test_enter_text_ignores_garbage() {
        let mut session = FormSession::new();
        assert!(!session.enter_text(InputField::Potassium, "lots"));
        assert_eq!(session.input().potassium(), 43.0);
        assert!(session.enter_text(InputField::Potassium, "120"));
        assert_eq!(session.input().potassium(), 120.0);
    }
}
