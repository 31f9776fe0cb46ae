use crate::config::Config;
use crate::crops::{
    CropInput, CropRecommendation, ErrorResponse, MODEL_INFO, ModelInfo, ModelsResponse,
    RecommendRequest, RecommendResponse,
};
use crate::scoring::FallbackScorer;
use anyhow::{Result, anyhow};
use tracing::{debug, error, warn};

/// Talks to the remote recommendation service. Every call is a single
/// attempt; failures never reach the caller.
#[derive(Debug, Clone)]
pub struct RecommendationClient {
    http: reqwest::Client,
    base_url: String,
    scorer: FallbackScorer,
}

impl RecommendationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        RecommendationClient {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            scorer: FallbackScorer::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_base_url.clone())
    }

    /// Replaces the scorer used when the service is unreachable.
    pub fn with_scorer(mut self, scorer: FallbackScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// `true` iff the service answers its health check with a 2xx status.
    pub async fn check_health(&self) -> bool {
        match self.http.get(self.endpoint("health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                error!(error = %e, base_url = %self.base_url, "API health check failed");
                false
            }
        }
    }

    /// Model names advertised by the service, or none if it cannot be asked.
    pub async fn list_models(&self) -> Vec<String> {
        match self.fetch_models().await {
            Ok(models) => models,
            Err(e) => {
                error!(error = %e, "Error fetching available models");
                vec![]
            }
        }
    }

    async fn fetch_models(&self) -> Result<Vec<String>> {
        let response = self.http.get(self.endpoint("models")).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!(
                "Failed to fetch available models: {}",
                response.status()
            ));
        }
        let body: ModelsResponse = response.json().await?;
        Ok(body.models)
    }

    /// Asks the service for recommendations. On any failure the local
    /// fallback scorer answers for the same input instead.
    pub async fn get_recommendations(
        &self,
        input: &CropInput,
        model: Option<&str>,
    ) -> Vec<CropRecommendation> {
        match self.request_recommendations(input, model).await {
            Ok(recommendations) => recommendations,
            Err(e) => {
                error!(error = %e, "Error fetching recommendations");
                warn!("Falling back to local recommendations");
                self.scorer.recommend(input)
            }
        }
    }

    async fn request_recommendations(
        &self,
        input: &CropInput,
        model: Option<&str>,
    ) -> Result<Vec<CropRecommendation>> {
        let body = RecommendRequest { input, model };
        let response = self
            .http
            .post(self.endpoint("recommend"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|e| e.error)
                .unwrap_or_else(|_| "API request failed".to_string());
            return Err(anyhow!("API error ({status}): {message}"));
        }

        let body: RecommendResponse = response.json().await?;
        debug!(
            count = body.recommendations.len(),
            model_used = body.model_used.as_deref().unwrap_or("unknown"),
            "Received recommendations"
        );
        Ok(body.recommendations)
    }

    /// Static details of the models the service was trained with.
    pub fn model_info(&self) -> &'static [ModelInfo] {
        &MODEL_INFO
    }
}
