use super::catalog::{Crop, CropInfo, capitalize, crop_info};
use super::input::CropInput;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single ranked suggestion as shown to the user and sent over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropRecommendation {
    pub crop_name: String,
    pub confidence: f64,
    pub image_url: String,
    pub description: String,
}

impl CropRecommendation {
    pub fn new(crop: Crop, confidence: f64) -> Self {
        Self::with_info(crop.to_string(), confidence, crop.info())
    }

    /// Builds a recommendation for an arbitrary label, e.g. a classifier
    /// class outside the seven-crop catalog.
    pub fn from_label(label: &str, confidence: f64) -> Self {
        Self::with_info(capitalize(label), confidence, crop_info(label))
    }

    fn with_info(crop_name: String, confidence: f64, info: CropInfo) -> Self {
        CropRecommendation {
            crop_name,
            confidence,
            image_url: info.image_url.to_string(),
            description: info.description.to_string(),
        }
    }

    pub fn is_same_crop(&self, name: &str) -> bool {
        self.crop_name.eq_ignore_ascii_case(name)
    }
}

/// Body of `POST /recommend`: the measurements plus an optional model name.
#[derive(Serialize, Debug)]
pub struct RecommendRequest<'a> {
    #[serde(flatten)]
    pub input: &'a CropInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
}

#[derive(ToSchema, Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RecommendResponse {
    pub recommendations: Vec<CropRecommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(ToSchema, Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

#[derive(ToSchema, Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Static description of a trained model, shown next to the model picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub name: &'static str,
    pub accuracy: &'static str,
    pub parameters: &'static str,
}

pub const MODEL_INFO: [ModelInfo; 5] = [
    ModelInfo {
        name: "Naive Bayes",
        accuracy: "99.55%",
        parameters: "Default parameters",
    },
    ModelInfo {
        name: "Random Forest",
        accuracy: "99.55%",
        parameters: "n_estimators: 200",
    },
    ModelInfo {
        name: "XGBoost",
        accuracy: "98.86%",
        parameters: "learning_rate: 0.1, n_estimators: 100",
    },
    ModelInfo {
        name: "Support Vector Machine",
        accuracy: "98.86%",
        parameters: "C: 10, kernel: linear",
    },
    ModelInfo {
        name: "Logistic Regression",
        accuracy: "97.73%",
        parameters: "C: 10",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_serializes_camel_case() {
        let rec = CropRecommendation::new(Crop::Maize, 0.7);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["cropName"], "Maize");
        assert_eq!(json["confidence"], 0.7);
        assert!(json["imageUrl"].as_str().unwrap().starts_with("https://"));
        assert!(json["description"].as_str().unwrap().starts_with("Maize"));
    }

    #[test]
    fn test_from_label_uses_default_info_for_unknown_crops() {
        let rec = CropRecommendation::from_label("banana", 0.5);
        assert_eq!(rec.crop_name, "Banana");
        assert_eq!(rec.description, super::super::catalog::DEFAULT_CROP_INFO.description);
        assert!(rec.is_same_crop("BANANA"));
    }

    #[test]
    fn test_model_info_catalog() {
        assert_eq!(MODEL_INFO.len(), 5);
        assert_eq!(MODEL_INFO[0].name, "Naive Bayes");
        assert_eq!(MODEL_INFO[4].accuracy, "97.73%");
    }

    #[test]
    fn test_request_flattens_input_and_omits_missing_model() {
        let input = CropInput::default();
        let body = serde_json::to_value(RecommendRequest {
            input: &input,
            model: None,
        })
        .unwrap();
        assert_eq!(body["nitrogen"], 90.0);
        assert_eq!(body["humidity"], 82.0);
        assert!(body.get("model").is_none());

        let body = serde_json::to_value(RecommendRequest {
            input: &input,
            model: Some("svm"),
        })
        .unwrap();
        assert_eq!(body["model"], "svm");
    }

    #[test]
    fn test_response_without_model_used_deserializes() {
        let response: RecommendResponse =
            serde_json::from_str(r#"{"recommendations": []}"#).unwrap();
        assert!(response.recommendations.is_empty());
        assert_eq!(response.model_used, None);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("error").is_none());
    }
}
