//! Threshold rules the service falls back on when no classifier can answer.

use super::fallback::TOP_N;
use crate::crops::{Crop, CropInput, CropRecommendation};

/// Crops used to pad a short rule result, in order.
const DEFAULT_CROPS: [(Crop, f64); 3] = [
    (Crop::Wheat, 0.85),
    (Crop::Rice, 0.75),
    (Crop::Maize, 0.65),
];

/// Every rule that fires for `input`, in rule order. Soybeans always fire.
pub fn knowledge_candidates(input: &CropInput) -> Vec<CropRecommendation> {
    let (n, p, k) = (input.nitrogen(), input.phosphorus(), input.potassium());
    let (temp, humidity) = (input.temperature(), input.humidity());

    let rules = [
        (n > 80.0, Crop::Maize, 0.7),
        (
            (40.0..=100.0).contains(&n)
                && (30.0..=80.0).contains(&p)
                && (30.0..=80.0).contains(&k),
            Crop::Wheat,
            0.8,
        ),
        (temp > 25.0 && humidity > 70.0, Crop::Rice, 0.75),
        (k > 60.0, Crop::Cotton, 0.65),
        (p > 50.0, Crop::Tomatoes, 0.6),
        (true, Crop::Soybeans, 0.55),
    ];

    rules
        .into_iter()
        .filter(|(fires, _, _)| *fires)
        .map(|(_, crop, confidence)| CropRecommendation::new(crop, confidence))
        .collect()
}

/// Appends candidates to `recommendations` until it holds [`TOP_N`] entries,
/// skipping crops already present.
pub fn top_up(
    recommendations: &mut Vec<CropRecommendation>,
    candidates: impl IntoIterator<Item = CropRecommendation>,
) {
    for candidate in candidates {
        if recommendations.len() >= TOP_N {
            break;
        }
        if !recommendations
            .iter()
            .any(|r| r.is_same_crop(&candidate.crop_name))
        {
            recommendations.push(candidate);
        }
    }
}

/// The best three rule hits, padded with wheat, rice and maize.
pub fn knowledge_recommendations(input: &CropInput) -> Vec<CropRecommendation> {
    let mut recommendations = knowledge_candidates(input);
    recommendations.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    recommendations.truncate(TOP_N);

    top_up(
        &mut recommendations,
        DEFAULT_CROPS
            .iter()
            .map(|&(crop, confidence)| CropRecommendation::new(crop, confidence)),
    );
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(recs: &[CropRecommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.crop_name.as_str()).collect()
    }

    #[test]
    fn test_candidates_follow_rule_order() {
        let input = CropInput::new(90.0, 60.0, 70.0, 30.0, 80.0);
        let recs = knowledge_candidates(&input);
        assert_eq!(
            names(&recs),
            vec!["Maize", "Wheat", "Rice", "Cotton", "Tomatoes", "Soybeans"]
        );
    }

    #[test]
    fn test_recommendations_keep_best_three() {
        let input = CropInput::new(90.0, 60.0, 70.0, 30.0, 80.0);
        let recs = knowledge_recommendations(&input);
        assert_eq!(names(&recs), vec!["Wheat", "Rice", "Maize"]);
        assert_eq!(recs[0].confidence, 0.8);
    }

    #[test]
    fn test_sparse_input_is_padded_with_defaults() {
        // Only the soybean rule fires
        let input = CropInput::new(10.0, 10.0, 10.0, 20.0, 50.0);
        let recs = knowledge_recommendations(&input);
        assert_eq!(names(&recs), vec!["Soybeans", "Wheat", "Rice"]);
        assert_eq!(recs[1].confidence, 0.85);
        assert_eq!(recs[2].confidence, 0.75);
    }

    #[test]
    fn test_padding_skips_crops_already_present() {
        // Wheat and soybeans fire
        let input = CropInput::new(50.0, 40.0, 40.0, 20.0, 50.0);
        let recs = knowledge_recommendations(&input);
        assert_eq!(names(&recs), vec!["Wheat", "Soybeans", "Rice"]);
    }

    #[test]
    fn test_top_up_stops_at_three() {
        let mut recs = vec![CropRecommendation::new(Crop::Cotton, 0.9)];
        top_up(
            &mut recs,
            Crop::all().map(|c| CropRecommendation::new(c, 0.5)),
        );
        assert_eq!(names(&recs), vec!["Cotton", "Rice", "Wheat"]);
    }
}
