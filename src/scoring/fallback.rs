use crate::crops::{Crop, CropInput, CropRecommendation};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};

/// Number of suggestions returned per batch.
pub const TOP_N: usize = 3;
pub const MIN_CONFIDENCE: f64 = 0.4;
pub const MAX_CONFIDENCE: f64 = 0.95;
/// Jitter is drawn from `[0, JITTER_SPAN)`.
pub const JITTER_SPAN: f64 = 0.1;

/// Penalty `weight * |value - ideal|` for straying from an ideal value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deviation {
    pub ideal: f64,
    pub weight: f64,
}

/// Linear heuristic for one crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropWeights {
    pub crop: Crop,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    /// Linear reward on humidity, for crops that simply like it wet.
    pub humidity: f64,
    pub temperature_penalty: Option<Deviation>,
    pub humidity_penalty: Option<Deviation>,
}

const fn dev(ideal: f64, weight: f64) -> Option<Deviation> {
    Some(Deviation { ideal, weight })
}

pub const CROP_WEIGHTS: [CropWeights; 7] = [
    CropWeights {
        crop: Crop::Rice,
        nitrogen: 0.5,
        phosphorus: 0.2,
        potassium: 0.1,
        humidity: 0.5,
        temperature_penalty: dev(30.0, 0.3),
        humidity_penalty: None,
    },
    CropWeights {
        crop: Crop::Wheat,
        nitrogen: 0.3,
        phosphorus: 0.3,
        potassium: 0.3,
        humidity: 0.0,
        temperature_penalty: dev(25.0, 0.5),
        humidity_penalty: dev(60.0, 0.2),
    },
    CropWeights {
        crop: Crop::Maize,
        nitrogen: 0.4,
        phosphorus: 0.3,
        potassium: 0.1,
        humidity: 0.0,
        temperature_penalty: dev(28.0, 0.4),
        humidity_penalty: dev(50.0, 0.2),
    },
    CropWeights {
        crop: Crop::Cotton,
        nitrogen: 0.2,
        phosphorus: 0.2,
        potassium: 0.4,
        humidity: 0.0,
        temperature_penalty: dev(32.0, 0.3),
        humidity_penalty: dev(40.0, 0.3),
    },
    CropWeights {
        crop: Crop::Sugarcane,
        nitrogen: 0.3,
        phosphorus: 0.2,
        potassium: 0.5,
        humidity: 0.4,
        temperature_penalty: dev(30.0, 0.2),
        humidity_penalty: None,
    },
    CropWeights {
        crop: Crop::Soybeans,
        nitrogen: 0.3,
        phosphorus: 0.3,
        potassium: 0.3,
        humidity: 0.0,
        temperature_penalty: dev(27.0, 0.3),
        humidity_penalty: dev(60.0, 0.2),
    },
    CropWeights {
        crop: Crop::Tomatoes,
        nitrogen: 0.2,
        phosphorus: 0.5,
        potassium: 0.2,
        humidity: 0.0,
        temperature_penalty: dev(26.0, 0.3),
        humidity_penalty: dev(65.0, 0.2),
    },
];

impl CropWeights {
    pub fn score(&self, input: &CropInput) -> f64 {
        let penalty = |d: Option<Deviation>, value: f64| {
            d.map_or(0.0, |d| (value - d.ideal).abs() * d.weight)
        };
        self.nitrogen * input.nitrogen()
            + self.phosphorus * input.phosphorus()
            + self.potassium * input.potassium()
            + self.humidity * input.humidity()
            - penalty(self.temperature_penalty, input.temperature())
            - penalty(self.humidity_penalty, input.humidity())
    }
}

/// Deterministic part of a crop's score.
pub fn raw_score(crop: Crop, input: &CropInput) -> f64 {
    CROP_WEIGHTS
        .iter()
        .find(|w| w.crop == crop)
        .map_or(0.0, |w| w.score(input))
}

/// Maps a raw score and a jitter draw onto the displayed confidence range.
pub fn normalize_confidence(raw: f64, jitter: f64) -> f64 {
    let confidence = raw / 100.0 + 0.5 + jitter;
    if confidence.is_nan() {
        return MIN_CONFIDENCE;
    }
    confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

/// Source of the confidence noise, one draw per crop.
pub trait Jitter: Send + Sync {
    /// A value in `[0, JITTER_SPAN)`.
    fn sample(&self) -> f64;
}

/// Unseeded draws from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadJitter;

impl Jitter for ThreadJitter {
    fn sample(&self) -> f64 {
        rand::rng().random_range(0.0..JITTER_SPAN)
    }
}

/// Reproducible draws from a seeded RNG.
#[derive(Debug)]
pub struct SeededJitter {
    rng: Mutex<StdRng>,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        SeededJitter {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Jitter for SeededJitter {
    fn sample(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.random_range(0.0..JITTER_SPAN)
    }
}

/// Largest value a [`FixedJitter`] returns, just under the open upper bound.
const MAX_FIXED_JITTER: f64 = JITTER_SPAN - f64::EPSILON;

/// Always returns the same value, clamped into `[0, JITTER_SPAN)`. NaN
/// samples as 0.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl Jitter for FixedJitter {
    fn sample(&self) -> f64 {
        if self.0.is_nan() {
            return 0.0;
        }
        self.0.clamp(0.0, MAX_FIXED_JITTER)
    }
}

/// Local recommender used when the remote service cannot be reached.
#[derive(Clone)]
pub struct FallbackScorer {
    jitter: Arc<dyn Jitter>,
}

impl Default for FallbackScorer {
    fn default() -> Self {
        FallbackScorer::new(ThreadJitter)
    }
}

impl std::fmt::Debug for FallbackScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackScorer").finish_non_exhaustive()
    }
}

impl FallbackScorer {
    pub fn new(jitter: impl Jitter + 'static) -> Self {
        FallbackScorer {
            jitter: Arc::new(jitter),
        }
    }

    /// Scores every crop in the catalog and keeps the best [`TOP_N`].
    pub fn recommend(&self, input: &CropInput) -> Vec<CropRecommendation> {
        let mut scored: Vec<CropRecommendation> = CROP_WEIGHTS
            .iter()
            .map(|weights| {
                let confidence = normalize_confidence(weights.score(input), self.jitter.sample());
                CropRecommendation::new(weights.crop, confidence)
            })
            .collect();

        // Stable sort keeps catalog order between equal confidences
        scored.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        scored.truncate(TOP_N);
        scored
    }
}
