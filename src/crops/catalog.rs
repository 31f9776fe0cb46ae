use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Crops known to both the local scorer and the server's rules.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Crop {
    Rice,
    Wheat,
    Maize,
    Cotton,
    Sugarcane,
    Soybeans,
    Tomatoes,
}

/// Display details attached to a crop name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropInfo {
    pub image_url: &'static str,
    pub description: &'static str,
}

/// Used for classifier labels outside the seven-crop catalog.
pub const DEFAULT_CROP_INFO: CropInfo = CropInfo {
    image_url: "https://images.unsplash.com/photo-1589833022671-27bbd67f8a4d?q=80&w=1000&auto=format&fit=crop",
    description: "This crop generally requires balanced soil nutrients and appropriate climate conditions.",
};

/// Label vocabulary of the server-side classifiers, indexed by class id.
pub const CLASSIFIER_LABELS: [&str; 20] = [
    "rice",
    "wheat",
    "maize",
    "cotton",
    "sugarcane",
    "soybeans",
    "tomatoes",
    "potato",
    "chickpea",
    "banana",
    "coffee",
    "mango",
    "grapes",
    "watermelon",
    "apple",
    "orange",
    "coconut",
    "papaya",
    "muskmelon",
    "lentil",
];

impl Crop {
    pub fn all() -> impl Iterator<Item = Crop> {
        Crop::iter()
    }

    pub fn info(self) -> CropInfo {
        match self {
            Crop::Rice => CropInfo {
                image_url: "https://images.unsplash.com/photo-1536054970905-11854aa9c766?q=80&w=1000&auto=format&fit=crop",
                description: "Rice thrives in warm, humid conditions with nitrogen-rich soil. It's perfect for waterlogged areas.",
            },
            Crop::Wheat => CropInfo {
                image_url: "https://images.unsplash.com/photo-1535911062114-764574491173?q=80&w=1000&auto=format&fit=crop",
                description: "Wheat prefers moderate temperatures and well-drained soil with balanced nutrients.",
            },
            Crop::Maize => CropInfo {
                image_url: "https://images.unsplash.com/photo-1551463944-6bc9a57e75b7?q=80&w=1000&auto=format&fit=crop",
                description: "Maize needs warm soil, consistent moisture, and high nitrogen levels to produce optimal yields.",
            },
            Crop::Cotton => CropInfo {
                image_url: "https://images.unsplash.com/photo-1605000797499-95a51c5269ae?q=80&w=1000&auto=format&fit=crop",
                description: "Cotton grows best in warm climates with well-drained soil and moderate potassium levels.",
            },
            Crop::Sugarcane => CropInfo {
                image_url: "https://images.unsplash.com/photo-1634467524884-897d0af5e104?q=80&w=1000&auto=format&fit=crop",
                description: "Sugarcane thrives in tropical conditions with high rainfall and potassium-rich soil.",
            },
            Crop::Soybeans => CropInfo {
                image_url: "https://images.unsplash.com/photo-1599420519638-8e7ffb8b2b55?q=80&w=1000&auto=format&fit=crop",
                description: "Soybeans prefer warm temperatures and soil with balanced NPK nutrients.",
            },
            Crop::Tomatoes => CropInfo {
                image_url: "https://images.unsplash.com/photo-1582284540020-8acbe03f4924?q=80&w=1000&auto=format&fit=crop",
                description: "Tomatoes grow best with high phosphorus levels, moderate nitrogen, and warm temperatures.",
            },
        }
    }
}

/// Looks up display details by (case-insensitive) name, falling back to
/// [`DEFAULT_CROP_INFO`].
pub fn crop_info(name: &str) -> CropInfo {
    name.parse::<Crop>()
        .map(Crop::info)
        .unwrap_or(DEFAULT_CROP_INFO)
}

/// Label name for a classifier class id. Ids past the vocabulary map to wheat.
pub fn label_name(index: usize) -> &'static str {
    CLASSIFIER_LABELS.get(index).copied().unwrap_or("wheat")
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_seven_unique_crops() {
        let names: Vec<String> = Crop::all().map(|c| c.to_string()).collect();
        assert_eq!(names.len(), 7);
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), 7);
        assert_eq!(names[0], "Rice");
        assert_eq!(names[6], "Tomatoes");
    }

    #[test]
    fn test_crop_info_lookup_is_case_insensitive() {
        assert_eq!(crop_info("rice"), Crop::Rice.info());
        assert_eq!(crop_info("SOYBEANS"), Crop::Soybeans.info());
        assert_eq!(crop_info("banana"), DEFAULT_CROP_INFO);
    }

    #[test]
    fn test_label_name_out_of_range_is_wheat() {
        assert_eq!(label_name(0), "rice");
        assert_eq!(label_name(19), "lentil");
        assert_eq!(label_name(20), "wheat");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("rice"), "Rice");
        assert_eq!(capitalize("wHEAT"), "Wheat");
        assert_eq!(capitalize(""), "");
    }
}
