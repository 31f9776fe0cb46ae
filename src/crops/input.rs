use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use utoipa::ToSchema;

/// The five soil and climate measurements collected by the form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum InputField {
    Nitrogen,
    Phosphorus,
    Potassium,
    Temperature,
    Humidity,
}

/// Allowed range and slider step of a single field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl FieldRange {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

impl InputField {
    pub fn range(self) -> FieldRange {
        match self {
            InputField::Nitrogen => FieldRange { min: 0.0, max: 140.0, step: 1.0 },
            InputField::Phosphorus => FieldRange { min: 0.0, max: 140.0, step: 1.0 },
            InputField::Potassium => FieldRange { min: 0.0, max: 200.0, step: 1.0 },
            InputField::Temperature => FieldRange { min: 8.0, max: 45.0, step: 0.1 },
            InputField::Humidity => FieldRange { min: 0.0, max: 100.0, step: 1.0 },
        }
    }

    pub fn all() -> impl Iterator<Item = InputField> {
        InputField::iter()
    }
}

/// One set of measurements. Every value is kept inside its field range:
/// writes are clipped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct CropInput {
    nitrogen: f64,
    phosphorus: f64,
    potassium: f64,
    temperature: f64,
    humidity: f64,
}

impl Default for CropInput {
    fn default() -> Self {
        CropInput::new(90.0, 42.0, 43.0, 20.87, 82.0)
    }
}

impl CropInput {
    pub fn new(
        nitrogen: f64,
        phosphorus: f64,
        potassium: f64,
        temperature: f64,
        humidity: f64,
    ) -> Self {
        // NaN has no place in the range; start from the lower bound instead
        let init = |field: InputField, value: f64| {
            let range = field.range();
            if value.is_nan() { range.min } else { range.clamp(value) }
        };
        CropInput {
            nitrogen: init(InputField::Nitrogen, nitrogen),
            phosphorus: init(InputField::Phosphorus, phosphorus),
            potassium: init(InputField::Potassium, potassium),
            temperature: init(InputField::Temperature, temperature),
            humidity: init(InputField::Humidity, humidity),
        }
    }

    pub fn nitrogen(&self) -> f64 {
        self.nitrogen
    }

    pub fn phosphorus(&self) -> f64 {
        self.phosphorus
    }

    pub fn potassium(&self) -> f64 {
        self.potassium
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::Nitrogen => self.nitrogen,
            InputField::Phosphorus => self.phosphorus,
            InputField::Potassium => self.potassium,
            InputField::Temperature => self.temperature,
            InputField::Humidity => self.humidity,
        }
    }

    /// Stores `value` clipped to the field range. NaN leaves the field as is.
    pub fn set(&mut self, field: InputField, value: f64) {
        if value.is_nan() {
            return;
        }
        let clamped = field.range().clamp(value);
        match field {
            InputField::Nitrogen => self.nitrogen = clamped,
            InputField::Phosphorus => self.phosphorus = clamped,
            InputField::Potassium => self.potassium = clamped,
            InputField::Temperature => self.temperature = clamped,
            InputField::Humidity => self.humidity = clamped,
        }
    }

    /// Applies manually typed text. The longest number at the start of the
    /// text is used, so `"12abc"` enters 12. Returns `false` and keeps the
    /// previous value when the text does not start with a number.
    pub fn enter_text(&mut self, field: InputField, text: &str) -> bool {
        match leading_number(text) {
            Some(value) => {
                self.set(field, value);
                true
            }
            None => false,
        }
    }

    /// Feature vector in wire order: N, P, K, temperature, humidity.
    pub fn features(&self) -> [f64; 5] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
        ]
    }
}

/// Reads the longest decimal number at the start of `text`, after leading
/// whitespace: optional sign, digits with an optional fraction, optional
/// exponent. `Infinity` is accepted with an optional sign.
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if text[end..].starts_with("Infinity") {
        return text[..end + "Infinity".len()].parse().ok();
    }

    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    // An exponent only counts when digits follow it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    text[..end].parse().ok()
}
