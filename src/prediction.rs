use serde::{Deserialize, Serialize};

use crate::error::{PredictError, Result};

/// The two outcomes the classifier distinguishes, in model output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Class {
    Benign,
    Malignant,
}

impl Class {
    pub const ALL: [Class; 2] = [Class::Benign, Class::Malignant];

    pub fn from_index(index: usize) -> Option<Class> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Class::Benign => "benign",
            Class::Malignant => "malignant",
        }
    }
}

/// Index of the largest value; the lowest index wins ties.
///
/// A NaN counts as the maximum, so the first NaN is returned when there is one.
pub fn argmax(values: &[f32]) -> Option<usize> {
    if let Some(nan) = values.iter().position(|v| v.is_nan()) {
        return Some(nan);
    }
    let (first, rest) = values.split_first()?;
    let mut best = (0, *first);
    for (i, &v) in rest.iter().enumerate() {
        if v > best.1 {
            best = (i + 1, v);
        }
    }
    Some(best.0)
}

/// Probability as a percentage with exactly two decimals.
pub fn percent(probability: f32) -> String {
    if probability.is_nan() {
        return "nan".to_owned();
    }
    format!("{:.2}", probability * 100.0)
}

/// The line printed on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub predicted_class: Class,
    pub confidence: String,
    pub benign_probability: String,
    pub malignant_probability: String,
}

impl Prediction {
    /// Build the result from the model's output row `[benign, malignant]`.
    pub fn from_probabilities(probabilities: &[f32]) -> Result<Self> {
        let &[benign, malignant] = probabilities else {
            return Err(PredictError::UnexpectedOutput {
                len: probabilities.len(),
            });
        };

        let index = argmax(probabilities).unwrap_or_default();
        let predicted_class = Class::from_index(index).unwrap_or(Class::Benign);

        Ok(Self {
            predicted_class,
            confidence: percent(probabilities[index]),
            benign_probability: percent(benign),
            malignant_probability: percent(malignant),
        })
    }
}
