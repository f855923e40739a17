//! Benign/malignant lesion classification for a single image.
//!
//! Loads an ONNX classifier with tract, prepares the image as a
//! `1 x 256 x 256 x 3` batch of `[0, 1]` floats and turns the two output
//! probabilities into a [`Prediction`].

use std::path::Path;

use tracing::info;

pub mod classifier;
pub mod config;
pub mod error;
pub mod output;
pub mod prediction;
pub mod preprocess;

pub use classifier::{Classifier, TractClassifier};
pub use config::PredictorConfig;
pub use error::{PredictError, Result};
pub use output::ErrorReport;
pub use prediction::{Class, Prediction};

/// Load the model at `model_path` and classify the image at `image_path`.
pub fn predict(image_path: &Path, model_path: &Path, config: &PredictorConfig) -> Result<Prediction> {
    let classifier = TractClassifier::load(model_path, config)?;
    predict_with(&classifier, image_path, config)
}

/// Classify the image at `image_path` with an already loaded model.
pub fn predict_with<C>(classifier: &C, image_path: &Path, config: &PredictorConfig) -> Result<Prediction>
where
    C: Classifier + ?Sized,
{
    let image = preprocess::load_image(image_path)?;
    let batch = preprocess::prepare(&image, config);

    let probabilities = classifier.classify(batch)?;
    let prediction = Prediction::from_probabilities(&probabilities)?;
    info!(
        class = prediction.predicted_class.as_str(),
        confidence = %prediction.confidence,
        "prediction done"
    );
    Ok(prediction)
}
