use std::cell::Cell;

use image::{ImageFormat, RgbImage};
use lesion_predict::output;
use lesion_predict::prediction::Prediction;
use lesion_predict::{predict_with, Class, Classifier, PredictError, PredictorConfig};
use tract_onnx::prelude::tract_ndarray::Array4;

/// Always answers with the same probabilities and records what it was fed.
struct Fixed {
    output: Vec<f32>,
    seen_shape: Cell<Option<Vec<usize>>>,
    seen_max: Cell<f32>,
}

impl Fixed {
    fn new(output: &[f32]) -> Self {
        Self {
            output: output.to_vec(),
            seen_shape: Cell::new(None),
            seen_max: Cell::new(f32::NAN),
        }
    }
}

impl Classifier for Fixed {
    fn classify(&self, batch: Array4<f32>) -> lesion_predict::Result<Vec<f32>> {
        self.seen_shape.set(Some(batch.shape().to_vec()));
        self.seen_max.set(batch.iter().copied().fold(0.0, f32::max));
        Ok(self.output.clone())
    }
}

fn black_image(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("black.png");
    RgbImage::new(256, 256)
        .save_with_format(&path, ImageFormat::Png)
        .unwrap();
    path
}

#[test]
fn black_image_benign_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let image = black_image(&dir);
    let model = Fixed::new(&[0.9, 0.1]);

    let prediction = predict_with(&model, &image, &PredictorConfig::default()).unwrap();

    assert_eq!(model.seen_shape.take(), Some(vec![1, 256, 256, 3]));
    assert_eq!(model.seen_max.get(), 0.0);
    assert_eq!(
        output::to_line(&prediction).unwrap(),
        r#"{"predicted_class": "benign", "confidence": "90.00", "benign_probability": "90.00", "malignant_probability": "10.00"}"#
    );
}

#[test]
fn repeated_runs_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let image = black_image(&dir);
    let model = Fixed::new(&[0.3141, 0.6859]);
    let config = PredictorConfig::default();

    let first = predict_with(&model, &image, &config).unwrap();
    let second = predict_with(&model, &image, &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.predicted_class, Class::Malignant);
    assert_eq!(first.confidence, "68.59");
}

#[test]
fn odd_sized_image_is_resized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wide.jpg");
    RgbImage::from_pixel(300, 120, image::Rgb([255, 255, 255]))
        .save_with_format(&path, ImageFormat::Jpeg)
        .unwrap();
    let model = Fixed::new(&[0.5, 0.5]);

    let prediction = predict_with(&model, &path, &PredictorConfig::default()).unwrap();
    assert_eq!(model.seen_shape.take(), Some(vec![1, 256, 256, 3]));
    assert!(model.seen_max.get() <= 1.0);
    assert_eq!(prediction.predicted_class, Class::Benign);
}

#[test]
fn undecodable_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.png");
    std::fs::write(&path, "not an image").unwrap();

    let err = predict_with(&Fixed::new(&[0.9, 0.1]), &path, &PredictorConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), format!("Failed to read image: {}", path.display()));
}

#[test]
fn model_with_wrong_arity() {
    let dir = tempfile::tempdir().unwrap();
    let image = black_image(&dir);

    let err = predict_with(&Fixed::new(&[1.0]), &image, &PredictorConfig::default()).unwrap_err();
    assert!(matches!(err, PredictError::UnexpectedOutput { len: 1 }));
}

#[test]
fn prediction_round_trips_through_json() {
    let line = r#"{"predicted_class": "malignant", "confidence": "81.20", "benign_probability": "18.80", "malignant_probability": "81.20"}"#;
    let parsed: Prediction = serde_json::from_str(line).unwrap();
    assert_eq!(parsed.predicted_class, Class::Malignant);
    assert_eq!(output::to_line(&parsed).unwrap(), line);
}

#[test]
fn predict_with_onnx_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let image = black_image(&dir);
    let model = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/constant_benign.onnx");

    let prediction = lesion_predict::predict(&image, &model, &PredictorConfig::default()).unwrap();
    assert_eq!(prediction.predicted_class, Class::Benign);
    assert_eq!(prediction.confidence, "90.00");
    assert_eq!(prediction.malignant_probability, "10.00");
}
