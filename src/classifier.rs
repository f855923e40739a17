use std::path::Path;

use tract_onnx::prelude::*;
use tracing::{debug, info};

use crate::config::PredictorConfig;
use crate::error::{PredictError, Result};

/// Something that turns a `1 x H x W x 3` batch into class probabilities.
pub trait Classifier {
    /// Run one forward pass and return the first output row.
    fn classify(&self, batch: tract_ndarray::Array4<f32>) -> Result<Vec<f32>>;
}

/// An ONNX model loaded and planned by tract.
pub struct TractClassifier {
    model: TypedRunnableModel<TypedModel>,
}

impl TractClassifier {
    pub fn load(path: &Path, config: &PredictorConfig) -> Result<Self> {
        let load_error = |cause: TractError| PredictError::ModelLoad {
            path: path.to_path_buf(),
            cause,
        };

        info!(path = %path.display(), "loading model");
        let model = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact(config.input_shape()).into()))
            .and_then(|model| model.into_typed())
            .map_err(load_error)?;
        let model = if config.optimize {
            model.into_optimized().map_err(load_error)?
        } else {
            model
        };
        let model = model.into_runnable().map_err(load_error)?;
        debug!(optimized = config.optimize, "model ready");

        Ok(Self { model })
    }
}

impl Classifier for TractClassifier {
    fn classify(&self, batch: tract_ndarray::Array4<f32>) -> Result<Vec<f32>> {
        let input: Tensor = batch.into();
        let result = self
            .model
            .run(tvec!(input.into()))
            .map_err(PredictError::Inference)?;

        let output = result[0]
            .to_array_view::<f32>()
            .map_err(PredictError::Inference)?;
        debug!(shape = ?output.shape(), "model output");
        Ok(output.iter().copied().collect())
    }
}
