//! Failure modes of a single prediction run.
//!
//! Every variant ends up as the `error` message of the JSON line written to
//! stderr, so the `Display` text is what callers see.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tract_onnx::prelude::TractError;

#[derive(Error, Debug)]
pub enum PredictError {
    /// Fewer than two positional arguments on the command line.
    #[error("Missing arguments")]
    MissingArguments,

    /// Any other command-line parse failure.
    #[error("{0}")]
    Usage(String),

    /// The image is missing, unreadable or not in a decodable format.
    #[error("Failed to read image: {}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The model file could not be parsed or does not accept the input shape.
    #[error("Failed to load model '{}': {cause:#}", path.display())]
    ModelLoad { path: PathBuf, cause: TractError },

    #[error("Inference failed: {0:#}")]
    Inference(TractError),

    /// The model answered with something other than two class probabilities.
    #[error("Model returned {len} values, expected 2 class probabilities")]
    UnexpectedOutput { len: usize },

    /// The result line could not be written to stdout.
    #[error("Failed to write result: {0}")]
    Output(#[from] io::Error),
}

pub type Result<T, E = PredictError> = std::result::Result<T, E>;
