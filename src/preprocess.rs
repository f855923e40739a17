use std::path::Path;

use image::{DynamicImage, ImageError, ImageReader, RgbImage};
use tract_onnx::prelude::tract_ndarray;
use tracing::debug;

use crate::config::PredictorConfig;
use crate::error::{PredictError, Result};

/// Decode the image at `path`, sniffing the format from its content rather
/// than trusting the extension.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let read_error = |source: ImageError| PredictError::ImageRead {
        path: path.to_path_buf(),
        source,
    };

    let image = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| read_error(ImageError::IoError(e)))?
        .decode()
        .map_err(read_error)?;

    debug!(
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "decoded image"
    );
    Ok(image)
}

/// Resize to a square RGB image of the configured size.
///
/// Decoders hand back pixels in RGB order already; any alpha channel is
/// dropped and grayscale is expanded to three channels.
pub fn resize_rgb(image: &DynamicImage, config: &PredictorConfig) -> RgbImage {
    let rgb = image.to_rgb8();
    image::imageops::resize(&rgb, config.image_size, config.image_size, config.filter)
}

/// Scale pixels to `[0, 1]` and lay them out as a `1 x H x W x 3` batch.
pub fn to_batch(resized: &RgbImage) -> tract_ndarray::Array4<f32> {
    let (width, height) = resized.dimensions();
    #[allow(clippy::cast_possible_truncation)]
    let batch = tract_ndarray::Array4::from_shape_fn(
        (1, height as usize, width as usize, 3),
        |(_, y, x, c)| f32::from(resized[(x as _, y as _)][c]) / 255.0,
    );
    batch
}

/// Full preprocessing chain: resize, RGB, scale, batch.
pub fn prepare(image: &DynamicImage, config: &PredictorConfig) -> tract_ndarray::Array4<f32> {
    to_batch(&resize_rgb(image, config))
}
