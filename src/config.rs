use image::imageops::FilterType;

/// Side length, in pixels, of the square image the model expects.
pub const IMAGE_SIZE: u32 = 256;

/// Knobs for loading the model and preparing its input.
#[derive(Debug, Clone, Copy)]
pub struct PredictorConfig {
    /// Images are resized to `image_size` x `image_size` before inference.
    pub image_size: u32,
    /// Interpolation used when resizing.
    pub filter: FilterType,
    /// Run tract's graph optimizer before making the plan runnable.
    pub optimize: bool,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            image_size: IMAGE_SIZE,
            filter: FilterType::Triangle,
            optimize: true,
        }
    }
}

impl PredictorConfig {
    /// Shape of the batched NHWC input tensor: `[1, size, size, 3]`.
    pub fn input_shape(&self) -> [usize; 4] {
        let side = self.image_size as usize;
        [1, side, side, 3]
    }
}
