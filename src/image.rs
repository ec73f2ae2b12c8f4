use image::RgbImage;

use crate::color::{MeanColorAccumulator, RGBColorFormat};
use crate::error::Error;

pub mod reader;
pub mod strip;
pub mod writer;

/// A decoded screenshot. Lives only until its mean color is taken.
pub struct Frame {
    name: String,
    pixels: RgbImage,
}

impl Frame {
    pub fn new(name: String, pixels: RgbImage) -> Self {
        Self { name, pixels }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    pub fn mean_color(&self) -> crate::Result<RGBColorFormat<u8>> {
        let mut accumulator = MeanColorAccumulator::new();
        accumulator.extend(self.pixels.pixels());
        accumulator
            .mean()
            .ok_or_else(|| Error::FrameWithoutPixels(self.name.clone()))
    }
}

pub trait ImageReader {
    fn read_image(&mut self) -> crate::Result<Frame>;
}

pub trait ImageWriter {
    fn write_image(&mut self) -> crate::Result<()>;
}
