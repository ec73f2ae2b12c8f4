use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageError, RgbImage};

use crate::image::ImageWriter;
use crate::Error;

pub struct PngImageWriter<'a, T: Write> {
    writer: T,
    image: &'a RgbImage,
    destination: String,
}

impl<'a, T: Write> PngImageWriter<'a, T> {
    /// `destination` only names the target in error messages
    pub fn new(writer: T, image: &'a RgbImage, destination: String) -> Self {
        Self {
            writer,
            image,
            destination,
        }
    }
}

impl<T: Write> ImageWriter for PngImageWriter<'_, T> {
    fn write_image(&mut self) -> crate::Result<()> {
        let encoder = PngEncoder::new(&mut self.writer);
        encoder
            .write_image(
                self.image.as_raw(),
                self.image.width(),
                self.image.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| Error::UnableToWriteOutputImage(self.destination.clone(), e))?;
        self.writer.flush().map_err(|e| {
            Error::UnableToWriteOutputImage(self.destination.clone(), ImageError::IoError(e))
        })
    }
}
