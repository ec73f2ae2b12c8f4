use std::path::Path;

use image::ImageError;

use super::super::Frame;
use super::super::ImageReader;
use crate::Error;

/// Decodes any format the `image` crate recognizes into an 8 bit RGB frame.
/// Alpha is dropped and grayscale is expanded to three channels.
pub struct FileImageReader<'a> {
    path: &'a Path,
}

impl<'a> FileImageReader<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    fn frame_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl ImageReader for FileImageReader<'_> {
    fn read_image(&mut self) -> crate::Result<Frame> {
        let name = self.frame_name();
        // the content decides the format, not the extension
        let image = image::ImageReader::open(self.path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(ImageError::IoError)
            .and_then(|reader| reader.decode())
            .map_err(|e| Error::UnableToDecodeFrame(name.clone(), e))?;
        Ok(Frame::new(name, image.to_rgb8()))
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    use super::FileImageReader;
    use crate::image::ImageReader;
    use crate::Error;

    #[test]
    fn read_png_frame() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("frame_1.png");
        RgbImage::from_pixel(8, 4, Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();
        let frame = FileImageReader::new(&path).read_image().unwrap();
        assert_eq!(frame.name(), "frame_1.png");
        assert_eq!(frame.pixels().dimensions(), (8, 4));
        assert_eq!(frame.pixels().get_pixel(3, 2), &Rgb([10, 20, 30]));
    }

    #[test]
    fn read_frame_with_alpha_channel() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("frame_2.png");
        RgbaImage::from_pixel(2, 2, Rgba([200, 100, 50, 0]))
            .save(&path)
            .unwrap();
        let frame = FileImageReader::new(&path).read_image().unwrap();
        assert_eq!(frame.pixels().get_pixel(0, 0), &Rgb([200, 100, 50]));
    }

    #[test]
    fn read_frame_with_misleading_extension() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("frame_4.jpg");
        RgbImage::from_pixel(3, 3, Rgb([1, 2, 3]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();
        let frame = FileImageReader::new(&path).read_image().unwrap();
        assert_eq!(frame.pixels().get_pixel(1, 1), &Rgb([1, 2, 3]));
    }

    #[test]
    fn read_corrupt_frame() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("frame_3.png");
        fs::write(&path, b"definitely not a png").unwrap();
        let result = FileImageReader::new(&path).read_image();
        match result {
            Err(Error::UnableToDecodeFrame(name, _)) => assert_eq!(name, "frame_3.png"),
            _ => panic!("Corrupt frame was decoded"),
        }
    }
}
