use std::fmt::Display;

use image::ImageError;

#[derive(Debug)]
pub enum Error {
    InputDirectoryNotFound(String),
    UnableToReadInputDirectory(String, std::io::Error),
    NoRecognizedImages(String),
    NoReadableImages(String),
    UnableToDecodeFrame(String, ImageError),
    FrameWithoutPixels(String),
    InvalidStripLayout(String),
    StripNarrowerThanFrameCount(u32, usize),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    UnableToWriteOutputImage(String, ImageError),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::InputDirectoryNotFound(_))
    }

    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::NoRecognizedImages(_) | Self::NoReadableImages(_))
    }

    pub fn is_output_write(&self) -> bool {
        matches!(
            self,
            Self::UnableToOpenOutputFileForWriting(_, _) | Self::UnableToWriteOutputImage(_, _)
        )
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputDirectoryNotFound(path) => {
                write!(f, "Folder not found: '{}'", path)
            }
            Self::UnableToReadInputDirectory(path, error) => {
                write!(f, "Unable to list folder '{}': {}", path, error)
            }
            Self::NoRecognizedImages(path) => {
                write!(f, "No images found in '{}'", path)
            }
            Self::NoReadableImages(path) => {
                write!(f, "No readable images found in '{}'", path)
            }
            Self::UnableToDecodeFrame(name, error) => {
                write!(f, "Unable to decode frame '{}': {}", name, error)
            }
            Self::FrameWithoutPixels(name) => {
                write!(f, "Frame '{}' has no pixels", name)
            }
            Self::InvalidStripLayout(reason) => {
                write!(f, "Invalid strip layout: {}", reason)
            }
            Self::StripNarrowerThanFrameCount(width, frame_count) => {
                write!(
                    f,
                    "Strip width of {} px cannot hold {} frames. Every frame needs at least one column.",
                    width, frame_count
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::UnableToWriteOutputImage(path, error) => {
                write!(f, "Unable to write output image '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnableToReadInputDirectory(_, error)
            | Self::UnableToOpenOutputFileForWriting(_, error) => Some(error),
            Self::UnableToDecodeFrame(_, error) | Self::UnableToWriteOutputImage(_, error) => {
                Some(error)
            }
            _ => None,
        }
    }
}
