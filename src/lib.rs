use std::{
    fs::{File, OpenOptions},
    io::BufWriter,
    path::{Path, PathBuf},
};

pub use cli::CLIParser;
pub use error::Error;
use crate::image::{
    reader::directory::{FrameDirectory, LoaderOptions},
    strip::{compose_strip, StripLayout, StripWidth},
    writer::png::PngImageWriter,
    ImageWriter,
};

mod cli;
pub mod color;
mod error;
pub mod image;
mod logger;
pub mod natural_sort;

pub type Result<T> = std::result::Result<T, error::Error>;

const OUTPUT_FILE_SUFFIX: &str = "_color_strip.png";

pub struct Arguments {
    folder_name: PathBuf,
    base_directory: PathBuf,
    output_file: Option<PathBuf>,
    strip_height: u32,
    strip_width: StripWidth,
    extensions: Vec<String>,
}

impl Arguments {
    pub fn input_directory(&self) -> PathBuf {
        self.base_directory.join(&self.folder_name)
    }

    /// `<folder>/<folder name>_color_strip.png` unless given explicitly
    pub fn output_file(&self) -> PathBuf {
        if let Some(output_file) = &self.output_file {
            return output_file.clone();
        }
        let input_directory = self.input_directory();
        let folder_name = input_directory
            .file_name()
            .unwrap_or(self.folder_name.as_os_str())
            .to_string_lossy()
            .into_owned();
        input_directory.join(format!("{}{}", folder_name, OUTPUT_FILE_SUFFIX))
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct StripSummary {
    pub output_file: PathBuf,
    pub frame_count: usize,
    pub width: u32,
    pub height: u32,
    /// may be fractional for proportional layouts
    pub bar_width: f64,
    pub proportional: bool,
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e))
}

pub fn compile_color_strip(arguments: &Arguments) -> Result<StripSummary> {
    let input_directory = arguments.input_directory();
    let output_file_path = arguments.output_file();
    let loader_options = LoaderOptions::from(arguments);
    let colors = FrameDirectory::new(&input_directory, &loader_options).load_frame_colors()?;
    let layout = StripLayout::from(arguments);
    let strip = compose_strip(&colors, &layout)?;

    let output_file = open_output_file(&output_file_path)?;
    let mut writer = PngImageWriter::new(
        BufWriter::new(&output_file),
        strip.image(),
        output_file_path.display().to_string(),
    );
    writer.write_image()?;

    let summary = StripSummary {
        output_file: output_file_path,
        frame_count: strip.frame_count(),
        width: strip.width(),
        height: strip.height(),
        bar_width: strip.bar_width(),
        proportional: layout.is_proportional(),
    };
    logger::log_strip_summary(&summary);
    Ok(summary)
}
