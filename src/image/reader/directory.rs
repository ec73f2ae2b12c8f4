use std::fs;
use std::path::{Path, PathBuf};

use super::super::ImageReader;
use super::decoder::FileImageReader;
use crate::color::FrameColor;
use crate::logger::{log_progress, log_skipped_frame};
use crate::natural_sort::compare_natural;
use crate::{Arguments, Error};

pub const DEFAULT_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "tiff", "webp"];

const PROGRESS_INTERVAL: usize = 25;

pub struct LoaderOptions {
    /// lower case, without the leading dot
    pub extensions: Vec<String>,
    /// a file that is never treated as a frame, usually the strip itself
    pub excluded_file: Option<PathBuf>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            excluded_file: None,
        }
    }
}

impl From<&Arguments> for LoaderOptions {
    fn from(value: &Arguments) -> Self {
        Self {
            extensions: value.extensions.clone(),
            excluded_file: Some(value.output_file()),
        }
    }
}

pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}

/// Frame Loader/Sorter: lists the recognized images of one folder in natural
/// order and reduces each of them to its mean color.
pub struct FrameDirectory<'a> {
    path: &'a Path,
    options: &'a LoaderOptions,
}

impl<'a> FrameDirectory<'a> {
    pub fn new(path: &'a Path, options: &'a LoaderOptions) -> Self {
        Self { path, options }
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn is_recognized(&self, path: &Path) -> bool {
        path.extension()
            .map(|extension| normalize_extension(&extension.to_string_lossy()))
            .is_some_and(|extension| self.options.extensions.contains(&extension))
    }

    pub fn list_frames(&self) -> crate::Result<Vec<PathBuf>> {
        if !self.path.is_dir() {
            return Err(Error::InputDirectoryNotFound(self.display_path()));
        }
        let entries = fs::read_dir(self.path)
            .map_err(|e| Error::UnableToReadInputDirectory(self.display_path(), e))?;
        let excluded = self.options.excluded_file.as_deref().map(ExcludedFile::new);
        let canonical_directory = fs::canonicalize(self.path).ok();
        let mut frames = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| Error::UnableToReadInputDirectory(self.display_path(), e))?
                .path();
            let is_excluded = excluded
                .as_ref()
                .is_some_and(|excluded| excluded.matches(&path, canonical_directory.as_deref()));
            if path.is_file() && !is_excluded && self.is_recognized(&path) {
                frames.push(path);
            }
        }
        sort_naturally(&mut frames);
        Ok(frames)
    }

    /// Decodes the frames one after another. Frames that fail to decode are
    /// skipped and leave a gap in the indices.
    pub fn load_frame_colors(&self) -> crate::Result<Vec<FrameColor>> {
        let frames = self.list_frames()?;
        if frames.is_empty() {
            return Err(Error::NoRecognizedImages(self.display_path()));
        }
        let total = frames.len();
        log::info!("Found {} frames in '{}'", total, self.display_path());

        let mut colors = Vec::with_capacity(total);
        for (index, path) in frames.iter().enumerate() {
            let color = FileImageReader::new(path)
                .read_image()
                .and_then(|frame| frame.mean_color());
            match color {
                Ok(color) => colors.push(FrameColor { index, color }),
                Err(e) => log_skipped_frame(&e),
            }
            let processed = index + 1;
            if processed % PROGRESS_INTERVAL == 0 || processed == total {
                log_progress(processed, total);
            }
        }

        if colors.is_empty() {
            return Err(Error::NoReadableImages(self.display_path()));
        }
        Ok(colors)
    }
}

/// The file to leave out, compared both as spelled and by canonical location
/// so `./`, `..` or a symlinked folder still match.
struct ExcludedFile<'a> {
    path: &'a Path,
    canonical: Option<PathBuf>,
}

impl<'a> ExcludedFile<'a> {
    fn new(path: &'a Path) -> Self {
        Self {
            path,
            canonical: canonical_location(path),
        }
    }

    /// `canonical_directory` is the canonical form of the folder holding `path`
    fn matches(&self, path: &Path, canonical_directory: Option<&Path>) -> bool {
        if self.path == path {
            return true;
        }
        let candidate = canonical_directory
            .zip(path.file_name())
            .map(|(directory, file_name)| directory.join(file_name));
        self.canonical.is_some() && self.canonical == candidate
    }
}

/// Canonicalizes the parent only, the file itself may not exist yet.
fn canonical_location(path: &Path) -> Option<PathBuf> {
    let file_name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::canonicalize(parent)
        .ok()
        .map(|parent| parent.join(file_name))
}

fn sort_naturally(paths: &mut [PathBuf]) {
    paths.sort_by(|left, right| {
        let left = left.file_name().unwrap_or_default().to_string_lossy();
        let right = right.file_name().unwrap_or_default().to_string_lossy();
        compare_natural(&left, &right)
    });
}

#[cfg(test)]
mod test {
    use std::fs;
    use std::path::{Path, PathBuf};

    use image::{Rgb, RgbImage};

    use super::{normalize_extension, sort_naturally, FrameDirectory, LoaderOptions};
    use crate::color::RGBColorFormat;

    fn write_frame(directory: &Path, name: &str, color: [u8; 3]) {
        RgbImage::from_pixel(4, 4, Rgb(color))
            .save(directory.join(name))
            .unwrap();
    }

    fn file_names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn normalize_extensions() {
        assert_eq!(normalize_extension(".PNG"), "png");
        assert_eq!(normalize_extension(" Jpeg "), "jpeg");
    }

    #[test]
    fn sort_paths_by_file_name() {
        let mut paths = vec![
            PathBuf::from("/movie/frame_10.png"),
            PathBuf::from("/movie/frame_9.png"),
            PathBuf::from("/movie/frame_100.png"),
        ];
        sort_naturally(&mut paths);
        assert_eq!(
            file_names(&paths),
            vec!["frame_9.png", "frame_10.png", "frame_100.png"]
        );
    }

    #[test]
    fn list_only_recognized_files() {
        let directory = tempfile::tempdir().unwrap();
        write_frame(directory.path(), "frame_2.PNG", [0, 0, 0]);
        write_frame(directory.path(), "frame_1.png", [0, 0, 0]);
        fs::write(directory.path().join("notes.txt"), "not a frame").unwrap();
        fs::write(directory.path().join("frame_3"), "no extension").unwrap();
        fs::create_dir(directory.path().join("nested.png")).unwrap();

        let options = LoaderOptions::default();
        let frames = FrameDirectory::new(directory.path(), &options)
            .list_frames()
            .unwrap();
        assert_eq!(file_names(&frames), vec!["frame_1.png", "frame_2.PNG"]);
    }

    #[test]
    fn list_respects_custom_extensions() {
        let directory = tempfile::tempdir().unwrap();
        write_frame(directory.path(), "frame_1.png", [0, 0, 0]);
        write_frame(directory.path(), "frame_2.bmp", [0, 0, 0]);
        let options = LoaderOptions {
            extensions: vec!["bmp".to_owned()],
            excluded_file: None,
        };
        let frames = FrameDirectory::new(directory.path(), &options)
            .list_frames()
            .unwrap();
        assert_eq!(file_names(&frames), vec!["frame_2.bmp"]);
    }

    #[test]
    fn list_skips_excluded_file() {
        let directory = tempfile::tempdir().unwrap();
        write_frame(directory.path(), "frame_1.png", [0, 0, 0]);
        write_frame(directory.path(), "movie_color_strip.png", [0, 0, 0]);
        let options = LoaderOptions {
            excluded_file: Some(directory.path().join("movie_color_strip.png")),
            ..LoaderOptions::default()
        };
        let frames = FrameDirectory::new(directory.path(), &options)
            .list_frames()
            .unwrap();
        assert_eq!(file_names(&frames), vec!["frame_1.png"]);
    }

    #[test]
    fn list_skips_excluded_file_spelled_differently() {
        let directory = tempfile::tempdir().unwrap();
        fs::create_dir(directory.path().join("nested")).unwrap();
        write_frame(directory.path(), "frame_1.png", [0, 0, 0]);
        write_frame(directory.path(), "movie_color_strip.png", [0, 0, 0]);
        let options = LoaderOptions {
            excluded_file: Some(
                directory
                    .path()
                    .join("nested")
                    .join("..")
                    .join("movie_color_strip.png"),
            ),
            ..LoaderOptions::default()
        };
        let frames = FrameDirectory::new(directory.path(), &options)
            .list_frames()
            .unwrap();
        assert_eq!(file_names(&frames), vec!["frame_1.png"]);
    }

    #[test]
    fn list_skips_excluded_file_of_not_yet_written_output() {
        let directory = tempfile::tempdir().unwrap();
        write_frame(directory.path(), "frame_1.png", [0, 0, 0]);
        let options = LoaderOptions {
            excluded_file: Some(directory.path().join("missing").join("strip.png")),
            ..LoaderOptions::default()
        };
        let frames = FrameDirectory::new(directory.path(), &options)
            .list_frames()
            .unwrap();
        assert_eq!(file_names(&frames), vec!["frame_1.png"]);
    }

    #[test]
    fn missing_directory_is_not_found() {
        let directory = tempfile::tempdir().unwrap();
        let missing = directory.path().join("missing");
        let options = LoaderOptions::default();
        let error = FrameDirectory::new(&missing, &options)
            .load_frame_colors()
            .unwrap_err();
        assert!(error.is_not_found());
    }

    #[test]
    fn file_instead_of_directory_is_not_found() {
        let directory = tempfile::tempdir().unwrap();
        write_frame(directory.path(), "frame_1.png", [0, 0, 0]);
        let file = directory.path().join("frame_1.png");
        let options = LoaderOptions::default();
        let error = FrameDirectory::new(&file, &options)
            .load_frame_colors()
            .unwrap_err();
        assert!(error.is_not_found());
    }

    #[test]
    fn load_colors_in_natural_order() {
        let directory = tempfile::tempdir().unwrap();
        write_frame(directory.path(), "frame_10.png", [0, 0, 255]);
        write_frame(directory.path(), "frame_9.png", [0, 255, 0]);
        write_frame(directory.path(), "frame_1.png", [255, 0, 0]);
        let options = LoaderOptions::default();
        let colors = FrameDirectory::new(directory.path(), &options)
            .load_frame_colors()
            .unwrap();
        let actual: Vec<RGBColorFormat<u8>> = colors.iter().map(|c| c.color).collect();
        assert_eq!(
            actual,
            vec![
                RGBColorFormat::new(255, 0, 0),
                RGBColorFormat::new(0, 255, 0),
                RGBColorFormat::new(0, 0, 255),
            ]
        );
    }

    #[test]
    fn corrupt_frame_leaves_a_gap() {
        let directory = tempfile::tempdir().unwrap();
        write_frame(directory.path(), "frame_1.png", [255, 0, 0]);
        fs::write(directory.path().join("frame_2.png"), b"broken").unwrap();
        write_frame(directory.path(), "frame_3.png", [0, 0, 255]);
        let options = LoaderOptions::default();
        let colors = FrameDirectory::new(directory.path(), &options)
            .load_frame_colors()
            .unwrap();
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0].index, 0);
        assert_eq!(colors[0].color, RGBColorFormat::new(255, 0, 0));
        assert_eq!(colors[1].index, 2);
        assert_eq!(colors[1].color, RGBColorFormat::new(0, 0, 255));
    }

    #[test]
    fn only_foreign_files_is_empty_input() {
        let directory = tempfile::tempdir().unwrap();
        fs::write(directory.path().join("readme.md"), "hello").unwrap();
        let options = LoaderOptions::default();
        let error = FrameDirectory::new(directory.path(), &options)
            .load_frame_colors()
            .unwrap_err();
        assert!(error.is_empty_input());
    }

    #[test]
    fn only_corrupt_frames_is_empty_input() {
        let directory = tempfile::tempdir().unwrap();
        fs::write(directory.path().join("frame_1.jpg"), b"broken").unwrap();
        fs::write(directory.path().join("frame_2.webp"), b"broken").unwrap();
        let options = LoaderOptions::default();
        let error = FrameDirectory::new(directory.path(), &options)
            .load_frame_colors()
            .unwrap_err();
        assert!(error.is_empty_input());
    }
}
