use std::ops::Range;

use image::{Rgb, RgbImage};

use crate::color::FrameColor;
use crate::{Arguments, Error};

pub const DEFAULT_STRIP_HEIGHT: u32 = 250;
pub const DEFAULT_BAR_WIDTH: u32 = 10;

/// upper bound for the RGB buffer of a composed strip, 1 GiB
const MAX_STRIP_BYTES: u64 = 1 << 30;

/// How the total width of the strip comes about.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StripWidth {
    /// every frame gets a bar of exactly this many pixels
    PerFrame(u32),
    /// fixed total width, shared proportionally between the frames
    Total(u32),
    /// total width is the height times this ratio, shared proportionally
    AspectRatio(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StripLayout {
    height: u32,
    width: StripWidth,
}

impl Default for StripLayout {
    fn default() -> Self {
        Self {
            height: DEFAULT_STRIP_HEIGHT,
            width: StripWidth::PerFrame(DEFAULT_BAR_WIDTH),
        }
    }
}

impl From<&Arguments> for StripLayout {
    fn from(value: &Arguments) -> Self {
        Self::new(value.strip_height, value.strip_width)
    }
}

impl StripLayout {
    pub fn new(height: u32, width: StripWidth) -> Self {
        Self { height, width }
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_proportional(&self) -> bool {
        !matches!(self.width, StripWidth::PerFrame(_))
    }

    /// Total strip width for the given number of frames.
    pub fn resolve_width(&self, frame_count: usize) -> crate::Result<u32> {
        if frame_count == 0 {
            return Err(Error::InvalidStripLayout(
                "a strip needs at least one frame".to_owned(),
            ));
        }
        if self.height == 0 {
            return Err(Error::InvalidStripLayout(
                "height must be at least 1 px".to_owned(),
            ));
        }
        let width = match self.width {
            StripWidth::PerFrame(bar_width) => {
                if bar_width == 0 {
                    return Err(Error::InvalidStripLayout(
                        "bar width must be at least 1 px".to_owned(),
                    ));
                }
                let width = frame_count as u64 * u64::from(bar_width);
                u32::try_from(width).map_err(|_| {
                    Error::InvalidStripLayout(format!(
                        "{} bars of {} px exceed the maximum image width",
                        frame_count, bar_width
                    ))
                })?
            }
            StripWidth::Total(0) => {
                return Err(Error::InvalidStripLayout(
                    "width must be at least 1 px".to_owned(),
                ));
            }
            StripWidth::Total(width) => width,
            StripWidth::AspectRatio(ratio) => {
                if !ratio.is_finite() || ratio <= 0.0 {
                    return Err(Error::InvalidStripLayout(format!(
                        "aspect ratio must be a positive number, got {}",
                        ratio
                    )));
                }
                let width = (f64::from(self.height) * ratio).round();
                if width > f64::from(u32::MAX) {
                    return Err(Error::InvalidStripLayout(format!(
                        "aspect ratio {} exceeds the maximum image width",
                        ratio
                    )));
                }
                width as u32
            }
        };
        if (width as usize) < frame_count {
            return Err(Error::StripNarrowerThanFrameCount(width, frame_count));
        }
        let strip_bytes = u64::from(width) * u64::from(self.height) * 3;
        if strip_bytes > MAX_STRIP_BYTES {
            return Err(Error::InvalidStripLayout(format!(
                "{}x{} px exceeds the limit of {} MiB per strip",
                width,
                self.height,
                MAX_STRIP_BYTES >> 20
            )));
        }
        Ok(width)
    }
}

/// Columns covered by bar `index` when `count` bars share `width` pixels.
///
/// The bounds are `floor(index * width / count)` and
/// `floor((index + 1) * width / count)`, evaluated exactly in integers. Each
/// bar ends where the next one starts and the last one ends at `width`.
pub fn bar_range(index: usize, count: usize, width: u32) -> Range<u32> {
    debug_assert!(index < count, "bar {} out of {} bars", index, count);
    let boundary = |position: usize| (position as u64 * u64::from(width) / count as u64) as u32;
    boundary(index)..boundary(index + 1)
}

/// The composed barcode before it is written anywhere.
pub struct Strip {
    image: RgbImage,
    frame_count: usize,
}

impl Strip {
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// average bar width, fractional when the frames do not divide the width
    pub fn bar_width(&self) -> f64 {
        f64::from(self.width()) / self.frame_count as f64
    }
}

pub fn compose_strip(colors: &[FrameColor], layout: &StripLayout) -> crate::Result<Strip> {
    let count = colors.len();
    let width = layout.resolve_width(count)?;
    let height = layout.height();
    let mut image = RgbImage::new(width, height);
    for (index, frame_color) in colors.iter().enumerate() {
        let pixel = Rgb::from(frame_color.color);
        for x in bar_range(index, count, width) {
            for y in 0..height {
                image.put_pixel(x, y, pixel);
            }
        }
    }
    log::debug!(
        "Composed {} bars into {}x{} px",
        count,
        image.width(),
        image.height()
    );
    Ok(Strip {
        image,
        frame_count: count,
    })
}
