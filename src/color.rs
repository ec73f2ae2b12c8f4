use image::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RGBColorFormat<T> {
    red: T,
    green: T,
    blue: T,
}

impl<T: Copy> RGBColorFormat<T> {
    pub fn new(red: T, green: T, blue: T) -> Self {
        Self { red, green, blue }
    }
}

impl Default for RGBColorFormat<f64> {
    fn default() -> Self {
        RGBColorFormat {
            red: 0.0,
            green: 0.0,
            blue: 0.0,
        }
    }
}

impl From<&Rgb<u8>> for RGBColorFormat<u8> {
    fn from(value: &Rgb<u8>) -> Self {
        let [red, green, blue] = value.0;
        RGBColorFormat { red, green, blue }
    }
}

impl From<RGBColorFormat<u8>> for Rgb<u8> {
    fn from(value: RGBColorFormat<u8>) -> Self {
        Rgb([value.red, value.green, value.blue])
    }
}

impl From<&RGBColorFormat<f64>> for RGBColorFormat<u8> {
    fn from(value: &RGBColorFormat<f64>) -> Self {
        RGBColorFormat {
            red: round_channel(value.red),
            green: round_channel(value.green),
            blue: round_channel(value.blue),
        }
    }
}

/// nearest integer, exact halves go to the even neighbour
fn round_channel(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Sums every channel in floating point so large frames neither overflow nor
/// lose precision before the division.
#[derive(Default)]
pub struct MeanColorAccumulator {
    sum: RGBColorFormat<f64>,
    count: u64,
}

impl MeanColorAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pixel: &Rgb<u8>) {
        let [red, green, blue] = pixel.0;
        self.sum.red += f64::from(red);
        self.sum.green += f64::from(green);
        self.sum.blue += f64::from(blue);
        self.count += 1;
    }

    /// `None` when no pixel was pushed
    pub fn mean(&self) -> Option<RGBColorFormat<u8>> {
        if self.count == 0 {
            return None;
        }
        let count = self.count as f64;
        let mean = RGBColorFormat {
            red: self.sum.red / count,
            green: self.sum.green / count,
            blue: self.sum.blue / count,
        };
        Some(RGBColorFormat::from(&mean))
    }
}

impl<'a> Extend<&'a Rgb<u8>> for MeanColorAccumulator {
    fn extend<I: IntoIterator<Item = &'a Rgb<u8>>>(&mut self, iter: I) {
        for pixel in iter {
            self.push(pixel);
        }
    }
}

/// The mean color of one decoded frame together with the position of its
/// source file in the sorted listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameColor {
    pub index: usize,
    pub color: RGBColorFormat<u8>,
}
