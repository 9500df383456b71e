//! Per-channel intensity histograms and their rendering.
//!
//! [`Histogram::of`] counts how often each value `0..=255` occurs in the R, G
//! and B channels (alpha is ignored). [`render`] draws the three
//! distributions as a 256x256 chart:
//!
//! ```text
//! white background
//! light grid line every 32 px, vertical then horizontal
//! red, green and blue polylines, tallest count at the top edge
//! ```

use ime_core::{Channel, Image, Pixel, clamp_channel};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::OpsResult;

/// Number of intensity bins.
pub const BINS: usize = 256;

/// Lowest bin considered when looking for a peak.
pub const PEAK_MIN: usize = 10;

/// Highest bin considered when looking for a peak.
pub const PEAK_MAX: usize = 245;

/// Side of the rendered chart in pixels.
pub const CHART_SIZE: usize = 256;

const GRID_SPACING: usize = 32;
const GRID_COLOR: Pixel = Pixel::new(200, 200, 200, 255);
const LINE_COLORS: [Pixel; 3] = [
    Pixel::new(255, 0, 0, 255),
    Pixel::new(0, 255, 0, 255),
    Pixel::new(0, 0, 255, 255),
];

/// Frequency counts for the R, G and B channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [[u32; BINS]; 3],
}

impl Histogram {
    /// Counts every pixel's R, G and B values.
    ///
    /// Values outside `[0, 255]` are counted in the nearest end bin.
    pub fn of(image: &Image) -> Self {
        let mut counts = [[0u32; BINS]; 3];
        for p in image.pixels() {
            for (c, v) in p.rgb_array().into_iter().enumerate() {
                counts[c][clamp_channel(v) as usize] += 1;
            }
        }
        Self { counts }
    }

    /// Counts of one color channel, `None` for [`Channel::Alpha`].
    pub fn counts(&self, channel: Channel) -> Option<&[u32; BINS]> {
        (channel != Channel::Alpha).then(|| &self.counts[channel.index()])
    }

    /// Most frequent value in `[10, 245]` for a color channel, `None` for
    /// [`Channel::Alpha`].
    ///
    /// Ties go to the lowest value.
    pub fn peak(&self, channel: Channel) -> Option<usize> {
        self.counts(channel).map(peak_of)
    }

    /// Peaks of R, G and B in that order.
    pub fn peaks(&self) -> [usize; 3] {
        [0, 1, 2].map(|c| peak_of(&self.counts[c]))
    }

    /// Largest count across all three channels.
    pub fn max_frequency(&self) -> u32 {
        self.counts
            .iter()
            .flat_map(|c| c.iter())
            .copied()
            .max()
            .unwrap_or(0)
    }
}

fn peak_of(counts: &[u32; BINS]) -> usize {
    let mut peak = PEAK_MIN;
    for v in PEAK_MIN..=PEAK_MAX {
        if counts[v] > counts[peak] {
            peak = v;
        }
    }
    peak
}

/// Draws the histogram as a 256x256 line chart.
pub fn render(histogram: &Histogram) -> OpsResult<Image> {
    let mut chart = Image::filled(CHART_SIZE, CHART_SIZE, Pixel::WHITE)?;

    for x in (0..CHART_SIZE).step_by(GRID_SPACING) {
        for y in 0..CHART_SIZE {
            chart.set_pixel(y, x, GRID_COLOR);
        }
    }
    for y in (0..CHART_SIZE).step_by(GRID_SPACING) {
        for x in 0..CHART_SIZE {
            chart.set_pixel(y, x, GRID_COLOR);
        }
    }

    let max = histogram.max_frequency().max(1) as i64;
    debug!(max, "render histogram");
    let height = |count: u32| -> i64 {
        (CHART_SIZE as i64 - count as i64 * CHART_SIZE as i64 / max).clamp(0, CHART_SIZE as i64 - 1)
    };

    for (counts, color) in histogram.counts.iter().zip(LINE_COLORS) {
        for x in 0..BINS - 1 {
            let y1 = height(counts[x]);
            let y2 = height(counts[x + 1]);
            draw_line(&mut chart, x as i64, y1, x as i64 + 1, y2, color);
        }
    }
    Ok(chart)
}

/// Bresenham line from `(x0, y0)` to `(x1, y1)`, clipped to the image.
pub fn draw_line(image: &mut Image, x0: i64, y0: i64, x1: i64, y1: i64, color: Pixel) {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        if x >= 0 && y >= 0 && (x as usize) < image.width() && (y as usize) < image.height() {
            image.set_pixel(y as usize, x as usize, color);
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}
