//! Geometry for the risk distribution bar chart.
//!
//! Kept free of any drawing API so the canvas renderer and hover hit-testing
//! agree on the same rectangles.

/// Widest a bar may be, in CSS pixels.
pub const MAX_BAR_WIDTH: f64 = 64.0;
const LEFT_MARGIN: f64 = 40.0;
const RIGHT_MARGIN: f64 = 8.0;
const TOP_MARGIN: f64 = 8.0;
const BOTTOM_MARGIN: f64 = 28.0;
const TARGET_TICKS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y <= self.bottom()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub value: usize,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarChartLayout {
    pub plot: Rect,
    /// One category band per bar; the tooltip triggers anywhere in the band.
    pub bands: Vec<Rect>,
    pub bars: Vec<Rect>,
    pub ticks: Vec<Tick>,
    pub axis_max: usize,
}

impl BarChartLayout {
    pub fn new(width: f64, height: f64, counts: &[usize]) -> Self {
        let plot = Rect {
            x: LEFT_MARGIN,
            y: TOP_MARGIN,
            w: (width - LEFT_MARGIN - RIGHT_MARGIN).max(0.0),
            h: (height - TOP_MARGIN - BOTTOM_MARGIN).max(0.0),
        };

        let max_count = counts.iter().copied().max().unwrap_or(0);
        let step = tick_step(max_count);
        let axis_max = (max_count.div_ceil(step) * step).max(step * TARGET_TICKS);
        let y_for = |value: usize| plot.bottom() - plot.h * value as f64 / axis_max as f64;

        let ticks = (0..=axis_max)
            .step_by(step)
            .map(|value| Tick { value, y: y_for(value) })
            .collect();

        let band_w = if counts.is_empty() { 0.0 } else { plot.w / counts.len() as f64 };
        let bar_w = (band_w * 0.8).min(MAX_BAR_WIDTH);

        let mut bands = Vec::with_capacity(counts.len());
        let mut bars = Vec::with_capacity(counts.len());
        for (i, &count) in counts.iter().enumerate() {
            let band = Rect { x: plot.x + band_w * i as f64, y: plot.y, w: band_w, h: plot.h };
            let top = y_for(count);
            bars.push(Rect {
                x: band.x + (band_w - bar_w) / 2.0,
                y: top,
                w: bar_w,
                h: plot.bottom() - top,
            });
            bands.push(band);
        }

        Self { plot, bands, bars, ticks, axis_max }
    }

    /// Index of the category band under the pointer, if any.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.bands.iter().position(|band| band.contains(x, y))
    }
}

/// Integer tick spacing: 1, 2, 5, 10, 20, 50, ...
fn tick_step(max_count: usize) -> usize {
    let raw = max_count.div_ceil(TARGET_TICKS).max(1);
    let mut magnitude = 1;
    while magnitude * 10 <= raw {
        magnitude *= 10;
    }
    [1, 2, 5, 10]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|&step| step >= raw)
        .unwrap_or(10 * magnitude)
}
