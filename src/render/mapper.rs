use super::bounds::AxisBounds;
use super::canvas::PixelPoint;

// ---------------------------------------------------------------------------
// PlotFrame – data-space ↔ pixel-space transform for one frame
// ---------------------------------------------------------------------------

/// Pixel border reserved on every side of the plot area for axis lines and
/// labels.
pub const MARGIN: f64 = 60.0;

/// A selection rectangle in pixel space; corners may arrive in any order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl PixelRect {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        PixelRect { x1, y1, x2, y2 }
    }
}

/// Maps data points into the plot rectangle of a canvas and pixel selections
/// back into data space. Construction fails on degenerate geometry: a canvas
/// smaller than twice the margin, or a zero-extent axis range. Callers skip
/// rendering in that case instead of dividing by zero.
#[derive(Debug, Clone, Copy)]
pub struct PlotFrame {
    bounds: AxisBounds,
    width: f64,
    height: f64,
    plot_width: f64,
    plot_height: f64,
}

impl PlotFrame {
    pub fn new(bounds: AxisBounds, width: f64, height: f64) -> Option<Self> {
        let plot_width = width - 2.0 * MARGIN;
        let plot_height = height - 2.0 * MARGIN;
        if plot_width <= 0.0 || plot_height <= 0.0 || !bounds.is_renderable() {
            return None;
        }
        Some(PlotFrame {
            bounds,
            width,
            height,
            plot_width,
            plot_height,
        })
    }

    pub fn bounds(&self) -> &AxisBounds {
        &self.bounds
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn plot_width(&self) -> f64 {
        self.plot_width
    }

    pub fn plot_height(&self) -> f64 {
        self.plot_height
    }

    /// Map a data point into pixel space. The vertical axis is inverted:
    /// magnitude grows upward, pixel rows grow downward. Output is clamped to
    /// the plot rectangle so out-of-range samples cannot push path geometry
    /// outside the drawing surface.
    pub fn to_pixel(&self, freq: f64, mag: f64) -> PixelPoint {
        let b = &self.bounds;
        let x = MARGIN + (freq - b.min_freq) / b.freq_range() * self.plot_width;
        let y = self.height - MARGIN - (mag - b.min_mag) / b.mag_range() * self.plot_height;
        PixelPoint {
            x: x.clamp(MARGIN, self.width - MARGIN),
            y: y.clamp(MARGIN, self.height - MARGIN),
        }
    }

    /// Invert a pixel selection back into a data-space region, clamped to
    /// `full`, the unzoomed full-data bounds, so repeated zoom-ins cannot
    /// drift outside the original data extent. Returns `None` when the
    /// clamped region has no positive extent on either axis (including
    /// zero-width or zero-height selections).
    pub fn region_from_pixels(&self, sel: PixelRect, full: &AxisBounds) -> Option<AxisBounds> {
        let b = &self.bounds;
        let (min_x, max_x) = ordered(sel.x1, sel.x2);
        let (min_y, max_y) = ordered(sel.y1, sel.y2);

        let freq_min = b.min_freq + (min_x - MARGIN) * b.freq_range() / self.plot_width;
        let freq_max = b.min_freq + (max_x - MARGIN) * b.freq_range() / self.plot_width;

        // Top of the selection is the higher magnitude.
        let mag_max = b.max_mag - (min_y - MARGIN) * b.mag_range() / self.plot_height;
        let mag_min = b.max_mag - (max_y - MARGIN) * b.mag_range() / self.plot_height;

        let region = AxisBounds {
            min_freq: freq_min.clamp(full.min_freq, full.max_freq),
            max_freq: freq_max.clamp(full.min_freq, full.max_freq),
            min_mag: mag_min.clamp(full.min_mag, full.max_mag),
            max_mag: mag_max.clamp(full.min_mag, full.max_mag),
        };

        if region.freq_range() > 0.0 && region.mag_range() > 0.0 {
            Some(region)
        } else {
            log::debug!("pixel selection inverted to an empty region: {sel:?}");
            None
        }
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
