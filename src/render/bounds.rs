use rayon::prelude::*;

use crate::data::model::{Sample, Sweep, ZoomWindow};
use crate::perf::ScopedTimer;

// ---------------------------------------------------------------------------
// Axis bounds – data-space extent of one rendered frame
// ---------------------------------------------------------------------------

/// Fraction of the frequency span added on each side of the natural range.
const FREQ_PADDING: f64 = 0.05;
/// Fraction of the magnitude span added on each side of the natural range.
const MAG_PADDING: f64 = 0.10;
/// Above this many samples the min/max scan runs on the rayon pool.
const PARALLEL_THRESHOLD: usize = 1000;

/// Derived axis ranges for one frame. Never persisted; recomputed from the
/// sweep (and zoom window) on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub min_freq: f64,
    pub max_freq: f64,
    pub min_mag: f64,
    pub max_mag: f64,
}

impl AxisBounds {
    pub fn freq_range(&self) -> f64 {
        self.max_freq - self.min_freq
    }

    pub fn mag_range(&self) -> f64 {
        self.max_mag - self.min_mag
    }

    /// Both axes have positive, finite extent. A sweep where every frequency
    /// (or every magnitude) is identical yields a zero range, which callers
    /// must treat as a render-skip, never a divisor.
    pub fn is_renderable(&self) -> bool {
        self.freq_range() > 0.0
            && self.mag_range() > 0.0
            && self.freq_range().is_finite()
            && self.mag_range().is_finite()
    }
}

/// Axis bounds for rendering `sweep` under `zoom`.
///
/// An active, internally valid zoom window is returned verbatim; explicit
/// zooms get no padding. Otherwise the natural frequency and log-magnitude
/// extents are found and padded outward on each side. Returns `None` for an
/// empty sweep.
pub fn compute_bounds(sweep: &Sweep, zoom: &ZoomWindow) -> Option<AxisBounds> {
    if sweep.is_empty() {
        return None;
    }

    if zoom.is_valid_region() {
        return Some(AxisBounds {
            min_freq: zoom.freq_min,
            max_freq: zoom.freq_max,
            min_mag: zoom.mag_min,
            max_mag: zoom.mag_max,
        });
    }

    let _timer = ScopedTimer::new("bounds scan");

    let samples = sweep.samples();
    let (min_freq, max_freq, min_mag, max_mag) = if samples.len() > PARALLEL_THRESHOLD {
        natural_extent_parallel(samples)
    } else {
        natural_extent(samples)
    };

    // Padding is additive to the natural range, applied after the scan;
    // a zero-range sweep therefore stays zero-range.
    let freq_pad = (max_freq - min_freq) * FREQ_PADDING;
    let mag_pad = (max_mag - min_mag) * MAG_PADDING;

    Some(AxisBounds {
        min_freq: min_freq - freq_pad,
        max_freq: max_freq + freq_pad,
        min_mag: min_mag - mag_pad,
        max_mag: max_mag + mag_pad,
    })
}

type Extent = (f64, f64, f64, f64);

const EMPTY_EXTENT: Extent = (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);

fn merge(a: Extent, b: Extent) -> Extent {
    (a.0.min(b.0), a.1.max(b.1), a.2.min(b.2), a.3.max(b.3))
}

fn sample_extent(sample: &Sample) -> Extent {
    let mag = sample.log_mag();
    (sample.frequency, sample.frequency, mag, mag)
}

fn natural_extent(samples: &[Sample]) -> Extent {
    samples
        .iter()
        .map(sample_extent)
        .fold(EMPTY_EXTENT, merge)
}

/// Same reduction on the rayon pool. `f64::min`/`f64::max` are associative
/// and commutative over the finite values a sweep holds, so the split order
/// cannot change the result: output is bit-identical to [`natural_extent`].
fn natural_extent_parallel(samples: &[Sample]) -> Extent {
    samples
        .par_iter()
        .map(sample_extent)
        .reduce(|| EMPTY_EXTENT, merge)
}
