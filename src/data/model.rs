use num_complex::Complex64;

// ---------------------------------------------------------------------------
// Sample – one sweep point
// ---------------------------------------------------------------------------

/// A single measurement point: stimulus frequency and the complex reflection
/// coefficient (S11) seen at port 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Stimulus frequency in Hz.
    pub frequency: f64,
    /// S11 in real/imaginary form.
    pub reflection: Complex64,
}

impl Sample {
    pub fn new(frequency: f64, re: f64, im: f64) -> Self {
        Sample {
            frequency,
            reflection: Complex64::new(re, im),
        }
    }

    /// Log-magnitude of the reflection coefficient, `20·log10(|S11|)`, the
    /// dB quantity plotted on the vertical axis.
    pub fn log_mag(&self) -> f64 {
        20.0 * self.reflection.norm().log10()
    }
}

// ---------------------------------------------------------------------------
// Sweep – the full measurement series
// ---------------------------------------------------------------------------

/// An ordered frequency sweep as read from file. Samples keep file order;
/// the parser never sorts or deduplicates them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sweep {
    samples: Vec<Sample>,
}

impl Sweep {
    pub fn new() -> Self {
        Sweep::default()
    }

    /// Pre-size the series when the caller can estimate the sample count.
    pub fn with_capacity(capacity: usize) -> Self {
        Sweep {
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of sweep points.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the sweep holds no points.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl FromIterator<Sample> for Sweep {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Sweep {
            samples: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// ZoomWindow – active sub-rectangle of the data bounds
// ---------------------------------------------------------------------------

/// A data-space sub-rectangle used for rendering instead of the full-sweep
/// bounds. The range fields are meaningless while `active` is false.
///
/// Lifecycle: created inactive, activated by a valid zoom selection, cleared
/// by an explicit reset or by loading a new file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ZoomWindow {
    pub freq_min: f64,
    pub freq_max: f64,
    pub mag_min: f64,
    pub mag_max: f64,
    pub active: bool,
}

impl ZoomWindow {
    /// An active window over the given data region.
    pub fn region(freq_min: f64, freq_max: f64, mag_min: f64, mag_max: f64) -> Self {
        ZoomWindow {
            freq_min,
            freq_max,
            mag_min,
            mag_max,
            active: true,
        }
    }

    /// Active and internally ordered on both axes.
    pub fn is_valid_region(&self) -> bool {
        self.active && self.freq_min < self.freq_max && self.mag_min < self.mag_max
    }
}
