use rayon::prelude::*;

use crate::data::model::{Sweep, ZoomWindow};
use crate::render::bounds::compute_bounds;
use crate::render::canvas::{Canvas, Color, PixelPoint, Stroke};
use crate::render::downsample;
use crate::render::mapper::{PlotFrame, MARGIN};

// ---------------------------------------------------------------------------
// Graph render pass
// ---------------------------------------------------------------------------

/// Interior grid lines split the plot area into this many cells per axis.
const GRID_DIVISIONS: usize = 10;
/// Tick label intervals per axis.
const TICK_INTERVALS: usize = 5;
/// Above this many retained points the pixel mapping runs on the rayon pool.
const PARALLEL_MAP_THRESHOLD: usize = 500;

/// Draw one frame of the sweep onto `canvas`. Returns `false` when nothing
/// beyond the background was drawn: an empty sweep, a zero-extent axis
/// range, or a canvas smaller than its margins are all render-skips, not
/// errors.
pub fn render_sweep(
    canvas: &mut dyn Canvas,
    sweep: &Sweep,
    zoom: &ZoomWindow,
    width: f64,
    height: f64,
) -> bool {
    canvas.fill_background(Color::WHITE);

    if sweep.is_empty() {
        return false;
    }
    let Some(bounds) = compute_bounds(sweep, zoom) else {
        return false;
    };
    let Some(frame) = PlotFrame::new(bounds, width, height) else {
        log::debug!(
            "render skipped: degenerate geometry ({width}x{height}, {} samples)",
            sweep.len()
        );
        return false;
    };

    draw_grid(canvas, &frame);
    draw_axes(canvas, &frame);
    draw_labels(canvas, &frame);
    draw_path(canvas, sweep, &frame);
    draw_markers(canvas, sweep, zoom.active, &frame);
    true
}

fn draw_grid(canvas: &mut dyn Canvas, frame: &PlotFrame) {
    canvas.set_stroke(Stroke::dotted(Color::LIGHT_GRAY, 1.0));

    let (w, h) = (frame.width(), frame.height());
    for i in 1..GRID_DIVISIONS {
        let x = MARGIN + i as f64 * frame.plot_width() / GRID_DIVISIONS as f64;
        canvas.draw_line(PixelPoint::new(x, MARGIN), PixelPoint::new(x, h - MARGIN));
    }
    for i in 1..GRID_DIVISIONS {
        let y = MARGIN + i as f64 * frame.plot_height() / GRID_DIVISIONS as f64;
        canvas.draw_line(PixelPoint::new(MARGIN, y), PixelPoint::new(w - MARGIN, y));
    }
}

fn draw_axes(canvas: &mut dyn Canvas, frame: &PlotFrame) {
    canvas.set_stroke(Stroke::solid(Color::BLACK, 2.0));

    let (w, h) = (frame.width(), frame.height());
    canvas.draw_line(
        PixelPoint::new(MARGIN, h - MARGIN),
        PixelPoint::new(w - MARGIN, h - MARGIN),
    );
    canvas.draw_line(
        PixelPoint::new(MARGIN, MARGIN),
        PixelPoint::new(MARGIN, h - MARGIN),
    );
}

fn draw_labels(canvas: &mut dyn Canvas, frame: &PlotFrame) {
    canvas.set_stroke(Stroke::solid(Color::BLACK, 1.0));

    let (w, h) = (frame.width(), frame.height());
    let bounds = frame.bounds();

    canvas.draw_text(
        PixelPoint::new(w / 2.0 - 30.0, h - 10.0),
        "Frequency (Hz)",
    );
    canvas.draw_text(PixelPoint::new(15.0, h / 2.0), "|S11| (dB)");

    for i in 0..=TICK_INTERVALS {
        let t = i as f64 / TICK_INTERVALS as f64;
        let freq = bounds.min_freq + t * bounds.freq_range();
        let x = MARGIN + t * frame.plot_width();
        canvas.draw_text(
            PixelPoint::new(x - 20.0, h - MARGIN + 20.0),
            &format_frequency(freq),
        );
    }

    for i in 0..=TICK_INTERVALS {
        let t = i as f64 / TICK_INTERVALS as f64;
        let mag = bounds.min_mag + t * bounds.mag_range();
        let y = h - MARGIN - t * frame.plot_height();
        canvas.draw_text(PixelPoint::new(5.0, y + 5.0), &format!("{mag:.1}"));
    }
}

fn draw_path(canvas: &mut dyn Canvas, sweep: &Sweep, frame: &PlotFrame) {
    let indices = downsample::line_indices(sweep.len());
    let points = map_to_pixels(sweep, &indices, frame);

    canvas.set_stroke(Stroke::solid(Color::BLUE, 2.0));
    for pair in points.windows(2) {
        canvas.draw_line(pair[0], pair[1]);
    }
}

fn draw_markers(canvas: &mut dyn Canvas, sweep: &Sweep, zoomed: bool, frame: &PlotFrame) {
    if !downsample::markers_visible(sweep.len(), zoomed) {
        return;
    }
    let indices = downsample::marker_indices(sweep.len(), zoomed);
    let points = map_to_pixels(sweep, &indices, frame);

    canvas.set_stroke(Stroke::solid(Color::BLUE, 2.0));
    for point in points {
        canvas.draw_ellipse(point, 2.0, 2.0);
    }
}

/// Project the retained samples into pixel space, on the rayon pool for
/// large batches. The pointwise transform is order-independent, so both
/// paths produce identical output.
fn map_to_pixels(sweep: &Sweep, indices: &[usize], frame: &PlotFrame) -> Vec<PixelPoint> {
    let samples = sweep.samples();
    let project = |&i: &usize| {
        let s = &samples[i];
        frame.to_pixel(s.frequency, s.log_mag())
    };

    if indices.len() > PARALLEL_MAP_THRESHOLD {
        indices.par_iter().map(project).collect()
    } else {
        indices.iter().map(project).collect()
    }
}

/// Human-scale frequency tick label: `1.5G`, `144.2M`, `455.0k`, `800`.
pub fn format_frequency(freq: f64) -> String {
    if freq >= 1e9 {
        format!("{:.1}G", freq / 1e9)
    } else if freq >= 1e6 {
        format!("{:.1}M", freq / 1e6)
    } else if freq >= 1e3 {
        format!("{:.1}k", freq / 1e3)
    } else {
        format!("{freq:.0}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Sample;

    /// Canvas double that records every call for assertions.
    #[derive(Default)]
    struct RecordingCanvas {
        backgrounds: usize,
        lines: Vec<(PixelPoint, PixelPoint)>,
        ellipses: Vec<PixelPoint>,
        texts: Vec<(PixelPoint, String)>,
        strokes: Vec<Stroke>,
    }

    impl Canvas for RecordingCanvas {
        fn fill_background(&mut self, _color: Color) {
            self.backgrounds += 1;
        }
        fn set_stroke(&mut self, stroke: Stroke) {
            self.strokes.push(stroke);
        }
        fn draw_line(&mut self, from: PixelPoint, to: PixelPoint) {
            self.lines.push((from, to));
        }
        fn draw_ellipse(&mut self, center: PixelPoint, _rx: f64, _ry: f64) {
            self.ellipses.push(center);
        }
        fn draw_text(&mut self, anchor: PixelPoint, text: &str) {
            self.texts.push((anchor, text.to_string()));
        }
    }

    fn sweep_of(n: usize) -> Sweep {
        (0..n)
            .map(|i| Sample::new(1e6 + i as f64 * 1e4, 0.1 + 0.8 * (i as f64 / n as f64), 0.05))
            .collect()
    }

    #[test]
    fn empty_sweep_only_fills_background() {
        let mut canvas = RecordingCanvas::default();
        let drawn = render_sweep(&mut canvas, &Sweep::new(), &ZoomWindow::default(), 800.0, 600.0);
        assert!(!drawn);
        assert_eq!(canvas.backgrounds, 1);
        assert!(canvas.lines.is_empty());
        assert!(canvas.texts.is_empty());
    }

    #[test]
    fn tiny_canvas_is_a_render_skip() {
        let mut canvas = RecordingCanvas::default();
        let drawn = render_sweep(&mut canvas, &sweep_of(10), &ZoomWindow::default(), 100.0, 90.0);
        assert!(!drawn);
        assert!(canvas.lines.is_empty());
    }

    #[test]
    fn single_sample_is_a_render_skip() {
        let mut canvas = RecordingCanvas::default();
        let drawn = render_sweep(&mut canvas, &sweep_of(1), &ZoomWindow::default(), 800.0, 600.0);
        assert!(!drawn);
    }

    #[test]
    fn full_frame_draws_grid_axes_labels_path_markers() {
        let mut canvas = RecordingCanvas::default();
        let sweep = sweep_of(10);
        let drawn = render_sweep(&mut canvas, &sweep, &ZoomWindow::default(), 800.0, 600.0);
        assert!(drawn);

        // 18 grid lines + 2 axes + 9 path segments.
        assert_eq!(canvas.lines.len(), 18 + 2 + 9);
        // 2 captions + 6 frequency ticks + 6 magnitude ticks.
        assert_eq!(canvas.texts.len(), 2 + 6 + 6);
        // 10 markers, one per sample (short sweep).
        assert_eq!(canvas.ellipses.len(), 10);
    }

    #[test]
    fn long_sweep_drops_markers_and_strides_path() {
        let mut canvas = RecordingCanvas::default();
        let sweep = sweep_of(6000);
        render_sweep(&mut canvas, &sweep, &ZoomWindow::default(), 800.0, 600.0);

        assert!(canvas.ellipses.is_empty());
        // stride 3 → 2000 points → 1999 segments, plus grid and axes.
        assert_eq!(canvas.lines.len(), 18 + 2 + 1999);
    }

    #[test]
    fn zoomed_frame_shows_every_marker() {
        let mut canvas = RecordingCanvas::default();
        let sweep = sweep_of(6000);
        let zoom = ZoomWindow::region(1.1e6, 1.2e6, -10.0, 0.0);
        render_sweep(&mut canvas, &sweep, &zoom, 800.0, 600.0);
        assert_eq!(canvas.ellipses.len(), 6000);
    }

    #[test]
    fn all_geometry_stays_on_the_canvas() {
        let mut canvas = RecordingCanvas::default();
        let sweep = sweep_of(200);
        render_sweep(&mut canvas, &sweep, &ZoomWindow::default(), 640.0, 480.0);
        for (a, b) in &canvas.lines {
            for p in [a, b] {
                assert!(p.x >= 0.0 && p.x <= 640.0);
                assert!(p.y >= 0.0 && p.y <= 480.0);
            }
        }
    }

    #[test]
    fn frequency_formatting() {
        assert_eq!(format_frequency(2.45e9), "2.5G");
        assert_eq!(format_frequency(144.2e6), "144.2M");
        assert_eq!(format_frequency(455.0e3), "455.0k");
        assert_eq!(format_frequency(800.0), "800");
    }
}
