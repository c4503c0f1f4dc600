//! End-to-end exercises of the load pipeline: worker-thread parse, one-shot
//! completion delivery, and store publication as seen by a render tick.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use s11scope::render::canvas::{Canvas, Color, PixelPoint, Stroke};
use s11scope::render::graph::render_sweep;
use s11scope::{SessionEvent, ViewerSession};

const GOOD_SWEEP: &str = "# Hz S RI R 50\n1000000 0.5 0.1\n2000000 0.4 0.2\n";

fn temp_sweep(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("s11scope_{}_{}", std::process::id(), name));
    std::fs::write(&path, contents).expect("write temp sweep");
    path
}

fn poll_until_complete(session: &mut ViewerSession) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !session.poll_load() {
        assert!(Instant::now() < deadline, "load did not complete in time");
        std::thread::sleep(Duration::from_millis(2));
    }
}

#[test]
fn load_publishes_sweep_to_the_store() {
    let path = temp_sweep("publish.s1p", GOOD_SWEEP);
    let mut session = ViewerSession::new();

    assert!(session.load_file(&path));
    assert!(session.is_loading());

    poll_until_complete(&mut session);

    assert!(!session.is_loading());
    assert!(session.has_data());
    assert_eq!(session.data_point_count(), 2);
    assert_eq!(session.error_message(), None);

    let store = session.store();
    let frame = store.read_frame();
    assert_eq!(frame.sweep.len(), 2);
    assert_eq!(frame.sweep.samples()[0].frequency, 1e6);
    assert_eq!(frame.sweep.samples()[1].frequency, 2e6);

    std::fs::remove_file(&path).ok();
}

#[test]
fn second_load_while_in_flight_is_rejected() {
    let path = temp_sweep("busy.s1p", GOOD_SWEEP);
    let mut session = ViewerSession::new();

    assert!(session.load_file(&path));
    // The first completion is not applied until poll_load runs, so the
    // pipeline is still busy no matter how fast the worker finished.
    assert!(!session.load_file(&path));

    poll_until_complete(&mut session);
    assert_eq!(session.data_point_count(), 2);

    // Exactly one completion was delivered.
    assert!(!session.poll_load());

    std::fs::remove_file(&path).ok();
}

#[test]
fn failed_reload_keeps_previous_measurement() {
    let good = temp_sweep("keep_good.s1p", GOOD_SWEEP);
    let bad = temp_sweep("keep_bad.s1p", "1000000 0.5 0.1\n");
    let mut session = ViewerSession::new();

    assert!(session.load_file(&good));
    poll_until_complete(&mut session);
    assert_eq!(session.data_point_count(), 2);

    assert!(session.load_file(&bad));
    poll_until_complete(&mut session);

    // The working view survives; only the message reports the failure.
    assert!(session.has_data());
    assert_eq!(session.data_point_count(), 2);
    assert_eq!(
        session.error_message(),
        Some("Invalid Touchstone file format. Expected format: # Hz S RI R 50")
    );

    std::fs::remove_file(&good).ok();
    std::fs::remove_file(&bad).ok();
}

#[test]
fn missing_file_reports_file_not_found() {
    let mut session = ViewerSession::new();
    let path = std::env::temp_dir().join("s11scope_definitely_missing.s1p");

    assert!(session.load_file(&path));
    poll_until_complete(&mut session);

    assert!(!session.has_data());
    let message = session.error_message().expect("an error message");
    assert!(message.starts_with("File not found: "), "{message}");
}

#[test]
fn loading_flag_fires_one_transition_each_way() {
    let path = temp_sweep("flags.s1p", GOOD_SWEEP);
    let mut session = ViewerSession::new();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    session.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    session.load_file(&path);
    poll_until_complete(&mut session);

    let seen = events.lock().unwrap();
    let loading: Vec<_> = seen
        .iter()
        .filter(|e| matches!(e, SessionEvent::LoadingChanged(_)))
        .collect();
    assert_eq!(
        loading,
        vec![
            &SessionEvent::LoadingChanged(true),
            &SessionEvent::LoadingChanged(false)
        ]
    );
    assert!(seen.contains(&SessionEvent::HasDataChanged(true)));
    assert!(seen.contains(&SessionEvent::DataPointCountChanged(2)));

    std::fs::remove_file(&path).ok();
}

// ---------------------------------------------------------------------------
// Render tick against the live store
// ---------------------------------------------------------------------------

#[derive(Default)]
struct CountingCanvas {
    lines: usize,
    ellipses: usize,
    texts: usize,
}

impl Canvas for CountingCanvas {
    fn fill_background(&mut self, _color: Color) {}
    fn set_stroke(&mut self, _stroke: Stroke) {}
    fn draw_line(&mut self, _from: PixelPoint, _to: PixelPoint) {
        self.lines += 1;
    }
    fn draw_ellipse(&mut self, _center: PixelPoint, _rx: f64, _ry: f64) {
        self.ellipses += 1;
    }
    fn draw_text(&mut self, _anchor: PixelPoint, _text: &str) {
        self.texts += 1;
    }
}

#[test]
fn render_tick_draws_the_loaded_sweep() {
    let path = temp_sweep("render.s1p", GOOD_SWEEP);
    let mut session = ViewerSession::new();
    session.load_file(&path);
    poll_until_complete(&mut session);

    let store = session.store();
    let mut canvas = CountingCanvas::default();
    let drawn = {
        let frame = store.read_frame();
        render_sweep(&mut canvas, &frame.sweep, &frame.zoom, 800.0, 600.0)
    };

    assert!(drawn);
    assert!(canvas.lines > 20); // grid + axes + one path segment
    assert_eq!(canvas.ellipses, 2);
    assert!(canvas.texts >= 14);

    std::fs::remove_file(&path).ok();
}
