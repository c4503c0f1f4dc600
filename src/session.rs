use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::data::model::{Sweep, ZoomWindow};
use crate::data::touchstone::{self, LoadError};
use crate::render::bounds::compute_bounds;
use crate::render::mapper::{PixelRect, PlotFrame};
use crate::store::SweepStore;

// ---------------------------------------------------------------------------
// Observable events
// ---------------------------------------------------------------------------

/// Property-change notifications surfaced to the embedding UI layer. Each
/// fires only on a true value transition; a no-op command produces no event.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    HasDataChanged(bool),
    LoadingChanged(bool),
    ZoomChanged(bool),
    DataPointCountChanged(usize),
    ErrorMessageChanged(Option<String>),
}

type Listener = Box<dyn Fn(&SessionEvent) + Send>;

// ---------------------------------------------------------------------------
// Async load pipeline
// ---------------------------------------------------------------------------

/// One in-flight background parse. The channel delivers its single outcome
/// back to the owning context; the worker never writes the store itself.
struct PendingLoad {
    rx: Receiver<Result<Sweep, LoadError>>,
    worker: JoinHandle<()>,
    path: PathBuf,
}

/// Snapshot of the store-derived observables, taken before a mutation so the
/// session can emit change events for real transitions only.
#[derive(Clone, Copy, PartialEq)]
struct StoreFlags {
    has_data: bool,
    zoomed: bool,
    point_count: usize,
}

// ---------------------------------------------------------------------------
// ViewerSession – command surface for the embedding shell
// ---------------------------------------------------------------------------

/// Owns the shared store and the load pipeline, and exposes the command and
/// observable-property surface of the viewer core.
///
/// Threading contract: all methods run on the one owning context that also
/// drives render ticks. Parsing is the only blocking work and runs on a
/// spawned worker, at most one in flight; its result is applied by
/// [`poll_load`], called once per tick.
///
/// [`poll_load`]: ViewerSession::poll_load
pub struct ViewerSession {
    store: Arc<SweepStore>,
    pending: Option<PendingLoad>,
    error_message: Option<String>,
    listeners: Vec<Listener>,
}

impl Default for ViewerSession {
    fn default() -> Self {
        ViewerSession::new()
    }
}

impl ViewerSession {
    pub fn new() -> Self {
        ViewerSession {
            store: Arc::new(SweepStore::new()),
            pending: None,
            error_message: None,
            listeners: Vec::new(),
        }
    }

    /// The shared store. Render contexts keep a clone and take per-frame
    /// read guards from it.
    pub fn store(&self) -> Arc<SweepStore> {
        Arc::clone(&self.store)
    }

    /// Register a property-change listener.
    pub fn subscribe(&mut self, listener: impl Fn(&SessionEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // -- observable properties ----------------------------------------------

    pub fn has_data(&self) -> bool {
        self.store.has_data()
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    pub fn is_zoomed(&self) -> bool {
        self.store.is_zoomed()
    }

    pub fn data_point_count(&self) -> usize {
        self.store.point_count()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    // -- commands -----------------------------------------------------------

    /// Start loading a `.s1p` file on the worker. Returns `false` when the
    /// request was rejected: empty path, wrong extension, or a load already
    /// in flight (the latter leaves all observable state untouched).
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();

        if path.as_os_str().is_empty() {
            self.set_error(Some("Invalid file path".to_string()));
            return false;
        }
        if !has_s1p_extension(path) {
            self.set_error(Some(
                "Unsupported file format. Please select a Touchstone (.s1p) file.".to_string(),
            ));
            return false;
        }
        if self.pending.is_some() {
            log::warn!("load of {} rejected: a load is already in flight", path.display());
            return false;
        }

        self.set_loading(true);
        self.set_error(None);

        let (tx, rx) = mpsc::channel();
        let task_path = path.to_path_buf();
        let spawned = thread::Builder::new()
            .name("s1p-loader".to_string())
            .spawn(move || {
                let outcome = touchstone::load_sweep(&task_path);
                // A dropped receiver just means the session is gone.
                let _ = tx.send(outcome);
            });

        match spawned {
            Ok(worker) => {
                self.pending = Some(PendingLoad {
                    rx,
                    worker,
                    path: path.to_path_buf(),
                });
                true
            }
            Err(err) => {
                log::error!("failed to spawn loader thread: {err}");
                self.set_loading(false);
                self.set_error(Some(LoadError::FileNotFound(path.display().to_string()).to_string()));
                false
            }
        }
    }

    /// Apply a finished background parse, if one is waiting. Call once per
    /// tick from the owning context. Returns `true` when a completion was
    /// consumed.
    pub fn poll_load(&mut self) -> bool {
        let outcome = match &self.pending {
            None => return false,
            Some(pending) => match pending.rx.try_recv() {
                Ok(outcome) => outcome,
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Disconnected) => {
                    let path = pending.path.clone();
                    log::error!("loader thread died without a result for {}", path.display());
                    Err(LoadError::FileNotFound(path.display().to_string()))
                }
            },
        };

        let pending = self.pending.take().expect("pending load checked above");
        let _ = pending.worker.join();
        self.set_loading(false);

        match outcome {
            Ok(sweep) => {
                log::debug!(
                    "loaded {} samples from {}",
                    sweep.len(),
                    pending.path.display()
                );
                let before = self.store_flags();
                self.store.replace_sweep(sweep);
                self.notify_store_changes(before);
                self.set_error(None);
            }
            Err(err) => {
                // The previous measurement stays on screen; only the message
                // and the flags that actually moved are reported.
                log::warn!("load of {} failed: {err}", pending.path.display());
                self.set_error(Some(err.to_string()));
            }
        }
        true
    }

    /// Drop the measurement and zoom, regardless of any load in flight.
    pub fn clear_data(&mut self) {
        let before = self.store_flags();
        self.store.clear();
        self.notify_store_changes(before);
        self.set_error(None);
    }

    /// Zoom to an explicit data-space region. Malformed requests (NaN,
    /// negative frequency, empty ranges) are dropped without touching state.
    pub fn zoom_to_region(&mut self, freq_min: f64, freq_max: f64, mag_min: f64, mag_max: f64) {
        let malformed = freq_min.is_nan()
            || freq_max.is_nan()
            || mag_min.is_nan()
            || mag_max.is_nan()
            || freq_min < 0.0
            || freq_max < 0.0
            || freq_min >= freq_max
            || mag_min >= mag_max;
        if malformed {
            log::debug!(
                "invalid zoom parameters freq({freq_min}-{freq_max}) mag({mag_min}-{mag_max}) - ignoring"
            );
            return;
        }

        log::debug!("zoom set to freq({freq_min}-{freq_max}) mag({mag_min}-{mag_max})");
        let was_zoomed = self
            .store
            .set_zoom(ZoomWindow::region(freq_min, freq_max, mag_min, mag_max));
        if !was_zoomed {
            self.emit(&SessionEvent::ZoomChanged(true));
        }
    }

    /// Zoom to a pixel selection on a canvas of the given size. The
    /// selection is inverted through the *current* bounds (so zooms refine
    /// an existing zoom) and clamped to the unzoomed full-data bounds.
    pub fn zoom_to_pixel_region(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
        height: f64,
    ) {
        let region = {
            let frame = self.store.read_frame();
            if frame.sweep.is_empty() {
                return;
            }
            let Some(full) = compute_bounds(&frame.sweep, &ZoomWindow::default()) else {
                return;
            };
            let Some(current) = compute_bounds(&frame.sweep, &frame.zoom) else {
                return;
            };
            let Some(plot) = PlotFrame::new(current, width, height) else {
                log::debug!("zoom selection ignored: degenerate plot geometry {width}x{height}");
                return;
            };
            plot.region_from_pixels(PixelRect::new(x1, y1, x2, y2), &full)
        };

        match region {
            Some(r) => self.zoom_to_region(r.min_freq, r.max_freq, r.min_mag, r.max_mag),
            None => log::debug!("invalid zoom region - skipping"),
        }
    }

    /// Leave any zoom. Idempotent; notifies only when a zoom was active.
    pub fn reset_zoom(&mut self) {
        let was_zoomed = self.store.reset_zoom();
        if was_zoomed {
            log::debug!("zoom reset");
            self.emit(&SessionEvent::ZoomChanged(false));
        }
    }

    // -- internals ----------------------------------------------------------

    fn emit(&self, event: &SessionEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    fn set_error(&mut self, message: Option<String>) {
        if self.error_message != message {
            self.error_message = message;
            self.emit(&SessionEvent::ErrorMessageChanged(self.error_message.clone()));
        }
    }

    fn set_loading(&mut self, loading: bool) {
        let was = self.store.set_loading(loading);
        if was != loading {
            self.emit(&SessionEvent::LoadingChanged(loading));
        }
    }

    fn store_flags(&self) -> StoreFlags {
        StoreFlags {
            has_data: self.store.has_data(),
            zoomed: self.store.is_zoomed(),
            point_count: self.store.point_count(),
        }
    }

    fn notify_store_changes(&self, before: StoreFlags) {
        let after = self.store_flags();
        if after.has_data != before.has_data {
            self.emit(&SessionEvent::HasDataChanged(after.has_data));
        }
        if after.zoomed != before.zoomed {
            self.emit(&SessionEvent::ZoomChanged(after.zoomed));
        }
        if after.point_count != before.point_count {
            self.emit(&SessionEvent::DataPointCountChanged(after.point_count));
        }
    }
}

fn has_s1p_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("s1p"))
}
