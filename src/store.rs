use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard};

use crate::data::model::{Sweep, ZoomWindow};

// ---------------------------------------------------------------------------
// Shared measurement store
// ---------------------------------------------------------------------------

/// The sweep and zoom window a frame is rendered from. Both live behind one
/// lock so a render pass can never pair a fresh sweep with a stale window.
#[derive(Debug, Default)]
pub struct ViewFrame {
    pub sweep: Sweep,
    pub zoom: ZoomWindow,
}

/// Concurrency-safe holder of the current measurement.
///
/// Readers are render passes, which take one [`read_frame`] guard for the
/// whole frame; writers (load completion, clear, zoom changes) go through
/// the owning context and exclude all readers. The boolean flags are plain
/// atomics so they can be sampled without touching the lock; the flag
/// mutators return the previous value so the caller can notify on true
/// transitions only.
///
/// [`read_frame`]: SweepStore::read_frame
#[derive(Debug, Default)]
pub struct SweepStore {
    frame: RwLock<ViewFrame>,
    has_data: AtomicBool,
    loading: AtomicBool,
    zoomed: AtomicBool,
    point_count: AtomicUsize,
}

impl SweepStore {
    pub fn new() -> Self {
        SweepStore::default()
    }

    /// Borrow the current frame for the duration of one render pass. The
    /// guard must not outlive the frame being drawn.
    pub fn read_frame(&self) -> RwLockReadGuard<'_, ViewFrame> {
        self.frame.read().expect("measurement store poisoned")
    }

    /// Install a freshly parsed sweep wholesale. Any active zoom belongs to
    /// the previous measurement and is dropped with it.
    pub fn replace_sweep(&self, sweep: Sweep) {
        let mut frame = self.frame.write().expect("measurement store poisoned");
        self.point_count.store(sweep.len(), Ordering::Release);
        self.has_data.store(!sweep.is_empty(), Ordering::Release);
        self.zoomed.store(false, Ordering::Release);
        frame.sweep = sweep;
        frame.zoom = ZoomWindow::default();
    }

    /// Drop the measurement and zoom entirely.
    pub fn clear(&self) {
        let mut frame = self.frame.write().expect("measurement store poisoned");
        self.point_count.store(0, Ordering::Release);
        self.has_data.store(false, Ordering::Release);
        self.zoomed.store(false, Ordering::Release);
        frame.sweep = Sweep::new();
        frame.zoom = ZoomWindow::default();
    }

    /// Publish a new zoom window. Returns whether a zoom was active before.
    pub fn set_zoom(&self, zoom: ZoomWindow) -> bool {
        let mut frame = self.frame.write().expect("measurement store poisoned");
        let was_zoomed = self.zoomed.swap(zoom.active, Ordering::AcqRel);
        frame.zoom = zoom;
        was_zoomed
    }

    /// Deactivate any zoom. Returns whether one was active. Idempotent.
    pub fn reset_zoom(&self) -> bool {
        self.set_zoom(ZoomWindow::default())
    }

    pub fn has_data(&self) -> bool {
        self.has_data.load(Ordering::Acquire)
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Flip the loading flag, returning its previous value.
    pub fn set_loading(&self, loading: bool) -> bool {
        self.loading.swap(loading, Ordering::AcqRel)
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed.load(Ordering::Acquire)
    }

    pub fn point_count(&self) -> usize {
        self.point_count.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Sample;

    fn sweep_of(n: usize) -> Sweep {
        (0..n)
            .map(|i| Sample::new(1e6 + i as f64, 0.5, 0.1))
            .collect()
    }

    #[test]
    fn starts_empty_and_inactive() {
        let store = SweepStore::new();
        assert!(!store.has_data());
        assert!(!store.is_loading());
        assert!(!store.is_zoomed());
        assert_eq!(store.point_count(), 0);
        assert!(store.read_frame().sweep.is_empty());
    }

    #[test]
    fn replace_installs_sweep_and_drops_zoom() {
        let store = SweepStore::new();
        store.set_zoom(ZoomWindow::region(1.0, 2.0, -20.0, -10.0));
        assert!(store.is_zoomed());

        store.replace_sweep(sweep_of(3));
        assert!(store.has_data());
        assert!(!store.is_zoomed());
        assert_eq!(store.point_count(), 3);

        let frame = store.read_frame();
        assert_eq!(frame.sweep.len(), 3);
        assert!(!frame.zoom.active);
    }

    #[test]
    fn clear_resets_everything_observable() {
        let store = SweepStore::new();
        store.replace_sweep(sweep_of(5));
        store.set_zoom(ZoomWindow::region(1.0, 2.0, -20.0, -10.0));

        store.clear();
        assert!(!store.has_data());
        assert!(!store.is_zoomed());
        assert_eq!(store.point_count(), 0);
        assert!(store.read_frame().sweep.is_empty());
    }

    #[test]
    fn zoom_setters_report_prior_state() {
        let store = SweepStore::new();
        assert!(!store.set_zoom(ZoomWindow::region(1.0, 2.0, -20.0, -10.0)));
        assert!(store.set_zoom(ZoomWindow::region(1.2, 1.8, -18.0, -12.0)));
        assert!(store.reset_zoom());
        assert!(!store.reset_zoom());
    }

    #[test]
    fn loading_flag_swaps() {
        let store = SweepStore::new();
        assert!(!store.set_loading(true));
        assert!(store.is_loading());
        assert!(store.set_loading(false));
        assert!(!store.is_loading());
    }

    #[test]
    fn frame_guard_sees_consistent_pair() {
        let store = SweepStore::new();
        store.replace_sweep(sweep_of(2));
        store.set_zoom(ZoomWindow::region(1e6, 2e6, -20.0, -10.0));

        let frame = store.read_frame();
        assert_eq!(frame.sweep.len(), 2);
        assert!(frame.zoom.active);
    }
}
