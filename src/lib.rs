//! s11scope: single-port Touchstone (`.s1p`) measurement viewer core.
//!
//! Parses RI-format `.s1p` sweeps, derives plot bounds and pixel transforms,
//! downsamples for interactive rendering, and publishes measurements through
//! a concurrency-safe store with an off-thread load pipeline. Pixel output
//! itself is delegated to an injected [`render::canvas::Canvas`]; the
//! surrounding shell owns windows, dialogs, and the event loop.
//!
//! ```text
//!  path ──▶ ViewerSession::load_file ──▶ worker: touchstone::load_sweep
//!                                              │ (mpsc, exactly once)
//!            ViewerSession::poll_load ◀────────┘
//!                     │ on success
//!                     ▼
//!               SweepStore (RwLock: Sweep + ZoomWindow)
//!                     │ read_frame, once per tick
//!                     ▼
//!         render::graph::render_sweep ──▶ Canvas draw calls
//! ```

pub mod data;
pub mod perf;
pub mod render;
pub mod session;
pub mod store;

pub use data::model::{Sample, Sweep, ZoomWindow};
pub use data::touchstone::{load_sweep, parse_sweep, LoadError};
pub use session::{SessionEvent, ViewerSession};
pub use store::SweepStore;
