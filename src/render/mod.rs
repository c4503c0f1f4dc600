/// Render pipeline: pure data → drawing instructions, no pixel output.
///
/// Architecture:
/// ```text
///   Sweep + ZoomWindow
///        │
///        ▼
///   ┌──────────┐
///   │  bounds   │  axis ranges with padding (or the zoom, verbatim)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  mapper   │  data ↔ pixel transforms, selection inversion
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ downsample │  stride decimation for path and markers
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  graph    │  grid, axes, labels, path, markers → Canvas calls
///   └──────────┘
/// ```
pub mod bounds;
pub mod canvas;
pub mod downsample;
pub mod graph;
pub mod mapper;
