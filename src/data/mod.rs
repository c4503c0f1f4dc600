/// Data layer: the sweep model and the Touchstone reader.
///
/// Architecture:
/// ```text
///      .s1p
///        │
///        ▼
///   ┌────────────┐
///   │ touchstone │  parse file → Sweep, or a tagged LoadError
///   └────────────┘
///        │
///        ▼
///   ┌────────────┐
///   │   Sweep    │  Vec<Sample>, file order
///   └────────────┘
///        +
///   ┌────────────┐
///   │ ZoomWindow │  active sub-rectangle of the data bounds
///   └────────────┘
/// ```
pub mod model;
pub mod touchstone;
