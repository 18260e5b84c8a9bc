/// Data layer: input models and file loading.
///
/// Architecture:
/// ```text
///  .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → DenseMatrix / PcaResult / ChartInput
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────────┐
///   │ Matrix2D / PcaResult  │  handed to the visualizer functions
///   └──────────────────────┘
/// ```

pub mod loader;
pub mod model;
