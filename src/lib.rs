//! Shapes matrices, PCA scores and chart series into the JSON envelopes a
//! visualizer renders.
//!
//! ```text
//!  Matrix2D / PcaResult / raw x,y
//!        │
//!        ▼
//!   ┌────────────┐
//!   │ visualizer │  get_matrix, get_chart, get_pca_chart, ...
//!   └────────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ Chart / Serie │  fluent builders
//!   └──────────────┘
//!        │
//!        ▼
//!   {type, value} envelopes (serde::Serialize)
//! ```

pub mod chart;
pub mod color;
pub mod data;
pub mod error;
pub mod file;
pub mod visualizer;

pub use chart::serie::Serie;
pub use chart::Chart;
pub use data::model::{DenseMatrix, Matrix2D, PcaModel, PcaResult};
pub use error::{Result, VisualizerError};
pub use file::{FileAccess, FileAccessError, LocalFileAccess};
