use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{DenseMatrix, Matrix2D, PcaResult};
use crate::visualizer::ChartOptions;

// ---------------------------------------------------------------------------
// Matrix input
// ---------------------------------------------------------------------------

/// Load a numeric matrix from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[[1, 2], [3, 4]]` or `{ "data": [[1, 2], [3, 4]] }`
/// * `.csv`  – one matrix row per line, no header
pub fn load_matrix(path: &Path) -> Result<DenseMatrix> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let matrix = match ext.as_str() {
        "json" => load_matrix_json(path)?,
        "csv" => load_matrix_csv(path)?,
        other => bail!("Unsupported matrix file extension: .{other}"),
    };
    info!(
        "loaded {}x{} matrix from {}",
        matrix.rows(),
        matrix.columns(),
        path.display()
    );
    Ok(matrix)
}

fn load_matrix_json(path: &Path) -> Result<DenseMatrix> {
    let root = read_json(path)?;
    let data = match &root {
        JsonValue::Object(obj) => obj
            .get("data")
            .context("Expected a 'data' member holding the matrix rows")?,
        other => other,
    };
    Ok(DenseMatrix::from_json(data)?)
}

fn load_matrix_csv(path: &Path) -> Result<DenseMatrix> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row = record
            .iter()
            .enumerate()
            .map(|(j, cell)| {
                cell.parse::<f64>()
                    .with_context(|| format!("Row {row_no}, column {j}: '{cell}' is not a number"))
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    Ok(DenseMatrix::from_rows(rows)?)
}

// ---------------------------------------------------------------------------
// PCA / chart / info inputs
// ---------------------------------------------------------------------------

/// Expected JSON schema:
///
/// ```json
/// { "model": { "name": "PCA" }, "data": [[0.12, -1.3], [0.98, 0.4]] }
/// ```
pub fn load_pca(path: &Path) -> Result<PcaResult> {
    let pca: PcaResult = serde_json::from_value(read_json(path)?).context("parsing PCA result")?;
    info!("loaded PCA result with {} rows from {}", pca.data.len(), path.display());
    Ok(pca)
}

/// Raw coordinates and options for a single-serie chart.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartInput {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(default)]
    pub options: ChartOptions,
}

/// Expected JSON schema:
///
/// ```json
/// { "x": [1, 2, 3], "y": [4, 5, 6], "options": { "serieLabel": "s", "title": "T" } }
/// ```
pub fn load_chart_input(path: &Path) -> Result<ChartInput> {
    let input: ChartInput =
        serde_json::from_value(read_json(path)?).context("parsing chart input")?;
    if input.x.len() != input.y.len() {
        bail!("x has {} values but y has {}", input.x.len(), input.y.len());
    }
    Ok(input)
}

/// A top-level JSON array with one info object (or `null`) per point.
pub fn load_infos(path: &Path) -> Result<Vec<JsonValue>> {
    match read_json(path)? {
        JsonValue::Array(items) => Ok(items),
        _ => bail!("Expected top-level JSON array of info objects"),
    }
}

fn read_json(path: &Path) -> Result<JsonValue> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading JSON file {}", path.display()))?;
    serde_json::from_str(&text).context("parsing JSON")
}
