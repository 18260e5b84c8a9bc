use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, VisualizerError};

// ---------------------------------------------------------------------------
// Matrix2D – anything that can be laid out as rows of numbers
// ---------------------------------------------------------------------------

/// A rectangular numeric matrix.
pub trait Matrix2D {
    fn rows(&self) -> usize;
    fn columns(&self) -> usize;
    /// Row-major copy of the values.
    fn to_2d_array(&self) -> Vec<Vec<f64>>;
}

impl Matrix2D for Vec<Vec<f64>> {
    fn rows(&self) -> usize {
        self.len()
    }

    fn columns(&self) -> usize {
        self.first().map_or(0, Vec::len)
    }

    fn to_2d_array(&self) -> Vec<Vec<f64>> {
        self.clone()
    }
}

// ---------------------------------------------------------------------------
// DenseMatrix – row-major storage
// ---------------------------------------------------------------------------

/// A dense row-major matrix whose rows are guaranteed to have equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    columns: usize,
    values: Vec<f64>,
}

impl DenseMatrix {
    /// Build from nested rows; ragged input is a [`VisualizerError::TypeMismatch`].
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(rows.len() * columns);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(VisualizerError::TypeMismatch(format!(
                    "not a matrix: row {i} has {} columns, expected {columns}",
                    row.len()
                )));
            }
            values.extend_from_slice(row);
        }
        Ok(DenseMatrix {
            rows: rows.len(),
            columns,
            values,
        })
    }

    /// Interpret a JSON value as a matrix: an array of equally long arrays
    /// of numbers.
    pub fn from_json(value: &Value) -> Result<Self> {
        let outer = value.as_array().ok_or_else(|| {
            VisualizerError::TypeMismatch("argument must be a 2D array of numbers".into())
        })?;
        let rows = outer
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let cells = row.as_array().ok_or_else(|| {
                    VisualizerError::TypeMismatch(format!("not a matrix: row {i} is not an array"))
                })?;
                cells
                    .iter()
                    .enumerate()
                    .map(|(j, cell)| {
                        cell.as_f64().ok_or_else(|| {
                            VisualizerError::TypeMismatch(format!(
                                "not a matrix: [{i}][{j}] is not a number"
                            ))
                        })
                    })
                    .collect::<Result<Vec<f64>>>()
            })
            .collect::<Result<Vec<Vec<f64>>>>()?;
        Self::from_rows(rows)
    }
}

impl Matrix2D for DenseMatrix {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn to_2d_array(&self) -> Vec<Vec<f64>> {
        if self.columns == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.values
            .chunks(self.columns)
            .map(<[f64]>::to_vec)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// PcaResult – scores produced by an external PCA
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcaModel {
    pub name: String,
}

/// Principal component analysis output: one row of component scores per
/// observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcaResult {
    #[serde(default)]
    pub model: Option<PcaModel>,
    #[serde(default)]
    pub data: Vec<Vec<f64>>,
}

impl PcaResult {
    pub const MODEL_NAME: &'static str = "PCA";

    pub fn new(data: Vec<Vec<f64>>) -> Self {
        PcaResult {
            model: Some(PcaModel {
                name: Self::MODEL_NAME.to_string(),
            }),
            data,
        }
    }

    /// Whether the record was produced by a PCA model.
    pub fn is_pca(&self) -> bool {
        self.model
            .as_ref()
            .is_some_and(|m| m.name == Self::MODEL_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dense_matrix_round_trips_rows() {
        let rows = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        let m = DenseMatrix::from_rows(rows.clone()).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.columns(), 3);
        assert_eq!(m.to_2d_array(), rows);
    }

    #[test]
    fn ragged_rows_are_a_type_mismatch() {
        let err = DenseMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, VisualizerError::TypeMismatch(_)));
    }

    #[test]
    fn json_matrix_requires_numbers() {
        assert!(DenseMatrix::from_json(&json!([[1, 2], [3, 4.5]])).is_ok());
        for bad in [json!({ "a": 1 }), json!([1, 2]), json!([[1, "x"]])] {
            let err = DenseMatrix::from_json(&bad).unwrap_err();
            assert!(matches!(err, VisualizerError::TypeMismatch(_)), "{bad}");
        }
    }

    #[test]
    fn zero_width_matrix_keeps_its_rows() {
        let m = DenseMatrix::from_rows(vec![Vec::new(); 3]).unwrap();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.columns(), 0);
        assert_eq!(m.to_2d_array(), vec![Vec::<f64>::new(); 3]);
    }

    #[test]
    fn pca_model_name_is_checked() {
        assert!(PcaResult::new(vec![]).is_pca());
        let other: PcaResult =
            serde_json::from_value(json!({ "model": { "name": "PLS" }, "data": [] })).unwrap();
        assert!(!other.is_pca());
        let missing: PcaResult = serde_json::from_value(json!({ "data": [[1.0]] })).unwrap();
        assert!(!missing.is_pca());
    }
}
