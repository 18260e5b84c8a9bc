//! Conversion functions from domain objects to visualizer envelopes.
//!
//! Every function is a synchronous single pass: it builds fresh values and
//! hands them to the caller. The only collaborator is the [`FileAccess`]
//! passed to [`get_typed_url`].

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chart::serie::Serie;
use crate::chart::Chart;
use crate::data::model::{DenseMatrix, Matrix2D, PcaResult};
use crate::error::{Result, VisualizerError};
use crate::file::FileAccess;

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// `{type, value}` record the renderer dispatches on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixValue {
    pub x_label: Vec<Value>,
    pub y_label: Vec<Value>,
    pub data: Vec<Vec<f64>>,
}

pub type MatrixEnvelope = Envelope<MatrixValue>;

/// Styling fields every loading-plot point carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadingStyle {
    pub w: f64,
    pub c: String,
    pub a: i32,
    pub n: String,
    pub o: i32,
    pub lc: String,
    pub h: f64,
}

impl Default for LoadingStyle {
    fn default() -> Self {
        LoadingStyle {
            w: 0.2,
            c: "#000000".to_string(),
            a: 0,
            n: "none".to_string(),
            o: 1,
            lc: "#000000".to_string(),
            h: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadingPoint {
    #[serde(flatten)]
    pub style: LoadingStyle,
    /// Zero-based point index, as text.
    pub l: String,
    pub x: f64,
    pub y: f64,
    pub info: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadingSeries {
    pub data: Vec<LoadingPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadingValue {
    pub series: Vec<LoadingSeries>,
}

pub type LoadingEnvelope = Envelope<LoadingValue>;

/// Where the renderer finds the file: inline `value` for images, `url`
/// for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Value(String),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypedUrl {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub location: Location,
}

/// Render any envelope or chart as JSON text.
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatrixOptions {
    /// Column labels.
    pub x_label: Option<Vec<Value>>,
    /// Row labels.
    pub y_label: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartOptions {
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub serie_label: Option<String>,
    pub infos: Option<Vec<Value>>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PcaOptions {
    /// 1-based component on the x axis (default 1).
    pub x_values: Option<usize>,
    /// 1-based component on the y axis (default 2).
    pub y_values: Option<usize>,
    pub infos: Option<Vec<Value>>,
}

// ---------------------------------------------------------------------------
// Typed URL
// ---------------------------------------------------------------------------

const IMAGE_EXTENSIONS: &[&str] = &["gif", "png", "jpeg", "jpg", "tif", "tiff"];
const JCAMP_EXTENSIONS: &[&str] = &["dx", "jdx"];

/// Describe a file by type so the renderer knows how to fetch it.
pub fn get_typed_url(files: &dyn FileAccess, filename: &str) -> Result<TypedUrl> {
    let extension = filename
        .rsplit_once('.')
        .map_or(filename, |(_, ext)| ext)
        .to_lowercase();

    let url = files.read_url(filename)?;
    let typed = if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        TypedUrl {
            kind: extension,
            location: Location::Value(url),
        }
    } else if JCAMP_EXTENSIONS.contains(&extension.as_str()) {
        TypedUrl {
            kind: "jcamp".to_string(),
            location: Location::Url(url),
        }
    } else {
        TypedUrl {
            kind: extension,
            location: Location::Url(url),
        }
    };
    debug!("typed {filename} as {}", typed.kind);
    Ok(typed)
}

// ---------------------------------------------------------------------------
// Matrix
// ---------------------------------------------------------------------------

/// Format a matrix for the matrix module.
pub fn get_matrix<M: Matrix2D + ?Sized>(
    matrix: &M,
    options: &MatrixOptions,
) -> Result<MatrixEnvelope> {
    let data = matrix.to_2d_array();
    let columns = matrix.columns();
    if let Some(i) = data.iter().position(|row| row.len() != columns) {
        return Err(VisualizerError::TypeMismatch(format!(
            "argument must be a rectangular matrix: row {i} has {} columns, expected {columns}",
            data[i].len()
        )));
    }

    Ok(Envelope {
        kind: "matrix",
        value: MatrixValue {
            x_label: options.x_label.clone().unwrap_or_default(),
            y_label: options.y_label.clone().unwrap_or_default(),
            data,
        },
    })
}

/// [`get_matrix`] for a matrix arriving as untyped JSON.
pub fn get_matrix_from_value(value: &Value, options: &MatrixOptions) -> Result<MatrixEnvelope> {
    let matrix = DenseMatrix::from_json(value)?;
    get_matrix(&matrix, options)
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

pub fn create_chart() -> Chart {
    Chart::new()
}

/// Build a one-serie chart from raw coordinates.
///
/// Points without info get `null`. The axis labels are resolved but the
/// chart record has no place for them yet.
pub fn get_chart(x: Vec<f64>, y: Vec<f64>, options: ChartOptions) -> Chart {
    let x_label = options.x_label.unwrap_or_else(|| "X".to_string());
    let y_label = options.y_label.unwrap_or_else(|| "Y".to_string());
    debug!("chart axes: {x_label} / {y_label}");

    let info = options.infos.unwrap_or_else(|| vec![Value::Null; x.len()]);

    let mut chart = create_chart();
    chart.add_serie(options.serie_label.unwrap_or_default(), x, y, info);
    if let Some(title) = options.title.as_deref().filter(|t| !t.is_empty()) {
        chart.set_title(title);
    }
    chart
}

/// Chart of PCA scores: one point per observation, two chosen components.
pub fn get_pca_chart(pca: &PcaResult, options: &PcaOptions) -> Result<Chart> {
    let serie = pca_scores(pca, options)?;
    let mut chart = create_chart();
    chart.set_title("PCA scores").push_serie(serie);
    Ok(chart)
}

/// Loading plot of the same component selection as [`get_pca_chart`].
pub fn get_pca_loading_plot(pca: &PcaResult, options: &PcaOptions) -> Result<LoadingEnvelope> {
    let serie = pca_scores(pca, options)?.into_record();

    let data: Vec<LoadingPoint> = serie
        .x
        .into_iter()
        .zip(serie.y)
        .zip(serie.info)
        .enumerate()
        .map(|(i, ((x, y), info))| LoadingPoint {
            style: LoadingStyle::default(),
            l: i.to_string(),
            x,
            y,
            info,
        })
        .collect();

    Ok(Envelope {
        kind: "loading",
        value: LoadingValue {
            series: vec![LoadingSeries { data }],
        },
    })
}

fn pca_scores(pca: &PcaResult, options: &PcaOptions) -> Result<Serie> {
    if !pca.is_pca() {
        return Err(VisualizerError::InvalidInput(
            "the argument is not a valid PCA result".into(),
        ));
    }

    let x_comp = component_index(options.x_values, 1);
    let y_comp = component_index(options.y_values, 2);

    let first = pca
        .data
        .first()
        .ok_or_else(|| VisualizerError::InvalidInput("PCA result has no rows".into()))?;
    if x_comp >= first.len() || y_comp >= first.len() {
        return Err(VisualizerError::InvalidInput(format!(
            "xValues or yValues option is wrong: components {} and {} requested, {} available",
            x_comp + 1,
            y_comp + 1,
            first.len()
        )));
    }

    let mut serie = Serie::new("scores");
    for (i, row) in pca.data.iter().enumerate() {
        let (Some(&x), Some(&y)) = (row.get(x_comp), row.get(y_comp)) else {
            return Err(VisualizerError::InvalidInput(format!(
                "PCA row {i} has only {} components",
                row.len()
            )));
        };
        let info = options
            .infos
            .as_ref()
            .and_then(|infos| infos.get(i).cloned())
            .unwrap_or(Value::Null);
        serie.add_point(x, y, info);
    }

    info!(
        "PCA scores: {} points on components {} / {}",
        serie.len(),
        x_comp + 1,
        y_comp + 1
    );
    Ok(serie)
}

/// Zero-based index of a 1-based component option; absent or 0 means default.
fn component_index(option: Option<usize>, default: usize) -> usize {
    match option {
        Some(n) if n > 0 => n - 1,
        _ => default - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn component_defaults() {
        assert_eq!(component_index(None, 2), 1);
        assert_eq!(component_index(Some(0), 1), 0);
        assert_eq!(component_index(Some(3), 1), 2);
    }

    #[test]
    fn typed_url_serializes_flat() {
        let typed = TypedUrl {
            kind: "png".into(),
            location: Location::Value("u".into()),
        };
        assert_eq!(
            serde_json::to_value(&typed).unwrap(),
            json!({ "type": "png", "value": "u" })
        );
    }

    #[test]
    fn loading_point_carries_default_style() {
        let point = LoadingPoint {
            style: LoadingStyle::default(),
            l: "0".into(),
            x: 1.0,
            y: 2.0,
            info: Value::Null,
        };
        assert_eq!(
            serde_json::to_value(&point).unwrap(),
            json!({
                "w": 0.2, "c": "#000000", "a": 0, "n": "none", "o": 1,
                "lc": "#000000", "h": 0.2, "l": "0", "x": 1.0, "y": 2.0, "info": null
            })
        );
    }

    #[test]
    fn to_json_compact_and_pretty() {
        let mut chart = Chart::new();
        chart.set_title("T");
        let compact = to_json(&chart, false).unwrap();
        assert_eq!(compact, r#"{"type":"chart","value":{"title":"T","axis":{},"data":[]}}"#);
        let pretty = to_json(&chart, true).unwrap();
        assert!(pretty.contains('\n'));
        let reparsed: Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(reparsed, serde_json::from_str::<Value>(&compact).unwrap());
    }

    #[test]
    fn chart_without_infos_pads_with_null() {
        let chart = get_chart(vec![1.0, 2.0], vec![3.0, 4.0], ChartOptions::default());
        assert_eq!(chart.series()[0].info(), &[Value::Null, Value::Null]);
        assert_eq!(chart.title(), "");
        assert!(chart.validate().is_ok());
    }
}
