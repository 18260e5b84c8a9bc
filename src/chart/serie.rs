use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, VisualizerError};

// ---------------------------------------------------------------------------
// SerieRecord – the serialized shape of one serie
// ---------------------------------------------------------------------------

/// The record embedded in a chart envelope's `data` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerieRecord {
    pub serie_label: String,
    pub x: Vec<f64>,
    /// Same length as `x` once the serie is consistent.
    pub y: Vec<f64>,
    /// Per-point metadata, `null` when a point carries none.
    pub info: Vec<Value>,
    /// Rendering hints (color, line style, ...).
    pub options: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Serie – fluent builder
// ---------------------------------------------------------------------------

/// One named set of (x, y, info) points rendered as a single dataset.
///
/// Every mutator returns `&mut Self` so calls can be chained:
///
/// ```
/// # use visualizer_kit::Serie;
/// # use serde_json::Value;
/// let mut serie = Serie::new("peaks");
/// serie.add_point(1.0, 2.0, Value::Null).set_option("color", "#ff0000".into());
/// assert_eq!(serie.len(), 1);
/// ```
///
/// Only [`Serie::add_point`] keeps `x`, `y` and `info` aligned on its own;
/// after `set_x` / `set_y` / `set_info` the caller is responsible for the
/// lengths, which [`Serie::validate`] checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Serie {
    value: SerieRecord,
}

impl Serie {
    pub fn new(label: impl Into<String>) -> Self {
        Serie {
            value: SerieRecord {
                serie_label: label.into(),
                x: Vec::new(),
                y: Vec::new(),
                info: Vec::new(),
                options: Map::new(),
            },
        }
    }

    /// Replace the x values.
    pub fn set_x(&mut self, x: Vec<f64>) -> &mut Self {
        self.value.x = x;
        self
    }

    /// Replace the y values.
    pub fn set_y(&mut self, y: Vec<f64>) -> &mut Self {
        self.value.y = y;
        self
    }

    /// Replace the info objects.
    pub fn set_info(&mut self, info: Vec<Value>) -> &mut Self {
        self.value.info = info;
        self
    }

    pub fn add_point(&mut self, x: f64, y: f64, info: Value) -> &mut Self {
        self.value.x.push(x);
        self.value.y.push(y);
        self.value.info.push(info);
        self
    }

    /// Replace the whole options mapping.
    pub fn set_options(&mut self, options: Map<String, Value>) -> &mut Self {
        self.value.options = options;
        self
    }

    pub fn set_option(&mut self, key: &str, value: Value) -> &mut Self {
        self.value.options.insert(key.to_string(), value);
        self
    }

    /// Like [`Serie::set_option`] for a key of unknown JSON type.
    /// Anything but a JSON string is ignored.
    pub fn try_set_option(&mut self, key: &Value, value: Value) -> &mut Self {
        match key.as_str() {
            Some(k) => self.set_option(k, value),
            None => self,
        }
    }

    /// The record as embedded in the chart envelope (borrowed, not copied).
    pub fn record(&self) -> &SerieRecord {
        &self.value
    }

    pub fn into_record(self) -> SerieRecord {
        self.value
    }

    pub fn label(&self) -> &str {
        &self.value.serie_label
    }

    pub fn x(&self) -> &[f64] {
        &self.value.x
    }

    pub fn y(&self) -> &[f64] {
        &self.value.y
    }

    pub fn info(&self) -> &[Value] {
        &self.value.info
    }

    pub fn options(&self) -> &Map<String, Value> {
        &self.value.options
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.value.options.get(key)
    }

    /// Number of points, counted on `x`.
    pub fn len(&self) -> usize {
        self.value.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.x.is_empty()
    }

    /// Check that `x`, `y` and `info` have the same length.
    pub fn validate(&self) -> Result<()> {
        let SerieRecord { x, y, info, .. } = &self.value;
        if x.len() != y.len() || x.len() != info.len() {
            return Err(VisualizerError::InvalidInput(format!(
                "serie '{}': x has {} values, y has {}, info has {}",
                self.value.serie_label,
                x.len(),
                y.len(),
                info.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn add_point_keeps_arrays_aligned_in_call_order() {
        let mut serie = Serie::new("s");
        for i in 0..5 {
            serie.add_point(i as f64, (i * 10) as f64, json!({ "id": i }));
        }
        assert_eq!(serie.x(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(serie.y(), &[0.0, 10.0, 20.0, 30.0, 40.0]);
        assert_eq!(serie.info().len(), 5);
        assert_eq!(serie.info()[3], json!({ "id": 3 }));
        assert!(serie.validate().is_ok());
    }

    #[test]
    fn setters_replace_wholesale_without_reconciling() {
        let mut serie = Serie::new("s");
        serie.add_point(1.0, 1.0, Value::Null);
        serie.set_x(vec![1.0, 2.0, 3.0]);

        assert_eq!(serie.len(), 3);
        assert_eq!(serie.y().len(), 1);
        let err = serie.validate().unwrap_err();
        assert!(matches!(err, VisualizerError::InvalidInput(_)));

        serie
            .set_y(vec![4.0, 5.0, 6.0])
            .set_info(vec![Value::Null; 3]);
        assert!(serie.validate().is_ok());
    }

    #[test]
    fn options_upsert_and_replace() {
        let mut serie = Serie::new("s");
        serie
            .set_option("color", json!("red"))
            .set_option("color", json!("blue"))
            .set_option("lineWidth", json!(2));
        assert_eq!(serie.option("color"), Some(&json!("blue")));
        assert_eq!(serie.options().len(), 2);

        let mut fresh = Map::new();
        fresh.insert("dash".to_string(), json!(true));
        serie.set_options(fresh);
        assert_eq!(serie.options().len(), 1);
        assert!(serie.option("color").is_none());
    }

    #[test]
    fn non_string_option_key_is_ignored() {
        let mut serie = Serie::new("s");
        serie
            .try_set_option(&json!(42), json!("x"))
            .try_set_option(&Value::Null, json!("y"))
            .try_set_option(&json!("marker"), json!("circle"));
        assert_eq!(serie.options().len(), 1);
        assert_eq!(serie.option("marker"), Some(&json!("circle")));
    }

    #[test]
    fn serializes_with_renderer_field_names() {
        let mut serie = Serie::new("scores");
        serie.add_point(1.5, -2.0, Value::Null);
        let out = serde_json::to_value(&serie).unwrap();
        assert_eq!(
            out,
            json!({
                "serieLabel": "scores",
                "x": [1.5],
                "y": [-2.0],
                "info": [null],
                "options": {}
            })
        );
    }

    #[test]
    fn record_borrows_the_internal_value() {
        let serie = Serie::new("s");
        let a = serie.record() as *const SerieRecord;
        let b = serie.record() as *const SerieRecord;
        assert_eq!(a, b);
    }
}
