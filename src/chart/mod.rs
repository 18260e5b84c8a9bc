/// Chart layer: a titled list of series and its JSON record.
///
/// ```text
///   Chart ──┬── Serie "a"   {serieLabel, x, y, info, options}
///           ├── Serie "b"
///           └── ...
///
///   record() → {type: "chart", value: {title, axis: {}, data: [...]}}
/// ```
pub mod serie;

use log::debug;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::color::generate_palette;
use crate::error::Result;

use self::serie::Serie;

// ---------------------------------------------------------------------------
// Chart record (serialized form)
// ---------------------------------------------------------------------------

/// `{type: "chart", value: ...}` borrowing the chart it was built from.
#[derive(Debug, Clone, Serialize)]
pub struct ChartRecord<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: ChartValue<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartValue<'a> {
    pub title: &'a str,
    /// Always empty; reserved for the renderer.
    pub axis: Map<String, Value>,
    pub data: &'a [Serie],
}

// ---------------------------------------------------------------------------
// Chart – fluent builder
// ---------------------------------------------------------------------------

/// A titled collection of series forming one renderable figure.
/// Series order is render order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chart {
    title: String,
    series: Vec<Serie>,
}

impl Chart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    /// Set the title from a JSON value; anything but a string is ignored.
    pub fn try_set_title(&mut self, title: &Value) -> &mut Self {
        match title.as_str() {
            Some(t) => self.set_title(t),
            None => self,
        }
    }

    /// Build a serie from whole arrays and append it. Returns the chart.
    pub fn add_serie(
        &mut self,
        label: impl Into<String>,
        x: Vec<f64>,
        y: Vec<f64>,
        info: Vec<Value>,
    ) -> &mut Self {
        let mut serie = Serie::new(label);
        serie.set_x(x).set_y(y).set_info(info);
        self.series.push(serie);
        self
    }

    /// Append an empty serie and return it for point-by-point filling.
    pub fn new_serie(&mut self, label: impl Into<String>) -> &mut Serie {
        self.series.push(Serie::new(label));
        let last = self.series.len() - 1;
        &mut self.series[last]
    }

    /// Append an already built serie.
    pub fn push_serie(&mut self, serie: Serie) -> &mut Self {
        self.series.push(serie);
        self
    }

    /// Give every serie without a `color` option a distinct palette colour.
    pub fn apply_palette(&mut self) -> &mut Self {
        let colors = generate_palette(self.series.len());
        for (serie, color) in self.series.iter_mut().zip(colors) {
            if serie.option("color").is_none() {
                serie.set_option("color", Value::String(color));
            }
        }
        debug!("applied palette to {} series", self.series.len());
        self
    }

    pub fn record(&self) -> ChartRecord<'_> {
        ChartRecord {
            kind: "chart",
            value: ChartValue {
                title: &self.title,
                axis: Map::new(),
                data: &self.series,
            },
        }
    }

    /// Check the point arrays of every serie.
    pub fn validate(&self) -> Result<()> {
        self.series.iter().try_for_each(Serie::validate)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn series(&self) -> &[Serie] {
        &self.series
    }

    /// Number of series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl Serialize for Chart {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.record().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_chart_is_empty_and_untitled() {
        let chart = Chart::new();
        assert_eq!(chart.title(), "");
        assert!(chart.is_empty());
        assert_eq!(
            serde_json::to_value(&chart).unwrap(),
            json!({ "type": "chart", "value": { "title": "", "axis": {}, "data": [] } })
        );
    }

    #[test]
    fn new_serie_returns_the_serie_for_filling() {
        let mut chart = Chart::new();
        chart.new_serie("s").add_point(1.0, 2.0, Value::Null);

        let out = serde_json::to_value(chart.record()).unwrap();
        let data = out["value"]["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["serieLabel"], "s");
        assert_eq!(data[0]["x"], json!([1.0]));
        assert_eq!(data[0]["y"], json!([2.0]));
        assert_eq!(data[0]["info"], json!([null]));
    }

    #[test]
    fn add_serie_chains_on_the_chart_and_keeps_order() {
        let mut chart = Chart::new();
        chart
            .set_title("Spectra")
            .add_serie("a", vec![1.0], vec![2.0], vec![Value::Null])
            .add_serie("a", vec![3.0], vec![4.0], vec![json!({ "k": 1 })]);

        assert_eq!(chart.title(), "Spectra");
        assert_eq!(chart.len(), 2);
        assert_eq!(chart.series()[1].x(), &[3.0]);
        assert_eq!(chart.series()[0].label(), chart.series()[1].label());
    }

    #[test]
    fn non_string_title_is_ignored() {
        let mut chart = Chart::new();
        chart.try_set_title(&json!("First")).try_set_title(&json!(12));
        assert_eq!(chart.title(), "First");
    }

    #[test]
    fn validate_reports_misaligned_serie() {
        let mut chart = Chart::new();
        chart.add_serie("bad", vec![1.0, 2.0], vec![1.0], vec![]);
        assert!(chart.validate().is_err());
    }

    #[test]
    fn palette_keeps_explicit_colors() {
        let mut chart = Chart::new();
        chart.new_serie("a").set_option("color", json!("#123456"));
        chart.new_serie("b");
        chart.apply_palette();

        assert_eq!(chart.series()[0].option("color"), Some(&json!("#123456")));
        let assigned = chart.series()[1].option("color").unwrap().as_str().unwrap();
        assert!(assigned.starts_with('#'));
        assert_eq!(assigned.len(), 7);
    }
}
