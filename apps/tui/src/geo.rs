use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::api::models::ChoroplethRow;
use crate::domain::Metric;

/// Property keys a region name may hide under. The GeoJSON schema is not
/// ours; sources disagree on the field name, so we probe in order.
const REGION_NAME_KEYS: [&str; 4] = ["state", "NAME_1", "st_nm", "State_Name"];

/// Canonical join key for a region name: lowercase, non-alphabetic
/// characters stripped. Total — null/absent input normalizes to the empty
/// key. Two distinct regions can collide; the join below keeps the
/// last-processed value (accepted lossy behavior, see `DESIGN.md`).
pub fn normalize_region_name(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

pub type Position = Vec<f64>;

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: serde_json::Map<String, Value>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
    #[serde(other)]
    Unsupported,
}

impl Feature {
    /// Region name under the first present property key, or "" when the
    /// feature carries none of them.
    pub fn region_name(&self) -> &str {
        for key in REGION_NAME_KEYS {
            if let Some(Value::String(name)) = self.properties.get(key) {
                if !name.is_empty() {
                    return name;
                }
            }
        }
        ""
    }
}

impl Geometry {
    /// Exterior and interior rings, flattened across multi-polygons.
    pub fn rings(&self) -> Vec<&Vec<Position>> {
        match self {
            Self::Polygon(rings) => rings.iter().collect(),
            Self::MultiPolygon(polygons) => polygons.iter().flatten().collect(),
            Self::Unsupported => Vec::new(),
        }
    }

    pub fn each_position(&self, mut visit: impl FnMut(f64, f64)) {
        for ring in self.rings() {
            for position in ring {
                if let (Some(&lng), Some(&lat)) = (position.first(), position.get(1)) {
                    visit(lng, lat);
                }
            }
        }
    }
}

/// Joins choropleth rows to regions by normalized name and returns the
/// lookup plus the maximum value (the color-ramp scale). A collision on the
/// normalized key silently overwrites the earlier row.
pub fn values_by_region(rows: &[ChoroplethRow], metric: Metric) -> (HashMap<String, f64>, f64) {
    let mut values = HashMap::new();
    let mut max = 0.0_f64;
    for row in rows {
        let value = row.metric_value(metric);
        values.insert(normalize_region_name(&row.state), value);
        if value > max {
            max = value;
        }
    }
    (values, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(state: &str, students: i64) -> ChoroplethRow {
        ChoroplethRow {
            state: state.to_string(),
            schools: 10,
            scholarships: 5,
            avg_progress: 50.0,
            students,
        }
    }

    #[test]
    fn normalization_ignores_case_and_punctuation() {
        assert_eq!(normalize_region_name("Madhya Pradesh"), "madhyapradesh");
        assert_eq!(normalize_region_name("madhya-pradesh"), "madhyapradesh");
        assert_eq!(normalize_region_name("MADHYA PRADESH"), "madhyapradesh");
    }

    #[test]
    fn normalization_is_total_and_idempotent() {
        assert_eq!(normalize_region_name(""), "");
        assert_eq!(normalize_region_name("123!?"), "");
        let once = normalize_region_name("Tamil Nadu");
        assert_eq!(normalize_region_name(&once), once);
    }

    #[test]
    fn join_keeps_last_value_on_key_collision() {
        // "Goa." and "goa" collide by design; the later row wins.
        let rows = vec![row("Goa.", 100), row("goa", 250)];
        let (values, max) = values_by_region(&rows, Metric::Students);
        assert_eq!(values.len(), 1);
        assert_eq!(values.get("goa"), Some(&250.0));
        assert_eq!(max, 250.0);
    }

    #[test]
    fn region_name_probes_property_keys_in_order() {
        let geojson = r#"{
            "features": [
                {"properties": {"NAME_1": "Kerala"}, "geometry": null},
                {"properties": {"st_nm": "Bihar", "state": "Ignored?"}, "geometry": null},
                {"properties": {"population": 1}, "geometry": null}
            ]
        }"#;
        let collection: FeatureCollection = serde_json::from_str(geojson).unwrap();
        assert_eq!(collection.features[0].region_name(), "Kerala");
        assert_eq!(collection.features[1].region_name(), "Ignored?");
        assert_eq!(collection.features[2].region_name(), "");
    }

    #[test]
    fn geometry_visits_polygon_and_multipolygon_positions() {
        let geojson = r#"{
            "type": "MultiPolygon",
            "coordinates": [[[[77.0, 28.0], [78.0, 28.5], [77.5, 29.0]]]]
        }"#;
        let geometry: Geometry = serde_json::from_str(geojson).unwrap();
        let mut count = 0;
        geometry.each_position(|lng, lat| {
            assert!(lng > 70.0 && lat > 20.0);
            count += 1;
        });
        assert_eq!(count, 3);
        assert_eq!(geometry.rings().len(), 1);
    }
}
