use serde::Deserialize;

use crate::domain::Metric;

/// Aggregate returned by the data endpoint. Each field is owned by exactly
/// one render sink for the duration of a refresh cycle.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardPayload {
    pub summary: Summary,
    pub trends: TrendSeries,
    pub scholarships: ScholarshipSeries,
    #[serde(default)]
    pub initiatives: Vec<Initiative>,
    #[serde(default, rename = "map")]
    pub map_points: Vec<MapPoint>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub schools: i64,
    #[serde(default)]
    pub students: i64,
    #[serde(default)]
    pub scholarships: i64,
    #[serde(default)]
    pub avg_progress_pct: f64,
    #[serde(default)]
    pub initiatives: i64,
}

/// Monthly enrollment series for the line chart: one label per month, two
/// numeric series (primary / secondary).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendSeries {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub primary: Vec<f64>,
    #[serde(default)]
    pub secondary: Vec<f64>,
}

/// Per-state beneficiary counts for the bar chart.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScholarshipSeries {
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Initiative {
    pub name: String,
    pub state: String,
    pub scheme: String,
    #[serde(default)]
    pub category: String,
    pub year: i32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub progress_pct: f64,
}

/// One choropleth row per administrative region, from the map endpoint.
/// `avg_progress` arrives pre-scaled to 0..100.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoroplethRow {
    pub state: String,
    #[serde(default)]
    pub schools: i64,
    #[serde(default)]
    pub scholarships: i64,
    #[serde(default)]
    pub avg_progress: f64,
    #[serde(default)]
    pub students: i64,
}

impl ChoroplethRow {
    pub fn metric_value(&self, metric: Metric) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        match metric {
            Metric::Students => self.students as f64,
            Metric::Schools => self.schools as f64,
            Metric::Scholarships => self.scholarships as f64,
            Metric::Progress => self.avg_progress,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoroplethResponse {
    #[serde(default)]
    pub choropleth: Vec<ChoroplethRow>,
}

/// Marker-mode map input, used only when no polygon source is available.
/// `avg_progress` here is a 0..1 ratio.
#[derive(Debug, Clone, Deserialize)]
pub struct MapPoint {
    pub state: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub schools: i64,
    #[serde(default)]
    pub students: i64,
    #[serde(default)]
    pub scholarships: i64,
    #[serde(default)]
    pub avg_progress: f64,
}

/// Filter-control values from the meta endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetaResponse {
    #[serde(default)]
    pub years: Vec<i32>,
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub schemes: Vec<SchemeEntry>,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchemeEntry {
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// Parses the embedded bootstrap document. Failure is non-fatal by
/// contract: the caller logs and starts the dashboard empty.
pub fn parse_bootstrap(raw: &str) -> Result<DashboardPayload, serde_json::Error> {
    serde_json::from_str(raw)
}
