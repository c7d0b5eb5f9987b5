//! Render sinks: each maps one payload fragment onto exactly one widget
//! state, in place. Sinks never fetch and never touch another sink's
//! widget; the payload is read-only for the whole fan-out.

use crate::api::models::{DashboardPayload, Summary};
use crate::app::actions::MapData;
use crate::app::state::{
    Capabilities, DashboardWidgets, InitiativeRow, MapBounds, MapLayer, MapState, RegionShape,
};
use crate::domain::{status_slug, Metric};
use crate::format;
use crate::geo::values_by_region;

/// Fans one refreshed payload out to every enabled widget.
pub fn apply_payload(
    capabilities: Capabilities,
    widgets: &mut DashboardWidgets,
    payload: &DashboardPayload,
) {
    if capabilities.kpis {
        apply_summary(widgets, &payload.summary);
    }
    if capabilities.trend_chart {
        apply_trends(widgets, payload);
    }
    if capabilities.bar_chart {
        apply_scholarships(widgets, payload);
    }
    if capabilities.initiatives_table {
        apply_initiatives(widgets, payload);
    }
}

fn apply_summary(widgets: &mut DashboardWidgets, summary: &Summary) {
    let kpis = &mut widgets.kpis;
    kpis.schools = format::group_count(summary.schools);
    kpis.students = format::group_count(summary.students);
    kpis.scholarships = format::group_count(summary.scholarships);
    kpis.progress = format::percent(summary.avg_progress_pct);
    kpis.initiatives = format::group_count(summary.initiatives);
}

fn apply_trends(widgets: &mut DashboardWidgets, payload: &DashboardPayload) {
    widgets.trend_chart.replace(
        payload.trends.labels.clone(),
        payload.trends.primary.clone(),
        payload.trends.secondary.clone(),
    );
}

fn apply_scholarships(widgets: &mut DashboardWidgets, payload: &DashboardPayload) {
    widgets.bar_chart.replace(
        payload.scholarships.states.clone(),
        payload.scholarships.values.clone(),
    );
}

fn apply_initiatives(widgets: &mut DashboardWidgets, payload: &DashboardPayload) {
    let rows = payload
        .initiatives
        .iter()
        .map(|item| InitiativeRow {
            name: item.name.clone(),
            state: item.state.clone(),
            scheme: item.scheme.clone(),
            category: item.category.clone(),
            year: item.year,
            status: item.status.clone(),
            status_slug: status_slug(&item.status),
            progress: format::percent(item.progress_pct),
        })
        .collect();
    widgets.initiatives.replace(rows);
}

/// Map sink. Stores the refreshed sources on the map state, then derives
/// the active layer for the current metric. Assignment replaces whatever
/// layer was showing before — polygon and marker modes never coexist.
pub fn apply_map(
    capabilities: Capabilities,
    widgets: &mut DashboardWidgets,
    data: MapData,
    metric: Metric,
) {
    if !capabilities.map {
        return;
    }
    let map = &mut widgets.map;
    match data {
        MapData::Polygons { geo, rows } => {
            map.source_geo = Some(geo);
            map.source_rows = rows;
        }
        MapData::Points(points) => {
            map.source_geo = None;
            map.source_rows = Vec::new();
            map.layer = MapLayer::Markers(points);
        }
        MapData::Unavailable => {
            map.source_geo = None;
            map.source_rows = Vec::new();
            map.layer = MapLayer::Empty;
        }
    }
    rebuild_map_layer(map, metric);
}

/// Derives the choropleth layer from the stored sources. Also the path a
/// metric switch takes: same sources, new values, fully replaced layer.
pub fn rebuild_map_layer(map: &mut MapState, metric: Metric) {
    if let Some(geo) = map.source_geo.as_ref() {
        let (values, max) = values_by_region(&map.source_rows, metric);

        let regions = geo
            .features
            .iter()
            .filter_map(|feature| {
                let geometry = feature.geometry.as_ref()?;
                let rings: Vec<Vec<(f64, f64)>> = geometry
                    .rings()
                    .into_iter()
                    .map(|ring| {
                        ring.iter()
                            .filter_map(|p| Some((*p.first()?, *p.get(1)?)))
                            .collect()
                    })
                    .collect();
                if rings.is_empty() {
                    return None;
                }
                let name = feature.region_name().to_string();
                let value = values
                    .get(&crate::geo::normalize_region_name(&name))
                    .copied()
                    .unwrap_or(0.0);
                Some(RegionShape { name, value, rings })
            })
            .collect::<Vec<_>>();

        map.max_value = max;
        map.layer = MapLayer::Choropleth(regions);
    }
    if map.selected >= map.region_count() {
        map.selected = 0;
    }
    map.bounds = layer_bounds(&map.layer);
}

/// Bounding box of the active layer, padded for the viewport fit. Invalid
/// or empty bounds come back as `None` — the renderer keeps its default
/// viewport instead of failing.
fn layer_bounds(layer: &MapLayer) -> Option<MapBounds> {
    let mut bounds = MapBounds::collector();
    match layer {
        MapLayer::Empty => return None,
        MapLayer::Choropleth(regions) => {
            for region in regions {
                for ring in &region.rings {
                    for (lng, lat) in ring {
                        bounds.include(*lng, *lat);
                    }
                }
            }
        }
        MapLayer::Markers(points) => {
            for point in points {
                bounds.include(point.lng, point.lat);
            }
        }
    }
    bounds.is_valid().then(|| bounds.padded(0.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{ChoroplethRow, MapPoint};
    use crate::geo::FeatureCollection;

    fn all_capabilities() -> Capabilities {
        Capabilities {
            kpis: true,
            trend_chart: true,
            bar_chart: true,
            initiatives_table: true,
            map: true,
        }
    }

    fn sample_payload() -> DashboardPayload {
        serde_json::from_value(serde_json::json!({
            "summary": {
                "schools": 1200,
                "students": 1234567,
                "scholarships": 4300,
                "avg_progress_pct": 42.5,
                "initiatives": 36
            },
            "trends": {"labels": ["Jan", "Feb"], "primary": [10.0, 20.0], "secondary": [5.0, 8.0]},
            "scholarships": {"states": ["Kerala"], "values": [850.0]},
            "initiatives": [{
                "name": "PM SHRI Schools - Kerala",
                "state": "Kerala",
                "scheme": "PM SHRI Schools",
                "category": "Infrastructure",
                "year": 2025,
                "status": "At Risk",
                "progress_pct": 61.0
            }],
            "map": []
        }))
        .expect("payload should build")
    }

    fn sample_geo() -> FeatureCollection {
        serde_json::from_value(serde_json::json!({
            "features": [
                {
                    "properties": {"st_nm": "Kerala"},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[76.0, 10.0], [77.0, 10.0], [76.5, 11.0]]]
                    }
                },
                {
                    "properties": {"st_nm": "Assam"},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[92.0, 26.0], [93.0, 26.0], [92.5, 27.0]]]
                    }
                }
            ]
        }))
        .expect("geo should build")
    }

    fn rows() -> Vec<ChoroplethRow> {
        vec![
            ChoroplethRow {
                state: "Kerala".to_string(),
                schools: 320,
                scholarships: 900,
                avg_progress: 61.0,
                students: 52000,
            },
            ChoroplethRow {
                state: "Assam".to_string(),
                schools: 210,
                scholarships: 35,
                avg_progress: 64.2,
                students: 41000,
            },
        ]
    }

    #[test]
    fn kpi_sink_formats_counts_and_percentage() {
        let mut widgets = DashboardWidgets::empty();
        apply_payload(all_capabilities(), &mut widgets, &sample_payload());
        assert_eq!(widgets.kpis.students, "12,34,567");
        assert_eq!(widgets.kpis.schools, "1,200");
        assert_eq!(widgets.kpis.progress, "42.50%");
    }

    #[test]
    fn chart_sinks_replace_series_in_place() {
        let mut widgets = DashboardWidgets::empty();
        widgets.trend_chart.replace(
            vec!["Dec".to_string()],
            vec![1.0],
            vec![2.0],
        );
        apply_payload(all_capabilities(), &mut widgets, &sample_payload());
        assert_eq!(widgets.trend_chart.labels, vec!["Jan", "Feb"]);
        assert_eq!(widgets.trend_chart.primary, vec![10.0, 20.0]);
        assert_eq!(widgets.bar_chart.states, vec!["Kerala"]);
    }

    #[test]
    fn table_sink_slugifies_status() {
        let mut widgets = DashboardWidgets::empty();
        apply_payload(all_capabilities(), &mut widgets, &sample_payload());
        assert_eq!(widgets.initiatives.rows[0].status_slug, "at-risk");
        assert_eq!(widgets.initiatives.rows[0].progress, "61.00%");
    }

    #[test]
    fn disabled_capability_leaves_widget_untouched() {
        let mut capabilities = all_capabilities();
        capabilities.kpis = false;
        let mut widgets = DashboardWidgets::empty();
        apply_payload(capabilities, &mut widgets, &sample_payload());
        assert_eq!(widgets.kpis.students, "--");
        assert_eq!(widgets.trend_chart.labels, vec!["Jan", "Feb"]);
    }

    #[test]
    fn map_sink_builds_choropleth_with_joined_values() {
        let mut widgets = DashboardWidgets::empty();
        apply_map(
            all_capabilities(),
            &mut widgets,
            MapData::Polygons {
                geo: sample_geo(),
                rows: rows(),
            },
            Metric::Students,
        );
        let MapLayer::Choropleth(regions) = &widgets.map.layer else {
            panic!("expected choropleth layer");
        };
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].name, "Kerala");
        assert_eq!(regions[0].value, 52000.0);
        assert_eq!(widgets.map.max_value, 52000.0);
        assert!(widgets.map.bounds.is_some());
    }

    #[test]
    fn metric_switch_rederives_values_without_new_sources() {
        let mut widgets = DashboardWidgets::empty();
        apply_map(
            all_capabilities(),
            &mut widgets,
            MapData::Polygons {
                geo: sample_geo(),
                rows: rows(),
            },
            Metric::Students,
        );
        rebuild_map_layer(&mut widgets.map, Metric::Schools);
        let MapLayer::Choropleth(regions) = &widgets.map.layer else {
            panic!("expected choropleth layer");
        };
        assert_eq!(regions[0].value, 320.0);
        assert_eq!(widgets.map.max_value, 320.0);
    }

    #[test]
    fn marker_fallback_replaces_polygon_layer_entirely() {
        let mut widgets = DashboardWidgets::empty();
        apply_map(
            all_capabilities(),
            &mut widgets,
            MapData::Polygons {
                geo: sample_geo(),
                rows: rows(),
            },
            Metric::Students,
        );
        apply_map(
            all_capabilities(),
            &mut widgets,
            MapData::Points(vec![MapPoint {
                state: "Kerala".to_string(),
                lat: 10.85,
                lng: 76.27,
                schools: 320,
                students: 52000,
                scholarships: 900,
                avg_progress: 0.61,
            }]),
            Metric::Students,
        );
        assert!(matches!(widgets.map.layer, MapLayer::Markers(_)));
        assert!(widgets.map.source_geo.is_none());
    }

    #[test]
    fn single_marker_has_no_fit_bounds() {
        // One point spans no area; the viewport keeps its default.
        let mut widgets = DashboardWidgets::empty();
        apply_map(
            all_capabilities(),
            &mut widgets,
            MapData::Points(vec![MapPoint {
                state: "Goa".to_string(),
                lat: 15.3,
                lng: 74.1,
                schools: 1,
                students: 2,
                scholarships: 3,
                avg_progress: 0.5,
            }]),
            Metric::Students,
        );
        assert!(widgets.map.bounds.is_none());
    }
}
