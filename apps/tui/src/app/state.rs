use throbber_widgets_tui::ThrobberState;

use crate::api::models::{ChoroplethRow, MapPoint};
use crate::app::actions::AppActions;
use crate::config::AppConfig;
use crate::domain::{FilterKey, Metric};
use crate::filters::{FilterOptions, FilterSet};
use crate::geo::FeatureCollection;

#[derive(Debug, PartialEq, Eq)]
pub enum AppScreen {
    Dashboard,
    Initiatives,
    RegionDetails,
}

/// Widgets enabled on this run, decided once at initialization instead of
/// presence checks scattered through every sink.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    pub kpis: bool,
    pub trend_chart: bool,
    pub bar_chart: bool,
    pub initiatives_table: bool,
    pub map: bool,
}

impl Capabilities {
    pub fn detect(config: &AppConfig) -> Self {
        Self {
            kpis: !config.panel_disabled("kpis"),
            trend_chart: !config.panel_disabled("trends"),
            bar_chart: !config.panel_disabled("scholarships"),
            initiatives_table: !config.panel_disabled("initiatives"),
            map: !config.panel_disabled("map"),
        }
    }

    pub const fn any_enabled(self) -> bool {
        self.kpis || self.trend_chart || self.bar_chart || self.initiatives_table || self.map
    }
}

/// Formatted KPI card values. The sink owns the formatting; the renderer
/// only places strings.
#[derive(Debug, Clone)]
pub struct KpiState {
    pub schools: String,
    pub students: String,
    pub scholarships: String,
    pub progress: String,
    pub initiatives: String,
}

impl KpiState {
    pub fn empty() -> Self {
        Self {
            schools: "--".to_string(),
            students: "--".to_string(),
            scholarships: "--".to_string(),
            progress: "--".to_string(),
            initiatives: "--".to_string(),
        }
    }
}

/// Enrollment line chart state. The struct lives for the whole session;
/// refreshes replace its contents in place, never the widget itself.
#[derive(Debug, Clone, Default)]
pub struct TrendChartState {
    pub labels: Vec<String>,
    pub primary: Vec<f64>,
    pub secondary: Vec<f64>,
}

impl TrendChartState {
    pub fn replace(&mut self, labels: Vec<String>, primary: Vec<f64>, secondary: Vec<f64>) {
        self.labels = labels;
        self.primary = primary;
        self.secondary = secondary;
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || (self.primary.is_empty() && self.secondary.is_empty())
    }
}

/// Scholarship bar chart state, same update-in-place contract.
#[derive(Debug, Clone, Default)]
pub struct BarChartState {
    pub states: Vec<String>,
    pub values: Vec<f64>,
}

impl BarChartState {
    pub fn replace(&mut self, states: Vec<String>, values: Vec<f64>) {
        self.states = states;
        self.values = values;
    }
}

#[derive(Debug, Clone)]
pub struct InitiativeRow {
    pub name: String,
    pub state: String,
    pub scheme: String,
    pub category: String,
    pub year: i32,
    pub status: String,
    pub status_slug: String,
    pub progress: String,
}

#[derive(Debug, Clone, Default)]
pub struct InitiativesTableState {
    pub rows: Vec<InitiativeRow>,
    pub selected: usize,
}

impl InitiativesTableState {
    pub fn replace(&mut self, rows: Vec<InitiativeRow>) {
        self.rows = rows;
        self.selected = 0;
    }
}

/// One colored region of the choropleth layer, pre-joined to its metric
/// value and reduced to drawable rings.
#[derive(Debug, Clone)]
pub struct RegionShape {
    pub name: String,
    pub value: f64,
    pub rings: Vec<Vec<(f64, f64)>>,
}

/// The two mutually exclusive map render modes. Assigning a new layer is
/// the "remove previous layer" step — nothing of the old mode survives.
#[derive(Debug, Clone, Default)]
pub enum MapLayer {
    #[default]
    Empty,
    Choropleth(Vec<RegionShape>),
    Markers(Vec<MapPoint>),
}

/// Geographic bounding box of the active layer, used to fit the canvas
/// viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl MapBounds {
    pub const fn collector() -> Self {
        Self {
            min_lng: f64::INFINITY,
            min_lat: f64::INFINITY,
            max_lng: f64::NEG_INFINITY,
            max_lat: f64::NEG_INFINITY,
        }
    }

    pub fn include(&mut self, lng: f64, lat: f64) {
        self.min_lng = self.min_lng.min(lng);
        self.min_lat = self.min_lat.min(lat);
        self.max_lng = self.max_lng.max(lng);
        self.max_lat = self.max_lat.max(lat);
    }

    pub fn is_valid(&self) -> bool {
        self.min_lng.is_finite()
            && self.min_lat.is_finite()
            && self.max_lng > self.min_lng
            && self.max_lat > self.min_lat
    }

    /// Expands the box by `fraction` of its span on every side.
    pub fn padded(&self, fraction: f64) -> Self {
        let pad_lng = (self.max_lng - self.min_lng) * fraction;
        let pad_lat = (self.max_lat - self.min_lat) * fraction;
        Self {
            min_lng: self.min_lng - pad_lng,
            min_lat: self.min_lat - pad_lat,
            max_lng: self.max_lng + pad_lng,
            max_lat: self.max_lat + pad_lat,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MapState {
    pub layer: MapLayer,
    pub bounds: Option<MapBounds>,
    pub max_value: f64,
    pub selected: usize,
    /// Sources kept from the last refresh so a metric switch can re-derive
    /// region values without a network round-trip.
    pub source_geo: Option<FeatureCollection>,
    pub source_rows: Vec<ChoroplethRow>,
}

impl MapState {
    pub fn region_count(&self) -> usize {
        match &self.layer {
            MapLayer::Empty => 0,
            MapLayer::Choropleth(regions) => regions.len(),
            MapLayer::Markers(points) => points.len(),
        }
    }
}

/// Every live widget, owned in one place and handed to render sinks by
/// reference — no ambient lookups.
#[derive(Debug, Clone)]
pub struct DashboardWidgets {
    pub kpis: KpiState,
    pub trend_chart: TrendChartState,
    pub bar_chart: BarChartState,
    pub initiatives: InitiativesTableState,
    pub map: MapState,
}

impl DashboardWidgets {
    pub fn empty() -> Self {
        Self {
            kpis: KpiState::empty(),
            trend_chart: TrendChartState::default(),
            bar_chart: BarChartState::default(),
            initiatives: InitiativesTableState::default(),
            map: MapState::default(),
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub show_help: bool,
    pub capabilities: Capabilities,
    pub filters: FilterSet,
    pub filter_options: FilterOptions,
    pub selected_filter: usize,
    pub metric: Metric,
    pub widgets: DashboardWidgets,
    pub actions: AppActions,
    pub refreshing: bool,
    pub refresh_wanted: bool,
    pub throbber: ThrobberState,
    pub status_message: String,
    /// Fuzzy-search buffer while picking a state filter value; `None` when
    /// not searching.
    pub search_input: Option<String>,
    pub last_refreshed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl App {
    pub fn new(actions: AppActions) -> Self {
        let capabilities = Capabilities::detect(actions.client.config());
        Self {
            running: true,
            screen: AppScreen::Dashboard,
            show_help: false,
            capabilities,
            filters: FilterSet::default(),
            filter_options: FilterOptions::fallback(),
            selected_filter: 0,
            metric: Metric::Students,
            widgets: DashboardWidgets::empty(),
            actions,
            refreshing: false,
            refresh_wanted: false,
            throbber: ThrobberState::default(),
            status_message: String::new(),
            search_input: None,
            last_refreshed_at: None,
        }
    }

    pub fn selected_filter_key(&self) -> FilterKey {
        FilterKey::from_index(self.selected_filter).unwrap_or(FilterKey::Year)
    }

    /// Marks the current filter selection dirty; the event loop picks this
    /// up and spawns the actual refresh.
    pub fn request_refresh(&mut self) {
        self.refresh_wanted = true;
    }

    /// Moves the selected filter to the next option (wrapping through
    /// "All"), then schedules a refresh — the change-event contract.
    pub fn cycle_filter_value(&mut self, forward: bool) {
        let key = self.selected_filter_key();
        let options = self.filter_options.options_for(key).to_vec();
        if options.is_empty() {
            return;
        }

        // Position 0 is "All" (no filter); options follow.
        let current = self
            .filters
            .get(key)
            .and_then(|value| options.iter().position(|o| o == value))
            .map_or(0, |i| i + 1);
        let len = options.len() + 1;
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };

        let value = if next == 0 {
            None
        } else {
            Some(options[next - 1].clone())
        };
        self.filters.set(key, value);
        self.request_refresh();
    }

    /// Switches the choropleth metric and re-derives the layer from the
    /// sources kept on the map state — no filter change, no refetch.
    pub fn set_metric(&mut self, metric: Metric) {
        self.metric = metric;
        crate::app::sinks::rebuild_map_layer(&mut self.widgets.map, self.metric);
    }

    pub fn cycle_metric(&mut self) {
        let index = Metric::ALL
            .iter()
            .position(|m| *m == self.metric)
            .unwrap_or(0);
        let next = Metric::from_index((index + 1) % Metric::ALL.len()).unwrap_or(Metric::Students);
        self.set_metric(next);
    }

    pub fn report_download_url(&self) -> String {
        self.actions.client.report_download_url(&self.filters)
    }
}
