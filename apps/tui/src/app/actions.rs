use tracing::warn;

use crate::api::models::{ChoroplethRow, DashboardPayload, MapPoint};
use crate::api::{ApiClient, Error};
use crate::filters::{FilterOptions, FilterSet};
use crate::geo::FeatureCollection;

/// Map input for one refresh cycle, already resolved through the fallback
/// tiers: polygons when a GeoJSON source answered, points when only the
/// data endpoint did, nothing when everything failed.
#[derive(Debug, Clone)]
pub enum MapData {
    Polygons {
        geo: FeatureCollection,
        rows: Vec<ChoroplethRow>,
    },
    Points(Vec<MapPoint>),
    Unavailable,
}

/// Everything one successful refresh produced. Read-only from here on;
/// sinks consume fragments without touching each other.
#[derive(Debug, Clone)]
pub struct RefreshData {
    pub payload: DashboardPayload,
    pub map_data: MapData,
}

/// Owns the API client and performs every network operation the app needs.
/// Clone-able so spawned refresh tasks carry their own handle.
#[derive(Debug, Clone)]
pub struct AppActions {
    pub client: ApiClient,
}

impl AppActions {
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn fetch_filter_options(&self) -> FilterOptions {
        self.client.fetch_filter_options().await
    }

    /// One full refresh: GeoJSON and aggregate payload concurrently, then
    /// the map fallback chain once the geo outcome is known. A dashboard
    /// fetch failure fails the refresh (the caller keeps the last rendered
    /// state); every map-side failure only degrades the map tier.
    pub async fn refresh(&self, filters: &FilterSet) -> Result<RefreshData, Error> {
        let (geo, payload) = tokio::join!(
            self.client.load_geo(),
            self.client.fetch_dashboard(filters)
        );
        let payload = payload?;

        let map_data = if let Some(geo) = geo {
            match self.client.fetch_choropleth(filters).await {
                Ok(rows) => MapData::Polygons { geo, rows },
                Err(error) => {
                    warn!(%error, "choropleth fetch failed, falling back to markers");
                    self.point_fallback(filters).await
                }
            }
        } else {
            self.point_fallback(filters).await
        };

        Ok(RefreshData { payload, map_data })
    }

    async fn point_fallback(&self, filters: &FilterSet) -> MapData {
        match self.client.fetch_map_points(filters).await {
            Ok(points) => MapData::Points(points),
            Err(error) => {
                warn!(%error, "map point fallback failed, map left unrendered");
                MapData::Unavailable
            }
        }
    }
}
