use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::error::Error;
use crate::api::models::{
    ChoroplethResponse, ChoroplethRow, DashboardPayload, MapPoint, MetaResponse,
};
use crate::config::AppConfig;
use crate::filters::{FilterOptions, FilterSet};
use crate::geo::FeatureCollection;

/// HTTP client for the analytics backend. Cheap to clone (the underlying
/// reqwest client is pooled), so refresh tasks take their own copy.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: AppConfig,
}

impl ApiClient {
    pub fn new(config: AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Data endpoint URL for the current filters.
    pub fn data_url(&self, filters: &FilterSet) -> String {
        with_query(self.config.resolve_url("/api/data/"), filters)
    }

    /// Map endpoint URL for the current filters.
    pub fn map_url(&self, filters: &FilterSet) -> String {
        with_query(self.config.resolve_url("/api/v1/map"), filters)
    }

    /// Report-download URL. Shares the query builder with `data_url`, so
    /// both carry the byte-identical query for the same filters.
    pub fn report_download_url(&self, filters: &FilterSet) -> String {
        with_query(self.config.resolve_url("/reports/download/"), filters)
    }

    pub async fn fetch_dashboard(&self, filters: &FilterSet) -> Result<DashboardPayload, Error> {
        self.get_json(&self.data_url(filters)).await
    }

    pub async fn fetch_choropleth(&self, filters: &FilterSet) -> Result<Vec<ChoroplethRow>, Error> {
        let response: ChoroplethResponse = self.get_json(&self.map_url(filters)).await?;
        Ok(response.choropleth)
    }

    /// Point payload for marker mode. The data endpoint already carries the
    /// points, so this re-requests it and keeps only the `map` fragment —
    /// issued strictly after the geo outcome is known.
    pub async fn fetch_map_points(&self, filters: &FilterSet) -> Result<Vec<MapPoint>, Error> {
        let payload: DashboardPayload = self.get_json(&self.data_url(filters)).await?;
        Ok(payload.map_points)
    }

    /// Loads polygon data: primary source first, demo fallback second.
    /// Both failing is not an error — the map degrades to marker mode.
    pub async fn load_geo(&self) -> Option<FeatureCollection> {
        for path in [
            &self.config.geo_primary_path,
            &self.config.geo_fallback_path,
        ] {
            let url = self.config.resolve_url(path);
            match self.get_json::<FeatureCollection>(&url).await {
                Ok(collection) => {
                    debug!(url, features = collection.features.len(), "loaded geojson");
                    return Some(collection);
                }
                Err(error) => {
                    warn!(url, %error, "geojson source unavailable, trying next tier");
                }
            }
        }
        None
    }

    /// Filter options from the meta endpoint; a static fallback keeps the
    /// controls usable when the endpoint is down.
    pub async fn fetch_filter_options(&self) -> FilterOptions {
        let url = self.config.resolve_url("/api/v1/meta");
        match self.get_json::<MetaResponse>(&url).await {
            Ok(meta) => FilterOptions {
                years: meta.years.iter().map(ToString::to_string).collect(),
                states: meta.states,
                schemes: meta.schemes.into_iter().map(|s| s.name).collect(),
                categories: meta.categories,
            },
            Err(error) => {
                warn!(url, %error, "meta endpoint unavailable, using fallback options");
                FilterOptions::fallback()
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::status(status, url));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn with_query(base: String, filters: &FilterSet) -> String {
    let query = filters.query_string();
    if query.is_empty() {
        base
    } else {
        format!("{base}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FilterKey;

    fn client() -> ApiClient {
        ApiClient::new(AppConfig {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            geo_primary_path: "/static/geo/india_states.geojson".to_string(),
            geo_fallback_path: "/static/geo/india_states_demo.geojson".to_string(),
            bootstrap_path: None,
            disabled_panels: Vec::new(),
        })
    }

    #[test]
    fn unfiltered_urls_carry_no_query() {
        let client = client();
        let filters = FilterSet::default();
        assert_eq!(client.data_url(&filters), "http://127.0.0.1:8000/api/data/");
        assert_eq!(client.map_url(&filters), "http://127.0.0.1:8000/api/v1/map");
    }

    #[test]
    fn data_and_report_urls_share_the_same_query_bytes() {
        let client = client();
        let mut filters = FilterSet::default();
        filters.set(FilterKey::Year, Some("2024".to_string()));
        filters.set(FilterKey::State, Some("Tamil Nadu".to_string()));

        let data_url = client.data_url(&filters);
        let report_url = client.report_download_url(&filters);
        let data_query = data_url.split_once('?').map(|(_, q)| q);
        let report_query = report_url.split_once('?').map(|(_, q)| q);
        assert_eq!(data_query, Some("year=2024&state=Tamil%20Nadu"));
        assert_eq!(data_query, report_query);
    }
}
