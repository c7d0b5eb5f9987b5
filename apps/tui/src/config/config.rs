use std::env;

use dotenv::dotenv;

/// Runtime configuration, resolved once at startup from the environment
/// (with `.env` support). Everything has a default so the dashboard comes
/// up against a local backend with no setup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the analytics backend, no trailing slash.
    pub api_base_url: String,
    /// Primary GeoJSON resource, absolute or relative to the base URL.
    pub geo_primary_path: String,
    /// Demo GeoJSON tried when the primary source fails.
    pub geo_fallback_path: String,
    /// Optional path to a bootstrap payload overriding the embedded one.
    pub bootstrap_path: Option<String>,
    /// Comma-separated widget names to disable (capability kill-switch).
    pub disabled_panels: Vec<String>,
}

/// Initializes the application configuration from the environment.
pub fn init_app_config() -> AppConfig {
    // Load environment variables from .env file
    dotenv().ok();

    let api_base_url = env::var("API_BASE_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string())
        .trim_end_matches('/')
        .to_string();

    let geo_primary_path = env::var("GEO_PRIMARY_PATH")
        .unwrap_or_else(|_| "/static/geo/india_states.geojson".to_string());

    let geo_fallback_path = env::var("GEO_FALLBACK_PATH")
        .unwrap_or_else(|_| "/static/geo/india_states_demo.geojson".to_string());

    let bootstrap_path = env::var("BOOTSTRAP_PATH").ok().filter(|p| !p.is_empty());

    let disabled_panels = env::var("DISABLED_PANELS")
        .map(|raw| {
            raw.split(',')
                .map(|name| name.trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect()
        })
        .unwrap_or_default();

    AppConfig {
        api_base_url,
        geo_primary_path,
        geo_fallback_path,
        bootstrap_path,
        disabled_panels,
    }
}

impl AppConfig {
    /// Resolves a resource path against the API base URL. Absolute URLs
    /// pass through untouched.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let path = path.trim_start_matches('/');
        format!("{}/{path}", self.api_base_url)
    }

    pub fn panel_disabled(&self, name: &str) -> bool {
        self.disabled_panels.iter().any(|panel| panel == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            geo_primary_path: "/static/geo/india_states.geojson".to_string(),
            geo_fallback_path: "/static/geo/india_states_demo.geojson".to_string(),
            bootstrap_path: None,
            disabled_panels: vec!["map".to_string()],
        }
    }

    #[test]
    fn relative_paths_resolve_against_the_base_url() {
        let config = config();
        assert_eq!(
            config.resolve_url("/api/data/"),
            "http://127.0.0.1:8000/api/data/"
        );
        assert_eq!(
            config.resolve_url("api/data/"),
            "http://127.0.0.1:8000/api/data/"
        );
    }

    #[test]
    fn absolute_urls_pass_through() {
        let config = config();
        assert_eq!(
            config.resolve_url("https://cdn.example.org/states.geojson"),
            "https://cdn.example.org/states.geojson"
        );
    }

    #[test]
    fn kill_switch_matches_by_name() {
        let config = config();
        assert!(config.panel_disabled("map"));
        assert!(!config.panel_disabled("kpis"));
    }
}
