use crate::app::input::helpers::{best_fuzzy_match, wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen};
use crate::domain::{FilterKey, Metric};
use crossterm::event::KeyCode;

pub fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    if app.search_input.is_some() {
        handle_state_search(app, key);
        return;
    }

    match key {
        KeyCode::Left => {
            app.selected_filter = wrap_decrement(app.selected_filter, FilterKey::ALL.len());
        }
        KeyCode::Right => {
            app.selected_filter = wrap_increment(app.selected_filter, FilterKey::ALL.len());
        }
        KeyCode::Up => {
            app.cycle_filter_value(false);
        }
        KeyCode::Down => {
            app.cycle_filter_value(true);
        }
        KeyCode::Char('m') => {
            app.cycle_metric();
        }
        KeyCode::Char(digit @ '1'..='4') => {
            if let Some(metric) = metric_for_digit(digit) {
                app.set_metric(metric);
            }
        }
        KeyCode::Char('r') => {
            app.request_refresh();
        }
        KeyCode::Char('i') => {
            app.screen = AppScreen::Initiatives;
        }
        KeyCode::Char('g') => {
            if app.widgets.map.region_count() > 0 {
                app.screen = AppScreen::RegionDetails;
            }
        }
        KeyCode::Char('/') => {
            // Quick fuzzy search over the state filter options.
            app.search_input = Some(String::new());
        }
        KeyCode::Char('x') => {
            app.filters = crate::filters::FilterSet::default();
            app.request_refresh();
        }
        KeyCode::Char('e') => {
            let url = app.report_download_url();
            app.status_message = match open::that(&url) {
                Ok(()) => format!("Opened report download: {url}"),
                Err(error) => format!("Could not open {url}: {error}"),
            };
        }
        KeyCode::Char('q') => {
            app.running = false;
        }
        _ => {}
    }
}

fn handle_state_search(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(c) => {
            if let Some(input) = app.search_input.as_mut() {
                input.push(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = app.search_input.as_mut() {
                input.pop();
            }
        }
        KeyCode::Enter => {
            let input = app.search_input.take().unwrap_or_default();
            let matched = best_fuzzy_match(&app.filter_options.states, &input)
                .map(ToString::to_string);
            match matched {
                Some(state) => {
                    app.status_message = format!("State filter: {state}");
                    app.filters.set(FilterKey::State, Some(state));
                    app.request_refresh();
                }
                None => {
                    app.status_message = format!("No state matches \"{input}\"");
                }
            }
        }
        KeyCode::Esc => {
            app.search_input = None;
        }
        _ => {}
    }
}

/// Metric shortcut keys shown in the map legend (1-4).
fn metric_for_digit(digit: char) -> Option<Metric> {
    match digit {
        '1' => Some(Metric::Students),
        '2' => Some(Metric::Schools),
        '3' => Some(Metric::Scholarships),
        '4' => Some(Metric::Progress),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::app::actions::AppActions;
    use crate::config::AppConfig;
    use crate::filters::FilterOptions;

    fn app() -> App {
        let config = AppConfig {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            geo_primary_path: "/static/geo/india_states.geojson".to_string(),
            geo_fallback_path: "/static/geo/india_states_demo.geojson".to_string(),
            bootstrap_path: None,
            disabled_panels: Vec::new(),
        };
        let mut app = App::new(AppActions::new(ApiClient::new(config)));
        app.filter_options = FilterOptions {
            years: vec!["2023".to_string(), "2024".to_string()],
            states: vec!["Kerala".to_string(), "Tamil Nadu".to_string()],
            schemes: Vec::new(),
            categories: Vec::new(),
        };
        app
    }

    #[test]
    fn cycling_a_filter_schedules_a_refresh() {
        let mut app = app();
        assert!(!app.refresh_wanted);
        handle_dashboard_input(&mut app, KeyCode::Down);
        assert_eq!(app.filters.year.as_deref(), Some("2023"));
        assert!(app.refresh_wanted);
    }

    #[test]
    fn cycling_past_the_last_option_returns_to_all() {
        let mut app = app();
        handle_dashboard_input(&mut app, KeyCode::Down);
        handle_dashboard_input(&mut app, KeyCode::Down);
        assert_eq!(app.filters.year.as_deref(), Some("2024"));
        handle_dashboard_input(&mut app, KeyCode::Down);
        assert_eq!(app.filters.year, None);
    }

    #[test]
    fn state_search_sets_the_filter_on_enter() {
        let mut app = app();
        handle_dashboard_input(&mut app, KeyCode::Char('/'));
        assert!(app.search_input.is_some());
        for c in "tn".chars() {
            handle_dashboard_input(&mut app, KeyCode::Char(c));
        }
        handle_dashboard_input(&mut app, KeyCode::Enter);
        assert_eq!(app.filters.state.as_deref(), Some("Tamil Nadu"));
        assert!(app.refresh_wanted);
        assert!(app.search_input.is_none());
    }

    #[test]
    fn metric_key_rotates_without_scheduling_a_refresh() {
        let mut app = app();
        handle_dashboard_input(&mut app, KeyCode::Char('m'));
        assert_eq!(app.metric, Metric::Schools);
        assert!(!app.refresh_wanted);
    }
}
