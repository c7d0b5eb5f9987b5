use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_initiatives_input(app: &mut App, key: KeyCode) {
    let table = &mut app.widgets.initiatives;
    let last = table.rows.len().saturating_sub(1);

    match key {
        KeyCode::Up => {
            table.selected = table.selected.saturating_sub(1);
        }
        KeyCode::Down => {
            table.selected = (table.selected + 1).min(last);
        }
        KeyCode::PageUp => {
            table.selected = table.selected.saturating_sub(5);
        }
        KeyCode::PageDown => {
            table.selected = (table.selected + 5).min(last);
        }
        KeyCode::Home => {
            table.selected = 0;
        }
        KeyCode::End => {
            table.selected = last;
        }
        KeyCode::Esc => {
            app.screen = AppScreen::Dashboard;
        }
        KeyCode::Char('q') => {
            app.running = false;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::app::actions::AppActions;
    use crate::app::state::InitiativeRow;
    use crate::config::AppConfig;

    fn app_with_rows(count: usize) -> App {
        let config = AppConfig {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            geo_primary_path: String::new(),
            geo_fallback_path: String::new(),
            bootstrap_path: None,
            disabled_panels: Vec::new(),
        };
        let mut app = App::new(AppActions::new(ApiClient::new(config)));
        app.screen = AppScreen::Initiatives;
        let rows = (0..count)
            .map(|i| InitiativeRow {
                name: format!("Initiative {i}"),
                state: "Kerala".to_string(),
                scheme: "SWAYAM".to_string(),
                category: "Digital Learning".to_string(),
                year: 2025,
                status: "On Track".to_string(),
                status_slug: "on-track".to_string(),
                progress: "50.00%".to_string(),
            })
            .collect();
        app.widgets.initiatives.replace(rows);
        app
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut app = app_with_rows(3);
        handle_initiatives_input(&mut app, KeyCode::Up);
        assert_eq!(app.widgets.initiatives.selected, 0);
        handle_initiatives_input(&mut app, KeyCode::End);
        assert_eq!(app.widgets.initiatives.selected, 2);
        handle_initiatives_input(&mut app, KeyCode::Down);
        assert_eq!(app.widgets.initiatives.selected, 2);
    }

    #[test]
    fn escape_returns_to_the_dashboard() {
        let mut app = app_with_rows(0);
        handle_initiatives_input(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, AppScreen::Dashboard);
    }
}
