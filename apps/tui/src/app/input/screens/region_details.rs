use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_region_details_input(app: &mut App, key: KeyCode) {
    let count = app.widgets.map.region_count();

    match key {
        KeyCode::Up | KeyCode::Left => {
            app.widgets.map.selected = wrap_decrement(app.widgets.map.selected, count);
        }
        KeyCode::Down | KeyCode::Right => {
            app.widgets.map.selected = wrap_increment(app.widgets.map.selected, count);
        }
        KeyCode::Char('m') => {
            app.cycle_metric();
        }
        KeyCode::Esc | KeyCode::Enter => {
            app.screen = AppScreen::Dashboard;
        }
        KeyCode::Char('q') => {
            app.running = false;
        }
        _ => {}
    }
}
