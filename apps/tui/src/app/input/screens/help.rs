use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::F(1) | KeyCode::Char('?')) {
        app.show_help = !app.show_help;
        return true;
    }
    false
}

pub fn handle_help_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Esc => {
            app.show_help = false;
        }
        KeyCode::Char('q') => {
            app.running = false;
        }
        _ => {}
    }
}
