// UI module for edudash-tui
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::state::AppScreen;
use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &mut App, f: &mut Frame<'_>) {
    if app.show_help {
        screens::help::render_help(f, f.area());
        return;
    }

    match app.screen {
        AppScreen::Dashboard => screens::dashboard::render_dashboard(app, f),
        AppScreen::Initiatives => screens::initiatives::render_initiatives_view(app, f),
        AppScreen::RegionDetails => screens::region_details::render_region_details(app, f),
    }
}
