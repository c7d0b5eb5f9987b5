// App module for edudash-tui
// Handles application state and business logic

pub mod actions;
pub mod input;
pub mod sinks;
pub mod state;

pub use actions::{AppActions, MapData, RefreshData};
pub use input::handle_input;
pub use state::{App, AppScreen, Capabilities};
