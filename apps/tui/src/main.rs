mod api;
mod app;
mod cli;
mod config;
mod domain;
mod event;
mod filters;
mod format;
mod geo;
mod terminal;
mod ui;

use app::{App, AppActions};
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use tracing::warn;

const EMBEDDED_BOOTSTRAP: &str = include_str!("../data/bootstrap.json");

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    init_tracing();

    // Initialize application state
    let config = config::init_app_config();
    let client = api::ApiClient::new(config);
    let mut app = App::new(AppActions::new(client));
    app.filters = args.initial_filters();
    if let Some(metric) = args.metric.as_deref().and_then(domain::Metric::parse) {
        app.metric = metric;
    }

    if !app.capabilities.any_enabled() {
        return Err(color_eyre::eyre::eyre!(
            "Every dashboard panel is disabled; nothing to show"
        ));
    }

    // No terminal (or an explicit flag) means headless mode
    if args.headless || !is_terminal() {
        return event::run_headless(&mut app, args.json).await;
    }

    // First paint comes from the bootstrap payload; the initial refresh
    // replaces it as soon as the network answers.
    apply_bootstrap(&mut app);
    app.filter_options = app.actions.fetch_filter_options().await;

    // Setup terminal
    let mut terminal = terminal::setup()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// Diagnostics go to stderr, gated by RUST_LOG so they stay out of the way
/// of the raw-mode UI unless asked for.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Applies the embedded (or overridden) bootstrap payload. A malformed
/// document is logged and skipped; the dashboard simply starts empty.
fn apply_bootstrap(app: &mut App) {
    let override_raw = app
        .actions
        .client
        .config()
        .bootstrap_path
        .clone()
        .and_then(|path| match std::fs::read_to_string(&path) {
            Ok(raw) => Some(raw),
            Err(error) => {
                warn!(path, %error, "bootstrap override unreadable, using embedded payload");
                None
            }
        });
    let raw = override_raw.as_deref().unwrap_or(EMBEDDED_BOOTSTRAP);

    match api::models::parse_bootstrap(raw) {
        Ok(payload) => {
            app::sinks::apply_payload(app.capabilities, &mut app.widgets, &payload);
            app.status_message = "Loaded bootstrap data".to_string();
        }
        Err(error) => {
            warn!(%error, "bootstrap payload malformed, starting empty");
        }
    }
}
