use color_eyre::Result;
use crossterm::event::{self, Event};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::convert::TryFrom;
use std::fmt;
use std::io::Stdout;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::Error as ApiError;
use crate::app::{handle_input, sinks, App, RefreshData};

// Refresh lifecycle states: the loading indicator is visible exactly while
// the machine sits in Refreshing.
#[derive(Clone, Copy, PartialEq, Debug)]
enum RefreshState {
    Idle,
    Refreshing,
}

impl fmt::Display for RefreshState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Refreshing => write!(f, "Refreshing"),
        }
    }
}

// Events driving the refresh machine
#[derive(Clone, Copy, Debug)]
enum RefreshEvent {
    Trigger { seq: u64 },
    Settled { seq: u64 },
}

impl fmt::Display for RefreshEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trigger { seq } => write!(f, "Trigger({seq})"),
            Self::Settled { seq } => write!(f, "Settled({seq})"),
        }
    }
}

#[derive(Debug)]
struct StateTransitionError {
    from: RefreshState,
    event: RefreshEvent,
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for StateTransitionError {}

/// State machine for the filter-driven refresh cycle. Hands out
/// monotonically increasing sequence numbers; a completion is only allowed
/// to settle the machine (and reach the sinks) when it carries the latest
/// one, so a superseded in-flight refresh can never overwrite a newer
/// render.
struct RefreshMachine {
    state: RefreshState,
    latest_seq: u64,
}

impl RefreshMachine {
    const fn new() -> Self {
        Self {
            state: RefreshState::Idle,
            latest_seq: 0,
        }
    }

    const fn state(&self) -> RefreshState {
        self.state
    }

    const fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    fn next_seq(&mut self) -> u64 {
        self.latest_seq += 1;
        self.latest_seq
    }

    // Process an event and update the state machine and app
    fn process_event(
        &mut self,
        event: &RefreshEvent,
        app: &mut App,
    ) -> std::result::Result<(), StateTransitionError> {
        let next_state = NextState::try_from((self.state, event, self.latest_seq, app))?;
        self.state = next_state.0;
        Ok(())
    }
}

// Helper struct for state transitions
struct NextState(RefreshState);

impl TryFrom<(RefreshState, &RefreshEvent, u64, &mut App)> for NextState {
    type Error = StateTransitionError;

    fn try_from(
        value: (RefreshState, &RefreshEvent, u64, &mut App),
    ) -> std::result::Result<Self, Self::Error> {
        let (current_state, event, latest_seq, app) = value;

        match (current_state, event) {
            // A trigger while already refreshing supersedes the in-flight
            // cycle; the old completion will arrive stale and be dropped.
            (RefreshState::Idle | RefreshState::Refreshing, RefreshEvent::Trigger { .. }) => {
                app.refreshing = true;
                Ok(Self(RefreshState::Refreshing))
            }
            (RefreshState::Refreshing, RefreshEvent::Settled { seq }) if *seq == latest_seq => {
                app.refreshing = false;
                Ok(Self(RefreshState::Idle))
            }
            // Stale settlement: discard, stay in whatever state we are in.
            (state, RefreshEvent::Settled { seq }) if *seq < latest_seq => Ok(Self(state)),
            _ => Err(StateTransitionError {
                from: current_state,
                event: *event,
            }),
        }
    }
}

/// Completion message a refresh task posts back to the UI loop.
struct RefreshOutcome {
    seq: u64,
    result: std::result::Result<RefreshData, ApiError>,
}

fn spawn_refresh(app: &App, seq: u64, tx: &mpsc::UnboundedSender<RefreshOutcome>) {
    let actions = app.actions.clone();
    let filters = app.filters.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = actions.refresh(&filters).await;
        // Receiver gone means the loop already exited; nothing to do.
        let _ = tx.send(RefreshOutcome { seq, result });
    });
}

/// Settles the machine, then fans the payload out to the sinks. Stale
/// completions are discarded before they can touch any widget.
fn apply_outcome(app: &mut App, machine: &mut RefreshMachine, outcome: RefreshOutcome) {
    if outcome.seq != machine.latest_seq() {
        debug!(
            seq = outcome.seq,
            latest = machine.latest_seq(),
            "discarding stale refresh completion"
        );
        return;
    }

    // Back to Idle before any sink runs, so the throbber's lifetime
    // brackets exactly one fetch-and-render cycle.
    if let Err(error) = machine.process_event(&RefreshEvent::Settled { seq: outcome.seq }, app) {
        warn!(%error, "refresh state machine rejected settlement");
    }

    match outcome.result {
        Ok(data) => {
            sinks::apply_payload(app.capabilities, &mut app.widgets, &data.payload);
            sinks::apply_map(app.capabilities, &mut app.widgets, data.map_data, app.metric);
            app.last_refreshed_at = Some(chrono::Utc::now());
            app.status_message = format!(
                "Showing {} initiatives",
                app.widgets.initiatives.rows.len()
            );
        }
        Err(error) => {
            // Last successfully rendered state stays on screen.
            warn!(%error, "dashboard refresh failed, keeping previous render");
            app.status_message = format!("Refresh failed: {error}");
        }
    }
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let (tx, mut rx) = mpsc::unbounded_channel::<RefreshOutcome>();
    let mut machine = RefreshMachine::new();

    // Initial load behaves like a filter change.
    app.request_refresh();

    loop {
        if app.refreshing {
            app.throbber.calc_next();
        }

        if let Err(e) = terminal.draw(|f| crate::ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| crate::ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_))
                | Err(_) => {
                    // Ignore non-key events for now
                }
            }
        }

        // A filter change (or initial load) flagged a refresh; stamp it and
        // hand it to a task so the UI keeps drawing.
        if app.refresh_wanted {
            app.refresh_wanted = false;
            let seq = machine.next_seq();
            debug!(state = %machine.state(), seq, "refresh triggered");
            if let Err(error) = machine.process_event(&RefreshEvent::Trigger { seq }, app) {
                warn!(%error, "refresh state machine rejected trigger");
                continue;
            }
            spawn_refresh(app, seq, &tx);
        }

        // Apply any settled refreshes between frames.
        while let Ok(outcome) = rx.try_recv() {
            apply_outcome(app, &mut machine, outcome);
        }
    }

    Ok(())
}

/// Run the application in headless mode (no UI): one refresh, printed as
/// text or JSON.
pub async fn run_headless(app: &mut App, json: bool) -> Result<()> {
    app.filter_options = app.actions.fetch_filter_options().await;

    let data = app
        .actions
        .refresh(&app.filters)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Dashboard fetch failed: {e}"))?;
    sinks::apply_payload(app.capabilities, &mut app.widgets, &data.payload);
    sinks::apply_map(app.capabilities, &mut app.widgets, data.map_data, app.metric);

    let snapshot = build_headless_snapshot(app);

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        render_headless_snapshot(&snapshot);
    }

    Ok(())
}

fn build_headless_snapshot(app: &App) -> HeadlessSnapshot {
    let map_mode = match &app.widgets.map.layer {
        crate::app::state::MapLayer::Empty => "none",
        crate::app::state::MapLayer::Choropleth(_) => "choropleth",
        crate::app::state::MapLayer::Markers(_) => "markers",
    };

    let initiatives = app
        .widgets
        .initiatives
        .rows
        .iter()
        .take(5)
        .map(|row| HeadlessInitiative {
            name: row.name.clone(),
            state: row.state.clone(),
            year: row.year,
            status: row.status.clone(),
            progress: row.progress.clone(),
        })
        .collect();

    HeadlessSnapshot {
        generated: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        query: app.filters.query_string(),
        schools: app.widgets.kpis.schools.clone(),
        students: app.widgets.kpis.students.clone(),
        scholarships: app.widgets.kpis.scholarships.clone(),
        avg_progress: app.widgets.kpis.progress.clone(),
        map_mode: map_mode.to_string(),
        map_regions: app.widgets.map.region_count(),
        initiatives_total: app.widgets.initiatives.rows.len(),
        recent_initiatives: initiatives,
    }
}

fn render_headless_snapshot(snapshot: &HeadlessSnapshot) {
    println!("\nEducation Initiatives Dashboard");
    println!("================================");
    println!("Generated: {}", snapshot.generated);
    if snapshot.query.is_empty() {
        println!("Filters: (none)");
    } else {
        println!("Filters: {}", snapshot.query);
    }
    println!("Schools: {}", snapshot.schools);
    println!("Students: {}", snapshot.students);
    println!("Scholarships: {}", snapshot.scholarships);
    println!("Avg progress: {}", snapshot.avg_progress);
    println!(
        "Map: {} ({} regions)",
        snapshot.map_mode, snapshot.map_regions
    );

    println!(
        "\nInitiatives ({} total):",
        snapshot.initiatives_total
    );
    for item in &snapshot.recent_initiatives {
        println!(
            "- {} | {} | {} | {} | {}",
            item.name, item.state, item.year, item.status, item.progress
        );
    }
}

#[derive(serde::Serialize)]
struct HeadlessSnapshot {
    generated: String,
    query: String,
    schools: String,
    students: String,
    scholarships: String,
    avg_progress: String,
    map_mode: String,
    map_regions: usize,
    initiatives_total: usize,
    recent_initiatives: Vec<HeadlessInitiative>,
}

#[derive(serde::Serialize)]
struct HeadlessInitiative {
    name: String,
    state: String,
    year: i32,
    status: String,
    progress: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::parse_bootstrap;
    use crate::api::ApiClient;
    use crate::app::actions::{AppActions, MapData};
    use crate::config::AppConfig;

    fn test_app() -> App {
        let config = AppConfig {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            geo_primary_path: String::new(),
            geo_fallback_path: String::new(),
            bootstrap_path: None,
            disabled_panels: Vec::new(),
        };
        App::new(AppActions::new(ApiClient::new(config)))
    }

    fn sample_data(students: i64) -> RefreshData {
        let raw = format!(
            r#"{{
                "summary": {{"schools": 1, "students": {students}, "scholarships": 2, "avg_progress_pct": 10.0, "initiatives": 1}},
                "trends": {{"labels": ["Jan"], "primary": [1.0], "secondary": [2.0]}},
                "scholarships": {{"states": ["Goa"], "values": [3.0]}},
                "initiatives": [],
                "map": []
            }}"#
        );
        RefreshData {
            payload: parse_bootstrap(&raw).expect("sample payload should parse"),
            map_data: MapData::Unavailable,
        }
    }

    #[test]
    fn trigger_and_settle_bracket_the_refreshing_state() {
        let mut app = test_app();
        let mut machine = RefreshMachine::new();

        let seq = machine.next_seq();
        machine
            .process_event(&RefreshEvent::Trigger { seq }, &mut app)
            .expect("trigger from idle");
        assert_eq!(machine.state(), RefreshState::Refreshing);
        assert!(app.refreshing);

        machine
            .process_event(&RefreshEvent::Settled { seq }, &mut app)
            .expect("settle latest");
        assert_eq!(machine.state(), RefreshState::Idle);
        assert!(!app.refreshing);
    }

    #[test]
    fn settling_while_idle_is_rejected() {
        let mut app = test_app();
        let mut machine = RefreshMachine::new();
        machine.latest_seq = 1;
        assert!(machine
            .process_event(&RefreshEvent::Settled { seq: 1 }, &mut app)
            .is_err());
    }

    #[test]
    fn stale_completion_is_discarded_and_newer_one_wins() {
        let mut app = test_app();
        let mut machine = RefreshMachine::new();

        let first = machine.next_seq();
        machine
            .process_event(&RefreshEvent::Trigger { seq: first }, &mut app)
            .expect("first trigger");
        let second = machine.next_seq();
        machine
            .process_event(&RefreshEvent::Trigger { seq: second }, &mut app)
            .expect("superseding trigger");

        // The superseded cycle settles late; nothing may change.
        apply_outcome(
            &mut app,
            &mut machine,
            RefreshOutcome {
                seq: first,
                result: Ok(sample_data(111)),
            },
        );
        assert_eq!(machine.state(), RefreshState::Refreshing);
        assert!(app.refreshing);
        assert_eq!(app.widgets.kpis.students, "--");

        apply_outcome(
            &mut app,
            &mut machine,
            RefreshOutcome {
                seq: second,
                result: Ok(sample_data(222)),
            },
        );
        assert_eq!(machine.state(), RefreshState::Idle);
        assert!(!app.refreshing);
        assert_eq!(app.widgets.kpis.students, "222");
    }

    #[test]
    fn failed_refresh_keeps_the_previous_render() {
        let mut app = test_app();
        let mut machine = RefreshMachine::new();

        let seq = machine.next_seq();
        machine
            .process_event(&RefreshEvent::Trigger { seq }, &mut app)
            .expect("trigger");
        apply_outcome(
            &mut app,
            &mut machine,
            RefreshOutcome {
                seq,
                result: Ok(sample_data(42)),
            },
        );
        assert_eq!(app.widgets.kpis.students, "42");

        let seq = machine.next_seq();
        machine
            .process_event(&RefreshEvent::Trigger { seq }, &mut app)
            .expect("second trigger");
        apply_outcome(
            &mut app,
            &mut machine,
            RefreshOutcome {
                seq,
                result: Err(ApiError::status(
                    reqwest::StatusCode::BAD_GATEWAY,
                    "http://127.0.0.1:8000/api/data/",
                )),
            },
        );
        assert_eq!(machine.state(), RefreshState::Idle);
        assert_eq!(app.widgets.kpis.students, "42");
        assert!(app.status_message.starts_with("Refresh failed"));
    }
}
