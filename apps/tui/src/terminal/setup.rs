use color_eyre::Result;
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Write};
use tracing::debug;

/// Set up the terminal: raw mode first, then the alternate screen, rolling
/// back whatever succeeded when a later step fails.
pub fn setup() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    if let Err(e) = enable_raw_mode() {
        return Err(color_eyre::eyre::eyre!("Failed to enable raw mode: {e}"));
    }

    let mut out = stdout();
    if let Err(e) = execute!(out, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(color_eyre::eyre::eyre!(
            "Failed to enter alternate screen: {e}"
        ));
    }

    let backend = CrosstermBackend::new(out);
    let mut terminal = match Terminal::new(backend) {
        Ok(term) => term,
        Err(e) => {
            let _ = execute!(stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
            return Err(color_eyre::eyre::eyre!("Failed to create terminal: {e}"));
        }
    };

    if let Err(e) = terminal.clear() {
        debug!("failed to clear terminal: {e}");
        // Not fatal, continue
    }
    if let Err(e) = execute!(stdout(), cursor::Hide) {
        debug!("failed to hide cursor: {e}");
        // Not fatal, continue
    }

    Ok(terminal)
}

/// Restore terminal state, tolerating partial failures.
pub fn cleanup(raw_mode: bool, alternate_screen: bool) {
    let mut out = stdout();

    let _ = execute!(out, cursor::Show);

    if alternate_screen {
        let _ = execute!(out, LeaveAlternateScreen);
    }

    if raw_mode {
        let _ = disable_raw_mode();
    }

    // Leave the shell prompt on a fresh line.
    let _ = execute!(out, cursor::MoveToNextLine(1));
    let _ = out.flush();
}
