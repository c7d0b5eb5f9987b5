use crate::app::state::App;
use crate::ui::widgets::tables::render_initiatives_table;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Full-screen initiatives view with keyboard navigation.
pub fn render_initiatives_view(app: &mut App, f: &mut Frame<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(f.area());

    render_initiatives_table(&app.widgets.initiatives, "Initiatives", true, f, chunks[0]);

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let help_text = vec![
        Span::styled("ESC", key_style),
        Span::raw(": Back to dashboard   "),
        Span::styled("↑/↓", key_style),
        Span::raw(": Navigate   "),
        Span::styled("PgUp/PgDn", key_style),
        Span::raw(": Jump 5 rows   "),
        Span::styled("Home/End", key_style),
        Span::raw(": First/Last   "),
        Span::styled("q", key_style),
        Span::raw(": Quit"),
    ];

    let help_paragraph = Paragraph::new(TextLine::from(help_text))
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Center);

    f.render_widget(help_paragraph, chunks[1]);
}
