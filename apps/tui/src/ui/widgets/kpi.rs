use crate::app::state::KpiState;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// One card per summary scalar, evenly spread across the row.
pub fn render_kpi_cards(kpis: &KpiState, f: &mut Frame<'_>, area: Rect) {
    let cards = [
        ("Schools", kpis.schools.as_str(), Color::Cyan),
        ("Students", kpis.students.as_str(), Color::Green),
        ("Scholarships", kpis.scholarships.as_str(), Color::Yellow),
        ("Avg Progress", kpis.progress.as_str(), Color::Magenta),
        ("Initiatives", kpis.initiatives.as_str(), Color::Blue),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(20); 5])
        .split(area);

    for (index, (label, value, color)) in cards.iter().enumerate() {
        let block = Block::default()
            .title(format!(" {label} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(*color));

        let text = Text::from(vec![TextLine::from(Span::styled(
            *value,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))]);

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center);

        f.render_widget(paragraph, chunks[index]);
    }
}
