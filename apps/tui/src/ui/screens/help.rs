use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_help(f: &mut Frame<'_>, area: Rect) {
    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let key = |k: &'static str, desc: &'static str| {
        TextLine::from(vec![
            Span::styled(
                format!("  {k}"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" - {desc}"), Style::default()),
        ])
    };

    let help_text = vec![
        TextLine::from(vec![Span::styled(
            "Education Initiatives Dashboard",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        TextLine::from(""),
        TextLine::from(
            "KPI cards, enrollment trends, scholarships and a state map for the initiatives API. \
             Changing any filter re-fetches everything in one cycle.",
        ),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        key("F1 / ?", "Toggle this help screen"),
        key("Left/Right", "Select a filter control"),
        key("Up/Down", "Cycle the selected filter's value (refreshes)"),
        key("/", "Fuzzy-find a state filter value"),
        key("x", "Clear all filters"),
        key("m / 1-4", "Switch the map metric"),
        key("i", "Initiatives table view"),
        key("g", "Region details popup"),
        key("e", "Open the report download for the current filters"),
        key("r", "Refresh now"),
        key("q", "Quit"),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Map modes:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        TextLine::from("  Regions are colored by the selected metric when polygon data loads;"),
        TextLine::from("  without it the map falls back to one marker per state."),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Press Esc to close this help screen",
            Style::default().fg(Color::Yellow),
        )]),
    ];

    let help_paragraph = Paragraph::new(Text::from(help_text))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, area);
}
