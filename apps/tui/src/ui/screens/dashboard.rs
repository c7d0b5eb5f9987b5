use crate::app::state::App;
use crate::domain::FilterKey;
use crate::ui::widgets::charts::{render_scholarship_barchart, render_trend_chart};
use crate::ui::widgets::kpi::render_kpi_cards;
use crate::ui::widgets::map::render_map;
use crate::ui::widgets::tables::render_initiatives_table;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_dashboard(app: &mut App, f: &mut Frame<'_>) {
    let capabilities = app.capabilities;

    // Disabled panels collapse out of the layout instead of leaving holes.
    let mut constraints = vec![Constraint::Length(3)]; // Filter bar
    if capabilities.kpis {
        constraints.push(Constraint::Length(3));
    }
    if capabilities.trend_chart || capabilities.bar_chart {
        constraints.push(Constraint::Min(8));
    }
    if capabilities.map || capabilities.initiatives_table {
        constraints.push(Constraint::Min(10));
    }
    constraints.push(Constraint::Length(3)); // Status area
    constraints.push(Constraint::Length(1)); // Shortcuts hint

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area().inner(Margin::new(2, 1)))
        .to_vec();

    let mut next = 0;
    let mut take = || {
        let area = chunks[next];
        next += 1;
        area
    };

    render_filter_bar(app, f, take());

    if capabilities.kpis {
        render_kpi_cards(&app.widgets.kpis, f, take());
    }

    if capabilities.trend_chart || capabilities.bar_chart {
        let area = take();
        match (capabilities.trend_chart, capabilities.bar_chart) {
            (true, true) => {
                let halves = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .split(area);
                render_trend_chart(&app.widgets.trend_chart, f, halves[0]);
                render_scholarship_barchart(&app.widgets.bar_chart, f, halves[1]);
            }
            (true, false) => render_trend_chart(&app.widgets.trend_chart, f, area),
            _ => render_scholarship_barchart(&app.widgets.bar_chart, f, area),
        }
    }

    if capabilities.map || capabilities.initiatives_table {
        let area = take();
        match (capabilities.map, capabilities.initiatives_table) {
            (true, true) => {
                let halves = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(area);
                render_map(&app.widgets.map, app.metric, f, halves[0]);
                render_initiatives_table(
                    &app.widgets.initiatives,
                    "Initiatives",
                    false,
                    f,
                    halves[1],
                );
            }
            (true, false) => render_map(&app.widgets.map, app.metric, f, area),
            _ => render_initiatives_table(&app.widgets.initiatives, "Initiatives", false, f, area),
        }
    }

    render_status_section(app, f, take());
    render_shortcuts(f, take());
}

fn render_filter_bar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Filters ")
        .title_style(Style::default().fg(Color::Green))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    // Search mode replaces the bar with the live query.
    if let Some(input) = app.search_input.as_ref() {
        let line = TextLine::from(vec![
            Span::styled("Search state: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{input}█"),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (Enter to apply, Esc to cancel)", Style::default().fg(Color::Gray)),
        ]);
        f.render_widget(Paragraph::new(line).block(block), area);
        return;
    }

    let mut spans = Vec::new();
    for (index, key) in FilterKey::ALL.iter().enumerate() {
        let selected = index == app.selected_filter;
        let value = app.filters.get(*key).unwrap_or("All");
        let style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {}: {value} ", key.label()), style));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(
        format!("Metric: {}", app.metric.label()),
        Style::default().fg(Color::Cyan),
    ));

    f.render_widget(Paragraph::new(TextLine::from(spans)).block(block), area);
}

fn render_status_section(app: &mut App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    if app.refreshing {
        let throbber = throbber_widgets_tui::Throbber::default()
            .label("Refreshing dashboard...")
            .style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_stateful_widget(throbber, inner, &mut app.throbber);
        return;
    }

    let mut text = if app.status_message.is_empty() {
        "Ready".to_string()
    } else {
        app.status_message.clone()
    };
    if let Some(at) = app.last_refreshed_at {
        text.push_str(&format!("  (updated {})", at.format("%H:%M:%S UTC")));
    }

    let style = if app.status_message.starts_with("Refresh failed") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    f.render_widget(
        Paragraph::new(Span::styled(text, style)).block(block),
        area,
    );
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let hint_style = Style::default().fg(Color::Gray);

    let shortcuts = TextLine::from(vec![
        Span::styled("←/→", key_style),
        Span::styled(": Filter | ", hint_style),
        Span::styled("↑/↓", key_style),
        Span::styled(": Value | ", hint_style),
        Span::styled("/", key_style),
        Span::styled(": Find state | ", hint_style),
        Span::styled("m", key_style),
        Span::styled(": Metric | ", hint_style),
        Span::styled("i", key_style),
        Span::styled(": Initiatives | ", hint_style),
        Span::styled("g", key_style),
        Span::styled(": Regions | ", hint_style),
        Span::styled("e", key_style),
        Span::styled(": Export | ", hint_style),
        Span::styled("r", key_style),
        Span::styled(": Refresh | ", hint_style),
        Span::styled("F1", key_style),
        Span::styled(": Help | ", hint_style),
        Span::styled("q", key_style),
        Span::styled(": Quit", hint_style),
    ]);

    f.render_widget(
        Paragraph::new(shortcuts).alignment(Alignment::Center),
        area,
    );
}
