use crate::app::state::{App, MapLayer};
use crate::format;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// Region detail popup over the dashboard — the TUI stand-in for the map
/// popups. Choropleth regions show the selected metric; markers show all
/// four.
pub fn render_region_details(app: &mut App, f: &mut Frame<'_>) {
    super::dashboard::render_dashboard(app, f);

    let area = centered_rect(45, 40, f.area());
    f.render_widget(ClearWidget, area);

    let (title, lines) = match &app.widgets.map.layer {
        MapLayer::Choropleth(regions) => {
            let Some(region) = regions.get(app.widgets.map.selected) else {
                return;
            };
            #[allow(clippy::cast_possible_truncation)]
            let value = format::group_count(region.value.round() as i64);
            (
                region.name.clone(),
                vec![
                    TextLine::from(format!("{}: {value}", app.metric.label())),
                    TextLine::from(""),
                    TextLine::from(Span::styled(
                        "↑/↓ next region   m: switch metric   Esc: close",
                        Style::default().fg(Color::Gray),
                    )),
                ],
            )
        }
        MapLayer::Markers(points) => {
            let Some(point) = points.get(app.widgets.map.selected) else {
                return;
            };
            #[allow(clippy::cast_possible_truncation)]
            let progress = (point.avg_progress * 100.0).round() as i64;
            (
                point.state.clone(),
                vec![
                    TextLine::from(format!("Schools: {}", format::group_count(point.schools))),
                    TextLine::from(format!("Students: {}", format::group_count(point.students))),
                    TextLine::from(format!(
                        "Scholarships: {}",
                        format::group_count(point.scholarships)
                    )),
                    TextLine::from(format!("Avg Progress: {progress}%")),
                    TextLine::from(""),
                    TextLine::from(Span::styled(
                        "↑/↓ next point   Esc: close",
                        Style::default().fg(Color::Gray),
                    )),
                ],
            )
        }
        MapLayer::Empty => return,
    };

    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}
