use crate::app::state::InitiativesTableState;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    if selected_index >= max_visible_rows {
        return selected_index.saturating_sub(max_visible_rows) + 1;
    }

    selected_index
}

/// Row color keyed off the slugified status, the table's styling hook.
pub fn status_color(slug: &str) -> Color {
    match slug {
        "on-track" => Color::Green,
        "completed" => Color::Cyan,
        "delayed" => Color::Yellow,
        "at-risk" => Color::Red,
        _ => Color::Gray,
    }
}

/// Initiatives table. An empty sequence renders exactly one placeholder
/// row spanning the columns, never zero rows.
pub fn render_initiatives_table(
    table: &InitiativesTableState,
    title: &str,
    highlight_selection: bool,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let header = Row::new(vec![
        Cell::from("Initiative"),
        Cell::from("State"),
        Cell::from("Scheme"),
        Cell::from("Category"),
        Cell::from("Year"),
        Cell::from("Status"),
        Cell::from("Progress"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let widths = [
        Constraint::Min(24),
        Constraint::Length(16),
        Constraint::Length(20),
        Constraint::Length(16),
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(9),
    ];

    if table.rows.is_empty() {
        let empty = Row::new(vec![Cell::from(
            "No initiatives match the current filters.",
        )])
        .style(Style::default().fg(Color::Gray));
        let widget = Table::new(vec![empty], [Constraint::Percentage(100)])
            .header(header)
            .block(Block::default().title(title.to_string()).borders(Borders::ALL))
            .column_spacing(1);
        f.render_widget(widget, area);
        return;
    }

    let total_rows = table.rows.len();
    let max_visible_rows = area.height.saturating_sub(4) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows, table.selected);

    let rows = table
        .rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows.max(1))
        .map(|(index, row)| {
            let style = if highlight_selection && index == table.selected {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(status_color(&row.status_slug))
            };

            Row::new(vec![
                Cell::from(row.name.clone()),
                Cell::from(row.state.clone()),
                Cell::from(row.scheme.clone()),
                Cell::from(row.category.clone()),
                Cell::from(row.year.to_string()),
                Cell::from(row.status.clone()),
                Cell::from(row.progress.clone()),
            ])
            .style(style)
        });

    let widget = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    "{title} ({} of {total_rows})",
                    table.selected + 1
                ))
                .borders(Borders::ALL),
        )
        .column_spacing(1);

    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolling_starts_once_the_selection_leaves_the_window() {
        assert_eq!(scroll_offset(10, 5, 0), 0);
        assert_eq!(scroll_offset(10, 5, 4), 4);
        assert_eq!(scroll_offset(10, 5, 5), 1);
        assert_eq!(scroll_offset(10, 5, 9), 5);
        assert_eq!(scroll_offset(3, 5, 2), 0);
    }

    #[test]
    fn status_colors_key_off_the_slug() {
        assert_eq!(status_color("on-track"), Color::Green);
        assert_eq!(status_color("at-risk"), Color::Red);
        assert_eq!(status_color("unknown-status"), Color::Gray);
    }
}
