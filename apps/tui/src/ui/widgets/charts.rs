use crate::app::state::{BarChartState, TrendChartState};
use crate::format;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
};
use ratatui::Frame;

/// Monthly enrollment line chart: primary and secondary series over the
/// label axis, y starting at zero.
pub fn render_trend_chart(state: &TrendChartState, f: &mut Frame<'_>, area: Rect) {
    if state.is_empty() {
        render_placeholder("Enrollment Trends", f, area);
        return;
    }

    let primary: Vec<(f64, f64)> = series_points(&state.primary);
    let secondary: Vec<(f64, f64)> = series_points(&state.secondary);

    let max_y = state
        .primary
        .iter()
        .chain(state.secondary.iter())
        .copied()
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let datasets = vec![
        Dataset::default()
            .name("Primary")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&primary),
        Dataset::default()
            .name("Secondary")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&secondary),
    ];

    // Thin the x labels so long month sequences stay readable.
    let step = (state.labels.len() / 6).max(1);
    let x_labels: Vec<Span<'_>> = state
        .labels
        .iter()
        .step_by(step)
        .map(|label| Span::raw(label.as_str()))
        .collect();

    let y_labels = vec![
        Span::raw("0"),
        Span::raw(format::group_count((max_y / 2.0) as i64)),
        Span::raw(format::group_count(max_y as i64)),
    ];

    #[allow(clippy::cast_precision_loss)]
    let x_max = (state.labels.len().saturating_sub(1)).max(1) as f64;

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title("Enrollment Trends")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_y])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

/// Scholarship beneficiaries per state.
pub fn render_scholarship_barchart(state: &BarChartState, f: &mut Frame<'_>, area: Rect) {
    if state.states.is_empty() {
        render_placeholder("Scholarships by State", f, area);
        return;
    }

    let bars: Vec<Bar<'_>> = state
        .states
        .iter()
        .zip(state.values.iter())
        .map(|(label, value)| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let value = value.max(0.0).round() as u64;
            Bar::default()
                .value(value)
                .text_value(format::group_count(i64::try_from(value).unwrap_or(0)))
                .label(TextLine::from(truncate_label(label)))
                .style(Style::default().fg(Color::Cyan))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();

    let max_value = state
        .values
        .iter()
        .copied()
        .fold(0.0_f64, f64::max)
        .max(1.0);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Scholarships by State")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .data(BarGroup::default().bars(&bars))
        .max(max_value.round() as u64)
        .bar_gap(1)
        .bar_width(8);

    f.render_widget(chart, area);
}

fn series_points(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            #[allow(clippy::cast_precision_loss)]
            (index as f64, *value)
        })
        .collect()
}

fn truncate_label(label: &str) -> String {
    if label.len() > 8 {
        format!("{}.", &label[..7])
    } else {
        label.to_string()
    }
}

fn render_placeholder(title: &str, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new("No data for the current filters")
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(paragraph, area);
}
