use crate::app::state::{MapBounds, MapLayer, MapState};
use crate::domain::Metric;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Viewport used when the active layer has no usable bounds: roughly the
/// Indian subcontinent.
const DEFAULT_VIEWPORT: MapBounds = MapBounds {
    min_lng: 67.0,
    min_lat: 6.0,
    max_lng: 98.0,
    max_lat: 38.0,
};

/// Linear color ramp over 0..max. Zero-valued (or unmatched) regions get
/// the dark end of the ramp, the maximum the bright end.
pub fn color_scale(value: f64, max: f64) -> Color {
    let t = if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Color::Rgb(30, 60 + (100.0 * t) as u8, 30 + (200.0 * t) as u8)
}

/// Draws whichever layer is active: region outlines colored by metric, or
/// fallback markers. The viewport fits the layer bounds (already padded by
/// the sink); an invalid fit falls back to the default viewport.
pub fn render_map(map: &MapState, metric: Metric, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!(" Map: {} (m to switch) ", metric.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 4 || inner.height < 3 {
        return;
    }

    if matches!(map.layer, MapLayer::Empty) {
        let paragraph = Paragraph::new("Map data unavailable")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, inner);
        return;
    }

    let viewport = map.bounds.filter(MapBounds::is_valid).unwrap_or(DEFAULT_VIEWPORT);

    let canvas = Canvas::default()
        .paint(|ctx| match &map.layer {
            MapLayer::Empty => {}
            MapLayer::Choropleth(regions) => {
                for (index, region) in regions.iter().enumerate() {
                    let color = if index == map.selected {
                        Color::Yellow
                    } else {
                        color_scale(region.value, map.max_value)
                    };
                    for ring in &region.rings {
                        for pair in ring.windows(2) {
                            ctx.draw(&CanvasLine {
                                x1: pair[0].0,
                                y1: pair[0].1,
                                x2: pair[1].0,
                                y2: pair[1].1,
                                color,
                            });
                        }
                        // Close the ring back to its first vertex.
                        if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
                            if first != last {
                                ctx.draw(&CanvasLine {
                                    x1: last.0,
                                    y1: last.1,
                                    x2: first.0,
                                    y2: first.1,
                                    color,
                                });
                            }
                        }
                    }
                }
            }
            MapLayer::Markers(points) => {
                // Fixed marker radius, scaled to the viewport span.
                let radius = (viewport.max_lng - viewport.min_lng) * 0.015;
                for (index, point) in points.iter().enumerate() {
                    let color = if index == map.selected {
                        Color::Yellow
                    } else {
                        Color::Cyan
                    };
                    ctx.draw(&Circle {
                        x: point.lng,
                        y: point.lat,
                        radius,
                        color,
                    });
                }
            }
        })
        .x_bounds([viewport.min_lng, viewport.max_lng])
        .y_bounds([viewport.min_lat, viewport.max_lat]);

    f.render_widget(canvas, inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_spans_dark_to_bright() {
        assert_eq!(color_scale(0.0, 100.0), Color::Rgb(30, 60, 30));
        assert_eq!(color_scale(100.0, 100.0), Color::Rgb(30, 160, 230));
        assert_eq!(color_scale(50.0, 100.0), Color::Rgb(30, 110, 130));
    }

    #[test]
    fn zero_max_maps_everything_to_the_dark_end() {
        assert_eq!(color_scale(12.0, 0.0), Color::Rgb(30, 60, 30));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(color_scale(250.0, 100.0), Color::Rgb(30, 160, 230));
        assert_eq!(color_scale(-5.0, 100.0), Color::Rgb(30, 60, 30));
    }
}
