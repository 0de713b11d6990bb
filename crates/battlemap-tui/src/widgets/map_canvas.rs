//! Map canvas: draws a [`MapView`] over a braille world map.
//!
//! Canvas `x` is longitude and `y` is latitude. Routes are drawn as segment
//! chains in their palette colour, markers as single points on a layer above
//! them. The focused marker is drawn with a distinct glyph, and with labels
//! enabled every marker prints its tooltip beside it (the terminal stand-in
//! for hovering).

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use battlemap_core::{Bounds, MapView, Viewport};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols,
    text::Span,
    widgets::{
        Block, Widget,
        canvas::{Canvas, Line as CanvasLine, Map, MapResolution, Points},
    },
};

/// Smallest margin, in degrees, kept around fitted data.
const MIN_PAD_DEG: f64 = 0.01;
/// Margin around fitted data as a fraction of its span.
const PAD_FRACTION: f64 = 0.1;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct MapCanvasState {
    /// Index into `MapView::markers` of the marker whose popup is shown.
    pub focused: usize,
    pub show_labels: bool,
}

impl MapCanvasState {
    /// Cycle the focused marker. Returns `true` when focus moved.
    pub fn handle(&mut self, event: &AppEvent, marker_count: usize) -> bool {
        if marker_count == 0 {
            return false;
        }
        let before = self.focused;
        self.focused = match event {
            AppEvent::Nav(Direction::Down | Direction::Right) => (self.focused + 1) % marker_count,
            AppEvent::Nav(Direction::Up | Direction::Left) => {
                (self.focused + marker_count - 1) % marker_count
            }
            AppEvent::Home => 0,
            AppEvent::End => marker_count - 1,
            _ => return false,
        };
        tracing::debug!(marker = self.focused, "map: focused marker");
        self.focused != before
    }

    /// Forget the focused marker; called whenever the view is re-rendered.
    pub fn reset(&mut self) {
        self.focused = 0;
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Canvas `(x_bounds, y_bounds)` for a view.
///
/// A fitted viewport is padded so points on its edge stay visible and a single
/// point still yields a non-degenerate area. An empty view shows `fallback`.
pub fn canvas_bounds(view: &MapView, fallback: Viewport) -> ([f64; 2], [f64; 2]) {
    match view.viewport {
        Viewport::Fit(bounds) => {
            let Bounds {
                south_west: [s, w],
                north_east: [n, e],
            } = bounds;
            let pad_lat = ((n - s) * PAD_FRACTION).max(MIN_PAD_DEG);
            let pad_lon = ((e - w) * PAD_FRACTION).max(MIN_PAD_DEG);
            (
                [(w - pad_lon).max(-180.0), (e + pad_lon).min(180.0)],
                [(s - pad_lat).max(-90.0), (n + pad_lat).min(90.0)],
            )
        }
        Viewport::Default { .. } => {
            let b = fallback.bounds();
            (
                [b.south_west[1], b.north_east[1]],
                [b.south_west[0], b.north_east[0]],
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct MapCanvas<'a> {
    view: &'a MapView,
    state: &'a MapCanvasState,
    fallback: Viewport,
    title: String,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> MapCanvas<'a> {
    pub fn new(
        view: &'a MapView,
        state: &'a MapCanvasState,
        fallback: Viewport,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        let title = format!(
            "Map ({} routes, {} markers)",
            view.paths.len(),
            view.markers.len()
        );
        Self {
            view,
            state,
            fallback,
            title,
            focused,
            theme,
        }
    }
}

impl Widget for MapCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (x_bounds, y_bounds) = canvas_bounds(self.view, self.fallback);
        let land = self.theme.map_land.fg.unwrap_or(Color::DarkGray);
        let view = self.view;
        let state = self.state;
        let theme = self.theme;

        Canvas::default()
            .block(
                Block::bordered()
                    .title(self.title.as_str())
                    .border_style(theme.border(self.focused)),
            )
            .marker(symbols::Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(move |ctx| {
                ctx.draw(&Map {
                    color: land,
                    resolution: MapResolution::High,
                });
                ctx.layer();

                for path in &view.paths {
                    let color = theme.route_color(path.color);
                    for pair in path.locations.windows(2) {
                        let ([lat1, lon1], [lat2, lon2]) = (pair[0], pair[1]);
                        ctx.draw(&CanvasLine {
                            x1: lon1,
                            y1: lat1,
                            x2: lon2,
                            y2: lat2,
                            color,
                        });
                    }
                }
                ctx.layer();

                for marker in &view.markers {
                    let [lat, lon] = marker.location;
                    ctx.draw(&Points {
                        coords: &[(lon, lat)],
                        color: theme.route_color(marker.color),
                    });
                }

                if state.show_labels {
                    for marker in &view.markers {
                        let [lat, lon] = marker.location;
                        let label = Span::styled(format!(" {}", marker.tooltip), theme.map_label);
                        ctx.print(lon, lat, label);
                    }
                }

                if let Some(marker) = view.markers.get(state.focused) {
                    let [lat, lon] = marker.location;
                    ctx.print(lon, lat, Span::styled("◉".to_string(), theme.map_focus));
                }
            })
            .render(area, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
