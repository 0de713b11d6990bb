//! Event map renderer: turns a filtered set of [`Observation`]s into a
//! [`MapView`]: one coloured path per route, one marker per observation, and
//! a viewport fitted to the data.
//!
//! Rendering is a pure function of its input. The TUI draws a `MapView` onto a
//! terminal canvas; headless mode serialises it as JSON.
//!
//! # Route colours
//!
//! Each `RouteID` maps to one of 19 named colours by `RouteID mod 19`, so the
//! same route always gets the same colour and ids past the palette end cycle
//! back to the start.

use crate::types::Observation;
use serde::Serialize;
use std::collections::BTreeMap;

/// Stroke weight of every route path.
pub const STROKE_WEIGHT: f64 = 2.5;
/// Opacity of every route path.
pub const STROKE_OPACITY: f64 = 1.0;
/// Centre `[lat, lon]` of the map when nothing is selected.
pub const DEFAULT_CENTER: [f64; 2] = [20.0, -100.0];
/// Zoom level of the map when nothing is selected.
pub const DEFAULT_ZOOM: u8 = 4;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// The fixed route palette, in index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteColor {
    Red,
    Blue,
    Green,
    Purple,
    Orange,
    DarkRed,
    LightRed,
    Beige,
    DarkBlue,
    DarkGreen,
    CadetBlue,
    DarkPurple,
    White,
    Pink,
    LightBlue,
    LightGreen,
    Gray,
    Black,
    LightGray,
}

pub const PALETTE: [RouteColor; 19] = [
    RouteColor::Red,
    RouteColor::Blue,
    RouteColor::Green,
    RouteColor::Purple,
    RouteColor::Orange,
    RouteColor::DarkRed,
    RouteColor::LightRed,
    RouteColor::Beige,
    RouteColor::DarkBlue,
    RouteColor::DarkGreen,
    RouteColor::CadetBlue,
    RouteColor::DarkPurple,
    RouteColor::White,
    RouteColor::Pink,
    RouteColor::LightBlue,
    RouteColor::LightGreen,
    RouteColor::Gray,
    RouteColor::Black,
    RouteColor::LightGray,
];

impl RouteColor {
    pub fn name(self) -> &'static str {
        match self {
            RouteColor::Red => "red",
            RouteColor::Blue => "blue",
            RouteColor::Green => "green",
            RouteColor::Purple => "purple",
            RouteColor::Orange => "orange",
            RouteColor::DarkRed => "darkred",
            RouteColor::LightRed => "lightred",
            RouteColor::Beige => "beige",
            RouteColor::DarkBlue => "darkblue",
            RouteColor::DarkGreen => "darkgreen",
            RouteColor::CadetBlue => "cadetblue",
            RouteColor::DarkPurple => "darkpurple",
            RouteColor::White => "white",
            RouteColor::Pink => "pink",
            RouteColor::LightBlue => "lightblue",
            RouteColor::LightGreen => "lightgreen",
            RouteColor::Gray => "gray",
            RouteColor::Black => "black",
            RouteColor::LightGray => "lightgray",
        }
    }
}

impl std::fmt::Display for RouteColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Colour of a route: `PALETTE[route_id mod 19]`.
///
/// Uses the Euclidean remainder so negative ids also land inside the palette.
pub fn route_color(route_id: i64) -> RouteColor {
    PALETTE[route_id.rem_euclid(PALETTE.len() as i64) as usize]
}

// ---------------------------------------------------------------------------
// Output model
// ---------------------------------------------------------------------------

/// A `[lat, lon]` pair.
pub type LatLon = [f64; 2];

/// Bounding rectangle `[[min_lat, min_lon], [max_lat, max_lon]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[LatLon; 2]")]
pub struct Bounds {
    pub south_west: LatLon,
    pub north_east: LatLon,
}

impl From<Bounds> for [LatLon; 2] {
    fn from(b: Bounds) -> Self {
        [b.south_west, b.north_east]
    }
}

impl Bounds {
    /// Smallest rectangle containing every point, or `None` for no points.
    pub fn enclosing<I>(points: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = LatLon>,
    {
        points.into_iter().fold(None, |acc, [lat, lon]| {
            Some(match acc {
                None => Bounds {
                    south_west: [lat, lon],
                    north_east: [lat, lon],
                },
                Some(b) => Bounds {
                    south_west: [b.south_west[0].min(lat), b.south_west[1].min(lon)],
                    north_east: [b.north_east[0].max(lat), b.north_east[1].max(lon)],
                },
            })
        })
    }

    pub fn as_array(&self) -> [LatLon; 2] {
        (*self).into()
    }
}

/// Where the map viewport sits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Viewport {
    /// The world-scale default used when there is nothing to show.
    Default { center: LatLon, zoom: u8 },
    /// Fitted to the extent of the rendered points.
    Fit(Bounds),
}

impl Viewport {
    pub fn default_view() -> Self {
        Viewport::Default {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }

    /// The rectangle the viewport shows.
    ///
    /// A web-mercator tile at zoom `z` spans `360 / 2^z` degrees of longitude;
    /// the default view shows that span on either side of its centre and half
    /// of it in latitude.
    pub fn bounds(&self) -> Bounds {
        match *self {
            Viewport::Fit(bounds) => bounds,
            Viewport::Default { center, zoom } => {
                let half_lon = 360.0 / 2f64.powi(i32::from(zoom));
                let half_lat = half_lon / 2.0;
                Bounds {
                    south_west: [
                        (center[0] - half_lat).max(-90.0),
                        (center[1] - half_lon).max(-180.0),
                    ],
                    north_east: [
                        (center[0] + half_lat).min(90.0),
                        (center[1] + half_lon).min(180.0),
                    ],
                }
            }
        }
    }
}

/// A connected line through one route's points, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePath {
    pub route_id: i64,
    pub color: RouteColor,
    pub weight: f64,
    pub opacity: f64,
    pub locations: Vec<LatLon>,
}

/// A point marker for one observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub location: LatLon,
    pub route_id: i64,
    pub color: RouteColor,
    /// Note text revealed when the marker is opened.
    pub popup: String,
    /// Timestamp label shown on hover.
    pub tooltip: String,
}

/// Everything needed to draw one selection on a map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub paths: Vec<RoutePath>,
    pub markers: Vec<Marker>,
    pub viewport: Viewport,
}

impl MapView {
    /// The empty map: no paths, no markers, default viewport.
    pub fn empty() -> Self {
        Self {
            paths: Vec::new(),
            markers: Vec::new(),
            viewport: Viewport::default_view(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn visible_bounds(&self) -> Bounds {
        self.viewport.bounds()
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::empty()
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn tooltip(obs: &Observation) -> String {
    match obs.formatted_time() {
        Some(ts) => format!("Time: {ts}"),
        None => "Time: NaT".to_string(),
    }
}

/// Render a filtered selection.
///
/// Routes are emitted in ascending `RouteID` order; points within a route and
/// markers within a route keep the order they have in `observations`.
pub fn render<'a, I>(observations: I) -> MapView
where
    I: IntoIterator<Item = &'a Observation>,
{
    let mut groups: BTreeMap<i64, Vec<&Observation>> = BTreeMap::new();
    for obs in observations {
        groups.entry(obs.route_id).or_default().push(obs);
    }

    if groups.is_empty() {
        return MapView::empty();
    }

    let mut paths = Vec::with_capacity(groups.len());
    let mut markers = Vec::new();

    for (route_id, group) in &groups {
        let color = route_color(*route_id);
        paths.push(RoutePath {
            route_id: *route_id,
            color,
            weight: STROKE_WEIGHT,
            opacity: STROKE_OPACITY,
            locations: group.iter().map(|o| [o.latitude, o.longitude]).collect(),
        });
        markers.extend(group.iter().map(|o| Marker {
            location: [o.latitude, o.longitude],
            route_id: *route_id,
            color,
            popup: o.key_event_notes.clone(),
            tooltip: tooltip(o),
        }));
    }

    let viewport = Bounds::enclosing(markers.iter().map(|m| m.location))
        .map(Viewport::Fit)
        .unwrap_or_else(Viewport::default_view);

    tracing::debug!(
        routes = paths.len(),
        markers = markers.len(),
        "rendered map view"
    );

    MapView {
        paths,
        markers,
        viewport,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn obs(index: usize, route_id: i64, lat: f64, lon: f64, note: &str) -> Observation {
        Observation {
            index,
            battle_name: "Gettysburg".to_string(),
            route_id,
            latitude: lat,
            longitude: lon,
            key_event_notes: note.to_string(),
            date_time: NaiveDate::from_ymd_opt(2023, 7, 1)
                .and_then(|d| d.and_hms_opt(8, 0, index as u32)),
        }
    }

    #[test]
    fn palette_has_nineteen_distinct_colours() {
        let unique: std::collections::HashSet<_> = PALETTE.iter().collect();
        assert_eq!(unique.len(), 19);
        assert_eq!(PALETTE[0].name(), "red");
        assert_eq!(PALETTE[18].name(), "lightgray");
    }

    #[test]
    fn colours_cycle_past_the_palette() {
        assert_eq!(route_color(0), RouteColor::Red);
        assert_eq!(route_color(19), RouteColor::Red);
        assert_eq!(route_color(20), RouteColor::Blue);
        assert_eq!(route_color(-1), RouteColor::LightGray);
    }

    #[test]
    fn two_points_on_one_route() {
        let data = vec![obs(0, 1, 10.0, 10.0, "start"), obs(1, 1, 20.0, 20.0, "end")];
        let view = render(&data);

        assert_eq!(view.paths.len(), 1);
        assert_eq!(view.paths[0].locations, vec![[10.0, 10.0], [20.0, 20.0]]);
        assert_eq!(view.paths[0].color, RouteColor::Blue);
        assert_eq!(view.paths[0].weight, 2.5);
        assert_eq!(view.paths[0].opacity, 1.0);
        assert_eq!(view.markers.len(), 2);
        assert_eq!(view.markers[0].popup, "start");
        assert_eq!(view.markers[1].tooltip, "Time: 2023-07-01 08:00:01");
        assert_eq!(
            view.visible_bounds().as_array(),
            [[10.0, 10.0], [20.0, 20.0]]
        );
    }

    #[test]
    fn path_order_is_input_order_not_coordinate_order() {
        let data = vec![
            obs(0, 3, 30.0, 5.0, "a"),
            obs(1, 2, 0.0, 0.0, "x"),
            obs(2, 3, 10.0, 1.0, "b"),
            obs(3, 3, 20.0, 9.0, "c"),
        ];
        let view = render(&data);

        assert_eq!(view.paths.iter().map(|p| p.route_id).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(
            view.paths[1].locations,
            vec![[30.0, 5.0], [10.0, 1.0], [20.0, 9.0]]
        );
        assert_eq!(view.markers.len(), 4);
        assert_eq!(
            view.visible_bounds().as_array(),
            [[0.0, 0.0], [30.0, 9.0]]
        );
    }

    #[test]
    fn single_point_route_still_gets_a_path_and_marker() {
        let view = render(&[obs(0, 7, -33.9, 18.4, "solo")]);
        assert_eq!(view.paths.len(), 1);
        assert_eq!(view.paths[0].locations.len(), 1);
        assert_eq!(view.markers.len(), 1);
        assert_eq!(
            view.viewport,
            Viewport::Fit(Bounds {
                south_west: [-33.9, 18.4],
                north_east: [-33.9, 18.4]
            })
        );
    }

    #[test]
    fn empty_selection_renders_default_map() {
        let view = render(&Vec::<Observation>::new());
        assert!(view.paths.is_empty());
        assert!(view.markers.is_empty());
        assert!(view.is_empty());
        assert_eq!(view.viewport, Viewport::default_view());
        assert_eq!(view, MapView::default());
    }

    #[test]
    fn default_view_bounds_surround_the_default_centre() {
        let b = Viewport::default_view().bounds();
        assert_eq!(b.south_west, [8.75, -122.5]);
        assert_eq!(b.north_east, [31.25, -77.5]);
    }

    #[test]
    fn missing_timestamp_tooltip() {
        let mut o = obs(0, 1, 1.0, 1.0, "n");
        o.date_time = None;
        let view = render(&[o]);
        assert_eq!(view.markers[0].tooltip, "Time: NaT");
    }

    #[test]
    fn map_view_serialises_bounds_as_nested_arrays() {
        let view = render(&[obs(0, 1, 10.0, 10.0, "a"), obs(1, 1, 20.0, 20.0, "b")]);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(
            json["viewport"]["fit"],
            serde_json::json!([[10.0, 10.0], [20.0, 20.0]])
        );
        assert_eq!(json["paths"][0]["color"], "blue");
    }

    proptest! {
        #[test]
        fn colour_is_a_pure_function_of_route_id(id in any::<i64>()) {
            prop_assert_eq!(route_color(id), route_color(id));
            prop_assert_eq!(route_color(id), PALETTE[id.rem_euclid(19) as usize]);
        }

        #[test]
        fn colour_has_period_nineteen(id in -1_000_000i64..1_000_000) {
            prop_assert_eq!(route_color(id), route_color(id + 19));
        }

        #[test]
        fn fitted_bounds_contain_every_marker(
            points in proptest::collection::vec((-90.0f64..90.0, -180.0f64..180.0, 0i64..40), 1..30)
        ) {
            let data: Vec<Observation> = points
                .iter()
                .enumerate()
                .map(|(i, (lat, lon, route))| obs(i, *route, *lat, *lon, "p"))
                .collect();
            let view = render(&data);
            let b = view.visible_bounds();
            prop_assert_eq!(view.markers.len(), data.len());
            for m in &view.markers {
                prop_assert!(m.location[0] >= b.south_west[0] && m.location[0] <= b.north_east[0]);
                prop_assert!(m.location[1] >= b.south_west[1] && m.location[1] <= b.north_east[1]);
            }
        }
    }
}
