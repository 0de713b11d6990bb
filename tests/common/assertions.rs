//! Domain-specific assertion macros for battlemap harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that name the map
//! invariant that was violated.

/// Assert that a view's viewport is fitted to exactly these bounds.
///
/// ```rust
/// assert_fitted!(view, [[10.0, 10.0], [20.0, 20.0]]);
/// ```
#[macro_export]
macro_rules! assert_fitted {
    ($view:expr, $bounds:expr) => {{
        let view: &battlemap_core::MapView = &$view;
        match view.viewport {
            battlemap_core::Viewport::Fit(b) => {
                pretty_assertions::assert_eq!(b.as_array(), $bounds, "fitted bounds")
            }
            ref other => panic!("assert_fitted! failed: viewport is {:?}, not fitted", other),
        }
    }};
}

/// Assert that a view is the empty map at the default world view.
#[macro_export]
macro_rules! assert_empty_map {
    ($view:expr) => {{
        let view: &battlemap_core::MapView = &$view;
        assert!(
            view.paths.is_empty() && view.markers.is_empty(),
            "assert_empty_map! failed: {} paths, {} markers",
            view.paths.len(),
            view.markers.len()
        );
        pretty_assertions::assert_eq!(
            view.viewport,
            battlemap_core::Viewport::default_view(),
            "empty map must use the default viewport"
        );
    }};
}

/// Assert that every path and marker is coloured by its route.
#[macro_export]
macro_rules! assert_route_colors {
    ($view:expr) => {{
        let view: &battlemap_core::MapView = &$view;
        for path in &view.paths {
            assert_eq!(
                path.color,
                battlemap_core::render::route_color(path.route_id),
                "path for route {} has the wrong colour",
                path.route_id
            );
        }
        for marker in &view.markers {
            assert_eq!(
                marker.color,
                battlemap_core::render::route_color(marker.route_id),
                "marker for route {} has the wrong colour",
                marker.route_id
            );
        }
    }};
}
