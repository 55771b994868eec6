pub mod parse;

pub use parse::parse_polygon;

use geo_types::{Coord, Geometry, LineString, Point, Polygon};

/// Human-readable name of a geometry variant, for error messages.
pub(crate) fn geometry_type_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

/// Number of evenly spaced nodes used when densifying a bounding-box edge
/// before reprojection.
pub const DENSIFY_NODES: usize = 21;

/// Builds an axis-aligned polygon from bounding extents.
pub fn bounds_to_polygon(left: f64, bottom: f64, right: f64, top: f64) -> Polygon<f64> {
    Polygon::new(
        LineString::from(vec![
            (left, top),
            (right, top),
            (right, bottom),
            (left, bottom),
            (left, top),
        ]),
        vec![],
    )
}

/// The corner points of a bounding box in UL, UR, LR, LL order.
pub fn rect_corners(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> [Point<f64>; 4] {
    [
        Point::new(min_x, max_y),
        Point::new(max_x, max_y),
        Point::new(max_x, min_y),
        Point::new(min_x, min_y),
    ]
}

/// `num` evenly spaced values from `start` to `stop`, endpoints included.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    if num == 0 {
        return Vec::new();
    }
    if num == 1 {
        return vec![start];
    }
    let step = (stop - start) / (num - 1) as f64;
    (0..num).map(|i| start + i as f64 * step).collect()
}

/// Inserts evenly spaced nodes between the start and end of a line segment,
/// endpoints included. A straight edge in one CRS is generally curved in
/// another; the densified nodes let the envelope of the reprojected edge
/// approximate the true warped footprint.
pub fn densify_segment(start: Coord<f64>, end: Coord<f64>, nodes: usize) -> Vec<Coord<f64>> {
    let xs = linspace(start.x, end.x, nodes);
    let ys = linspace(start.y, end.y, nodes);
    xs.into_iter()
        .zip(ys)
        .map(|(x, y)| Coord { x, y })
        .collect()
}

/// True iff the two values differ by at most `tolerance`.
pub fn epsilon_check(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}
