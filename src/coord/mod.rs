use crate::check::validate_coords;
use crate::core::constants::{EASE_CRS, GEO_CRS};
use crate::error::GridError;
use geo::MapCoords;
use geo_types::{Coord, Geometry, Point};
use proj::Proj;

/// Trait for types that can provide x/y coordinates.
///
/// Implemented for `(f64, f64)` tuples and `geo_types::Point<f64>`.
/// This allows functions to accept either type.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude or plane easting).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude or plane northing).
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

fn transformer(source_epsg: u32, target_epsg: u32) -> Result<Proj, GridError> {
    Proj::new_known_crs(
        &format!("EPSG:{}", source_epsg),
        &format!("EPSG:{}", target_epsg),
        None,
    )
    .map_err(|e| GridError::ProjectionError(e.to_string()))
}

/// Reprojects a list of coordinate pairs between two EPSG coordinate systems.
///
/// Axis order is always `(x, y)`. Output order matches input order.
pub fn reproject_points(
    points: &[(f64, f64)],
    source_epsg: u32,
    target_epsg: u32,
) -> Result<Vec<Point<f64>>, GridError> {
    let proj = transformer(source_epsg, target_epsg)?;
    points
        .iter()
        .map(|&(x, y)| {
            proj.convert((x, y))
                .map(|(px, py)| Point::new(px, py))
                .map_err(|e| GridError::ProjectionError(e.to_string()))
        })
        .collect()
}

/// Converts geographic (lon, lat) pairs to plane coordinates.
///
/// Every point is validated against the geographic extent first, inclusive
/// bounds; any violation fails the whole batch with `InvalidCoordinateRange`.
pub fn geo_points_to_ease(coords: &[(f64, f64)]) -> Result<Vec<Point<f64>>, GridError> {
    validate_coords(coords).map_err(|msgs| GridError::InvalidCoordinateRange(msgs.join("; ")))?;
    reproject_points(coords, GEO_CRS, EASE_CRS)
}

/// Converts plane coordinate pairs to geographic (lon, lat).
pub fn ease_points_to_geo(coords: &[(f64, f64)]) -> Result<Vec<Point<f64>>, GridError> {
    reproject_points(coords, EASE_CRS, GEO_CRS)
}

/// Reprojects every coordinate of a geometry between two EPSG systems.
pub fn reproject_geometry(
    geometry: &Geometry<f64>,
    source_epsg: u32,
    target_epsg: u32,
) -> Result<Geometry<f64>, GridError> {
    let proj = transformer(source_epsg, target_epsg)?;
    geometry.try_map_coords(|coord| {
        proj.convert((coord.x, coord.y))
            .map(|(x, y)| Coord { x, y })
            .map_err(|e| GridError::ProjectionError(e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_trait_tuple() {
        let tuple = (100.0, 200.0);
        assert_eq!(tuple.x(), 100.0);
        assert_eq!(tuple.y(), 200.0);
    }

    #[test]
    fn test_coordinate_trait_point() {
        let point = Point::new(100.0, 200.0);
        assert_eq!(point.x(), 100.0);
        assert_eq!(point.y(), 200.0);
    }

    #[test]
    fn test_geo_to_ease_round_trip() -> Result<(), GridError> {
        let lon = -93.26836;
        let lat = 44.97997;

        let ease = geo_points_to_ease(&[(lon, lat)])?;
        let back = ease_points_to_geo(&[(ease[0].x(), ease[0].y())])?;

        assert!((back[0].x() - lon).abs() < 1e-6);
        assert!((back[0].y() - lat).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_equator_maps_to_plane_origin_row() -> Result<(), GridError> {
        let ease = geo_points_to_ease(&[(0.0, 0.0)])?;
        assert!(ease[0].x().abs() < 1e-3);
        assert!(ease[0].y().abs() < 1e-3);
        Ok(())
    }

    #[test]
    fn test_out_of_range_latitude_rejected() {
        let result = geo_points_to_ease(&[(0.0, 89.0)]);
        assert!(matches!(
            result,
            Err(GridError::InvalidCoordinateRange(_))
        ));
    }

    #[test]
    fn test_batch_order_preserved() -> Result<(), GridError> {
        let coords = vec![(-93.0, 45.0), (10.0, -20.0), (150.0, 60.0)];
        let ease = geo_points_to_ease(&coords)?;
        assert_eq!(ease.len(), 3);
        // west of Greenwich stays west of the plane's central meridian
        assert!(ease[0].x() < 0.0);
        assert!(ease[1].x() > 0.0);
        assert!(ease[2].x() > ease[1].x());
        Ok(())
    }

    #[test]
    fn test_reproject_geometry_polygon() -> Result<(), GridError> {
        use geo_types::polygon;

        let poly = polygon![
            (x: -1.0, y: -1.0),
            (x: 1.0, y: -1.0),
            (x: 1.0, y: 1.0),
            (x: -1.0, y: 1.0),
            (x: -1.0, y: -1.0),
        ];
        let projected = reproject_geometry(&Geometry::Polygon(poly), GEO_CRS, EASE_CRS)?;
        match projected {
            Geometry::Polygon(p) => {
                // one degree of longitude at the equator is ~96.5 km in EASE v2
                let first = p.exterior().0[0];
                assert!(first.x < -90_000.0 && first.x > -110_000.0);
            }
            _ => panic!("Expected Polygon"),
        }
        Ok(())
    }
}
