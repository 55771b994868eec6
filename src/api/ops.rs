use crate::align;
use crate::check::{check_level, validate_cell_ids, validate_coords};
use crate::coord::{ease_points_to_geo, reproject_points};
use crate::core::constants::{EASE_CRS, EASE_EXTENT, GEO_CRS, GEO_EXTENT, level_table};
use crate::core::transform::ease_point_to_grid;
use crate::error::GridError;
use crate::geom::parse_polygon;
use crate::hierarchy::{self, AggregationMethod};
use crate::index::cell_id::CellId;
use crate::index::codec::{cell_id_to_ease, grid_xy_to_cell_id};
use crate::resolve;
use serde::Serialize;
use tracing::debug;

use super::response::GridResponse;

/// Result of an aggregation: parent cell ids and their reduced values, 1:1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregated {
    pub cell_ids: Vec<String>,
    pub values: Vec<f64>,
}

fn ids_to_strings(ids: &[CellId]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

/// Converts geographic (lon, lat) points to cell ids at `level`.
pub fn geos_to_cell_ids(coords: &[(f64, f64)], level: u8) -> GridResponse<Vec<String>> {
    if !check_level(level) {
        return GridResponse::fail_with(GridError::InvalidLevel(level).to_string());
    }
    if let Err(messages) = validate_coords(coords) {
        return GridResponse::fail(messages);
    }
    debug!(points = coords.len(), level, "converting points to cell ids");

    let convert = || -> Result<Vec<String>, GridError> {
        let plane = reproject_points(coords, GEO_CRS, EASE_CRS)?;
        plane
            .iter()
            .map(|p| {
                let (gx, gy) = ease_point_to_grid(p.x(), p.y());
                grid_xy_to_cell_id(gx, gy, level).map(|id| id.to_string())
            })
            .collect()
    };
    convert().into()
}

/// Converts cell ids to their centroids in plane coordinates.
pub fn cell_ids_to_ease<S: AsRef<str>>(ids: &[S]) -> GridResponse<Vec<(f64, f64)>> {
    let parsed = match validate_cell_ids(ids) {
        Ok(parsed) => parsed,
        Err(messages) => return GridResponse::fail(messages),
    };
    GridResponse::ok(
        parsed
            .iter()
            .map(|id| {
                let centroid = cell_id_to_ease(id);
                (centroid.x(), centroid.y())
            })
            .collect(),
    )
}

/// Converts cell ids to their centroids in geographic (lon, lat) coordinates.
pub fn cell_ids_to_geos<S: AsRef<str>>(ids: &[S]) -> GridResponse<Vec<(f64, f64)>> {
    let parsed = match validate_cell_ids(ids) {
        Ok(parsed) => parsed,
        Err(messages) => return GridResponse::fail(messages),
    };
    let plane: Vec<(f64, f64)> = parsed
        .iter()
        .map(|id| {
            let centroid = cell_id_to_ease(id);
            (centroid.x(), centroid.y())
        })
        .collect();

    ease_points_to_geo(&plane)
        .map(|points| points.iter().map(|p| (p.x(), p.y())).collect())
        .into()
}

/// Resolves a plane-CRS polygon (WKT or GeoJSON) to cell ids at `level`.
///
/// `source_epsg` must be the plane CRS; the geographic entry point handles
/// lon/lat polygons.
pub fn ease_polygon_to_grid_ids(
    geometry: &str,
    level: u8,
    source_epsg: u32,
) -> GridResponse<Vec<String>> {
    if source_epsg != EASE_CRS {
        return GridResponse::fail_with(
            GridError::InvalidSourceCrs(format!(
                "expected EPSG:{}, got EPSG:{}",
                EASE_CRS, source_epsg
            ))
            .to_string(),
        );
    }
    let resolve_ids = || -> Result<Vec<String>, GridError> {
        let geometry = parse_polygon(geometry)?;
        let ids = resolve::ease_polygon_to_cell_ids(&geometry, level)?;
        Ok(ids_to_strings(&ids))
    };
    resolve_ids().into()
}

/// Resolves a geographic polygon (WKT or GeoJSON) to cell ids at `level`.
pub fn geo_polygon_to_grid_ids(
    geometry: &str,
    level: u8,
    source_epsg: u32,
) -> GridResponse<Vec<String>> {
    if source_epsg != GEO_CRS {
        return GridResponse::fail_with(
            GridError::InvalidSourceCrs(format!(
                "expected EPSG:{}, got EPSG:{}",
                GEO_CRS, source_epsg
            ))
            .to_string(),
        );
    }
    let resolve_ids = || -> Result<Vec<String>, GridError> {
        let geometry = parse_polygon(geometry)?;
        let ids = resolve::geo_polygon_to_cell_ids(&geometry, level)?;
        Ok(ids_to_strings(&ids))
    };
    resolve_ids().into()
}

/// Truncates each cell id to its ancestor at `level`.
pub fn cells_to_parents<S: AsRef<str>>(ids: &[S], level: u8) -> GridResponse<Vec<String>> {
    let parsed = match validate_cell_ids(ids) {
        Ok(parsed) => parsed,
        Err(messages) => return GridResponse::fail(messages),
    };
    parsed
        .iter()
        .map(|id| hierarchy::parent(id, level).map(|p| p.to_string()))
        .collect::<Result<Vec<String>, GridError>>()
        .into()
}

/// Enumerates each cell id's descendants at `level`, one list per input id.
pub fn cells_to_children<S: AsRef<str>>(ids: &[S], level: u8) -> GridResponse<Vec<Vec<String>>> {
    let parsed = match validate_cell_ids(ids) {
        Ok(parsed) => parsed,
        Err(messages) => return GridResponse::fail(messages),
    };
    parsed
        .iter()
        .map(|id| hierarchy::children(id, level).map(|c| ids_to_strings(&c)))
        .collect::<Result<Vec<Vec<String>>, GridError>>()
        .into()
}

/// Aggregates per-cell values up to `level` with the named reduction method.
pub fn aggregate_cells<S: AsRef<str>>(
    ids: &[S],
    values: &[f64],
    level: u8,
    method: &str,
) -> GridResponse<Aggregated> {
    let method: AggregationMethod = match method.parse() {
        Ok(method) => method,
        Err(e) => return GridResponse::fail_with(e.to_string()),
    };
    let parsed = match validate_cell_ids(ids) {
        Ok(parsed) => parsed,
        Err(messages) => return GridResponse::fail(messages),
    };
    hierarchy::aggregate(&parsed, values, level, method)
        .map(|(cells, reduced)| Aggregated {
            cell_ids: ids_to_strings(&cells),
            values: reduced,
        })
        .into()
}

/// Expands a bounding box outward to cell boundaries at `level`.
pub fn align_bounds_to_grid(
    bounds: (f64, f64, f64, f64),
    source_epsg: u32,
    level: u8,
) -> GridResponse<[f64; 4]> {
    align::align_bounds(bounds, source_epsg, level).into()
}

/// The grid's shared constants as pretty-printed JSON: the level table and
/// both extents. This is the contract downstream tooling reads.
pub fn level_table_json() -> GridResponse<String> {
    let contract = serde_json::json!({
        "levels": level_table(),
        "ease_extent": EASE_EXTENT,
        "geo_extent": GEO_EXTENT,
    });
    serde_json::to_string_pretty(&contract)
        .map_err(|e| GridError::InvalidOperation(e.to_string()))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE_WKT: &str = "POLYGON((-36032.22084 36032.22084, 36032.22084 36032.22084, \
         36032.22084 -36032.22084, -36032.22084 -36032.22084, -36032.22084 36032.22084))";

    #[test]
    fn test_geos_to_cell_ids_origin() {
        let response = geos_to_cell_ids(&[(0.0, 0.0)], 0);
        assert!(response.success, "{:?}", response.errors);
        assert_eq!(response.data.unwrap(), vec!["L0.203482"]);
    }

    #[test]
    fn test_geos_to_cell_ids_invalid_level() {
        let response = geos_to_cell_ids(&[(0.0, 0.0)], 9);
        assert!(!response.success);
        assert!(response.errors[0].contains("level"));
    }

    #[test]
    fn test_geos_to_cell_ids_out_of_range() {
        let response = geos_to_cell_ids(&[(0.0, 0.0), (200.0, 0.0), (0.0, 90.0)], 0);
        assert!(!response.success);
        // one message per offending point
        assert_eq!(response.errors.len(), 2);
    }

    #[test]
    fn test_cell_ids_to_ease_centroid() {
        let response = cell_ids_to_ease(&["L0.202482"]);
        assert!(response.success);
        let data = response.data.unwrap();
        // half a cell east of the central meridian and north of the equator
        assert!((data[0].0 - 18_016.11042).abs() < 1e-3);
        assert!((data[0].1 - 18_016.11042).abs() < 1e-3);
    }

    #[test]
    fn test_cell_ids_to_ease_reports_every_bad_id() {
        let response = cell_ids_to_ease(&["L0.202482", "X0.000000", "L1.202482.71"]);
        assert!(!response.success);
        assert_eq!(response.errors.len(), 2);
    }

    #[test]
    fn test_cell_ids_to_geos_centroid() {
        let response = cell_ids_to_geos(&["L0.203482"]);
        assert!(response.success);
        let (lon, lat) = response.data.unwrap()[0];
        assert!(lon > 0.0 && lon < 1.0);
        assert!(lat < 0.0 && lat > -1.0);
    }

    #[test]
    fn test_ease_polygon_to_grid_ids() {
        let response = ease_polygon_to_grid_ids(SQUARE_WKT, 0, EASE_CRS);
        assert!(response.success, "{:?}", response.errors);
        assert_eq!(
            response.data.unwrap(),
            vec!["L0.202481", "L0.202482", "L0.203481", "L0.203482"]
        );
    }

    #[test]
    fn test_ease_polygon_rejects_wrong_crs() {
        let response = ease_polygon_to_grid_ids(SQUARE_WKT, 0, GEO_CRS);
        assert!(!response.success);
        assert!(response.errors[0].contains("CRS"));
    }

    #[test]
    fn test_geo_polygon_rejects_wrong_crs() {
        let response = geo_polygon_to_grid_ids(SQUARE_WKT, 0, EASE_CRS);
        assert!(!response.success);
        assert!(response.errors[0].contains("CRS"));
    }

    #[test]
    fn test_cells_to_parents() {
        let response = cells_to_parents(&["L2.048218.20.10"], 1);
        assert!(response.success);
        assert_eq!(response.data.unwrap(), vec!["L1.048218.20"]);
    }

    #[test]
    fn test_cells_to_children() {
        let response = cells_to_children(&["L0.202482"], 1);
        assert!(response.success);
        let lists = response.data.unwrap();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].len(), 16);
        assert_eq!(lists[0][0], "L1.202482.00");
        assert_eq!(lists[0][15], "L1.202482.33");
    }

    #[test]
    fn test_aggregate_cells_mean() {
        let response = aggregate_cells(
            &["L1.202482.00", "L1.202482.01", "L1.202483.00"],
            &[1.0, 3.0, 10.0],
            0,
            "mean",
        );
        assert!(response.success);
        let aggregated = response.data.unwrap();
        assert_eq!(aggregated.cell_ids, vec!["L0.202482", "L0.202483"]);
        assert_eq!(aggregated.values, vec![2.0, 10.0]);
    }

    #[test]
    fn test_aggregate_cells_unknown_method() {
        let response = aggregate_cells(&["L1.202482.00"], &[1.0], 0, "p95");
        assert!(!response.success);
        assert!(response.errors[0].contains("p95"));
    }

    #[test]
    fn test_align_bounds_to_grid() {
        let response = align_bounds_to_grid((-50_000.0, -50_000.0, 50_000.0, 50_000.0), EASE_CRS, 0);
        assert!(response.success);
        let aligned = response.data.unwrap();
        assert!(aligned[0] < -50_000.0 && aligned[2] > 50_000.0);
    }

    #[test]
    fn test_level_table_json() {
        let response = level_table_json();
        assert!(response.success);
        let json = response.data.unwrap();
        assert!(json.contains("refine_ratio"));
        assert!(json.contains("36032.22084058376"));

        // the contract parses back with all seven levels and both extents
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["levels"].as_array().unwrap().len(), 7);
        assert_eq!(value["ease_extent"]["max_y"], 7_314_540.830638504);
        assert_eq!(value["geo_extent"]["max_x"], 180.0);
    }
}
