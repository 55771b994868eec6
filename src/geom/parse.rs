use crate::error::GridError;
use geo_types::Geometry;
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

use super::geometry_type_name;

/// Parses polygon text, auto-detecting WKT or GeoJSON by a leading `{`.
///
/// Only `Polygon` and `MultiPolygon` come back; every other geometry type
/// is rejected here so the resolver never sees one.
pub fn parse_polygon(s: &str) -> Result<Geometry<f64>, GridError> {
    let trimmed = s.trim();
    let geometry = if trimmed.starts_with('{') {
        from_geojson(trimmed)?
    } else {
        from_wkt(trimmed)?
    };

    match geometry {
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Ok(geometry),
        other => Err(GridError::InvalidGeometryType(format!(
            "expected Polygon or MultiPolygon text, got {}",
            geometry_type_name(&other)
        ))),
    }
}

fn parse_err(e: impl ToString) -> GridError {
    GridError::GeometryParseError(e.to_string())
}

fn from_geojson(s: &str) -> Result<Geometry<f64>, GridError> {
    let geojson: GeoJson = s.parse().map_err(|e: geojson::Error| parse_err(e))?;

    let geometry = match geojson {
        GeoJson::Geometry(geometry) => geometry,
        GeoJson::Feature(feature) => feature
            .geometry
            .ok_or_else(|| parse_err("Feature has no geometry"))?,
        GeoJson::FeatureCollection(_) => {
            return Err(parse_err(
                "FeatureCollection not supported, use individual geometries",
            ));
        }
    };
    Geometry::try_from(geometry).map_err(parse_err)
}

fn from_wkt(s: &str) -> Result<Geometry<f64>, GridError> {
    let wkt: Wkt<f64> = Wkt::from_str(s).map_err(parse_err)?;
    wkt.try_into()
        .map_err(|_| parse_err("Failed to convert WKT to geometry"))
}
