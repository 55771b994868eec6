/// Error type for ease-dggs-rs operations.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The grid level is outside the valid range (0-6).
    InvalidLevel(u8),
    /// A geographic coordinate falls outside the grid's extent.
    InvalidCoordinateRange(String),
    /// A cell id string does not match the `L{level}.{RRRCCC}{.RC}*` format.
    InvalidCellIdFormat(String),
    /// A cell id parses but carries an out-of-range row/column index.
    InvalidCellIdIndexRange(String),
    /// The geometry is not a Polygon or MultiPolygon.
    InvalidGeometryType(String),
    /// The supplied source CRS does not match the expected one.
    InvalidSourceCrs(String),
    /// The operation is not defined for the given inputs (e.g. parent of a level-0 cell).
    InvalidOperation(String),
    /// A value has the wrong kind for the operation (e.g. non-finite aggregation input).
    TypeMismatch(String),
    /// The aggregation method name is not recognised.
    UnsupportedAggregationMethod(String),
    /// Coordinate reprojection failed.
    ProjectionError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::InvalidLevel(l) => write!(f, "Invalid grid level: {}", l),
            GridError::InvalidCoordinateRange(msg) => {
                write!(f, "Coordinate out of range: {}", msg)
            }
            GridError::InvalidCellIdFormat(msg) => write!(f, "Invalid cell id format: {}", msg),
            GridError::InvalidCellIdIndexRange(msg) => {
                write!(f, "Cell id index out of range: {}", msg)
            }
            GridError::InvalidGeometryType(msg) => write!(f, "Invalid geometry type: {}", msg),
            GridError::InvalidSourceCrs(msg) => write!(f, "Invalid source CRS: {}", msg),
            GridError::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
            GridError::TypeMismatch(msg) => write!(f, "Type mismatch: {}", msg),
            GridError::UnsupportedAggregationMethod(m) => {
                write!(f, "Unsupported aggregation method: {}", m)
            }
            GridError::ProjectionError(msg) => write!(f, "Projection error: {}", msg),
            GridError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            GridError::InvalidLevel(9).to_string(),
            "Invalid grid level: 9"
        );
        assert_eq!(
            GridError::UnsupportedAggregationMethod("p95".into()).to_string(),
            "Unsupported aggregation method: p95"
        );
    }
}
