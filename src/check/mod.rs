use crate::core::constants::{GEO_EXTENT, MAX_LEVEL};
use crate::index::cell_id::CellId;

/// True iff `level` names one of the seven grid levels.
pub fn check_level(level: u8) -> bool {
    level <= MAX_LEVEL
}

/// True iff the (lon, lat) pair lies inside the geographic extent,
/// bounds inclusive.
pub fn check_coord_range(lon: f64, lat: f64) -> bool {
    lon >= GEO_EXTENT.min_x
        && lon <= GEO_EXTENT.max_x
        && lat >= GEO_EXTENT.min_y
        && lat <= GEO_EXTENT.max_y
}

/// True iff every (lon, lat) pair is in range. Every element is checked.
pub fn check_coords_range(coords: &[(f64, f64)]) -> bool {
    let valid: Vec<bool> = coords
        .iter()
        .map(|&(lon, lat)| check_coord_range(lon, lat))
        .collect();
    valid.iter().all(|&v| v)
}

/// True iff the string is a structurally valid cell id with in-range indices.
pub fn check_cell_id(id: &str) -> bool {
    id.parse::<CellId>().is_ok()
}

/// Validates every (lon, lat) pair, reporting one message per failing
/// element. All elements are checked so callers can see which failed.
pub fn validate_coords(coords: &[(f64, f64)]) -> Result<(), Vec<String>> {
    let errors: Vec<String> = coords
        .iter()
        .enumerate()
        .filter(|&(_, &(lon, lat))| !check_coord_range(lon, lat))
        .map(|(i, &(lon, lat))| {
            format!(
                "coordinate {} ({}, {}) outside lon range [{}, {}], lat range [{}, {}]",
                i, lon, lat, GEO_EXTENT.min_x, GEO_EXTENT.max_x, GEO_EXTENT.min_y, GEO_EXTENT.max_y
            )
        })
        .collect();

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Parses and validates every cell id string, reporting one message per
/// failing element. All elements are checked; the batch fails as a whole.
pub fn validate_cell_ids<S: AsRef<str>>(ids: &[S]) -> Result<Vec<CellId>, Vec<String>> {
    let mut parsed = Vec::with_capacity(ids.len());
    let mut errors = Vec::new();

    for (i, id) in ids.iter().enumerate() {
        match id.as_ref().parse::<CellId>() {
            Ok(cell) => parsed.push(cell),
            Err(e) => errors.push(format!("cell id {}: {}", i, e)),
        }
    }

    if errors.is_empty() { Ok(parsed) } else { Err(errors) }
}
