use crate::core::constants::{LEVEL_SPECS, MAX_LEVEL};
use crate::error::GridError;
use std::fmt;
use std::str::FromStr;

/// A parsed grid cell identifier.
///
/// The canonical text form is `L{level}.{RRRCCC}{.RC}*`: a level token, a
/// six-digit level-0 row/column token, and one two-digit token per finer
/// level. Parsing happens exactly once, here; all internal logic operates on
/// the structured value and the string form is produced only by `Display`.
///
/// # Example
///
/// ```
/// use ease_dggs_rs::CellId;
///
/// let id: CellId = "L2.048218.20.10".parse().unwrap();
/// assert_eq!(id.level(), 2);
/// assert_eq!(id.to_string(), "L2.048218.20.10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellId {
    level: u8,
    row0: u32,
    col0: u32,
    /// One `(row, col)` digit pair per level past 0; length equals `level`.
    path: Vec<(u8, u8)>,
}

impl CellId {
    pub(crate) fn new_unchecked(level: u8, row0: u32, col0: u32, path: Vec<(u8, u8)>) -> Self {
        debug_assert_eq!(path.len(), level as usize);
        Self {
            level,
            row0,
            col0,
            path,
        }
    }

    /// The cell's level, 0 (coarsest) to 6 (finest).
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Level-0 row index.
    pub fn row0(&self) -> u32 {
        self.row0
    }

    /// Level-0 column index.
    pub fn col0(&self) -> u32 {
        self.col0
    }

    /// Digit pairs for levels 1..=level.
    pub fn path(&self) -> &[(u8, u8)] {
        &self.path
    }

    /// Row digits from level 0 down to this cell's level.
    pub fn row_digits(&self) -> Vec<u32> {
        let mut digits = Vec::with_capacity(self.level as usize + 1);
        digits.push(self.row0);
        digits.extend(self.path.iter().map(|&(r, _)| r as u32));
        digits
    }

    /// Column digits from level 0 down to this cell's level.
    pub fn col_digits(&self) -> Vec<u32> {
        let mut digits = Vec::with_capacity(self.level as usize + 1);
        digits.push(self.col0);
        digits.extend(self.path.iter().map(|&(_, c)| c as u32));
        digits
    }

    /// The ancestor of this cell at a coarser `target_level`.
    ///
    /// Truncates the digit path and rewrites the level. Not defined for a
    /// level-0 cell, nor for `target_level >= self.level()`.
    pub fn truncated(&self, target_level: u8) -> Result<CellId, GridError> {
        if self.level == 0 {
            return Err(GridError::InvalidOperation(format!(
                "cell id '{}' is already level 0 and has no parent",
                self
            )));
        }
        if target_level >= self.level {
            return Err(GridError::InvalidOperation(format!(
                "target level {} is not coarser than cell level {}",
                target_level, self.level
            )));
        }
        Ok(CellId::new_unchecked(
            target_level,
            self.row0,
            self.col0,
            self.path[..target_level as usize].to_vec(),
        ))
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}.{:03}{:03}", self.level, self.row0, self.col0)?;
        for &(r, c) in &self.path {
            write!(f, ".{}{}", r, c)?;
        }
        Ok(())
    }
}

fn format_err(id: &str, detail: &str) -> GridError {
    GridError::InvalidCellIdFormat(format!("'{}': {}", id, detail))
}

fn index_err(id: &str, detail: &str) -> GridError {
    GridError::InvalidCellIdIndexRange(format!("'{}': {}", id, detail))
}

impl FromStr for CellId {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split('.').collect();

        // Exactly 'L' plus one digit; integer parsing would let '+6' or '06'
        // through and break Display round-tripping.
        let level_token = tokens[0].as_bytes();
        if level_token.len() != 2
            || level_token[0] != b'L'
            || !level_token[1].is_ascii_digit()
        {
            return Err(format_err(s, "cell ids must start with 'L' plus one digit"));
        }
        let level = level_token[1] - b'0';
        if level > MAX_LEVEL {
            return Err(format_err(s, "level must be between 0 and 6"));
        }

        // Level 0 uses 2 tokens, each deeper level adds one more.
        if tokens.len() != level as usize + 2 {
            return Err(format_err(
                s,
                &format!(
                    "level {} ids have {} tokens, found {}",
                    level,
                    level as usize + 2,
                    tokens.len()
                ),
            ));
        }

        let l0 = tokens[1];
        if l0.len() != 6 || !l0.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format_err(s, "level-0 token must be exactly six digits"));
        }
        let row0: u32 = l0[..3].parse().map_err(|_| format_err(s, "bad row index"))?;
        let col0: u32 = l0[3..].parse().map_err(|_| format_err(s, "bad col index"))?;

        let row_max = LEVEL_SPECS[0].n_row as u32 - 1;
        let col_max = LEVEL_SPECS[0].n_col as u32 - 1;
        if row0 > row_max || col0 > col_max {
            return Err(index_err(
                s,
                &format!(
                    "level-0 row must be <= {} and col <= {}",
                    row_max, col_max
                ),
            ));
        }

        let mut path = Vec::with_capacity(level as usize);
        for (i, token) in tokens[2..].iter().enumerate() {
            if token.len() != 2 || !token.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format_err(
                    s,
                    &format!("token {} must be exactly two digits", i + 2),
                ));
            }
            let bytes = token.as_bytes();
            let r = bytes[0] - b'0';
            let c = bytes[1] - b'0';
            // Digits at level i+1 index the subdivision of the level-i cell.
            let ratio = LEVEL_SPECS[i].refine_ratio as u8;
            if r >= ratio || c >= ratio {
                return Err(index_err(
                    s,
                    &format!("level-{} digits must be < {}", i + 1, ratio),
                ));
            }
            path.push((r, c));
        }

        Ok(CellId {
            level,
            row0,
            col0,
            path,
        })
    }
}
