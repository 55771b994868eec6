//! Parent/child navigation and cross-level aggregation of cell values.

use crate::check::check_level;
use crate::core::constants::LEVEL_SPECS;
use crate::error::GridError;
use crate::index::cell_id::CellId;
use std::collections::HashMap;
use std::str::FromStr;

/// The ancestor of `id` at the coarser `target_level`.
///
/// Fails with `InvalidOperation` if `id` is already level 0 or
/// `target_level` is not coarser than `id`'s level.
pub fn parent(id: &CellId, target_level: u8) -> Result<CellId, GridError> {
    id.truncated(target_level)
}

/// All descendants of `id` at the finer `target_level`.
///
/// Enumerates every digit pair at each intervening level (row-major within a
/// level) and takes the Cartesian product across levels, later levels varying
/// fastest. The count is the product of `refine_ratio(l)^2` over the added
/// levels.
pub fn children(id: &CellId, target_level: u8) -> Result<Vec<CellId>, GridError> {
    if !check_level(target_level) {
        return Err(GridError::InvalidLevel(target_level));
    }
    if target_level <= id.level() {
        return Err(GridError::InvalidOperation(format!(
            "target level {} is not finer than cell level {}",
            target_level,
            id.level()
        )));
    }

    // Digit pairs at level lv are bounded by the refine ratio of lv - 1.
    let mut combos: Vec<Vec<(u8, u8)>> = vec![Vec::new()];
    for lv in (id.level() + 1)..=target_level {
        let ratio = LEVEL_SPECS[lv as usize - 1].refine_ratio as u8;
        let mut next = Vec::with_capacity(combos.len() * (ratio as usize).pow(2));
        for prefix in &combos {
            for r in 0..ratio {
                for c in 0..ratio {
                    let mut extended = prefix.clone();
                    extended.push((r, c));
                    next.push(extended);
                }
            }
        }
        combos = next;
    }

    Ok(combos
        .into_iter()
        .map(|suffix| {
            let mut path = id.path().to_vec();
            path.extend(suffix);
            CellId::new_unchecked(target_level, id.row0(), id.col0(), path)
        })
        .collect())
}

/// Reduction applied to each group of values during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationMethod {
    Count,
    First,
    Last,
    Mean,
    Median,
    Min,
    Max,
    Std,
    Sum,
    Var,
    Prod,
    Mode,
}

impl FromStr for AggregationMethod {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "count" => Ok(Self::Count),
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            "mean" => Ok(Self::Mean),
            "median" => Ok(Self::Median),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "std" => Ok(Self::Std),
            "sum" => Ok(Self::Sum),
            "var" => Ok(Self::Var),
            "prod" => Ok(Self::Prod),
            "mode" => Ok(Self::Mode),
            other => Err(GridError::UnsupportedAggregationMethod(other.to_string())),
        }
    }
}

fn reduce(values: &[f64], method: AggregationMethod) -> f64 {
    let n = values.len() as f64;
    match method {
        AggregationMethod::Count => n,
        AggregationMethod::First => values[0],
        AggregationMethod::Last => values[values.len() - 1],
        AggregationMethod::Sum => values.iter().sum(),
        AggregationMethod::Mean => values.iter().sum::<f64>() / n,
        AggregationMethod::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        AggregationMethod::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        AggregationMethod::Prod => values.iter().product(),
        AggregationMethod::Median => {
            let mut sorted = values.to_vec();
            sorted.sort_by(|a, b| a.total_cmp(b));
            let mid = sorted.len() / 2;
            if sorted.len() % 2 == 0 {
                (sorted[mid - 1] + sorted[mid]) / 2.0
            } else {
                sorted[mid]
            }
        }
        AggregationMethod::Var | AggregationMethod::Std => {
            // Sample statistics (ddof = 1); a singleton group has no spread.
            if values.len() < 2 {
                return f64::NAN;
            }
            let mean = values.iter().sum::<f64>() / n;
            let var =
                values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1.0);
            if method == AggregationMethod::Var {
                var
            } else {
                var.sqrt()
            }
        }
        AggregationMethod::Mode => {
            // Ties resolve to the first modal value in input order.
            let mut counts: Vec<(f64, usize)> = Vec::new();
            for &v in values {
                match counts.iter_mut().find(|(seen, _)| seen.to_bits() == v.to_bits()) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((v, 1)),
                }
            }
            let mut best = (f64::NAN, 0usize);
            for &(v, count) in &counts {
                if count > best.1 {
                    best = (v, count);
                }
            }
            best.0
        }
    }
}

/// Aggregates per-cell values up to a coarser level.
///
/// Each id's ancestor at `target_level` is derived, values are grouped by
/// ancestor in first-encounter order, and each group is reduced with
/// `method`. Returns the parent ids and their reduced values, 1:1.
pub fn aggregate(
    ids: &[CellId],
    values: &[f64],
    target_level: u8,
    method: AggregationMethod,
) -> Result<(Vec<CellId>, Vec<f64>), GridError> {
    if !check_level(target_level) {
        return Err(GridError::InvalidLevel(target_level));
    }
    if ids.len() != values.len() {
        return Err(GridError::InvalidOperation(format!(
            "{} cell ids but {} values",
            ids.len(),
            values.len()
        )));
    }
    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        return Err(GridError::TypeMismatch(format!(
            "value {} is not a finite number",
            pos
        )));
    }

    let mut group_index: HashMap<CellId, usize> = HashMap::new();
    let mut groups: Vec<(CellId, Vec<f64>)> = Vec::new();

    for (id, &value) in ids.iter().zip(values) {
        let ancestor = parent(id, target_level)?;
        match group_index.get(&ancestor) {
            Some(&i) => groups[i].1.push(value),
            None => {
                group_index.insert(ancestor.clone(), groups.len());
                groups.push((ancestor, vec![value]));
            }
        }
    }

    let mut out_ids = Vec::with_capacity(groups.len());
    let mut out_values = Vec::with_capacity(groups.len());
    for (id, group) in groups {
        out_values.push(reduce(&group, method));
        out_ids.push(id);
    }
    Ok((out_ids, out_values))
}
