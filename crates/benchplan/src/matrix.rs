//! Flag matrix expansion.

use benchplan_config::{FlagMatrixDef, Flags};
use tracing::debug;

use crate::filter::{FilterEvaluationError, FlagFilter};

/// Expands `matrix` over `base`, one flag assignment per kept combination.
///
/// Combinations are enumerated in cartesian-product order with the first
/// axis varying slowest. Axis values are written over a copy of `base`; on a
/// key collision the later axis wins. A matrix with no axes yields `base`
/// alone. When `filter` is given, only assignments it accepts are returned.
///
/// # Example
///
/// ```
/// use benchplan::{expand_matrix, FlagFilter};
/// use benchplan_config::{FlagMatrixDef, Flags};
///
/// let matrix = FlagMatrixDef::new()
///     .with_axis("num_vms", [1, 2])
///     .with_axis("disk", ["ssd", "hdd"]);
/// let filter = FlagFilter::parse("num_vms > 1").unwrap();
///
/// let all = expand_matrix(&Flags::new(), &matrix, None).unwrap();
/// assert_eq!(all.len(), 4);
///
/// let kept = expand_matrix(&Flags::new(), &matrix, Some(&filter)).unwrap();
/// assert_eq!(kept.len(), 2);
/// ```
pub fn expand_matrix(
    base: &Flags,
    matrix: &FlagMatrixDef,
    filter: Option<&FlagFilter>,
) -> Result<Vec<Flags>, FilterEvaluationError> {
    let axes = matrix.axes();
    if axes.iter().any(|axis| axis.values.is_empty()) {
        return Ok(Vec::new());
    }

    let mut combinations = Vec::new();
    let mut indices = vec![0usize; axes.len()];

    loop {
        let mut flags = base.clone();
        for (axis, &index) in axes.iter().zip(&indices) {
            flags.insert(axis.flag.clone(), axis.values[index].clone());
        }

        let keep = match filter {
            Some(filter) => filter.matches(&flags)?,
            None => true,
        };
        debug!(?indices, keep, "Flag matrix combination");
        if keep {
            combinations.push(flags);
        }

        // Odometer step, last axis fastest.
        let mut axis = axes.len();
        loop {
            if axis == 0 {
                return Ok(combinations);
            }
            axis -= 1;
            indices[axis] += 1;
            if indices[axis] < axes[axis].values.len() {
                break;
            }
            indices[axis] = 0;
        }
    }
}
