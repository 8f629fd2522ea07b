//! Batched violation evaluation over joint groups.

use nalgebra::DMatrix;
use rayon::prelude::*;
use tracing::debug;

use crate::error::LimitResult;
use crate::limits::LimitTable;
use crate::params::{JointGroup, JointGroups, tolerance_radians};
use crate::pose::PoseSequence;
use crate::result::GroupViolations;

/// Compute per-group violation magnitudes for a pose sequence.
///
/// For every group and every qid in it, the qid's column of raw angles is
/// normalized and compared against its bounds widened by `tolerance_deg` on
/// both sides. Each group yields a `T × G` matrix of non-negative magnitudes
/// in radians; 0 means the angle lies within `[lower - tol, upper + tol]`.
///
/// Groups are evaluated in parallel and returned in selection order.
///
/// # Errors
///
/// Returns [`LimitError::UndefinedLimit`](crate::LimitError::UndefinedLimit)
/// if a group names an unconstrained qid, or
/// [`LimitError::InvalidTolerance`](crate::LimitError::InvalidTolerance) for a
/// negative or non-finite tolerance.
///
/// # Example
///
/// ```
/// use skeleton_limits::{JointGroups, LimitTable, PoseSequence, eval_rot_delta};
///
/// let mut poses = PoseSequence::zeros(2).as_matrix().clone();
/// poses[(1, 6)] = 2.8; // right knee past 3π/4
/// let poses = PoseSequence::from_matrix(poses).unwrap();
///
/// let table = LimitTable::standard().unwrap();
/// let groups = JointGroups::new().with_group("r_knee", [6]);
/// let result = eval_rot_delta(&poses, table, &groups, 0.0).unwrap();
///
/// assert_eq!(result[0].magnitude(0, 0), Some(0.0));
/// assert!((result[0].magnitude(1, 0).unwrap() - 0.4438).abs() < 1e-4);
/// ```
pub fn eval_rot_delta(
    poses: &PoseSequence,
    table: &LimitTable,
    groups: &JointGroups,
    tolerance_deg: f64,
) -> LimitResult<Vec<GroupViolations>> {
    let tolerance = tolerance_radians(tolerance_deg)?;

    debug!(
        frames = poses.frame_count(),
        groups = groups.len(),
        tolerance_deg,
        "Evaluating joint group violations"
    );

    groups
        .as_slice()
        .par_iter()
        .map(|group| evaluate_group(poses, table, group, tolerance))
        .collect()
}

fn evaluate_group(
    poses: &PoseSequence,
    table: &LimitTable,
    group: &JointGroup,
    tolerance: f64,
) -> LimitResult<GroupViolations> {
    let angles = poses.as_matrix();
    let mut magnitudes = DMatrix::zeros(poses.frame_count(), group.qids.len());

    for (column, &qid) in group.qids.iter().enumerate() {
        let bounds = table.bounds_for(qid)?;
        let violation = angles
            .column(qid)
            .map(|angle| bounds.violation(angle, tolerance));
        magnitudes.set_column(column, &violation);
    }

    Ok(GroupViolations {
        name: group.name.clone(),
        qids: group.qids.clone(),
        magnitudes,
    })
}
