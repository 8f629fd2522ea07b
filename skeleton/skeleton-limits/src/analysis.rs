//! Per-frame joint limit analysis.
//!
//! Produces the batched group matrices together with a diagnostic for every
//! constrained parameter in every frame. The per-frame diagnostics use the
//! same bound comparison as [`eval_rot_delta`], so at equal tolerance the two
//! agree exactly for every (frame, qid) pair.

use rayon::prelude::*;
use tracing::info;

use crate::angle::normalize_angle;
use crate::definition::SkeletonDefinition;
use crate::error::{LimitError, LimitResult};
use crate::evaluate::eval_rot_delta;
use crate::limits::{Bounds, LimitTable};
use crate::params::EvalParams;
use crate::pose::{POSE_DIM, PoseSequence};
use crate::result::{DetailedViolation, FrameViolations, MotionAnalysis, ParameterViolation};

impl DetailedViolation {
    /// Evaluate one raw angle against its bounds.
    #[must_use]
    pub fn evaluate(angle: f64, bounds: Bounds, tolerance_rad: f64) -> Self {
        let angle = normalize_angle(angle);
        let violation = bounds.excess(angle, tolerance_rad);
        Self {
            angle,
            bounds,
            violation,
            is_violated: violation > 0.0,
        }
    }
}

/// Analyze a motion sequence with strict (zero-tolerance) bounds.
///
/// Group results use [`JointGroups::standard`](crate::JointGroups::standard).
///
/// # Errors
///
/// See [`analyze_motion_sequence_with`].
///
/// # Example
///
/// ```
/// use skeleton_limits::{LimitTable, PoseSequence, SkeletonDefinition, analyze_motion_sequence};
///
/// let poses = PoseSequence::zeros(2);
/// let table = LimitTable::standard().unwrap();
/// let analysis = analyze_motion_sequence(&poses, table, &SkeletonDefinition::standard()).unwrap();
///
/// // A zero pose only violates the two scapula elevation ranges.
/// assert_eq!(analysis.detailed[0].violated_names(), ["scapula_elevation_r", "scapula_elevation_l"]);
/// assert_eq!(analysis.total_violations(), 4);
/// ```
pub fn analyze_motion_sequence(
    poses: &PoseSequence,
    table: &LimitTable,
    skeleton: &SkeletonDefinition,
) -> LimitResult<MotionAnalysis> {
    analyze_motion_sequence_with(poses, table, skeleton, &EvalParams::strict())
}

/// Analyze a motion sequence with explicit tolerance and group selection.
///
/// Frame `t` of the input is always `detailed[t]` of the output. Frames are
/// processed in parallel.
///
/// # Errors
///
/// Returns [`LimitError::ShapeMismatch`] if the skeleton does not describe a
/// 46-parameter pose, [`LimitError::InvalidTolerance`] for a negative or
/// non-finite tolerance, or [`LimitError::UndefinedLimit`] if a selected group
/// names an unconstrained qid.
pub fn analyze_motion_sequence_with(
    poses: &PoseSequence,
    table: &LimitTable,
    skeleton: &SkeletonDefinition,
    params: &EvalParams,
) -> LimitResult<MotionAnalysis> {
    if skeleton.param_count() != POSE_DIM {
        return Err(LimitError::shape_mismatch(POSE_DIM, skeleton.param_count()));
    }
    let tolerance = params.tolerance_rad()?;

    info!(
        frames = poses.frame_count(),
        limited = table.len(),
        tolerance_deg = params.tolerance_deg,
        "Analyzing motion sequence"
    );

    let violations = eval_rot_delta(poses, table, &params.groups, params.tolerance_deg)?;

    let constrained: Vec<(usize, &str, Bounds)> = skeleton
        .names()
        .iter()
        .enumerate()
        .filter_map(|(qid, name)| table.get(qid).map(|bounds| (qid, name.as_str(), bounds)))
        .collect();

    let angles = poses.as_matrix();
    let detailed: Vec<FrameViolations> = (0..poses.frame_count())
        .into_par_iter()
        .map(|frame| FrameViolations {
            frame,
            parameters: constrained
                .iter()
                .map(|&(qid, name, bounds)| ParameterViolation {
                    qid,
                    name: name.to_string(),
                    detail: DetailedViolation::evaluate(angles[(frame, qid)], bounds, tolerance),
                })
                .collect(),
        })
        .collect();

    let analysis = MotionAnalysis {
        tolerance_deg: params.tolerance_deg,
        violations,
        detailed,
    };

    info!(
        total_violations = analysis.total_violations(),
        "Motion sequence analysis complete"
    );

    Ok(analysis)
}
