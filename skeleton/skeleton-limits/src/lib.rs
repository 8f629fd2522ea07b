//! Joint-limit violation evaluation for articulated skeleton motion.
//!
//! This crate checks whether a sequence of skeleton poses (46 Euler-angle
//! joint parameters per frame) stays within anatomically plausible ranges,
//! and measures how far out of range each frame is.
//!
//! # Components
//!
//! - [`SkeletonDefinition`] - Parameter names and their fixed indices (qids)
//! - [`LimitTable`] - `[lower, upper]` bounds for the constrained parameters
//! - [`normalize_angle`] - Wraps raw angles into `(-π, π]`
//! - [`eval_rot_delta`] - Batched `T × G` violation matrices per joint group
//! - [`analyze_motion_sequence`] - Per-frame, per-parameter diagnostics
//! - [`load_poses`] - Reads a pose sequence from a motion file
//!
//! # Algorithm
//!
//! Each angle is normalized, then compared with its bounds widened by a
//! tolerance on both sides. The violation magnitude is the distance to the
//! nearer widened bound when outside the range, and 0 inside it. A tolerance
//! of 0 gives strict ground-truth checking; a few degrees absorbs estimation
//! noise.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Offline motion capture cleanup
//! - Training-data filtering
//!
//! # Example
//!
//! ```
//! use skeleton_limits::{
//!     LimitTable, PoseSequence, SkeletonDefinition, analyze_motion_sequence,
//! };
//!
//! let skeleton = SkeletonDefinition::standard();
//! let table = LimitTable::standard().unwrap();
//!
//! let mut angles = PoseSequence::zeros(3).as_matrix().clone();
//! angles[(1, 6)] = 2.8; // right knee hyperflexed in frame 1
//! let poses = PoseSequence::from_matrix(angles).unwrap();
//!
//! let analysis = analyze_motion_sequence(&poses, table, &skeleton).unwrap();
//! for (frame, names) in analysis.frames_with_violations() {
//!     println!("Frame {frame}: {names:?}");
//! }
//! assert!(analysis.detailed[1].get("knee_angle_r").unwrap().is_violated);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod analysis;
mod angle;
mod definition;
mod error;
mod evaluate;
mod io;
mod limits;
mod params;
mod pose;
mod result;

pub use analysis::{analyze_motion_sequence, analyze_motion_sequence_with};
pub use angle::{bound_excess, normalize_angle};
pub use definition::{POSE_PARAM_NAMES, STANDARD_LIMITS, SkeletonDefinition};
pub use error::{LimitError, LimitResult, LoadError, LoadResult};
pub use evaluate::eval_rot_delta;
pub use io::{POSES_KEY, load_poses, parse_poses};
pub use limits::{Bounds, LimitEntry, LimitTable};
pub use params::{EvalParams, JointGroup, JointGroups};
pub use pose::{POSE_DIM, PoseSequence};
pub use result::{
    DetailedViolation, FrameViolations, GroupViolations, MotionAnalysis, ParameterViolation,
    WorstViolation,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        Bounds, EvalParams, JointGroups, LimitError, LimitTable, LoadError, MotionAnalysis,
        PoseSequence, SkeletonDefinition, analyze_motion_sequence, analyze_motion_sequence_with,
        eval_rot_delta, load_poses, normalize_angle,
    };
}
