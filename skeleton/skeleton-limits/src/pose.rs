//! Pose sequences.
//!
//! A pose sequence is a `T × 46` matrix of Euler-angle joint parameters in
//! radians. Row `t` is frame `t`; column `qid` is one pose parameter.

use nalgebra::{DMatrix, RowDVector};

use crate::error::{LimitError, LimitResult};

/// Number of scalar parameters in one skeleton pose.
pub const POSE_DIM: usize = 46;

/// An ordered sequence of skeleton poses.
///
/// Frame order is preserved by every evaluator: output index `t` always
/// refers to input frame `t`.
///
/// # Example
///
/// ```
/// use skeleton_limits::{PoseSequence, POSE_DIM};
///
/// let mut frame = [0.0; POSE_DIM];
/// frame[6] = 1.2; // knee_angle_r
/// let poses = PoseSequence::from_frames(&[frame, [0.0; POSE_DIM]]);
///
/// assert_eq!(poses.frame_count(), 2);
/// assert_eq!(poses.angle(0, 6), Some(1.2));
/// assert_eq!(poses.angle(2, 6), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PoseSequence {
    angles: DMatrix<f64>,
}

impl PoseSequence {
    /// Create a sequence of `frames` all-zero poses.
    #[must_use]
    pub fn zeros(frames: usize) -> Self {
        Self {
            angles: DMatrix::zeros(frames, POSE_DIM),
        }
    }

    /// Create a sequence from fixed-size frames.
    #[must_use]
    pub fn from_frames(frames: &[[f64; POSE_DIM]]) -> Self {
        Self {
            angles: DMatrix::from_fn(frames.len(), POSE_DIM, |t, qid| frames[t][qid]),
        }
    }

    /// Create a sequence from variable-length rows.
    ///
    /// # Errors
    ///
    /// Returns [`LimitError::ShapeMismatch`] if any row does not hold exactly
    /// [`POSE_DIM`] values.
    pub fn from_rows(rows: &[Vec<f64>]) -> LimitResult<Self> {
        if let Some(bad) = rows.iter().find(|row| row.len() != POSE_DIM) {
            return Err(LimitError::shape_mismatch(POSE_DIM, bad.len()));
        }
        Ok(Self {
            angles: DMatrix::from_fn(rows.len(), POSE_DIM, |t, qid| rows[t][qid]),
        })
    }

    /// Wrap an existing `T × 46` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`LimitError::ShapeMismatch`] if the matrix does not have
    /// [`POSE_DIM`] columns.
    pub fn from_matrix(angles: DMatrix<f64>) -> LimitResult<Self> {
        if angles.ncols() != POSE_DIM {
            return Err(LimitError::shape_mismatch(POSE_DIM, angles.ncols()));
        }
        Ok(Self { angles })
    }

    /// Number of frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.angles.nrows()
    }

    /// Check if the sequence holds no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.angles.nrows() == 0
    }

    /// Raw angle of parameter `qid` in frame `frame`.
    #[must_use]
    pub fn angle(&self, frame: usize, qid: usize) -> Option<f64> {
        self.angles.get((frame, qid)).copied()
    }

    /// Copy of one frame's pose vector.
    #[must_use]
    pub fn frame(&self, frame: usize) -> Option<RowDVector<f64>> {
        (frame < self.frame_count()).then(|| self.angles.row(frame).into_owned())
    }

    /// The underlying `T × 46` matrix.
    #[must_use]
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.angles
    }
}
