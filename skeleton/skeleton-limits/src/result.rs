//! Result types for violation evaluation.

use nalgebra::DMatrix;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::limits::Bounds;

/// Violation magnitudes for one joint group.
///
/// `magnitudes[(t, i)]` is the violation of `qids[i]` in frame `t`, in radians.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupViolations {
    /// Group name.
    pub name: String,
    /// Parameter indices, one per column.
    pub qids: Vec<usize>,
    /// `T × G` non-negative magnitudes.
    pub magnitudes: DMatrix<f64>,
}

impl GroupViolations {
    /// Number of frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.magnitudes.nrows()
    }

    /// Magnitude for frame `frame` and the group's `column`-th parameter.
    #[must_use]
    pub fn magnitude(&self, frame: usize, column: usize) -> Option<f64> {
        self.magnitudes.get((frame, column)).copied()
    }

    /// Largest magnitude in the group, 0 if empty.
    #[must_use]
    pub fn max_magnitude(&self) -> f64 {
        self.magnitudes.iter().copied().fold(0.0, f64::max)
    }

    /// Frames where any parameter of the group is violated.
    #[must_use]
    pub fn violated_frames(&self) -> Vec<usize> {
        self.magnitudes
            .row_iter()
            .enumerate()
            .filter(|(_, row)| row.iter().any(|&m| m > 0.0))
            .map(|(t, _)| t)
            .collect()
    }
}

/// Per-frame diagnostic for one constrained parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetailedViolation {
    /// Normalized angle in `(-π, π]`.
    pub angle: f64,
    /// Configured bounds (without tolerance).
    pub bounds: Bounds,
    /// Violation magnitude in radians.
    pub violation: f64,
    /// Whether `violation > 0`.
    pub is_violated: bool,
}

/// A [`DetailedViolation`] tagged with its parameter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParameterViolation {
    /// Parameter index.
    pub qid: usize,
    /// Parameter name.
    pub name: String,
    /// The diagnostic.
    pub detail: DetailedViolation,
}

/// Diagnostics for every constrained parameter in one frame, in qid order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameViolations {
    /// Frame index in the input sequence.
    pub frame: usize,
    /// One entry per constrained parameter.
    pub parameters: Vec<ParameterViolation>,
}

impl FrameViolations {
    /// Diagnostic for a named parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DetailedViolation> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.detail)
    }

    /// Diagnostic for a parameter index.
    #[must_use]
    pub fn get_qid(&self, qid: usize) -> Option<&DetailedViolation> {
        self.parameters
            .iter()
            .find(|p| p.qid == qid)
            .map(|p| &p.detail)
    }

    /// Names of the violated parameters, in qid order.
    #[must_use]
    pub fn violated_names(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .filter(|p| p.detail.is_violated)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Number of violated parameters.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.parameters
            .iter()
            .filter(|p| p.detail.is_violated)
            .count()
    }

    /// Check if any parameter is violated.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        self.parameters.iter().any(|p| p.detail.is_violated)
    }
}

/// Largest violation seen for one parameter across a sequence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorstViolation {
    /// Parameter index.
    pub qid: usize,
    /// Parameter name.
    pub name: String,
    /// Frame with the largest violation (earliest on ties).
    pub frame: usize,
    /// Violation magnitude in radians.
    pub magnitude: f64,
    /// Number of frames in which the parameter is violated.
    pub frames_violated: usize,
}

/// Full analysis of a motion sequence.
///
/// # Example
///
/// ```
/// use skeleton_limits::MotionAnalysis;
///
/// let analysis = MotionAnalysis::default();
/// assert_eq!(analysis.total_violations(), 0);
/// assert!(analysis.frames_with_violations().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionAnalysis {
    /// Tolerance used for both paths, in degrees.
    pub tolerance_deg: f64,
    /// Batched group results, in group order.
    pub violations: Vec<GroupViolations>,
    /// Per-frame diagnostics; `detailed[t]` is frame `t`.
    pub detailed: Vec<FrameViolations>,
}

impl MotionAnalysis {
    /// Number of frames analyzed.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.detailed.len()
    }

    /// Group result by name.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&GroupViolations> {
        self.violations.iter().find(|g| g.name == name)
    }

    /// Violated parameter names for each frame that has any.
    #[must_use]
    pub fn frames_with_violations(&self) -> Vec<(usize, Vec<&str>)> {
        self.detailed
            .iter()
            .filter(|f| f.has_violations())
            .map(|f| (f.frame, f.violated_names()))
            .collect()
    }

    /// Violated (frame, parameter) pairs across the whole sequence.
    #[must_use]
    pub fn total_violations(&self) -> usize {
        self.detailed
            .iter()
            .map(FrameViolations::violation_count)
            .sum()
    }

    /// Worst violation per parameter, in qid order.
    ///
    /// Parameters that are never violated are omitted.
    #[must_use]
    pub fn worst_violations(&self) -> Vec<WorstViolation> {
        let mut worst: Vec<WorstViolation> = Vec::new();
        for frame in &self.detailed {
            for p in frame.parameters.iter().filter(|p| p.detail.is_violated) {
                match worst.iter_mut().find(|w| w.qid == p.qid) {
                    Some(w) => {
                        w.frames_violated += 1;
                        if p.detail.violation > w.magnitude {
                            w.frame = frame.frame;
                            w.magnitude = p.detail.violation;
                        }
                    }
                    None => worst.push(WorstViolation {
                        qid: p.qid,
                        name: p.name.clone(),
                        frame: frame.frame,
                        magnitude: p.detail.violation,
                        frames_violated: 1,
                    }),
                }
            }
        }
        worst.sort_by_key(|w| w.qid);
        worst
    }
}

impl std::fmt::Display for MotionAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Joint Limit Analysis:")?;
        writeln!(f, "  Frames analyzed: {}", self.frame_count())?;
        writeln!(f, "  Tolerance: {:.2} deg", self.tolerance_deg)?;
        writeln!(
            f,
            "  Frames with violations: {}",
            self.frames_with_violations().len()
        )?;
        writeln!(f, "  Total violations: {}", self.total_violations())?;
        for group in &self.violations {
            writeln!(
                f,
                "  Group {}: max {:.4} rad over {} frame(s)",
                group.name,
                group.max_magnitude(),
                group.violated_frames().len()
            )?;
        }
        for w in self.worst_violations() {
            writeln!(
                f,
                "  Worst {}: {:.4} rad at frame {} ({} frame(s) violated)",
                w.name, w.magnitude, w.frame, w.frames_violated
            )?;
        }
        Ok(())
    }
}
