//! Evaluation parameters: tolerance and joint group selection.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::definition::SkeletonDefinition;
use crate::error::{LimitError, LimitResult};
use crate::limits::LimitTable;

/// A named set of pose parameters evaluated together.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointGroup {
    /// Group name (e.g. `"l_elbow"`).
    pub name: String,
    /// Parameter indices, in output column order.
    pub qids: Vec<usize>,
}

/// Ordered selection of joint groups for the batched evaluator.
///
/// # Example
///
/// ```
/// use skeleton_limits::JointGroups;
///
/// let groups = JointGroups::new()
///     .with_group("r_knee", [6])
///     .with_group("r_elbow", [32, 33]);
///
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups.get("r_elbow").map(|g| g.qids.len()), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointGroups {
    groups: Vec<JointGroup>,
}

impl JointGroups {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Knees and elbows: the joints most prone to implausible flexion.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_group("l_knee", [13])
            .with_group("r_knee", [6])
            .with_group("l_elbow", [42, 43])
            .with_group("r_elbow", [32, 33])
    }

    /// One single-parameter group per constrained parameter, in qid order.
    #[must_use]
    pub fn all_limited(table: &LimitTable, skeleton: &SkeletonDefinition) -> Self {
        skeleton
            .names()
            .iter()
            .enumerate()
            .filter(|&(qid, _)| table.is_limited(qid))
            .fold(Self::new(), |groups, (qid, name)| {
                groups.with_group(name.clone(), [qid])
            })
    }

    /// Add a group, replacing any existing group with the same name in place.
    #[must_use]
    pub fn with_group(
        mut self,
        name: impl Into<String>,
        qids: impl IntoIterator<Item = usize>,
    ) -> Self {
        let group = JointGroup {
            name: name.into(),
            qids: qids.into_iter().collect(),
        };
        match self.groups.iter_mut().find(|g| g.name == group.name) {
            Some(existing) => *existing = group,
            None => self.groups.push(group),
        }
        self
    }

    /// Look up a group by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&JointGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Groups in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[JointGroup] {
        &self.groups
    }

    /// Iterate over groups.
    pub fn iter(&self) -> impl Iterator<Item = &JointGroup> {
        self.groups.iter()
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no group is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Parameters for a violation evaluation.
///
/// # Example
///
/// ```
/// use skeleton_limits::EvalParams;
///
/// // Strict bounds, as used for ground-truth reporting
/// let strict = EvalParams::strict();
/// assert_eq!(strict.tolerance_deg, 0.0);
///
/// // Default absorbs 5 degrees of estimation noise
/// let noisy = EvalParams::default();
/// assert!((noisy.tolerance_deg - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvalParams {
    /// Allowance added to both sides of every bound, in degrees.
    pub tolerance_deg: f64,
    /// Groups reported by the batched evaluator.
    pub groups: JointGroups,
}

impl Default for EvalParams {
    fn default() -> Self {
        Self {
            tolerance_deg: 5.0,
            groups: JointGroups::standard(),
        }
    }
}

impl EvalParams {
    /// Zero tolerance with the standard groups.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            tolerance_deg: 0.0,
            groups: JointGroups::standard(),
        }
    }

    /// Set the tolerance in degrees.
    #[must_use]
    pub fn tolerance_deg(mut self, tolerance_deg: f64) -> Self {
        self.tolerance_deg = tolerance_deg;
        self
    }

    /// Set the evaluated groups.
    #[must_use]
    pub fn groups(mut self, groups: JointGroups) -> Self {
        self.groups = groups;
        self
    }

    /// Validated tolerance in radians.
    ///
    /// # Errors
    ///
    /// Returns [`LimitError::InvalidTolerance`] if the tolerance is negative or
    /// not finite.
    pub fn tolerance_rad(&self) -> LimitResult<f64> {
        tolerance_radians(self.tolerance_deg)
    }
}

/// Convert a tolerance in degrees to radians, rejecting negative or
/// non-finite values.
pub(crate) fn tolerance_radians(tolerance_deg: f64) -> LimitResult<f64> {
    if !tolerance_deg.is_finite() || tolerance_deg < 0.0 {
        return Err(LimitError::InvalidTolerance(tolerance_deg));
    }
    Ok(tolerance_deg.to_radians())
}
