//! Skeleton parameter layout and standard limit configuration.
//!
//! The pose layout is fixed: 46 rotational parameters addressed by a stable
//! index (the qid). Limits are configured by parameter name, in any order
//! and with either bound first.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use hashbrown::HashMap;

use crate::error::{LimitError, LimitResult};
use crate::pose::POSE_DIM;

/// Canonical pose parameter names, indexed by qid.
pub const POSE_PARAM_NAMES: [&str; POSE_DIM] = [
    "pelvis_tilt",          // 0
    "pelvis_list",          // 1
    "pelvis_rotation",      // 2
    "hip_flexion_r",        // 3
    "hip_adduction_r",      // 4
    "hip_rotation_r",       // 5
    "knee_angle_r",         // 6
    "ankle_angle_r",        // 7
    "subtalar_angle_r",     // 8
    "mtp_angle_r",          // 9
    "hip_flexion_l",        // 10
    "hip_adduction_l",      // 11
    "hip_rotation_l",       // 12
    "knee_angle_l",         // 13
    "ankle_angle_l",        // 14
    "subtalar_angle_l",     // 15
    "mtp_angle_l",          // 16
    "lumbar_bending",       // 17
    "lumbar_extension",     // 18
    "lumbar_twist",         // 19
    "thorax_bending",       // 20
    "thorax_extension",     // 21
    "thorax_twist",         // 22
    "head_bending",         // 23
    "head_extension",       // 24
    "head_twist",           // 25
    "scapula_abduction_r",  // 26
    "scapula_elevation_r",  // 27
    "scapula_upward_rot_r", // 28
    "shoulder_r_x",         // 29
    "shoulder_r_y",         // 30
    "shoulder_r_z",         // 31
    "elbow_flexion_r",      // 32
    "pro_sup_r",            // 33
    "wrist_flexion_r",      // 34
    "wrist_deviation_r",    // 35
    "scapula_abduction_l",  // 36
    "scapula_elevation_l",  // 37
    "scapula_upward_rot_l", // 38
    "shoulder_l_x",         // 39
    "shoulder_l_y",         // 40
    "shoulder_l_z",         // 41
    "elbow_flexion_l",      // 42
    "pro_sup_l",            // 43
    "wrist_flexion_l",      // 44
    "wrist_deviation_l",    // 45
];

/// Standard anatomical limits as `(name, low, high)` in radians.
///
/// Entries are not in qid order, and some list the bounds reversed; the
/// limit table normalizes both.
pub const STANDARD_LIMITS: &[(&str, f64, f64)] = &[
    ("scapula_abduction_r", -0.628, 0.628),
    ("scapula_elevation_r", -0.4, -0.1),
    ("scapula_upward_rot_r", -0.190, 0.319),
    ("scapula_abduction_l", -0.628, 0.628),
    ("scapula_elevation_l", -0.1, -0.4),
    ("scapula_upward_rot_l", -0.210, 0.219),
    ("elbow_flexion_r", 0.0, 3.0 / 4.0 * PI),
    ("pro_sup_r", -3.0 / 4.0 * FRAC_PI_2, 3.0 / 4.0 * FRAC_PI_2),
    ("wrist_flexion_r", -FRAC_PI_2, FRAC_PI_2),
    ("wrist_deviation_r", -FRAC_PI_4, FRAC_PI_4),
    ("elbow_flexion_l", 0.0, 3.0 / 4.0 * PI),
    ("pro_sup_l", -FRAC_PI_2, FRAC_PI_2),
    ("wrist_flexion_l", -FRAC_PI_2, FRAC_PI_2),
    ("wrist_deviation_l", -FRAC_PI_4, FRAC_PI_4),
    ("shoulder_r_y", -FRAC_PI_2, FRAC_PI_2),
    ("lumbar_bending", -2.0 / 3.0 * FRAC_PI_4, 2.0 / 3.0 * FRAC_PI_4),
    ("lumbar_extension", -FRAC_PI_4, FRAC_PI_4),
    ("lumbar_twist", -FRAC_PI_4, FRAC_PI_4),
    ("thorax_bending", -FRAC_PI_4, FRAC_PI_4),
    ("thorax_extension", -FRAC_PI_4, FRAC_PI_4),
    ("thorax_twist", -FRAC_PI_4, FRAC_PI_4),
    ("head_bending", -FRAC_PI_4, FRAC_PI_4),
    ("head_extension", -FRAC_PI_4, FRAC_PI_4),
    ("head_twist", -FRAC_PI_4, FRAC_PI_4),
    ("ankle_angle_r", -FRAC_PI_4, FRAC_PI_4),
    ("subtalar_angle_r", -FRAC_PI_4, FRAC_PI_4),
    ("mtp_angle_r", -FRAC_PI_4, FRAC_PI_4),
    ("ankle_angle_l", -FRAC_PI_4, FRAC_PI_4),
    ("subtalar_angle_l", -FRAC_PI_4, FRAC_PI_4),
    ("mtp_angle_l", -FRAC_PI_4, FRAC_PI_4),
    ("knee_angle_r", 0.0, 3.0 / 4.0 * PI),
    ("knee_angle_l", 0.0, 3.0 / 4.0 * PI),
    // Hip ranges are tighter than the full anatomical range to keep
    // downstream fitting stable.
    ("hip_flexion_r", -FRAC_PI_4, 3.0 / 4.0 * PI),
    ("hip_adduction_r", -FRAC_PI_4, 2.0 / 3.0 * FRAC_PI_4),
    ("hip_rotation_r", -FRAC_PI_4, FRAC_PI_4),
    ("hip_flexion_l", -FRAC_PI_4, 3.0 / 4.0 * PI),
    ("hip_adduction_l", -FRAC_PI_4, 2.0 / 3.0 * FRAC_PI_4),
    ("hip_rotation_l", -FRAC_PI_4, FRAC_PI_4),
    ("shoulder_r_x", -FRAC_PI_2, FRAC_PI_2 + 1.5),
    ("shoulder_r_z", -FRAC_PI_2, FRAC_PI_2),
    ("shoulder_l_x", -FRAC_PI_2 - 1.5, FRAC_PI_2),
    ("shoulder_l_y", -FRAC_PI_2, FRAC_PI_2),
    ("shoulder_l_z", -FRAC_PI_2, FRAC_PI_2),
];

/// Parameter naming for a skeleton's pose vector.
///
/// # Example
///
/// ```
/// use skeleton_limits::SkeletonDefinition;
///
/// let skeleton = SkeletonDefinition::standard();
/// assert_eq!(skeleton.qid_of("knee_angle_l"), Some(13));
/// assert_eq!(skeleton.name_of(6), Some("knee_angle_r"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonDefinition {
    names: Vec<String>,
    qids: HashMap<String, usize>,
}

impl SkeletonDefinition {
    /// The standard 46-parameter skeleton.
    #[must_use]
    pub fn standard() -> Self {
        let names: Vec<String> = POSE_PARAM_NAMES.iter().map(|&n| n.to_string()).collect();
        let qids = names
            .iter()
            .enumerate()
            .map(|(qid, name)| (name.clone(), qid))
            .collect();
        Self { names, qids }
    }

    /// Create a definition from parameter names in qid order.
    ///
    /// # Errors
    ///
    /// Returns [`LimitError::ShapeMismatch`] unless exactly [`POSE_DIM`] names
    /// are given, or [`LimitError::DuplicateParameter`] if a name repeats.
    pub fn new<I, S>(names: I) -> LimitResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != POSE_DIM {
            return Err(LimitError::shape_mismatch(POSE_DIM, names.len()));
        }

        let mut qids = HashMap::with_capacity(names.len());
        for (qid, name) in names.iter().enumerate() {
            if qids.insert(name.clone(), qid).is_some() {
                return Err(LimitError::DuplicateParameter { name: name.clone() });
            }
        }

        Ok(Self { names, qids })
    }

    /// Number of pose parameters.
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.names.len()
    }

    /// Index of a named parameter.
    #[must_use]
    pub fn qid_of(&self, name: &str) -> Option<usize> {
        self.qids.get(name).copied()
    }

    /// Name of the parameter at `qid`.
    #[must_use]
    pub fn name_of(&self, qid: usize) -> Option<&str> {
        self.names.get(qid).map(String::as_str)
    }

    /// All parameter names in qid order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for SkeletonDefinition {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_lookup() {
        let skeleton = SkeletonDefinition::standard();
        assert_eq!(skeleton.param_count(), POSE_DIM);
        assert_eq!(skeleton.qid_of("pelvis_tilt"), Some(0));
        assert_eq!(skeleton.qid_of("scapula_elevation_r"), Some(27));
        assert_eq!(skeleton.qid_of("elbow_flexion_l"), Some(42));
        assert_eq!(skeleton.qid_of("wrist_deviation_l"), Some(45));
        assert_eq!(skeleton.qid_of("tail"), None);
        assert_eq!(skeleton.name_of(32), Some("elbow_flexion_r"));
        assert_eq!(skeleton.name_of(46), None);
    }

    #[test]
    fn test_round_trip_every_qid() {
        let skeleton = SkeletonDefinition::standard();
        for (qid, name) in skeleton.names().iter().enumerate() {
            assert_eq!(skeleton.qid_of(name), Some(qid));
        }
    }

    #[test]
    fn test_new_rejects_wrong_count() {
        let err = SkeletonDefinition::new(["a", "b"]).unwrap_err();
        assert_eq!(err, LimitError::shape_mismatch(POSE_DIM, 2));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let mut names: Vec<String> = POSE_PARAM_NAMES.iter().map(|&n| n.to_string()).collect();
        names[45] = "knee_angle_r".to_string();
        let err = SkeletonDefinition::new(names).unwrap_err();
        assert_eq!(
            err,
            LimitError::DuplicateParameter {
                name: "knee_angle_r".to_string()
            }
        );
    }

    #[test]
    fn test_new_matches_standard() {
        let custom = SkeletonDefinition::new(POSE_PARAM_NAMES).unwrap();
        assert_eq!(custom, SkeletonDefinition::standard());
    }

    #[test]
    fn test_standard_limits_name_known_parameters() {
        let skeleton = SkeletonDefinition::standard();
        for (name, _, _) in STANDARD_LIMITS {
            assert!(skeleton.qid_of(name).is_some(), "{name} is not a parameter");
        }
    }
}
