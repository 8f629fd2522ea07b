//! Joint limit table.
//!
//! Maps constrained pose parameters to `[lower, upper]` bounds. Reversed
//! bounds are swapped once here so evaluation never has to check order.

use std::sync::OnceLock;

use hashbrown::HashMap;
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::angle::{bound_excess, normalize_angle};
use crate::definition::{STANDARD_LIMITS, SkeletonDefinition};
use crate::error::{LimitError, LimitResult};

static STANDARD_TABLE: OnceLock<LimitResult<LimitTable>> = OnceLock::new();

/// Admissible angular range for one pose parameter, in radians.
///
/// Always satisfies `lower <= upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
}

impl Bounds {
    /// Create bounds, swapping the endpoints if given high-first.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        if a > b {
            Self { lower: b, upper: a }
        } else {
            Self { lower: a, upper: b }
        }
    }

    /// Check if a normalized angle lies within the bounds.
    #[must_use]
    pub fn contains(&self, normalized: f64) -> bool {
        normalized >= self.lower && normalized <= self.upper
    }

    /// Violation magnitude of an already-normalized angle.
    #[must_use]
    pub fn excess(&self, normalized: f64, tolerance_rad: f64) -> f64 {
        bound_excess(normalized, self.lower, self.upper, tolerance_rad)
    }

    /// Violation magnitude of a raw angle, normalizing it first.
    ///
    /// # Example
    ///
    /// ```
    /// use skeleton_limits::Bounds;
    /// use std::f64::consts::PI;
    ///
    /// let knee = Bounds::new(0.0, 0.75 * PI);
    /// // 4.0 rad wraps to about -2.283 rad, below the lower bound.
    /// assert!((knee.violation(4.0, 0.0) - (2.0 * PI - 4.0)).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn violation(&self, angle: f64, tolerance_rad: f64) -> f64 {
        self.excess(normalize_angle(angle), tolerance_rad)
    }

    /// Width of the admissible range.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.upper - self.lower
    }
}

/// One row of the limit table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LimitEntry {
    /// Constrained parameter index.
    pub qid: usize,
    /// Its admissible range.
    pub bounds: Bounds,
}

/// Bounds for every constrained pose parameter.
///
/// Rows follow configuration order; lookups by qid are O(1).
///
/// # Example
///
/// ```
/// use skeleton_limits::{LimitTable, SkeletonDefinition};
///
/// let skeleton = SkeletonDefinition::standard();
/// let table = LimitTable::from_config([("knee_angle_r", 2.0, 0.0)], &skeleton).unwrap();
///
/// assert!(table.is_limited(6));
/// assert!(!table.is_limited(13));
/// let bounds = table.bounds_for(6).unwrap();
/// assert_eq!((bounds.lower, bounds.upper), (0.0, 2.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LimitTable {
    entries: Vec<LimitEntry>,
    rows: HashMap<usize, usize>,
}

impl LimitTable {
    /// Build a table from `(name, low, high)` limits.
    ///
    /// A name given more than once keeps its first row and takes the last
    /// bounds.
    ///
    /// # Errors
    ///
    /// Returns [`LimitError::UnknownParameter`] for a name the skeleton does
    /// not define, or [`LimitError::NonFiniteBound`] for a `NaN`/infinite bound.
    pub fn from_config<I, S>(limits: I, skeleton: &SkeletonDefinition) -> LimitResult<Self>
    where
        I: IntoIterator<Item = (S, f64, f64)>,
        S: AsRef<str>,
    {
        let mut table = Self {
            entries: Vec::new(),
            rows: HashMap::new(),
        };

        for (name, low, high) in limits {
            let name = name.as_ref();
            let qid = skeleton
                .qid_of(name)
                .ok_or_else(|| LimitError::unknown_parameter(name))?;
            if !low.is_finite() || !high.is_finite() {
                return Err(LimitError::NonFiniteBound {
                    name: name.to_string(),
                });
            }

            let bounds = Bounds::new(low, high);
            if let Some(&row) = table.rows.get(&qid) {
                warn!(name, qid, "Limit configured more than once, keeping last bounds");
                table.entries[row].bounds = bounds;
            } else {
                table.rows.insert(qid, table.entries.len());
                table.entries.push(LimitEntry { qid, bounds });
            }
        }

        debug!(limited = table.entries.len(), "Built limit table");
        Ok(table)
    }

    /// The standard skeleton limit table.
    ///
    /// Built on first use and shared for the life of the process.
    ///
    /// # Errors
    ///
    /// Returns the construction error if the standard configuration is
    /// inconsistent with the standard skeleton.
    pub fn standard() -> LimitResult<&'static Self> {
        STANDARD_TABLE
            .get_or_init(|| {
                Self::from_config(
                    STANDARD_LIMITS.iter().copied(),
                    &SkeletonDefinition::standard(),
                )
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Bounds for `qid`.
    ///
    /// # Errors
    ///
    /// Returns [`LimitError::UndefinedLimit`] if `qid` is unconstrained.
    pub fn bounds_for(&self, qid: usize) -> LimitResult<Bounds> {
        self.get(qid).ok_or(LimitError::undefined(qid))
    }

    /// Bounds for a named parameter.
    ///
    /// # Errors
    ///
    /// Returns [`LimitError::UnknownParameter`] if the name is not in the
    /// skeleton, or [`LimitError::UndefinedLimit`] if it is unconstrained.
    pub fn bounds_for_name(
        &self,
        name: &str,
        skeleton: &SkeletonDefinition,
    ) -> LimitResult<Bounds> {
        let qid = skeleton
            .qid_of(name)
            .ok_or_else(|| LimitError::unknown_parameter(name))?;
        self.bounds_for(qid)
    }

    /// Bounds for `qid`, if constrained.
    #[must_use]
    pub fn get(&self, qid: usize) -> Option<Bounds> {
        self.row_index(qid).map(|row| self.entries[row].bounds)
    }

    /// Check if `qid` has a limit.
    #[must_use]
    pub fn is_limited(&self, qid: usize) -> bool {
        self.rows.contains_key(&qid)
    }

    /// Row of `qid` in [`entries`](Self::entries).
    #[must_use]
    pub fn row_index(&self, qid: usize) -> Option<usize> {
        self.rows.get(&qid).copied()
    }

    /// All rows in configuration order.
    #[must_use]
    pub fn entries(&self) -> &[LimitEntry] {
        &self.entries
    }

    /// Number of constrained parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no parameter is constrained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
