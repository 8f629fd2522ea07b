//! Loading persisted motion data.
//!
//! Motion files are JSON objects holding at least a `"poses"` entry: an
//! array of frames, each an array of 46 angles in radians. Other entries
//! (shape coefficients, translations, ...) are ignored.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{LoadError, LoadResult};
use crate::pose::{POSE_DIM, PoseSequence};

/// Key under which motion files store the pose array.
pub const POSES_KEY: &str = "poses";

/// Load a pose sequence from a motion file.
///
/// # Errors
///
/// Returns [`LoadError::MissingDataKey`] (listing the keys present) if the
/// file has no `"poses"` entry, [`LoadError::ShapeMismatch`] if a frame does
/// not hold 46 values, or an I/O, JSON or content error otherwise.
///
/// # Example
///
/// ```no_run
/// use skeleton_limits::load_poses;
///
/// let poses = load_poses("output/merged_0/merged_0_skel.json").unwrap();
/// println!("{} frames", poses.frame_count());
/// ```
pub fn load_poses<P: AsRef<Path>>(path: P) -> LoadResult<PoseSequence> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Reading motion file");
    let text = std::fs::read_to_string(path)?;
    parse_from(&text, path)
}

/// Parse a pose sequence from motion JSON held in memory.
///
/// # Errors
///
/// Same as [`load_poses`], without I/O errors.
pub fn parse_poses(text: &str) -> LoadResult<PoseSequence> {
    parse_from(text, Path::new("<memory>"))
}

fn parse_from(text: &str, path: &Path) -> LoadResult<PoseSequence> {
    let root: Value = serde_json::from_str(text)?;
    let Value::Object(map) = root else {
        return Err(LoadError::invalid_content(
            "motion data must be a JSON object",
        ));
    };

    let Some(poses) = map.get(POSES_KEY) else {
        let mut available: Vec<String> = map.keys().cloned().collect();
        available.sort();
        return Err(LoadError::MissingDataKey {
            key: POSES_KEY.to_string(),
            path: PathBuf::from(path),
            available,
        });
    };

    let rows = poses
        .as_array()
        .ok_or_else(|| LoadError::invalid_content("'poses' must be an array of frames"))?;

    let mut frames = Vec::with_capacity(rows.len());
    for (frame, row) in rows.iter().enumerate() {
        let values = row.as_array().ok_or_else(|| {
            LoadError::invalid_content(format!("frame {frame} is not an array"))
        })?;
        if values.len() != POSE_DIM {
            return Err(LoadError::ShapeMismatch {
                expected: POSE_DIM,
                found: values.len(),
                frame,
            });
        }

        let mut pose = [0.0; POSE_DIM];
        for (qid, value) in values.iter().enumerate() {
            pose[qid] = value.as_f64().ok_or_else(|| {
                LoadError::invalid_content(format!("frame {frame}, parameter {qid} is not a number"))
            })?;
        }
        frames.push(pose);
    }

    let poses = PoseSequence::from_frames(&frames);
    info!(
        frames = poses.frame_count(),
        params = POSE_DIM,
        path = %path.display(),
        "Loaded pose sequence"
    );
    Ok(poses)
}
