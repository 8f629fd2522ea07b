//! End-to-end scenarios against the standard skeleton limits.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use std::f64::consts::PI;

use approx::assert_relative_eq;
use skeleton_limits::{
    Bounds, JointGroups, LimitError, LimitTable, POSE_DIM, PoseSequence, SkeletonDefinition,
    analyze_motion_sequence, eval_rot_delta, load_poses,
};

fn single_frame(qid: usize, angle: f64) -> PoseSequence {
    let mut frame = [0.0; POSE_DIM];
    frame[qid] = angle;
    PoseSequence::from_frames(&[frame])
}

#[test]
fn scapula_elevation_at_rest_is_above_range() {
    let skeleton = SkeletonDefinition::standard();
    let table = LimitTable::standard().unwrap();
    let qid = skeleton.qid_of("scapula_elevation_r").unwrap();

    let groups = JointGroups::new().with_group("scapula_r", [qid]);
    let result = eval_rot_delta(&single_frame(qid, 0.0), table, &groups, 0.0).unwrap();
    assert_relative_eq!(result[0].magnitude(0, 0).unwrap(), 0.1, epsilon = 1e-12);
}

#[test]
fn knee_hyperflexion() {
    let table = LimitTable::standard().unwrap();
    let result = eval_rot_delta(&single_frame(6, 2.8), table, &JointGroups::standard(), 0.0).unwrap();

    let r_knee = result.iter().find(|g| g.name == "r_knee").unwrap();
    assert_relative_eq!(r_knee.magnitude(0, 0).unwrap(), 2.8 - 0.75 * PI, epsilon = 1e-12);
    assert_relative_eq!(r_knee.magnitude(0, 0).unwrap(), 0.444, epsilon = 1e-3);

    let l_knee = result.iter().find(|g| g.name == "l_knee").unwrap();
    assert_eq!(l_knee.magnitude(0, 0), Some(0.0));
}

#[test]
fn knee_angle_past_pi_wraps_below_range() {
    let table = LimitTable::standard().unwrap();
    let skeleton = SkeletonDefinition::standard();
    let analysis = analyze_motion_sequence(&single_frame(13, 4.0), table, &skeleton).unwrap();

    let detail = analysis.detailed[0].get("knee_angle_l").unwrap();
    assert_relative_eq!(detail.angle, 4.0 - 2.0 * PI, epsilon = 1e-12);
    assert_relative_eq!(detail.violation, 2.283, epsilon = 1e-3);
    assert!(detail.is_violated);

    let l_knee = analysis.group("l_knee").unwrap();
    assert_eq!(l_knee.magnitude(0, 0).unwrap(), detail.violation);
}

#[test]
fn zero_pose_reports_distance_to_nearer_bound() {
    let table = LimitTable::standard().unwrap();
    let skeleton = SkeletonDefinition::standard();
    let analysis = analyze_motion_sequence(&PoseSequence::zeros(1), table, &skeleton).unwrap();

    for entry in table.entries() {
        let name = skeleton.name_of(entry.qid).unwrap();
        let detail = analysis.detailed[0].get(name).unwrap();
        let Bounds { lower, upper } = entry.bounds;
        if lower <= 0.0 && 0.0 <= upper {
            assert_eq!(detail.violation, 0.0, "{name}");
        } else {
            assert_relative_eq!(detail.violation, lower.abs().min(upper.abs()), epsilon = 1e-12);
        }
    }
    assert_eq!(
        analysis.detailed[0].violated_names(),
        ["scapula_elevation_r", "scapula_elevation_l"]
    );
}

#[test]
fn unconstrained_lookup_fails_loudly() {
    let table = LimitTable::standard().unwrap();
    let skeleton = SkeletonDefinition::standard();
    let qid = skeleton.qid_of("pelvis_rotation").unwrap();
    assert!(!table.is_limited(qid));
    assert_eq!(table.bounds_for(qid).unwrap_err(), LimitError::undefined(qid));
}

#[test]
fn load_and_analyze_motion_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("merged_0_skel.json");

    let mut frames = Vec::new();
    for t in 0..4 {
        let mut frame = vec!["0.0".to_string(); POSE_DIM];
        frame[27] = "-0.2".to_string();
        frame[37] = "-0.2".to_string();
        if t == 2 {
            frame[32] = "2.9".to_string();
        }
        frames.push(format!("[{}]", frame.join(",")));
    }
    let text = format!(r#"{{"gender": "female", "poses": [{}]}}"#, frames.join(","));
    std::fs::write(&path, text).unwrap();

    let poses = load_poses(&path).unwrap();
    let table = LimitTable::standard().unwrap();
    let analysis = analyze_motion_sequence(&poses, table, &SkeletonDefinition::standard()).unwrap();

    assert_eq!(analysis.total_violations(), 1);
    let frames = analysis.frames_with_violations();
    assert_eq!(frames, vec![(2, vec!["elbow_flexion_r"])]);

    let r_elbow = analysis.group("r_elbow").unwrap();
    assert_eq!(r_elbow.violated_frames(), vec![2]);
    assert_relative_eq!(r_elbow.max_magnitude(), 2.9 - 0.75 * PI, epsilon = 1e-12);
}
