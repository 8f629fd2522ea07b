//! Console report.

use std::fmt::Write;

use skeleton_limits::MotionAnalysis;

/// Render the per-frame violation listing followed by group maxima and the
/// total count.
pub fn render(analysis: &MotionAnalysis) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "Detected violations:");
    for (frame, names) in analysis.frames_with_violations() {
        let _ = writeln!(out, "Frame {frame}: {names:?}");
    }

    for group in &analysis.violations {
        let _ = writeln!(
            out,
            "Group {}: max violation {:.4} rad in {} frame(s)",
            group.name,
            group.max_magnitude(),
            group.violated_frames().len()
        );
    }

    let _ = writeln!(out, "Total violations: {}", analysis.total_violations());
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use skeleton_limits::{LimitTable, PoseSequence, SkeletonDefinition, analyze_motion_sequence};

    #[test]
    fn test_render_lists_violating_frames() {
        let mut angles = PoseSequence::zeros(3).as_matrix().clone();
        for t in 0..3 {
            angles[(t, 27)] = -0.2;
            angles[(t, 37)] = -0.2;
        }
        angles[(1, 6)] = 2.8;
        let poses = PoseSequence::from_matrix(angles).unwrap();

        let table = LimitTable::standard().unwrap();
        let analysis =
            analyze_motion_sequence(&poses, table, &SkeletonDefinition::standard()).unwrap();
        let text = render(&analysis);

        assert!(text.starts_with("Detected violations:\n"));
        assert!(text.contains("Frame 1: [\"knee_angle_r\"]"));
        assert!(!text.contains("Frame 0:"));
        assert!(!text.contains("Frame 2:"));
        assert!(text.contains("Group r_knee: max violation 0.4438 rad in 1 frame(s)"));
        assert!(text.trim_end().ends_with("Total violations: 1"));
    }

    #[test]
    fn test_render_clean_sequence() {
        let text = render(&MotionAnalysis::default());
        assert_eq!(text, "Detected violations:\nTotal violations: 0\n");
    }
}
