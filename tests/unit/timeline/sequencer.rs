use super::*;

fn params() -> SceneParams {
    SceneParams::new(210, 18, 4).unwrap()
}

fn opacity(frame: u64, scene: u32) -> f64 {
    scene_visual_weight(FrameIndex(frame), scene, &params())
        .unwrap()
        .opacity
}

fn scale(frame: u64, scene: u32) -> f64 {
    scene_visual_weight(FrameIndex(frame), scene, &params())
        .unwrap()
        .scale_accent
}

#[test]
fn dashboard_checkpoints() {
    assert_eq!(opacity(0, 0), 0.0);
    assert_eq!(opacity(9, 0), 0.5);
    assert_eq!(opacity(18, 0), 1.0);
    assert_eq!(opacity(192, 0), 1.0);
    assert!(opacity(193, 0) < 1.0);
    assert_eq!(opacity(210, 0), 0.0);
    assert_eq!(opacity(210, 1), 0.0);
    assert_eq!(opacity(822, 3), 1.0);
    assert!(opacity(823, 3) < 1.0);
    assert_eq!(opacity(840, 3), 0.0);
}

#[test]
fn fade_out_is_strictly_decreasing_across_every_boundary() {
    let p = params();
    for w in p.windows() {
        let end = w.range.end.0;
        assert_eq!(opacity(end - 18, w.index), 1.0);
        let mut prev = 1.0;
        for f in end - 17..=end {
            let o = opacity(f, w.index);
            assert!(o < prev, "scene {} frame {f}: {o} !< {prev}", w.index);
            prev = o;
        }
        assert_eq!(prev, 0.0);
    }
}

#[test]
fn opacities_are_bounded_and_rarely_overlap() {
    let p = params();
    for f in 0..=p.total_duration_frames() {
        let active = active_scenes(FrameIndex(f), &p).unwrap();
        assert!(active.len() <= 2, "frame {f}");
        for (_, w) in &active {
            assert!((0.0..=1.0).contains(&w.opacity));
        }
        if active.len() == 2 {
            assert_eq!(active[0].0 + 1, active[1].0);
        }
        for scene in 0..p.scene_count() {
            let o = opacity(f, scene);
            assert!((0.0..=1.0).contains(&o));
        }
    }
}

#[test]
fn loop_closure_matches_first_frame() {
    let p = params();
    let last = p.scene_count() - 1;
    assert_eq!(opacity(p.total_duration_frames(), last), 0.0);
    assert_eq!(opacity(0, 0), 0.0);
    assert!(active_scenes(FrameIndex(0), &p).unwrap().is_empty());
    assert!(
        active_scenes(FrameIndex(p.total_duration_frames()), &p)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn truncated_composition_closes_the_loop_early() {
    let p = params().with_total_duration(800).unwrap();
    let at = |f: u64| scene_visual_weight(FrameIndex(f), 3, &p).unwrap();
    assert_eq!(at(782).opacity, 1.0);
    assert!(at(790).opacity < 1.0);
    assert_eq!(at(800).opacity, 0.0);
    // The scale takes the smaller of the two exit curves, so it has not started zooming yet.
    assert_eq!(at(790).scale_accent, 1.0);
    assert!(at(839).scale_accent > 1.0 && at(839).scale_accent < 1.02);
}

#[test]
fn scale_accent_zooms_in_and_out() {
    assert_eq!(scale(0, 0), 0.97);
    assert_eq!(scale(18, 0), 1.0);
    assert_eq!(scale(100, 0), 1.0);
    assert_eq!(scale(104, 0), 1.0);
    assert_eq!(scale(105, 0), 1.0);
    assert!((scale(201, 0) - 1.01).abs() < 1e-12);
    assert_eq!(scale(210, 0), 1.02);
    assert_eq!(scale(630, 3), 0.97);
    assert_eq!(scale(700, 3), 1.0);
    assert_eq!(scale(840, 3), 1.02);
}

#[test]
fn midpoint_decides_which_scale_curve_applies() {
    // Before the midpoint a frame preceding the scene still reads the entry curve.
    assert_eq!(scale(0, 1), 0.97);
    // After it, frames past the window read the exit curve.
    assert_eq!(scale(500, 1), 1.02);
}

#[test]
fn zero_width_transition_steps_at_boundaries() {
    let p = SceneParams::new(10, 0, 2).unwrap();
    let o = |f: u64, s: u32| scene_visual_weight(FrameIndex(f), s, &p).unwrap().opacity;
    assert_eq!(o(0, 0), 1.0);
    assert_eq!(o(9, 0), 1.0);
    assert_eq!(o(10, 0), 0.0);
    assert_eq!(o(10, 1), 1.0);
    assert_eq!(o(20, 1), 0.0);
}

#[test]
fn windows_tile_the_timeline() {
    let p = params();
    let windows: Vec<_> = p.windows().collect();
    assert_eq!(windows.len(), 4);
    assert_eq!(windows[0].range.start, FrameIndex(0));
    assert_eq!(windows[3].range.end, FrameIndex(p.total_duration_frames()));
    for w in windows.windows(2) {
        assert_eq!(w[0].range.end, w[1].range.start);
        assert_eq!(w[0].range.len_frames(), p.scene_duration_frames());
    }
}

#[test]
fn current_scene_is_clamped_and_mounting_is_not() {
    let p = params();
    assert_eq!(p.current_scene_index(FrameIndex(0)), 0);
    assert_eq!(p.current_scene_index(FrameIndex(209)), 0);
    assert_eq!(p.current_scene_index(FrameIndex(210)), 1);
    assert_eq!(p.current_scene_index(FrameIndex(840)), 3);
    assert_eq!(p.current_scene_index(FrameIndex(u64::MAX)), 3);

    assert_eq!(p.mounted_scene(FrameIndex(839)).unwrap().index, 3);
    assert!(p.mounted_scene(FrameIndex(840)).is_none());
}

#[test]
fn scene_index_out_of_range_is_rejected() {
    let err = scene_visual_weight(FrameIndex(0), 4, &params()).unwrap_err();
    assert!(matches!(
        err,
        FramecastError::OutOfRangeSceneIndex {
            index: 4,
            scene_count: 4
        }
    ));
    assert!(params().window(7).is_err());
}
