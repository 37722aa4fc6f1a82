use super::*;

fn unit() -> BreakpointTable {
    BreakpointTable::two([0.0, 10.0], [0.0, 1.0]).unwrap()
}

#[test]
fn clamp_holds_edges_and_maps_midpoint() {
    let t = unit();
    assert_eq!(interpolate(-5.0, &t, InterpolateOpts::CLAMP), 0.0);
    assert_eq!(interpolate(15.0, &t, InterpolateOpts::CLAMP), 1.0);
    assert_eq!(interpolate(5.0, &t, InterpolateOpts::CLAMP), 0.5);
    assert_eq!(interpolate(0.0, &t, InterpolateOpts::CLAMP), 0.0);
    assert_eq!(interpolate(10.0, &t, InterpolateOpts::CLAMP), 1.0);
}

#[test]
fn extend_continues_outer_slopes_independently() {
    let t = unit();
    assert_eq!(interpolate(-5.0, &t, InterpolateOpts::EXTEND), -0.5);
    assert_eq!(interpolate(15.0, &t, InterpolateOpts::EXTEND), 1.5);

    let left_only = InterpolateOpts::new(Extrapolate::Extend, Extrapolate::Clamp);
    assert_eq!(interpolate(-5.0, &t, left_only), -0.5);
    assert_eq!(interpolate(15.0, &t, left_only), 1.0);
}

#[test]
fn multi_segment_picks_containing_segment() {
    let t = BreakpointTable::new([(0.0, 0.0), (10.0, 1.0), (20.0, 0.0)]).unwrap();
    assert_eq!(interpolate(5.0, &t, InterpolateOpts::CLAMP), 0.5);
    assert_eq!(interpolate(10.0, &t, InterpolateOpts::CLAMP), 1.0);
    assert_eq!(interpolate(15.0, &t, InterpolateOpts::CLAMP), 0.5);
    assert_eq!(interpolate(25.0, &t, InterpolateOpts::EXTEND), -0.5);
}

#[test]
fn duplicate_thresholds_form_a_step() {
    let t = BreakpointTable::new([(0.0, 0.0), (5.0, 0.0), (5.0, 1.0), (10.0, 1.0)]).unwrap();
    assert_eq!(interpolate(4.999, &t, InterpolateOpts::CLAMP), 0.0);
    assert_eq!(interpolate(5.0, &t, InterpolateOpts::CLAMP), 1.0);
    assert_eq!(interpolate(7.0, &t, InterpolateOpts::CLAMP), 1.0);

    let zero_width = BreakpointTable::two([3.0, 3.0], [1.0, 0.0]).unwrap();
    for opts in [InterpolateOpts::CLAMP, InterpolateOpts::EXTEND] {
        assert_eq!(interpolate(2.0, &zero_width, opts), 1.0);
        assert_eq!(interpolate(3.0, &zero_width, opts), 0.0);
        assert_eq!(interpolate(4.0, &zero_width, opts), 0.0);
        assert!(!interpolate(3.0, &zero_width, opts).is_nan());
    }
}

#[test]
fn ease_shapes_in_segment_progress_only() {
    let t = unit();
    let opts = InterpolateOpts::EXTEND.with_ease(Ease::InQuad);
    assert_eq!(interpolate(5.0, &t, opts), 0.25);
    assert_eq!(interpolate(15.0, &t, opts), 1.5);
}

#[test]
fn nan_input_maps_to_first_output() {
    assert_eq!(interpolate(f64::NAN, &unit(), InterpolateOpts::EXTEND), 0.0);
}

#[test]
fn rejects_malformed_tables() {
    let err = BreakpointTable::new([(0.0, 0.0)]).unwrap_err();
    assert!(matches!(err, FramecastError::InvalidDomain(_)));

    let err = BreakpointTable::new([(10.0, 0.0), (0.0, 1.0)]).unwrap_err();
    assert!(matches!(err, FramecastError::InvalidDomain(_)));

    let err = BreakpointTable::two([0.0, f64::INFINITY], [0.0, 1.0]).unwrap_err();
    assert!(matches!(err, FramecastError::InvalidDomain(_)));

    let err = interpolate_range(1.0, [1.0, 0.0], [0.0, 1.0], InterpolateOpts::CLAMP).unwrap_err();
    assert!(matches!(err, FramecastError::InvalidDomain(_)));
}

#[test]
fn opts_deserialize_with_defaults() {
    let opts: InterpolateOpts = serde_json::from_str(r#"{ "right": "extend" }"#).unwrap();
    assert_eq!(opts.left, Extrapolate::Clamp);
    assert_eq!(opts.right, Extrapolate::Extend);
    assert_eq!(opts.ease, Ease::Linear);
}
