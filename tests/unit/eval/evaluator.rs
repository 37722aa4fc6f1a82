use super::*;

const DASHBOARD: &str = include_str!("../../data/dashboard.json");

fn dashboard() -> Composition {
    Composition::from_json_str(DASHBOARD).unwrap()
}

fn eval(comp: &Composition, frame: u64) -> EvaluatedFrame {
    Evaluator::eval_frame(comp, FrameIndex(frame)).unwrap()
}

fn entity<'a>(frame: &'a EvaluatedFrame, id: &str) -> &'a EvaluatedEntity {
    frame
        .scene
        .as_ref()
        .and_then(|s| s.entities.iter().find(|e| e.id == id))
        .unwrap()
}

#[test]
fn first_frame_is_fully_hidden() {
    let comp = dashboard();
    let f = eval(&comp, 0);
    assert_eq!(f.current_scene, 0);
    assert_eq!(f.chrome.logo_opacity, 0.0);
    assert_eq!(f.chrome.footer_opacity, 0.0);
    assert_eq!(f.chrome.progress, vec![true, false, false, false]);

    let scene = f.scene.as_ref().unwrap();
    assert_eq!(scene.index, 0);
    assert_eq!(scene.label, "overview");
    assert_eq!(scene.local_frame, FrameIndex(0));
    assert_eq!(scene.weight.opacity, 0.0);
    assert_eq!(scene.entities.len(), 11);
    assert!(scene.entities.iter().all(|e| e.props.opacity == 0.0));
}

#[test]
fn entities_use_scene_local_frames() {
    let comp = dashboard();
    let f = eval(&comp, 210 + 100);
    let scene = f.scene.as_ref().unwrap();
    assert_eq!(scene.index, 1);
    assert_eq!(scene.label, "lending");
    assert_eq!(scene.local_frame, FrameIndex(100));
    assert_eq!(scene.weight.opacity, 1.0);

    let ids: Vec<&str> = scene.entities.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "title",
            "separator_line",
            "chart",
            "jan",
            "feb",
            "mar",
            "apr",
            "avg_loan",
            "avg_ltv",
            "conversion",
            "avg_days",
            "purpose_split"
        ]
    );

    // Local frame 0 of the third scene restarts every entrance.
    let restart = eval(&comp, 420);
    assert_eq!(entity(&restart, "title").props.opacity, 0.0);
    assert_eq!(entity(&restart, "title").props.translate.y, 20.0);
}

#[test]
fn counters_and_fills_reach_their_targets() {
    let comp = dashboard();
    let f = eval(&comp, 190);
    assert_eq!(entity(&f, "owners").props.display_value, Some(412));
    assert_eq!(entity(&f, "active_loans").props.display_value, Some(301));
    assert_eq!(entity(&f, "funders_line").props.fill_ratio, 1.0);
    assert_eq!(entity(&f, "ring_east").props.fill_ratio, 0.0);
    assert_eq!(entity(&f, "ring_east").props.display_value, Some(0));
    let north = entity(&f, "ring_north");
    assert!((north.props.fill_ratio - 0.7).abs() < 1e-9);
    assert_eq!(north.props.display_value, Some(70));
    assert_eq!(north.delay_frames, 39);
    assert_eq!(north.group, "rings");

    let book = eval(&comp, 630 + 150);
    assert_eq!(entity(&book, "book_size").props.display_value, Some(69_500_000));
}

#[test]
fn last_frame_is_evaluated_and_the_next_is_rejected() {
    let comp = dashboard();
    let last = eval(&comp, 839);
    let scene = last.scene.as_ref().unwrap();
    assert_eq!(scene.index, 3);
    assert_eq!(scene.local_frame, FrameIndex(209));
    assert!(scene.weight.opacity > 0.0 && scene.weight.opacity < 1.0);
    assert_eq!(last.chrome.progress, vec![false, false, false, true]);

    assert!(matches!(
        Evaluator::eval_frame(&comp, FrameIndex(840)),
        Err(FramecastError::Evaluation(_))
    ));
}

#[test]
fn frames_past_the_last_window_mount_nothing() {
    let mut comp = dashboard();
    comp.timeline.total_duration_frames = Some(900);
    let f = eval(&comp, 870);
    assert!(f.scene.is_none());
    assert_eq!(f.current_scene, 3);
    assert_eq!(f.chrome.logo_opacity, 1.0);
}

#[test]
fn invalid_compositions_are_rejected_before_evaluation() {
    let mut comp = dashboard();
    comp.scenes.truncate(2);
    assert!(matches!(
        Evaluator::eval_frame(&comp, FrameIndex(0)),
        Err(FramecastError::InvalidConfig(_))
    ));
}

#[test]
fn evaluated_frames_serialize_to_json() {
    let comp = dashboard();
    let v = serde_json::to_value(eval(&comp, 300)).unwrap();
    assert_eq!(v["frame"], 300);
    assert_eq!(v["current_scene"], 1);
    assert_eq!(v["scene"]["local_frame"], 90);
    assert_eq!(v["scene"]["entities"][0]["id"], "title");
    assert!(v["scene"]["entities"][0]["props"]["translate"]["y"].is_number());
}
