use super::*;
use crate::{composition::model::Composition, foundation::core::FrameIndex};

fn frame(n: u64) -> EvaluatedFrame {
    let comp = Composition::from_json_str(include_str!("../../data/dashboard.json")).unwrap();
    crate::eval::evaluator::Evaluator::eval_frame(&comp, FrameIndex(n)).unwrap()
}

#[test]
fn identical_frames_share_a_fingerprint() {
    assert_eq!(fingerprint_frame(&frame(120)), fingerprint_frame(&frame(120)));
}

#[test]
fn any_visible_change_alters_the_fingerprint() {
    let base = frame(120);
    let fp = fingerprint_frame(&base);

    let mut nudged = base.clone();
    let scene = nudged.scene.as_mut().unwrap();
    let bag = &mut scene.entities[0].props;
    bag.opacity = f64::from_bits(bag.opacity.to_bits() ^ 1);
    assert_ne!(fingerprint_frame(&nudged), fp);

    let mut renamed = base.clone();
    renamed.scene.as_mut().unwrap().entities[3].id.push('x');
    assert_ne!(fingerprint_frame(&renamed), fp);

    let mut unmounted = base;
    unmounted.scene = None;
    assert_ne!(fingerprint_frame(&unmounted), fp);
}

#[test]
fn signed_zero_is_distinguished() {
    let mut a = frame(0);
    a.chrome.logo_opacity = 0.0;
    let mut b = a.clone();
    b.chrome.logo_opacity = -0.0;
    assert_ne!(fingerprint_frame(&a), fingerprint_frame(&b));
}

#[test]
fn frame_index_alone_does_not_change_the_fingerprint() {
    let a = frame(120);
    let mut b = a.clone();
    b.frame = FrameIndex(999);
    assert_eq!(fingerprint_frame(&a), fingerprint_frame(&b));
}

#[test]
fn combined_digest_is_order_sensitive() {
    let a = fingerprint_frame(&frame(10));
    let b = fingerprint_frame(&frame(20));
    assert_ne!(combine_fingerprints([&a, &b]), combine_fingerprints([&b, &a]));
    assert_eq!(combine_fingerprints([&a, &b]), combine_fingerprints(&[a, b]));
    assert_eq!(a.to_string().len(), 32);
}
