use crate::{
    bind::properties::PropertyBag,
    eval::evaluator::EvaluatedFrame,
    foundation::math::Fnv1a64,
};

const SECOND_LANE_SEED: u64 = 0x9ae1_6a3b_2f90_404f;

/// 128-bit digest of an evaluated frame.
///
/// Covers what a renderer would draw: ids, weights, properties and overlay state, with floats
/// compared by bit pattern. Frame indices are left out so that visually identical frames
/// share a fingerprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct FrameFingerprint {
    /// First FNV-1a lane.
    pub hi: u64,
    /// Second FNV-1a lane.
    pub lo: u64,
}

impl std::fmt::Display for FrameFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

struct Lanes {
    a: Fnv1a64,
    b: Fnv1a64,
}

impl Lanes {
    fn new() -> Self {
        Self {
            a: Fnv1a64::new_default(),
            b: Fnv1a64::new(SECOND_LANE_SEED),
        }
    }

    fn u8(&mut self, v: u8) {
        self.a.write_u8(v);
        self.b.write_u8(v);
    }

    fn u32(&mut self, v: u32) {
        self.a.write_u32(v);
        self.b.write_u32(v);
    }

    fn u64(&mut self, v: u64) {
        self.a.write_u64(v);
        self.b.write_u64(v);
    }

    fn f64(&mut self, v: f64) {
        self.a.write_f64(v);
        self.b.write_f64(v);
    }

    fn str(&mut self, s: &str) {
        self.u64(s.len() as u64);
        self.a.write_bytes(s.as_bytes());
        self.b.write_bytes(s.as_bytes());
    }

    fn props(&mut self, p: &PropertyBag) {
        self.f64(p.opacity);
        self.f64(p.scale);
        self.f64(p.translate.x);
        self.f64(p.translate.y);
        self.f64(p.fill_ratio);
        match p.display_value {
            Some(v) => {
                self.u8(1);
                self.u64(v as u64);
            }
            None => self.u8(0),
        }
    }

    fn finish(self) -> FrameFingerprint {
        FrameFingerprint {
            hi: self.a.finish(),
            lo: self.b.finish(),
        }
    }
}

/// Digest of the visible state of `frame`.
pub fn fingerprint_frame(frame: &EvaluatedFrame) -> FrameFingerprint {
    let mut h = Lanes::new();
    h.u32(frame.current_scene);

    h.f64(frame.chrome.logo_opacity);
    h.f64(frame.chrome.footer_opacity);
    h.u64(frame.chrome.progress.len() as u64);
    for &dot in &frame.chrome.progress {
        h.u8(u8::from(dot));
    }

    match &frame.scene {
        Some(scene) => {
            h.u8(1);
            h.u32(scene.index);
            h.str(&scene.label);
            h.f64(scene.weight.opacity);
            h.f64(scene.weight.scale_accent);
            h.u64(scene.entities.len() as u64);
            for e in &scene.entities {
                h.str(&e.id);
                h.str(&e.group);
                h.u64(e.delay_frames);
                h.props(&e.props);
            }
        }
        None => h.u8(0),
    }

    h.finish()
}

/// Order-sensitive digest of a sequence of frame fingerprints.
pub fn combine_fingerprints<'a>(
    prints: impl IntoIterator<Item = &'a FrameFingerprint>,
) -> FrameFingerprint {
    let mut h = Lanes::new();
    for p in prints {
        h.u64(p.hi);
        h.u64(p.lo);
    }
    h.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/eval/fingerprint.rs"]
mod tests;
