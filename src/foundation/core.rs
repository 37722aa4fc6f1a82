use crate::foundation::error::{FramecastError, FramecastResult};

pub use kurbo::Vec2;

/// Absolute frame index on the composition timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> FramecastResult<Self> {
        if start.0 > end.0 {
            return Err(FramecastError::invalid_config(
                "FrameRange start must be <= end",
            ));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// True when the range covers no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Split into consecutive sub-ranges of at most `chunk` frames.
    pub fn chunks(self, chunk: u64) -> impl Iterator<Item = FrameRange> {
        let chunk = chunk.max(1);
        let end = self.end.0;
        (self.start.0..end)
            .step_by(chunk as usize)
            .map(move |s| FrameRange {
                start: FrameIndex(s),
                end: FrameIndex(s.saturating_add(chunk).min(end)),
            })
    }
}

/// Denominator used when a frame rate is given as a decimal.
const FLOAT_FPS_DEN: u32 = 1000;

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Rational frame rate (`num / den` frames per second).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build a frame rate, rejecting zero numerator or denominator.
    pub fn new(num: u32, den: u32) -> FramecastResult<Self> {
        if den == 0 {
            return Err(FramecastError::invalid_config("fps den must be > 0"));
        }
        if num == 0 {
            return Err(FramecastError::invalid_config("fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Frame rate from a decimal such as `29.97`, kept to three decimal places and reduced
    /// (`29.97` becomes `2997 / 100`).
    pub fn from_f64(fps: f64) -> FramecastResult<Self> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(FramecastError::invalid_config(format!(
                "fps must be finite and > 0, got {fps}"
            )));
        }
        let scaled = (fps * f64::from(FLOAT_FPS_DEN)).round();
        if scaled < 1.0 || scaled > f64::from(u32::MAX) {
            return Err(FramecastError::invalid_config(format!(
                "fps {fps} is outside the representable range"
            )));
        }
        let num = scaled as u32;
        let g = gcd(num, FLOAT_FPS_DEN);
        Self::new(num / g, FLOAT_FPS_DEN / g)
    }

    /// Convert seconds to frames, rounding half away from zero. Negative input yields 0.
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        (secs * self.as_f64()).round().max(0.0) as u64
    }
}

impl<'de> serde::Deserialize<'de> for Fps {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // `30` is shorthand for `{ "num": 30, "den": 1 }`; `29.97` goes through `from_f64`.
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Whole(u32),
            Ratio { num: u32, den: u32 },
            Decimal(f64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Whole(num) => Fps::new(num, 1),
            Repr::Ratio { num, den } => Fps::new(num, den),
            Repr::Decimal(fps) => Fps::from_f64(fps),
        }
        .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
