use smallvec::SmallVec;

use crate::{
    animation::ease::Ease,
    foundation::error::{FramecastError, FramecastResult},
};

/// Behaviour for inputs that fall outside the first/last threshold of a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Hold the edge value.
    #[default]
    Clamp,
    /// Continue the slope of the outermost segment.
    Extend,
}

/// Per-side extrapolation policy plus the easing applied inside segments.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InterpolateOpts {
    /// Policy for inputs below the first threshold.
    #[serde(default)]
    pub left: Extrapolate,
    /// Policy for inputs above the last threshold.
    #[serde(default)]
    pub right: Extrapolate,
    /// Easing applied to normalized progress within the containing segment.
    #[serde(default)]
    pub ease: Ease,
}

impl InterpolateOpts {
    /// Clamp on both sides, linear segments.
    pub const CLAMP: Self = Self {
        left: Extrapolate::Clamp,
        right: Extrapolate::Clamp,
        ease: Ease::Linear,
    };

    /// Extend on both sides, linear segments.
    pub const EXTEND: Self = Self {
        left: Extrapolate::Extend,
        right: Extrapolate::Extend,
        ease: Ease::Linear,
    };

    /// Explicit per-side policies with linear segments.
    pub fn new(left: Extrapolate, right: Extrapolate) -> Self {
        Self {
            left,
            right,
            ease: Ease::Linear,
        }
    }

    /// Replace the in-segment easing.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// One `(input threshold, output value)` pair.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Breakpoint {
    /// Input threshold.
    pub input: f64,
    /// Output at `input`.
    pub output: f64,
}

/// Validated piecewise-linear function: at least two points, finite, thresholds non-decreasing.
///
/// Equal adjacent thresholds are allowed and describe a step.
#[derive(Clone, Debug, PartialEq)]
pub struct BreakpointTable {
    points: SmallVec<[Breakpoint; 4]>,
}

impl BreakpointTable {
    /// Build a table from `(input, output)` pairs.
    pub fn new(points: impl IntoIterator<Item = (f64, f64)>) -> FramecastResult<Self> {
        let points: SmallVec<[Breakpoint; 4]> = points
            .into_iter()
            .map(|(input, output)| Breakpoint { input, output })
            .collect();

        if points.len() < 2 {
            return Err(FramecastError::invalid_domain(format!(
                "breakpoint table needs at least 2 points, got {}",
                points.len()
            )));
        }
        if let Some(p) = points
            .iter()
            .find(|p| !p.input.is_finite() || !p.output.is_finite())
        {
            return Err(FramecastError::invalid_domain(format!(
                "breakpoint ({}, {}) is not finite",
                p.input, p.output
            )));
        }
        if let Some(w) = points.windows(2).find(|w| w[1].input < w[0].input) {
            return Err(FramecastError::invalid_domain(format!(
                "thresholds must be non-decreasing ({} follows {})",
                w[1].input, w[0].input
            )));
        }
        Ok(Self { points })
    }

    /// Two-point table mapping `[in0, in1]` onto `[out0, out1]`.
    pub fn two(input: [f64; 2], output: [f64; 2]) -> FramecastResult<Self> {
        Self::new([(input[0], output[0]), (input[1], output[1])])
    }

    /// Breakpoints in threshold order.
    pub fn points(&self) -> &[Breakpoint] {
        &self.points
    }
}

/// Map `input` through `table`.
///
/// Inside the domain the containing segment `[t_i, t_{i+1}]` is chosen with the right-hand
/// point winning ties, so a zero-width segment behaves as a step that takes its right value
/// at the threshold. A NaN input maps to the first output.
pub fn interpolate(input: f64, table: &BreakpointTable, opts: InterpolateOpts) -> f64 {
    let pts = table.points();
    let n = pts.len();
    let first = pts[0];
    let last = pts[n - 1];

    if input.is_nan() {
        return first.output;
    }
    if input < first.input {
        return match opts.left {
            Extrapolate::Clamp => first.output,
            Extrapolate::Extend => extend_segment(pts[0], pts[1], input),
        };
    }
    if input > last.input {
        return match opts.right {
            Extrapolate::Clamp => last.output,
            Extrapolate::Extend => extend_segment(pts[n - 2], pts[n - 1], input),
        };
    }
    if input == last.input {
        return last.output;
    }

    // first.input <= input < last.input, so 1 <= idx <= n - 1 and the segment has width > 0.
    let idx = pts.partition_point(|p| p.input <= input);
    let a = pts[idx - 1];
    let b = pts[idx];
    let t = (input - a.input) / (b.input - a.input);
    a.output + (b.output - a.output) * opts.ease.apply(t)
}

/// Two-point convenience form of [`interpolate`].
pub fn interpolate_range(
    input: f64,
    domain: [f64; 2],
    range: [f64; 2],
    opts: InterpolateOpts,
) -> FramecastResult<f64> {
    let table = BreakpointTable::two(domain, range)?;
    Ok(interpolate(input, &table, opts))
}

fn extend_segment(a: Breakpoint, b: Breakpoint, input: f64) -> f64 {
    let dv = b.output - a.output;
    let width = b.input - a.input;
    if dv == 0.0 {
        return a.output;
    }
    if width == 0.0 {
        // A step has no slope to continue.
        return if input < a.input { a.output } else { b.output };
    }
    a.output + dv * ((input - a.input) / width)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
