use crate::foundation::{
    core::{Fps, FrameIndex},
    error::{FramecastError, FramecastResult},
};

/// Longest horizon [`measure_spring`] will scan before giving up.
const MAX_SETTLE_SECS: f64 = 3600.0;

/// Damping ratios within this distance below 1 already use the critically damped solution.
const CRITICAL_EPS: f64 = 1e-6;

/// Parameters of a damped harmonic oscillator driven by a unit step.
///
/// Defaults follow the usual motion-graphics convention: mass 1, damping 10, stiffness 100,
/// no delay, overshoot preserved.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Oscillator mass (`> 0`).
    pub mass: f64,
    /// Viscous damping coefficient (`>= 0`).
    pub damping: f64,
    /// Spring stiffness (`> 0`).
    pub stiffness: f64,
    /// Frames to wait before the oscillator starts moving.
    pub delay_frames: u64,
    /// Pin the output to 1 once it first reaches the target.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            damping: 10.0,
            stiffness: 100.0,
            delay_frames: 0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Validated config with no delay.
    pub fn new(mass: f64, damping: f64, stiffness: f64) -> FramecastResult<Self> {
        let cfg = Self {
            mass,
            damping,
            stiffness,
            ..Self::default()
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Default mass and stiffness with the given damping.
    pub fn with_damping(damping: f64) -> Self {
        Self {
            damping,
            ..Self::default()
        }
    }

    /// Copy of this config with `frames` added to its delay.
    pub fn delayed(self, frames: u64) -> Self {
        Self {
            delay_frames: self.delay_frames.saturating_add(frames),
            ..self
        }
    }

    /// Reject non-positive mass/stiffness and negative or non-finite damping.
    pub fn validate(&self) -> FramecastResult<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(FramecastError::invalid_config(format!(
                "spring mass must be finite and > 0, got {}",
                self.mass
            )));
        }
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(FramecastError::invalid_config(format!(
                "spring stiffness must be finite and > 0, got {}",
                self.stiffness
            )));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(FramecastError::invalid_config(format!(
                "spring damping must be finite and >= 0, got {}",
                self.damping
            )));
        }
        Ok(())
    }

    /// Damping ratio `zeta = c / (2 * sqrt(k * m))`.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// True when the response overshoots and oscillates.
    pub fn is_underdamped(&self) -> bool {
        self.damping_ratio() < 1.0 - CRITICAL_EPS
    }

    /// Unit-step response `x(t)` for `t` seconds after the delay, `x(0) = x'(0) = 0`.
    ///
    /// Damping ratios at or above 1 all follow the critically damped curve at `w0 = sqrt(k/m)`,
    /// so extra damping past critical does not slow the rise.
    pub(crate) fn step_response(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let w0 = (self.stiffness / self.mass).sqrt();
        if !self.is_underdamped() {
            return 1.0 - (-w0 * t).exp() * (1.0 + w0 * t);
        }

        let zeta = self.damping_ratio();
        let root = (1.0 - zeta * zeta).sqrt();
        let wd = w0 * root;
        let k = zeta / root;
        if self.overshoot_clamping {
            // First crossing of the target: cos(wd t) + k sin(wd t) = 0.
            let crossing = 1.0f64.atan2(-k) / wd;
            if t >= crossing {
                return 1.0;
            }
        }
        let x = 1.0 - (-zeta * w0 * t).exp() * ((wd * t).cos() + k * (wd * t).sin());

        if self.overshoot_clamping {
            x.min(1.0)
        } else {
            x
        }
    }

    /// Upper bound on `|x(t) - 1|`, non-increasing in `t`.
    fn envelope(&self, t: f64) -> f64 {
        let w0 = (self.stiffness / self.mass).sqrt();
        if !self.is_underdamped() {
            return (-w0 * t).exp() * (1.0 + w0 * t);
        }
        let zeta = self.damping_ratio();
        (-zeta * w0 * t).exp() / (1.0 - zeta * zeta).sqrt()
    }
}

/// Spring progress at `frame`: `0` until `delay_frames` has elapsed, then the step response at
/// `t = (frame - delay_frames) / fps` seconds.
///
/// Under-damped configs exceed 1 transiently unless `overshoot_clamping` is set.
pub fn spring_value(frame: FrameIndex, fps: Fps, config: &SpringConfig) -> FramecastResult<f64> {
    config.validate()?;
    Ok(spring_value_unchecked(frame, fps, config))
}

/// [`spring_value`] for a config that has already been validated.
pub(crate) fn spring_value_unchecked(frame: FrameIndex, fps: Fps, config: &SpringConfig) -> f64 {
    if frame.0 <= config.delay_frames {
        return 0.0;
    }
    let elapsed = (frame.0 - config.delay_frames) as f64;
    config.step_response(elapsed / fps.as_f64())
}

/// Absolute frame (delay included) from which the response stays within `threshold` of 1.
pub fn measure_spring(fps: Fps, config: &SpringConfig, threshold: f64) -> FramecastResult<u64> {
    config.validate()?;
    if !(threshold.is_finite() && threshold > 0.0) {
        return Err(FramecastError::invalid_config(format!(
            "settle threshold must be finite and > 0, got {threshold}"
        )));
    }

    let horizon = fps.secs_to_frames_round(MAX_SETTLE_SECS);
    let rate = fps.as_f64();
    let mut settled_from = 0u64;
    for f in 0..=horizon {
        let t = f as f64 / rate;
        if config.envelope(t) < threshold {
            return Ok(config.delay_frames.saturating_add(settled_from));
        }
        if (config.step_response(t) - 1.0).abs() > threshold {
            settled_from = f + 1;
        }
    }
    Err(FramecastError::invalid_config(format!(
        "spring does not settle within {MAX_SETTLE_SECS}s (damping ratio {:.4})",
        config.damping_ratio()
    )))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
