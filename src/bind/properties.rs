use smallvec::{SmallVec, smallvec};

use crate::{
    animation::{
        interp::{InterpolateOpts, interpolate_range},
        spring::{SpringConfig, spring_value_unchecked},
    },
    foundation::{
        core::{Fps, FrameIndex, Vec2},
        error::{FramecastError, FramecastResult},
        math::{ratio_or_zero, round_half_up},
    },
};

/// Named curves shared by every entity of a composition.
///
/// Fill and grow springs carry their lag behind the entity's entrance in `delay_frames`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionProfile {
    /// Entrance spring driving opacity, translation and scale.
    pub entrance: SpringConfig,
    /// Ring fill spring.
    pub ring_fill: SpringConfig,
    /// Horizontal bar fill spring.
    pub bar_fill: SpringConfig,
    /// Chart bar grow spring.
    pub chart_grow: SpringConfig,
    /// Length of counting-up displays.
    pub count_secs: f64,
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self {
            entrance: SpringConfig::with_damping(200.0),
            ring_fill: SpringConfig {
                damping: 100.0,
                stiffness: 80.0,
                delay_frames: 5,
                ..SpringConfig::default()
            },
            bar_fill: SpringConfig {
                damping: 80.0,
                stiffness: 60.0,
                delay_frames: 4,
                ..SpringConfig::default()
            },
            chart_grow: SpringConfig {
                damping: 80.0,
                stiffness: 100.0,
                ..SpringConfig::default()
            },
            count_secs: 1.2,
        }
    }
}

impl MotionProfile {
    /// Validate every spring and the counter length.
    pub fn validate(&self) -> FramecastResult<()> {
        self.entrance.validate()?;
        self.ring_fill.validate()?;
        self.bar_fill.validate()?;
        self.chart_grow.validate()?;
        if !(self.count_secs.is_finite() && self.count_secs >= 0.0) {
            return Err(FramecastError::invalid_config(format!(
                "count_secs must be finite and >= 0, got {}",
                self.count_secs
            )));
        }
        Ok(())
    }
}

fn default_hero_count_lag() -> u64 {
    2
}

/// What an entity is, and the targets its fills and counters animate toward.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityKind {
    /// Card that rises 40px into place and counts up to `value`.
    MetricCard {
        /// Final displayed number.
        value: f64,
    },
    /// Scene heading, rises 20px.
    Title,
    /// Item in a stat row, rises 20px.
    Stat,
    /// Headline figure that scales up from 0.9 and counts up to `value`.
    Hero {
        /// Final displayed number.
        value: f64,
        /// Frames between the entrance and the start of the count.
        #[serde(default = "default_hero_count_lag")]
        count_lag_frames: u64,
    },
    /// Circular gauge filled to `current / limit`.
    Ring {
        /// Filled amount.
        current: f64,
        /// Capacity.
        limit: f64,
    },
    /// Horizontal bar that slides in from the left and fills to `value / max`.
    Bar {
        /// Filled amount.
        value: f64,
        /// Full-width amount.
        max: f64,
    },
    /// Chart container, rises 30px.
    Chart,
    /// Column of a chart that grows to `value / max` of the chart height.
    ChartBar {
        /// Column value.
        value: f64,
        /// Largest value in the chart.
        max: f64,
    },
    /// Linear wipe/fade accent running for `duration_secs` from the entity delay.
    Reveal {
        /// Length of the wipe.
        duration_secs: f64,
    },
}

/// Largest counter target, `2^53`. Every integer up to it is exact in `f64` and fits `i64`.
pub const MAX_COUNTER_MAGNITUDE: f64 = 9_007_199_254_740_992.0;

impl EntityKind {
    /// Reject non-finite targets, counters beyond [`MAX_COUNTER_MAGNITUDE`] and negative
    /// reveal lengths.
    pub fn validate(&self) -> FramecastResult<()> {
        let fields: SmallVec<[(&str, f64); 2]> = match self {
            Self::MetricCard { value } | Self::Hero { value, .. } => {
                smallvec![("value", *value)]
            }
            Self::Ring { current, limit } => {
                smallvec![("current", *current), ("limit", *limit)]
            }
            Self::Bar { value, max } | Self::ChartBar { value, max } => {
                smallvec![("value", *value), ("max", *max)]
            }
            Self::Reveal { duration_secs } => {
                if !(duration_secs.is_finite() && *duration_secs >= 0.0) {
                    return Err(FramecastError::invalid_config(format!(
                        "reveal duration_secs must be finite and >= 0, got {duration_secs}"
                    )));
                }
                SmallVec::new()
            }
            Self::Title | Self::Stat | Self::Chart => SmallVec::new(),
        };
        if let Some((name, v)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(FramecastError::invalid_config(format!(
                "entity {name} must be finite, got {v}"
            )));
        }
        if let Self::MetricCard { value } | Self::Hero { value, .. } = self
            && value.abs() > MAX_COUNTER_MAGNITUDE
        {
            return Err(FramecastError::invalid_config(format!(
                "counter value must be within +/-{MAX_COUNTER_MAGNITUDE}, got {value}"
            )));
        }
        Ok(())
    }

    fn entrance_motion(&self) -> EntranceMotion {
        match self {
            Self::MetricCard { .. } => EntranceMotion::Rise(40.0),
            Self::Title | Self::Stat => EntranceMotion::Rise(20.0),
            Self::Chart => EntranceMotion::Rise(30.0),
            Self::Bar { .. } => EntranceMotion::SlideFromLeft(30.0),
            Self::Ring { .. } => EntranceMotion::Grow(0.8),
            Self::Hero { .. } => EntranceMotion::Grow(0.9),
            Self::ChartBar { .. } | Self::Reveal { .. } => EntranceMotion::None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum EntranceMotion {
    /// Vertical offset collapsing to 0.
    Rise(f64),
    /// Negative horizontal offset collapsing to 0.
    SlideFromLeft(f64),
    /// Scale growing to 1.
    Grow(f64),
    None,
}

/// Rendered properties of one entity at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PropertyBag {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Offset from the laid-out position, in pixels.
    pub translate: Vec2,
    /// Fill of rings, bars and chart columns.
    pub fill_ratio: f64,
    /// Integer shown by counters and gauges.
    pub display_value: Option<i64>,
}

impl Default for PropertyBag {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            scale: 1.0,
            translate: Vec2::ZERO,
            fill_ratio: 0.0,
            display_value: None,
        }
    }
}

/// Entity delay for item `index` of a staggered group.
pub fn stagger_delay(base: u64, index: usize, step: u64) -> u64 {
    base.saturating_add((index as u64).saturating_mul(step))
}

/// Compute the property bag of an entity declared with `delay_frames`, at `frame` (local to
/// the scene that hosts it).
pub fn bind_entity(
    kind: &EntityKind,
    delay_frames: u64,
    frame: FrameIndex,
    fps: Fps,
    profile: &MotionProfile,
) -> FramecastResult<PropertyBag> {
    profile.validate()?;
    kind.validate()?;
    bind_entity_unchecked(kind, delay_frames, frame, fps, profile)
}

/// [`bind_entity`] for a profile and kind that have already been validated.
pub(crate) fn bind_entity_unchecked(
    kind: &EntityKind,
    delay_frames: u64,
    frame: FrameIndex,
    fps: Fps,
    profile: &MotionProfile,
) -> FramecastResult<PropertyBag> {
    let entrance = spring_value_unchecked(frame, fps, &profile.entrance.delayed(delay_frames));
    let mut bag = PropertyBag {
        opacity: unit_clamp(entrance)?,
        ..PropertyBag::default()
    };

    match kind.entrance_motion() {
        EntranceMotion::Rise(dy) => bag.translate.y = remap(entrance, dy, 0.0)?,
        EntranceMotion::SlideFromLeft(dx) => bag.translate.x = remap(entrance, -dx, 0.0)?,
        EntranceMotion::Grow(from) => bag.scale = remap(entrance, from, 1.0)?,
        EntranceMotion::None => {}
    }

    match kind {
        EntityKind::MetricCard { value } => {
            let progress = linear_progress(frame, delay_frames, fps, profile.count_secs)?;
            bag.display_value = Some(round_half_up(value * progress) as i64);
        }
        EntityKind::Hero {
            value,
            count_lag_frames,
        } => {
            let count_delay = delay_frames.saturating_add(*count_lag_frames);
            let progress = linear_progress(frame, count_delay, fps, profile.count_secs)?;
            bag.display_value = Some(round_half_up(value * progress) as i64);
        }
        EntityKind::Ring { current, limit } => {
            let fill = spring_value_unchecked(frame, fps, &profile.ring_fill.delayed(delay_frames));
            let ratio = target_ratio(*current, *limit);
            bag.fill_ratio = ratio * fill;
            bag.display_value = Some(round_half_up(ratio * 100.0 * fill) as i64);
        }
        EntityKind::Bar { value, max } => {
            let fill = spring_value_unchecked(frame, fps, &profile.bar_fill.delayed(delay_frames));
            bag.fill_ratio = target_ratio(*value, *max) * fill;
        }
        EntityKind::ChartBar { value, max } => {
            let grow = spring_value_unchecked(frame, fps, &profile.chart_grow.delayed(delay_frames));
            bag.opacity = unit_clamp(grow)?;
            bag.fill_ratio = target_ratio(*value, *max) * grow;
        }
        EntityKind::Reveal { duration_secs } => {
            let progress = linear_progress(frame, delay_frames, fps, *duration_secs)?;
            bag.opacity = progress;
            bag.fill_ratio = progress;
        }
        EntityKind::Title | EntityKind::Stat | EntityKind::Chart => {}
    }

    Ok(bag)
}

/// `min(target / max, 1)`, with `0 / 0` and negative ratios mapped to 0.
fn target_ratio(target: f64, max: f64) -> f64 {
    ratio_or_zero(target, max).clamp(0.0, 1.0)
}

fn unit_clamp(progress: f64) -> FramecastResult<f64> {
    interpolate_range(progress, [0.0, 1.0], [0.0, 1.0], InterpolateOpts::CLAMP)
}

fn remap(progress: f64, from: f64, to: f64) -> FramecastResult<f64> {
    interpolate_range(progress, [0.0, 1.0], [from, to], InterpolateOpts::EXTEND)
}

/// Linear `[0, 1]` progress over `[delay, delay + fps * secs]`.
fn linear_progress(frame: FrameIndex, delay: u64, fps: Fps, secs: f64) -> FramecastResult<f64> {
    let start = delay as f64;
    interpolate_range(
        frame.0 as f64,
        [start, start + fps.as_f64() * secs],
        [0.0, 1.0],
        InterpolateOpts::CLAMP,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/bind/properties.rs"]
mod tests;
