//! Framecast is a deterministic, frame-driven animation engine.
//!
//! Every visual property is a pure function of an integer frame index: there is no clock and no
//! state carried between frames, so frames can be evaluated in any order or in parallel with
//! bit-identical results. The building blocks are:
//!
//! - [`interpolate`] over a [`BreakpointTable`] with per-side [`Extrapolate`] policies
//! - [`spring_value`], a closed-form damped-spring step response
//! - [`SceneParams`], which tiles scenes on a looping timeline and crossfades them
//! - [`bind_entity`], which turns a declared entity into a [`PropertyBag`]
//!
//! A [`Composition`] ties these together and [`Evaluator`] / [`evaluate_range`] evaluate it.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod bind;
pub(crate) mod composition;
pub(crate) mod eval;
pub(crate) mod timeline;

pub use crate::foundation::core::{Fps, FrameIndex, FrameRange, Vec2};
pub use crate::foundation::error::{FramecastError, FramecastResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::interp::{
    Breakpoint, BreakpointTable, Extrapolate, InterpolateOpts, interpolate, interpolate_range,
};
pub use crate::animation::spring::{SpringConfig, measure_spring, spring_value};
pub use crate::bind::chrome::{ChromeConfig, ChromeState, chrome_state};
pub use crate::bind::properties::{
    EntityKind, MAX_COUNTER_MAGNITUDE, MotionProfile, PropertyBag, bind_entity, stagger_delay,
};
pub use crate::composition::dsl::{CompositionBuilder, GroupBuilder, SceneBuilder, entity};
pub use crate::composition::model::{
    Composition, DelayDef, EntityDef, GroupDef, ResolvedEntity, SceneDef,
};
pub use crate::eval::evaluator::{EvaluatedEntity, EvaluatedFrame, EvaluatedScene, Evaluator};
pub use crate::eval::fingerprint::{FrameFingerprint, combine_fingerprints, fingerprint_frame};
pub use crate::eval::range::{
    EvalThreading, RangeStats, evaluate_range, evaluate_range_with_stats,
};
pub use crate::timeline::config::{SceneParams, TimelineConfig};
pub use crate::timeline::sequencer::{
    SceneWeight, SceneWindow, active_scenes, scene_visual_weight,
};
