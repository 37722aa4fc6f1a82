use smallvec::SmallVec;

use crate::{
    animation::interp::{InterpolateOpts, interpolate_range},
    foundation::{
        core::{FrameIndex, FrameRange},
        error::{FramecastError, FramecastResult},
    },
    timeline::config::SceneParams,
};

/// Composite blend state of one scene at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SceneWeight {
    /// Crossfade opacity in `[0, 1]`.
    pub opacity: f64,
    /// Entry/exit zoom around 1.
    pub scale_accent: f64,
}

/// Logical span of a scene on the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SceneWindow {
    /// Scene index in `[0, scene_count)`.
    pub index: u32,
    /// `[index * duration, (index + 1) * duration)`.
    pub range: FrameRange,
}

impl SceneParams {
    /// Window of scene `index`.
    pub fn window(&self, index: u32) -> FramecastResult<SceneWindow> {
        if index >= self.scene_count() {
            return Err(FramecastError::scene_out_of_range(
                index,
                self.scene_count(),
            ));
        }
        let start = u64::from(index) * self.scene_duration_frames();
        Ok(SceneWindow {
            index,
            range: FrameRange {
                start: FrameIndex(start),
                end: FrameIndex(start + self.scene_duration_frames()),
            },
        })
    }

    /// All windows in timeline order.
    pub fn windows(&self) -> impl Iterator<Item = SceneWindow> + '_ {
        (0..self.scene_count()).filter_map(|i| self.window(i).ok())
    }

    /// The window whose logical span contains `frame`, if any.
    pub fn mounted_scene(&self, frame: FrameIndex) -> Option<SceneWindow> {
        let index = frame.0 / self.scene_duration_frames();
        u32::try_from(index).ok().and_then(|i| self.window(i).ok())
    }

    /// Dominant scene for progress indicators, clamped to the last scene.
    pub fn current_scene_index(&self, frame: FrameIndex) -> u32 {
        let index = frame.0 / self.scene_duration_frames();
        let last = self.scene_count() - 1;
        u32::try_from(index).map_or(last, |i| i.min(last))
    }
}

fn ramp(frame: f64, from: u64, to: u64, values: [f64; 2]) -> FramecastResult<f64> {
    interpolate_range(
        frame,
        [from as f64, to as f64],
        values,
        InterpolateOpts::CLAMP,
    )
}

/// Opacity and scale accent of scene `scene_index` at `frame`.
///
/// The last scene additionally fades against the end of the composition so that playback can
/// wrap from the final frame back to frame 0 without a visible seam.
pub fn scene_visual_weight(
    frame: FrameIndex,
    scene_index: u32,
    params: &SceneParams,
) -> FramecastResult<SceneWeight> {
    let window = params.window(scene_index)?;
    let start = window.range.start.0;
    let end = window.range.end.0;
    let tr = params.transition_frames();
    let total = params.total_duration_frames();
    let f = frame.0 as f64;
    let is_last = scene_index + 1 == params.scene_count();

    let fade_in = ramp(f, start, start + tr, [0.0, 1.0])?;
    let fade_out = ramp(f, end - tr, end, [1.0, 0.0])?;

    let scale_in = ramp(f, start, start + tr, [params.scale_in_from(), 1.0])?;
    let scale_out = ramp(f, end - tr, end, [1.0, params.scale_out_to()])?;

    if is_last {
        let loop_fade_out = ramp(f, total - tr, total, [1.0, 0.0])?;
        let loop_scale_out = ramp(f, total - tr, total, [1.0, params.scale_out_to()])?;
        return Ok(SceneWeight {
            opacity: fade_in * fade_out.min(loop_fade_out),
            scale_accent: scale_in * scale_out.min(loop_scale_out),
        });
    }

    // The scale curve switches at the window midpoint, not at the fade edges.
    let midpoint = (start + end) as f64 / 2.0;
    Ok(SceneWeight {
        opacity: fade_in * fade_out,
        scale_accent: if f < midpoint { scale_in } else { scale_out },
    })
}

/// Scenes with non-zero opacity at `frame`, in index order. Never more than two.
pub fn active_scenes(
    frame: FrameIndex,
    params: &SceneParams,
) -> FramecastResult<SmallVec<[(u32, SceneWeight); 2]>> {
    let current = params.current_scene_index(frame);
    let first = current.saturating_sub(1);
    let last = (current + 1).min(params.scene_count() - 1);

    let mut out = SmallVec::new();
    for index in first..=last {
        let weight = scene_visual_weight(frame, index, params)?;
        if weight.opacity > 0.0 {
            out.push((index, weight));
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/sequencer.rs"]
mod tests;
