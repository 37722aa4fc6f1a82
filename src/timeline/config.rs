use crate::foundation::{
    core::Fps,
    error::{FramecastError, FramecastResult},
};

fn default_scale_in_from() -> f64 {
    0.97
}

fn default_scale_out_to() -> f64 {
    1.02
}

/// Timeline knobs as authored, in seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineConfig {
    /// Composition frame rate.
    pub fps: Fps,
    /// Length of every scene window.
    pub scene_duration_secs: f64,
    /// Width of the fade at each scene boundary.
    pub transition_secs: f64,
    /// Number of consecutive scenes.
    pub scene_count: u32,
    /// Scale a scene enters from.
    #[serde(default = "default_scale_in_from")]
    pub scale_in_from: f64,
    /// Scale a scene exits to.
    #[serde(default = "default_scale_out_to")]
    pub scale_out_to: f64,
    /// Explicit composition length. Defaults to `scene_count` whole scenes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration_frames: Option<u64>,
}

impl TimelineConfig {
    /// Config with the default scale accents and a length of `scene_count` whole scenes.
    pub fn new(fps: Fps, scene_duration_secs: f64, transition_secs: f64, scene_count: u32) -> Self {
        Self {
            fps,
            scene_duration_secs,
            transition_secs,
            scene_count,
            scale_in_from: default_scale_in_from(),
            scale_out_to: default_scale_out_to(),
            total_duration_frames: None,
        }
    }

    /// Resolve seconds into frame counts and validate the result.
    pub fn scene_params(&self) -> FramecastResult<SceneParams> {
        for (name, secs) in [
            ("scene_duration_secs", self.scene_duration_secs),
            ("transition_secs", self.transition_secs),
        ] {
            if !(secs.is_finite() && secs >= 0.0) {
                return Err(FramecastError::invalid_config(format!(
                    "{name} must be finite and >= 0, got {secs}"
                )));
            }
        }

        let params = SceneParams::new(
            self.fps.secs_to_frames_round(self.scene_duration_secs),
            self.fps.secs_to_frames_round(self.transition_secs),
            self.scene_count,
        )?
        .with_scale_accents(self.scale_in_from, self.scale_out_to)?;

        match self.total_duration_frames {
            Some(total) => params.with_total_duration(total),
            None => Ok(params),
        }
    }

    /// Validate without keeping the resolved params.
    pub fn validate(&self) -> FramecastResult<()> {
        self.scene_params().map(|_| ())
    }
}

/// Frame-domain scene layout: equal windows tiling `[0, scene_count * scene_duration_frames)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SceneParams {
    scene_duration_frames: u64,
    transition_frames: u64,
    scene_count: u32,
    total_duration_frames: u64,
    scale_in_from: f64,
    scale_out_to: f64,
}

impl SceneParams {
    /// Requires at least one scene, non-empty windows and `2 * transition <= scene duration`.
    pub fn new(
        scene_duration_frames: u64,
        transition_frames: u64,
        scene_count: u32,
    ) -> FramecastResult<Self> {
        if scene_count == 0 {
            return Err(FramecastError::invalid_config("scene_count must be >= 1"));
        }
        if scene_duration_frames == 0 {
            return Err(FramecastError::invalid_config(
                "scene duration must be at least one frame",
            ));
        }
        if transition_frames.saturating_mul(2) > scene_duration_frames {
            return Err(FramecastError::invalid_config(format!(
                "transition ({transition_frames} frames) must fit twice into a scene \
                 ({scene_duration_frames} frames)"
            )));
        }
        let total_duration_frames = scene_duration_frames
            .checked_mul(u64::from(scene_count))
            .ok_or_else(|| FramecastError::invalid_config("timeline length overflows u64"))?;

        Ok(Self {
            scene_duration_frames,
            transition_frames,
            scene_count,
            total_duration_frames,
            scale_in_from: default_scale_in_from(),
            scale_out_to: default_scale_out_to(),
        })
    }

    /// Override the entry/exit zoom endpoints.
    pub fn with_scale_accents(mut self, scale_in_from: f64, scale_out_to: f64) -> FramecastResult<Self> {
        if !(scale_in_from.is_finite() && scale_out_to.is_finite()) {
            return Err(FramecastError::invalid_config("scale accents must be finite"));
        }
        self.scale_in_from = scale_in_from;
        self.scale_out_to = scale_out_to;
        Ok(self)
    }

    /// Override the composition length used by the loop-closing fade.
    pub fn with_total_duration(mut self, total_duration_frames: u64) -> FramecastResult<Self> {
        if total_duration_frames == 0 || total_duration_frames < self.transition_frames {
            return Err(FramecastError::invalid_config(format!(
                "total duration ({total_duration_frames} frames) must be >= 1 and cover one \
                 transition ({} frames)",
                self.transition_frames
            )));
        }
        self.total_duration_frames = total_duration_frames;
        Ok(self)
    }

    /// Frames per scene window.
    pub fn scene_duration_frames(&self) -> u64 {
        self.scene_duration_frames
    }

    /// Frames per boundary fade.
    pub fn transition_frames(&self) -> u64 {
        self.transition_frames
    }

    /// Number of scenes.
    pub fn scene_count(&self) -> u32 {
        self.scene_count
    }

    /// Composition length in frames.
    pub fn total_duration_frames(&self) -> u64 {
        self.total_duration_frames
    }

    /// Scale at the first frame of a scene.
    pub fn scale_in_from(&self) -> f64 {
        self.scale_in_from
    }

    /// Scale at the last frame of a scene.
    pub fn scale_out_to(&self) -> f64 {
        self.scale_out_to
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/config.rs"]
mod tests;
