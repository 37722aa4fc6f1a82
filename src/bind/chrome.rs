use crate::{
    animation::interp::{Extrapolate, InterpolateOpts, interpolate_range},
    foundation::{
        core::{Fps, FrameIndex},
        error::{FramecastError, FramecastResult},
    },
};

/// Fade timings of the persistent overlay drawn above every scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Logo fade-in length from frame 0.
    pub logo_fade_secs: f64,
    /// Footer fade-in window `[start, end]` in seconds.
    pub footer_fade_secs: [f64; 2],
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            logo_fade_secs: 0.5,
            footer_fade_secs: [0.8, 1.2],
        }
    }
}

impl ChromeConfig {
    /// Reject non-finite or negative timings and inverted footer windows.
    pub fn validate(&self) -> FramecastResult<()> {
        let [start, end] = self.footer_fade_secs;
        let all_valid = [self.logo_fade_secs, start, end]
            .iter()
            .all(|s| s.is_finite() && *s >= 0.0);
        if !all_valid || start > end {
            return Err(FramecastError::invalid_config(format!(
                "chrome fades must be finite, >= 0 and ordered, got logo {} footer {:?}",
                self.logo_fade_secs, self.footer_fade_secs
            )));
        }
        Ok(())
    }
}

/// Overlay state at one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ChromeState {
    /// Logo opacity in `[0, 1]`.
    pub logo_opacity: f64,
    /// Footer opacity in `[0, 1]`.
    pub footer_opacity: f64,
    /// One progress dot per scene; only the current scene is lit.
    pub progress: Vec<bool>,
}

/// Overlay state at absolute `frame`.
pub fn chrome_state(
    frame: FrameIndex,
    fps: Fps,
    current_scene: u32,
    scene_count: u32,
    cfg: &ChromeConfig,
) -> FramecastResult<ChromeState> {
    if current_scene >= scene_count {
        return Err(FramecastError::scene_out_of_range(current_scene, scene_count));
    }
    let f = frame.0 as f64;
    let rate = fps.as_f64();
    let [footer_start, footer_end] = cfg.footer_fade_secs;

    let logo_opacity = interpolate_range(
        f,
        [0.0, rate * cfg.logo_fade_secs],
        [0.0, 1.0],
        InterpolateOpts::new(Extrapolate::Extend, Extrapolate::Clamp),
    )?;
    let footer_opacity = interpolate_range(
        f,
        [rate * footer_start, rate * footer_end],
        [0.0, 1.0],
        InterpolateOpts::CLAMP,
    )?;

    Ok(ChromeState {
        logo_opacity,
        footer_opacity,
        progress: (0..scene_count).map(|i| i == current_scene).collect(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/bind/chrome.rs"]
mod tests;
