use crate::{
    bind::{
        chrome::{ChromeState, chrome_state},
        properties::{PropertyBag, bind_entity_unchecked},
    },
    composition::model::Composition,
    foundation::{
        core::FrameIndex,
        error::{FramecastError, FramecastResult},
    },
    timeline::{
        config::SceneParams,
        sequencer::{SceneWeight, scene_visual_weight},
    },
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything visible at one frame of a composition.
pub struct EvaluatedFrame {
    /// Evaluated frame index.
    pub frame: FrameIndex,
    /// Scene marked by the progress indicator.
    pub current_scene: u32,
    /// Scene whose window contains the frame, if any.
    pub scene: Option<EvaluatedScene>,
    /// Overlay drawn above every scene.
    pub chrome: ChromeState,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Mounted scene with its blend weight and entity properties.
pub struct EvaluatedScene {
    /// Scene index.
    pub index: u32,
    /// Scene label.
    pub label: String,
    /// Frame relative to the scene start.
    pub local_frame: FrameIndex,
    /// Crossfade opacity and zoom accent.
    pub weight: SceneWeight,
    /// Entities in declaration order.
    pub entities: Vec<EvaluatedEntity>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One entity's resolved properties.
pub struct EvaluatedEntity {
    /// Entity identifier.
    pub id: String,
    /// Declaring group.
    pub group: String,
    /// Absolute delay inside the scene.
    pub delay_frames: u64,
    /// Bound properties.
    pub props: PropertyBag,
}

/// Stateless evaluator from composition timeline to per-frame properties.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(comp))]
    /// Validate `comp` and evaluate one frame.
    pub fn eval_frame(comp: &Composition, frame: FrameIndex) -> FramecastResult<EvaluatedFrame> {
        comp.validate()?;
        let params = comp.scene_params()?;
        Self::eval_frame_unchecked(comp, &params, frame)
    }

    /// Evaluate one frame of a composition that has already been validated.
    pub(crate) fn eval_frame_unchecked(
        comp: &Composition,
        params: &SceneParams,
        frame: FrameIndex,
    ) -> FramecastResult<EvaluatedFrame> {
        if frame.0 >= params.total_duration_frames() {
            return Err(FramecastError::evaluation(format!(
                "frame {} is out of bounds for a {}-frame composition",
                frame.0,
                params.total_duration_frames()
            )));
        }

        let fps = comp.timeline.fps;
        let current_scene = params.current_scene_index(frame);
        let chrome = chrome_state(
            frame,
            fps,
            current_scene,
            params.scene_count(),
            &comp.chrome,
        )?;

        let scene = match params.mounted_scene(frame) {
            Some(window) => {
                let def = comp
                    .scenes
                    .get(window.index as usize)
                    .ok_or_else(|| {
                        FramecastError::scene_out_of_range(window.index, comp.scenes.len() as u32)
                    })?;
                let local_frame = FrameIndex(frame.0 - window.range.start.0);
                let entities = def
                    .resolve_entities(fps)?
                    .into_iter()
                    .map(|r| {
                        Ok(EvaluatedEntity {
                            id: r.entity.id.clone(),
                            group: r.group.id.clone(),
                            delay_frames: r.delay_frames,
                            props: bind_entity_unchecked(
                                &r.entity.kind,
                                r.delay_frames,
                                local_frame,
                                fps,
                                &comp.motion,
                            )?,
                        })
                    })
                    .collect::<FramecastResult<Vec<_>>>()?;
                Some(EvaluatedScene {
                    index: window.index,
                    label: def.label.clone(),
                    local_frame,
                    weight: scene_visual_weight(frame, window.index, params)?,
                    entities,
                })
            }
            None => None,
        };

        Ok(EvaluatedFrame {
            frame,
            current_scene,
            scene,
            chrome,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
