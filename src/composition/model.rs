use std::{collections::BTreeSet, fs::File, io::BufReader, path::Path};

use serde::Deserialize;

use crate::{
    animation::spring::measure_spring,
    bind::{
        chrome::ChromeConfig,
        properties::{EntityKind, MotionProfile, stagger_delay},
    },
    foundation::{
        core::Fps,
        error::{FramecastError, FramecastResult},
    },
    timeline::config::{SceneParams, TimelineConfig},
};

/// Entrances further than this from rest when their scene ends are reported.
const SETTLE_THRESHOLD: f64 = 0.005;

/// A looping multi-scene composition: timeline, motion curves, overlay and scene content.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Composition {
    /// Scene cadence and crossfade timing.
    pub timeline: TimelineConfig,
    /// Springs shared by every entity.
    #[serde(default)]
    pub motion: MotionProfile,
    /// Persistent overlay fades.
    #[serde(default)]
    pub chrome: ChromeConfig,
    /// One definition per scene, in timeline order.
    pub scenes: Vec<SceneDef>,
}

/// Content of one scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneDef {
    /// Human-readable scene name.
    pub label: String,
    /// Staggered entity groups in declaration order.
    #[serde(default)]
    pub groups: Vec<GroupDef>,
}

/// Entities sharing a base delay and a per-item stagger.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroupDef {
    /// Group identifier, unique within its scene.
    pub id: String,
    /// Delay of the first item, relative to the scene start.
    #[serde(default)]
    pub base_delay: DelayDef,
    /// Extra frames added per item index.
    #[serde(default)]
    pub stagger: i64,
    /// Items of the group.
    pub entities: Vec<EntityDef>,
}

/// One animated element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EntityDef {
    /// Entity identifier, unique within its scene.
    pub id: String,
    /// Frames added on top of the group's staggered delay.
    #[serde(default)]
    pub delay: i64,
    /// What the entity is.
    #[serde(flatten)]
    pub kind: EntityKind,
}

/// A delay written either in frames or in seconds.
///
/// JSON accepts `12`, `{"frames": 12}` or `{"secs": 0.4}`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayDef {
    /// Whole frames.
    Frames(i64),
    /// Seconds, rounded to the nearest frame.
    Secs(f64),
}

impl Default for DelayDef {
    fn default() -> Self {
        Self::Frames(0)
    }
}

impl<'de> Deserialize<'de> for DelayDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Whole(i64),
            Frames { frames: i64 },
            Secs { secs: f64 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Whole(frames) | Repr::Frames { frames } => Ok(Self::Frames(frames)),
            Repr::Secs { secs } => Ok(Self::Secs(secs)),
        }
    }
}

impl DelayDef {
    /// Delay in frames at `fps`. Negative or non-finite delays are rejected.
    pub fn to_frames(self, fps: Fps) -> FramecastResult<u64> {
        match self {
            Self::Frames(frames) => u64::try_from(frames).map_err(|_| {
                FramecastError::invalid_config(format!("delay must be >= 0, got {frames} frames"))
            }),
            Self::Secs(secs) if secs.is_finite() && secs >= 0.0 => {
                Ok(fps.secs_to_frames_round(secs))
            }
            Self::Secs(secs) => Err(FramecastError::invalid_config(format!(
                "delay must be finite and >= 0, got {secs}s"
            ))),
        }
    }
}

/// An entity together with its absolute delay inside the scene.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedEntity<'a> {
    /// Declaring group.
    pub group: &'a GroupDef,
    /// The entity itself.
    pub entity: &'a EntityDef,
    /// `base_delay + index * stagger + delay`, in frames.
    pub delay_frames: u64,
}

impl SceneDef {
    /// Entities in declaration order with their delays resolved at `fps`.
    pub fn resolve_entities(&self, fps: Fps) -> FramecastResult<Vec<ResolvedEntity<'_>>> {
        let mut out = Vec::with_capacity(self.groups.iter().map(|g| g.entities.len()).sum());
        for group in &self.groups {
            let base = group.base_delay.to_frames(fps)?;
            let stagger = u64::try_from(group.stagger).map_err(|_| {
                FramecastError::invalid_config(format!(
                    "group '{}' stagger must be >= 0, got {}",
                    group.id, group.stagger
                ))
            })?;
            for (index, entity) in group.entities.iter().enumerate() {
                let own = u64::try_from(entity.delay).map_err(|_| {
                    FramecastError::invalid_config(format!(
                        "entity '{}' delay must be >= 0, got {}",
                        entity.id, entity.delay
                    ))
                })?;
                out.push(ResolvedEntity {
                    group,
                    entity,
                    delay_frames: stagger_delay(base, index, stagger).saturating_add(own),
                });
            }
        }
        Ok(out)
    }
}

impl Composition {
    /// Parse a composition from JSON text and validate it.
    pub fn from_json_str(s: &str) -> FramecastResult<Self> {
        let comp: Self = serde_json::from_str(s)
            .map_err(|e| FramecastError::serde(format!("parse composition JSON: {e}")))?;
        comp.validate()?;
        comp.report_unsettled_entrances();
        Ok(comp)
    }

    /// Parse a composition from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> FramecastResult<Self> {
        let comp: Self = serde_json::from_reader(r)
            .map_err(|e| FramecastError::serde(format!("parse composition JSON: {e}")))?;
        comp.validate()?;
        comp.report_unsettled_entrances();
        Ok(comp)
    }

    /// Parse a composition from a JSON file on disk and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> FramecastResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            anyhow::Error::new(e).context(format!("open composition JSON '{}'", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Derived frame-level timeline parameters.
    pub fn scene_params(&self) -> FramecastResult<SceneParams> {
        self.timeline.scene_params()
    }

    /// Check timeline, curves, overlay and every scene.
    pub fn validate(&self) -> FramecastResult<()> {
        let params = self.scene_params()?;
        self.motion.validate()?;
        self.chrome.validate()?;

        if self.scenes.len() != params.scene_count() as usize {
            return Err(FramecastError::invalid_config(format!(
                "timeline declares {} scenes but {} are defined",
                params.scene_count(),
                self.scenes.len()
            )));
        }

        for scene in &self.scenes {
            let mut ids = BTreeSet::new();
            for group in &scene.groups {
                for id in std::iter::once(&group.id).chain(group.entities.iter().map(|e| &e.id)) {
                    if id.trim().is_empty() {
                        return Err(FramecastError::invalid_config(format!(
                            "scene '{}' has an empty id",
                            scene.label
                        )));
                    }
                    if !ids.insert(id.as_str()) {
                        return Err(FramecastError::invalid_config(format!(
                            "scene '{}' declares id '{id}' twice",
                            scene.label
                        )));
                    }
                }
                for entity in &group.entities {
                    entity.kind.validate()?;
                }
            }
            scene.resolve_entities(self.timeline.fps)?;
        }
        Ok(())
    }

    /// Log entities whose entrance is still moving when their scene fades out.
    ///
    /// Assumes the composition has been validated.
    pub fn report_unsettled_entrances(&self) {
        let Ok(params) = self.scene_params() else {
            return;
        };
        let fps = self.timeline.fps;
        let settle = match measure_spring(fps, &self.motion.entrance, SETTLE_THRESHOLD) {
            Ok(frames) => frames,
            Err(err) => {
                tracing::warn!(error = %err, "entrance spring never settles");
                return;
            }
        };
        let fade_out_at = params
            .scene_duration_frames()
            .saturating_sub(params.transition_frames());

        for scene in &self.scenes {
            let Ok(entities) = scene.resolve_entities(fps) else {
                continue;
            };
            let unsettled: Vec<&str> = entities
                .iter()
                .filter(|r| r.delay_frames.saturating_add(settle) > fade_out_at)
                .map(|r| r.entity.id.as_str())
                .collect();
            if !unsettled.is_empty() {
                tracing::warn!(
                    scene = %scene.label,
                    entities = ?unsettled,
                    settle_frames = settle,
                    fade_out_at,
                    "entrances still moving when the scene fades out"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
