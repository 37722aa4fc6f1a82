use crate::{
    bind::{
        chrome::ChromeConfig,
        properties::{EntityKind, MotionProfile},
    },
    composition::model::{Composition, DelayDef, EntityDef, GroupDef, SceneDef},
    foundation::error::{FramecastError, FramecastResult},
    timeline::config::TimelineConfig,
};

/// Builder for [`Composition`](crate::Composition).
pub struct CompositionBuilder {
    timeline: TimelineConfig,
    motion: MotionProfile,
    chrome: ChromeConfig,
    scenes: Vec<SceneDef>,
}

impl CompositionBuilder {
    /// Create a builder with default motion curves and overlay timings.
    pub fn new(timeline: TimelineConfig) -> Self {
        Self {
            timeline,
            motion: MotionProfile::default(),
            chrome: ChromeConfig::default(),
            scenes: Vec::new(),
        }
    }

    /// Replace the motion profile.
    pub fn motion(mut self, motion: MotionProfile) -> Self {
        self.motion = motion;
        self
    }

    /// Replace the overlay timings.
    pub fn chrome(mut self, chrome: ChromeConfig) -> Self {
        self.chrome = chrome;
        self
    }

    /// Append the next scene.
    pub fn scene(mut self, scene: SceneDef) -> Self {
        self.scenes.push(scene);
        self
    }

    /// Build and validate final [`Composition`](crate::Composition).
    pub fn build(self) -> FramecastResult<Composition> {
        let comp = Composition {
            timeline: self.timeline,
            motion: self.motion,
            chrome: self.chrome,
            scenes: self.scenes,
        };
        comp.validate()?;
        comp.report_unsettled_entrances();
        Ok(comp)
    }
}

/// Builder for [`SceneDef`](crate::SceneDef) values.
pub struct SceneBuilder {
    label: String,
    groups: Vec<GroupDef>,
}

impl SceneBuilder {
    /// Create a scene builder with required `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            groups: Vec::new(),
        }
    }

    /// Append a group.
    pub fn group(mut self, group: GroupDef) -> Self {
        self.groups.push(group);
        self
    }

    /// Append a single entity as its own group, sharing the entity's id.
    pub fn single(self, id: impl Into<String>, delay: DelayDef, kind: EntityKind) -> Self {
        let id = id.into();
        let group = GroupDef {
            id: format!("{id}.group"),
            base_delay: delay,
            stagger: 0,
            entities: vec![entity(id, kind)],
        };
        self.group(group)
    }

    /// Build validated [`SceneDef`](crate::SceneDef).
    pub fn build(self) -> FramecastResult<SceneDef> {
        if self.label.trim().is_empty() {
            return Err(FramecastError::invalid_config("scene label must be non-empty"));
        }
        Ok(SceneDef {
            label: self.label,
            groups: self.groups,
        })
    }
}

/// Builder for staggered [`GroupDef`](crate::GroupDef) values.
pub struct GroupBuilder {
    id: String,
    base_delay: DelayDef,
    stagger: u64,
    entities: Vec<EntityDef>,
}

impl GroupBuilder {
    /// Create a group builder with required `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            base_delay: DelayDef::default(),
            stagger: 0,
            entities: Vec::new(),
        }
    }

    /// Delay of the first item.
    pub fn base_delay(mut self, delay: DelayDef) -> Self {
        self.base_delay = delay;
        self
    }

    /// Frames between consecutive items.
    pub fn stagger(mut self, frames: u64) -> Self {
        self.stagger = frames;
        self
    }

    /// Append an item with no extra delay.
    pub fn entity(mut self, id: impl Into<String>, kind: EntityKind) -> Self {
        self.entities.push(entity(id, kind));
        self
    }

    /// Append an item delayed `frames` beyond its staggered slot.
    pub fn entity_delayed(mut self, id: impl Into<String>, frames: u64, kind: EntityKind) -> Self {
        let mut def = entity(id, kind);
        def.delay = saturating_i64(frames);
        self.entities.push(def);
        self
    }

    /// Build validated [`GroupDef`](crate::GroupDef).
    pub fn build(self) -> FramecastResult<GroupDef> {
        if self.id.trim().is_empty() {
            return Err(FramecastError::invalid_config("group id must be non-empty"));
        }
        if self.entities.is_empty() {
            return Err(FramecastError::invalid_config(format!(
                "group '{}' has no entities",
                self.id
            )));
        }
        Ok(GroupDef {
            id: self.id,
            base_delay: self.base_delay,
            stagger: saturating_i64(self.stagger),
            entities: self.entities,
        })
    }
}

/// Entity with no extra delay.
pub fn entity(id: impl Into<String>, kind: EntityKind) -> EntityDef {
    EntityDef {
        id: id.into(),
        delay: 0,
        kind,
    }
}

fn saturating_i64(frames: u64) -> i64 {
    i64::try_from(frames).unwrap_or(i64::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/composition/dsl.rs"]
mod tests;
