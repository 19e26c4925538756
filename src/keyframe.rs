//! Keyframe payloads and the per-track keyframe store.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::easing::Easing;

/// Opaque identifier of a single keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyframeId(Uuid);

impl KeyframeId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Categorical facial state of a character subject.
///
/// Never interpolated: playback switches it at the keyframe boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceExpression {
    #[default]
    Neutral,
    Happy,
    Sad,
    Angry,
    Surprised,
    Wise,
    Casting,
    Determined,
}

/// Transform sample of an object keyframe. Rotation is Euler radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectPose {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for ObjectPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Character-only keyframe properties: per-joint Euler rotations, facial
/// state and optional intensity scalars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterExtras {
    pub head_rotation: Vec3,
    pub left_arm_rotation: Vec3,
    pub right_arm_rotation: Vec3,
    pub left_leg_rotation: Vec3,
    pub right_leg_rotation: Vec3,
    pub face_expression: FaceExpression,
    pub eye_direction: Vec2,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magic_intensity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_level: Option<f32>,
}

/// A timestamped pose sample on an object track.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectKeyframe {
    pub id: KeyframeId,
    /// Seconds from track start. Distinct per track.
    pub time: f32,
    pub pose: ObjectPose,
    pub extras: Option<CharacterExtras>,
    /// Governs interpolation out of this keyframe toward the next.
    pub easing: Easing,
}

impl ObjectKeyframe {
    #[must_use]
    pub fn new(time: f32, pose: ObjectPose) -> Self {
        Self {
            id: KeyframeId::generate(),
            time,
            pose,
            extras: None,
            easing: Easing::default(),
        }
    }

    #[must_use]
    pub fn with_extras(mut self, extras: CharacterExtras) -> Self {
        self.extras = Some(extras);
        self
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// A waypoint on a camera track. The segment from the previous keyframe to
/// this one takes `duration` seconds to traverse.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraKeyframe {
    pub id: KeyframeId,
    pub name: String,
    pub position: Vec3,
    pub target: Vec3,
    pub duration: f32,
}

impl CameraKeyframe {
    #[must_use]
    pub fn new(name: impl Into<String>, position: Vec3, target: Vec3, duration: f32) -> Self {
        Self {
            id: KeyframeId::generate(),
            name: name.into(),
            position,
            target,
            duration,
        }
    }
}

/// Field-wise patch for [`KeyframeStore::update`]. `None` leaves the field
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct ObjectKeyframePatch {
    pub time: Option<f32>,
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
    pub scale: Option<Vec3>,
    pub easing: Option<Easing>,
    pub extras: Option<Option<CharacterExtras>>,
}

/// Time-ordered collection of object keyframes.
///
/// The backing vector is kept sorted by `time` at all times, so readers can
/// treat [`sorted`](Self::sorted) as the canonical playback order regardless
/// of insertion order.
#[derive(Debug, Clone, Default)]
pub struct KeyframeStore {
    keys: Vec<ObjectKeyframe>,
}

impl KeyframeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a keyframe at its time-ordered position and returns its id.
    ///
    /// A keyframe whose time exactly matches an existing one replaces it,
    /// keeping the distinct-times invariant.
    pub fn add(&mut self, key: ObjectKeyframe) -> KeyframeId {
        let id = key.id;
        if let Some(existing) = self.keys.iter_mut().find(|k| k.time == key.time) {
            *existing = key;
            return id;
        }
        let at = self.keys.partition_point(|k| k.time <= key.time);
        self.keys.insert(at, key);
        id
    }

    /// Removes a keyframe by id. Unknown ids are ignored.
    pub fn remove(&mut self, id: KeyframeId) {
        self.keys.retain(|k| k.id != id);
    }

    /// Applies a partial update. A time change repositions the keyframe to
    /// preserve ordering. Unknown ids are ignored.
    pub fn update(&mut self, id: KeyframeId, patch: &ObjectKeyframePatch) {
        let Some(idx) = self.keys.iter().position(|k| k.id == id) else {
            return;
        };
        let key = &mut self.keys[idx];
        if let Some(position) = patch.position {
            key.pose.position = position;
        }
        if let Some(rotation) = patch.rotation {
            key.pose.rotation = rotation;
        }
        if let Some(scale) = patch.scale {
            key.pose.scale = scale;
        }
        if let Some(easing) = patch.easing {
            key.easing = easing;
        }
        if let Some(extras) = patch.extras {
            key.extras = extras;
        }
        if let Some(time) = patch.time {
            let mut key = self.keys.remove(idx);
            key.time = time;
            self.add(key);
        }
    }

    /// Read view in ascending-time order. Never mutates.
    #[must_use]
    pub fn sorted(&self) -> &[ObjectKeyframe] {
        &self.keys
    }

    #[must_use]
    pub fn get(&self, id: KeyframeId) -> Option<&ObjectKeyframe> {
        self.keys.iter().find(|k| k.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
