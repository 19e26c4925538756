//! Persisted session layout.
//!
//! A track serializes as
//! `{id, subjectId, name, duration?, loop, keyframes: [{id, time?, payload,
//! easing?, duration?}]}`. Import and export round-trip the keyframe order
//! and every payload field exactly, so an external scene exporter can embed
//! these records verbatim.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::errors::{KinemaError, Result};
use crate::keyframe::{
    CameraKeyframe, CharacterExtras, KeyframeId, KeyframeStore, ObjectKeyframe, ObjectPose,
};
use crate::tracks::{AnimationTrack, CAMERA_SUBJECT, TrackData, TrackId};

/// Kind-discriminated keyframe payload. Object payloads carry a transform
/// (plus optional character extras), camera payloads a position/target pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadRecord {
    Object {
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        extras: Option<CharacterExtras>,
    },
    Camera {
        #[serde(default)]
        name: String,
        position: Vec3,
        target: Vec3,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyframeRecord {
    pub id: KeyframeId,
    /// Present on object keyframes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f32>,
    pub payload: PayloadRecord,
    /// Present on object keyframes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<Easing>,
    /// Segment traversal time; present on camera keyframes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRecord {
    pub id: TrackId,
    pub subject_id: String,
    pub name: String,
    /// Track-level duration; object tracks only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f32>,
    #[serde(rename = "loop")]
    pub loop_enabled: bool,
    pub keyframes: Vec<KeyframeRecord>,
}

impl From<&AnimationTrack> for TrackRecord {
    fn from(track: &AnimationTrack) -> Self {
        let (duration, keyframes) = match &track.data {
            TrackData::Object { duration, keys } => (
                Some(*duration),
                keys.sorted().iter().map(object_record).collect(),
            ),
            TrackData::Camera { keys } => (None, keys.iter().map(camera_record).collect()),
        };
        Self {
            id: track.id,
            subject_id: track.subject_id.clone(),
            name: track.name.clone(),
            duration,
            loop_enabled: track.loop_enabled,
            keyframes,
        }
    }
}

fn object_record(key: &ObjectKeyframe) -> KeyframeRecord {
    KeyframeRecord {
        id: key.id,
        time: Some(key.time),
        payload: PayloadRecord::Object {
            position: key.pose.position,
            rotation: key.pose.rotation,
            scale: key.pose.scale,
            extras: key.extras,
        },
        easing: Some(key.easing),
        duration: None,
    }
}

fn camera_record(key: &CameraKeyframe) -> KeyframeRecord {
    KeyframeRecord {
        id: key.id,
        time: None,
        payload: PayloadRecord::Camera {
            name: key.name.clone(),
            position: key.position,
            target: key.target,
        },
        easing: None,
        duration: Some(key.duration),
    }
}

impl TrackRecord {
    /// Restores the track this record describes, preserving ids and keyframe
    /// order. Fails when a keyframe's fields do not match the track's kind.
    pub fn into_track(self) -> Result<AnimationTrack> {
        let data = if self.subject_id == CAMERA_SUBJECT {
            let keys = self
                .keyframes
                .into_iter()
                .map(camera_keyframe)
                .collect::<Result<Vec<_>>>()?;
            TrackData::Camera { keys }
        } else {
            let mut keys = KeyframeStore::new();
            for record in self.keyframes {
                keys.add(object_keyframe(record)?);
            }
            TrackData::Object {
                duration: self.duration.unwrap_or(1.0),
                keys,
            }
        };
        Ok(AnimationTrack {
            id: self.id,
            subject_id: self.subject_id,
            name: self.name,
            loop_enabled: self.loop_enabled,
            data,
        })
    }
}

fn object_keyframe(record: KeyframeRecord) -> Result<ObjectKeyframe> {
    let PayloadRecord::Object {
        position,
        rotation,
        scale,
        extras,
    } = record.payload
    else {
        return Err(KinemaError::MalformedRecord(
            "camera payload on an object track".into(),
        ));
    };
    let time = record.time.ok_or_else(|| {
        KinemaError::MalformedRecord("object keyframe without a time".into())
    })?;
    Ok(ObjectKeyframe {
        id: record.id,
        time,
        pose: ObjectPose {
            position,
            rotation,
            scale,
        },
        extras,
        easing: record.easing.unwrap_or_default(),
    })
}

fn camera_keyframe(record: KeyframeRecord) -> Result<CameraKeyframe> {
    let PayloadRecord::Camera {
        name,
        position,
        target,
    } = record.payload
    else {
        return Err(KinemaError::MalformedRecord(
            "object payload on a camera track".into(),
        ));
    };
    let duration = record.duration.ok_or_else(|| {
        KinemaError::MalformedRecord("camera keyframe without a duration".into())
    })?;
    Ok(CameraKeyframe {
        id: record.id,
        name,
        position,
        target,
        duration,
    })
}
