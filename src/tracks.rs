//! Animation tracks: a named, timed keyframe sequence driving one subject.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::keyframe::{CameraKeyframe, KeyframeId, KeyframeStore};

/// Subject id sentinel for the camera rig.
pub const CAMERA_SUBJECT: &str = "camera";

/// Shortest duration an object track accepts, in seconds.
pub const MIN_TRACK_DURATION: f32 = 0.1;

/// Opaque identifier of an animation track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(Uuid);

impl TrackId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Kind-specific track payload.
///
/// Object tracks index keyframes by absolute time against a track-level
/// duration. Camera tracks are a waypoint sequence whose total length is the
/// sum of per-segment durations; they carry no track-level duration.
#[derive(Debug, Clone)]
pub enum TrackData {
    Object {
        duration: f32,
        keys: KeyframeStore,
    },
    Camera {
        keys: Vec<CameraKeyframe>,
    },
}

/// A named, timed collection of keyframes for one subject.
#[derive(Debug, Clone)]
pub struct AnimationTrack {
    pub id: TrackId,
    pub subject_id: String,
    pub name: String,
    pub loop_enabled: bool,
    pub data: TrackData,
}

impl AnimationTrack {
    /// Creates an empty object track with a 1 second default duration.
    #[must_use]
    pub fn object(subject_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: TrackId::generate(),
            subject_id: subject_id.into(),
            name: name.into(),
            loop_enabled: false,
            data: TrackData::Object {
                duration: 1.0,
                keys: KeyframeStore::new(),
            },
        }
    }

    /// Creates an empty camera track, subject [`CAMERA_SUBJECT`].
    #[must_use]
    pub fn camera(name: impl Into<String>) -> Self {
        Self {
            id: TrackId::generate(),
            subject_id: CAMERA_SUBJECT.to_string(),
            name: name.into(),
            loop_enabled: false,
            data: TrackData::Camera { keys: Vec::new() },
        }
    }

    #[must_use]
    pub fn is_camera(&self) -> bool {
        matches!(self.data, TrackData::Camera { .. })
    }

    /// Sets the track duration, clamped to [`MIN_TRACK_DURATION`].
    ///
    /// Camera tracks have no track-level duration; the call is ignored.
    /// Keyframes timed past the new duration are kept as-is: playback clamps
    /// progress, so they simply have no visual effect.
    pub fn set_duration(&mut self, seconds: f32) {
        if let TrackData::Object { duration, .. } = &mut self.data {
            *duration = seconds.max(MIN_TRACK_DURATION);
        }
    }

    pub fn set_loop(&mut self, enabled: bool) {
        self.loop_enabled = enabled;
    }

    /// Total playable length in seconds. For camera tracks this is the sum
    /// of every non-first keyframe's segment duration.
    #[must_use]
    pub fn total_duration(&self) -> f32 {
        match &self.data {
            TrackData::Object { duration, .. } => *duration,
            TrackData::Camera { keys } => keys.iter().skip(1).map(|k| k.duration).sum(),
        }
    }

    #[must_use]
    pub fn keyframe_count(&self) -> usize {
        match &self.data {
            TrackData::Object { keys, .. } => keys.len(),
            TrackData::Camera { keys } => keys.len(),
        }
    }

    /// Whether playback may start: object tracks need at least one keyframe
    /// (a single keyframe plays as a static pose), camera tracks need two to
    /// have a segment to traverse.
    #[must_use]
    pub fn is_playable(&self) -> bool {
        match &self.data {
            TrackData::Object { keys, .. } => !keys.is_empty(),
            TrackData::Camera { keys } => keys.len() >= 2,
        }
    }

    /// Removes a keyframe of either kind by id. Unknown ids are ignored.
    pub fn remove_keyframe(&mut self, id: KeyframeId) {
        match &mut self.data {
            TrackData::Object { keys, .. } => keys.remove(id),
            TrackData::Camera { keys } => keys.retain(|k| k.id != id),
        }
    }
}
