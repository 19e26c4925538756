//! Animation registry: owns every track and every live playback controller.
//!
//! The registry is the single entry point for its collaborators. The UI
//! authors tracks and keyframes through it, the host renderer drives it with
//! a per-frame tick and receives resolved poses through the sink callback.
//! Neither side ever holds a reference into track internals; they exchange
//! opaque ids and resolved values only.

use log::warn;
use rustc_hash::FxHashMap;

use crate::errors::Result;
use crate::keyframe::{CameraKeyframe, KeyframeId, ObjectKeyframe, ObjectKeyframePatch};
use crate::playback::{PlaybackController, PoseSample};
use crate::sampler::{CameraPose, ResolvedPose};
use crate::session::TrackRecord;
use crate::tracks::{AnimationTrack, TrackData, TrackId};

/// Event delivered to the pose sink during a tick or a jump resolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoseEvent<'a> {
    /// Resolved pose for one object subject.
    Object {
        subject_id: &'a str,
        pose: ResolvedPose,
    },
    /// Resolved camera rig state.
    Camera { pose: CameraPose },
    /// A non-looping track reached its end (or became unplayable mid-flight).
    /// Delivered exactly once per play invocation.
    Completed {
        track_id: TrackId,
        subject_id: &'a str,
    },
}

/// Owner of all animation tracks and playback controllers.
///
/// At most one controller exists per track; the camera controller is a
/// dedicated singleton slot, independent of object-track playback.
#[derive(Debug, Default)]
pub struct AnimationRegistry {
    tracks: FxHashMap<TrackId, AnimationTrack>,
    /// Authoring-order track ids, so enumeration is deterministic.
    order: Vec<TrackId>,
    object_controllers: FxHashMap<TrackId, PlaybackController>,
    camera_controller: Option<PlaybackController>,
}

impl AnimationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Track lifecycle
    // ------------------------------------------------------------------

    pub fn create_object_track(
        &mut self,
        subject_id: impl Into<String>,
        name: impl Into<String>,
    ) -> TrackId {
        self.insert(AnimationTrack::object(subject_id, name))
    }

    pub fn create_camera_track(&mut self, name: impl Into<String>) -> TrackId {
        self.insert(AnimationTrack::camera(name))
    }

    fn insert(&mut self, track: AnimationTrack) -> TrackId {
        let id = track.id;
        self.order.push(id);
        self.tracks.insert(id, track);
        id
    }

    /// Deletes a track, halting and discarding any controller bound to it.
    /// Unknown ids are ignored.
    pub fn delete_track(&mut self, id: TrackId) {
        if self.tracks.remove(&id).is_none() {
            return;
        }
        self.order.retain(|t| *t != id);
        self.object_controllers.remove(&id);
        if self
            .camera_controller
            .as_ref()
            .is_some_and(|c| c.track_id() == id)
        {
            self.camera_controller = None;
        }
    }

    #[must_use]
    pub fn track(&self, id: TrackId) -> Option<&AnimationTrack> {
        self.tracks.get(&id)
    }

    pub fn tracks(&self) -> impl Iterator<Item = &AnimationTrack> {
        self.order.iter().filter_map(|id| self.tracks.get(id))
    }

    // ------------------------------------------------------------------
    // Authoring
    // ------------------------------------------------------------------

    /// Adds a keyframe to an object track, returning its id. Ignored (with a
    /// warning) on unknown track ids or on camera tracks.
    pub fn add_object_keyframe(
        &mut self,
        track_id: TrackId,
        key: ObjectKeyframe,
    ) -> Option<KeyframeId> {
        match self.tracks.get_mut(&track_id) {
            Some(AnimationTrack {
                data: TrackData::Object { keys, .. },
                ..
            }) => Some(keys.add(key)),
            Some(_) => {
                warn!("object keyframe rejected: track {track_id:?} is a camera track");
                None
            }
            None => {
                warn!("object keyframe rejected: unknown track {track_id:?}");
                None
            }
        }
    }

    /// Appends a waypoint to a camera track, returning its id. Ignored (with
    /// a warning) on unknown track ids or on object tracks.
    pub fn add_camera_keyframe(
        &mut self,
        track_id: TrackId,
        key: CameraKeyframe,
    ) -> Option<KeyframeId> {
        match self.tracks.get_mut(&track_id) {
            Some(AnimationTrack {
                data: TrackData::Camera { keys },
                ..
            }) => {
                let id = key.id;
                keys.push(key);
                Some(id)
            }
            Some(_) => {
                warn!("camera keyframe rejected: track {track_id:?} is an object track");
                None
            }
            None => {
                warn!("camera keyframe rejected: unknown track {track_id:?}");
                None
            }
        }
    }

    /// Removes a keyframe by id. Idempotent; unknown track or keyframe ids
    /// are ignored.
    pub fn remove_keyframe(&mut self, track_id: TrackId, id: KeyframeId) {
        if let Some(track) = self.tracks.get_mut(&track_id) {
            track.remove_keyframe(id);
        }
    }

    /// Applies a partial update to an object keyframe. Ignored on unknown
    /// ids or camera tracks.
    pub fn update_keyframe(
        &mut self,
        track_id: TrackId,
        id: KeyframeId,
        patch: &ObjectKeyframePatch,
    ) {
        if let Some(AnimationTrack {
            data: TrackData::Object { keys, .. },
            ..
        }) = self.tracks.get_mut(&track_id)
        {
            keys.update(id, patch);
        }
    }

    pub fn set_duration(&mut self, track_id: TrackId, seconds: f32) {
        if let Some(track) = self.tracks.get_mut(&track_id) {
            track.set_duration(seconds);
        }
    }

    pub fn set_loop(&mut self, track_id: TrackId, enabled: bool) {
        if let Some(track) = self.tracks.get_mut(&track_id) {
            track.set_loop(enabled);
        }
    }

    // ------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------

    /// Starts playback of a track from zero.
    ///
    /// Silently ignored when the track is unknown, already playing, or has
    /// too few keyframes; callers observe the outcome via
    /// [`is_playing`](Self::is_playing). Playing a camera track while
    /// another camera track runs is likewise ignored.
    pub fn play(&mut self, id: TrackId) {
        let Some(track) = self.tracks.get(&id) else {
            warn!("play ignored: unknown track {id:?}");
            return;
        };
        if self.is_playing(id) {
            return;
        }
        if !track.is_playable() {
            warn!(
                "play ignored: track {id:?} has {} keyframe(s), below the playable minimum",
                track.keyframe_count()
            );
            return;
        }
        if track.is_camera() {
            if self.camera_controller.as_ref().is_some_and(PlaybackController::is_playing) {
                warn!("play ignored: another camera track is already playing");
                return;
            }
            let mut controller = PlaybackController::new(id);
            controller.play(track);
            self.camera_controller = Some(controller);
        } else {
            let mut controller = PlaybackController::new(id);
            controller.play(track);
            self.object_controllers.insert(id, controller);
        }
    }

    /// Stops a track immediately, discarding its controller. Idempotent.
    pub fn stop(&mut self, id: TrackId) {
        self.object_controllers.remove(&id);
        if self
            .camera_controller
            .as_ref()
            .is_some_and(|c| c.track_id() == id)
        {
            self.camera_controller = None;
        }
    }

    #[must_use]
    pub fn is_playing(&self, id: TrackId) -> bool {
        if self
            .object_controllers
            .get(&id)
            .is_some_and(PlaybackController::is_playing)
        {
            return true;
        }
        self.camera_controller
            .as_ref()
            .is_some_and(|c| c.track_id() == id && c.is_playing())
    }

    /// Frame signal entry point: advances every live controller by `dt`
    /// seconds and forwards each resolved pose to `sink`.
    pub fn tick(&mut self, dt: f32, sink: &mut impl FnMut(PoseEvent<'_>)) {
        let mut finished = Vec::new();

        for (id, controller) in &mut self.object_controllers {
            let Some(track) = self.tracks.get(id) else {
                finished.push(*id);
                continue;
            };
            let tick = controller.tick(track, dt);
            if let Some(PoseSample::Object(pose)) = tick.pose {
                sink(PoseEvent::Object {
                    subject_id: &track.subject_id,
                    pose,
                });
            }
            if tick.completed {
                sink(PoseEvent::Completed {
                    track_id: *id,
                    subject_id: &track.subject_id,
                });
            }
            if !controller.is_playing() {
                finished.push(*id);
            }
        }
        for id in finished {
            self.object_controllers.remove(&id);
        }

        // Take the controller out while it borrows the track map
        if let Some(mut controller) = self.camera_controller.take() {
            let id = controller.track_id();
            if let Some(track) = self.tracks.get(&id) {
                let tick = controller.tick(track, dt);
                if let Some(PoseSample::Camera(pose)) = tick.pose {
                    sink(PoseEvent::Camera { pose });
                }
                if tick.completed {
                    sink(PoseEvent::Completed {
                        track_id: id,
                        subject_id: &track.subject_id,
                    });
                }
                if controller.is_playing() {
                    self.camera_controller = Some(controller);
                }
            }
        }
    }

    /// Single-shot resolve of exactly one keyframe's payload, with zero
    /// interpolation and no playback state change. Unknown ids are ignored.
    pub fn jump_to_keyframe(
        &self,
        track_id: TrackId,
        keyframe_id: KeyframeId,
        sink: &mut impl FnMut(PoseEvent<'_>),
    ) {
        let Some(track) = self.tracks.get(&track_id) else {
            return;
        };
        match &track.data {
            TrackData::Object { keys, .. } => {
                if let Some(key) = keys.get(keyframe_id) {
                    sink(PoseEvent::Object {
                        subject_id: &track.subject_id,
                        pose: ResolvedPose::from(key),
                    });
                }
            }
            TrackData::Camera { keys } => {
                if let Some(key) = keys.iter().find(|k| k.id == keyframe_id) {
                    sink(PoseEvent::Camera {
                        pose: CameraPose {
                            position: key.position,
                            target: key.target,
                        },
                    });
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Session import / export
    // ------------------------------------------------------------------

    /// Snapshots every track in authoring order as session records.
    #[must_use]
    pub fn export_tracks(&self) -> Vec<TrackRecord> {
        self.tracks().map(TrackRecord::from).collect()
    }

    /// Restores a track from a session record, preserving ids and keyframe
    /// order exactly.
    pub fn import_track(&mut self, record: TrackRecord) -> Result<TrackId> {
        let track = record.into_track()?;
        Ok(self.insert(track))
    }
}
