//! Per-track playback state machine.
//!
//! A controller is ephemeral: created on `play`, discarded when its track
//! stops or is deleted. It owns only a clock (plus a segment cursor for
//! camera tracks) and re-reads the track's keyframe store every tick, so
//! concurrent authoring edits take effect on the next tick.

use log::debug;

use crate::sampler::{self, CameraPose, ResolvedPose};
use crate::tracks::{AnimationTrack, TrackData, TrackId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

/// Pose emitted by one tick, kind matching the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoseSample {
    Object(ResolvedPose),
    Camera(CameraPose),
}

/// Outcome of a single tick. `completed` is reported exactly once, on the
/// tick that reaches the track's end (or finds the track no longer playable).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub pose: Option<PoseSample>,
    pub completed: bool,
}

impl Tick {
    const IDLE: Self = Self {
        pose: None,
        completed: false,
    };
}

#[derive(Debug)]
pub struct PlaybackController {
    track_id: TrackId,
    state: PlaybackState,
    /// Elapsed seconds since play started (object tracks).
    clock: f32,
    /// Index of the segment currently being traversed (camera tracks).
    segment: usize,
    /// Seconds elapsed within the current segment (camera tracks).
    segment_elapsed: f32,
}

impl PlaybackController {
    #[must_use]
    pub fn new(track_id: TrackId) -> Self {
        Self {
            track_id,
            state: PlaybackState::Stopped,
            clock: 0.0,
            segment: 0,
            segment_elapsed: 0.0,
        }
    }

    #[must_use]
    pub fn track_id(&self) -> TrackId {
        self.track_id
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    #[must_use]
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Starts playback from zero. Returns `false` (leaving the controller
    /// stopped) when the track lacks the minimum keyframe count.
    pub fn play(&mut self, track: &AnimationTrack) -> bool {
        if !track.is_playable() {
            return false;
        }
        self.state = PlaybackState::Playing;
        self.clock = 0.0;
        self.segment = 0;
        self.segment_elapsed = 0.0;
        debug!("track {:?}: playback started", self.track_id);
        true
    }

    /// Halts playback and resets the clock. Idempotent.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.clock = 0.0;
        self.segment = 0;
        self.segment_elapsed = 0.0;
    }

    /// Advances the clock by `dt` seconds and resolves the current pose.
    /// Does nothing while stopped.
    pub fn tick(&mut self, track: &AnimationTrack, dt: f32) -> Tick {
        if self.state != PlaybackState::Playing {
            return Tick::IDLE;
        }
        // The track may have been edited below its playable minimum since
        // the last tick; treat that as reaching the end.
        if !track.is_playable() {
            debug!("track {:?}: no longer playable, stopping", self.track_id);
            self.stop();
            return Tick {
                pose: None,
                completed: true,
            };
        }
        match &track.data {
            TrackData::Object { duration, keys } => {
                self.clock += dt;
                let mut completed = false;
                if self.clock >= *duration {
                    if track.loop_enabled {
                        self.clock %= *duration;
                    } else {
                        self.clock = *duration;
                        completed = true;
                    }
                }
                let pose = sampler::sample_object(keys.sorted(), self.clock)
                    .map(PoseSample::Object);
                if completed {
                    self.stop();
                }
                Tick { pose, completed }
            }
            TrackData::Camera { keys } => {
                // A deleted waypoint may have invalidated the cursor.
                self.segment = self.segment.min(keys.len() - 2);
                self.segment_elapsed += dt;
                let mut completed = false;
                loop {
                    let segment_len = keys[self.segment + 1].duration.max(0.0);
                    if self.segment_elapsed < segment_len {
                        break;
                    }
                    if self.segment + 2 < keys.len() {
                        // Carry the overshoot into the next segment
                        self.segment_elapsed -= segment_len;
                        self.segment += 1;
                    } else {
                        self.segment_elapsed = segment_len;
                        completed = true;
                        break;
                    }
                }
                let pose =
                    sampler::sample_camera_segment(keys, self.segment, self.segment_elapsed)
                        .map(PoseSample::Camera);
                if completed {
                    self.stop();
                }
                Tick { pose, completed }
            }
        }
    }
}
