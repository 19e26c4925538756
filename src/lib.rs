#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Keyframe animation and playback engine for a 3D scene editor.
//!
//! The crate stores ordered keyframes per animation track, advances a
//! virtual clock from an external per-frame signal, interpolates transform
//! and character properties between bracketing keyframes with configurable
//! easing, and emits resolved poses for the host renderer to apply. The
//! renderer and the authoring UI are collaborators behind narrow seams: the
//! frame signal in, the pose sink out, and an id-based authoring interface.

pub mod easing;
pub mod errors;
pub mod keyframe;
pub mod playback;
pub mod registry;
pub mod sampler;
pub mod session;
pub mod tracks;

pub use easing::Easing;
pub use errors::{KinemaError, Result};
pub use keyframe::{
    CameraKeyframe, CharacterExtras, FaceExpression, KeyframeId, KeyframeStore, ObjectKeyframe,
    ObjectKeyframePatch, ObjectPose,
};
pub use playback::{PlaybackController, PlaybackState, PoseSample, Tick};
pub use registry::{AnimationRegistry, PoseEvent};
pub use sampler::{CameraPose, ResolvedExtras, ResolvedPose, sample_camera_segment, sample_object};
pub use session::{KeyframeRecord, PayloadRecord, TrackRecord};
pub use tracks::{AnimationTrack, CAMERA_SUBJECT, MIN_TRACK_DURATION, TrackData, TrackId};
