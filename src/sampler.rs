//! Interpolation engine: resolves a fully concrete pose at a point in time.
//!
//! Sampling is stateless over the current store contents. The bracketing
//! keyframe pair is re-derived on every call, so a track edited between two
//! ticks (including deletion of a keyframe that bracketed the playhead) is
//! picked up immediately and can never leave a stale index behind.

use glam::{Vec2, Vec3};

use crate::keyframe::{CameraKeyframe, CharacterExtras, FaceExpression, ObjectKeyframe};

/// Character properties resolved at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedExtras {
    pub head_rotation: Vec3,
    pub left_arm_rotation: Vec3,
    pub right_arm_rotation: Vec3,
    pub left_leg_rotation: Vec3,
    pub right_leg_rotation: Vec3,
    pub face_expression: FaceExpression,
    pub eye_direction: Vec2,
    pub magic_intensity: Option<f32>,
    pub power_level: Option<f32>,
}

impl From<&CharacterExtras> for ResolvedExtras {
    fn from(e: &CharacterExtras) -> Self {
        Self {
            head_rotation: e.head_rotation,
            left_arm_rotation: e.left_arm_rotation,
            right_arm_rotation: e.right_arm_rotation,
            left_leg_rotation: e.left_leg_rotation,
            right_leg_rotation: e.right_leg_rotation,
            face_expression: e.face_expression,
            eye_direction: e.eye_direction,
            magic_intensity: e.magic_intensity,
            power_level: e.power_level,
        }
    }
}

/// An object subject's pose resolved at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPose {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub extras: Option<ResolvedExtras>,
}

impl From<&ObjectKeyframe> for ResolvedPose {
    fn from(key: &ObjectKeyframe) -> Self {
        Self {
            position: key.pose.position,
            rotation: key.pose.rotation,
            scale: key.pose.scale,
            extras: key.extras.as_ref().map(ResolvedExtras::from),
        }
    }
}

/// Camera rig state resolved at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

/// Resolves an object track's pose at `tau` seconds from track start.
///
/// Returns `None` for an empty store. Outside the keyed range the nearest
/// endpoint's payload is returned unmodified (no extrapolation). Inside a
/// segment, the departing keyframe's easing shapes progress and every
/// numeric field lerps independently; the facial expression holds the
/// departing keyframe's value until shaped progress reaches 1.
#[must_use]
pub fn sample_object(keys: &[ObjectKeyframe], tau: f32) -> Option<ResolvedPose> {
    let first = keys.first()?;
    if keys.len() == 1 || tau <= first.time {
        return Some(ResolvedPose::from(first));
    }
    let last = keys.last()?;
    if tau >= last.time {
        return Some(ResolvedPose::from(last));
    }

    // partition_point yields the first index with time > tau; the pair
    // (next - 1, next) brackets tau.
    let next = keys.partition_point(|k| k.time <= tau);
    let a = &keys[next - 1];
    let b = &keys[next];

    let span = b.time - a.time;
    let p = if span > f32::EPSILON {
        ((tau - a.time) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let p = a.easing.apply(p);

    let extras = match (&a.extras, &b.extras) {
        (Some(ea), Some(eb)) => Some(lerp_extras(ea, eb, p)),
        (Some(ea), None) => Some(ResolvedExtras::from(ea)),
        (None, Some(eb)) if p >= 1.0 => Some(ResolvedExtras::from(eb)),
        _ => None,
    };

    Some(ResolvedPose {
        position: a.pose.position.lerp(b.pose.position, p),
        rotation: a.pose.rotation.lerp(b.pose.rotation, p),
        scale: a.pose.scale.lerp(b.pose.scale, p),
        extras,
    })
}

fn lerp_extras(a: &CharacterExtras, b: &CharacterExtras, p: f32) -> ResolvedExtras {
    ResolvedExtras {
        head_rotation: a.head_rotation.lerp(b.head_rotation, p),
        left_arm_rotation: a.left_arm_rotation.lerp(b.left_arm_rotation, p),
        right_arm_rotation: a.right_arm_rotation.lerp(b.right_arm_rotation, p),
        left_leg_rotation: a.left_leg_rotation.lerp(b.left_leg_rotation, p),
        right_leg_rotation: a.right_leg_rotation.lerp(b.right_leg_rotation, p),
        // Categorical: step at the boundary, never blend
        face_expression: if p >= 1.0 {
            b.face_expression
        } else {
            a.face_expression
        },
        eye_direction: a.eye_direction.lerp(b.eye_direction, p),
        magic_intensity: lerp_opt(a.magic_intensity, b.magic_intensity, p),
        power_level: lerp_opt(a.power_level, b.power_level, p),
    }
}

fn lerp_opt(a: Option<f32>, b: Option<f32>, p: f32) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * p),
        // An endpoint without the scalar cannot blend; hold the departing value
        (Some(a), None) => Some(a),
        (None, other) => other.filter(|_| p >= 1.0),
    }
}

/// Resolves a camera track within segment `segment` (from `keys[segment]` to
/// `keys[segment + 1]`), `elapsed` seconds into it.
///
/// Camera segments interpolate linearly only; the arriving keyframe's
/// `duration` defines segment length, and non-positive durations resolve as
/// already complete. Returns `None` when the segment does not exist.
#[must_use]
pub fn sample_camera_segment(
    keys: &[CameraKeyframe],
    segment: usize,
    elapsed: f32,
) -> Option<CameraPose> {
    let from = keys.get(segment)?;
    let to = keys.get(segment + 1)?;
    let p = if to.duration > 0.0 {
        (elapsed / to.duration).clamp(0.0, 1.0)
    } else {
        1.0
    };
    Some(CameraPose {
        position: from.position.lerp(to.position, p),
        target: from.target.lerp(to.target, p),
    })
}
