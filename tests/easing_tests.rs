//! Easing Curve Tests
//!
//! Tests for:
//! - Endpoint identities: apply(0) = 0 and apply(1) = 1 for every kind
//! - Monotonic non-decreasing output across the unit interval
//! - Reference curve shapes (quadratic in/out, smoothstep)
//! - Input clamping outside [0, 1]

use kinema::Easing;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

const ALL: [Easing; 4] = [
    Easing::Linear,
    Easing::EaseIn,
    Easing::EaseOut,
    Easing::EaseInOut,
];

#[test]
fn endpoints_are_fixed() {
    for kind in ALL {
        assert!(
            approx(kind.apply(0.0), 0.0),
            "{kind:?}: apply(0) should be 0, got {}",
            kind.apply(0.0)
        );
        assert!(
            approx(kind.apply(1.0), 1.0),
            "{kind:?}: apply(1) should be 1, got {}",
            kind.apply(1.0)
        );
    }
}

#[test]
fn monotonic_non_decreasing() {
    for kind in ALL {
        let mut prev = kind.apply(0.0);
        for i in 1..=50 {
            let t = i as f32 / 50.0;
            let cur = kind.apply(t);
            assert!(
                cur >= prev - EPSILON,
                "{kind:?}: not monotonic at t={t}: {cur} < {prev}"
            );
            prev = cur;
        }
    }
}

#[test]
fn linear_is_identity() {
    assert!(approx(Easing::Linear.apply(0.25), 0.25));
    assert!(approx(Easing::Linear.apply(0.5), 0.5));
    assert!(approx(Easing::Linear.apply(0.75), 0.75));
}

#[test]
fn ease_in_is_quadratic() {
    assert!(approx(Easing::EaseIn.apply(0.5), 0.25));
    assert!(approx(Easing::EaseIn.apply(0.25), 0.0625));
}

#[test]
fn ease_out_is_inverted_quadratic() {
    assert!(approx(Easing::EaseOut.apply(0.5), 0.75));
    assert!(approx(Easing::EaseOut.apply(0.75), 0.9375));
}

#[test]
fn ease_in_out_is_smoothstep() {
    // 3t^2 - 2t^3 at t = 0.5 is exactly 0.5
    assert!(approx(Easing::EaseInOut.apply(0.5), 0.5));
    assert!(approx(Easing::EaseInOut.apply(0.25), 0.15625));
    // Symmetric around the midpoint
    let a = Easing::EaseInOut.apply(0.3);
    let b = Easing::EaseInOut.apply(0.7);
    assert!(approx(a + b, 1.0), "smoothstep not symmetric: {a} + {b}");
}

#[test]
fn input_is_clamped() {
    for kind in ALL {
        assert!(approx(kind.apply(-1.0), 0.0), "{kind:?}: below range");
        assert!(approx(kind.apply(2.0), 1.0), "{kind:?}: above range");
    }
}

#[test]
fn default_is_linear() {
    assert_eq!(Easing::default(), Easing::Linear);
}
