//! Builders for expression animations.

use crate::animation::anim::{Anim, Expr, InterpMode, Keyframe, Keyframes, Lerp, LoopMode};
use crate::animation::ease::Ease;

/// Shift `inner` later by `by` time units.
pub fn delay<T>(inner: Anim<T>, by: f64) -> Anim<T> {
    Anim::Expr(Expr::Delay {
        inner: Box::new(inner),
        by,
    })
}

/// Play `inner` `factor` times faster.
pub fn speed<T>(inner: Anim<T>, factor: f64) -> Anim<T> {
    Anim::Expr(Expr::Speed {
        inner: Box::new(inner),
        factor,
    })
}

/// Loop `inner` every `period` time units.
pub fn loop_<T>(inner: Anim<T>, period: f64, mode: LoopMode) -> Anim<T> {
    Anim::Expr(Expr::Loop {
        inner: Box::new(inner),
        period,
        mode,
    })
}

/// Blend `a` toward `b` by the animated factor `t`.
pub fn mix<T>(a: Anim<T>, b: Anim<T>, t: Anim<f64>) -> Anim<T> {
    Anim::Expr(Expr::Mix {
        a: Box::new(a),
        b: Box::new(b),
        t: Box::new(t),
    })
}

/// Eased transition from `from` at time 0 to `to` at time `duration`.
pub fn ramp<T: Lerp + Clone>(from: T, to: T, duration: f64, ease: Ease) -> Anim<T> {
    Anim::Keyframes(Keyframes {
        keys: vec![
            Keyframe {
                time: 0.0,
                value: from,
                ease,
            },
            Keyframe {
                time: duration,
                value: to,
                ease: Ease::Linear,
            },
        ],
        mode: InterpMode::Linear,
        default: None,
    })
}

/// Play `a` until `a_len`, then `b` with its clock restarted at the switch.
pub fn sequence<T>(a: Anim<T>, a_len: f64, b: Anim<T>) -> Anim<T> {
    let b_local = delay(b, a_len);
    let step = Anim::Keyframes(Keyframes {
        keys: vec![
            Keyframe {
                time: 0.0,
                value: 0.0,
                ease: Ease::Linear,
            },
            Keyframe {
                time: a_len,
                value: 1.0,
                ease: Ease::Linear,
            },
        ],
        mode: InterpMode::Hold,
        default: None,
    });
    mix(a, b_local, step)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
