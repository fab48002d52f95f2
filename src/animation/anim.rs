use crate::{
    animation::ease::Ease,
    foundation::core::{Point, Rgba8, Vec2},
    foundation::error::{SlitscanError, SlitscanResult},
};

/// A value that varies with animation time.
///
/// Implementations must be pure: sampling the same `t` twice yields the same value.
pub trait Interpolator<T> {
    /// Value at animation time `t`.
    fn value_at(&self, t: f64) -> SlitscanResult<T>;
}

impl<T, F> Interpolator<T> for F
where
    F: Fn(f64) -> T,
{
    fn value_at(&self, t: f64) -> SlitscanResult<T> {
        Ok(self(t))
    }
}

impl<T: Lerp + Clone> Interpolator<T> for Anim<T> {
    fn value_at(&self, t: f64) -> SlitscanResult<T> {
        self.sample(t)
    }
}

/// Interpolation contract for animation value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for i64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let (a, b) = (*a as f64, *b as f64);
        (a + (b - a) * t).round() as i64
    }
}

impl Lerp for (f64, f64) {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (
            <f64 as Lerp>::lerp(&a.0, &b.0, t),
            <f64 as Lerp>::lerp(&a.1, &b.1, t),
        )
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// Animated value: a constant, a keyframe track, or an expression over other animations.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Anim<T> {
    /// The same value at every time.
    Constant(T),
    /// Piecewise animation defined by explicit keyframes.
    Keyframes(Keyframes<T>),
    /// Time remapping and blending of nested animations.
    Expr(Expr<T>),
}

impl<T> From<T> for Anim<T> {
    fn from(value: T) -> Self {
        Self::Constant(value)
    }
}

impl<T> Anim<T>
where
    T: Lerp + Clone,
{
    /// Constant animation.
    pub fn constant(value: T) -> Self {
        Self::Constant(value)
    }

    /// Sample at animation time `t`.
    pub fn sample(&self, t: f64) -> SlitscanResult<T> {
        match self {
            Self::Constant(v) => Ok(v.clone()),
            Self::Keyframes(kf) => kf.sample(t),
            Self::Expr(expr) => expr.sample(t),
        }
    }

    /// Check structural invariants (sorted keys, positive periods, ...).
    pub fn validate(&self) -> SlitscanResult<()> {
        match self {
            Self::Constant(_) => Ok(()),
            Self::Keyframes(kf) => kf.validate(),
            Self::Expr(expr) => expr.validate(),
        }
    }
}

/// Keyframe track sorted by time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    /// Keys, sorted by `time`.
    pub keys: Vec<Keyframe<T>>,
    /// How values between keys are produced.
    #[serde(default)]
    pub mode: InterpMode,
    /// Value when no keys exist.
    pub default: Option<T>,
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    /// Linear track through `(time, value)` pairs with linear easing.
    pub fn linear(points: impl IntoIterator<Item = (f64, T)>) -> Self {
        Self {
            keys: points
                .into_iter()
                .map(|(time, value)| Keyframe {
                    time,
                    value,
                    ease: Ease::Linear,
                })
                .collect(),
            mode: InterpMode::Linear,
            default: None,
        }
    }

    /// Require at least one key (or a default), finite times, and sorted keys.
    pub fn validate(&self) -> SlitscanResult<()> {
        if self.keys.is_empty() && self.default.is_none() {
            return Err(SlitscanError::animation(
                "keyframes must have at least one key or a default value",
            ));
        }
        if self.keys.iter().any(|k| !k.time.is_finite()) {
            return Err(SlitscanError::animation("keyframe times must be finite"));
        }
        if !self.keys.windows(2).all(|w| w[0].time <= w[1].time) {
            return Err(SlitscanError::animation(
                "keyframe keys must be sorted by time",
            ));
        }
        Ok(())
    }

    /// Sample at time `t`; clamps to the first and last key outside the track.
    pub fn sample(&self, t: f64) -> SlitscanResult<T> {
        if self.keys.is_empty() {
            return self
                .default
                .clone()
                .ok_or_else(|| SlitscanError::animation("keyframes have no keys and no default"));
        }

        let idx = self.keys.partition_point(|k| k.time <= t);
        if idx == 0 {
            return Ok(self.keys[0].value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(self.keys[self.keys.len() - 1].value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.time - a.time;
        if denom <= 0.0 {
            return Ok(a.value.clone());
        }

        match self.mode {
            InterpMode::Hold => Ok(a.value.clone()),
            InterpMode::Linear => {
                let te = a.ease.apply((t - a.time) / denom);
                Ok(T::lerp(&a.value, &b.value, te))
            }
        }
    }
}

/// One key of a [`Keyframes`] track.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    /// Animation time of this key.
    pub time: f64,
    /// Value at `time`.
    pub value: T,
    /// Ease applied toward the next key.
    #[serde(default)]
    pub ease: Ease,
}

/// Interpolation between keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum InterpMode {
    /// Keep the previous key's value until the next key.
    Hold,
    /// Interpolate with the previous key's ease.
    #[default]
    Linear,
}

/// Expression node over nested animations.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Expr<T> {
    /// Shift `inner` later by `by` time units; earlier times sample `inner` at 0.
    Delay {
        /// Animation being delayed.
        inner: Box<Anim<T>>,
        /// Delay in time units.
        by: f64,
    },
    /// Play `inner` `factor` times faster.
    Speed {
        /// Animation being retimed.
        inner: Box<Anim<T>>,
        /// Speed multiplier (> 0).
        factor: f64,
    },
    /// Loop `inner` over `[0, period)`.
    Loop {
        /// Animation being looped.
        inner: Box<Anim<T>>,
        /// Loop length in time units (> 0).
        period: f64,
        /// Looping behavior.
        mode: LoopMode,
    },
    /// Blend `a` toward `b` by `t` clamped to `[0, 1]`.
    Mix {
        /// Start animation.
        a: Box<Anim<T>>,
        /// End animation.
        b: Box<Anim<T>>,
        /// Blend factor animation.
        t: Box<Anim<f64>>,
    },
}

/// Loop mode for [`Expr::Loop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LoopMode {
    /// Restart from the beginning each period.
    Repeat,
    /// Play forward then backward.
    PingPong,
}

impl<T> Expr<T>
where
    T: Lerp + Clone,
{
    /// Validate this node and its children.
    pub fn validate(&self) -> SlitscanResult<()> {
        match self {
            Self::Delay { inner, by } => {
                if !by.is_finite() {
                    return Err(SlitscanError::animation("delay must be finite"));
                }
                inner.validate()
            }
            Self::Speed { inner, factor } => {
                if !factor.is_finite() || *factor <= 0.0 {
                    return Err(SlitscanError::animation("speed factor must be > 0"));
                }
                inner.validate()
            }
            Self::Loop {
                inner,
                period,
                mode: _,
            } => {
                if !period.is_finite() || *period <= 0.0 {
                    return Err(SlitscanError::animation("loop period must be > 0"));
                }
                inner.validate()
            }
            Self::Mix { a, b, t } => {
                a.validate()?;
                b.validate()?;
                t.validate()
            }
        }
    }

    /// Sample at animation time `t`.
    pub fn sample(&self, t: f64) -> SlitscanResult<T> {
        match self {
            Self::Delay { inner, by } => inner.sample((t - by).max(0.0)),
            Self::Speed { inner, factor } => {
                if *factor <= 0.0 {
                    return Err(SlitscanError::animation("speed factor must be > 0"));
                }
                inner.sample(t * factor)
            }
            Self::Loop {
                inner,
                period,
                mode,
            } => {
                if *period <= 0.0 {
                    return Err(SlitscanError::animation("loop period must be > 0"));
                }
                let mapped = match mode {
                    LoopMode::Repeat => t.rem_euclid(*period),
                    LoopMode::PingPong => {
                        let pos = t.rem_euclid(2.0 * period);
                        if pos <= *period {
                            pos
                        } else {
                            2.0 * period - pos
                        }
                    }
                };
                inner.sample(mapped)
            }
            Self::Mix { a, b, t: mix } => {
                let tt = mix.sample(t)?.clamp(0.0, 1.0);
                let av = a.sample(t)?;
                let bv = b.sample(t)?;
                Ok(T::lerp(&av, &bv, tt))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
