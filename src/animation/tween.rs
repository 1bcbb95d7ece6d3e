use kurbo::Point;

use crate::{animation::ease::Ease, foundation::core::Millis, scene::model::ShapeAttrs};

/// Interpolation contract for tweened value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for (f64, f64) {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (f64::lerp(&a.0, &b.0, t), f64::lerp(&a.1, &b.1, t))
    }
}

impl Lerp for ShapeAttrs {
    /// Numeric attributes interpolate; discrete attributes (paints, markers)
    /// take the target value immediately.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            fill: b.fill.clone(),
            stroke: b.stroke.clone(),
            stroke_width: f64::lerp(&a.stroke_width, &b.stroke_width, t),
            opacity: f64::lerp(&a.opacity, &b.opacity, t),
            font_px: f64::lerp(&a.font_px, &b.font_px, t),
            marker_end: b.marker_end,
            corner_radius: f64::lerp(&a.corner_radius, &b.corner_radius, t),
        }
    }
}

/// A one-shot transition from one value to another over a fixed duration.
///
/// The engine constructs tweens and hands them to the surface; sampling
/// happens on the surface's external clock. Completion is fire-and-forget:
/// no engine logic waits on a tween, and a newer mutation of the same target
/// supersedes an in-flight one.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween<T> {
    /// Start value.
    pub from: T,
    /// End value.
    pub to: T,
    /// Total duration.
    pub duration: Millis,
    /// Easing applied to progress.
    pub ease: Ease,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    /// Build a tween between two values.
    pub fn new(from: T, to: T, duration: Millis, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration,
            ease,
        }
    }

    /// Sample the tween at `elapsed`; clamps beyond either end.
    pub fn sample(&self, elapsed: Millis) -> T {
        let t = self.ease.apply(self.duration.progress(elapsed));
        T::lerp(&self.from, &self.to, t)
    }

    /// Whether the tween has reached its end state at `elapsed`.
    pub fn done(&self, elapsed: Millis) -> bool {
        elapsed >= self.duration
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
