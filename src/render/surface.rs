use kurbo::Point;

use crate::{
    animation::ease::Ease,
    foundation::core::Millis,
    scene::model::{SceneShape, ShapeId, ShapeTag},
};

/// An animated axis redraw scheduled on the external rendering clock.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisUpdate {
    /// New value-scale domain `(min, max)`.
    pub y_domain: (f64, f64),
    /// Tick values for the redrawn value axis.
    pub y_ticks: Vec<f64>,
    /// Animation duration.
    pub duration: Millis,
    /// Easing applied to the redraw.
    pub ease: Ease,
}

/// The drawing surface abstraction the scene renders through.
///
/// This is the engine's only rendering dependency: a DOM/SVG adapter, a
/// canvas adapter, or the in-memory [`RecordingSurface`] used in tests. All
/// methods are synchronous and infallible from the engine's perspective;
/// `animate` enqueues work on the surface's own clock and is fire-and-forget
/// (a later mutation on the same shape supersedes any in-flight animation).
pub trait Surface {
    /// A shape entered the scene.
    fn append(&mut self, shape: &SceneShape);

    /// A shape changed in place (same identity, new geometry/attributes).
    fn update(&mut self, shape: &SceneShape);

    /// A shape changed in place; animate toward the new snapshot.
    fn animate(&mut self, shape: &SceneShape, duration: Millis, ease: Ease);

    /// A shape left the scene.
    fn remove(&mut self, id: ShapeId, tag: ShapeTag);

    /// All shapes under `tag` moved above their siblings.
    fn raise(&mut self, tag: ShapeTag);

    /// All shapes under `tag` moved below their siblings.
    fn lower(&mut self, tag: ShapeTag);

    /// One shape moved above everything else.
    fn raise_shape(&mut self, id: ShapeId);

    /// The value axis re-fit its domain; redraw both axes animated.
    fn update_axes(&mut self, update: &AxisUpdate);

    /// Narration/caption text for the active step.
    fn narrate(&mut self, text: &str);

    /// Show the hover tooltip with pre-formatted text at screen coordinates.
    fn show_tooltip(&mut self, text: &str, at: Point);

    /// Hide the hover tooltip.
    fn hide_tooltip(&mut self);
}

/// One recorded surface call.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    /// `append` was called.
    Append(SceneShape),
    /// `update` was called.
    Update(SceneShape),
    /// `animate` was called.
    Animate(SceneShape, Millis, Ease),
    /// `remove` was called.
    Remove(ShapeId, ShapeTag),
    /// `raise` was called.
    Raise(ShapeTag),
    /// `lower` was called.
    Lower(ShapeTag),
    /// `raise_shape` was called.
    RaiseShape(ShapeId),
    /// `update_axes` was called.
    Axes(AxisUpdate),
    /// `narrate` was called.
    Narrate(String),
    /// `show_tooltip` was called.
    ShowTooltip(String, Point),
    /// `hide_tooltip` was called.
    HideTooltip,
}

/// In-memory surface that records every call, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    /// Create an empty recording surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events in call order.
    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    /// Drop recorded events, keeping the surface usable.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// The most recent narration text, if any.
    pub fn last_narration(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Narrate(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// The most recent axis update, if any.
    pub fn last_axes(&self) -> Option<&AxisUpdate> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Axes(update) => Some(update),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn append(&mut self, shape: &SceneShape) {
        self.events.push(SurfaceEvent::Append(shape.clone()));
    }

    fn update(&mut self, shape: &SceneShape) {
        self.events.push(SurfaceEvent::Update(shape.clone()));
    }

    fn animate(&mut self, shape: &SceneShape, duration: Millis, ease: Ease) {
        self.events
            .push(SurfaceEvent::Animate(shape.clone(), duration, ease));
    }

    fn remove(&mut self, id: ShapeId, tag: ShapeTag) {
        self.events.push(SurfaceEvent::Remove(id, tag));
    }

    fn raise(&mut self, tag: ShapeTag) {
        self.events.push(SurfaceEvent::Raise(tag));
    }

    fn lower(&mut self, tag: ShapeTag) {
        self.events.push(SurfaceEvent::Lower(tag));
    }

    fn raise_shape(&mut self, id: ShapeId) {
        self.events.push(SurfaceEvent::RaiseShape(id));
    }

    fn update_axes(&mut self, update: &AxisUpdate) {
        self.events.push(SurfaceEvent::Axes(update.clone()));
    }

    fn narrate(&mut self, text: &str) {
        self.events.push(SurfaceEvent::Narrate(text.to_string()));
    }

    fn show_tooltip(&mut self, text: &str, at: Point) {
        self.events
            .push(SurfaceEvent::ShowTooltip(text.to_string(), at));
    }

    fn hide_tooltip(&mut self) {
        self.events.push(SurfaceEvent::HideTooltip);
    }
}
