use kurbo::{Point, Rect};

/// Stable identity of one rendered shape.
///
/// Ids are allocated by the owning [`Scene`] and survive in-place updates:
/// the same bound datum keeps the same id across joins, which is what lets a
/// surface animate updates instead of remove/recreate flicker.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ShapeId(pub u64);

/// Class tag identifying which step/category produced a shape.
///
/// Tags are the unit of clearing and z-order control; each maps to the CSS
/// class the surface renders it under.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum ShapeTag {
    /// Per-entity mean line.
    AverageLine,
    /// One point per record in the narrative steps.
    ScatterPoint,
    /// The emphasized reference-record point.
    HighlightPoint,
    /// Annotation text and callout boxes.
    HighlightLabel,
    /// Annotation arrow segments.
    ArrowShaft,
    /// Translucent gradient cap signalling off-scale clipping.
    CapRect,
    /// One point per record in the overview chart.
    Dot,
    /// Per-entity maximum point in the overview chart.
    TopDot,
}

impl ShapeTag {
    /// Every tag, in a stable order.
    pub const ALL: [ShapeTag; 8] = [
        ShapeTag::AverageLine,
        ShapeTag::ScatterPoint,
        ShapeTag::HighlightPoint,
        ShapeTag::HighlightLabel,
        ShapeTag::ArrowShaft,
        ShapeTag::CapRect,
        ShapeTag::Dot,
        ShapeTag::TopDot,
    ];

    /// Surface-facing class name for this tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AverageLine => "average-line",
            Self::ScatterPoint => "scatter-point",
            Self::HighlightPoint => "highlight-point",
            Self::HighlightLabel => "highlight-label",
            Self::ArrowShaft => "arrow-shaft",
            Self::CapRect => "cap-rect",
            Self::Dot => "dot",
            Self::TopDot => "top-dot",
        }
    }
}

/// Identity of the datum a shape is bound to.
///
/// Keys are what make the diff/join referentially stable: the same datum maps
/// to the same key (and therefore the same [`ShapeId`]) across joins.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct DatumKey(String);

impl DatumKey {
    /// Build a key from any stable string identity.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key for a record by its index in the normalized record slice.
    pub fn record(index: usize) -> Self {
        Self(format!("rec:{index}"))
    }

    /// Key for a per-entity aggregate datum.
    pub fn entity(entity: &crate::data::normalize::EntityId) -> Self {
        Self(format!("ent:{entity}"))
    }

    /// Key for an annotation literal, namespaced by what it annotates.
    pub fn annotation(namespace: &str, detail: &str) -> Self {
        Self(format!("ann:{namespace}:{detail}"))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Geometry of a rendered visual primitive.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ShapeKind {
    /// A filled circle.
    Circle {
        /// Center in canvas coordinates.
        center: Point,
        /// Radius in pixels.
        radius: f64,
    },
    /// A line segment.
    Segment {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
    },
    /// An axis-aligned rectangle.
    Frame {
        /// The rectangle in canvas coordinates.
        rect: Rect,
    },
    /// A text label.
    Label {
        /// Anchor origin.
        origin: Point,
        /// Text content.
        text: String,
    },
    /// A circular arc sector (pie slice).
    Arc {
        /// Arc center.
        center: Point,
        /// Outer radius in pixels.
        radius: f64,
        /// Start angle in radians.
        start: f64,
        /// Sweep in radians.
        sweep: f64,
    },
}

/// Visual attributes of a shape.
///
/// Paint values are CSS color strings or a named paint (e.g. a gradient id)
/// that the surface resolves; the engine treats them as opaque.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeAttrs {
    /// Fill paint, `None` for unfilled shapes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Stroke paint, `None` for unstroked shapes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Stroke width in pixels.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Font size in pixels, for labels.
    #[serde(default)]
    pub font_px: f64,
    /// Whether segments end in an arrowhead marker.
    #[serde(default)]
    pub marker_end: bool,
    /// Corner radius, for rectangles.
    #[serde(default)]
    pub corner_radius: f64,
}

fn default_stroke_width() -> f64 {
    1.0
}

fn default_opacity() -> f64 {
    1.0
}

impl Default for ShapeAttrs {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: default_stroke_width(),
            opacity: default_opacity(),
            font_px: 0.0,
            marker_end: false,
            corner_radius: 0.0,
        }
    }
}

impl ShapeAttrs {
    /// Filled shape with default opacity.
    pub fn filled(paint: impl Into<String>) -> Self {
        Self {
            fill: Some(paint.into()),
            ..Self::default()
        }
    }

    /// Stroked shape with the given width.
    pub fn stroked(paint: impl Into<String>, width: f64) -> Self {
        Self {
            stroke: Some(paint.into()),
            stroke_width: width,
            ..Self::default()
        }
    }

    /// Builder-style opacity override.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

/// One rendered visual primitive bound to exactly one source datum.
///
/// `kind`/`attrs` are the current state; `base_kind`/`base_attrs` are the
/// default appearance captured at the last join, which interaction layers
/// restore when their emphasis is withdrawn.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneShape {
    /// Stable shape identity.
    pub id: ShapeId,
    /// Class tag identifying the producing step/category.
    pub tag: ShapeTag,
    /// Identity of the bound datum.
    pub key: DatumKey,
    /// Current geometry.
    pub kind: ShapeKind,
    /// Current attributes.
    pub attrs: ShapeAttrs,
    /// Default geometry as of the last join.
    pub base_kind: ShapeKind,
    /// Default attributes as of the last join.
    pub base_attrs: ShapeAttrs,
}

/// The complete set of currently rendered shapes, in paint order.
///
/// Created at session start and owned by the narrative controller; every
/// mutation goes through the join/clear/z-order operations in
/// [`crate::scene::join`], which mirror each change to the surface.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub(crate) shapes: Vec<SceneShape>,
    pub(crate) next_id: u64,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// All shapes in paint order (later shapes render on top).
    pub fn shapes(&self) -> &[SceneShape] {
        &self.shapes
    }

    /// Shapes under one tag, in paint order.
    pub fn shapes_tagged(&self, tag: ShapeTag) -> impl Iterator<Item = &SceneShape> {
        self.shapes.iter().filter(move |s| s.tag == tag)
    }

    /// Look up a shape by id.
    pub fn get(&self, id: ShapeId) -> Option<&SceneShape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Number of shapes in the scene.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub(crate) fn alloc_id(&mut self) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
