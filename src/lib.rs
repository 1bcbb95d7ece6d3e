//! Narravis is a narrative step engine for animated data visualizations.
//!
//! The engine drives a single shared scene through an ordered sequence of
//! distinct visual states ("steps"), each with its own data subset, axis
//! domain, annotation overlays, and transition animation, while guaranteeing
//! that leftover artifacts from a previous step never bleed into the next.
//!
//! # Pipeline overview
//!
//! 1. **Normalize**: raw tabular rows → typed [`Record`]s (allow-list filter,
//!    numeric coercion, derived fields)
//! 2. **Aggregate**: records → per-entity [`GroupStat`]s (mean, max, top-K)
//! 3. **Step**: [`StepController`] clears declared tags, re-fits the value
//!    scale, and reconciles the scene through a keyed diff/join
//! 4. **Render**: every scene mutation is mirrored to a [`Surface`], which
//!    owns the actual drawing and the animation clock
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Synchronous, total transitions**: a step either applies fully or (for
//!   the one fatal case, a missing reference record) leaves the previous
//!   scene untouched.
//! - **Idempotent steps**: entering the same step twice in a row produces an
//!   identical scene.
//! - **No IO past the boundary**: tabular input is front-loaded in
//!   [`read_csv_path`]; everything downstream is pure.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod chart;
mod config;
mod data;
mod foundation;
mod interact;
mod narrative;
mod render;
mod scale;
mod scene;

pub use animation::ease::Ease;
pub use animation::tween::{Lerp, Tween};
pub use chart::overview::render_overview;
pub use config::{ChartConfig, SalaryColumns, TuitionColumns};
pub use data::aggregate::{
    GroupStat, find_reference, group_stats, max_metric, top_k, top_k_all,
};
pub use data::normalize::{
    EntityId, Record, SalaryRecord, TuitionRecord, coerce_number, normalize_salaries,
    normalize_tuition,
};
pub use data::table::{RawRow, RawTable, read_csv, read_csv_path};
pub use foundation::core::{Canvas, Margins, Millis, PlotFrame, Point, Rect, Vec2};
pub use foundation::error::{NarravisError, NarravisResult};
pub use foundation::format::{NOT_AVAILABLE, money0, ratio2};
pub use interact::hover::{Tooltip, hover_enter, hover_exit, tooltip_for};
pub use interact::search::apply_search;
pub use narrative::controller::{StepController, StepOutcome};
pub use narrative::step::NarrativeStep;
pub use render::surface::{AxisUpdate, RecordingSurface, Surface, SurfaceEvent};
pub use scale::axis::AxisController;
pub use scale::band::BandScale;
pub use scale::linear::LinearScale;
pub use scene::join::{JoinStats, JoinTransition};
pub use scene::model::{
    DatumKey, Scene, SceneShape, ShapeAttrs, ShapeId, ShapeKind, ShapeTag,
};
