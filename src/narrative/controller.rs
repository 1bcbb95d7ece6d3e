use kurbo::{Point, Rect};

use crate::{
    config::ChartConfig,
    data::aggregate::{GroupStat, find_reference, group_stats, max_metric, top_k_all},
    data::normalize::{EntityId, Record},
    foundation::core::PlotFrame,
    foundation::error::{NarravisError, NarravisResult},
    foundation::format::money0,
    narrative::step::NarrativeStep,
    render::surface::Surface,
    scale::axis::AxisController,
    scene::join::JoinTransition,
    scene::model::{DatumKey, Scene, ShapeAttrs, ShapeKind, ShapeTag},
};

/// Fixed lower bound of the average-lines domain.
const BASELINE_MIN: f64 = 70_000.0;
/// Headroom added above the largest group mean.
const MEAN_HEADROOM: f64 = 10_000.0;

const AVG_STROKE: &str = "#ACFAD8";
const AVG_STROKE_WIDTH: f64 = 2.0;
const POINT_FILL: &str = "#519FAB";
const POINT_RADIUS: f64 = 5.0;
const HIGHLIGHT_FILL: &str = "#79D0B4";
const HIGHLIGHT_RADIUS: f64 = 8.0;
const ANNOTATION_PAINT: &str = "white";
const CALLOUT_FILL: &str = "rgba(21, 31, 44, 0.8)";
/// Named paint the surface resolves to a top-down fade gradient.
const CAP_PAINT: &str = "cap-fade";
const LABEL_FONT_PX: f64 = 14.0;
const CAPTION_FONT_PX: f64 = 12.0;
const LABEL_DX: f64 = 100.0;
const LABEL_DY: f64 = -10.0;
const POINT_OPACITY: f64 = 0.3;

/// Result of a completed step transition.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    /// The step that was entered.
    pub step: NarrativeStep,
    /// Narration text forwarded to the surface (empty for [`NarrativeStep::Clear`]).
    pub narration: String,
    /// Value-scale domain after the transition.
    pub y_domain: (f64, f64),
}

/// One literal annotation shape, keyed for the join.
struct Annotation {
    key: DatumKey,
    kind: ShapeKind,
    attrs: ShapeAttrs,
}

/// Drives the shared scene through the narrative steps.
///
/// The controller owns the scene, the scales, and the normalized data for one
/// visualization session. Step entry points are synchronous and total: inputs
/// are pre-validated, so the only failure path is the missing-reference case,
/// which aborts before any scene mutation.
pub struct StepController {
    records: Vec<Record>,
    stats: Vec<GroupStat>,
    entities: Vec<EntityId>,
    reference_name: String,
    top_k: usize,
    frame: PlotFrame,
    axes: AxisController,
    scene: Scene,
    active: Option<NarrativeStep>,
}

impl StepController {
    /// Create a controller over pre-normalized records.
    ///
    /// The initial value-scale domain is the average-lines domain so the
    /// first step entry does not replay the axis animation.
    pub fn new(config: &ChartConfig, records: Vec<Record>) -> NarravisResult<Self> {
        config.validate()?;
        let frame = config.frame()?;
        let entities = config.entity_ids();
        let stats = group_stats(&records, &entities);
        let initial_domain = average_domain(&stats);
        let axes = AxisController::new(
            &frame,
            entities.clone(),
            config.band_padding,
            initial_domain,
            config.transition,
        )?;
        Ok(Self {
            records,
            stats,
            entities,
            reference_name: config.reference_name.clone(),
            top_k: config.top_k,
            frame,
            axes,
            scene: Scene::new(),
            active: None,
        })
    }

    /// The normalized records this session renders.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Per-entity aggregates, in allow-list order.
    pub fn stats(&self) -> &[GroupStat] {
        &self.stats
    }

    /// Index of the reference record, when present.
    pub fn reference(&self) -> Option<usize> {
        find_reference(&self.records, &self.reference_name)
    }

    /// The scale/axis controller.
    pub fn axes(&self) -> &AxisController {
        &self.axes
    }

    /// The current scene, read-only.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access for the interaction layer.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The currently active step, if any.
    pub fn active(&self) -> Option<NarrativeStep> {
        self.active
    }

    /// Enter a narrative step.
    ///
    /// Clears the step's declared tag set, re-fits the axis domain, rebuilds
    /// the step's shapes through the join, and forwards narration to the
    /// surface. Entering the same step twice in a row yields an identical
    /// scene. On error the previous scene is left untouched.
    #[tracing::instrument(skip(self, surface), fields(step = step.name()))]
    pub fn enter(
        &mut self,
        step: NarrativeStep,
        surface: &mut dyn Surface,
    ) -> NarravisResult<StepOutcome> {
        // Validate before mutating anything so an aborted transition never
        // leaves a mixed scene.
        let reference = self.reference();
        if step == NarrativeStep::HighlightReference {
            let Some(index) = reference else {
                tracing::warn!(name = %self.reference_name, "reference record missing; step aborted");
                return Err(NarravisError::step(format!(
                    "reference record '{}' not found in filtered records",
                    self.reference_name
                )));
            };
            self.scene.clear_tags(step.cleared_tags(), surface);
            let narration = self.step_highlight_reference(index, surface)?;
            return self.finish(step, narration, surface);
        }

        self.scene.clear_tags(step.cleared_tags(), surface);

        let narration = match step {
            NarrativeStep::AverageLines => self.step_average_lines(reference, surface)?,
            NarrativeStep::HighlightReference => String::new(),
            NarrativeStep::AllEntries => self.step_all_entries(surface)?,
            NarrativeStep::RescaleFull => self.step_rescale_full(surface)?,
            NarrativeStep::FilterTopK => self.step_filter_top_k(surface)?,
            NarrativeStep::Clear => String::new(),
        };
        self.finish(step, narration, surface)
    }

    fn finish(
        &mut self,
        step: NarrativeStep,
        narration: String,
        surface: &mut dyn Surface,
    ) -> NarravisResult<StepOutcome> {
        self.active = Some(step);
        if !narration.is_empty() {
            surface.narrate(&narration);
        }
        tracing::debug!(shapes = self.scene.len(), "step entered");
        Ok(StepOutcome {
            step,
            narration,
            y_domain: self.axes.y().domain(),
        })
    }

    fn step_average_lines(
        &mut self,
        reference: Option<usize>,
        surface: &mut dyn Surface,
    ) -> NarravisResult<String> {
        let domain = average_domain(&self.stats);
        self.axes.refit_y(domain, surface)?;
        self.join_average_lines(surface);

        // Annotate the reference entity's average line. The reference may be
        // legitimately absent in this step; only HighlightReference treats
        // that as fatal.
        match reference {
            Some(index) => {
                let entity = self.records[index].entity().clone();
                let mean = self
                    .stats
                    .iter()
                    .find(|s| s.entity == entity)
                    .map(|s| s.mean);
                if let Some(mean) = mean {
                    let cx = self.axes.x().center(&entity).unwrap_or_default();
                    let cy = self.axes.y().map(mean);
                    let text =
                        format!("{} has an average salary of {}.", entity, money0(mean));
                    self.set_annotations(
                        ShapeTag::HighlightLabel,
                        vec![label_annotation("avg", entity.as_str(), cx, cy, text)],
                        surface,
                    );
                    self.set_annotations(
                        ShapeTag::ArrowShaft,
                        vec![arrow_annotation("avg", entity.as_str(), cx, cy)],
                        surface,
                    );
                }
            }
            None => {
                tracing::debug!(name = %self.reference_name, "no reference record; baseline annotation skipped");
            }
        }

        Ok("Let's start off with the average salary for each university...".to_string())
    }

    fn step_highlight_reference(
        &mut self,
        index: usize,
        surface: &mut dyn Surface,
    ) -> NarravisResult<String> {
        let domain = average_domain(&self.stats);
        self.axes.refit_y(domain, surface)?;
        self.join_average_lines(surface);

        let record = self.records[index].clone();
        let entity = record.entity().clone();
        let cx = self.axes.x().center(&entity).unwrap_or_default();
        let cy = self.axes.y().map(record.metric());

        let highlight = Annotation {
            key: DatumKey::record(index),
            kind: ShapeKind::Circle {
                center: Point::new(cx, cy),
                radius: HIGHLIGHT_RADIUS,
            },
            attrs: ShapeAttrs::filled(HIGHLIGHT_FILL),
        };
        self.set_annotations(ShapeTag::HighlightPoint, vec![highlight], surface);

        let text = format!(
            "This is {} with a salary of {}.",
            record.label(),
            money0(record.metric())
        );
        self.set_annotations(
            ShapeTag::HighlightLabel,
            vec![label_annotation("ref", record.label(), cx, cy, text)],
            surface,
        );
        self.set_annotations(
            ShapeTag::ArrowShaft,
            vec![arrow_annotation("ref", record.label(), cx, cy)],
            surface,
        );

        Ok(format!(
            "Let's look closer at the entry closest to the {entity} average."
        ))
    }

    fn step_all_entries(&mut self, surface: &mut dyn Surface) -> NarravisResult<String> {
        let domain = average_domain(&self.stats);
        self.axes.refit_y(domain, surface)?;

        self.join_scatter_points(None, None, surface);
        self.join_average_lines(surface);
        // Points render behind the average lines.
        self.scene.lower(ShapeTag::ScatterPoint, surface);

        // Entities whose maxima exceed the visible range get an upward arrow;
        // the last of them carries the caption block.
        let (_, domain_max) = self.axes.y().domain();
        let off_scale: Vec<EntityId> = self
            .stats
            .iter()
            .filter(|stat| {
                stat.max_record(&self.records)
                    .is_some_and(|r| r.metric() > domain_max)
            })
            .map(|stat| stat.entity.clone())
            .collect();

        let top = self.frame.top();
        let mut arrows = Vec::new();
        let mut labels = Vec::new();
        for entity in &off_scale {
            let cx = self.axes.x().center(entity).unwrap_or_default();
            arrows.push(Annotation {
                key: DatumKey::annotation("clip", entity.as_str()),
                kind: ShapeKind::Segment {
                    from: Point::new(cx + 40.0, top + 30.0),
                    to: Point::new(cx + 10.0, top - 20.0),
                },
                attrs: ShapeAttrs {
                    marker_end: true,
                    ..ShapeAttrs::stroked(ANNOTATION_PAINT, 2.0)
                },
            });
        }
        if let Some(entity) = off_scale.last() {
            let cx = self.axes.x().center(entity).unwrap_or_default();
            labels.push(Annotation {
                key: DatumKey::annotation("callout", "box"),
                kind: ShapeKind::Frame {
                    rect: Rect::new(cx - 250.0, top + 35.0, cx + 150.0, top + 120.0),
                },
                attrs: ShapeAttrs {
                    corner_radius: 10.0,
                    ..ShapeAttrs::filled(CALLOUT_FILL)
                },
            });
            for (line, text) in [
                "There seems to be a lot more entries in these universities...",
                "This is because these universities have some very highly paid faculty.",
                "Let's redraw the chart to have a scale that shows the rest!",
            ]
            .iter()
            .enumerate()
            {
                labels.push(Annotation {
                    key: DatumKey::annotation("callout", &format!("line-{line}")),
                    kind: ShapeKind::Label {
                        origin: Point::new(cx - 50.0, top + 55.0 + 25.0 * line as f64),
                        text: (*text).to_string(),
                    },
                    attrs: ShapeAttrs {
                        fill: Some(ANNOTATION_PAINT.to_string()),
                        font_px: CAPTION_FONT_PX,
                        ..ShapeAttrs::default()
                    },
                });
            }
        }
        self.set_annotations(ShapeTag::ArrowShaft, arrows, surface);
        self.set_annotations(ShapeTag::HighlightLabel, labels, surface);

        // Translucent cap over the top margin signalling off-scale clipping.
        let cap = Annotation {
            key: DatumKey::annotation("cap", "top"),
            kind: ShapeKind::Frame {
                rect: Rect::new(0.0, 0.0, f64::from(self.frame.canvas.width), top),
            },
            attrs: ShapeAttrs::filled(CAP_PAINT),
        };
        self.set_annotations(ShapeTag::CapRect, vec![cap], surface);
        self.scene.raise(ShapeTag::CapRect, surface);

        Ok("But when we add the rest of the entries, it doesn't fit on the chart...".to_string())
    }

    fn step_rescale_full(&mut self, surface: &mut dyn Surface) -> NarravisResult<String> {
        let all: Vec<usize> = (0..self.records.len()).collect();
        let upper = max_metric(&self.records, all).unwrap_or(BASELINE_MIN);
        self.axes.refit_y((0.0, upper.max(1.0)), surface)?;

        let transition = Some(JoinTransition {
            duration: self.axes.transition(),
            ease: Default::default(),
        });
        self.join_scatter_points(None, transition, surface);
        self.join_average_lines_animated(transition, surface);
        self.scene.lower(ShapeTag::ScatterPoint, surface);

        Ok("That's much better! We can see the rest of the chart.".to_string())
    }

    fn step_filter_top_k(&mut self, surface: &mut dyn Surface) -> NarravisResult<String> {
        let indices = top_k_all(&self.records, &self.entities, self.top_k);
        let upper = max_metric(&self.records, indices.iter().copied()).unwrap_or(BASELINE_MIN);
        self.axes.refit_y((0.0, upper.max(1.0)), surface)?;

        let transition = Some(JoinTransition {
            duration: self.axes.transition(),
            ease: Default::default(),
        });
        self.join_scatter_points(Some(indices), transition, surface);

        Ok(format!(
            "Filtering this data for the top {} highest paid faculty members shows us something interesting...",
            self.top_k
        ))
    }

    /// Reconcile the per-entity average lines against the current scale.
    fn join_average_lines(&mut self, surface: &mut dyn Surface) {
        self.join_average_lines_animated(None, surface);
    }

    fn join_average_lines_animated(
        &mut self,
        transition: Option<JoinTransition>,
        surface: &mut dyn Surface,
    ) {
        let axes = &self.axes;
        self.scene.set_shapes(
            ShapeTag::AverageLine,
            &self.stats,
            |stat| DatumKey::entity(&stat.entity),
            |stat| {
                let x0 = axes.x().position(&stat.entity).unwrap_or_default();
                let y = axes.y().map(stat.mean);
                (
                    ShapeKind::Segment {
                        from: Point::new(x0, y),
                        to: Point::new(x0 + axes.x().bandwidth(), y),
                    },
                    ShapeAttrs::stroked(AVG_STROKE, AVG_STROKE_WIDTH),
                )
            },
            transition,
            surface,
        );
    }

    /// Reconcile scatter points for `subset` (all records when `None`).
    fn join_scatter_points(
        &mut self,
        subset: Option<Vec<usize>>,
        transition: Option<JoinTransition>,
        surface: &mut dyn Surface,
    ) {
        let indices = subset.unwrap_or_else(|| (0..self.records.len()).collect());
        let records = &self.records;
        let axes = &self.axes;
        self.scene.set_shapes(
            ShapeTag::ScatterPoint,
            &indices,
            |i| DatumKey::record(*i),
            |i| {
                let record = &records[*i];
                let cx = axes.x().center(record.entity()).unwrap_or_default();
                let cy = axes.y().map(record.metric());
                (
                    ShapeKind::Circle {
                        center: Point::new(cx, cy),
                        radius: POINT_RADIUS,
                    },
                    ShapeAttrs::filled(POINT_FILL).with_opacity(POINT_OPACITY),
                )
            },
            transition,
            surface,
        );
    }

    fn set_annotations(
        &mut self,
        tag: ShapeTag,
        items: Vec<Annotation>,
        surface: &mut dyn Surface,
    ) {
        self.scene.set_shapes(
            tag,
            &items,
            |a| a.key.clone(),
            |a| (a.kind.clone(), a.attrs.clone()),
            None,
            surface,
        );
    }
}

/// The average-lines domain: fixed floor, headroom above the largest mean.
fn average_domain(stats: &[GroupStat]) -> (f64, f64) {
    let max_mean = stats.iter().map(|s| s.mean).fold(0.0, f64::max);
    let upper = (max_mean + MEAN_HEADROOM).max(BASELINE_MIN + MEAN_HEADROOM);
    (BASELINE_MIN, upper)
}

fn label_annotation(namespace: &str, detail: &str, cx: f64, cy: f64, text: String) -> Annotation {
    Annotation {
        key: DatumKey::annotation(namespace, detail),
        kind: ShapeKind::Label {
            origin: Point::new(cx + LABEL_DX, cy + LABEL_DY),
            text,
        },
        attrs: ShapeAttrs {
            fill: Some(ANNOTATION_PAINT.to_string()),
            font_px: LABEL_FONT_PX,
            ..ShapeAttrs::default()
        },
    }
}

fn arrow_annotation(namespace: &str, detail: &str, cx: f64, cy: f64) -> Annotation {
    Annotation {
        key: DatumKey::annotation(&format!("{namespace}-arrow"), detail),
        kind: ShapeKind::Segment {
            from: Point::new(cx + LABEL_DX - 10.0, cy + LABEL_DY),
            to: Point::new(cx + 25.0, cy),
        },
        attrs: ShapeAttrs {
            marker_end: true,
            ..ShapeAttrs::stroked(ANNOTATION_PAINT, 2.0)
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/narrative/controller.rs"]
mod tests;
