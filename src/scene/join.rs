use std::collections::{BTreeMap, BTreeSet};

use crate::{
    animation::ease::Ease,
    foundation::core::Millis,
    render::surface::Surface,
    scene::model::{DatumKey, Scene, SceneShape, ShapeAttrs, ShapeId, ShapeKind, ShapeTag},
};

/// Counts reported by one diff/join pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoinStats {
    /// Shapes created for newly present data.
    pub entered: usize,
    /// Shapes updated in place for still-present data.
    pub updated: usize,
    /// Shapes removed for data no longer present.
    pub exited: usize,
}

/// Optional transition applied to in-place updates during a join.
///
/// Entering shapes always appear at their final state; only updates animate,
/// which is what keeps re-entering a step visually idempotent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JoinTransition {
    /// Animation duration.
    pub duration: Millis,
    /// Easing applied to the transition.
    pub ease: Ease,
}

impl Scene {
    /// Make the live shape set under `tag` match `data` exactly.
    ///
    /// Shapes bound to data no longer present are removed; newly present data
    /// get shapes created via `encode`; still-present data are updated in
    /// place, keeping their [`ShapeId`]. Identity is the `key` function's
    /// output, so the same datum maps to the same visual identity across
    /// calls. Duplicate keys keep the first occurrence and drop the rest.
    pub fn set_shapes<D>(
        &mut self,
        tag: ShapeTag,
        data: &[D],
        key: impl Fn(&D) -> DatumKey,
        encode: impl Fn(&D) -> (ShapeKind, ShapeAttrs),
        transition: Option<JoinTransition>,
        surface: &mut dyn Surface,
    ) -> JoinStats {
        let mut stats = JoinStats::default();

        // Index the tag's live shapes by datum key.
        let mut live: BTreeMap<DatumKey, usize> = BTreeMap::new();
        for (index, shape) in self.shapes.iter().enumerate() {
            if shape.tag == tag {
                live.entry(shape.key.clone()).or_insert(index);
            }
        }

        let mut retained: Vec<bool> = vec![false; self.shapes.len()];
        let mut entering: Vec<SceneShape> = Vec::new();
        let mut seen: BTreeSet<DatumKey> = BTreeSet::new();

        for datum in data {
            let datum_key = key(datum);
            if !seen.insert(datum_key.clone()) {
                continue;
            }
            let (kind, attrs) = encode(datum);
            match live.get(&datum_key) {
                Some(&index) if !retained[index] => {
                    retained[index] = true;
                    let shape = &mut self.shapes[index];
                    shape.kind = kind.clone();
                    shape.attrs = attrs.clone();
                    shape.base_kind = kind;
                    shape.base_attrs = attrs;
                    match transition {
                        Some(t) => surface.animate(shape, t.duration, t.ease),
                        None => surface.update(shape),
                    }
                    stats.updated += 1;
                }
                _ => {
                    let id = self.alloc_id();
                    let shape = SceneShape {
                        id,
                        tag,
                        key: datum_key,
                        kind: kind.clone(),
                        attrs: attrs.clone(),
                        base_kind: kind,
                        base_attrs: attrs,
                    };
                    surface.append(&shape);
                    entering.push(shape);
                    stats.entered += 1;
                }
            }
        }

        // Exiting shapes: tagged, but not retained by any datum.
        let mut kept = Vec::with_capacity(self.shapes.len() + entering.len());
        for (index, shape) in std::mem::take(&mut self.shapes).into_iter().enumerate() {
            if shape.tag == tag && !retained[index] {
                surface.remove(shape.id, shape.tag);
                stats.exited += 1;
            } else {
                kept.push(shape);
            }
        }
        kept.extend(entering);
        self.shapes = kept;

        stats
    }

    /// Unconditionally remove all shapes under the given tags.
    ///
    /// This is the between-steps residue guarantee: it ignores datum identity
    /// entirely.
    pub fn clear_tags(&mut self, tags: &[ShapeTag], surface: &mut dyn Surface) -> usize {
        let mut removed = 0;
        self.shapes.retain(|shape| {
            if tags.contains(&shape.tag) {
                surface.remove(shape.id, shape.tag);
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    /// Move all shapes under `tag` above their siblings, preserving their
    /// relative order.
    pub fn raise(&mut self, tag: ShapeTag, surface: &mut dyn Surface) {
        let (mut tagged, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.shapes)
            .into_iter()
            .partition(|s| s.tag == tag);
        self.shapes = rest;
        self.shapes.append(&mut tagged);
        surface.raise(tag);
    }

    /// Move all shapes under `tag` below their siblings, preserving their
    /// relative order.
    pub fn lower(&mut self, tag: ShapeTag, surface: &mut dyn Surface) {
        let (tagged, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.shapes)
            .into_iter()
            .partition(|s| s.tag == tag);
        self.shapes = tagged;
        self.shapes.extend(rest);
        surface.lower(tag);
    }

    /// Move a single shape above everything else.
    pub fn raise_shape(&mut self, id: ShapeId, surface: &mut dyn Surface) {
        if let Some(index) = self.shapes.iter().position(|s| s.id == id) {
            let shape = self.shapes.remove(index);
            self.shapes.push(shape);
            surface.raise_shape(id);
        }
    }

    /// Overwrite a shape's current attributes (emphasis), leaving its base
    /// appearance untouched.
    pub fn set_attrs(&mut self, id: ShapeId, attrs: ShapeAttrs, surface: &mut dyn Surface) {
        if let Some(shape) = self.shapes.iter_mut().find(|s| s.id == id) {
            shape.attrs = attrs;
            surface.update(shape);
        }
    }

    /// Overwrite a shape's current geometry (emphasis), leaving its base
    /// appearance untouched.
    pub fn set_kind(&mut self, id: ShapeId, kind: ShapeKind, surface: &mut dyn Surface) {
        if let Some(shape) = self.shapes.iter_mut().find(|s| s.id == id) {
            shape.kind = kind;
            surface.update(shape);
        }
    }

    /// Restore every shape to its base appearance captured at the last join.
    pub fn reset_appearance(&mut self, surface: &mut dyn Surface) {
        for shape in &mut self.shapes {
            if shape.attrs != shape.base_attrs || shape.kind != shape.base_kind {
                shape.attrs = shape.base_attrs.clone();
                shape.kind = shape.base_kind.clone();
                surface.update(shape);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/join.rs"]
mod tests;
