use crate::{
    data::normalize::EntityId,
    foundation::error::{NarravisError, NarravisResult},
};

/// Categorical positional scale: entity → band start along one axis.
///
/// The domain is the fixed allow-list (display order) and never changes after
/// setup. Band geometry follows the usual padded-band construction: each
/// entity gets a band of `bandwidth()` pixels separated by padding, centered
/// within the range.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BandScale {
    domain: Vec<EntityId>,
    range: (f64, f64),
    padding: f64,
}

impl BandScale {
    /// Create a validated band scale.
    pub fn new(domain: Vec<EntityId>, range: (f64, f64), padding: f64) -> NarravisResult<Self> {
        if domain.is_empty() {
            return Err(NarravisError::validation("band domain must be non-empty"));
        }
        if !range.0.is_finite() || !range.1.is_finite() || range.0 >= range.1 {
            return Err(NarravisError::validation(
                "band range must be finite with start < end",
            ));
        }
        if !padding.is_finite() || !(0.0..1.0).contains(&padding) {
            return Err(NarravisError::validation("band padding must be in [0, 1)"));
        }
        Ok(Self {
            domain,
            range,
            padding,
        })
    }

    /// The fixed categorical domain, in display order.
    pub fn domain(&self) -> &[EntityId] {
        &self.domain
    }

    /// Distance between consecutive band starts.
    pub fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        (self.range.1 - self.range.0) / (n + self.padding)
    }

    /// Width of one band.
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Band start for `entity`, `None` when not in the domain.
    pub fn position(&self, entity: &EntityId) -> Option<f64> {
        let index = self.domain.iter().position(|e| e == entity)?;
        let n = self.domain.len() as f64;
        let extent = self.range.1 - self.range.0;
        let step = self.step();
        // Center the run of bands within the range.
        let start = self.range.0 + (extent - step * (n - self.padding)) / 2.0;
        Some(start + step * index as f64)
    }

    /// Band center for `entity`, `None` when not in the domain.
    pub fn center(&self, entity: &EntityId) -> Option<f64> {
        Some(self.position(entity)? + self.bandwidth() / 2.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/band.rs"]
mod tests;
