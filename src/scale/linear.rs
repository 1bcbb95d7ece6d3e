use crate::foundation::error::{NarravisError, NarravisResult};

/// Numeric value scale: linear map from a data domain to a pixel range.
///
/// The domain is mutable across narrative steps (always re-derived from the
/// subset about to be rendered); the range is fixed at construction. Ranges
/// may be inverted (`start > end`) for screen-space y axes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Create a validated linear scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> NarravisResult<Self> {
        validate_domain(domain)?;
        if !range.0.is_finite() || !range.1.is_finite() || range.0 == range.1 {
            return Err(NarravisError::validation(
                "linear range must be finite and non-degenerate",
            ));
        }
        Ok(Self { domain, range })
    }

    /// The current domain `(min, max)`.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Replace the domain, e.g. when a step re-fits the scale to its subset.
    pub fn set_domain(&mut self, domain: (f64, f64)) -> NarravisResult<()> {
        validate_domain(domain)?;
        self.domain = domain;
        Ok(())
    }

    /// Map a domain value to a range coordinate. Values outside the domain
    /// extrapolate linearly (off-scale points render off the plot area).
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = (value - d0) / (d1 - d0);
        r0 + (r1 - r0) * t
    }

    /// Round-number tick values covering the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let count = count.max(1) as f64;
        let raw_step = (d1 - d0) / count;
        let magnitude = 10f64.powf(raw_step.log10().floor());
        let residual = raw_step / magnitude;
        let nice = if residual >= 5.0 {
            10.0
        } else if residual >= 2.0 {
            5.0
        } else if residual >= 1.0 {
            2.0
        } else {
            1.0
        };
        let step = nice * magnitude;
        let mut ticks = Vec::new();
        let mut v = (d0 / step).ceil() * step;
        while v <= d1 + step * 1e-9 {
            ticks.push(v);
            v += step;
        }
        ticks
    }
}

fn validate_domain(domain: (f64, f64)) -> NarravisResult<()> {
    if !domain.0.is_finite() || !domain.1.is_finite() || domain.0 >= domain.1 {
        return Err(NarravisError::validation(
            "linear domain must be finite with min < max",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scale/linear.rs"]
mod tests;
