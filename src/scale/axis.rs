use crate::{
    animation::ease::Ease,
    data::normalize::EntityId,
    foundation::core::{Millis, PlotFrame},
    foundation::error::NarravisResult,
    render::surface::{AxisUpdate, Surface},
    scale::band::BandScale,
    scale::linear::LinearScale,
};

/// Tick count requested for value-axis redraws.
const Y_TICK_COUNT: usize = 8;

/// Owns the two chart scales and animates axis redraws.
///
/// The categorical scale's domain is fixed for the session; the value scale
/// re-fits on demand, always from the data subset about to be rendered. Every
/// re-fit emits one animated [`AxisUpdate`]; if an earlier redraw is still
/// playing on the surface clock, the new one supersedes it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisController {
    x: BandScale,
    y: LinearScale,
    transition: Millis,
}

impl AxisController {
    /// Create scales fitted to the plot frame.
    ///
    /// The value scale starts with `initial_domain` and maps into the frame's
    /// inverted y range.
    pub fn new(
        frame: &PlotFrame,
        entities: Vec<EntityId>,
        band_padding: f64,
        initial_domain: (f64, f64),
        transition: Millis,
    ) -> NarravisResult<Self> {
        Ok(Self {
            x: BandScale::new(entities, frame.x_range(), band_padding)?,
            y: LinearScale::new(initial_domain, frame.y_range())?,
            transition,
        })
    }

    /// The categorical positional scale.
    pub fn x(&self) -> &BandScale {
        &self.x
    }

    /// The numeric value scale.
    pub fn y(&self) -> &LinearScale {
        &self.y
    }

    /// The fixed transition duration used for axis redraws.
    pub fn transition(&self) -> Millis {
        self.transition
    }

    /// Re-fit the value scale to `domain` and redraw both axes animated.
    ///
    /// A no-op when the domain is unchanged, so re-entering a step does not
    /// replay the axis animation.
    pub fn refit_y(&mut self, domain: (f64, f64), surface: &mut dyn Surface) -> NarravisResult<()> {
        if self.y.domain() == domain {
            return Ok(());
        }
        self.y.set_domain(domain)?;
        surface.update_axes(&AxisUpdate {
            y_domain: domain,
            y_ticks: self.y.ticks(Y_TICK_COUNT),
            duration: self.transition,
            ease: Ease::default(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/axis.rs"]
mod tests;
