//! Acceleration-law capability and the adapter exposing it to state propagators.

use edelbaum_core::vector::{self, Vector3};
use edelbaum_orbits::StateVector;

use crate::error::{GuidanceError, SingularityError};

/// A thrust law evaluated once per integration step.
///
/// `elapsed_s` is the time since the start of the current thrust arc, not mission time.
pub trait AccelerationLaw {
    fn evaluate(&self, elapsed_s: f64, state: &StateVector) -> Result<Vector3, GuidanceError>;
}

impl<L: AccelerationLaw + ?Sized> AccelerationLaw for &L {
    fn evaluate(&self, elapsed_s: f64, state: &StateVector) -> Result<Vector3, GuidanceError> {
        (**self).evaluate(elapsed_s, state)
    }
}

/// Two-body dynamics perturbed by an [`AccelerationLaw`], on a flat `[x, y, z, vx, vy, vz]`
/// state (km, km/s).
#[derive(Debug, Clone, Copy)]
pub struct ThrustedTwoBody<L> {
    mu_km3_s2: f64,
    arc_start_s: f64,
    law: L,
}

impl<L: AccelerationLaw> ThrustedTwoBody<L> {
    pub fn new(mu_km3_s2: f64, law: L) -> Self {
        Self {
            mu_km3_s2,
            arc_start_s: 0.0,
            law,
        }
    }

    /// Propagator time at which the thrust arc begins.
    pub fn with_arc_start(mut self, arc_start_s: f64) -> Self {
        self.arc_start_s = arc_start_s;
        self
    }

    pub fn law(&self) -> &L {
        &self.law
    }

    /// Thrust acceleration alone at propagator time `t`.
    pub fn thrust(&self, t: f64, y: &[f64; 6]) -> Result<Vector3, GuidanceError> {
        self.law.evaluate(t - self.arc_start_s, &StateVector::from_array(y))
    }

    /// Evaluate `dy/dt` at propagator time `t`.
    pub fn rhs(&self, t: f64, y: &[f64; 6], dydt: &mut [f64; 6]) -> Result<(), GuidanceError> {
        let r = [y[0], y[1], y[2]];
        let r_mag = vector::norm(&r);
        let mu_r3 = self.mu_km3_s2 / (r_mag * r_mag * r_mag);
        // Non-finite positions are left to the law, which reports them as such.
        if r_mag.is_finite() && !mu_r3.is_finite() {
            return Err(SingularityError::ZeroRadius(r_mag).into());
        }

        let thrust = self.thrust(t, y)?;

        dydt[0] = y[3];
        dydt[1] = y[4];
        dydt[2] = y[5];
        dydt[3] = -mu_r3 * y[0] + thrust[0];
        dydt[4] = -mu_r3 * y[1] + thrust[1];
        dydt[5] = -mu_r3 * y[2] + thrust[2];
        Ok(())
    }
}
