//! Edelbaum guidance law, reformulated by Kéchichian, for transfers between circular
//! inclined orbits `(a_0, i_0) -> (a_f, i_f)` at constant thrust acceleration.
//!
//! References:
//! - Edelbaum, T. N. "Propulsion Requirements for Controllable Satellites", 1961.
//! - Kéchichian, J. A. "Reformulation of Edelbaum's Low-Thrust Transfer Problem Using
//!   Optimal Control Theory", 1997.

use std::f64::consts::FRAC_PI_2;

use edelbaum_core::vector::{self, Vector3};
use edelbaum_orbits::{StateVector, circular_velocity};
use tracing::{debug, warn};

use crate::error::{GuidanceError, InputError, SingularityError};
use crate::law::AccelerationLaw;

/// `|tan(pi/2 * di + beta_0)|` at or below this is reported as a delta-v singularity.
pub const DELTA_V_SINGULARITY_EPS: f64 = 1e-12;

/// Below this `|tan(pi/2 * di + beta_0)|` the quotient form loses precision to the
/// cancellation in `pi/2 * di + beta_0`, and the law-of-cosines form is evaluated instead.
pub const DELTA_V_QUOTIENT_EPS: f64 = 1e-3;

/// Relative threshold under which the local thrust frame is considered degenerate.
pub const FRAME_EPS: f64 = 1e-12;

/// Physical inputs of a circular-to-circular transfer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdelbaumInputs {
    pub mu_km3_s2: f64,
    pub initial_semimajor_axis_km: f64,
    pub final_semimajor_axis_km: f64,
    pub initial_inclination_rad: f64,
    pub final_inclination_rad: f64,
    pub acceleration_km_s2: f64,
}

impl EdelbaumInputs {
    /// Reject inputs for which the closed-form model is undefined.
    pub fn validate(&self) -> Result<(), InputError> {
        if !(self.mu_km3_s2.is_finite() && self.mu_km3_s2 > 0.0) {
            return Err(InputError::GravitationalParameter(self.mu_km3_s2));
        }
        if !(self.initial_semimajor_axis_km.is_finite() && self.initial_semimajor_axis_km > 0.0) {
            return Err(InputError::InitialSemimajorAxis(self.initial_semimajor_axis_km));
        }
        if !(self.final_semimajor_axis_km.is_finite() && self.final_semimajor_axis_km > 0.0) {
            return Err(InputError::FinalSemimajorAxis(self.final_semimajor_axis_km));
        }
        if !self.initial_inclination_rad.is_finite() {
            return Err(InputError::InitialInclination(self.initial_inclination_rad));
        }
        if !self.final_inclination_rad.is_finite() {
            return Err(InputError::FinalInclination(self.final_inclination_rad));
        }
        if !(self.acceleration_km_s2.is_finite() && self.acceleration_km_s2 > 0.0) {
            return Err(InputError::Acceleration(self.acceleration_km_s2));
        }
        Ok(())
    }
}

/// Step-invariant quantities derived once per transfer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdelbaumParameters {
    pub initial_velocity_km_s: f64,
    pub final_velocity_km_s: f64,
    pub initial_yaw_rad: f64,
    pub delta_inclination_rad: f64,
}

/// Initial yaw angle minimizing total delta-v for the combined plane and altitude change.
pub fn initial_yaw(v_0: f64, v_f: f64, inc_0: f64, inc_f: f64) -> f64 {
    let half_angle = FRAC_PI_2 * (inc_f - inc_0).abs();
    half_angle.sin().atan2(v_0 / v_f - half_angle.cos())
}

/// Yaw angle `t` seconds into the thrust arc, before the sign correction.
#[inline]
pub fn yaw_angle(elapsed_s: f64, v_0: f64, beta_0: f64, acceleration_km_s2: f64) -> f64 {
    // atan2 of the decomposed components is not bit-exact at the arc start
    if elapsed_s == 0.0 {
        return beta_0;
    }
    (v_0 * beta_0.sin()).atan2(v_0 * beta_0.cos() - acceleration_km_s2 * elapsed_s)
}

/// Validate the inputs and derive `(V_0, V_f, beta_0, di)`.
pub fn compute_parameters(inputs: &EdelbaumInputs) -> Result<EdelbaumParameters, GuidanceError> {
    inputs.validate()?;

    let inc_0 = inputs.initial_inclination_rad;
    let inc_f = inputs.final_inclination_rad;
    let v_0 = circular_velocity(inputs.mu_km3_s2, inputs.initial_semimajor_axis_km);
    let v_f = circular_velocity(inputs.mu_km3_s2, inputs.final_semimajor_axis_km);

    Ok(EdelbaumParameters {
        initial_velocity_km_s: v_0,
        final_velocity_km_s: v_f,
        initial_yaw_rad: initial_yaw(v_0, v_f, inc_0, inc_f),
        delta_inclination_rad: (inc_f - inc_0).abs(),
    })
}

/// Total velocity increment of the transfer (km/s).
///
/// Without a plane change the quotient in the general expression is 0/0; its limit
/// `|V_0 - V_f|` is returned instead. Near that limit the equivalent
/// `sqrt(V_0^2 + V_f^2 - 2 V_0 V_f cos(pi/2 * di))` is used.
pub fn delta_v(parameters: &EdelbaumParameters) -> Result<f64, SingularityError> {
    let v_0 = parameters.initial_velocity_km_s;
    let v_f = parameters.final_velocity_km_s;
    let beta_0 = parameters.initial_yaw_rad;
    let delta_inc = parameters.delta_inclination_rad;

    if delta_inc == 0.0 {
        return Ok((v_0 - v_f).abs());
    }

    let denominator = (FRAC_PI_2 * delta_inc + beta_0).tan();
    if !denominator.is_finite() || denominator.abs() <= DELTA_V_SINGULARITY_EPS {
        warn!(denominator, delta_inc, beta_0, "edelbaum delta-v is singular");
        return Err(SingularityError::DeltaV(denominator));
    }
    if denominator.abs() < DELTA_V_QUOTIENT_EPS {
        return Ok(delta_v_cosine_law(v_0, v_f, delta_inc));
    }

    let dv = v_0 * beta_0.cos() - v_0 * beta_0.sin() / denominator;
    if !dv.is_finite() {
        return Err(SingularityError::DeltaV(denominator));
    }
    Ok(dv)
}

/// `1 - cos(x)` written as `2 sin^2(x / 2)` so nearly equal speeds do not cancel.
fn delta_v_cosine_law(v_0: f64, v_f: f64, delta_inc: f64) -> f64 {
    let half_sin = (0.5 * FRAC_PI_2 * delta_inc).sin();
    let speed_change = v_0 - v_f;
    (speed_change * speed_change + 4.0 * v_0 * v_f * half_sin * half_sin).sqrt()
}

/// Sign function returning zero at zero.
#[inline]
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// The steering law, holding every constant it needs between integrator calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdelbaumGuidance {
    initial_velocity_km_s: f64,
    initial_yaw_rad: f64,
    acceleration_km_s2: f64,
    initial_inclination_rad: f64,
    final_inclination_rad: f64,
}

impl EdelbaumGuidance {
    pub fn new(
        initial_velocity_km_s: f64,
        initial_yaw_rad: f64,
        acceleration_km_s2: f64,
        initial_inclination_rad: f64,
        final_inclination_rad: f64,
    ) -> Self {
        Self {
            initial_velocity_km_s,
            initial_yaw_rad,
            acceleration_km_s2,
            initial_inclination_rad,
            final_inclination_rad,
        }
    }

    pub fn initial_velocity_km_s(&self) -> f64 {
        self.initial_velocity_km_s
    }

    pub fn initial_yaw_rad(&self) -> f64 {
        self.initial_yaw_rad
    }

    pub fn acceleration_km_s2(&self) -> f64 {
        self.acceleration_km_s2
    }

    pub fn initial_inclination_rad(&self) -> f64 {
        self.initial_inclination_rad
    }

    pub fn final_inclination_rad(&self) -> f64 {
        self.final_inclination_rad
    }

    /// Uncorrected yaw angle `elapsed_s` into the arc.
    pub fn yaw_angle(&self, elapsed_s: f64) -> f64 {
        yaw_angle(
            elapsed_s,
            self.initial_velocity_km_s,
            self.initial_yaw_rad,
            self.acceleration_km_s2,
        )
    }

    /// Yaw angle with the out-of-plane sign set by `sign(r_x * (i_f - i_0))`.
    ///
    /// The correction approximates the alternating thrust of the averaged theory and is
    /// only applied when a plane change is requested; at `r_x == 0` it zeroes the yaw.
    pub fn steering_yaw(&self, elapsed_s: f64, position_x_km: f64) -> f64 {
        let beta = self.yaw_angle(elapsed_s);
        let inc_change = self.final_inclination_rad - self.initial_inclination_rad;
        if inc_change == 0.0 {
            return beta;
        }
        beta * sign(position_x_km * inc_change)
    }

    /// Thrust acceleration (km/s²) for `state`, `elapsed_s` seconds after the arc started.
    pub fn acceleration(
        &self,
        elapsed_s: f64,
        state: &StateVector,
    ) -> Result<Vector3, GuidanceError> {
        if !elapsed_s.is_finite() {
            return Err(InputError::ElapsedTime(elapsed_s).into());
        }
        let r = &state.position_km;
        let v = &state.velocity_km_s;
        if !vector::is_finite(r) || !vector::is_finite(v) {
            return Err(SingularityError::NonFiniteState.into());
        }

        let beta = self.steering_yaw(elapsed_s, r[0]);

        let v_mag = vector::norm(v);
        if v_mag <= FRAME_EPS {
            return Err(SingularityError::ZeroVelocity(v_mag).into());
        }
        let h = vector::cross(r, v);
        let h_mag = vector::norm(&h);
        if h_mag <= FRAME_EPS * vector::norm(r) * v_mag {
            return Err(SingularityError::DegenerateOrbitNormal(h_mag).into());
        }

        let tangential = vector::scale(v, 1.0 / v_mag);
        let normal = vector::scale(&h, 1.0 / h_mag);
        let (sin_beta, cos_beta) = beta.sin_cos();
        let direction = vector::add(
            &vector::scale(&tangential, cos_beta),
            &vector::scale(&normal, sin_beta),
        );
        Ok(vector::scale(&direction, self.acceleration_km_s2))
    }
}

impl AccelerationLaw for EdelbaumGuidance {
    fn evaluate(&self, elapsed_s: f64, state: &StateVector) -> Result<Vector3, GuidanceError> {
        self.acceleration(elapsed_s, state)
    }
}

/// Guidance law plus the closed-form transfer cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdelbaumTransfer {
    pub guidance: EdelbaumGuidance,
    pub parameters: EdelbaumParameters,
    pub mu_km3_s2: f64,
    pub delta_v_km_s: f64,
    pub time_of_flight_s: f64,
}

/// Derive the steering law, delta-v and transfer time for `inputs`.
pub fn plan_transfer(inputs: &EdelbaumInputs) -> Result<EdelbaumTransfer, GuidanceError> {
    let parameters = compute_parameters(inputs)?;
    debug!(
        v_0 = parameters.initial_velocity_km_s,
        v_f = parameters.final_velocity_km_s,
        beta_0 = parameters.initial_yaw_rad,
        delta_inc = parameters.delta_inclination_rad,
        "derived edelbaum parameters"
    );

    let guidance = EdelbaumGuidance::new(
        parameters.initial_velocity_km_s,
        parameters.initial_yaw_rad,
        inputs.acceleration_km_s2,
        inputs.initial_inclination_rad,
        inputs.final_inclination_rad,
    );

    let delta_v_km_s = delta_v(&parameters)?;
    let time_of_flight_s = delta_v_km_s / inputs.acceleration_km_s2;
    debug!(delta_v_km_s, time_of_flight_s, "edelbaum transfer cost");

    Ok(EdelbaumTransfer {
        guidance,
        parameters,
        mu_km3_s2: inputs.mu_km3_s2,
        delta_v_km_s,
        time_of_flight_s,
    })
}

/// Guidance law from the Edelbaum/Kéchichian theory for `(a_0, inc_0) -> (a_f, inc_f)`
/// at constant acceleration `f`.
///
/// Returns the acceleration law together with the required delta-v and the transfer time.
pub fn edelbaum_ai(
    k: f64,
    a_0: f64,
    a_f: f64,
    inc_0: f64,
    inc_f: f64,
    f: f64,
) -> Result<(EdelbaumGuidance, f64, f64), GuidanceError> {
    let transfer = plan_transfer(&EdelbaumInputs {
        mu_km3_s2: k,
        initial_semimajor_axis_km: a_0,
        final_semimajor_axis_km: a_f,
        initial_inclination_rad: inc_0,
        final_inclination_rad: inc_f,
        acceleration_km_s2: f,
    })?;
    Ok((transfer.guidance, transfer.delta_v_km_s, transfer.time_of_flight_s))
}
