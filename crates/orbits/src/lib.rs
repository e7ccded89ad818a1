//! Circular-orbit helpers and the Cartesian state shared by guidance laws and propagators.
use std::f64::consts::PI;

use edelbaum_core::vector::{self, Vector3};

/// Cartesian spacecraft state (km, km/s) in an inertial frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position_km: Vector3,
    pub velocity_km_s: Vector3,
}

impl StateVector {
    pub fn new(position_km: Vector3, velocity_km_s: Vector3) -> Self {
        Self {
            position_km,
            velocity_km_s,
        }
    }

    /// Build a state from a flat `[x, y, z, vx, vy, vz]` propagator vector.
    pub fn from_array(y: &[f64; 6]) -> Self {
        Self {
            position_km: [y[0], y[1], y[2]],
            velocity_km_s: [y[3], y[4], y[5]],
        }
    }

    /// Flatten into `[x, y, z, vx, vy, vz]`.
    pub fn to_array(&self) -> [f64; 6] {
        let r = self.position_km;
        let v = self.velocity_km_s;
        [r[0], r[1], r[2], v[0], v[1], v[2]]
    }

    /// Specific angular momentum `r × v` (km²/s).
    pub fn angular_momentum(&self) -> Vector3 {
        vector::cross(&self.position_km, &self.velocity_km_s)
    }
}

/// Circular orbital speed `sqrt(k / a)`.
///
/// Callers validate `k > 0` and `a > 0`; other inputs yield NaN or infinity.
#[inline]
pub fn circular_velocity(mu_km3_s2: f64, semimajor_axis_km: f64) -> f64 {
    (mu_km3_s2 / semimajor_axis_km).sqrt()
}

/// Keplerian orbital period (s).
pub fn orbital_period(mu_km3_s2: f64, semimajor_axis_km: f64) -> f64 {
    2.0 * PI * (semimajor_axis_km.powi(3) / mu_km3_s2).sqrt()
}

/// State on a circular orbit of radius `semimajor_axis_km`.
///
/// The orbit plane is oriented by `inclination_rad` and `raan_rad`; `argument_of_latitude_rad`
/// is the angle from the ascending node to the spacecraft along the direction of motion.
pub fn circular_state(
    mu_km3_s2: f64,
    semimajor_axis_km: f64,
    inclination_rad: f64,
    raan_rad: f64,
    argument_of_latitude_rad: f64,
) -> StateVector {
    let speed = circular_velocity(mu_km3_s2, semimajor_axis_km);
    let (sin_u, cos_u) = argument_of_latitude_rad.sin_cos();
    let position = [semimajor_axis_km * cos_u, semimajor_axis_km * sin_u, 0.0];
    let velocity = [-speed * sin_u, speed * cos_u, 0.0];

    StateVector {
        position_km: perifocal_to_inertial(&position, inclination_rad, raan_rad),
        velocity_km_s: perifocal_to_inertial(&velocity, inclination_rad, raan_rad),
    }
}

// Rz(raan) * Rx(inc)
fn perifocal_to_inertial(v: &Vector3, inclination_rad: f64, raan_rad: f64) -> Vector3 {
    let (sin_i, cos_i) = inclination_rad.sin_cos();
    let (sin_o, cos_o) = raan_rad.sin_cos();
    let tilted = [v[0], v[1] * cos_i - v[2] * sin_i, v[1] * sin_i + v[2] * cos_i];
    [
        tilted[0] * cos_o - tilted[1] * sin_o,
        tilted[0] * sin_o + tilted[1] * cos_o,
        tilted[2],
    ]
}

/// Inclination of the osculating orbit plane (rad), `None` for rectilinear states.
pub fn inclination(state: &StateVector) -> Option<f64> {
    let h = state.angular_momentum();
    let h_mag = vector::norm(&h);
    if h_mag == 0.0 || !h_mag.is_finite() {
        return None;
    }
    Some((h[2] / h_mag).clamp(-1.0, 1.0).acos())
}

/// Osculating semimajor axis from the vis-viva relation (km).
pub fn semimajor_axis(mu_km3_s2: f64, state: &StateVector) -> f64 {
    let r = vector::norm(&state.position_km);
    let v = vector::norm(&state.velocity_km_s);
    1.0 / (2.0 / r - v * v / mu_km3_s2)
}
