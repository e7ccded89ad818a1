//! Analytic evolution along an Edelbaum transfer.

use std::f64::consts::FRAC_2_PI;

use edelbaum_core::constants::G0;
use edelbaum_core::units::kms_to_ms;
use serde::Serialize;

use crate::edelbaum::EdelbaumTransfer;
use crate::error::{GuidanceError, InputError};

/// Largest sample count `profile` will allocate.
pub const MAX_PROFILE_SAMPLES: usize = 1_000_000;

/// Averaged orbit state at a given time into the transfer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransferState {
    pub time_s: f64,
    pub yaw_rad: f64,
    pub velocity_km_s: f64,
    pub semimajor_axis_km: f64,
    pub inclination_rad: f64,
    pub delta_inclination_rad: f64,
}

impl EdelbaumTransfer {
    /// Closed-form state `elapsed_s` into the transfer.
    ///
    /// `V sin(beta)` is conserved along the arc, so the orbital speed follows from the
    /// two components of the yaw angle; the plane change achieved is `2/pi (beta - beta_0)`.
    pub fn state_at(&self, elapsed_s: f64) -> TransferState {
        let v_0 = self.parameters.initial_velocity_km_s;
        let beta_0 = self.parameters.initial_yaw_rad;
        let f = self.guidance.acceleration_km_s2();

        let yaw = self.guidance.yaw_angle(elapsed_s);
        let velocity = (v_0 * beta_0.sin()).hypot(v_0 * beta_0.cos() - f * elapsed_s);
        let delta_inc = if self.parameters.delta_inclination_rad == 0.0 {
            0.0
        } else {
            FRAC_2_PI * (yaw - beta_0)
        };
        let inc_0 = self.guidance.initial_inclination_rad();
        let inc_f = self.guidance.final_inclination_rad();
        let inclination = if inc_f >= inc_0 {
            inc_0 + delta_inc
        } else {
            inc_0 - delta_inc
        };

        TransferState {
            time_s: elapsed_s,
            yaw_rad: yaw,
            velocity_km_s: velocity,
            semimajor_axis_km: self.mu_km3_s2 / (velocity * velocity),
            inclination_rad: inclination,
            delta_inclination_rad: delta_inc,
        }
    }

    /// `samples` evenly spaced states covering `[0, t_f]`, endpoints included.
    pub fn profile(&self, samples: usize) -> Result<Vec<TransferState>, GuidanceError> {
        if !(2..=MAX_PROFILE_SAMPLES).contains(&samples) {
            return Err(InputError::SampleCount(samples).into());
        }
        let t_f = self.time_of_flight_s;
        let last = samples - 1;
        let mut states: Vec<TransferState> = (0..samples)
            .map(|i| self.state_at(t_f * i as f64 / last as f64))
            .collect();
        if let Some(end) = states.last_mut() {
            *end = self.state_at(t_f);
        }
        Ok(states)
    }

    /// Propellant mass fraction `1 - exp(-dv / (isp * g0))` for the whole transfer.
    pub fn propellant_fraction(&self, isp_seconds: f64) -> Result<f64, GuidanceError> {
        if !(isp_seconds.is_finite() && isp_seconds > 0.0) {
            return Err(InputError::SpecificImpulse(isp_seconds).into());
        }
        let exponent = -kms_to_ms(self.delta_v_km_s) / (isp_seconds * G0);
        Ok(1.0 - exponent.exp())
    }
}
