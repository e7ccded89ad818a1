//! Continuous-thrust guidance: the Edelbaum steering law for circular inclined transfers.

pub mod edelbaum;
pub mod error;
pub mod law;
pub mod profile;

pub use edelbaum::{
    EdelbaumGuidance, EdelbaumInputs, EdelbaumParameters, EdelbaumTransfer, compute_parameters,
    delta_v, edelbaum_ai, initial_yaw, plan_transfer, yaw_angle,
};
pub use error::{GuidanceError, InputError, SingularityError};
pub use law::{AccelerationLaw, ThrustedTwoBody};
pub use profile::{MAX_PROFILE_SAMPLES, TransferState};
