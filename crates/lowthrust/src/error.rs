use thiserror::Error;

/// Inputs outside the domain of the Edelbaum model.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InputError {
    #[error("gravitational parameter must be positive and finite, got {0}")]
    GravitationalParameter(f64),
    #[error("initial semimajor axis must be positive and finite, got {0} km")]
    InitialSemimajorAxis(f64),
    #[error("final semimajor axis must be positive and finite, got {0} km")]
    FinalSemimajorAxis(f64),
    #[error("initial inclination must be finite, got {0} rad")]
    InitialInclination(f64),
    #[error("final inclination must be finite, got {0} rad")]
    FinalInclination(f64),
    #[error("thrust acceleration must be positive and finite, got {0} km/s^2")]
    Acceleration(f64),
    #[error("elapsed time must be finite, got {0} s")]
    ElapsedTime(f64),
    #[error("transfer profile needs between 2 and 1000000 samples, got {0}")]
    SampleCount(usize),
    #[error("specific impulse must be positive and finite, got {0} s")]
    SpecificImpulse(f64),
}

/// Ill-conditioned geometry detected while deriving or evaluating the law.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SingularityError {
    #[error("delta-v denominator vanishes: tan(pi/2 * di + beta_0) = {0:e}")]
    DeltaV(f64),
    #[error("velocity magnitude {0:e} km/s does not define a tangential direction")]
    ZeroVelocity(f64),
    #[error("angular momentum magnitude {0:e} km^2/s does not define an orbit normal")]
    DegenerateOrbitNormal(f64),
    #[error("position magnitude {0:e} km is too small for two-body gravity")]
    ZeroRadius(f64),
    #[error("state contains non-finite components")]
    NonFiniteState,
}

/// Errors surfaced by the guidance model and its adapters.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GuidanceError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    #[error("numeric singularity: {0}")]
    Singularity(#[from] SingularityError),
}

impl GuidanceError {
    /// True when the caller supplied out-of-domain parameters.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, GuidanceError::InvalidInput(_))
    }

    /// True when the geometry became degenerate during derivation or evaluation.
    pub fn is_singularity(&self) -> bool {
        matches!(self, GuidanceError::Singularity(_))
    }
}
