//! Process-wide configuration of the math library.

use crate::num::{DEFAULT_TOLERANCE, Float, Real};
use anyhow::{Result, bail};
use std::{fmt, sync::OnceLock};

#[cfg(feature = "ron")]
use std::path::Path;

static ACTIVE_CONFIG: OnceLock<MathConfig> = OnceLock::new();

/// Configuration parameters for the math library.
///
/// A single configuration is active per process. It can be installed once
/// with [`initialize`]; if no configuration has been installed when it is
/// first needed, the default configuration becomes active.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
#[derive(Clone, Debug, PartialEq)]
pub struct MathConfig {
    /// The unit in which every angle parameter is given and every angle
    /// result is returned.
    pub angle_unit: AngleUnit,
    /// The absolute tolerance used by equality comparisons and zero checks.
    pub tolerance: Real,
    /// How violated preconditions are reported.
    pub assertion_policy: AssertionPolicy,
}

/// The unit of angle parameters and results.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

/// How a failed [`math_assert!`](crate::math_assert) is reported.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AssertionPolicy {
    /// Panic with an [`AssertionFailure`](crate::assertion::AssertionFailure)
    /// payload, which can be recovered with
    /// [`catch_assertion`](crate::assertion::catch_assertion).
    #[default]
    Panic,
    /// Log the failure and abort the process.
    Abort,
    /// Log the failure at debug level and continue with the unguarded
    /// computation.
    Ignore,
}

impl MathConfig {
    /// Parses the configuration from the RON file at the given path.
    #[cfg(feature = "ron")]
    pub fn from_ron_file(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref();
        orbis_io::parse_ron_file(file_path)
    }

    /// Writes the configuration to a RON file at the given path.
    #[cfg(feature = "ron")]
    pub fn save_as_ron_file(&self, file_path: impl AsRef<Path>) -> Result<()> {
        orbis_io::write_ron_file(self, file_path)
    }

    /// Checks that the configuration parameters are usable.
    ///
    /// # Errors
    /// Returns an error if the tolerance is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            bail!(
                "Invalid math tolerance {}: must be finite and non-negative",
                self.tolerance
            );
        }
        Ok(())
    }
}

impl Default for MathConfig {
    fn default() -> Self {
        Self {
            angle_unit: AngleUnit::default(),
            tolerance: DEFAULT_TOLERANCE,
            assertion_policy: AssertionPolicy::default(),
        }
    }
}

impl AngleUnit {
    /// Converts an angle value in this unit to radians.
    #[inline]
    pub fn to_radians(self, value: Real) -> Real {
        match self {
            Self::Radians => value,
            Self::Degrees => value * Real::RADIANS_PER_DEGREE,
        }
    }

    /// Converts an angle value in radians to this unit.
    #[inline]
    pub fn from_radians(self, radians: Real) -> Real {
        match self {
            Self::Radians => radians,
            Self::Degrees => radians * Real::DEGREES_PER_RADIAN,
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Radians => write!(f, "radians"),
            Self::Degrees => write!(f, "degrees"),
        }
    }
}

/// Installs the given configuration as the active configuration for the
/// rest of the process.
///
/// # Errors
/// Returns an error if the configuration is invalid, or if a configuration
/// is already active (either installed earlier or defaulted because it was
/// needed before this call).
pub fn initialize(config: MathConfig) -> Result<()> {
    config.validate()?;

    let description = format!(
        "angle unit {}, tolerance {}, assertion policy {:?}",
        config.angle_unit, config.tolerance, config.assertion_policy
    );

    if ACTIVE_CONFIG.set(config).is_err() {
        bail!("Math configuration is already active and can not be replaced");
    }

    log::info!("Initialized math configuration: {description}");
    Ok(())
}

/// Returns the active configuration, installing the default configuration
/// if none is active yet.
pub fn active() -> &'static MathConfig {
    ACTIVE_CONFIG.get_or_init(MathConfig::default)
}

/// Whether a configuration has been installed or defaulted.
pub fn is_initialized() -> bool {
    ACTIVE_CONFIG.get().is_some()
}

/// The active absolute tolerance.
#[inline]
pub fn tolerance() -> Real {
    active().tolerance
}

/// The active angle unit.
#[inline]
pub fn angle_unit() -> AngleUnit {
    active().angle_unit
}

/// The active assertion policy.
#[inline]
pub fn assertion_policy() -> AssertionPolicy {
    active().assertion_policy
}
