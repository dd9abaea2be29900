use crate::{InputError, InvalidConfigSnafu};
use snafu::prelude::*;

/// Maximum movement between two successive mean-shift centers for the
/// iteration to count as converged (in normalized coordinates).
pub const DEFAULT_TOLERANCE: f64 = 0.0005;

/// The first pass starts from `sqrt(D) * DEFAULT_INITIAL_RADIUS_SCALE`, i.e. half
/// of the diagonal of the normalized unit cube.
pub const DEFAULT_INITIAL_RADIUS_SCALE: f64 = 0.5;

/// Before pass `k` (zero-based) the radius shrinks by `(k + 1) * DEFAULT_SHRINK_STEP`
/// of its current value.
pub const DEFAULT_SHRINK_STEP: f64 = 0.1;

pub const DEFAULT_MAX_PASSES: usize = 100;
pub const DEFAULT_MAX_SHIFT_ITERATIONS: usize = 10_000;

/// What to do with a dimension in which every point has the same coordinate.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum DegenerateDimensions {
    /// Fail with [`InputError::DegenerateDimension`].
    #[default]
    Reject,
    /// Normalize the dimension to 0 for every point.
    Collapse,
}

/// Tuning parameters of a clustering run.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Config {
    pub tolerance: f64,
    pub initial_radius_scale: f64,
    pub shrink_step: f64,
    pub max_passes: usize,
    pub max_shift_iterations: usize,
    pub degenerate_dimensions: DegenerateDimensions,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tolerance: DEFAULT_TOLERANCE,
            initial_radius_scale: DEFAULT_INITIAL_RADIUS_SCALE,
            shrink_step: DEFAULT_SHRINK_STEP,
            max_passes: DEFAULT_MAX_PASSES,
            max_shift_iterations: DEFAULT_MAX_SHIFT_ITERATIONS,
            degenerate_dimensions: DegenerateDimensions::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), InputError> {
        ensure!(
            self.tolerance.is_finite() && self.tolerance > 0.0,
            InvalidConfigSnafu {
                reason: "tolerance must be a positive number"
            }
        );
        ensure!(
            self.initial_radius_scale.is_finite() && self.initial_radius_scale > 0.0,
            InvalidConfigSnafu {
                reason: "initial radius scale must be a positive number"
            }
        );
        ensure!(
            self.shrink_step > 0.0 && self.shrink_step <= 1.0,
            InvalidConfigSnafu {
                reason: "shrink step must be in (0, 1]"
            }
        );
        ensure!(
            self.max_passes > 0,
            InvalidConfigSnafu {
                reason: "at least one pass must be allowed"
            }
        );
        // Two neighborhoods are always computed before the first convergence check
        ensure!(
            self.max_shift_iterations >= 2,
            InvalidConfigSnafu {
                reason: "mean shift needs at least two iterations"
            }
        );
        Ok(())
    }
}
