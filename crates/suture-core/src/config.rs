use serde::{Deserialize, Serialize};

use crate::error::{SutureError, SutureResult};
use crate::math::Axis;

/// Default stiffness of a lazily constructed suture spring.
pub const DEFAULT_STIFFNESS: f64 = 200.0;
/// Default damping of a lazily constructed suture spring.
pub const DEFAULT_DAMPING: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SutureConfig {
    /// `true` selects anchors automatically by axis extrema, `false` uses the picker.
    pub auto_select: bool,
    /// Runtime toggle; when off, updates leave the constraint untouched.
    pub enabled: bool,
    /// Axis scanned by the automatic strategy.
    pub axis: Axis,
    /// Stiffness given to a spring the synthesizer constructs itself.
    pub default_stiffness: f64,
    /// Damping given to a spring the synthesizer constructs itself.
    pub default_damping: f64,
}

impl Default for SutureConfig {
    fn default() -> Self {
        Self {
            auto_select: true,
            enabled: true,
            axis: Axis::X,
            default_stiffness: DEFAULT_STIFFNESS,
            default_damping: DEFAULT_DAMPING,
        }
    }
}

impl SutureConfig {
    /// Config driven by an external picker instead of extremal search.
    pub fn manual() -> Self {
        Self {
            auto_select: false,
            ..Self::default()
        }
    }

    /// Check the spring defaults: stiffness positive, damping non-negative, both finite.
    pub fn validate(&self) -> SutureResult<()> {
        if !(self.default_stiffness.is_finite() && self.default_stiffness > 0.0) {
            return Err(SutureError::InvalidConfig(format!(
                "default_stiffness must be positive and finite, got {}",
                self.default_stiffness
            )));
        }
        if !(self.default_damping.is_finite() && self.default_damping >= 0.0) {
            return Err(SutureError::InvalidConfig(format!(
                "default_damping must be non-negative and finite, got {}",
                self.default_damping
            )));
        }
        Ok(())
    }
}
