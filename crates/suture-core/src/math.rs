use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Coordinate axis used by extremal anchor selection.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    /// Component of `v` along this axis.
    #[inline]
    pub fn component(self, v: DVec3) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    /// Map a host-side axis code (0 = x, 1 = y, 2 = z). Anything else is `None`.
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }
}

/// Euclidean separation `sqrt(dx^2 + dy^2 + dz^2)`.
///
/// NaN components are not filtered: they propagate into the result.
#[inline]
pub fn rest_length(a: DVec3, b: DVec3) -> f64 {
    (b - a).length()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_component() {
        let v = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(Axis::X.component(v), 1.0);
        assert_eq!(Axis::Y.component(v), 2.0);
        assert_eq!(Axis::Z.component(v), 3.0);
    }

    #[test]
    fn test_axis_from_index() {
        assert_eq!(Axis::from_index(0), Some(Axis::X));
        assert_eq!(Axis::from_index(2), Some(Axis::Z));
        assert_eq!(Axis::from_index(3), None);
    }

    #[test]
    fn test_rest_length_is_l2() {
        let d = rest_length(DVec3::ZERO, DVec3::new(3.0, 4.0, 12.0));
        assert!((d - 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_rest_length_propagates_nan() {
        let d = rest_length(DVec3::new(f64::NAN, 0.0, 0.0), DVec3::ZERO);
        assert!(d.is_nan());
    }
}
