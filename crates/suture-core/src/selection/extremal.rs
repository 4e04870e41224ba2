use glam::DVec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::math::Axis;
use crate::selection::{AnchorCandidate, Selection, SelectionScan};

/// Anchors at the minimum and maximum coordinate along `axis`.
///
/// Ties keep the first-seen index. The minimum is the first anchor, the
/// maximum the second. A body whose particles all share one axis value
/// (including a single-particle body) selects nothing. Particles beyond
/// index `u32::MAX` cannot be anchors; a pair reaching them selects nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtremalSelector {
    pub axis: Axis,
}

impl Default for ExtremalSelector {
    fn default() -> Self {
        Self::new(Axis::X)
    }
}

impl ExtremalSelector {
    pub fn new(axis: Axis) -> Self {
        Self { axis }
    }

    pub fn select(&self, positions: &[DVec3]) -> Selection {
        self.scan(positions).selection
    }

    /// Select, and report whether any axis value was NaN or infinite.
    pub fn scan(&self, positions: &[DVec3]) -> SelectionScan {
        let Some(e) = find_extrema(positions, self.axis) else {
            return SelectionScan::default();
        };
        let selection = match (anchor_index(e.min.0), anchor_index(e.max.0)) {
            (Some(lo), Some(hi)) => Selection::pair(
                AnchorCandidate::new(lo, positions[e.min.0]),
                AnchorCandidate::new(hi, positions[e.max.0]),
            ),
            _ => Selection::None,
        };
        SelectionScan {
            selection,
            non_finite: e.non_finite,
        }
    }
}

#[inline]
fn anchor_index(i: usize) -> Option<u32> {
    u32::try_from(i).ok()
}

/// Running (index, value) of the smallest and largest axis value seen.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Extrema {
    min: (usize, f64),
    max: (usize, f64),
    /// A NaN or infinite axis value was seen.
    non_finite: bool,
}

impl Extrema {
    fn seed(i: usize, v: f64) -> Self {
        Self {
            min: (i, v),
            max: (i, v),
            non_finite: !v.is_finite(),
        }
    }

    #[inline]
    fn observe(&mut self, i: usize, v: f64) {
        self.non_finite |= !v.is_finite();
        if v < self.min.1 {
            self.min = (i, v);
        }
        if v > self.max.1 {
            self.max = (i, v);
        }
    }

    /// Combine with the extrema of a range that comes strictly after `self`.
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    fn merge(self, later: Self) -> Self {
        Self {
            min: if later.min.1 < self.min.1 { later.min } else { self.min },
            max: if later.max.1 > self.max.1 { later.max } else { self.max },
            non_finite: self.non_finite || later.non_finite,
        }
    }
}

#[cfg_attr(feature = "parallel", allow(dead_code))]
fn find_extrema_sequential(positions: &[DVec3], axis: Axis) -> Option<Extrema> {
    let (first, rest) = positions.split_first()?;
    let mut e = Extrema::seed(0, axis.component(*first));
    for (k, p) in rest.iter().enumerate() {
        e.observe(k + 1, axis.component(*p));
    }
    Some(e)
}

#[cfg(feature = "parallel")]
fn find_extrema(positions: &[DVec3], axis: Axis) -> Option<Extrema> {
    let first = axis.component(*positions.first()?);
    // A NaN seed is never displaced by a strict comparison.
    if first.is_nan() {
        return Some(Extrema::seed(0, first));
    }
    let (extrema, nan_seen) = positions
        .par_iter()
        .enumerate()
        .map(|(i, p)| (i, axis.component(*p)))
        .fold(
            || (None, false),
            |(acc, nan_seen): (Option<Extrema>, bool), (i, v)| {
                if v.is_nan() {
                    return (acc, true);
                }
                let e = match acc {
                    None => Extrema::seed(i, v),
                    Some(mut e) => {
                        e.observe(i, v);
                        e
                    }
                };
                (Some(e), nan_seen)
            },
        )
        .reduce(
            || (None, false),
            |(a, a_nan), (b, b_nan)| {
                let merged = match (a, b) {
                    (Some(a), Some(b)) => Some(a.merge(b)),
                    (a, None) => a,
                    (None, b) => b,
                };
                (merged, a_nan || b_nan)
            },
        );
    extrema.map(|mut e| {
        e.non_finite |= nan_seen;
        e
    })
}

#[cfg(not(feature = "parallel"))]
fn find_extrema(positions: &[DVec3], axis: Axis) -> Option<Extrema> {
    find_extrema_sequential(positions, axis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_keep_first_seen() {
        let positions = vec![
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(2.0, 1.0, 0.0),
        ];
        let e = find_extrema(&positions, Axis::X).unwrap();
        assert_eq!(e.min.0, 1);
        assert_eq!(e.max.0, 2);
        assert!(!e.non_finite);
    }

    #[test]
    fn test_nan_seed_collapses_to_single_index() {
        let positions = vec![DVec3::new(f64::NAN, 0.0, 0.0), DVec3::X, DVec3::NEG_X];
        let e = find_extrema(&positions, Axis::X).unwrap();
        assert_eq!(e.min.0, 0);
        assert_eq!(e.max.0, 0);
        assert!(e.non_finite, "NaN seed must be flagged");
    }

    #[test]
    fn test_nan_in_middle_is_skipped_but_flagged() {
        let positions = vec![DVec3::ZERO, DVec3::new(f64::NAN, 0.0, 0.0), DVec3::new(5.0, 0.0, 0.0)];
        let e = find_extrema(&positions, Axis::X).unwrap();
        assert_eq!(e.min.0, 0);
        assert_eq!(e.max.0, 2);
        assert!(e.non_finite, "skipped NaN must be flagged");
    }

    #[test]
    fn test_nan_off_axis_is_not_an_axis_fault() {
        let positions = vec![DVec3::new(0.0, f64::NAN, 0.0), DVec3::X];
        let e = find_extrema(&positions, Axis::X).unwrap();
        assert!(!e.non_finite);
    }

    #[test]
    fn test_merge_prefers_earlier_on_tie() {
        let a = Extrema { min: (0, 1.0), max: (1, 5.0), non_finite: false };
        let b = Extrema { min: (4, 1.0), max: (6, 5.0), non_finite: false };
        assert_eq!(a.merge(b), a);
    }

    #[test]
    fn test_merge_carries_non_finite_flag() {
        let a = Extrema { min: (0, 1.0), max: (1, 5.0), non_finite: false };
        let b = Extrema { min: (4, 2.0), max: (6, 3.0), non_finite: true };
        assert!(a.merge(b).non_finite);
        assert!(b.merge(a).non_finite);
    }

    #[test]
    fn test_anchor_index_rejects_overflow() {
        assert_eq!(anchor_index(7), Some(7));
        assert_eq!(anchor_index(u32::MAX as usize), Some(u32::MAX));
        if let Some(too_big) = (u32::MAX as usize).checked_add(1) {
            assert_eq!(anchor_index(too_big), None);
        }
    }

    #[test]
    fn test_dispatch_matches_sequential_scan() {
        let mut positions: Vec<DVec3> = (0..10_000)
            .map(|i| {
                let t = i as f64;
                DVec3::new((t * 0.37).sin().round(), (t * 0.11).cos(), t % 7.0)
            })
            .collect();
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            assert_eq!(
                find_extrema(&positions, axis),
                find_extrema_sequential(&positions, axis),
                "axis {axis:?}"
            );
        }

        positions[4_321].x = f64::NAN;
        positions[8_000].x = f64::NEG_INFINITY;
        assert_eq!(
            find_extrema(&positions, Axis::X),
            find_extrema_sequential(&positions, Axis::X),
            "non-finite values"
        );
    }
}
