//! Picker feed consumed by the manual anchor strategy.

use glam::DVec3;

use crate::error::{SutureError, SutureResult};
use crate::particle::PositionSource;

/// Parallel sequences of picked positions and particle indices, as reported
/// by an external picking mechanism. First picked comes first.
pub trait PickerFeed {
    fn picked_positions(&self) -> &[DVec3];
    fn picked_indices(&self) -> &[u32];
}

/// Accumulated picks on a body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickState {
    picked_positions: Vec<DVec3>,
    picked_indices: Vec<u32>,
}

impl PickState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pick of particle `index` at `position`.
    pub fn push(&mut self, index: u32, position: DVec3) {
        self.picked_indices.push(index);
        self.picked_positions.push(position);
    }

    /// Record a pick of particle `index` at its current position in `body`.
    pub fn pick(&mut self, body: &dyn PositionSource, index: u32) -> SutureResult<()> {
        let position = lookup(body, index)?;
        self.push(index, position);
        Ok(())
    }

    /// Re-read every picked position from `body` so the picks follow the
    /// particles as they move. On error no position is changed.
    pub fn refresh(&mut self, body: &dyn PositionSource) -> SutureResult<()> {
        let fresh = self
            .picked_indices
            .iter()
            .map(|&index| lookup(body, index))
            .collect::<SutureResult<Vec<_>>>()?;
        self.picked_positions = fresh;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.picked_positions.clear();
        self.picked_indices.clear();
    }

    pub fn len(&self) -> usize {
        self.picked_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picked_indices.is_empty()
    }
}

impl PickerFeed for PickState {
    fn picked_positions(&self) -> &[DVec3] {
        &self.picked_positions
    }

    fn picked_indices(&self) -> &[u32] {
        &self.picked_indices
    }
}

fn lookup(body: &dyn PositionSource, index: u32) -> SutureResult<DVec3> {
    let positions = body.positions();
    positions
        .get(index as usize)
        .copied()
        .ok_or(SutureError::ParticleOutOfBounds {
            index,
            count: positions.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_reads_body_position() {
        let body = vec![DVec3::ZERO, DVec3::new(1.0, 2.0, 3.0)];
        let mut picks = PickState::new();
        picks.pick(&body, 1).unwrap();

        assert_eq!(picks.picked_indices(), &[1]);
        assert_eq!(picks.picked_positions(), &[DVec3::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn test_pick_out_of_bounds_is_rejected() {
        let body = vec![DVec3::ZERO];
        let mut picks = PickState::new();
        let err = picks.pick(&body, 4).unwrap_err();

        assert_eq!(err, SutureError::ParticleOutOfBounds { index: 4, count: 1 });
        assert!(picks.is_empty(), "failed pick must not be recorded");
    }

    #[test]
    fn test_refresh_follows_moving_particles() {
        let mut body = vec![DVec3::ZERO, DVec3::X];
        let mut picks = PickState::new();
        picks.pick(&body, 0).unwrap();
        picks.pick(&body, 1).unwrap();

        body[1] = DVec3::new(5.0, 0.0, 0.0);
        picks.refresh(&body).unwrap();

        assert_eq!(picks.picked_positions()[1], DVec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_refresh_failure_keeps_positions() {
        let body = vec![DVec3::ZERO, DVec3::X];
        let mut picks = PickState::new();
        picks.pick(&body, 1).unwrap();

        let shrunk = vec![DVec3::Y];
        assert!(picks.refresh(&shrunk).is_err());
        assert_eq!(picks.picked_positions(), &[DVec3::X]);
    }

    #[test]
    fn test_clear() {
        let mut picks = PickState::new();
        picks.push(3, DVec3::ONE);
        picks.clear();
        assert_eq!(picks.len(), 0);
        assert!(picks.picked_positions().is_empty());
    }
}
