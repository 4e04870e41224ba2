use glam::DVec3;

/// Read-only view of a body's current particle positions, indexed `0..N`.
///
/// Implementations must keep the slice stable for the duration of one
/// suture update. An empty slice means "no anchors available".
pub trait PositionSource {
    fn positions(&self) -> &[DVec3];
}

impl PositionSource for [DVec3] {
    fn positions(&self) -> &[DVec3] {
        self
    }
}

impl PositionSource for Vec<DVec3> {
    fn positions(&self) -> &[DVec3] {
        self
    }
}

/// SoA particle storage for a deformable body
pub struct ParticleSet {
    pub count: usize,
    pub position: Vec<DVec3>,
}

impl ParticleSet {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            position: vec![DVec3::ZERO; count],
        }
    }

    pub fn from_positions(position: Vec<DVec3>) -> Self {
        Self {
            count: position.len(),
            position,
        }
    }
}

impl PositionSource for ParticleSet {
    fn positions(&self) -> &[DVec3] {
        &self.position[..self.count.min(self.position.len())]
    }
}
