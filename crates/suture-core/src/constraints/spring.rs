use crate::config::{DEFAULT_DAMPING, DEFAULT_STIFFNESS};

/// Two-endpoint elastic constraint consumed by the force stage.
///
/// Endpoint lists A and B and the rest-length list are parallel: entry `k`
/// describes a spring between particle `endpoints_a()[k]` and
/// `endpoints_b()[k]`. Stiffness and damping are fixed at construction.
pub trait ConstraintSink {
    fn set_endpoints_a(&mut self, indices: Vec<u32>);
    fn set_endpoints_b(&mut self, indices: Vec<u32>);
    fn set_rest_lengths(&mut self, lengths: Vec<f64>);

    fn endpoints_a(&self) -> &[u32];
    fn endpoints_b(&self) -> &[u32];
    fn rest_lengths(&self) -> &[f64];
    fn stiffness(&self) -> f64;
    fn damping(&self) -> f64;

    /// Packed per-spring records, e.g. for upload to a GPU or JS buffer.
    /// Lists of unequal length are truncated to the shortest.
    fn records(&self) -> Vec<SpringRecord> {
        self.endpoints_a()
            .iter()
            .zip(self.endpoints_b())
            .zip(self.rest_lengths())
            .map(|((&index_a, &index_b), &rest_length)| SpringRecord {
                index_a,
                index_b,
                rest_length,
            })
            .collect()
    }
}

/// Spring force field storage: parallel endpoint and rest-length lists
/// sharing one stiffness and damping.
#[derive(Debug, Clone, PartialEq)]
pub struct SpringSet {
    endpoints_a: Vec<u32>,
    endpoints_b: Vec<u32>,
    rest_lengths: Vec<f64>,
    stiffness: f64,
    damping: f64,
}

impl SpringSet {
    /// Create an empty spring set with the given material parameters.
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            endpoints_a: Vec::new(),
            endpoints_b: Vec::new(),
            rest_lengths: Vec::new(),
            stiffness,
            damping,
        }
    }

    /// Number of springs (the shortest of the three lists).
    pub fn len(&self) -> usize {
        self.endpoints_a
            .len()
            .min(self.endpoints_b.len())
            .min(self.rest_lengths.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SpringSet {
    fn default() -> Self {
        Self::new(DEFAULT_STIFFNESS, DEFAULT_DAMPING)
    }
}

impl ConstraintSink for SpringSet {
    fn set_endpoints_a(&mut self, indices: Vec<u32>) {
        self.endpoints_a = indices;
    }

    fn set_endpoints_b(&mut self, indices: Vec<u32>) {
        self.endpoints_b = indices;
    }

    fn set_rest_lengths(&mut self, lengths: Vec<f64>) {
        self.rest_lengths = lengths;
    }

    fn endpoints_a(&self) -> &[u32] {
        &self.endpoints_a
    }

    fn endpoints_b(&self) -> &[u32] {
        &self.endpoints_b
    }

    fn rest_lengths(&self) -> &[f64] {
        &self.rest_lengths
    }

    fn stiffness(&self) -> f64 {
        self.stiffness
    }

    fn damping(&self) -> f64 {
        self.damping
    }
}

/// One spring packed as 16 bytes: two `u32` endpoints then an `f64` rest length.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpringRecord {
    pub index_a: u32,
    pub index_b: u32,
    pub rest_length: f64,
}
