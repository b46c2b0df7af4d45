use std::ops::Deref;

use super::spec::FilterSpec;

/// Fixed-length tap vector produced by the designer
///
/// The length is set at construction and never changes; the vector moves
/// from the designer through the hand-off slot into the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientVector {
    taps: Box<[f64]>,
}

impl CoefficientVector {
    pub fn new(taps: Vec<f64>) -> Self {
        Self {
            taps: taps.into_boxed_slice(),
        }
    }

    /// Single unit tap; passes audio through unchanged
    pub fn identity() -> Self {
        Self::new(vec![1.0])
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    /// Group delay in samples (the centre index of the design)
    pub fn group_delay_samples(&self) -> usize {
        self.taps.len() / 2
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.taps.into_vec()
    }
}

impl Deref for CoefficientVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.taps
    }
}

impl From<Vec<f64>> for CoefficientVector {
    fn from(taps: Vec<f64>) -> Self {
        Self::new(taps)
    }
}

/// The coefficient vector being convolved, with the spec it came from
#[derive(Debug, Clone, PartialEq)]
pub struct DesignedFilter {
    pub coefficients: CoefficientVector,
    /// `None` for the pass-through filter installed before the first design.
    pub spec: Option<FilterSpec>,
}

impl DesignedFilter {
    pub fn new(coefficients: CoefficientVector, spec: FilterSpec) -> Self {
        Self {
            coefficients,
            spec: Some(spec),
        }
    }

    pub fn passthrough() -> Self {
        Self {
            coefficients: CoefficientVector::identity(),
            spec: None,
        }
    }

    pub fn group_delay_samples(&self) -> usize {
        self.coefficients.group_delay_samples()
    }
}

impl Default for DesignedFilter {
    fn default() -> Self {
        Self::passthrough()
    }
}
