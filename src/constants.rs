//! Numeric limits shared by the designer and the convolution engine.

/// Smallest coefficient count a design may produce.
pub const MIN_ORDER: usize = 1;

/// Largest coefficient count a design may produce.
/// The ring buffers are sized from this so no order change ever reallocates.
pub const MAX_ORDER: usize = 5000;

/// Lower bound on ring buffer capacity, regardless of block size.
pub const MIN_RING_CAPACITY: usize = 8192;

/// Number of series terms used by the modified Bessel function approximation.
pub const BESSEL_I0_TERMS: usize = 32;

/// Arguments below this are shifted up before the asymptotic log-gamma
/// expansion is applied.
pub const LN_GAMMA_ASYMPTOTIC_MIN: f64 = 10.0;

/// Default tolerance for approximate symmetry checks.
pub const SYMMETRY_TOLERANCE: f64 = 1e-5;

/// Fixed vector installed by the custom design method.
pub const CUSTOM_TAPS: [f64; 7] = [0.3, 0.2, 0.1, 0.2, 0.1, 0.2, 0.3];
