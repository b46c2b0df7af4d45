//! Coefficient design: window functions, ideal responses and the design
//! methods that turn a [`FilterSpec`] into a [`CoefficientVector`].

pub mod coefficients;
pub mod designer;
pub mod diagnostics;
pub mod halfband;
pub mod least_squares;
pub mod math;
pub mod spec;
pub mod window;

pub use coefficients::{CoefficientVector, DesignedFilter};
pub use designer::design;
pub use diagnostics::{
    LinearPhase, frequency_response, is_anti_symmetric, is_symmetric, is_symmetric_within,
    magnitude_db,
};
pub use math::{bessel_i0, kaiser_beta, ln_gamma};
pub use spec::{DesignMethod, FilterSpec, FilterType};
pub use window::WindowType;
