//! Linear-phase FIR filter design and real-time block convolution.
//!
//! The [`design`] module turns a [`FilterSpec`] into coefficients, the
//! [`engine`] convolves audio with them, and [`plugin`] ties the two
//! together behind a host-style parameter set.

pub mod cli;
pub mod config;
pub mod constants;
pub mod design;
pub mod engine;
pub mod error;
pub mod output;
pub mod params;
pub mod plugin;
pub mod wav;

pub use config::PluginConfig;
pub use design::{CoefficientVector, DesignMethod, DesignedFilter, FilterSpec, FilterType, WindowType};
pub use engine::{FilterEngine, HandoffSlot};
pub use error::{FirError, Result};
pub use params::{FilterParameters, ParameterId};
pub use plugin::{FilterController, FirPlugin};
pub use wav::{read_wav, write_wav};
