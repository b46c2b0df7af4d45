pub mod generate;
pub mod measure;

pub use generate::{impulse, interleave, sine};
pub use measure::{attenuation_db, rms};
