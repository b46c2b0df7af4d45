//! Real-time side: per-channel convolution and the coefficient hand-off.

pub mod convolution;
pub mod handoff;
pub mod ring_buffer;

pub use convolution::{FilterEngine, ring_capacity};
pub use handoff::HandoffSlot;
pub use ring_buffer::RingBuffer;
