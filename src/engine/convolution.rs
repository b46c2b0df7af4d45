use std::sync::Arc;

use super::{HandoffSlot, RingBuffer};
use crate::constants::{MAX_ORDER, MIN_RING_CAPACITY};
use crate::design::DesignedFilter;
use crate::error::{FirError, Result};

/// Ring capacity for a session with the given maximum block size
pub fn ring_capacity(max_block_size: usize) -> usize {
    (MAX_ORDER + max_block_size)
        .next_power_of_two()
        .max(MIN_RING_CAPACITY)
}

/// Audio-rate half of the filter: per-channel histories and the active taps
///
/// Every channel is filtered independently with the same coefficients.
/// Nothing on the processing path allocates, frees or blocks.
pub struct FilterEngine {
    slot: Arc<HandoffSlot>,
    active: DesignedFilter,
    channels: Vec<RingBuffer>,
    sample_rate: f64,
    max_block_size: usize,
}

impl FilterEngine {
    /// Unprepared engine that passes audio through until `prepare`
    pub fn new(slot: Arc<HandoffSlot>) -> Self {
        Self {
            slot,
            active: DesignedFilter::passthrough(),
            channels: Vec::new(),
            sample_rate: 0.0,
            max_block_size: 0,
        }
    }

    /// Size the per-channel histories for a playback session
    ///
    /// # Errors
    /// Returns `FirError::Config` for a non-positive sample rate, a zero block
    /// size or zero channels.
    pub fn prepare(&mut self, sample_rate: f64, max_block_size: usize, num_channels: usize) -> Result<()> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(FirError::Config(format!(
                "sample rate must be positive, got {}",
                sample_rate
            )));
        }
        if max_block_size == 0 || num_channels == 0 {
            return Err(FirError::Config(format!(
                "need at least one channel and one sample per block, got {} x {}",
                num_channels, max_block_size
            )));
        }

        let capacity = ring_capacity(max_block_size);
        self.channels = (0..num_channels)
            .map(|_| RingBuffer::with_capacity(capacity))
            .collect();
        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;

        log::debug!(
            "Prepared {} channel(s) at {} Hz, block {}, ring capacity {}",
            num_channels,
            sample_rate,
            max_block_size,
            capacity
        );
        Ok(())
    }

    /// Zero every channel's history without reallocating
    pub fn reset(&mut self) {
        for ring in &mut self.channels {
            ring.reset();
        }
    }

    /// Playback stopped; histories are cleared but stay allocated
    pub fn release_resources(&mut self) {
        self.reset();
    }

    /// Pick up a newly designed filter from the hand-off slot
    ///
    /// On adoption the histories are reset so the new taps never see input
    /// that was shaped for the previous filter length.
    pub fn adopt_pending(&mut self) -> bool {
        if !self.slot.try_adopt(&mut self.active) {
            return false;
        }
        debug_assert!(
            self.channels
                .first()
                .is_none_or(|ring| self.active.coefficients.len() <= ring.capacity())
        );
        self.reset();
        true
    }

    /// Filter one sample on one channel
    ///
    /// Channels beyond the prepared count pass through unchanged.
    pub fn filter_sample(&mut self, channel: usize, sample: f32) -> f32 {
        let taps = self.active.coefficients.taps();
        match self.channels.get_mut(channel) {
            Some(ring) => ring.filter_sample(taps, sample),
            None => sample,
        }
    }

    /// Filter one planar block in place
    ///
    /// Adopts any pending filter once, before the first sample. Blocks may be
    /// shorter than the prepared maximum. A block with more channels than
    /// were prepared is a host error: debug builds panic, release builds
    /// leave the extra channels unfiltered.
    pub fn process(&mut self, block: &mut [&mut [f32]]) {
        debug_assert!(
            self.channels.is_empty() || block.len() <= self.channels.len(),
            "block has {} channels, engine prepared for {}",
            block.len(),
            self.channels.len()
        );
        self.adopt_pending();

        let taps = self.active.coefficients.taps();
        for (ring, samples) in self.channels.iter_mut().zip(block.iter_mut()) {
            for sample in samples.iter_mut() {
                *sample = ring.filter_sample(taps, *sample);
            }
        }
    }

    /// Filter one interleaved block in place (`[L, R, L, R, ...]`)
    pub fn process_interleaved(&mut self, data: &mut [f32]) {
        self.adopt_pending();

        let num_channels = self.channels.len();
        if num_channels == 0 {
            return;
        }

        let taps = self.active.coefficients.taps();
        for frame in data.chunks_mut(num_channels) {
            for (ring, sample) in self.channels.iter_mut().zip(frame.iter_mut()) {
                *sample = ring.filter_sample(taps, *sample);
            }
        }
    }

    pub fn active_filter(&self) -> &DesignedFilter {
        &self.active
    }

    /// Group delay of the active filter, in samples
    ///
    /// The engine does not compensate for it; hosts that need sample-exact
    /// alignment report it as latency.
    pub fn latency_samples(&self) -> usize {
        self.active.group_delay_samples()
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    pub fn is_prepared(&self) -> bool {
        !self.channels.is_empty()
    }
}
