/// Per-channel input history for direct-form FIR convolution
///
/// Capacity is fixed at construction and always at least the longest tap
/// vector the engine accepts, so a convolution never reads a slot that was
/// overwritten within the current window.
pub struct RingBuffer {
    history: Vec<f64>,
    pos: usize,
}

impl RingBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be non-zero");
        Self {
            history: vec![0.0; capacity],
            pos: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.history.len()
    }

    /// Zero the history in place
    pub fn reset(&mut self) {
        self.history.fill(0.0);
        self.pos = 0;
    }

    /// Push one input sample and return the filtered output
    ///
    /// `y = sum_k taps[k] * x[n - k]`. O(taps) work, no allocation.
    pub fn filter_sample(&mut self, taps: &[f64], sample: f32) -> f32 {
        debug_assert!(taps.len() <= self.history.len());

        self.history[self.pos] = sample as f64;

        // Walk the history newest-first in two contiguous runs to avoid
        // modulo arithmetic in the inner loop.
        let newest = self.pos + 1;
        let (recent_taps, older_taps) = taps.split_at(newest.min(taps.len()));

        let mut output = 0.0f64;
        for (tap, x) in recent_taps.iter().zip(self.history[..newest].iter().rev()) {
            output += tap * x;
        }
        for (tap, x) in older_taps.iter().zip(self.history.iter().rev()) {
            output += tap * x;
        }

        self.pos += 1;
        if self.pos == self.history.len() {
            self.pos = 0;
        }
        output as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_reproduces_taps() {
        let taps = [0.5, -0.25, 0.125, 1.0];
        let mut ring = RingBuffer::with_capacity(8);
        let mut out = Vec::new();
        out.push(ring.filter_sample(&taps, 1.0));
        for _ in 0..5 {
            out.push(ring.filter_sample(&taps, 0.0));
        }
        assert_eq!(out, vec![0.5, -0.25, 0.125, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_wraps_around_capacity() {
        // Capacity equal to the tap count exercises the wrap on every sample
        let taps = [1.0, 2.0, 3.0];
        let mut ring = RingBuffer::with_capacity(3);
        let input = [1.0f32, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0];
        let output: Vec<f32> = input.iter().map(|&x| ring.filter_sample(&taps, x)).collect();
        assert_eq!(output, vec![1.0, 2.0, 3.0, 0.0, 1.0, 3.0, 5.0, 3.0, 0.0]);
    }

    #[test]
    fn test_matches_direct_convolution() {
        let taps: Vec<f64> = (0..13).map(|i| (i as f64 * 0.37).sin()).collect();
        let input: Vec<f32> = (0..200).map(|i| ((i * 7919) % 23) as f32 / 23.0 - 0.5).collect();
        let mut ring = RingBuffer::with_capacity(32);

        for (n, &x) in input.iter().enumerate() {
            let got = ring.filter_sample(&taps, x);
            let expected: f64 = (0..taps.len())
                .filter(|&k| k <= n)
                .map(|k| taps[k] * input[n - k] as f64)
                .sum();
            assert!((got as f64 - expected).abs() < 1e-5, "sample {}", n);
        }
    }

    #[test]
    fn test_reset_clears_history() {
        let taps = [1.0, 1.0, 1.0];
        let mut ring = RingBuffer::with_capacity(4);
        for _ in 0..10 {
            ring.filter_sample(&taps, 1.0);
        }
        ring.reset();
        for _ in 0..10 {
            assert_eq!(ring.filter_sample(&taps, 0.0), 0.0);
        }
    }
}
