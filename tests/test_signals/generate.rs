use std::f64::consts::PI;

/// Unit-amplitude sine at `freq_hz`
///
/// Phase is wrapped in f64 so long signals stay spectrally clean.
pub fn sine(freq_hz: f32, sample_rate: f32, num_samples: usize) -> Vec<f32> {
    let step = f64::from(freq_hz) / f64::from(sample_rate);
    (0..num_samples)
        .map(|i| ((step * i as f64).fract() * 2.0 * PI).sin() as f32)
        .collect()
}

/// Unit impulse at index 0
pub fn impulse(num_samples: usize) -> Vec<f32> {
    let mut samples = vec![0.0; num_samples];
    if let Some(first) = samples.first_mut() {
        *first = 1.0;
    }
    samples
}

/// Interleave equal-length channels as `[a0, b0, a1, b1, ...]`
pub fn interleave(channels: &[Vec<f32>]) -> Vec<f32> {
    let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
    (0..frames)
        .flat_map(|i| channels.iter().map(move |ch| ch[i]))
        .collect()
}
