pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
}

/// Level of `output` relative to `input` in dB
pub fn attenuation_db(input: &[f32], output: &[f32]) -> f32 {
    20.0 * (rms(output) / rms(input)).log10()
}
