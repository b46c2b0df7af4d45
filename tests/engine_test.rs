mod test_signals;

use std::sync::Arc;

use approx::assert_abs_diff_eq;

use firshell::design::{self, DesignMethod, DesignedFilter, FilterSpec, FilterType, WindowType};
use firshell::engine::{FilterEngine, HandoffSlot};
use firshell::params::{FilterParameters, MethodKind};
use firshell::plugin::FirPlugin;

const SAMPLE_RATE: f64 = 44100.0;

fn engine_for(spec: FilterSpec, channels: usize, block: usize) -> FilterEngine {
    let slot = Arc::new(HandoffSlot::new());
    let mut engine = FilterEngine::new(slot.clone());
    engine.prepare(spec.sample_rate, block, channels).unwrap();
    let taps = design::design(&spec).unwrap();
    slot.try_swap(DesignedFilter::new(taps, spec)).unwrap();
    engine
}

#[test]
fn test_impulse_recovers_quarter_rate_lowpass() {
    let spec = FilterSpec::lowpass(21, SAMPLE_RATE, SAMPLE_RATE / 4.0, WindowType::Hamming);
    let taps = design::design(&spec).unwrap();
    let mut engine = engine_for(spec, 1, 64);

    let mut block = test_signals::impulse(64);
    engine.process(&mut [&mut block[..]]);

    for (i, &tap) in taps.iter().enumerate() {
        assert_abs_diff_eq!(block[i] as f64, tap, epsilon = 1e-5);
    }
    assert!(block[taps.len()..].iter().all(|&s| s == 0.0));
}

#[test]
fn test_reset_then_silence_is_silent() {
    let spec = FilterSpec::lowpass(101, SAMPLE_RATE, 2000.0, WindowType::Blackman);
    let mut engine = engine_for(spec, 2, 256);

    let mut left = test_signals::sine(440.0, SAMPLE_RATE as f32, 256);
    let mut right = test_signals::sine(3000.0, SAMPLE_RATE as f32, 256);
    engine.process(&mut [&mut left[..], &mut right[..]]);

    engine.reset();
    let mut left = [0.0f32; 256];
    let mut right = [0.0f32; 256];
    engine.process(&mut [&mut left[..], &mut right[..]]);
    assert!(left.iter().chain(right.iter()).all(|&s| s == 0.0));

    // Twice in a row changes nothing
    engine.reset();
    engine.process(&mut [&mut left[..], &mut right[..]]);
    assert!(left.iter().chain(right.iter()).all(|&s| s == 0.0));
}

#[test]
fn test_kaiser_lowpass_separates_tones() {
    let spec = FilterSpec::default()
        .with_method(DesignMethod::Kaiser {
            transition_width: 0.01,
        })
        .with_attenuation(-80.0);
    let spec = FilterSpec {
        sample_rate: 48000.0,
        ..spec
    };
    let mut engine = engine_for(spec, 1, 512);
    assert!(engine.adopt_pending());
    let settle = engine.latency_samples() * 2 + 1;

    for (freq, expect_pass) in [(200.0, true), (5000.0, false), (12000.0, false)] {
        engine.reset();
        let input = test_signals::sine(freq, 48000.0, 48000);
        let mut output = input.clone();
        for block in output.chunks_mut(512) {
            engine.process(&mut [block]);
        }
        let level = test_signals::attenuation_db(&input[settle..], &output[settle..]);
        if expect_pass {
            assert!(level.abs() < 0.1, "{} Hz: {} dB", freq, level);
        } else {
            assert!(level < -70.0, "{} Hz: {} dB", freq, level);
        }
    }
}

#[test]
fn test_block_size_does_not_change_output() {
    let spec = FilterSpec::lowpass(63, SAMPLE_RATE, 5000.0, WindowType::Hann)
        .with_filter_type(FilterType::HighPass);
    let input = test_signals::sine(7000.0, SAMPLE_RATE as f32, 1000);

    let mut whole = input.clone();
    engine_for(spec, 1, 1000).process(&mut [&mut whole[..]]);

    // Uneven chunks, including a short final block
    let mut chunked = input.clone();
    let mut engine = engine_for(spec, 1, 128);
    for block in chunked.chunks_mut(97) {
        engine.process(&mut [block]);
    }
    assert_eq!(whole, chunked);
}

#[test]
fn test_channels_are_independent() {
    let spec = FilterSpec::lowpass(31, SAMPLE_RATE, 1000.0, WindowType::Hamming);
    let mut engine = engine_for(spec, 2, 128);

    let tone = test_signals::sine(500.0, SAMPLE_RATE as f32, 128);
    let mut interleaved = test_signals::interleave(&[tone.clone(), vec![0.0; 128]]);
    engine.process_interleaved(&mut interleaved);

    let right: Vec<f32> = interleaved.iter().skip(1).step_by(2).copied().collect();
    assert!(right.iter().all(|&s| s == 0.0));

    let mut mono = tone;
    engine_for(spec, 1, 128).process(&mut [&mut mono[..]]);
    let left: Vec<f32> = interleaved.iter().step_by(2).copied().collect();
    assert_eq!(left, mono);
}

#[test]
fn test_plugin_bandpass_end_to_end() {
    let params = FilterParameters {
        method: MethodKind::Kaiser,
        filter_type: FilterType::BandPass,
        frequency: 1000.0,
        upper_frequency: 4000.0,
        transition_width: 0.02,
        amplitude: -60.0,
        ..FilterParameters::default()
    };
    let mut plugin = FirPlugin::with_parameters(params);
    plugin.prepare(SAMPLE_RATE, 256, 1).unwrap();

    let input = test_signals::sine(2000.0, SAMPLE_RATE as f32, 8192);
    let mut output = input.clone();
    for block in output.chunks_mut(256) {
        plugin.process(&mut [block]);
    }
    let settle = 2 * plugin.latency_samples() + 1;
    let level = test_signals::attenuation_db(&input[settle..], &output[settle..]);
    assert!(level.abs() < 0.1, "passband level {} dB", level);

    let input = test_signals::sine(200.0, SAMPLE_RATE as f32, 8192);
    let mut output = input.clone();
    plugin.reset();
    for block in output.chunks_mut(256) {
        plugin.process(&mut [block]);
    }
    let level = test_signals::attenuation_db(&input[settle..], &output[settle..]);
    assert!(level < -50.0, "stopband level {} dB", level);
}
