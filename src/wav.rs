use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{FirError, Result};

/// Interleaved audio loaded from, or bound for, a WAV file
#[derive(Debug, Clone, PartialEq)]
pub struct WavAudio {
    /// Interleaved samples in `[-1, 1]`.
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl WavAudio {
    pub fn num_frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / usize::from(self.channels)
        }
    }
}

fn audio_err(path: &Path, e: hound::Error) -> FirError {
    FirError::Audio(format!("{}: {}", path.display(), e))
}

/// Read any PCM or float WAV file as interleaved `f32`
pub fn read_wav(path: impl AsRef<Path>) -> Result<WavAudio> {
    let path = path.as_ref();
    let mut reader = WavReader::open(path).map_err(|e| audio_err(path, e))?;
    let spec = reader.spec();

    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>(),
        SampleFormat::Int => {
            let max_val = 2_i64.pow(u32::from(spec.bits_per_sample) - 1) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()
        }
    }
    .map_err(|e| audio_err(path, e))?;

    log::debug!(
        "Read {} frames, {} channel(s) at {} Hz from {}",
        samples.len() / usize::from(spec.channels.max(1)),
        spec.channels,
        spec.sample_rate,
        path.display()
    );

    Ok(WavAudio {
        samples,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
    })
}

/// Write interleaved samples as 32-bit float WAV
pub fn write_wav(path: impl AsRef<Path>, audio: &WavAudio) -> Result<()> {
    let path = path.as_ref();
    let spec = WavSpec {
        channels: audio.channels,
        sample_rate: audio.sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec).map_err(|e| audio_err(path, e))?;
    for &sample in &audio.samples {
        writer.write_sample(sample).map_err(|e| audio_err(path, e))?;
    }
    writer.finalize().map_err(|e| audio_err(path, e))?;
    Ok(())
}
