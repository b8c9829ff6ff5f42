//! WAV decoding to mono f32 samples

use std::io::Read;
use std::path::Path;

use crate::error::{Result, SolaceError};

/// Decoded mono buffer
#[derive(Debug, Clone, PartialEq)]
pub struct MonoAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl MonoAudio {
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Load a WAV file, mixing to mono if needed.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn read_wav(path: &Path) -> Result<MonoAudio> {
    let reader = hound::WavReader::open(path)
        .map_err(|e| SolaceError::Audio(format!("cannot open WAV {}: {e}", path.display())))?;
    decode(reader)
}

/// Decode WAV bytes already in memory.
pub fn decode_wav_bytes(bytes: &[u8]) -> Result<MonoAudio> {
    let reader = hound::WavReader::new(std::io::Cursor::new(bytes))
        .map_err(|e| SolaceError::Audio(format!("cannot parse WAV: {e}")))?;
    decode(reader)
}

fn decode<R: Read>(mut reader: hound::WavReader<R>) -> Result<MonoAudio> {
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let max = (1i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| {
                    s.map_err(|e| SolaceError::Audio(format!("WAV read error: {e}")))
                        .map(|v| v as f32 / max)
                })
                .collect::<Result<Vec<f32>>>()?
        }
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map_err(|e| SolaceError::Audio(format!("WAV read error: {e}"))))
            .collect::<Result<Vec<f32>>>()?,
    };

    let samples = if spec.channels > 1 {
        let ch = spec.channels as usize;
        samples
            .chunks(ch)
            .map(|frame| frame.iter().sum::<f32>() / ch as f32)
            .collect()
    } else {
        samples
    };

    Ok(MonoAudio {
        samples,
        sample_rate: spec.sample_rate,
    })
}
