//! Stereo WAV files via `hound`.
//!
//! Files are always loaded into planar [`StereoSamples`]. 32-bit files are
//! IEEE float; 16 and 24-bit files are integer PCM scaled to ±1.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavWriter};

use crate::{Error, Result};

/// Sample encoding found in a WAV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Integer PCM.
    Pcm,
    /// IEEE 754 float.
    IeeeFloat,
}

impl From<SampleFormat> for WavFormat {
    fn from(format: SampleFormat) -> Self {
        match format {
            SampleFormat::Int => WavFormat::Pcm,
            SampleFormat::Float => WavFormat::IeeeFloat,
        }
    }
}

/// Header summary of a WAV file.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Channel count as stored in the file.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// Bits per stored sample.
    pub bits_per_sample: u16,
    /// Samples per channel.
    pub num_frames: u64,
    /// `num_frames / sample_rate`.
    pub duration_secs: f64,
    /// Integer or float samples.
    pub format: WavFormat,
}

impl WavInfo {
    fn from_header(header: hound::WavSpec, total_samples: u32) -> Self {
        let num_frames = u64::from(total_samples) / u64::from(header.channels.max(1));
        Self {
            channels: header.channels,
            sample_rate: header.sample_rate,
            bits_per_sample: header.bits_per_sample,
            num_frames,
            duration_secs: num_frames as f64 / f64::from(header.sample_rate.max(1)),
            format: header.sample_format.into(),
        }
    }
}

/// Read only the header of a WAV file.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    Ok(WavInfo::from_header(reader.spec(), reader.len()))
}

/// Stream layout of a file that was read or is about to be written.
///
/// The default is 48 kHz stereo 32-bit float.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Channel count. Ignored when writing; output is always stereo.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// 16, 24 (integer) or 32 (float).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl WavSpec {
    /// Same layout at another bit depth.
    #[must_use]
    pub fn with_bit_depth(mut self, bits_per_sample: u16) -> Self {
        self.bits_per_sample = bits_per_sample;
        self
    }

    /// The stereo `hound` header this spec writes.
    fn stereo_header(self) -> Result<hound::WavSpec> {
        let sample_format = match self.bits_per_sample {
            16 | 24 => SampleFormat::Int,
            32 => SampleFormat::Float,
            other => return Err(Error::UnsupportedBitDepth(other)),
        };
        Ok(hound::WavSpec {
            channels: 2,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format,
        })
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(header: hound::WavSpec) -> Self {
        Self {
            channels: header.channels,
            sample_rate: header.sample_rate,
            bits_per_sample: header.bits_per_sample,
        }
    }
}

/// Full-scale magnitude of a signed integer sample of `bits` bits.
fn int_full_scale(bits: u16) -> f32 {
    (1u64 << (bits.clamp(2, 32) - 1)) as f32
}

/// Planar stereo audio with equal-length channels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StereoSamples {
    /// Left channel.
    pub left: Vec<f32>,
    /// Right channel.
    pub right: Vec<f32>,
}

impl StereoSamples {
    /// Pair two channels, rejecting a length mismatch.
    pub fn new(left: Vec<f32>, right: Vec<f32>) -> Result<Self> {
        if left.len() != right.len() {
            return Err(Error::ChannelMismatch {
                left: left.len(),
                right: right.len(),
            });
        }
        Ok(Self { left, right })
    }

    /// Dual mono: the same signal on both channels.
    pub fn from_mono(mono: Vec<f32>) -> Self {
        Self {
            left: mono.clone(),
            right: mono,
        }
    }

    /// Split interleaved frames, keeping the first two of every `channels`
    /// samples. Mono is duplicated and a trailing partial frame is dropped.
    pub fn from_interleaved(interleaved: &[f32], channels: usize) -> Self {
        match channels {
            0 => Self::default(),
            1 => Self::from_mono(interleaved.to_vec()),
            _ => interleaved
                .chunks_exact(channels)
                .map(|frame| (frame[0], frame[1]))
                .unzip::<_, _, Vec<_>, Vec<_>>()
                .into(),
        }
    }

    /// Frame count.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// `true` when there are no frames.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Largest absolute sample value across both channels.
    pub fn peak(&self) -> f32 {
        self.left
            .iter()
            .chain(&self.right)
            .fold(0.0f32, |peak, s| peak.max(s.abs()))
    }
}

impl From<(Vec<f32>, Vec<f32>)> for StereoSamples {
    fn from((left, right): (Vec<f32>, Vec<f32>)) -> Self {
        Self { left, right }
    }
}

/// Load a WAV file as stereo.
///
/// Mono is duplicated to both channels; only the first two channels of a
/// multichannel file are kept.
pub fn read_wav_stereo<P: AsRef<Path>>(path: P) -> Result<(StereoSamples, WavSpec)> {
    let reader = WavReader::open(path)?;
    let header = reader.spec();

    let interleaved = match header.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let scale = int_full_scale(header.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    tracing::debug!(
        channels = header.channels,
        sample_rate = header.sample_rate,
        bits = header.bits_per_sample,
        samples = interleaved.len(),
        "read wav"
    );

    let samples = StereoSamples::from_interleaved(&interleaved, usize::from(header.channels));
    Ok((samples, header.into()))
}

/// Write `samples` as a stereo WAV file at `spec`'s rate and bit depth.
///
/// Integer depths are clipped to the representable range. Nothing is created
/// when the bit depth is unsupported.
pub fn write_wav_stereo<P: AsRef<Path>>(
    path: P,
    samples: &StereoSamples,
    spec: WavSpec,
) -> Result<()> {
    let header = spec.stereo_header()?;
    let mut writer = WavWriter::create(path, header)?;
    let frames = samples.left.iter().zip(&samples.right);

    match header.sample_format {
        SampleFormat::Float => {
            for (&l, &r) in frames {
                writer.write_sample(l)?;
                writer.write_sample(r)?;
            }
        }
        SampleFormat::Int => {
            let scale = int_full_scale(header.bits_per_sample);
            let quantize = |s: f32| (s * scale).clamp(-scale, scale - 1.0) as i32;
            for (&l, &r) in frames {
                writer.write_sample(quantize(l))?;
                writer.write_sample(quantize(r))?;
            }
        }
    }

    writer.finalize()?;
    Ok(())
}
