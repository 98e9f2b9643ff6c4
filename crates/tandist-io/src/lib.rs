//! Audio I/O layer for TanDist.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav_stereo`] and [`write_wav_stereo`] for loading and saving
//!   audio files
//! - **Offline rendering**: [`ProcessingEngine`] drives any
//!   [`AudioEffect`](tandist_core::AudioEffect) over a whole file in host-sized blocks,
//!   applying parameter automation on the way
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tandist_core::{TanDist, GAIN};
//! use tandist_io::{AutomationPoint, ProcessingEngine, read_wav_stereo, write_wav_stereo};
//!
//! let (input, spec) = read_wav_stereo("input.wav")?;
//!
//! let mut engine = ProcessingEngine::new(TanDist::new(spec.sample_rate as f32), 256);
//! engine.add_automation(AutomationPoint::new(48000, GAIN, 4.0));
//! let output = engine.process_stereo(&input, |_| {});
//!
//! write_wav_stereo("output.wav", &output, spec)?;
//! # Ok::<(), tandist_io::Error>(())
//! ```

mod engine;
mod wav;

pub use engine::{AutomationPoint, ProcessingEngine};
pub use wav::{
    StereoSamples, WavFormat, WavInfo, WavSpec, read_wav_info, read_wav_stereo, write_wav_stereo,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed file or underlying I/O failure, as reported by `hound`.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The requested bit depth is not supported.
    #[error("Unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),

    /// Left and right channels differ in length.
    #[error("Channel length mismatch: left {left}, right {right}")]
    ChannelMismatch {
        /// Left channel length.
        left: usize,
        /// Right channel length.
        right: usize,
    },
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
