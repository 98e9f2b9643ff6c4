//! Offline rendering of a WAV file through TanDist.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tandist_config::TanDistConfig;
use tandist_core::{AudioEffect, GAIN, ParameterModel, TanDist};
use tandist_io::{AutomationPoint, ProcessingEngine, read_wav_stereo, write_wav_stereo};

/// Render a WAV file through the distortion.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Initial gain (1.0 to 10.0), applied without a ramp
    #[arg(short, long)]
    gain: Option<f32>,

    /// Gain automation as FRAME:VALUE, may be repeated
    #[arg(short, long = "automate", value_name = "FRAME:VALUE", value_parser = parse_automation)]
    automate: Vec<(usize, f32)>,

    /// Frames per processing block (defaults to the config value)
    #[arg(long)]
    block_size: Option<usize>,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Don't show the progress bar
    #[arg(long)]
    quiet: bool,
}

/// Run the process command.
pub fn run(args: ProcessArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    if !matches!(args.bit_depth, 16 | 24 | 32) {
        bail!("unsupported bit depth {}, expected 16, 24, or 32", args.bit_depth);
    }

    let config = TanDistConfig::load_or_default(config_path)?;
    let block_size = args.block_size.unwrap_or(config.audio.block_size);
    if block_size == 0 {
        bail!("block size must be positive");
    }

    let (input, spec) = read_wav_stereo(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let params = ParameterModel::tandist();
    if let Some(gain) = args.gain {
        params.set_raw(GAIN, gain);
    }
    let effect = TanDist::with_parameters(params, spec.sample_rate as f32)
        .with_smoothing(config.smoothing.mode());

    tracing::info!(
        input = %args.input.display(),
        frames = input.len(),
        sample_rate = spec.sample_rate,
        gain = effect.get_parameter_value(GAIN),
        block_size,
        "processing"
    );

    let mut engine = ProcessingEngine::new(effect, block_size);
    for &(frame, value) in &args.automate {
        engine.add_automation(AutomationPoint::new(frame, GAIN, value));
    }

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(input.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} frames ({eta})")?
                .progress_chars("=>-"),
        );
        bar
    };

    let output = engine.process_stereo(&input, |done| progress.set_position(done as u64));
    progress.finish_and_clear();

    write_wav_stereo(&args.output, &output, spec.with_bit_depth(args.bit_depth))
        .with_context(|| format!("writing {}", args.output.display()))?;

    let effect = engine.into_effect();
    println!("Processed {} frames -> {}", output.len(), args.output.display());
    println!(
        "  Input:  peak {:.1} dB, RMS {:.1} dB",
        linear_to_db(input.peak()),
        linear_to_db(rms(&input.left, &input.right))
    );
    println!(
        "  Output: peak {:.1} dB, RMS {:.1} dB",
        linear_to_db(output.peak()),
        linear_to_db(rms(&output.left, &output.right))
    );
    println!(
        "  Gain:   target {:.2}, smoothed {:.4}",
        effect.get_parameter_value(GAIN),
        effect.smoothed_gain()
    );

    Ok(())
}

/// Parse `FRAME:VALUE`.
fn parse_automation(s: &str) -> Result<(usize, f32), String> {
    let (frame, value) = s
        .split_once(':')
        .ok_or_else(|| format!("invalid FRAME:VALUE: no `:` found in `{s}`"))?;
    let frame = frame
        .trim()
        .parse()
        .map_err(|e| format!("invalid frame `{frame}`: {e}"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value `{value}`: {e}"))?;
    Ok((frame, value))
}

fn rms(left: &[f32], right: &[f32]) -> f32 {
    let n = left.len() + right.len();
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = left
        .iter()
        .chain(right)
        .map(|&s| f64::from(s) * f64::from(s))
        .sum();
    (sum / n as f64).sqrt() as f32
}

fn linear_to_db(linear: f32) -> f32 {
    20.0 * linear.max(1e-10).log10()
}
