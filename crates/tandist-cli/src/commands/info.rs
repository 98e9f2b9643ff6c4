//! Plugin metadata, parameter list, and optional WAV metadata.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use tandist_config::TanDistConfig;
use tandist_core::{AudioEffect, ParamDescriptor, TanDist};
use tandist_io::{WavFormat, WavInfo, read_wav_info};

/// Display plugin information.
#[derive(Args)]
pub struct InfoArgs {
    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// Also describe this WAV file
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

#[derive(Serialize)]
struct ParamReport {
    index: usize,
    id: u32,
    name: &'static str,
    symbol: &'static str,
    min: f32,
    max: f32,
    default: f32,
    automatable: bool,
}

impl ParamReport {
    fn new(index: usize, d: &ParamDescriptor) -> Self {
        Self {
            index,
            id: d.id.0,
            name: d.name,
            symbol: d.symbol,
            min: d.min,
            max: d.max,
            default: d.default,
            automatable: d.is_automatable(),
        }
    }
}

#[derive(Serialize)]
struct WavReport {
    path: String,
    format: &'static str,
    bits_per_sample: u16,
    channels: u16,
    sample_rate: u32,
    num_frames: u64,
    duration_secs: f64,
}

#[derive(Serialize)]
struct InfoReport {
    label: &'static str,
    description: &'static str,
    maker: &'static str,
    license: &'static str,
    version: String,
    unique_id: String,
    inputs: usize,
    outputs: usize,
    realtime_safe: bool,
    latency_samples: usize,
    parameters: Vec<ParamReport>,
    config: TanDistConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    wav: Option<WavReport>,
}

fn format_name(format: WavFormat) -> &'static str {
    match format {
        WavFormat::Pcm => "PCM",
        WavFormat::IeeeFloat => "IEEE Float",
    }
}

fn wav_report(path: &Path, info: &WavInfo) -> WavReport {
    WavReport {
        path: path.display().to_string(),
        format: format_name(info.format),
        bits_per_sample: info.bits_per_sample,
        channels: info.channels,
        sample_rate: info.sample_rate,
        num_frames: info.num_frames,
        duration_secs: info.duration_secs,
    }
}

/// Run the info command.
pub fn run(args: InfoArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = TanDistConfig::load_or_default(config_path)?;
    let effect = TanDist::new(config.audio.sample_rate as f32);
    let info = effect.info();

    let wav = match &args.file {
        Some(path) => Some(wav_report(path, &read_wav_info(path)?)),
        None => None,
    };

    let report = InfoReport {
        label: info.label,
        description: info.description,
        maker: info.maker,
        license: info.license,
        version: info.version_string(),
        unique_id: String::from_utf8_lossy(&info.unique_id_bytes()).into_owned(),
        inputs: info.inputs,
        outputs: info.outputs,
        realtime_safe: info.realtime_safe,
        latency_samples: effect.latency_samples(),
        parameters: effect
            .parameters()
            .descriptors()
            .iter()
            .enumerate()
            .map(|(i, d)| ParamReport::new(i, d))
            .collect(),
        config,
        wav,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} {} ({})", report.label, report.version, report.unique_id);
    println!("  {}", report.description);
    println!("  Maker:    {}", report.maker);
    println!("  License:  {}", report.license);
    println!(
        "  I/O:      {} in / {} out, latency {} samples{}",
        report.inputs,
        report.outputs,
        report.latency_samples,
        if report.realtime_safe { ", real-time safe" } else { "" }
    );

    println!("\nParameters:");
    for p in &report.parameters {
        println!(
            "  [{}] {:<8} {:<8} {:.2} .. {:.2} (default {:.2}){}",
            p.index,
            p.name,
            p.symbol,
            p.min,
            p.max,
            p.default,
            if p.automatable { " automatable" } else { "" }
        );
    }

    let smoothing = &report.config.smoothing;
    println!("\nConfig:");
    match smoothing.time_constant_ms {
        Some(ms) => println!("  Smoothing:   time constant {ms} ms"),
        None => println!("  Smoothing:   coefficient {} per sample", smoothing.coefficient),
    }
    println!(
        "  Surface:     {}x{}, knob radius {}, sensitivity {}",
        report.config.surface.width,
        report.config.surface.height,
        report.config.surface.knob_radius,
        report.config.surface.sensitivity
    );
    println!(
        "  Audio:       {} Hz, block {}",
        report.config.audio.sample_rate, report.config.audio.block_size
    );

    if let Some(wav) = &report.wav {
        let file_size = std::fs::metadata(&wav.path)?.len();
        println!("\nFile:        {}", wav.path);
        println!("Format:      {} {}-bit", wav.format, wav.bits_per_sample);
        println!("Channels:    {}", wav.channels);
        println!("Sample Rate: {} Hz", wav.sample_rate);
        println!("Duration:    {:.3}s ({} frames)", wav.duration_secs, wav.num_frames);
        println!("File Size:   {}", format_bytes(file_size));
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
