//! Input probe - watch device arbitration live
//!
//! Loads a bindings file, polls connected gamepads at a fixed rate and logs
//! every device switch plus the actions active on the selected device.
//! There is no window, so keyboard+pointer stays silent and acts purely as
//! the fallback device.
//!
//! ```bash
//! # Default bindings, 60 Hz, until Ctrl+C
//! input-probe
//!
//! # Custom bindings, stop after 10 seconds
//! input-probe --bindings my_bindings.toml --frames 600
//!
//! # Print the default bindings as a starting point
//! input-probe --print-default > bindings.toml
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;
use nethercore_input::{BindingsConfig, GamepadBackend, InputSnapshot};

/// Watch which input device the greedy handler selects
#[derive(Parser)]
#[command(name = "input-probe")]
#[command(version)]
struct Args {
    /// Bindings file (defaults to bindings.toml in the config directory)
    #[arg(short, long)]
    bindings: Option<PathBuf>,

    /// Poll rate in Hz
    #[arg(short, long, default_value_t = 60)]
    rate: u32,

    /// Stop after this many frames
    #[arg(short, long)]
    frames: Option<u64>,

    /// Print the default bindings as TOML and exit
    #[arg(long)]
    print_default: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if args.print_default {
        print!("{}", BindingsConfig::default().to_toml_string()?);
        return Ok(());
    }
    if args.rate == 0 {
        bail!("--rate must be at least 1");
    }

    let bindings = match &args.bindings {
        Some(path) => BindingsConfig::load(path)
            .with_context(|| format!("loading bindings from {}", path.display()))?,
        None => BindingsConfig::load_or_default(),
    };
    let (mut handler, report) = bindings.build_greedy()?;
    if !report.is_clean() {
        tracing::warn!("{} mappings were skipped", report.rejected);
    }

    let mut backend = GamepadBackend::new();
    if !backend.is_available() {
        bail!("gamepad support unavailable");
    }
    tracing::info!(
        "Probing {} actions at {} Hz ({} gamepads connected)",
        bindings.len(),
        args.rate,
        backend.connected_count()
    );

    let frame_time = Duration::from_secs(1) / args.rate;
    let mut snapshot = InputSnapshot::new();
    let mut frame: u64 = 0;

    while args.frames.is_none_or(|limit| frame < limit) {
        let started = Instant::now();

        backend.poll(&mut snapshot);
        let (device, results) = handler.update(&snapshot);

        for (action, result) in results.iter().enumerate() {
            if result.active {
                tracing::debug!(
                    "frame {}: {} = {:.3}",
                    frame,
                    bindings.action_name(action).unwrap_or("?"),
                    result.value
                );
            }
        }
        let status = handler.status();
        if status.is_transition() {
            tracing::info!(
                "frame {}: {} ({}, settles to {})",
                frame,
                status,
                device,
                status.settled()
            );
        }

        snapshot.next_frame();
        frame += 1;

        if let Some(remaining) = frame_time.checked_sub(started.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    Ok(())
}
