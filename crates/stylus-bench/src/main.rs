//! Stylus bench: runs the drawing case table against off-screen bitmaps,
//! reports call timings and optionally captures each result as an image.

mod cases;
mod clock;
mod config;
mod output;
mod runner;
mod styles;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use stylus_engine::logging::{init_logging, LoggingConfig};

use crate::cases::{DrawingType, CASES};
use crate::config::{BenchConfig, OutputFormat};
use crate::styles::StyleType;

#[derive(Parser, Debug)]
#[command(name = "stylus-bench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Surface width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Surface height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Draw calls per case
    #[arg(short = 'n', long)]
    iterations: Option<u32>,

    /// Directory for captured images
    #[arg(short, long)]
    out: Option<PathBuf>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// JPEG quality, 1-100
    #[arg(long)]
    quality: Option<u8>,

    /// Only run cases whose name contains this string
    #[arg(long)]
    case: Option<String>,

    /// Paint preset applied to the attached pen and brush
    #[arg(long, value_enum)]
    style: Option<StyleType>,

    /// Restrict to one attachment mode (default: all three)
    #[arg(long, value_enum)]
    drawing: Option<DrawingType>,

    /// Log filter, env_logger syntax
    #[arg(long)]
    log: Option<String>,

    /// Print case names and exit
    #[arg(long)]
    list: bool,
}

impl Cli {
    fn apply(&self, config: &mut BenchConfig) {
        if let Some(v) = self.width {
            config.width = v;
        }
        if let Some(v) = self.height {
            config.height = v;
        }
        if let Some(v) = self.iterations {
            config.iterations = v;
        }
        if let Some(v) = &self.out {
            config.output_dir = Some(v.clone());
        }
        if let Some(v) = self.format {
            config.format = v;
        }
        if let Some(v) = self.quality {
            config.jpeg_quality = v;
        }
        if let Some(v) = &self.case {
            config.case_filter = Some(v.clone());
        }
        if let Some(v) = self.style {
            config.style = v;
        }
        if let Some(v) = &self.log {
            config.log = Some(v.clone());
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list {
        for case in CASES {
            println!("{}", case.name);
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => BenchConfig::load(path)?,
        None => BenchConfig::default(),
    };
    cli.apply(&mut config);
    config.validate()?;

    init_logging(config.log.clone().map_or_else(LoggingConfig::default, LoggingConfig::with_filter));
    log::info!(
        "surface {}x{}, {} iterations, style {:?}",
        config.width,
        config.height,
        config.iterations,
        config.style
    );

    let drawing = match cli.drawing {
        Some(d) => vec![d],
        None => DrawingType::ALL.to_vec(),
    };
    let reports = runner::run_all(&config, &drawing)?;

    println!("{:<18} {:<6} {:>8} {:>12} {:>12}", "case", "paint", "calls", "total ms", "worst us");
    for r in &reports {
        println!(
            "{:<18} {:<6} {:>8} {:>12.3} {:>12.1}",
            r.case,
            r.drawing.to_string(),
            r.timing.laps,
            r.timing.total.as_secs_f64() * 1e3,
            r.timing.worst.as_secs_f64() * 1e6,
        );
    }
    Ok(())
}
