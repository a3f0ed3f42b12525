use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// scanlink: pair a phone-style barcode scanner with a checkout session.
#[derive(Parser, Debug)]
#[command(name = "scanlink", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error or a full filter).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Join a pairing session and forward scanned barcodes to it.
    Scan(ScanArgs),
    /// Render recorded signature strokes to a PNG data URL.
    Sign(SignArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ScanArgs {
    /// Pairing code shown on the checkout screen.
    #[arg(long)]
    pub code: String,

    /// Server URL override.
    #[arg(long)]
    pub server: Option<String>,

    /// Read decoded barcodes from this file instead of stdin, one per line.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Do not ring the terminal bell on each scan.
    #[arg(long)]
    pub no_haptics: bool,
}

#[derive(ClapArgs, Debug)]
pub struct SignArgs {
    /// JSON file of strokes: an array of arrays of `{"x":..,"y":..}` points.
    #[arg(long)]
    pub strokes: PathBuf,

    /// Pad width in pixels.
    #[arg(long, default_value_t = 300.0)]
    pub width: f64,

    /// Write the data URL here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn parse() -> Args {
    Args::parse()
}
