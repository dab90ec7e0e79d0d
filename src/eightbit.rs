//! eightbit - Median-cut colour quantization filter

use ascii_art::quantize::{Quantizer, DEFAULT_COLORS};
use ascii_art::{cli, open_image, save_image, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "eightbit", version, about = "Apply 8-bit color quantization to an image")]
struct Args {
    /// Input image file
    input: PathBuf,
    /// Output image file (format from extension)
    output: PathBuf,
    /// Number of colours in the output palette
    #[arg(long, default_value_t = DEFAULT_COLORS, value_parser = clap::value_parser!(u16).range(1..=256))]
    colors: u16,
    /// Enable Floyd–Steinberg dithering
    #[arg(long)]
    dither: bool,
}

fn run(args: &Args) -> Result<()> {
    let image = open_image(&args.input)?.to_rgb8();
    let out = Quantizer::new(args.colors)
        .with_dither(args.dither)
        .quantize(&image);
    save_image(&out, &args.output)?;

    println!("Saved 8-bit filtered image to {}", args.output.display());
    Ok(())
}

fn main() -> ExitCode {
    cli::init_logging();
    let args = match cli::parse_args::<Args>() {
        Ok(args) => args,
        Err(code) => return code,
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => cli::fail(&e),
    }
}
