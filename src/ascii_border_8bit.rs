//! ascii-border-8bit - ASCII border, 8-bit middle band, original centre

use ascii_art::border::{LayeredBorder, DEFAULT_BORDER};
use ascii_art::quantize::DEFAULT_COLORS;
use ascii_art::render::DEFAULT_FONT_SIZE;
use ascii_art::{cli, open_image, save_image, MonoFont, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "ascii-border-8bit",
    version,
    about = "Wrap an image with an ASCII-art border, an 8-bit quantized band and the original center"
)]
struct Args {
    /// Input image file
    input: PathBuf,
    /// Output image file (format from extension)
    output: PathBuf,
    /// ASCII border thickness in characters
    #[arg(long, default_value_t = DEFAULT_BORDER)]
    border: u32,
    /// 8-bit band thickness in characters (default: same as --border)
    #[arg(long)]
    quant: Option<u32>,
    /// Monospace font file (default: bundled DejaVu Sans Mono)
    #[arg(long)]
    font: Option<PathBuf>,
    /// Font size for ASCII characters
    #[arg(long, default_value_t = DEFAULT_FONT_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    font_size: u32,
    /// Palette size for the 8-bit band
    #[arg(long, default_value_t = DEFAULT_COLORS, value_parser = clap::value_parser!(u16).range(1..=256))]
    colors: u16,
    /// Floyd–Steinberg dithering in the 8-bit band
    #[arg(long)]
    dither: bool,
    /// Fade between ASCII and 8-bit bands, in characters (default: --border)
    #[arg(long)]
    fade_ascii: Option<u32>,
    /// Fade between 8-bit band and original, in characters (default: --quant)
    #[arg(long)]
    fade_quant: Option<u32>,
    /// Corner radius in characters, clamped to --border
    #[arg(long, default_value_t = 0)]
    radius: u32,
}

fn run(args: &Args) -> Result<()> {
    let image = open_image(&args.input)?.to_rgb8();
    let font = MonoFont::load(args.font.as_deref())?;

    let layered = LayeredBorder {
        border: args.border,
        quant: args.quant,
        fade_ascii: args.fade_ascii,
        fade_quant: args.fade_quant,
        radius: args.radius,
        font_size: args.font_size,
        colors: args.colors,
        dither: args.dither,
    };
    let result = layered.apply(&image, &font)?;
    save_image(&result, &args.output)?;

    println!("Saved composite image to {}", args.output.display());
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
