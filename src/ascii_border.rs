//! ascii-border - Wrap an image in an ASCII-art border, keeping its centre

use ascii_art::border::{AsciiBorder, DEFAULT_BORDER};
use ascii_art::render::DEFAULT_FONT_SIZE;
use ascii_art::{cli, open_image, save_image, MonoFont, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "ascii-border",
    version,
    about = "Add an ASCII art border to an image, preserving the original center"
)]
struct Args {
    /// Input image file
    input: PathBuf,
    /// Output image file (format from extension)
    output: PathBuf,
    /// Border thickness in characters
    #[arg(long, default_value_t = DEFAULT_BORDER)]
    border: u32,
    /// Fade width in characters (default: same as --border)
    #[arg(long)]
    fade: Option<u32>,
    /// Monospace font file (default: bundled DejaVu Sans Mono)
    #[arg(long)]
    font: Option<PathBuf>,
    /// Font size for ASCII characters
    #[arg(long, default_value_t = DEFAULT_FONT_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    font_size: u32,
}

fn run(args: &Args) -> Result<()> {
    let image = open_image(&args.input)?.to_rgb8();
    let font = MonoFont::load(args.font.as_deref())?;

    let border = AsciiBorder {
        border: args.border,
        fade: args.fade,
        font_size: args.font_size,
    };
    let result = border.apply(&image, &font)?;
    save_image(&result, &args.output)?;

    println!("Saved bordered image to {}", args.output.display());
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
