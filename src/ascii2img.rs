//! ascii2img - Render a text file (ASCII art included) to a PNG

use ascii_art::render::{encode_png, write_bytes, DEFAULT_FONT_SIZE, DEFAULT_PADDING};
use ascii_art::{cli, options, AsciiArtError, MonoFont, RenderOptions, Result, TextRenderer};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "ascii2img", version, about = "Render text as a PNG image")]
struct Args {
    /// Input text file
    input: PathBuf,
    /// Output image, always PNG-encoded
    output: PathBuf,
    /// Font size in pixels (default: 12)
    #[arg(long = "fontSize", allow_hyphen_values = true)]
    font_size: Option<String>,
    /// Margin in pixels (default: 10)
    #[arg(long, allow_hyphen_values = true)]
    padding: Option<String>,
    /// Monospace .ttf/.otf to use instead of the bundled one
    #[arg(long)]
    font: Option<PathBuf>,
}

fn run(args: &Args) -> Result<()> {
    let options = RenderOptions {
        font_size: options::positive_or(args.font_size.as_deref(), DEFAULT_FONT_SIZE),
        padding: options::positive_or(args.padding.as_deref(), DEFAULT_PADDING),
    };

    let bytes = std::fs::read(&args.input).map_err(|source| AsciiArtError::Read {
        path: args.input.clone(),
        source,
    })?;
    // Legacy code-page art still renders, bad bytes become U+FFFD
    let text = String::from_utf8_lossy(&bytes);

    let font = MonoFont::load(args.font.as_deref())?;
    let canvas = TextRenderer::new(&font, options).render(&text)?;
    let png = encode_png(&canvas)?;
    write_bytes(&args.output, &png)?;

    println!("Saved image to {}", args.output.display());
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
