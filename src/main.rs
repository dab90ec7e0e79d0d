//! ascii-art CLI - Convert an image to ASCII art on stdout

use ascii_art::{cli, options, open_image, Converter, DEFAULT_WIDTH};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "ascii-art", version, about = "Convert an image to ASCII art")]
struct Args {
    /// Input image file
    image_path: PathBuf,
    /// Output width in characters (default: 80; invalid values fall back to it)
    #[arg(allow_hyphen_values = true)]
    width: Option<String>,
}

fn main() -> ExitCode {
    cli::init_logging();
    let args = match cli::parse_args::<Args>() {
        Ok(args) => args,
        Err(code) => return code,
    };

    let width = options::positive_or(args.width.as_deref(), DEFAULT_WIDTH);
    let converter = Converter::new().with_width(width);

    match open_image(&args.image_path).and_then(|image| converter.convert(&image)) {
        Ok(art) => {
            print!("{art}");
            ExitCode::SUCCESS
        }
        Err(e) => cli::fail(&e),
    }
}
