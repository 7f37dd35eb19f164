//! bmpsketch CLI
//!
//! Loads a BMP, previews it as ASCII art, draws a corner-to-corner cross and
//! saves the result.
//!
//! Usage:
//!   bmpsketch [input.bmp] [output.bmp] [--color R,G,B] [--strict] [-v]
//!
//! Missing file names are prompted for on stdin.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use bmpsketch::rgb::RGB8;
use bmpsketch::{AsciiPreview, BmpPermissiveness, RasterSurface, Unstoppable, load_bmp, save_bmp};
use clap::Parser;
use tracing::Level;

/// Preview a BMP as ASCII art and draw a cross over it.
#[derive(Parser)]
#[command(name = "bmpsketch")]
#[command(version)]
#[command(about = "Draw a cross over an uncompressed 24/32-bit BMP", long_about = None)]
struct Cli {
    /// Input BMP file (prompted for when omitted)
    input: Option<PathBuf>,

    /// Output BMP file (prompted for when omitted)
    output: Option<PathBuf>,

    /// Line colour as R,G,B
    #[arg(short, long, default_value = "255,0,0", value_parser = parse_rgb)]
    color: RGB8,

    /// Preview glyph for pure black pixels
    #[arg(long, default_value_t = '.')]
    black: char,

    /// Preview glyph for pure white pixels
    #[arg(long, default_value_t = '#')]
    white: char,

    /// Reject files whose pixel data is shorter than the header declares
    #[arg(long)]
    strict: bool,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_rgb(s: &str) -> Result<RGB8, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [r, g, b] = parts.as_slice() else {
        return Err(format!("expected R,G,B, got {s:?}"));
    };
    let channel = |v: &str| v.parse::<u8>().map_err(|e| format!("invalid channel {v:?}: {e}"));
    Ok(RGB8::new(channel(*r)?, channel(*g)?, channel(*b)?))
}

fn prompt(message: &str) -> Result<PathBuf> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read file name from stdin")?;
    let name = line.trim_end_matches(['\r', '\n']);
    if name.is_empty() {
        bail!("no file name given");
    }
    Ok(PathBuf::from(name))
}

fn run(cli: Cli) -> Result<()> {
    let input = match cli.input {
        Some(path) => path,
        None => prompt("Enter input BMP file name: ")?,
    };
    let permissiveness = if cli.strict {
        BmpPermissiveness::Strict
    } else {
        BmpPermissiveness::Lenient
    };

    let image = load_bmp(&input, permissiveness, Unstoppable)
        .with_context(|| format!("failed to load {}", input.display()))?;
    tracing::info!(
        width = image.width(),
        height = image.height(),
        layout = ?image.layout(),
        "loaded"
    );

    let preview = AsciiPreview::new(cli.black, cli.white);
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "The file has been successfully uploaded and verified.")?;
    writeln!(stdout, "The original image:")?;
    preview.print_to(&image, &mut stdout)?;

    let mut surface = RasterSurface::new(image);
    surface.draw_cross(cli.color);

    writeln!(stdout, "\nThe image after drawing the cross:")?;
    preview.print_to(surface.image(), &mut stdout)?;
    drop(stdout);

    let output = match cli.output {
        Some(path) => path,
        None => prompt("Enter the file name to save the modified image: ")?,
    };
    save_bmp(&output, surface.image(), Unstoppable)
        .with_context(|| format!("failed to save {}", output.display()))?;
    println!("The modified image is saved as {}", output.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
