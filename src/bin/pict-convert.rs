extern crate rsrc_reenigne;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use rsrc_reenigne::macgfx::{picture, resample};

/// Converts standalone PICT files (with their 512-byte header) to PNG
#[derive(Parser)]
struct Cli {
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
    /// Upscaling factor
    #[clap(long, default_value_t=resample::DEFAULT_SCALE)]
    scale: f64,
    /// PICT files; each is written next to itself as <stem>.png
    files: Vec<PathBuf>,
}

fn convert(path: &Path, scale: f64) -> Result<()> {
    let data = std::fs::read(path)
        .with_context(|| format!("unable to read {}", path.display()))?;
    let Some(canvas) = picture::decode_pict_file(&data)? else {
        println!("{}: empty picture frame, skipping", path.display());
        return Ok(());
    };
    let image = resample::resample(&canvas, scale)?;
    let out_fname = path.with_extension("png");
    std::fs::write(&out_fname, image.encode_png()?)
        .with_context(|| format!("unable to write {}", out_fname.display()))?;
    println!("{} => {} ({}x{})", path.display(), out_fname.display(), image.width, image.height);
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let mut failed = 0;
    for path in &args.files {
        if let Err(e) = convert(path, args.scale) {
            log::error!("{}: {:#}", path.display(), e);
            failed += 1;
        }
    }
    if failed > 0 {
        anyhow::bail!("{} of {} file(s) could not be converted", failed, args.files.len());
    }
    Ok(())
}
