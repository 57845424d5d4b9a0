extern crate rsrc_reenigne;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use rsrc_reenigne::macgfx::{self, resample, RecordKind};
use rsrc_reenigne::macres::fork::{self, ResourceFork};
use rsrc_reenigne::macres::resource::ResourceType;

fn parse_type(tag: &str) -> Result<ResourceType, String> {
    ResourceType::new(tag).ok_or_else(|| format!("'{}' is not a four-character resource type", tag))
}

#[derive(Subcommand)]
enum CliCommand {
    /// Lists resources in the fork
    List {
        /// Only list resources of this type
        #[clap(long, value_parser=parse_type)]
        rtype: Option<ResourceType>,
    },
    /// Renders PICT, ICON and ICN# resources to PNG files
    Extract {
        /// Output directory
        out_dir: PathBuf,
        /// Upscaling factor
        #[clap(long, default_value_t=resample::DEFAULT_SCALE)]
        scale: f64,
        /// Resource types to render (default: all supported)
        #[clap(long, value_parser=parse_type)]
        rtype: Vec<ResourceType>,
    },
}

/// Extracts images from a classic Mac OS resource fork
#[derive(Parser)]
struct Cli {
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
    /// Raw resource fork (such as a ..namedfork/rsrc or AppleDouble payload)
    in_file: PathBuf,
    #[command(subcommand)]
    command: CliCommand
}

fn list(archive: &[u8], rtype: Option<ResourceType>) -> Result<()> {
    let fork = ResourceFork::parse(archive)?;
    println!("resource     size name");
    for entry in fork.types() {
        if rtype.is_some_and(|t| t != entry.rtype) {
            continue;
        }
        for record in fork.records(entry.rtype) {
            match record {
                Ok(record) => {
                    let res_id = format!("{}", record.id);
                    println!("{:12} {:6} {}", res_id, record.data.len(), record.name.as_deref().unwrap_or(""));
                },
                Err(e) => {
                    println!("{:12} !! {}", entry.rtype.to_string(), e);
                }
            }
        }
    }
    Ok(())
}

fn extract(archive: &[u8], out_dir: &Path, scale: f64, rtypes: &[ResourceType]) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("unable to create {}", out_dir.display()))?;

    let kinds: Vec<RecordKind> = if rtypes.is_empty() {
        RecordKind::ALL.to_vec()
    } else {
        rtypes.iter().filter_map(|&rtype| {
            let kind = RecordKind::from_type(rtype);
            if kind.is_none() {
                log::warn!("no decoder for resource type {}, ignoring", rtype);
            }
            kind
        }).collect()
    };

    for kind in kinds {
        let rtype = kind.resource_type();
        for record in fork::list_records(archive, rtype)? {
            let canvas = match macgfx::decode_record(&record.data, kind) {
                Ok(Some(canvas)) => canvas,
                Ok(None) => {
                    println!("  {}: empty picture frame, skipping", record.id);
                    continue;
                },
                Err(e) => {
                    log::warn!("{}: {}", record.id, e);
                    println!("  {}: !! could not decode, skipping", record.id);
                    continue;
                }
            };
            let image = resample::resample(&canvas, scale)?;
            let png = image.encode_png()?;
            let out_fname = out_dir.join(format!("{}_{}.png", rtype.file_stem(), record.id.num));
            std::fs::write(&out_fname, &png)
                .with_context(|| format!("unable to write {}", out_fname.display()))?;
            println!("  {}: {}x{} => {} ({}x{})", record.id, canvas.width(), canvas.height(),
                out_fname.display(), image.width, image.height);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let archive = std::fs::read(&args.in_file)
        .with_context(|| format!("unable to read {}", args.in_file.display()))?;

    match &args.command {
        CliCommand::List{ rtype } => {
            list(&archive, *rtype)
        },
        CliCommand::Extract{ out_dir, scale, rtype } => {
            extract(&archive, out_dir, *scale, rtype)
        },
    }
}
