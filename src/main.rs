use anyhow::{Context, Result};
use clap::Parser;
use resource_parts::{
    LoaderConfig, PartIdentifier, ResourceLoader, DEFAULT_CONTENT_ROOT, DEFAULT_PART_PREFIX,
};
use std::path::PathBuf;
use tracing::{info, warn, Level};

/// Line printed between segments in plain-text output
const SEGMENT_SEPARATOR: &str = "---";

#[derive(Parser, Debug)]
#[command(name = "resource-parts")]
#[command(about = "Split a content file into numbered or delimited parts")]
#[command(version)]
struct Args {
    /// Resource file, relative to the content root
    filename: PathBuf,

    /// Part number, or the delimiter itself with --literal
    identifier: String,

    /// Use IDENTIFIER verbatim as the delimiter
    #[arg(long)]
    literal: bool,

    /// Directory resource files are resolved under
    #[arg(long, env = "RESOURCE_PARTS_CONTENT_ROOT", default_value = DEFAULT_CONTENT_ROOT)]
    content_root: PathBuf,

    /// Prefix joined with a part number to form its delimiter
    #[arg(long, default_value = DEFAULT_PART_PREFIX)]
    part_prefix: String,

    /// Print only the segment at this index
    #[arg(long, conflicts_with = "shaped")]
    index: Option<usize>,

    /// Print the labeled fields of the numbered part as JSON
    #[arg(long, conflicts_with = "literal")]
    shaped: bool,

    /// Print segments as a JSON array
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn part_identifier(&self) -> Result<PartIdentifier> {
        if self.literal {
            return Ok(PartIdentifier::literal(self.identifier.clone()));
        }
        let number = self.identifier.parse::<u64>().with_context(|| {
            format!(
                "Part identifier {:?} is not a number (use --literal for a delimiter)",
                self.identifier
            )
        })?;
        Ok(PartIdentifier::Numbered(number))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // WHY: stdout carries only results, logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!(?args, "Parsed CLI arguments");

    let identifier = args.part_identifier()?;
    let loader = ResourceLoader::new(LoaderConfig {
        content_root: args.content_root.clone(),
        part_prefix: args.part_prefix.clone(),
    });

    if args.shaped {
        let PartIdentifier::Numbered(number) = identifier else {
            anyhow::bail!("--shaped requires a numbered part");
        };
        let shaped = loader
            .load_shaped(&args.filename, number)
            .with_context(|| format!("Failed to load part {number}"))?;
        match shaped {
            Some(shaped) => println!("{}", serde_json::to_string_pretty(&shaped)?),
            None => warn!("Part {} not found in {}", number, args.filename.display()),
        }
        return Ok(());
    }

    let parts = loader
        .load_resources(&args.filename, &identifier)
        .with_context(|| format!("Failed to load {}", args.filename.display()))?;

    info!(
        "Split {} into {} segments on {}",
        args.filename.display(),
        parts.len(),
        identifier
    );

    if let Some(index) = args.index {
        match parts.get(index) {
            Some(part) if args.json => println!("{}", serde_json::to_string(part)?),
            Some(part) => println!("{part}"),
            None => warn!("No segment {} (only {} segments)", index, parts.len()),
        }
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&parts)?);
    } else {
        let separator = format!("\n{SEGMENT_SEPARATOR}\n");
        println!("{}", parts.segments().join(separator.as_str()));
    }

    Ok(())
}
