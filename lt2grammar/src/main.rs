use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{debug, info, Level};

use pcfg_rules::{emit, rulefile, Converter};

/// Converts a flat treebank grammar listing into a PCFG rule file, giving every distinct
/// expansion of a tag the same probability.
#[derive(Parser)]
#[command(version, about, disable_version_flag = true)]
struct Opts {
    /// Grammar listing to read.
    in_file: PathBuf,
    /// Rule file to write.
    out_file: PathBuf,
    /// Reserved, has no effect on the conversion.
    #[arg(short = 'o', long = "option", default_value_t = 0)]
    opt: i64,
    /// Enable debugging mode.
    #[arg(short, long)]
    debug: bool,
    /// Read the rule file back after writing it and check each tag's distribution.
    #[arg(long)]
    verify: bool,
    /// Print version information.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: (),
}

fn process_files(in_file: &Path, out_file: &Path) -> Result<usize> {
    info!("in_file = {}, out_file = {}", in_file.display(), out_file.display());
    let reader = BufReader::new(
        File::open(in_file).with_context(|| format!("failed to open `{}`", in_file.display()))?,
    );
    let mut writer = BufWriter::new(
        File::create(out_file)
            .with_context(|| format!("failed to create `{}`", out_file.display()))?,
    );

    info!("Processing file {} ...", in_file.display());
    let mut converter = Converter::new();
    converter
        .read(reader)
        .with_context(|| format!("failed to convert `{}`", in_file.display()))?;
    let table = converter.finish();

    let written = emit::write_rules(&table, &mut writer)
        .with_context(|| format!("failed to write `{}`", out_file.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to write `{}`", out_file.display()))?;
    Ok(written)
}

fn verify_file(path: &Path) -> Result<()> {
    let file =
        File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
    let rules = rulefile::read_rules(BufReader::new(file))
        .with_context(|| format!("failed to read rules from `{}`", path.display()))?;
    rulefile::verify(&rules)
        .with_context(|| format!("`{}` failed verification", path.display()))?;
    info!("Verified {} rules in {}", rules.len(), path.display());
    Ok(())
}

fn main() -> Result<()> {
    let opts: Opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_max_level(if opts.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    if opts.debug {
        println!("Debug mode");
    }
    debug!(option = opts.opt, verify = opts.verify, "parsed arguments");

    let written = process_files(&opts.in_file, &opts.out_file)?;
    info!("Wrote {} rules to {}", written, opts.out_file.display());

    if opts.verify {
        verify_file(&opts.out_file)?;
    }
    Ok(())
}
