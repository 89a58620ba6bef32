#![allow(unused_parens)]

#[macro_use] extern crate log;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use gppdf::archive::*;
use gppdf::config::*;
use gppdf::lhagrid_set::*;
use gppdf::pipeline::*;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to config TOML; gppdf.toml is used if present when omitted
    #[arg(long)]
    config : Option<PathBuf>,

    /// Directory for archives and grid sets (overrides config)
    #[arg(long)]
    output_dir : Option<PathBuf>,

    #[command(subcommand)]
    command : Command
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fit a GP to a prior LHAPDF set, sample it and archive the samples
    Generate {
        /// Directory of the prior LHAPDF grid set
        #[arg(value_name = "PRIOR_DIR")]
        prior : PathBuf,

        /// Number of GP samples
        #[arg(value_name = "NSAMPLES")]
        num_samples : usize,

        /// Seed for the sampler (overrides config)
        #[arg(long)]
        seed : Option<u64>,

        /// Only write the archive, not the LHAPDF grid
        #[arg(long, default_value_t = false)]
        no_export : bool
    },
    /// Write the LHAPDF grid set of an existing archive
    Export {
        #[arg(value_name = "ARCHIVE")]
        archive : PathBuf
    }
}

fn prior_name(prior : &Path) -> Result<String> {
    prior.file_name()
         .and_then(|name| name.to_str())
         .map(|name| name.to_string())
         .with_context(|| format!("cannot name prior set from {}", prior.display()))
}

fn main() -> Result<()> {
    if (std::env::var("RUST_LOG").is_err()) {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let args = Args::parse();
    let mut config = GpPdfConfig::resolve(args.config.as_deref())
                         .context("failed to load config")?;
    if let Some(output_dir) = args.output_dir {
        config.output.directory = output_dir;
    }

    match args.command {
        Command::Generate { prior, num_samples, seed, no_export } => {
            if (seed.is_some()) {
                config.seed = seed;
            }
            let pipeline = Pipeline::new(config);
            let name = prior_name(&prior)?;
            let prior_set = LhagridSet::open(&prior)
                                .with_context(|| format!("failed to read prior set {}", prior.display()))?;

            let model = pipeline.generate(&prior_set, &name)?;
            let archive = pipeline.sample(&model, num_samples, &mut pipeline.rng())?;
            let archive_path = pipeline.save_archive(&archive)?;
            info!("GP archived to {}", archive_path.display());
            if (!no_export) {
                pipeline.export(&archive)?;
            }
        },
        Command::Export { archive } => {
            let pipeline = Pipeline::new(config);
            let loaded = GpArchive::load(&archive)
                             .with_context(|| format!("failed to read archive {}", archive.display()))?;
            pipeline.export(&loaded)?;
        }
    }
    Ok(())
}
