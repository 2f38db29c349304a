use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use voidsweep_core::*;

use crate::prompt::Prompter;

mod play;
mod prompt;
mod render;

/// Console minesweeper: open every safe cell without touching a hazard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Number of rows, prompted for when missing
    #[arg(long)]
    height: Option<Coord>,

    /// Number of columns, prompted for when missing
    #[arg(long)]
    width: Option<Coord>,

    /// Number of hazards, prompted for when missing
    #[arg(long)]
    hazards: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Never place hazards on the last row or column, like earlier releases did
    #[arg(long)]
    legacy_sampling: bool,
}

impl Args {
    fn field_config<R: io::BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> anyhow::Result<FieldConfig> {
        let height = match self.height {
            Some(height) => height,
            None => prompter.read_count("Height:")?,
        };
        let width = match self.width {
            Some(width) => width,
            None => prompter.read_count("Width:")?,
        };
        let hazards = match self.hazards {
            Some(hazards) => hazards,
            None => prompter.read_count("Hazards:")?,
        };

        FieldConfig::new(height, width, hazards).context("invalid field parameters")
    }

    fn generator(&self) -> RandomFieldGenerator {
        let generator = match self.seed {
            Some(seed) => RandomFieldGenerator::new(seed),
            None => RandomFieldGenerator::from_entropy(),
        };
        if self.legacy_sampling {
            generator.with_sampling(HazardSampling::ExcludeLastRowAndColumn)
        } else {
            generator
        }
    }
}

fn init_logger(verbose: &clap_verbosity_flag::Verbosity) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if verbose.is_present() {
        builder.filter_level(verbose.log_level_filter());
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(&args.verbose);
    log::debug!("{:?}", args);

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stderr());
    let mut out = io::stdout().lock();

    let config = args.field_config(&mut prompter)?;
    let generator = args.generator();
    log::debug!("seed: {}, sampling: {:?}", generator.seed(), generator.sampling());
    let field = generator.generate(config)?;
    writeln!(out)?;

    let mut engine = RevealEngine::new(field);
    let state = play::play(&mut engine, &mut prompter, &mut out)?;
    log::info!("Session finished: {:?}", state);

    Ok(())
}
