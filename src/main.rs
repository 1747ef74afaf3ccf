use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use traitmint::audit::{self, GenerationRecord};
use traitmint::config::{self, GeneratorConfig};
use traitmint::engine::{self, Engine};
use traitmint::output;

#[derive(Parser)]
#[command(name = "traitmint")]
#[command(about = "Deterministic trait-image generator")]
#[command(long_about = "\
Deterministic trait-image generator

Every seed maps to exactly one combination of trait variations, and the same
seed always produces the same image. Rarer variations occupy fewer slots in
each trait's rarity table.

Trait structure:

  traits/
  ├── background/                  # One directory per trait
  │   ├── 0/                       # Rarity level 0 (most common)
  │   │   ├── sky.png
  │   │   └── sea.png
  │   └── 1/                       # Each level is rarity_multiplier times rarer
  │       └── sunset.png
  └── tall/
      ├── 0/hat.png
      └── 2/crown.png              # Gaps between levels are fine

Traits are listed in traitmint.toml in layer order; the first trait reads the
lowest digits of the seed and sits at the bottom of the image.

Run 'traitmint gen-config' to generate a documented traitmint.toml.")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = "traitmint.toml", global = true)]
    config: PathBuf,

    /// Output directory (overrides output_dir from the config file)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Log selection and composition details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Discover trait directories and list their variations
    Scan,
    /// Show which variation each trait picks for a seed
    Select {
        /// Positive integer seed
        seed: u64,
    },
    /// Compose the image for a seed and write it as PNG
    Generate {
        /// Positive integer seed
        seed: u64,
        /// Skip writing the <seed>.json audit record
        #[arg(long)]
        no_audit: bool,
    },
    /// Validate the configuration and trait directories without generating
    Check,
    /// Print a stock traitmint.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Scan => {
            let config = config::load_config(&cli.config)?;
            let traits = engine::load_traits(&config.traits)?;
            output::print_traits(&traits);
        }
        Command::Select { seed } => {
            let config = config::load_config(&cli.config)?;
            let engine = Engine::from_config(&config)?;
            let picks = engine.select(seed)?;
            output::print_selection(seed, &picks);
        }
        Command::Generate { seed, no_audit } => {
            let config = config::load_config(&cli.config)?;
            init_thread_pool(&config.processing);
            let engine = Engine::from_config(&config)?;
            let (picks, composed) = engine.generate_with_picks(seed)?;
            let record = GenerationRecord::build(seed, engine.strategy(), &picks, &composed);

            let output_dir = resolve_output_dir(cli.output.as_deref(), &config);
            let written = audit::write_outputs(&output_dir, &composed.image, &record, !no_audit)?;
            output::print_generate_output(&record, &written.image, written.record.as_deref());
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let config = config::load_config(&cli.config)?;
            let engine = Engine::from_config(&config)?;
            output::print_traits(engine.traits());
            println!("==> Configuration is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber.
///
/// Warnings only by default; `--verbose` shows per-trait selection detail.
fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// `--output` wins over the config file's `output_dir`.
fn resolve_output_dir(cli_output: Option<&Path>, config: &GeneratorConfig) -> PathBuf {
    cli_output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.output_dir.clone())
}
