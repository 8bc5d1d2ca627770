use clap::{Parser, Subcommand};
use doc_templates::{config, output, pipeline};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "doc-templates")]
#[command(about = "Compile document templates and themes into TypeScript and JSON")]
#[command(long_about = "\
Compile document templates and themes into TypeScript and JSON

The data directory is the source of truth. Each category directory holds one
directory per template; the theme category is searched at any depth.

Data structure:

  data/
  ├── _meta.json                   # Category index (key, name, icon, order)
  ├── config.toml                  # Build config (optional)
  ├── report/                      # Category
  │   └── weekly-report/           # Template
  │       ├── manifest.json        # id, name, tags, roles, order, ...
  │       └── content.json         # authorNotes, content, aiGeneratedContent
  ├── _drafts/                     # Reserved prefix: skipped unless indexed
  └── ppt-theme/                   # Themes, any depth
      └── dark/midnight/manifest.json

Output:

  dist/
  ├── doc-templates.generated.ts
  ├── ppt-themes.generated.ts
  ├── doc-template-categories.generated.ts
  └── json/<category>.json         # One per indexed category, with bodies

Run 'doc-templates gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Data directory
    #[arg(long, default_value = "data", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log per-file progress to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the TypeScript modules and JSON resource files
    Build,
    /// Load and validate the data directory without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), pipeline::BuildError> {
    match cli.command {
        Command::Build => {
            let config = config::PipelineConfig::load(&cli.source, &cli.output)?;
            println!("==> Building {}", cli.source.display());
            let report = pipeline::run(&config)?;
            output::print_build_report(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let config = config::PipelineConfig::load(&cli.source, &cli.output)?;
            println!("==> Checking {}", cli.source.display());
            let report = pipeline::check(&config)?;
            output::print_build_report(&report);
            println!("==> Data is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }
    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "doc_templates=debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
