use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "velox", version, about = "Velox template compiler")]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report problematic expressions in a template.
    Check {
        /// Path to the template file
        input: PathBuf,
    },
    /// Generate event handler code for a template.
    Build {
        /// Path to the template file
        input: PathBuf,
        /// Output directory (default: target/velox-gen)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Fail when the template has diagnostics
        #[arg(long)]
        deny_warnings: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check { input } => {
            let errors = velox_cli::check_cmd(&input)?;
            if !errors.is_empty() {
                eprintln!("{}:", input.display());
                for err in &errors {
                    eprintln!("  {err}");
                }
                anyhow::bail!("{} problem(s) found", errors.len());
            }
            println!("No problems found in {}", input.display());
        }
        Commands::Build {
            input,
            out_dir,
            deny_warnings,
        } => {
            let out_path = velox_cli::build_cmd(&input, out_dir.as_deref(), deny_warnings)?;
            println!("Generated: {}", out_path.display());
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}
