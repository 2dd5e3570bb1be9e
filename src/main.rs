use clap::Parser;
use tracing_subscriber::EnvFilter;

use subseq_sketch::cli;
use subseq_sketch::core::types::SketchKind;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("subseq_sketch=debug,info")
    } else {
        EnvFilter::new("subseq_sketch=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Init(args) => {
            cli::init::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Sketch(args) => {
            cli::sketch::run(args, SketchKind::Sketch, cli.format, cli.verbose)?;
        }
        cli::Commands::Embed(args) => {
            cli::sketch::run(args, SketchKind::Embedding, cli.format, cli.verbose)?;
        }
        cli::Commands::Dist(args) => {
            cli::dist::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Info(args) => {
            cli::info::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Show(args) => {
            cli::show::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Merge(args) => {
            cli::merge::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
