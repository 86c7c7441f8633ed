use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use dualnback::config::SessionConfig;
use dualnback::error::NbResult;
use std::process;
use tracing::{debug, error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Dual N-Back trainer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON session config. Flags given on the command line override it.
    #[arg(global = true, short, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a session in the terminal.
    Play(cmd::play::PlayArgs),
    /// Print a freshly generated sequence.
    Generate(cmd::generate::GenerateArgs),
    /// Re-score a saved session record.
    Score(cmd::score::ScoreArgs),
    /// Score many sessions played by a scripted player.
    Simulate(cmd::simulate::SimulateArgs),
}

/// File config (if any) with explicit command-line flags layered on top.
fn resolve_config(
    path: Option<&str>,
    cli_config: &SessionConfig,
    sub_matches: Option<&ArgMatches>,
) -> NbResult<SessionConfig> {
    let Some(path) = path else {
        return Ok(cli_config.clone());
    };

    info!("📂 Loading config from: {}", path);
    let mut config = SessionConfig::load_from_file(path)?;
    if let Some(m) = sub_matches {
        config.merge_from_cli(cli_config, m);
    }
    debug!("Resolved config: {:?}", config);
    Ok(config)
}

async fn execute(cli: Cli, matches: &ArgMatches) -> NbResult<()> {
    let sub_matches = matches.subcommand().map(|(_, m)| m);
    let path = cli.config.as_deref();

    match cli.command {
        Commands::Play(args) => {
            let config = resolve_config(path, &args.config, sub_matches)?;
            cmd::play::run(args, config).await
        }
        Commands::Generate(args) => {
            let config = resolve_config(path, &args.config, sub_matches)?;
            cmd::generate::run(args, config)
        }
        Commands::Score(args) => cmd::score::run(args),
        Commands::Simulate(args) => {
            let config = resolve_config(path, &args.config, sub_matches)?;
            cmd::simulate::run(args, config)
        }
    }
}

#[tokio::main]
async fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute(cli, &matches).await {
        error!("❌ {}", e);
        process::exit(1);
    }
}
