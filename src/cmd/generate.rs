use crate::reports;
use clap::Args;
use dualnback::config::SessionConfig;
use dualnback::error::NbResult;
use dualnback::sequence;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: SessionConfig,

    /// Print the sequence as JSON instead of a table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: GenerateArgs, config: SessionConfig) -> NbResult<()> {
    config.validate()?;
    let mut rng = config.rng();
    let seq = sequence::generate(&mut rng, config.level, config.n_plus)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&seq)?);
    } else {
        reports::print_sequence_table(&seq);
    }
    Ok(())
}
