use crate::reports;
use clap::Args;
use dualnback::error::NbResult;
use dualnback::record::SessionRecord;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Session record written by `play --save`.
    pub record: PathBuf,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: ScoreArgs) -> NbResult<()> {
    let record = SessionRecord::load_from_file(&args.record)?;
    let result = record.score()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "📂 {} ({}-back, {} steps)",
            args.record.display(),
            record.level,
            record.visual.len()
        );
        reports::print_score_report(&result, None);
    }
    Ok(())
}
