use crate::reports;
use clap::Args;
use dualnback::config::SessionConfig;
use dualnback::error::NbResult;
use dualnback::session::{SessionEvent, StimulusRenderer, Trainer};
use dualnback::stimulus::{GridCell, Letter};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver};

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub config: SessionConfig,

    /// Write the finished session to this file for `score`.
    #[arg(long)]
    pub save: Option<PathBuf>,
}

/// Draws the board and names the letter on stdout.
struct TerminalRenderer;

impl StimulusRenderer for TerminalRenderer {
    fn flash(&mut self, cell: GridCell, _duration: Duration) -> NbResult<()> {
        println!("{}", reports::render_grid(Some(cell)));
        Ok(())
    }

    fn play_letter(&mut self, letter: Letter) -> NbResult<()> {
        println!("   🔊 {}", letter);
        Ok(())
    }
}

async fn launch(trainer: &mut Trainer) -> NbResult<UnboundedReceiver<SessionEvent>> {
    let (tx, rx) = mpsc::unbounded_channel();
    trainer.start(TerminalRenderer, tx).await?;
    Ok(rx)
}

pub async fn run(args: PlayArgs, config: SessionConfig) -> NbResult<()> {
    println!("\n🧠 Dual {}-back", config.level);
    println!("   Type v (or f) + Enter when the square matches {} steps back.", config.level);
    println!("   Type a (or j) + Enter when the letter matches {} steps back.", config.level);
    println!("   t toggles feedback, r restarts, q quits.\n");

    let mut trainer = Trainer::new(config)?;
    let mut events = launch(&mut trainer).await?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(SessionEvent::Countdown(n)) => println!("   {}...", n),
                Some(SessionEvent::Tick(stim)) => println!("   Step {}", stim.tick_index + 1),
                Some(SessionEvent::Feedback(fb)) => reports::print_feedback(&fb),
                Some(SessionEvent::Complete(_)) | Some(SessionEvent::DemoComplete) | None => break,
            },
            line = lines.next_line(), if stdin_open => match line? {
                Some(input) => match input.trim() {
                    "v" | "f" => {
                        trainer.press_visual();
                    }
                    "a" | "j" => {
                        trainer.press_auditory();
                    }
                    "t" => {
                        if trainer.toggle_feedback() {
                            println!("🔔 Feedback toggled");
                        }
                    }
                    "r" => {
                        println!("🔄 Restarting...");
                        events = launch(&mut trainer).await?;
                    }
                    "q" => {
                        trainer.restart().await;
                        println!("👋 Bye.");
                        return Ok(());
                    }
                    "" => {}
                    other => println!("   Unknown key '{}'", other),
                },
                None => stdin_open = false,
            },
        }
    }

    let (_, session) = trainer.wait().await?;
    if let Some(result) = session.result() {
        reports::print_score_report(result, Some(session.reactions()));
    } else if session.config().demo {
        println!("\n🎬 Demo finished.");
    }

    if let Some(path) = &args.save {
        if let Some(record) = session.record() {
            record.save_to_file(path)?;
            println!("💾 Saved session to {}", path.display());
        }
    }
    Ok(())
}
