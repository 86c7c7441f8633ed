use super::observer::SessionObserver;
use super::renderer::{GuardedRenderer, StimulusRenderer};
use super::{Command, Phase, Session, Step};
use crate::scorer::ScoreResult;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq)]
pub enum DriveOutcome {
    /// Every timestep was shown. `None` for demos.
    Completed(Option<ScoreResult>),
    /// A restart arrived, the command channel closed, or the session was not
    /// started.
    Reset,
}

/// Runs a started session against the tokio clock until it completes or is
/// reset.
///
/// The countdown ticks once a second. The first stimulus is shown as soon as
/// the countdown ends and each later one a full interval after the previous.
/// Pending commands always win over a timer that fires at the same instant.
pub async fn drive<R, O>(
    session: &mut Session,
    renderer: &mut R,
    observer: &mut O,
    commands: &mut UnboundedReceiver<Command>,
) -> DriveOutcome
where
    R: StimulusRenderer + ?Sized,
    O: SessionObserver + ?Sized,
{
    if let Phase::Countdown { remaining } = session.phase() {
        observer.on_countdown(remaining);
        let mut clock = time::interval_at(Instant::now() + COUNTDOWN_PERIOD, COUNTDOWN_PERIOD);

        loop {
            tokio::select! {
                biased;
                cmd = commands.recv() => {
                    if !handle(session, cmd, None) {
                        return DriveOutcome::Reset;
                    }
                }
                _ = clock.tick() => match session.countdown_tick() {
                    Phase::Countdown { remaining } => observer.on_countdown(remaining),
                    _ => break,
                },
            }
        }
    }

    let config = session.config();
    let flash = config.flash();
    let mut clock = time::interval(config.interval());
    clock.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut renderer = GuardedRenderer::new(renderer);
    let mut onset: Option<Instant> = None;

    loop {
        tokio::select! {
            biased;
            cmd = commands.recv() => {
                if !handle(session, cmd, onset) {
                    return DriveOutcome::Reset;
                }
            }
            _ = clock.tick() => match session.step() {
                Step::Presented { stimulus, feedback } => {
                    if let Some(fb) = feedback.filter(|_| session.shows_feedback()) {
                        observer.on_feedback(&fb);
                    }
                    onset = Some(Instant::now());
                    renderer.present(&stimulus, flash);
                    observer.on_tick(&stimulus);
                }
                Step::Completed { feedback, result } => {
                    if let Some(fb) = feedback.filter(|_| session.shows_feedback()) {
                        observer.on_feedback(&fb);
                    }
                    match &result {
                        Some(r) => observer.on_complete(r),
                        None => observer.on_demo_complete(),
                    }
                    return DriveOutcome::Completed(result);
                }
                Step::Inactive => {
                    debug!("Driver stopped: session is {:?}", session.phase());
                    return DriveOutcome::Reset;
                }
            },
        }
    }
}

/// Applies one command. Returns false when the session was torn down.
fn handle(session: &mut Session, cmd: Option<Command>, onset: Option<Instant>) -> bool {
    match cmd {
        Some(Command::Restart) => {
            info!("Restart requested");
            session.restart();
            false
        }
        Some(cmd) => {
            session.apply(cmd, onset.map(|t| t.elapsed()));
            true
        }
        None => {
            debug!("Command channel closed, resetting session");
            session.restart();
            false
        }
    }
}
