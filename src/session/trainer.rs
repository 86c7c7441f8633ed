use super::driver::{drive, DriveOutcome};
use super::observer::SessionObserver;
use super::renderer::StimulusRenderer;
use super::{Command, Session};
use crate::config::SessionConfig;
use crate::error::{NBackError, NbResult};
use crate::stimulus::Channel;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// A session running on its own tokio task.
pub struct SessionHandle {
    commands: UnboundedSender<Command>,
    task: JoinHandle<(DriveOutcome, Session)>,
}

impl SessionHandle {
    /// Spawns the driver for an already started session.
    pub fn launch<R, O>(session: Session, renderer: R, observer: O) -> Self
    where
        R: StimulusRenderer + 'static,
        O: SessionObserver + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(async move {
            let mut session = session;
            let mut renderer = renderer;
            let mut observer = observer;
            let outcome = drive(&mut session, &mut renderer, &mut observer, &mut rx).await;
            (outcome, session)
        });
        Self { commands: tx, task }
    }

    /// False once the driver has stopped listening.
    pub fn send(&self, command: Command) -> bool {
        self.commands.send(command).is_ok()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops the timers immediately and waits for the task to unwind. Errors
    /// only when the driver had already failed, e.g. by panicking.
    pub async fn cancel(self) -> NbResult<()> {
        self.task.abort();
        match self.task.await {
            Ok(_) => Ok(()),
            Err(e) if e.is_cancelled() => Ok(()),
            Err(e) => Err(NBackError::Session(format!("session task failed: {}", e))),
        }
    }

    /// Waits for the driver to return, handing back the session so its clicks
    /// and result can be inspected.
    pub async fn join(self) -> NbResult<(DriveOutcome, Session)> {
        self.task
            .await
            .map_err(|e| NBackError::Session(format!("session task failed: {}", e)))
    }
}

/// Owns at most one running session at a time.
pub struct Trainer {
    config: SessionConfig,
    starts: u64,
    active: Option<SessionHandle>,
}

impl Trainer {
    pub fn new(config: SessionConfig) -> NbResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            starts: 0,
            active: None,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Tears down any running session, then generates a new sequence and
    /// spawns its driver. Generation errors surface here, before the
    /// countdown begins.
    pub async fn start<R, O>(&mut self, renderer: R, observer: O) -> NbResult<()>
    where
        R: StimulusRenderer + 'static,
        O: SessionObserver + 'static,
    {
        self.restart().await;

        // Fixed seeds stay reproducible but differ between attempts.
        let mut config = self.config.clone();
        config.seed = self.config.seed.map(|s| s.wrapping_add(self.starts));
        self.starts += 1;

        let mut session = Session::new(config)?;
        session.start()?;
        self.active = Some(SessionHandle::launch(session, renderer, observer));
        Ok(())
    }

    /// Returns false when no session is listening.
    pub fn press(&self, channel: Channel) -> bool {
        self.active
            .as_ref()
            .is_some_and(|h| h.send(Command::press(channel)))
    }

    pub fn press_visual(&self) -> bool {
        self.press(Channel::Visual)
    }

    pub fn press_auditory(&self) -> bool {
        self.press(Channel::Auditory)
    }

    /// Flips per-turn feedback for the running session.
    pub fn toggle_feedback(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|h| h.send(Command::ToggleFeedback))
    }

    /// Cancels the running session, if any. No stimulus or result is
    /// delivered for it afterwards.
    pub async fn restart(&mut self) {
        if let Some(handle) = self.active.take() {
            match handle.cancel().await {
                Ok(()) => info!("Session torn down"),
                Err(e) => warn!("⚠️  Session torn down after a failure: {}", e),
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Waits for the running session to finish on its own.
    pub async fn wait(&mut self) -> NbResult<(DriveOutcome, Session)> {
        match self.active.take() {
            Some(handle) => handle.join().await,
            None => Err(NBackError::Session("no session has been started".to_string())),
        }
    }
}
