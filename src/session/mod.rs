pub mod driver;
pub mod observer;
pub mod renderer;
pub mod trainer;

pub use self::driver::{drive, DriveOutcome};
pub use self::observer::{SessionEvent, SessionObserver};
pub use self::renderer::{SilentRenderer, StimulusRenderer};
pub use self::trainer::{SessionHandle, Trainer};

use crate::config::SessionConfig;
use crate::error::{NBackError, NbResult};
use crate::evaluator::{self, TurnFeedback};
use crate::record::SessionRecord;
use crate::recorder::{ClickLog, ReactionTimes, ResponseRecorder};
use crate::scorer::{self, ScoreResult};
use crate::sequence::{self, Sequence};
use crate::stimulus::{Channel, Stimulus};
use fastrand::Rng;
use std::time::Duration;
use strum::IntoEnumIterator;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Countdown { remaining: u32 },
    Running { next_tick: usize },
    Complete,
}

/// Input-layer actions, consumed by the driver in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PressVisual,
    PressAuditory,
    /// Flips per-turn feedback on or off for the rest of the game.
    ToggleFeedback,
    Restart,
}

impl Command {
    pub fn press(channel: Channel) -> Self {
        match channel {
            Channel::Visual => Self::PressVisual,
            Channel::Auditory => Self::PressAuditory,
        }
    }
}

/// What one timer fire produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Presented {
        stimulus: Stimulus,
        feedback: Option<TurnFeedback>,
    },
    /// `result` is `None` for demo sessions.
    Completed {
        feedback: Option<TurnFeedback>,
        result: Option<ScoreResult>,
    },
    /// The session is not running; nothing happened.
    Inactive,
}

/// State of one game: the sequence, the timestep counter and every press.
///
/// The session never touches a clock. Whoever owns it calls
/// [`Session::countdown_tick`] once per second and [`Session::step`] once per
/// interval; see [`driver::drive`].
pub struct Session {
    config: SessionConfig,
    rng: Rng,
    phase: Phase,
    sequence: Option<Sequence>,
    recorder: ResponseRecorder,
    feedback: Option<TurnFeedback>,
    show_feedback: bool,
    result: Option<ScoreResult>,
}

impl Session {
    pub fn new(config: SessionConfig) -> NbResult<Self> {
        config.validate()?;
        let rng = config.rng();
        let show_feedback = config.feedback;
        Ok(Self {
            config,
            rng,
            phase: Phase::Idle,
            sequence: None,
            recorder: ResponseRecorder::new(),
            feedback: None,
            show_feedback,
            result: None,
        })
    }

    /// Builds a fresh sequence and enters the countdown (or goes straight to
    /// running for demos and zero-length countdowns).
    pub fn start(&mut self) -> NbResult<Phase> {
        if matches!(self.phase, Phase::Countdown { .. } | Phase::Running { .. }) {
            return Err(NBackError::Session(
                "session is already active; restart it first".to_string(),
            ));
        }

        let seq = sequence::generate(&mut self.rng, self.config.level, self.config.n_plus)?;
        info!(
            "Starting {}-back session: {} steps every {} ms{}",
            seq.level(),
            seq.len(),
            self.config.interval_ms,
            if self.config.demo { " (demo)" } else { "" }
        );

        self.sequence = Some(seq);
        self.recorder.clear();
        self.feedback = None;
        self.result = None;
        self.phase = if self.config.demo || self.config.countdown_secs == 0 {
            Phase::Running { next_tick: 0 }
        } else {
            Phase::Countdown {
                remaining: self.config.countdown_secs,
            }
        };
        Ok(self.phase)
    }

    pub fn countdown_tick(&mut self) -> Phase {
        if let Phase::Countdown { remaining } = self.phase {
            let remaining = remaining.saturating_sub(1);
            self.phase = if remaining == 0 {
                Phase::Running { next_tick: 0 }
            } else {
                Phase::Countdown { remaining }
            };
        }
        self.phase
    }

    /// One timer fire: judge the previous timestep, then present the next one
    /// or finish and score.
    pub fn step(&mut self) -> Step {
        let Phase::Running { next_tick } = self.phase else {
            return Step::Inactive;
        };
        let Some(seq) = self.sequence.as_ref() else {
            return Step::Inactive;
        };

        let feedback = next_tick.checked_sub(1).and_then(|prev| {
            evaluator::evaluate(
                prev,
                seq.visual().values(),
                seq.auditory().values(),
                seq.level(),
                self.recorder.presses(),
            )
        });
        self.feedback = feedback;

        if let Some(stimulus) = seq.stimulus(next_tick) {
            self.recorder.begin_tick(next_tick);
            if self.config.demo {
                for channel in Channel::iter() {
                    if seq.is_match(channel, next_tick) {
                        self.recorder.record(channel, None);
                    }
                }
            }
            debug!(
                "{}: cell {} / letter {}",
                next_tick,
                stimulus.visual_position.index(),
                stimulus.auditory_letter
            );
            self.phase = Phase::Running {
                next_tick: next_tick + 1,
            };
            return Step::Presented { stimulus, feedback };
        }

        self.recorder.close();
        self.phase = Phase::Complete;

        let result = if self.config.demo {
            info!("Demo finished");
            None
        } else {
            let r = scorer::score(
                seq.visual().values(),
                seq.auditory().values(),
                self.recorder.log(),
                seq.level(),
            );
            info!(
                "Session complete: d'={:.3} visual {}/{}/{} auditory {}/{}/{}",
                r.d_prime,
                r.vis_hits,
                r.vis_misses,
                r.vis_wrong,
                r.letter_hits,
                r.letter_misses,
                r.letter_wrong
            );
            self.result = Some(r);
            Some(r)
        };

        Step::Completed { feedback, result }
    }

    /// Attributes a press to the timestep on screen. Returns that timestep, or
    /// `None` outside the running phase.
    pub fn press(&mut self, channel: Channel, delay: Option<Duration>) -> Option<usize> {
        if !matches!(self.phase, Phase::Running { .. }) {
            debug!("Ignoring {} press while {:?}", channel, self.phase);
            return None;
        }
        let tick = self.recorder.record(channel, delay);
        if let Some(t) = tick {
            debug!("{} press recorded for timestep {}", channel, t);
        }
        tick
    }

    pub fn press_visual(&mut self) -> Option<usize> {
        self.press(Channel::Visual, None)
    }

    pub fn press_auditory(&mut self) -> Option<usize> {
        self.press(Channel::Auditory, None)
    }

    pub fn apply(&mut self, command: Command, delay: Option<Duration>) {
        match command {
            Command::PressVisual => {
                self.press(Channel::Visual, delay);
            }
            Command::PressAuditory => {
                self.press(Channel::Auditory, delay);
            }
            Command::ToggleFeedback => {
                self.toggle_feedback();
            }
            Command::Restart => self.restart(),
        }
    }

    /// Returns the new setting. Survives restarts.
    pub fn toggle_feedback(&mut self) -> bool {
        self.show_feedback = !self.show_feedback;
        info!(
            "Feedback {}",
            if self.show_feedback { "on" } else { "off" }
        );
        self.show_feedback
    }

    /// Whether the driver should report per-turn feedback. Always off in demos.
    pub fn shows_feedback(&self) -> bool {
        self.show_feedback && !self.config.demo
    }

    /// Drops the sequence, the clicks and any result, and returns to idle.
    pub fn restart(&mut self) {
        self.phase = Phase::Idle;
        self.sequence = None;
        self.recorder.clear();
        self.feedback = None;
        self.result = None;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn sequence(&self) -> Option<&Sequence> {
        self.sequence.as_ref()
    }

    pub fn clicks(&self) -> &ClickLog {
        self.recorder.log()
    }

    pub fn reactions(&self) -> &ReactionTimes {
        self.recorder.reactions()
    }

    /// Timestep currently accepting presses.
    pub fn current_tick(&self) -> Option<usize> {
        self.recorder.current_tick()
    }

    /// Stimuli shown so far in this session.
    pub fn ticks_presented(&self) -> usize {
        match self.phase {
            Phase::Running { next_tick } => next_tick,
            Phase::Complete => self.sequence.as_ref().map_or(0, Sequence::len),
            Phase::Idle | Phase::Countdown { .. } => 0,
        }
    }

    pub fn feedback(&self) -> Option<&TurnFeedback> {
        self.feedback.as_ref()
    }

    pub fn result(&self) -> Option<&ScoreResult> {
        self.result.as_ref()
    }

    pub fn record(&self) -> Option<SessionRecord> {
        self.sequence
            .as_ref()
            .map(|seq| SessionRecord::from_parts(seq, self.recorder.log()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SessionConfig {
        SessionConfig {
            seed: Some(17),
            ..Default::default()
        }
    }

    fn run_countdown(session: &mut Session) {
        while let Phase::Countdown { .. } = session.phase() {
            session.countdown_tick();
        }
    }

    #[test]
    fn countdown_counts_down_from_three() {
        let mut s = Session::new(config()).unwrap();
        assert_eq!(s.start().unwrap(), Phase::Countdown { remaining: 3 });
        assert_eq!(s.countdown_tick(), Phase::Countdown { remaining: 2 });
        assert_eq!(s.countdown_tick(), Phase::Countdown { remaining: 1 });
        assert_eq!(s.countdown_tick(), Phase::Running { next_tick: 0 });
    }

    #[test]
    fn double_start_is_rejected() {
        let mut s = Session::new(config()).unwrap();
        s.start().unwrap();
        assert!(matches!(s.start(), Err(NBackError::Session(_))));
    }

    #[test]
    fn presses_during_countdown_are_ignored() {
        let mut s = Session::new(config()).unwrap();
        s.start().unwrap();
        assert_eq!(s.press_visual(), None);
        assert!(s.clicks().is_empty());
    }

    #[test]
    fn evaluation_lags_presentation_by_one_step() {
        let mut s = Session::new(config()).unwrap();
        s.start().unwrap();
        run_countdown(&mut s);

        let len = s.sequence().unwrap().len();
        let mut judged = Vec::new();
        loop {
            match s.step() {
                Step::Presented { feedback, .. } => judged.extend(feedback.map(|f| f.index)),
                Step::Completed { feedback, result } => {
                    judged.extend(feedback.map(|f| f.index));
                    assert!(result.is_some());
                    break;
                }
                Step::Inactive => panic!("session stalled"),
            }
        }

        assert_eq!(judged, (2..len).collect::<Vec<_>>());
        assert_eq!(s.ticks_presented(), len);
        assert_eq!(s.step(), Step::Inactive);
    }

    #[test]
    fn demo_presses_every_match_and_skips_scoring() {
        let mut s = Session::new(SessionConfig {
            demo: true,
            ..config()
        })
        .unwrap();
        assert_eq!(s.start().unwrap(), Phase::Running { next_tick: 0 });

        while let Step::Presented { .. } = s.step() {}

        let seq = s.sequence().unwrap();
        let visual: Vec<usize> = s.clicks().clicks(Channel::Visual).iter().copied().collect();
        let auditory: Vec<usize> = s.clicks().clicks(Channel::Auditory).iter().copied().collect();
        assert_eq!(visual, seq.visual_matches());
        assert_eq!(auditory, seq.auditory_matches());
        assert!(s.result().is_none());
    }

    #[test]
    fn starting_again_drops_the_previous_result() {
        let mut s = Session::new(SessionConfig {
            countdown_secs: 0,
            ..config()
        })
        .unwrap();
        s.start().unwrap();
        while let Step::Presented { .. } = s.step() {}
        assert_eq!(s.phase(), Phase::Complete);
        assert!(s.result().is_some());

        s.start().unwrap();
        assert!(s.result().is_none());
        assert!(s.feedback().is_none());
    }

    #[test]
    fn feedback_toggle_outlives_restart() {
        let mut s = Session::new(config()).unwrap();
        assert!(s.shows_feedback());
        s.apply(Command::ToggleFeedback, None);
        assert!(!s.shows_feedback());

        s.start().unwrap();
        s.restart();
        assert!(!s.shows_feedback());
        assert!(s.toggle_feedback());

        let demo = Session::new(SessionConfig {
            demo: true,
            ..config()
        })
        .unwrap();
        assert!(!demo.shows_feedback());
    }

    #[test]
    fn restart_clears_everything() {
        let mut s = Session::new(SessionConfig {
            countdown_secs: 0,
            ..config()
        })
        .unwrap();
        s.start().unwrap();
        s.step();
        s.step();
        s.press_visual();
        assert!(!s.clicks().is_empty());

        s.restart();
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.clicks().is_empty());
        assert!(s.sequence().is_none());
        assert_eq!(s.current_tick(), None);

        s.start().unwrap();
        assert_eq!(s.ticks_presented(), 0);
        assert!(s.clicks().is_empty());
    }
}
