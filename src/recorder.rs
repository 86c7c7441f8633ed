use crate::stimulus::Channel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Timesteps at which each button was pressed. Repeat presses within a
/// timestep collapse into one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickLog {
    visual: BTreeSet<usize>,
    auditory: BTreeSet<usize>,
}

impl ClickLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_indices<V, A>(visual: V, auditory: A) -> Self
    where
        V: IntoIterator<Item = usize>,
        A: IntoIterator<Item = usize>,
    {
        Self {
            visual: visual.into_iter().collect(),
            auditory: auditory.into_iter().collect(),
        }
    }

    /// Returns false when the press was already on record.
    pub fn record(&mut self, channel: Channel, tick: usize) -> bool {
        self.clicks_mut(channel).insert(tick)
    }

    pub fn record_visual(&mut self, tick: usize) -> bool {
        self.record(Channel::Visual, tick)
    }

    pub fn record_auditory(&mut self, tick: usize) -> bool {
        self.record(Channel::Auditory, tick)
    }

    pub fn contains(&self, channel: Channel, tick: usize) -> bool {
        self.clicks(channel).contains(&tick)
    }

    pub fn clicks(&self, channel: Channel) -> &BTreeSet<usize> {
        match channel {
            Channel::Visual => &self.visual,
            Channel::Auditory => &self.auditory,
        }
    }

    fn clicks_mut(&mut self, channel: Channel) -> &mut BTreeSet<usize> {
        match channel {
            Channel::Visual => &mut self.visual,
            Channel::Auditory => &mut self.auditory,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.visual.is_empty() && self.auditory.is_empty()
    }

    pub fn clear(&mut self) {
        self.visual.clear();
        self.auditory.clear();
    }
}

/// Button state of the timestep currently on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnPresses {
    pub visual: bool,
    pub auditory: bool,
}

impl TurnPresses {
    pub fn get(&self, channel: Channel) -> bool {
        match channel {
            Channel::Visual => self.visual,
            Channel::Auditory => self.auditory,
        }
    }

    fn set(&mut self, channel: Channel) {
        match channel {
            Channel::Visual => self.visual = true,
            Channel::Auditory => self.auditory = true,
        }
    }
}

/// Delay from stimulus onset to the first press of each timestep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionTimes {
    visual: Vec<Duration>,
    auditory: Vec<Duration>,
}

impl ReactionTimes {
    pub fn samples(&self, channel: Channel) -> &[Duration] {
        match channel {
            Channel::Visual => &self.visual,
            Channel::Auditory => &self.auditory,
        }
    }

    pub fn mean_ms(&self, channel: Channel) -> Option<f64> {
        let samples = self.samples(channel);
        if samples.is_empty() {
            return None;
        }
        let total: f64 = samples.iter().map(|d| d.as_secs_f64() * 1000.0).sum();
        Some(total / samples.len() as f64)
    }

    fn push(&mut self, channel: Channel, delay: Duration) {
        match channel {
            Channel::Visual => self.visual.push(delay),
            Channel::Auditory => self.auditory.push(delay),
        }
    }

    fn clear(&mut self) {
        self.visual.clear();
        self.auditory.clear();
    }
}

/// Attributes presses to the open timestep. Nothing here looks at ground truth.
#[derive(Debug, Default)]
pub struct ResponseRecorder {
    log: ClickLog,
    reactions: ReactionTimes,
    open_tick: Option<usize>,
    presses: TurnPresses,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `tick` for presses and clears the per-turn button flags.
    pub fn begin_tick(&mut self, tick: usize) {
        self.open_tick = Some(tick);
        self.presses = TurnPresses::default();
    }

    /// Stops attributing presses. The click log is kept for scoring.
    pub fn close(&mut self) {
        self.open_tick = None;
        self.presses = TurnPresses::default();
    }

    /// Records a press on the open timestep and returns that timestep, or
    /// `None` when no timestep is open.
    pub fn record(&mut self, channel: Channel, delay: Option<Duration>) -> Option<usize> {
        let tick = self.open_tick?;
        self.presses.set(channel);
        if self.log.record(channel, tick) {
            if let Some(d) = delay {
                self.reactions.push(channel, d);
            }
        }
        Some(tick)
    }

    pub fn current_tick(&self) -> Option<usize> {
        self.open_tick
    }

    pub fn presses(&self) -> TurnPresses {
        self.presses
    }

    pub fn log(&self) -> &ClickLog {
        &self.log
    }

    pub fn reactions(&self) -> &ReactionTimes {
        &self.reactions
    }

    pub fn clear(&mut self) {
        self.log.clear();
        self.reactions.clear();
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presses_without_open_tick_are_dropped() {
        let mut rec = ResponseRecorder::new();
        assert_eq!(rec.record(Channel::Visual, None), None);
        assert!(rec.log().is_empty());
    }

    #[test]
    fn repeat_press_is_idempotent() {
        let mut rec = ResponseRecorder::new();
        rec.begin_tick(4);
        assert_eq!(rec.record(Channel::Visual, Some(Duration::from_millis(300))), Some(4));
        assert_eq!(rec.record(Channel::Visual, Some(Duration::from_millis(900))), Some(4));

        assert_eq!(rec.log().clicks(Channel::Visual).len(), 1);
        assert_eq!(rec.reactions().samples(Channel::Visual).len(), 1);
        assert_eq!(rec.reactions().mean_ms(Channel::Visual), Some(300.0));
        assert!(rec.presses().visual);
        assert!(!rec.presses().auditory);
    }

    #[test]
    fn next_tick_resets_flags_but_keeps_log() {
        let mut rec = ResponseRecorder::new();
        rec.begin_tick(0);
        rec.record(Channel::Auditory, None);
        rec.begin_tick(1);

        assert_eq!(rec.presses(), TurnPresses::default());
        assert!(rec.log().contains(Channel::Auditory, 0));
        assert_eq!(rec.reactions().mean_ms(Channel::Auditory), None);
    }
}
