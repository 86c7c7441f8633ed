pub mod plan;
pub mod stack;

pub use self::plan::MatchPlan;
pub use self::stack::StimulusStack;

use crate::error::{NBackError, NbResult};
use crate::stimulus::{Channel, GridCell, Letter, Stimulus};
use fastrand::Rng;
use serde::Serialize;
use tracing::debug;

/// Both stimulus streams of one session plus the plan they were built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sequence {
    level: usize,
    visual: StimulusStack,
    auditory: StimulusStack,
    plan: MatchPlan,
}

/// Builds a sequence of `n + n_plus` timesteps with exactly six matches per
/// channel, two of them shared.
pub fn generate(rng: &mut Rng, n: usize, n_plus: usize) -> NbResult<Sequence> {
    if n == 0 {
        return Err(NBackError::Config("level must be at least 1".to_string()));
    }

    let len = n.checked_add(n_plus).ok_or_else(|| {
        NBackError::Config(format!("sequence length {} + {} overflows", n, n_plus))
    })?;
    let plan = MatchPlan::draw(rng, n, n_plus)?;

    let visual = StimulusStack::build(rng, n, len, Channel::Visual.alphabet(), &plan.visual());
    let auditory = StimulusStack::build(
        rng,
        n,
        len,
        Channel::Auditory.alphabet(),
        &plan.auditory(),
    );

    debug!(
        "Generated {}-back sequence of {} steps: visual={:?} auditory={:?} double={:?}",
        n,
        len,
        plan.visual(),
        plan.auditory(),
        plan.double()
    );

    Ok(Sequence {
        level: n,
        visual,
        auditory,
        plan,
    })
}

impl Sequence {
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn len(&self) -> usize {
        self.visual.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visual.is_empty()
    }

    pub fn visual(&self) -> &StimulusStack {
        &self.visual
    }

    pub fn auditory(&self) -> &StimulusStack {
        &self.auditory
    }

    pub fn stack(&self, channel: Channel) -> &StimulusStack {
        match channel {
            Channel::Visual => &self.visual,
            Channel::Auditory => &self.auditory,
        }
    }

    pub fn plan(&self) -> &MatchPlan {
        &self.plan
    }

    pub fn is_match(&self, channel: Channel, tick: usize) -> bool {
        self.stack(channel).is_match(tick, self.level)
    }

    pub fn visual_matches(&self) -> Vec<usize> {
        self.visual.match_indices(self.level)
    }

    pub fn auditory_matches(&self) -> Vec<usize> {
        self.auditory.match_indices(self.level)
    }

    pub fn double_matches(&self) -> Vec<usize> {
        (self.level..self.len())
            .filter(|&i| self.is_match(Channel::Visual, i) && self.is_match(Channel::Auditory, i))
            .collect()
    }

    pub fn stimulus(&self, tick: usize) -> Option<Stimulus> {
        let visual_position = GridCell::new(self.visual.get(tick)?)?;
        let auditory_letter = Letter::new(self.auditory.get(tick)?)?;
        Some(Stimulus {
            tick_index: tick,
            visual_position,
            auditory_letter,
        })
    }
}
