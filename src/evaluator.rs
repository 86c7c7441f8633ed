use crate::recorder::TurnPresses;
use crate::sequence::stack::is_match;
use crate::stimulus::Channel;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelFeedback {
    pub should_match: bool,
    pub pressed: bool,
}

impl ChannelFeedback {
    pub fn correct(&self) -> bool {
        self.should_match == self.pressed
    }
}

/// Immediate judgement of one finished timestep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnFeedback {
    pub index: usize,
    pub visual: ChannelFeedback,
    pub auditory: ChannelFeedback,
}

impl TurnFeedback {
    pub fn channel(&self, channel: Channel) -> ChannelFeedback {
        match channel {
            Channel::Visual => self.visual,
            Channel::Auditory => self.auditory,
        }
    }

    pub fn all_correct(&self) -> bool {
        self.visual.correct() && self.auditory.correct()
    }
}

/// Compares the presses of `tick` against ground truth. Returns `None` while
/// there is no stimulus `n` steps back.
pub fn evaluate(
    tick: usize,
    visual: &[u8],
    auditory: &[u8],
    n: usize,
    presses: TurnPresses,
) -> Option<TurnFeedback> {
    if tick < n || tick >= visual.len() || tick >= auditory.len() {
        return None;
    }

    Some(TurnFeedback {
        index: tick,
        visual: ChannelFeedback {
            should_match: is_match(visual, tick, n),
            pressed: presses.visual,
        },
        auditory: ChannelFeedback {
            should_match: is_match(auditory, tick, n),
            pressed: presses.auditory,
        },
    })
}
