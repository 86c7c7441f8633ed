use crate::consts::{EXCELLENT_THRESHOLD, MATCHES_PER_CHANNEL, PRACTICE_THRESHOLD};
use crate::recorder::ClickLog;
use crate::sequence::stack::is_match;
use crate::stimulus::Channel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum_macros::{Display, EnumIter, EnumString};

/// Signal-detection counts for one channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelTally {
    pub hits: usize,
    pub misses: usize,
    pub wrong: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub vis_hits: usize,
    pub vis_misses: usize,
    pub vis_wrong: usize,
    pub letter_hits: usize,
    pub letter_misses: usize,
    pub letter_wrong: usize,
    pub hit_rate: f64,
    pub false_alarm_rate: f64,
    pub d_prime: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Excellent,
    Good,
    KeepPracticing,
}

impl Rating {
    pub fn from_d_prime(d_prime: f64) -> Self {
        if d_prime > EXCELLENT_THRESHOLD {
            Self::Excellent
        } else if d_prime < PRACTICE_THRESHOLD {
            Self::KeepPracticing
        } else {
            Self::Good
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent performance!",
            Self::Good => "Good job!",
            Self::KeepPracticing => "Keep practicing!",
        }
    }
}

impl ScoreResult {
    pub fn channel(&self, channel: Channel) -> ChannelTally {
        match channel {
            Channel::Visual => ChannelTally {
                hits: self.vis_hits,
                misses: self.vis_misses,
                wrong: self.vis_wrong,
            },
            Channel::Auditory => ChannelTally {
                hits: self.letter_hits,
                misses: self.letter_misses,
                wrong: self.letter_wrong,
            },
        }
    }

    /// d-prime as a whole percentage.
    pub fn percent(&self) -> i64 {
        (self.d_prime * 100.0).round() as i64
    }

    pub fn rating(&self) -> Rating {
        Rating::from_d_prime(self.d_prime)
    }
}

/// Walks every scorable timestep and grades the clicks against the stacks.
///
/// `d_prime` is the mean hit rate minus the mean false-alarm rate, both
/// averaged over the two channels. Hits are taken over the fixed six match
/// opportunities per channel; false alarms over `len - 6` non-match
/// opportunities, where `len` is the visual stack length.
pub fn score(visual: &[u8], auditory: &[u8], clicks: &ClickLog, n: usize) -> ScoreResult {
    let vis = tally(visual, clicks.clicks(Channel::Visual), n);
    let letter = tally(auditory, clicks.clicks(Channel::Auditory), n);

    let non_matches = visual.len().saturating_sub(MATCHES_PER_CHANNEL);
    let hit_rate = (rate(vis.hits, MATCHES_PER_CHANNEL) + rate(letter.hits, MATCHES_PER_CHANNEL)) / 2.0;
    let false_alarm_rate = (rate(vis.wrong, non_matches) + rate(letter.wrong, non_matches)) / 2.0;

    ScoreResult {
        vis_hits: vis.hits,
        vis_misses: vis.misses,
        vis_wrong: vis.wrong,
        letter_hits: letter.hits,
        letter_misses: letter.misses,
        letter_wrong: letter.wrong,
        hit_rate,
        false_alarm_rate,
        d_prime: hit_rate - false_alarm_rate,
    }
}

pub fn tally(stack: &[u8], clicks: &BTreeSet<usize>, n: usize) -> ChannelTally {
    let mut t = ChannelTally::default();
    for i in n..stack.len() {
        let clicked = clicks.contains(&i);
        if is_match(stack, i, n) {
            if clicked {
                t.hits += 1;
            } else {
                t.misses += 1;
            }
        } else if clicked {
            t.wrong += 1;
        }
    }
    t
}

#[inline]
fn rate(count: usize, opportunities: usize) -> f64 {
    if opportunities == 0 {
        0.0
    } else {
        count as f64 / opportunities as f64
    }
}
