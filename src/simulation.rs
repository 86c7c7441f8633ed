use crate::config::SessionConfig;
use crate::error::{NBackError, NbResult};
use crate::recorder::ClickLog;
use crate::scorer::{self, Rating, ScoreResult};
use crate::sequence::{self, Sequence};
use crate::stimulus::Channel;
use fastrand::Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;
use strum::IntoEnumIterator;
use tracing::info;

/// A scripted player that presses on each scorable timestep with a fixed
/// probability, depending only on whether the timestep is a match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedPlayer {
    pub hit_probability: f64,
    pub false_alarm_probability: f64,
}

impl SimulatedPlayer {
    pub fn new(hit_probability: f64, false_alarm_probability: f64) -> NbResult<Self> {
        for (name, p) in [
            ("hit rate", hit_probability),
            ("false-alarm rate", false_alarm_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(NBackError::Config(format!(
                    "{} must be within 0..=1 (got {})",
                    name, p
                )));
            }
        }
        Ok(Self {
            hit_probability,
            false_alarm_probability,
        })
    }

    /// Presses every match and nothing else.
    pub fn perfect() -> Self {
        Self {
            hit_probability: 1.0,
            false_alarm_probability: 0.0,
        }
    }

    pub fn respond(&self, rng: &mut Rng, sequence: &Sequence) -> ClickLog {
        let mut clicks = ClickLog::new();
        for tick in sequence.level()..sequence.len() {
            for channel in Channel::iter() {
                let p = if sequence.is_match(channel, tick) {
                    self.hit_probability
                } else {
                    self.false_alarm_probability
                };
                if rng.f64() < p {
                    clicks.record(channel, tick);
                }
            }
        }
        clicks
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOutcome {
    pub index: usize,
    pub seed: u64,
    pub result: ScoreResult,
}

/// Plays `sessions` games in parallel. Session `i` is seeded with
/// `seed + i`, so a batch is reproducible whatever the thread count.
pub fn simulate_batch(
    config: &SessionConfig,
    player: SimulatedPlayer,
    sessions: usize,
    seed: u64,
) -> NbResult<Vec<SessionOutcome>> {
    config.validate()?;
    info!(
        "Simulating {} sessions at level {} (hit {:.2}, false alarm {:.2})",
        sessions, config.level, player.hit_probability, player.false_alarm_probability
    );

    (0..sessions)
        .into_par_iter()
        .map(|index| {
            let session_seed = seed.wrapping_add(index as u64);
            let mut rng = Rng::with_seed(session_seed);
            let seq = sequence::generate(&mut rng, config.level, config.n_plus)?;
            let clicks = player.respond(&mut rng, &seq);
            let result = scorer::score(
                seq.visual().values(),
                seq.auditory().values(),
                &clicks,
                seq.level(),
            );
            Ok(SessionOutcome {
                index,
                seed: session_seed,
                result,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub sessions: usize,
    pub mean_d_prime: f64,
    pub min_d_prime: f64,
    pub max_d_prime: f64,
    pub std_dev: f64,
    /// One entry per rating, in declaration order.
    pub ratings: Vec<(Rating, usize)>,
}

impl BatchSummary {
    /// `None` for an empty batch.
    pub fn from_outcomes(outcomes: &[SessionOutcome]) -> Option<Self> {
        if outcomes.is_empty() {
            return None;
        }
        let scores: Vec<f64> = outcomes.iter().map(|o| o.result.d_prime).collect();
        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let ratings = Rating::iter()
            .map(|rating| {
                let count = outcomes.iter().filter(|o| o.result.rating() == rating).count();
                (rating, count)
            })
            .collect();

        Some(Self {
            sessions: outcomes.len(),
            mean_d_prime: mean,
            min_d_prime: min,
            max_d_prime: max,
            std_dev: variance.sqrt(),
            ratings,
        })
    }

    pub fn count(&self, rating: Rating) -> usize {
        self.ratings
            .iter()
            .find(|(r, _)| *r == rating)
            .map_or(0, |(_, c)| *c)
    }
}

#[derive(Serialize)]
struct OutcomeRow {
    session: usize,
    seed: u64,
    vis_hits: usize,
    vis_misses: usize,
    vis_wrong: usize,
    letter_hits: usize,
    letter_misses: usize,
    letter_wrong: usize,
    hit_rate: f64,
    false_alarm_rate: f64,
    d_prime: f64,
    rating: String,
}

impl From<&SessionOutcome> for OutcomeRow {
    fn from(o: &SessionOutcome) -> Self {
        let r = &o.result;
        Self {
            session: o.index,
            seed: o.seed,
            vis_hits: r.vis_hits,
            vis_misses: r.vis_misses,
            vis_wrong: r.vis_wrong,
            letter_hits: r.letter_hits,
            letter_misses: r.letter_misses,
            letter_wrong: r.letter_wrong,
            hit_rate: r.hit_rate,
            false_alarm_rate: r.false_alarm_rate,
            d_prime: r.d_prime,
            rating: r.rating().to_string(),
        }
    }
}

/// One CSV row per session, with a header.
pub fn write_csv<W: Write>(outcomes: &[SessionOutcome], writer: W) -> NbResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);
    for outcome in outcomes {
        wtr.serialize(OutcomeRow::from(outcome))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probabilities_are_bounded() {
        assert!(SimulatedPlayer::new(1.2, 0.0).is_err());
        assert!(SimulatedPlayer::new(0.5, -0.1).is_err());
        assert!(SimulatedPlayer::new(0.0, 1.0).is_ok());
    }

    #[test]
    fn perfect_player_clicks_exactly_the_matches() {
        let mut rng = Rng::with_seed(5);
        let seq = sequence::generate(&mut rng, 2, 20).unwrap();
        let clicks = SimulatedPlayer::perfect().respond(&mut rng, &seq);
        let visual: Vec<usize> = clicks.clicks(Channel::Visual).iter().copied().collect();
        assert_eq!(visual, seq.visual_matches());
    }

    #[test]
    fn summary_counts_ratings() {
        let outcome = |d_prime| SessionOutcome {
            index: 0,
            seed: 0,
            result: ScoreResult {
                d_prime,
                ..Default::default()
            },
        };
        let summary =
            BatchSummary::from_outcomes(&[outcome(1.0), outcome(0.5), outcome(0.75)]).unwrap();
        assert_eq!(summary.sessions, 3);
        assert_eq!(summary.count(Rating::Excellent), 1);
        assert_eq!(summary.count(Rating::Good), 1);
        assert_eq!(summary.count(Rating::KeepPracticing), 1);
        assert!((summary.mean_d_prime - 0.75).abs() < 1e-9);
        assert_eq!(summary.min_d_prime, 0.5);
        assert_eq!(summary.max_d_prime, 1.0);
        assert!(BatchSummary::from_outcomes(&[]).is_none());
    }
}
