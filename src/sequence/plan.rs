use crate::consts::{
    AUDITORY_ONLY_MATCHES, DOUBLE_MATCHES, MAX_PLAN_DRAWS, PLANNED_MATCH_SLOTS,
    VISUAL_ONLY_MATCHES,
};
use crate::error::{NBackError, NbResult};
use fastrand::Rng;
use serde::Serialize;
use std::collections::BTreeSet;

/// Timesteps pre-selected to carry an N-back match.
///
/// The three groups are pairwise disjoint, so the visual set (`visual_only` +
/// `double`) and the auditory set (`auditory_only` + `double`) intersect in
/// exactly the double matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPlan {
    visual_only: Vec<usize>,
    auditory_only: Vec<usize>,
    double: Vec<usize>,
}

impl MatchPlan {
    /// Samples slots from `[n, n + n_plus)` by rejection until every group is full.
    pub fn draw(rng: &mut Rng, n: usize, n_plus: usize) -> NbResult<Self> {
        let mut sampler = SlotSampler {
            rng,
            n,
            n_plus,
            draws: 0,
            taken: BTreeSet::new(),
        };

        let visual_only = sampler.take(VISUAL_ONLY_MATCHES)?;
        let auditory_only = sampler.take(AUDITORY_ONLY_MATCHES)?;
        let double = sampler.take(DOUBLE_MATCHES)?;

        Ok(Self {
            visual_only,
            auditory_only,
            double,
        })
    }

    pub fn visual_only(&self) -> &[usize] {
        &self.visual_only
    }

    pub fn auditory_only(&self) -> &[usize] {
        &self.auditory_only
    }

    pub fn double(&self) -> &[usize] {
        &self.double
    }

    /// Every slot forced to match on the visual channel.
    pub fn visual(&self) -> BTreeSet<usize> {
        self.visual_only.iter().chain(&self.double).copied().collect()
    }

    /// Every slot forced to match on the auditory channel.
    pub fn auditory(&self) -> BTreeSet<usize> {
        self.auditory_only.iter().chain(&self.double).copied().collect()
    }
}

struct SlotSampler<'a> {
    rng: &'a mut Rng,
    n: usize,
    n_plus: usize,
    draws: usize,
    taken: BTreeSet<usize>,
}

impl SlotSampler<'_> {
    fn take(&mut self, count: usize) -> NbResult<Vec<usize>> {
        let mut picked = Vec::with_capacity(count);
        while picked.len() < count {
            if self.n_plus == 0 || self.draws >= MAX_PLAN_DRAWS {
                return Err(NBackError::Unsatisfiable {
                    placed: self.taken.len(),
                    required: PLANNED_MATCH_SLOTS,
                    candidates: self.n_plus,
                    draws: self.draws,
                });
            }
            self.draws += 1;

            let slot = self.rng.usize(0..self.n_plus) + self.n;
            if self.taken.insert(slot) {
                picked.push(slot);
            }
        }
        Ok(picked)
    }
}
