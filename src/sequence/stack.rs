use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One channel's stimulus indices in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StimulusStack {
    values: Vec<u8>,
}

impl StimulusStack {
    pub fn from_values(values: Vec<u8>) -> Self {
        Self { values }
    }

    /// Fills `len` slots over `alphabet` symbols. Slots in `matches` copy the
    /// value `n` steps back; every other slot past the first `n` is drawn so
    /// that it differs from it.
    pub(crate) fn build(
        rng: &mut Rng,
        n: usize,
        len: usize,
        alphabet: u8,
        matches: &BTreeSet<usize>,
    ) -> Self {
        let mut values = Vec::with_capacity(len);
        for _ in 0..n.min(len) {
            values.push(rng.u8(0..alphabet));
        }

        for i in n..len {
            let back = values[i - n];
            let next = if matches.contains(&i) {
                back
            } else {
                // Draw from alphabet - 1 symbols and skip over `back`.
                let draw = rng.u8(0..alphabet - 1);
                if draw >= back {
                    draw + 1
                } else {
                    draw
                }
            };
            values.push(next);
        }

        Self { values }
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.values.get(index).copied()
    }

    #[inline]
    pub fn is_match(&self, index: usize, n: usize) -> bool {
        is_match(&self.values, index, n)
    }

    pub fn match_indices(&self, n: usize) -> Vec<usize> {
        (n..self.values.len())
            .filter(|&i| is_match(&self.values, i, n))
            .collect()
    }
}

/// True when `values[index]` repeats the value `n` steps earlier.
#[inline]
pub fn is_match(values: &[u8], index: usize, n: usize) -> bool {
    n > 0 && index >= n && index < values.len() && values[index] == values[index - n]
}
