use crate::consts::{GRID_CELLS, LETTER_COUNT};
use crate::error::{NBackError, NbResult};
use crate::recorder::ClickLog;
use crate::scorer::{self, ScoreResult};
use crate::sequence::Sequence;
use crate::stimulus::Channel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A finished session on disk: both stacks plus every click, enough to score
/// it again later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub level: usize,
    pub visual: Vec<u8>,
    pub auditory: Vec<u8>,
    #[serde(default)]
    pub visual_clicks: Vec<usize>,
    #[serde(default)]
    pub auditory_clicks: Vec<usize>,
}

impl SessionRecord {
    pub fn from_parts(sequence: &Sequence, clicks: &ClickLog) -> Self {
        Self {
            level: sequence.level(),
            visual: sequence.visual().values().to_vec(),
            auditory: sequence.auditory().values().to_vec(),
            visual_clicks: clicks.clicks(Channel::Visual).iter().copied().collect(),
            auditory_clicks: clicks.clicks(Channel::Auditory).iter().copied().collect(),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> NbResult<Self> {
        let content = fs::read_to_string(path)?;
        let record: Self = serde_json::from_str(&content)?;
        record.validate()?;
        Ok(record)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> NbResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> NbResult<()> {
        if self.level == 0 {
            return Err(NBackError::Validation("level must be at least 1".to_string()));
        }
        if self.visual.len() != self.auditory.len() {
            return Err(NBackError::Validation(format!(
                "stack lengths differ: visual {} vs auditory {}",
                self.visual.len(),
                self.auditory.len()
            )));
        }
        check_alphabet("visual", &self.visual, GRID_CELLS)?;
        check_alphabet("auditory", &self.auditory, LETTER_COUNT)?;
        check_clicks("visual", &self.visual_clicks, self.visual.len())?;
        check_clicks("auditory", &self.auditory_clicks, self.auditory.len())?;
        Ok(())
    }

    pub fn clicks(&self) -> ClickLog {
        ClickLog::from_indices(
            self.visual_clicks.iter().copied(),
            self.auditory_clicks.iter().copied(),
        )
    }

    pub fn score(&self) -> NbResult<ScoreResult> {
        self.validate()?;
        Ok(scorer::score(
            &self.visual,
            &self.auditory,
            &self.clicks(),
            self.level,
        ))
    }
}

fn check_alphabet(name: &str, values: &[u8], alphabet: u8) -> NbResult<()> {
    match values.iter().position(|&v| v >= alphabet) {
        Some(i) => Err(NBackError::Validation(format!(
            "{} stimulus {} at timestep {} is outside 0..{}",
            name, values[i], i, alphabet
        ))),
        None => Ok(()),
    }
}

fn check_clicks(name: &str, clicks: &[usize], len: usize) -> NbResult<()> {
    match clicks.iter().find(|&&c| c >= len) {
        Some(c) => Err(NBackError::Validation(format!(
            "{} click at timestep {} is past the end of a {}-step session",
            name, c, len
        ))),
        None => Ok(()),
    }
}
