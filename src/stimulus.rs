use crate::consts::{GRID_CELLS, LETTERS, LETTER_COUNT};
use crate::error::NBackError;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// The two independent response channels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Visual,
    Auditory,
}

impl Channel {
    /// Alphabet size of the stimuli shown on this channel.
    pub fn alphabet(&self) -> u8 {
        match self {
            Self::Visual => GRID_CELLS,
            Self::Auditory => LETTER_COUNT,
        }
    }
}

/// One of the eight lit positions around the centre of a 3x3 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct GridCell(u8);

impl GridCell {
    pub fn new(index: u8) -> Option<Self> {
        (index < GRID_CELLS).then_some(Self(index))
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    /// Row and column in the 3x3 grid. Index 4 onwards skips the centre.
    pub fn row_col(&self) -> (u8, u8) {
        let slot = if self.0 >= 4 { self.0 + 1 } else { self.0 };
        (slot / 3, slot % 3)
    }
}

/// Index into [`LETTERS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct Letter(u8);

impl Letter {
    pub fn new(index: u8) -> Option<Self> {
        (index < LETTER_COUNT).then_some(Self(index))
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn symbol(&self) -> char {
        LETTERS[self.0 as usize]
    }
}

impl TryFrom<u8> for GridCell {
    type Error = NBackError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index).ok_or_else(|| {
            NBackError::Validation(format!(
                "grid cell {} out of range 0..{}",
                index, GRID_CELLS
            ))
        })
    }
}

impl TryFrom<u8> for Letter {
    type Error = NBackError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index).ok_or_else(|| {
            NBackError::Validation(format!(
                "letter {} out of range 0..{}",
                index, LETTER_COUNT
            ))
        })
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// What the renderer should present at one timestep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stimulus {
    pub tick_index: usize,
    pub visual_position: GridCell,
    #[serde(rename = "auditoryLetterIndex")]
    pub auditory_letter: Letter,
}
