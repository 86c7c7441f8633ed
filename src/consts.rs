/// Number of cells that can light up: a 3x3 grid without its centre.
pub const GRID_CELLS: u8 = 8;

/// Spoken letters, one per auditory stimulus index (Jaeggi, 2003).
pub const LETTERS: [char; 10] = ['B', 'C', 'D', 'G', 'H', 'K', 'P', 'Q', 'T', 'W'];

/// Size of the auditory alphabet.
pub const LETTER_COUNT: u8 = LETTERS.len() as u8;

pub const DEFAULT_LEVEL: usize = 2;
pub const DEFAULT_N_PLUS: usize = 20;
pub const DEFAULT_INTERVAL_MS: u64 = 4000;
pub const DEFAULT_COUNTDOWN_SECS: u32 = 3;
pub const DEFAULT_FLASH_MS: u64 = 500;

/// Largest accepted N.
pub const MAX_LEVEL: usize = 100;
/// Largest accepted number of timesteps after the first N.
pub const MAX_N_PLUS: usize = 10_000;

/// Matches placed on the visual channel only.
pub const VISUAL_ONLY_MATCHES: usize = 4;
/// Matches placed on the auditory channel only.
pub const AUDITORY_ONLY_MATCHES: usize = 4;
/// Matches placed on both channels at the same timestep.
pub const DOUBLE_MATCHES: usize = 2;

/// Scored match opportunities per channel. Also the hit-rate denominator.
pub const MATCHES_PER_CHANNEL: usize = VISUAL_ONLY_MATCHES + DOUBLE_MATCHES;

/// Distinct timesteps a match plan occupies.
pub const PLANNED_MATCH_SLOTS: usize = VISUAL_ONLY_MATCHES + AUDITORY_ONLY_MATCHES + DOUBLE_MATCHES;

/// Upper bound on rejection-sampling draws while building one match plan.
pub const MAX_PLAN_DRAWS: usize = 100_000;

/// d-prime above which a session is rated excellent.
pub const EXCELLENT_THRESHOLD: f64 = 0.85;
/// d-prime below which a session is rated as needing practice.
pub const PRACTICE_THRESHOLD: f64 = 0.7;
