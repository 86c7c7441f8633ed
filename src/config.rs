use crate::consts::{
    DEFAULT_COUNTDOWN_SECS, DEFAULT_FLASH_MS, DEFAULT_INTERVAL_MS, DEFAULT_LEVEL, DEFAULT_N_PLUS,
    MAX_LEVEL, MAX_N_PLUS, PLANNED_MATCH_SLOTS,
};
use crate::error::{NBackError, NbResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Args, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How many steps back a stimulus is compared against (N).
    #[arg(long, default_value_t = DEFAULT_LEVEL)]
    pub level: usize,

    /// Timesteps after the first N; the sequence length is n_plus + level.
    #[arg(long, default_value_t = DEFAULT_N_PLUS)]
    pub n_plus: usize,

    #[arg(long, default_value_t = DEFAULT_INTERVAL_MS)]
    pub interval_ms: u64,

    #[arg(long, default_value_t = DEFAULT_COUNTDOWN_SECS)]
    pub countdown_secs: u32,

    #[arg(long, default_value_t = DEFAULT_FLASH_MS)]
    pub flash_ms: u64,

    /// Per-turn correctness feedback.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub feedback: bool,

    /// Auto-press every true match and skip scoring.
    #[arg(long, default_value_t = false)]
    pub demo: bool,

    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            n_plus: DEFAULT_N_PLUS,
            interval_ms: DEFAULT_INTERVAL_MS,
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            flash_ms: DEFAULT_FLASH_MS,
            feedback: true,
            demo: false,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> NbResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn validate(&self) -> NbResult<()> {
        if self.level == 0 {
            return Err(NBackError::Config("level must be at least 1".to_string()));
        }
        if self.level > MAX_LEVEL {
            return Err(NBackError::Config(format!(
                "level must be at most {} (got {})",
                MAX_LEVEL, self.level
            )));
        }
        if self.n_plus < PLANNED_MATCH_SLOTS {
            return Err(NBackError::Config(format!(
                "n_plus must be at least {} to place every planned match (got {})",
                PLANNED_MATCH_SLOTS, self.n_plus
            )));
        }
        if self.n_plus > MAX_N_PLUS {
            return Err(NBackError::Config(format!(
                "n_plus must be at most {} (got {})",
                MAX_N_PLUS, self.n_plus
            )));
        }
        if self.interval_ms == 0 {
            return Err(NBackError::Config("interval_ms must be positive".to_string()));
        }
        if self.flash_ms > self.interval_ms {
            return Err(NBackError::Config(format!(
                "flash_ms ({}) cannot exceed interval_ms ({})",
                self.flash_ms, self.interval_ms
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn sequence_len(&self) -> usize {
        self.n_plus + self.level
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn flash(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }

    /// Seeded when `seed` is set, entropy-backed otherwise.
    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        }
    }

    pub fn merge_from_cli(&mut self, cli: &SessionConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(level, "level");
        update_if_present!(n_plus, "n_plus");
        update_if_present!(interval_ms, "interval_ms");
        update_if_present!(countdown_secs, "countdown_secs");
        update_if_present!(flash_ms, "flash_ms");
        update_if_present!(feedback, "feedback");
        update_if_present!(demo, "demo");
        update_if_present!(seed, "seed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sequence_len(), 22);
        assert_eq!(config.interval(), Duration::from_secs(4));
    }

    #[test]
    fn zero_level_is_rejected() {
        let config = SessionConfig {
            level: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(NBackError::Config(_))));
    }

    #[test]
    fn oversized_level_is_rejected() {
        let config = SessionConfig {
            level: MAX_LEVEL + 1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(NBackError::Config(_))));
    }

    #[test]
    fn flash_longer_than_interval_is_rejected() {
        let config = SessionConfig {
            interval_ms: 400,
            flash_ms: 500,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(NBackError::Config(_))));
    }
}
