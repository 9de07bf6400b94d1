use std::{fs::File, io::BufReader, path::Path};

use crate::{
    anim_ease::Ease,
    dataset::GenerationIndex,
    error::{RaceError, RaceResult},
};

/// Playback settings for a race session.
///
/// Every field has a default so a config file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RaceConfig {
    pub frames_per_transition: usize, // interpolated frames, final frame excluded
    pub frame_duration_ms: u64,       // visual transition per keyframe
    pub ease: Ease,
    pub min_generation: u32,
    pub max_generation: u32,
    pub start_generation: u32, // cursor position after the reveal
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            frames_per_transition: 30,
            frame_duration_ms: 250,
            ease: Ease::Linear,
            min_generation: 1,
            max_generation: 9,
            start_generation: 1,
        }
    }
}

impl RaceConfig {
    /// Default settings with bounds spanning every generation in `index`.
    pub fn spanning(index: &GenerationIndex) -> Self {
        let mut cfg = Self::default();
        if let (Some(first), Some(last)) = (index.first_generation(), index.last_generation()) {
            cfg.min_generation = first;
            cfg.max_generation = last;
            cfg.start_generation = first;
        }
        cfg
    }

    pub fn from_path(path: &Path) -> RaceResult<Self> {
        let f = File::open(path).map_err(|e| {
            RaceError::config(format!("open config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| RaceError::serde(format!("parse config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> RaceResult<()> {
        if self.frames_per_transition == 0 {
            return Err(RaceError::config("frames_per_transition must be > 0"));
        }
        if self.min_generation == 0 {
            return Err(RaceError::config(
                "min_generation must be >= 1 (generation 0 is reserved)",
            ));
        }
        if self.min_generation > self.max_generation {
            return Err(RaceError::config(format!(
                "min_generation {} exceeds max_generation {}",
                self.min_generation, self.max_generation
            )));
        }
        if !(self.min_generation..=self.max_generation).contains(&self.start_generation) {
            return Err(RaceError::config(format!(
                "start_generation {} is outside [{}, {}]",
                self.start_generation, self.min_generation, self.max_generation
            )));
        }
        Ok(())
    }
}
