use std::{collections::BTreeMap, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::error::{MotionError, MotionResult},
    path::sampler::PerturbationRule,
    sink::svg_doc::DEFAULT_MARKER_ATTRIBUTE,
};

pub const DEFAULT_DURATION_MS: f64 = 3000.0;
pub const DEFAULT_FPS: u32 = 60;

/// Tunables for one animated path.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    pub duration_ms: f64,
    pub rules: BTreeMap<usize, PerturbationRule>, // keyed by command index
    pub marker_attribute: String,
    pub fps: u32, // cadence when the host has no display refresh
    pub seed: Option<u64>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            rules: BTreeMap::from([
                (1, PerturbationRule::dynamic(10.0)),
                (2, PerturbationRule::dynamic(5.0)),
            ]),
            marker_attribute: DEFAULT_MARKER_ATTRIBUTE.to_string(),
            fps: DEFAULT_FPS,
            seed: None,
        }
    }
}

impl MotionConfig {
    pub fn from_json_str(s: &str) -> MotionResult<Self> {
        let cfg: Self = serde_json::from_str(s).context("parse motion config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> MotionResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read motion config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Checks that do not need the parsed path; rule indices are checked on annotation.
    pub fn validate(&self) -> MotionResult<()> {
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return Err(MotionError::validation(format!(
                "duration_ms must be finite and > 0 (got {})",
                self.duration_ms
            )));
        }
        if self.fps == 0 {
            return Err(MotionError::validation("fps must be > 0"));
        }
        if self.marker_attribute.trim().is_empty() {
            return Err(MotionError::validation("marker_attribute must be non-empty"));
        }
        for (index, rule) in &self.rules {
            rule.validate().map_err(|e| {
                MotionError::validation(format!("rule for command {index}: {e}"))
            })?;
        }
        Ok(())
    }
}
