use std::collections::BTreeMap;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    foundation::error::{MotionError, MotionResult},
    path::codec::{PathCommand, PathPattern},
};

/// How a command's coordinates vary between generated targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PerturbationRule {
    /// Copied unchanged.
    #[default]
    Static,
    /// Offset per axis by a uniform value in `[-interval, +interval]`.
    Dynamic { interval: f64 },
}

impl PerturbationRule {
    pub fn dynamic(interval: f64) -> Self {
        Self::Dynamic { interval }
    }

    pub fn validate(&self) -> MotionResult<()> {
        match *self {
            Self::Static => Ok(()),
            Self::Dynamic { interval } => {
                // The sampled span is twice the interval and must stay finite.
                if !(interval * 2.0).is_finite() || interval < 0.0 {
                    return Err(MotionError::validation(format!(
                        "dynamic interval must be >= 0 with a finite span (got {interval})"
                    )));
                }
                Ok(())
            }
        }
    }
}

/// A base pattern with one rule per command index.
///
/// Built once after the initial parse and never changed afterwards; annotating produces a new
/// value and leaves the source pattern untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotatedPattern {
    base: PathPattern,
    rules: Vec<PerturbationRule>,
}

impl AnnotatedPattern {
    /// Every command static.
    pub fn plain(base: PathPattern) -> Self {
        let rules = vec![PerturbationRule::Static; base.len()];
        Self { base, rules }
    }

    /// Attach `rules` (keyed by command index) to `base`.
    pub fn new(base: PathPattern, rules: &BTreeMap<usize, PerturbationRule>) -> MotionResult<Self> {
        rules
            .iter()
            .try_fold(Self::plain(base), |acc, (&index, &rule)| {
                acc.with_rule(index, rule)
            })
    }

    pub fn with_rule(&self, index: usize, rule: PerturbationRule) -> MotionResult<Self> {
        rule.validate()?;
        if index >= self.base.len() {
            return Err(MotionError::validation(format!(
                "perturbation rule index {index} is out of range for a {}-command path",
                self.base.len()
            )));
        }
        let mut rules = self.rules.clone();
        rules[index] = rule;
        Ok(Self {
            base: self.base.clone(),
            rules,
        })
    }

    pub fn base(&self) -> &PathPattern {
        &self.base
    }

    pub fn rule(&self, index: usize) -> PerturbationRule {
        self.rules.get(index).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathCommand, PerturbationRule)> + '_ {
        self.base.iter().zip(self.rules.iter().copied())
    }
}

/// Produces randomized targets from an [`AnnotatedPattern`].
pub struct PathSampler<R = StdRng> {
    rng: R,
}

impl PathSampler<StdRng> {
    /// Seeded for reproducible output, or from OS entropy when `seed` is `None`.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng)
    }
}

impl<R: Rng> PathSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// New pattern with the same length and kinds as `base`; dynamic coordinates are offset
    /// independently per axis and per call.
    pub fn generate(&mut self, base: &AnnotatedPattern) -> PathPattern {
        base.iter()
            .map(|(cmd, rule)| match rule {
                PerturbationRule::Static => *cmd,
                PerturbationRule::Dynamic { interval } => {
                    let offset = kurbo::Vec2::new(
                        self.offset(interval),
                        self.offset(interval),
                    );
                    PathCommand::at(cmd.kind, cmd.point() + offset)
                }
            })
            .collect()
    }

    fn offset(&mut self, interval: f64) -> f64 {
        if interval <= 0.0 {
            return 0.0;
        }
        self.rng.r#gen::<f64>() * (interval * 2.0) - interval
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/sampler.rs"]
mod tests;
