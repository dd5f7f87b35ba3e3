use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::progress::AnimationTiming;
use crate::scoring::{Catalog, VerticalConfig};

/// User configuration file.
///
/// Every field is optional; an empty file means the built-in verticals with
/// the default animation.
///
/// Example YAML:
/// ```yaml
/// default_revenue: 12000
/// animation:
///   step_delay: 30ms
///   final_pause: 250ms
/// verticals:
///   - id: empleabilidad
///     ...
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Vertical overrides (same id) and additions (new id)
    #[serde(default)]
    pub verticals: Vec<VerticalConfig>,

    #[serde(default)]
    pub animation: Option<AnimationConfig>,

    /// Monthly revenue used when none is given on the command line
    #[serde(default)]
    pub default_revenue: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnimationConfig {
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Delay between frames, e.g. "50ms"
    #[serde(default)]
    pub step_delay: Option<String>,

    /// Pause before the result, e.g. "500ms"
    #[serde(default)]
    pub final_pause: Option<String>,
}

impl Config {
    /// Built-in verticals with this file's overrides applied.
    pub fn catalog(&self) -> Catalog {
        Catalog::builtin().with_overrides(self.verticals.clone())
    }

    pub fn animation_enabled(&self) -> bool {
        self.animation
            .as_ref()
            .and_then(|a| a.enabled)
            .unwrap_or(true)
    }

    pub fn animation_timing(&self) -> Result<AnimationTiming> {
        let defaults = AnimationTiming::default();
        let Some(ref animation) = self.animation else {
            return Ok(defaults);
        };

        let step_delay = match animation.step_delay {
            Some(ref s) => humantime::parse_duration(s)
                .with_context(|| format!("animation.step_delay: invalid duration '{}'", s))?,
            None => defaults.step_delay,
        };
        let final_pause = match animation.final_pause {
            Some(ref s) => humantime::parse_duration(s)
                .with_context(|| format!("animation.final_pause: invalid duration '{}'", s))?,
            None => defaults.final_pause,
        };

        Ok(AnimationTiming {
            step_delay,
            final_pause,
        })
    }
}
