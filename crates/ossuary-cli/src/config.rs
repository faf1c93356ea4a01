//! Simulation configuration loaded from YAML.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use ossuary_bt::Tuning;
use ossuary_core::Vec3;
use ossuary_sandbox::ArenaConfig;

fn default_ticks() -> u64 {
    600
}

fn default_dt() -> f32 {
    0.1
}

fn default_enemies() -> usize {
    8
}

fn default_rocks() -> usize {
    12
}

fn default_base_population() -> usize {
    5
}

fn default_think_every() -> u32 {
    1
}

fn default_player() -> Option<Vec3> {
    Some(Vec3::ZERO)
}

/// An extra body placed at startup, by prefab name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnEntry {
    pub prefab: String,
    pub at: Vec3,
}

/// Everything a headless run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default = "default_ticks")]
    pub ticks: u64,

    #[serde(default = "default_dt")]
    pub dt_seconds: f32,

    /// Seeds both the tick RNG streams and the arena.
    #[serde(default)]
    pub seed: u64,

    #[serde(default)]
    pub arena: ArenaConfig,

    /// Skeletons placed at random points on startup.
    #[serde(default = "default_enemies")]
    pub enemies: usize,

    #[serde(default = "default_rocks")]
    pub rocks: usize,

    /// The spawner tops the population up to this plus the kill count, one skeleton per tick.
    #[serde(default = "default_base_population")]
    pub base_population: usize,

    #[serde(default = "default_think_every")]
    pub think_every_ticks: u32,

    /// `None` runs without a player; enemies then only patrol and wander.
    #[serde(default = "default_player")]
    pub player: Option<Vec3>,

    #[serde(default)]
    pub spawns: Vec<SpawnEntry>,

    #[serde(default)]
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            dt_seconds: default_dt(),
            seed: 0,
            arena: ArenaConfig::default(),
            enemies: default_enemies(),
            rocks: default_rocks(),
            base_population: default_base_population(),
            think_every_ticks: default_think_every(),
            player: default_player(),
            spawns: Vec::new(),
            tuning: Tuning::default(),
        }
    }
}

impl SimConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.dt_seconds.is_finite() && self.dt_seconds > 0.0) {
            bail!("dt_seconds must be positive (got {})", self.dt_seconds);
        }
        if !(self.arena.half_extent.is_finite() && self.arena.half_extent > 0.0) {
            bail!(
                "arena.half_extent must be positive (got {})",
                self.arena.half_extent
            );
        }
        self.tuning.validate()?;
        for spawn in &self.spawns {
            if ossuary_core::prefab::by_name(&spawn.prefab).is_none() {
                return Err(ossuary_core::ConfigError::UnknownPrefab(spawn.prefab.clone()).into());
            }
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_keep_the_defaults() {
        let config: SimConfig = serde_yaml::from_str(
            r#"
ticks: 50
tuning:
  impact_speed_threshold: 8.0
arena:
  half_extent: 30.0
"#,
        )
        .unwrap();

        assert_eq!(config.ticks, 50);
        assert_eq!(config.enemies, 8);
        assert_eq!(config.base_population, 5);
        assert_eq!(config.player, Some(Vec3::ZERO));
        assert_eq!(config.tuning.impact_speed_threshold, 8.0);
        assert_eq!(config.tuning.view_max_range, 50.0);
        assert_eq!(config.arena.half_extent, 30.0);
        assert_eq!(config.arena.drag, ArenaConfig::default().drag);
        config.validate().unwrap();
    }

    #[test]
    fn defaults_survive_a_yaml_round_trip() {
        let config = SimConfig::default();
        let yaml = config.to_yaml().unwrap();
        let back: SimConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn unknown_spawn_prefab_is_rejected() {
        let config: SimConfig = serde_yaml::from_str(
            r#"
spawns:
  - prefab: Dragon
    at: { x: 0.0, y: 0.0, z: 0.0 }
"#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Dragon"), "{err}");
    }

    #[test]
    fn tuning_carries_only_knobs_the_trees_read() {
        let yaml = serde_yaml::to_value(Tuning::default()).unwrap();
        let mut keys: Vec<_> = yaml
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap().to_string())
            .collect();
        keys.sort();
        assert_eq!(
            keys,
            [
                "impact_speed_threshold",
                "route_arrival_distance",
                "scream_wait_seconds",
                "throw_wait_seconds",
                "throwable_cone_dot",
                "view_cone_dot",
                "view_max_range",
                "view_min_range",
                "wander_arrival_distance",
            ]
        );
    }

    #[test]
    fn zero_dt_is_rejected() {
        let config = SimConfig {
            dt_seconds: 0.0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
