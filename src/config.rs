//=========================================================================
// Cabinet Configuration
//=========================================================================
//
// TOML file → CabinetConfig → (TriggerRegistry, GameSession)
//
// Loaded once at startup. A missing file is not an error: the cabinet
// comes up with no targets and warns. Environment variables override a
// few tuning keys after the file is read.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::event::{ChannelId, EventTemplate, TargetId};
use crate::core::game::{GameSession, ScoringTable};
use crate::core::input::{ChannelReader, TriggerRegistry};
use crate::error::{CabinetError, Result};

//=== Environment Keys ====================================================

pub const ENV_DEBOUNCE_MS: &str = "SKEEBALL_DEBOUNCE_MS";
pub const ENV_BALLS: &str = "SKEEBALL_BALLS";

//=== CabinetConfig =======================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CabinetConfig {
    /// Latch window applied to every sensor.
    pub debounce_ms: u64,
    /// Period of the `TimerTick` that drives sensor sweeps.
    pub poll_interval_ms: u64,
    pub balls_per_game: u32,
    pub queue_capacity: usize,
    /// Delay before post-play returns to attract. `None` stays put.
    pub post_play_timeout_ms: Option<u64>,
    /// Target the ball return trips; drains a ball instead of scoring.
    pub catch_all_target: TargetId,
    pub start_channel: Option<ChannelId>,
    pub high_score_slots: usize,
    pub gpio_root: PathBuf,
    pub targets: Vec<TargetConfig>,
    pub actuator: ActuatorConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    pub id: TargetId,
    pub points: u32,
    pub channel: ChannelId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActuatorConfig {
    pub release_channel: Option<ChannelId>,
}

impl Default for CabinetConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 1000,
            poll_interval_ms: 100,
            balls_per_game: 9,
            queue_capacity: 256,
            post_play_timeout_ms: None,
            catch_all_target: 0,
            start_channel: None,
            high_score_slots: 5,
            gpio_root: PathBuf::from("/sys/class/gpio"),
            targets: Vec::new(),
            actuator: ActuatorConfig::default(),
        }
    }
}

impl CabinetConfig {
    //--- Loading ----------------------------------------------------------

    /// Reads, overrides from the environment, and validates.
    ///
    /// # Errors
    ///
    /// - [`CabinetError::Io`] if the file exists but cannot be read
    /// - [`CabinetError::ConfigParse`] on invalid TOML
    /// - [`CabinetError::Configuration`] if validation fails
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let text = fs::read_to_string(path)?;
            Self::parse(&text, path)?
        } else {
            warn!(
                "Config {} not found, starting with an empty target mapping",
                path.display()
            );
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        info!(
            "Loaded cabinet config: {} targets, {} balls, {}ms debounce",
            config.targets.len(),
            config.balls_per_game,
            config.debounce_ms
        );
        Ok(config)
    }

    /// Parses TOML text. `path` is only used for error reporting.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| CabinetError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `SKEEBALL_*` overrides looked up through `lookup`.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_DEBOUNCE_MS) {
            match raw.trim().parse() {
                Ok(ms) => self.debounce_ms = ms,
                Err(_) => warn!("Ignoring {}={:?}: not a number", ENV_DEBOUNCE_MS, raw),
            }
        }
        if let Some(raw) = lookup(ENV_BALLS) {
            match raw.trim().parse() {
                Ok(balls) => self.balls_per_game = balls,
                Err(_) => warn!("Ignoring {}={:?}: not a number", ENV_BALLS, raw),
            }
        }
    }

    //--- Validation -------------------------------------------------------

    /// Checks for contradictory bindings.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(CabinetError::Configuration(
                "poll_interval_ms must be positive".into(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(CabinetError::Configuration(
                "queue_capacity must be positive".into(),
            ));
        }
        if self.balls_per_game == 0 {
            return Err(CabinetError::Configuration(
                "balls_per_game must be positive".into(),
            ));
        }

        let mut ids = HashSet::new();
        let mut channels = HashSet::new();

        if let Some(channel) = self.start_channel {
            channels.insert(channel);
        }
        for target in &self.targets {
            if !ids.insert(target.id) {
                return Err(CabinetError::Configuration(format!(
                    "target {} listed more than once",
                    target.id
                )));
            }
            if !channels.insert(target.channel) {
                return Err(CabinetError::Configuration(format!(
                    "channel {} bound more than once (target {})",
                    target.channel, target.id
                )));
            }
        }
        if let Some(channel) = self.actuator.release_channel {
            if channels.contains(&channel) {
                return Err(CabinetError::Configuration(format!(
                    "release channel {} is also an input",
                    channel
                )));
            }
        }

        if !self.targets.is_empty() && !ids.contains(&self.catch_all_target) {
            return Err(CabinetError::Configuration(format!(
                "catch-all target {} has no channel",
                self.catch_all_target
            )));
        }
        Ok(())
    }

    //--- Assembly ---------------------------------------------------------

    /// Target → points table for the game session.
    pub fn scoring_table(&self) -> ScoringTable {
        self.targets.iter().map(|t| (t.id, t.points)).collect()
    }

    pub fn build_session(&self) -> GameSession {
        GameSession::new(self.scoring_table(), self.catch_all_target, self.balls_per_game)
    }

    /// Registers every configured input with `reader`.
    ///
    /// Order: start button, scoring targets as listed, catch-all last, so
    /// a ball seen by a target and the catch-all in the same sweep is
    /// scored before it drains.
    ///
    /// # Errors
    ///
    /// [`CabinetError::Configuration`] on duplicate bindings or an
    /// unreadable channel.
    pub fn build_registry(&self, reader: Box<dyn ChannelReader>) -> Result<TriggerRegistry> {
        let mut registry = TriggerRegistry::new(reader, self.debounce_ms);

        if let Some(channel) = self.start_channel {
            registry.register("start", channel, EventTemplate::Start)?;
        }

        let (catch_all, scoring): (Vec<&TargetConfig>, Vec<&TargetConfig>) = self
            .targets
            .iter()
            .partition(|t| t.id == self.catch_all_target);

        for target in scoring.into_iter().chain(catch_all) {
            let name = format!("target_{}", target.id);
            let template = EventTemplate::Target {
                target_id: target.id,
                points: target.points,
            };
            registry.register(&name, target.channel, template)?;
        }

        Ok(registry)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::Event;
    use crate::core::input::SimulatedChannels;
    use std::collections::HashMap;

    const SAMPLE: &str = r#"
        debounce_ms = 250
        balls_per_game = 3
        start_channel = 4
        post_play_timeout_ms = 10000

        [[targets]]
        id = 0
        points = 0
        channel = 10

        [[targets]]
        id = 1
        points = 50
        channel = 11

        [[targets]]
        id = 2
        points = 100
        channel = 12

        [actuator]
        release_channel = 22
    "#;

    fn sample() -> CabinetConfig {
        CabinetConfig::parse(SAMPLE, Path::new("sample.toml")).unwrap()
    }

    //=====================================================================
    // Parsing
    //=====================================================================

    #[test]
    fn parse_fills_defaults() {
        let config = sample();
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.balls_per_game, 3);
        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(config.queue_capacity, 256);
        assert_eq!(config.post_play_timeout_ms, Some(10_000));
        assert_eq!(config.actuator.release_channel, Some(22));
        assert_eq!(config.targets.len(), 3);
    }

    #[test]
    fn parse_error_names_the_file() {
        let err = CabinetConfig::parse("balls_per_game = \"nine\"", Path::new("bad.toml"))
            .unwrap_err();
        match err {
            CabinetError::ConfigParse { path, .. } => assert_eq!(path, Path::new("bad.toml")),
            other => panic!("expected ConfigParse, got {:?}", other),
        }
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = CabinetConfig::parse("ball_per_game = 3", Path::new("typo.toml"));
        assert!(matches!(result, Err(CabinetError::ConfigParse { .. })));
    }

    #[test]
    fn missing_file_yields_empty_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let config = CabinetConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert!(config.targets.is_empty());
        assert!(config.scoring_table().is_empty());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cabinet.toml");
        fs::write(&path, SAMPLE).unwrap();

        let config = CabinetConfig::load(&path).unwrap();
        assert_eq!(config.scoring_table().points(2), 100);
    }

    #[test]
    fn shipped_cabinet_file_is_valid() {
        let text = include_str!("../cabinet.toml");
        let config = CabinetConfig::parse(text, Path::new("cabinet.toml")).unwrap();
        config.validate().unwrap();
        assert_eq!(config.scoring_table(), ScoringTable::midway());
    }

    //=====================================================================
    // Overrides
    //=====================================================================

    #[test]
    fn overrides_replace_tuning_keys() {
        let env: HashMap<&str, &str> = [(ENV_DEBOUNCE_MS, "40"), (ENV_BALLS, " 5 ")].into();
        let mut config = sample();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.debounce_ms, 40);
        assert_eq!(config.balls_per_game, 5);
    }

    #[test]
    fn malformed_override_is_ignored() {
        let mut config = sample();
        config.apply_overrides(|key| (key == ENV_BALLS).then(|| "lots".to_string()));
        assert_eq!(config.balls_per_game, 3);
    }

    //=====================================================================
    // Validation
    //=====================================================================

    #[test]
    fn duplicate_target_id_is_rejected() {
        let mut config = sample();
        config.targets.push(TargetConfig { id: 1, points: 50, channel: 30 });
        assert!(matches!(config.validate(), Err(CabinetError::Configuration(_))));
    }

    #[test]
    fn duplicate_channel_is_rejected() {
        let mut config = sample();
        config.targets.push(TargetConfig { id: 7, points: 300, channel: 4 });
        assert!(matches!(config.validate(), Err(CabinetError::Configuration(_))));
    }

    #[test]
    fn release_channel_cannot_be_an_input() {
        let mut config = sample();
        config.actuator.release_channel = Some(11);
        assert!(matches!(config.validate(), Err(CabinetError::Configuration(_))));
    }

    #[test]
    fn targets_without_catch_all_are_rejected() {
        let mut config = sample();
        config.targets.retain(|t| t.id != 0);
        assert!(matches!(config.validate(), Err(CabinetError::Configuration(_))));
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let config = CabinetConfig { poll_interval_ms: 0, ..CabinetConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_balls_per_game_is_rejected() {
        let mut config = sample();
        config.balls_per_game = 0;
        assert!(matches!(config.validate(), Err(CabinetError::Configuration(_))));
    }

    #[test]
    fn zero_balls_override_fails_validation() {
        let mut config = sample();
        config.apply_overrides(|key| (key == ENV_BALLS).then(|| "0".to_string()));
        assert_eq!(config.balls_per_game, 0);
        assert!(config.validate().is_err());
    }

    //=====================================================================
    // Assembly
    //=====================================================================

    #[test]
    fn registry_polls_catch_all_last() {
        let channels = SimulatedChannels::new();
        let registry = sample().build_registry(Box::new(channels.clone())).unwrap();
        let mut registry = registry;

        channels.close(10);
        channels.close(12);
        let events: Vec<_> = registry.poll_all(5_000).collect();

        assert_eq!(
            events,
            vec![
                Event::TargetHit { target_id: 2, points: 100 },
                Event::TargetHit { target_id: 0, points: 0 },
            ]
        );
    }

    #[test]
    fn registry_has_start_button() {
        let registry = sample()
            .build_registry(Box::new(SimulatedChannels::new()))
            .unwrap();
        assert!(registry.start_button().is_some());
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn session_uses_configured_balls() {
        let session = sample().build_session();
        assert_eq!(session.balls_per_game(), 3);
        assert_eq!(session.catch_all(), 0);
    }
}
