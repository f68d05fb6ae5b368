//! Configuration system for Planwright.
//!
//! Load solver configuration from TOML or YAML files to control
//! termination, acceptors and foragers without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use planwright_config::{AcceptorConfig, SolverConfig};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 42
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!
//!     [local_search.acceptor]
//!     type = "late_acceptance"
//!     late_acceptance_size = 400
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use planwright_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Environment mode affecting reproducibility and assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Solver-level termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Local search phase configuration.
    #[serde(default)]
    pub local_search: Option<LocalSearchConfig>,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, picking the format from the
    /// extension: `.yaml` and `.yml` parse as YAML, anything else as
    /// TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist or fails to parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the local search configuration.
    pub fn with_local_search(mut self, local_search: LocalSearchConfig) -> Self {
        self.local_search = Some(local_search);
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Rejects configurations with out-of-range values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(local_search) = &self.local_search {
            local_search.validate()?;
        }
        Ok(())
    }
}

/// Environment mode affecting solver behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Non-reproducible mode with minimal overhead.
    #[default]
    NonReproducible,

    /// Reproducible mode with deterministic behavior.
    Reproducible,

    /// Recalculates every move score from scratch to catch corruption.
    FullAssert,
}

/// Termination configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,

    /// Target best score (as string, e.g. "0hard/0soft").
    pub best_score_limit: Option<String>,

    /// Maximum number of steps per phase.
    pub step_count_limit: Option<u64>,

    /// Maximum unimproved steps before the phase stops.
    pub unimproved_step_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds =
            self.seconds_spent_limit.unwrap_or(0) + self.minutes_spent_limit.unwrap_or(0) * 60;
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }
}

/// Local search phase configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    /// Acceptor configuration.
    pub acceptor: Option<AcceptorConfig>,

    /// Forager configuration.
    pub forager: Option<ForagerConfig>,

    /// Phase termination configuration.
    pub termination: Option<TerminationConfig>,
}

impl LocalSearchConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        match &self.acceptor {
            Some(AcceptorConfig::LateAcceptance(config)) => {
                if config.late_acceptance_size == Some(0) {
                    return Err(ConfigError::Invalid(
                        "late_acceptance_size must be positive".to_string(),
                    ));
                }
            }
            Some(AcceptorConfig::SimulatedAnnealing(config)) => {
                if config.starting_temperature <= 0.0 {
                    return Err(ConfigError::Invalid(
                        "starting_temperature must be positive".to_string(),
                    ));
                }
            }
            _ => {}
        }
        if let Some(forager) = &self.forager {
            if forager.accepted_count_limit == Some(0) {
                return Err(ConfigError::Invalid(
                    "accepted_count_limit must be positive".to_string(),
                ));
            }
            if forager.selected_count_limit == Some(0) {
                return Err(ConfigError::Invalid(
                    "selected_count_limit must be positive".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Acceptor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcceptorConfig {
    /// Hill climbing (accept any non-worsening move).
    HillClimbing,

    /// Tabu search acceptor.
    TabuSearch(TabuSearchConfig),

    /// Simulated annealing acceptor.
    SimulatedAnnealing(SimulatedAnnealingConfig),

    /// Late acceptance acceptor.
    LateAcceptance(LateAcceptanceConfig),
}

/// Tabu search configuration.
///
/// Exactly one tabu dimension applies per acceptor: entity, value or
/// move, in that order of precedence when several sizes are set.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TabuSearchConfig {
    /// Size of the entity tabu list.
    pub entity_tabu_size: Option<u64>,

    /// Entity tabu size as a ratio of the entity count.
    pub entity_tabu_ratio: Option<f64>,

    /// Size of the value tabu list.
    pub value_tabu_size: Option<u64>,

    /// Size of the move tabu list.
    pub move_tabu_size: Option<u64>,

    /// Extra steps over which a stale tabu fades out probabilistically.
    pub fading_tabu_size: Option<u64>,

    /// Whether a tabu move beating the best score is still accepted.
    /// Defaults to true.
    pub aspiration_enabled: Option<bool>,
}

/// Simulated annealing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulatedAnnealingConfig {
    /// Starting temperature, in score scalar units.
    pub starting_temperature: f64,

    /// Per-step temperature multiplier. Defaults to 0.999.
    #[serde(default = "default_temperature_decay")]
    pub temperature_decay: f64,
}

fn default_temperature_decay() -> f64 {
    0.999
}

/// Late acceptance configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LateAcceptanceConfig {
    /// Size of the late acceptance ring buffer.
    pub late_acceptance_size: Option<usize>,
}

/// Forager configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ForagerConfig {
    /// Maximum number of moves to draw from the selector per step.
    /// Mandatory when the move selector is never-ending.
    pub selected_count_limit: Option<usize>,

    /// Maximum number of accepted moves to trial per step.
    pub accepted_count_limit: Option<usize>,

    /// Whether to pick an improving move before the selection ends.
    pub pick_early_type: Option<PickEarlyType>,

    /// Finalist podium type.
    pub finalist_podium_type: Option<FinalistPodiumType>,
}

/// Pick early type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PickEarlyType {
    /// Never pick early.
    #[default]
    Never,

    /// Pick the first accepted move that improves the best score.
    FirstBestScoreImproving,

    /// Pick the first accepted move that improves the last step score.
    FirstLastStepScoreImproving,
}

/// Finalist podium type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalistPodiumType {
    /// Keep the candidates with the highest score.
    #[default]
    HighestScore,

    /// Tolerate level trade-offs against the last step score.
    StrategicOscillation,

    /// Tolerate level trade-offs against the best score.
    StrategicOscillationByBestScore,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toml() {
        let toml = r#"
            environment_mode = "reproducible"
            random_seed = 42

            [termination]
            seconds_spent_limit = 30

            [local_search.acceptor]
            type = "tabu_search"
            entity_tabu_size = 7
            fading_tabu_size = 3

            [local_search.forager]
            selected_count_limit = 5000
            accepted_count_limit = 1000
            pick_early_type = "never"
        "#;

        let config = SolverConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
        assert_eq!(config.random_seed, Some(42));
        assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
        let local_search = config.local_search.unwrap();
        match local_search.acceptor.unwrap() {
            AcceptorConfig::TabuSearch(tabu) => {
                assert_eq!(tabu.entity_tabu_size, Some(7));
                assert_eq!(tabu.fading_tabu_size, Some(3));
                assert_eq!(tabu.aspiration_enabled, None);
            }
            other => panic!("unexpected acceptor: {other:?}"),
        }
        let forager = local_search.forager.unwrap();
        assert_eq!(forager.selected_count_limit, Some(5000));
        assert_eq!(forager.accepted_count_limit, Some(1000));
        assert_eq!(forager.pick_early_type, Some(PickEarlyType::Never));
    }

    #[test]
    fn parses_yaml() {
        let yaml = r#"
            random_seed: 42
            termination:
              minutes_spent_limit: 2
            local_search:
              acceptor:
                type: late_acceptance
                late_acceptance_size: 400
              forager:
                finalist_podium_type: strategic_oscillation
        "#;

        let config = SolverConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.random_seed, Some(42));
        assert_eq!(config.time_limit(), Some(Duration::from_secs(120)));
        let local_search = config.local_search.unwrap();
        match local_search.acceptor.unwrap() {
            AcceptorConfig::LateAcceptance(late) => {
                assert_eq!(late.late_acceptance_size, Some(400));
            }
            other => panic!("unexpected acceptor: {other:?}"),
        }
        assert_eq!(
            local_search.forager.unwrap().finalist_podium_type,
            Some(FinalistPodiumType::StrategicOscillation)
        );
    }

    #[test]
    fn simulated_annealing_defaults_its_decay() {
        let config = SolverConfig::from_toml_str(
            r#"
            [local_search.acceptor]
            type = "simulated_annealing"
            starting_temperature = 100.0
        "#,
        )
        .unwrap();
        match config.local_search.unwrap().acceptor.unwrap() {
            AcceptorConfig::SimulatedAnnealing(sa) => {
                assert_eq!(sa.starting_temperature, 100.0);
                assert_eq!(sa.temperature_decay, 0.999);
            }
            other => panic!("unexpected acceptor: {other:?}"),
        }
    }

    #[test]
    fn builder_methods_compose() {
        let config = SolverConfig::new()
            .with_random_seed(123)
            .with_termination_seconds(60)
            .with_local_search(LocalSearchConfig {
                acceptor: Some(AcceptorConfig::HillClimbing),
                ..LocalSearchConfig::default()
            });

        assert_eq!(config.random_seed, Some(123));
        assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
        assert!(config.local_search.is_some());
    }

    #[test]
    fn validation_rejects_zero_sizes() {
        let config = SolverConfig::from_toml_str(
            r#"
            [local_search.acceptor]
            type = "late_acceptance"
            late_acceptance_size = 0
        "#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = SolverConfig::from_toml_str(
            r#"
            [local_search.forager]
            accepted_count_limit = 0
        "#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = SolverConfig::from_toml_str(
            r#"
            [local_search.forager]
            selected_count_limit = 0
        "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(SolverConfig::from_toml_str("random_seed = \"not a number\"").is_err());
    }

    #[test]
    fn load_dispatches_on_the_file_extension() {
        let dir = std::env::temp_dir();
        let yaml_path = dir.join(format!("planwright-load-{}.yml", std::process::id()));
        let toml_path = dir.join(format!("planwright-load-{}.toml", std::process::id()));
        std::fs::write(&yaml_path, "random_seed: 7\n").unwrap();
        std::fs::write(&toml_path, "random_seed = 7\n").unwrap();

        assert_eq!(SolverConfig::load(&yaml_path).unwrap().random_seed, Some(7));
        assert_eq!(SolverConfig::load(&toml_path).unwrap().random_seed, Some(7));

        std::fs::remove_file(yaml_path).ok();
        std::fs::remove_file(toml_path).ok();
    }
}
