//! Scenario configuration: engine settings plus the initial population.
//!
//! Loaded from an optional JSON file; command-line flags override
//! individual fields.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use multilat_core::constants::DEFAULT_DETECTION_RADIUS;
use multilat_core::NoiseModel;
use multilat_sim::{SimConfig, SimulationEngine};

use crate::error::{AppError, AppResult};
use crate::logging::LogLevel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub sim: SimConfig,
    pub sensor_count: usize,
    /// Detection radius for every sensor; `<= 0` is unlimited.
    pub detection_radius: f64,
    /// Noise models assigned to sensors in turn. Empty means no noise.
    pub noise_models: Vec<NoiseModel>,
    pub target_count: usize,
    /// Simulated run length in seconds; 0 runs until stopped.
    pub duration_secs: f64,
    /// Seconds between state reports.
    pub report_interval_secs: f64,
    pub log_level: LogLevel,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            sensor_count: 6,
            detection_radius: DEFAULT_DETECTION_RADIUS,
            noise_models: vec![NoiseModel::None],
            target_count: 4,
            duration_secs: 0.0,
            report_interval_secs: 1.0,
            log_level: LogLevel::Info,
        }
    }
}

impl ScenarioConfig {
    pub fn from_json(json: &str) -> AppResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Runner-level checks. Engine settings are validated by the engine.
    pub fn validate(&self) -> AppResult<()> {
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(AppError::Scenario(format!(
                "duration_secs must be finite and non-negative, got {}",
                self.duration_secs
            )));
        }
        if !self.report_interval_secs.is_finite() || self.report_interval_secs <= 0.0 {
            return Err(AppError::Scenario(format!(
                "report_interval_secs must be finite and positive, got {}",
                self.report_interval_secs
            )));
        }
        Ok(())
    }

    /// Noise model for the `index`-th sensor, cycling through `noise_models`.
    pub fn noise_for(&self, index: usize) -> NoiseModel {
        if self.noise_models.is_empty() {
            NoiseModel::None
        } else {
            self.noise_models[index % self.noise_models.len()]
        }
    }

    /// Create the engine and populate it with random sensors and targets.
    pub fn build_engine(&self) -> AppResult<SimulationEngine> {
        let mut engine = SimulationEngine::new(self.sim.clone())?;
        for i in 0..self.sensor_count {
            engine.add_random_sensor(self.detection_radius, self.noise_for(i))?;
        }
        for _ in 0..self.target_count {
            engine.add_random_target()?;
        }
        Ok(engine)
    }

    /// Number of ticks between state reports (at least one).
    pub fn report_every_ticks(&self) -> u64 {
        ((self.report_interval_secs / self.sim.tick_duration_secs).round() as u64).max(1)
    }
}

/// Command-line options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub duration_secs: Option<f64>,
    pub log_level: Option<LogLevel>,
    pub help: bool,
}

impl CliArgs {
    /// Parse `args` (without the program name).
    pub fn parse(args: &[String]) -> AppResult<Self> {
        let mut cli = CliArgs::default();
        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "-h" | "--help" => cli.help = true,
                "--config" | "--seed" | "--duration" | "--log-level" => {
                    let value = args
                        .get(i + 1)
                        .ok_or_else(|| AppError::Args(format!("{flag} needs a value")))?;
                    i += 1;
                    match flag {
                        "--config" => cli.config = Some(PathBuf::from(value)),
                        "--seed" => {
                            cli.seed = Some(value.parse::<u64>().map_err(|_| {
                                AppError::Args(format!("--seed expects an integer, got {value}"))
                            })?)
                        }
                        "--duration" => {
                            cli.duration_secs = Some(value.parse::<f64>().map_err(|_| {
                                AppError::Args(format!("--duration expects seconds, got {value}"))
                            })?)
                        }
                        _ => cli.log_level = Some(value.parse::<LogLevel>().map_err(AppError::Args)?),
                    }
                }
                other => return Err(AppError::Args(format!("unknown argument: {other}"))),
            }
            i += 1;
        }
        Ok(cli)
    }

    /// Load the scenario (file or defaults) and apply the overrides.
    pub fn scenario(&self) -> AppResult<ScenarioConfig> {
        let mut scenario = match &self.config {
            Some(path) => ScenarioConfig::load(path)?,
            None => ScenarioConfig::default(),
        };
        if let Some(seed) = self.seed {
            scenario.sim.seed = seed;
        }
        if let Some(duration) = self.duration_secs {
            scenario.duration_secs = duration;
        }
        if let Some(level) = self.log_level {
            scenario.log_level = level;
        }
        scenario.validate()?;
        Ok(scenario)
    }
}
