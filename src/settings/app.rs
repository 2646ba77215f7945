//! Top-level application settings
//!
//! Composes the model, training, and data records with environment-derived
//! runtime flags. Construction resolves against an [`EnvSnapshot`];
//! writing the resolved hub values back into the real process environment
//! is a separate, explicit step ([`Settings::export_to_process_env`]).
//!
//! Variables consumed (default when absent):
//!
//! | variable      | default                     |
//! |---------------|-----------------------------|
//! | `ENVIRONMENT` | `development`               |
//! | `DEBUG`       | `false`                     |
//! | `LOG_LEVEL`   | `INFO`                      |
//! | `HF_TOKEN`    | unset                       |
//! | `HF_HOME`     | `{home}/.cache/huggingface` |
//! | `API_HOST`    | `0.0.0.0`                   |
//! | `API_PORT`    | `8000`                      |
//! | `NUM_WORKERS` | `4`                         |

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::settings::env::EnvSnapshot;
use crate::settings::schema::{
    default_hub_cache, DataOverrides, DataSettings, ModelOverrides, ModelSettings,
    TrainingOverrides, TrainingSettings,
};

/// Main application settings.
///
/// Immutable after construction. Owns its three sub-records exclusively;
/// each instance constructs them fresh unless pre-built ones are supplied
/// through [`SettingsOverrides`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Deployment environment name.
    pub env: String,

    /// Debug flag; true iff `DEBUG` equals `true` case-insensitively.
    pub debug: bool,

    /// Log level handed to downstream tooling.
    pub log_level: String,

    /// Hub credential, when configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub_token: Option<String>,

    /// Hub cache home, created at construction.
    pub hub_home: PathBuf,

    /// Model-serving settings.
    pub model: ModelSettings,

    /// Training settings.
    pub training: TrainingSettings,

    /// Data settings.
    pub data: DataSettings,

    /// API bind host.
    pub api_host: String,

    /// API bind port.
    pub api_port: u16,

    /// Worker count for data loading.
    pub num_workers: usize,
}

impl Settings {
    /// Settings resolved from the live process environment.
    ///
    /// Captures a snapshot, constructs, and then exports the resolved hub
    /// values back into the process environment.
    ///
    /// # Errors
    ///
    /// Fails on directory creation errors or unparseable numeric
    /// variables; nothing partial is returned.
    pub fn new() -> Result<Self> {
        Self::from_env(SettingsOverrides::default())
    }

    /// Settings from the live environment with explicit overrides.
    ///
    /// Equivalent to [`SettingsOverrides::apply_with`] on a captured
    /// snapshot followed by [`Settings::export_to_process_env`].
    pub fn from_env(overrides: SettingsOverrides) -> Result<Self> {
        let settings = overrides.apply_with(&EnvSnapshot::capture())?;
        settings.export_to_process_env();
        Ok(settings)
    }

    /// Resolved values downstream hub tooling expects to find in the
    /// environment: always `HF_HOME`, plus `HF_TOKEN` when a token is
    /// configured.
    #[must_use]
    pub fn exports(&self) -> Vec<(&'static str, String)> {
        let mut exports = vec![("HF_HOME", self.hub_home.display().to_string())];
        if let Some(token) = &self.hub_token {
            exports.push(("HF_TOKEN", token.clone()));
        }
        exports
    }

    /// Write [`Settings::exports`] into the process environment.
    ///
    /// The one place this crate mutates the ambient variable table;
    /// snapshot-based construction never does.
    pub fn export_to_process_env(&self) {
        for (var, value) in self.exports() {
            std::env::set_var(var, value);
        }
    }
}

/// Field overrides for [`Settings`]; unset fields fall back to the
/// snapshot, then to the fixed defaults.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub env: Option<String>,
    pub debug: Option<bool>,
    pub log_level: Option<String>,
    pub hub_token: Option<String>,
    pub hub_home: Option<PathBuf>,
    pub model: Option<ModelSettings>,
    pub training: Option<TrainingSettings>,
    pub data: Option<DataSettings>,
    pub api_host: Option<String>,
    pub api_port: Option<u16>,
    pub num_workers: Option<usize>,
}

impl SettingsOverrides {
    #[must_use]
    pub fn env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    #[must_use]
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    #[must_use]
    pub fn hub_token(mut self, token: impl Into<String>) -> Self {
        self.hub_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn hub_home(mut self, dir: impl Into<PathBuf>) -> Self {
        self.hub_home = Some(dir.into());
        self
    }

    #[must_use]
    pub fn model(mut self, model: ModelSettings) -> Self {
        self.model = Some(model);
        self
    }

    #[must_use]
    pub fn training(mut self, training: TrainingSettings) -> Self {
        self.training = Some(training);
        self
    }

    #[must_use]
    pub fn data(mut self, data: DataSettings) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = Some(host.into());
        self
    }

    #[must_use]
    pub fn api_port(mut self, port: u16) -> Self {
        self.api_port = Some(port);
        self
    }

    #[must_use]
    pub fn num_workers(mut self, workers: usize) -> Self {
        self.num_workers = Some(workers);
        self
    }

    /// Resolve against `snapshot` and perform the directory side effects.
    ///
    /// The hub home is created recursively; sub-records not supplied
    /// pre-built are constructed fresh with their own side effects. Does
    /// not touch the process environment; see
    /// [`Settings::export_to_process_env`].
    ///
    /// # Errors
    ///
    /// Fails on directory creation errors or when `API_PORT` /
    /// `NUM_WORKERS` hold non-numeric text. A failure aborts the whole
    /// construction.
    pub fn apply_with(self, snapshot: &EnvSnapshot) -> Result<Settings> {
        let debug = match self.debug {
            Some(flag) => flag,
            None => snapshot.get("DEBUG").is_some_and(debug_enabled),
        };

        let hub_token = self
            .hub_token
            .or_else(|| snapshot.get("HF_TOKEN").map(str::to_string));

        let hub_home = match self.hub_home {
            Some(dir) => dir,
            None => snapshot
                .get("HF_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(default_hub_cache),
        };
        fs::create_dir_all(&hub_home)?;

        let model = match self.model {
            Some(model) => model,
            None => ModelOverrides::default().apply()?,
        };
        let training = match self.training {
            Some(training) => training,
            None => TrainingOverrides::default().apply()?,
        };
        let data = match self.data {
            Some(data) => data,
            None => DataOverrides::default().apply()?,
        };

        Ok(Settings {
            env: self
                .env
                .unwrap_or_else(|| snapshot.get_or("ENVIRONMENT", "development")),
            debug,
            log_level: self
                .log_level
                .unwrap_or_else(|| snapshot.get_or("LOG_LEVEL", "INFO")),
            hub_token,
            hub_home,
            model,
            training,
            data,
            api_host: self
                .api_host
                .unwrap_or_else(|| snapshot.get_or("API_HOST", "0.0.0.0")),
            api_port: match self.api_port {
                Some(port) => port,
                None => snapshot.parse_or("API_PORT", 8000)?,
            },
            num_workers: match self.num_workers {
                Some(workers) => workers,
                None => snapshot.parse_or("NUM_WORKERS", 4)?,
            },
        })
    }
}

/// `DEBUG` truthiness: exactly the text `true`, any casing.
pub(crate) fn debug_enabled(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}
