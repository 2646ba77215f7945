//! Settings records and their defaults
//!
//! Plain value records with fixed defaults, immutable after construction.
//! Path-valued fields are resolved to concrete paths and their directories
//! created on disk as part of construction. No range validation is
//! performed on numeric fields.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Model-serving settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Model identifier used when none is requested explicitly.
    #[serde(default = "default_model_id")]
    pub default_model: String,

    /// Weight cache location.
    #[serde(default = "default_hub_cache")]
    pub cache_dir: PathBuf,

    /// Compute device tag.
    #[serde(default = "default_device")]
    pub device: String,

    /// Maximum sequence length.
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Batch size.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Numeric precision tag.
    #[serde(default = "default_precision")]
    pub precision: String,
}

impl ModelSettings {
    /// Stock defaults; the default cache directory is created if missing.
    pub fn new() -> Result<Self> {
        ModelOverrides::default().apply()
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            default_model: default_model_id(),
            cache_dir: default_hub_cache(),
            device: default_device(),
            max_length: default_max_length(),
            batch_size: default_batch_size(),
            precision: default_precision(),
        }
    }
}

/// Field overrides for [`ModelSettings`]; unset fields take the stock
/// defaults.
#[derive(Debug, Clone, Default)]
pub struct ModelOverrides {
    pub default_model: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub device: Option<String>,
    pub max_length: Option<usize>,
    pub batch_size: Option<usize>,
    pub precision: Option<String>,
}

impl ModelOverrides {
    #[must_use]
    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    #[must_use]
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into());
        self
    }

    #[must_use]
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    #[must_use]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    #[must_use]
    pub fn precision(mut self, precision: impl Into<String>) -> Self {
        self.precision = Some(precision.into());
        self
    }

    /// Resolve defaults and perform the directory side effects.
    ///
    /// The cache directory is created only when it was not overridden; an
    /// explicit `cache_dir` is taken as-is.
    ///
    /// # Errors
    ///
    /// Propagates filesystem errors from directory creation.
    pub fn apply(self) -> Result<ModelSettings> {
        let cache_dir = match self.cache_dir {
            Some(dir) => dir,
            None => {
                let dir = default_hub_cache();
                fs::create_dir_all(&dir)?;
                dir
            }
        };

        Ok(ModelSettings {
            default_model: self.default_model.unwrap_or_else(default_model_id),
            cache_dir,
            device: self.device.unwrap_or_else(default_device),
            max_length: self.max_length.unwrap_or_else(default_max_length),
            batch_size: self.batch_size.unwrap_or_else(default_batch_size),
            precision: self.precision.unwrap_or_else(default_precision),
        })
    }
}

/// Training hyperparameters and output-path bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSettings {
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f32,

    #[serde(default = "default_num_epochs")]
    pub num_epochs: usize,

    #[serde(default = "default_warmup_steps")]
    pub warmup_steps: usize,

    #[serde(default = "default_weight_decay")]
    pub weight_decay: f32,

    /// Log metrics every N steps.
    #[serde(default = "default_logging_steps")]
    pub logging_steps: usize,

    /// Save a checkpoint every N steps.
    #[serde(default = "default_save_steps")]
    pub save_steps: usize,

    /// Evaluate every N steps.
    #[serde(default = "default_eval_steps")]
    pub eval_steps: usize,

    /// Checkpoint and artifact directory, created at construction.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl TrainingSettings {
    /// Stock defaults; the output directory is created if missing.
    pub fn new() -> Result<Self> {
        TrainingOverrides::default().apply()
    }
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            learning_rate: default_learning_rate(),
            num_epochs: default_num_epochs(),
            warmup_steps: default_warmup_steps(),
            weight_decay: default_weight_decay(),
            logging_steps: default_logging_steps(),
            save_steps: default_save_steps(),
            eval_steps: default_eval_steps(),
            output_dir: default_output_dir(),
        }
    }
}

/// Field overrides for [`TrainingSettings`]; unset fields take the stock
/// defaults.
#[derive(Debug, Clone, Default)]
pub struct TrainingOverrides {
    pub learning_rate: Option<f32>,
    pub num_epochs: Option<usize>,
    pub warmup_steps: Option<usize>,
    pub weight_decay: Option<f32>,
    pub logging_steps: Option<usize>,
    pub save_steps: Option<usize>,
    pub eval_steps: Option<usize>,
    pub output_dir: Option<PathBuf>,
}

impl TrainingOverrides {
    #[must_use]
    pub fn learning_rate(mut self, lr: f32) -> Self {
        self.learning_rate = Some(lr);
        self
    }

    #[must_use]
    pub fn num_epochs(mut self, epochs: usize) -> Self {
        self.num_epochs = Some(epochs);
        self
    }

    #[must_use]
    pub fn warmup_steps(mut self, steps: usize) -> Self {
        self.warmup_steps = Some(steps);
        self
    }

    #[must_use]
    pub fn weight_decay(mut self, decay: f32) -> Self {
        self.weight_decay = Some(decay);
        self
    }

    #[must_use]
    pub fn logging_steps(mut self, steps: usize) -> Self {
        self.logging_steps = Some(steps);
        self
    }

    #[must_use]
    pub fn save_steps(mut self, steps: usize) -> Self {
        self.save_steps = Some(steps);
        self
    }

    #[must_use]
    pub fn eval_steps(mut self, steps: usize) -> Self {
        self.eval_steps = Some(steps);
        self
    }

    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Resolve defaults and create the output directory.
    ///
    /// # Errors
    ///
    /// Propagates filesystem errors from directory creation.
    pub fn apply(self) -> Result<TrainingSettings> {
        let output_dir = self.output_dir.unwrap_or_else(default_output_dir);
        fs::create_dir_all(&output_dir)?;

        Ok(TrainingSettings {
            learning_rate: self.learning_rate.unwrap_or_else(default_learning_rate),
            num_epochs: self.num_epochs.unwrap_or_else(default_num_epochs),
            warmup_steps: self.warmup_steps.unwrap_or_else(default_warmup_steps),
            weight_decay: self.weight_decay.unwrap_or_else(default_weight_decay),
            logging_steps: self.logging_steps.unwrap_or_else(default_logging_steps),
            save_steps: self.save_steps.unwrap_or_else(default_save_steps),
            eval_steps: self.eval_steps.unwrap_or_else(default_eval_steps),
            output_dir,
        })
    }
}

/// Dataset location and split naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    /// Dataset root, created at construction.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Named hub dataset, when one is used instead of local files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_name: Option<String>,

    #[serde(default = "default_train_split")]
    pub train_split: String,

    #[serde(default = "default_validation_split")]
    pub validation_split: String,

    #[serde(default = "default_test_split")]
    pub test_split: String,

    /// Cap on samples per split; `None` means the full split.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_samples: Option<usize>,
}

impl DataSettings {
    /// Stock defaults; the data directory is created if missing.
    pub fn new() -> Result<Self> {
        DataOverrides::default().apply()
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            dataset_name: None,
            train_split: default_train_split(),
            validation_split: default_validation_split(),
            test_split: default_test_split(),
            max_samples: None,
        }
    }
}

/// Field overrides for [`DataSettings`]; unset fields take the stock
/// defaults.
#[derive(Debug, Clone, Default)]
pub struct DataOverrides {
    pub data_dir: Option<PathBuf>,
    pub dataset_name: Option<String>,
    pub train_split: Option<String>,
    pub validation_split: Option<String>,
    pub test_split: Option<String>,
    pub max_samples: Option<usize>,
}

impl DataOverrides {
    #[must_use]
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn dataset_name(mut self, name: impl Into<String>) -> Self {
        self.dataset_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn train_split(mut self, split: impl Into<String>) -> Self {
        self.train_split = Some(split.into());
        self
    }

    #[must_use]
    pub fn validation_split(mut self, split: impl Into<String>) -> Self {
        self.validation_split = Some(split.into());
        self
    }

    #[must_use]
    pub fn test_split(mut self, split: impl Into<String>) -> Self {
        self.test_split = Some(split.into());
        self
    }

    #[must_use]
    pub fn max_samples(mut self, samples: usize) -> Self {
        self.max_samples = Some(samples);
        self
    }

    /// Resolve defaults and create the data directory.
    ///
    /// # Errors
    ///
    /// Propagates filesystem errors from directory creation.
    pub fn apply(self) -> Result<DataSettings> {
        let data_dir = self.data_dir.unwrap_or_else(default_data_dir);
        fs::create_dir_all(&data_dir)?;

        Ok(DataSettings {
            data_dir,
            dataset_name: self.dataset_name,
            train_split: self.train_split.unwrap_or_else(default_train_split),
            validation_split: self
                .validation_split
                .unwrap_or_else(default_validation_split),
            test_split: self.test_split.unwrap_or_else(default_test_split),
            max_samples: self.max_samples,
        })
    }
}

/// Default hub cache location, shared by the model cache and the hub home.
pub(crate) fn default_hub_cache() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cache")
        .join("huggingface")
}

fn default_model_id() -> String {
    "meta-llama/Llama-2-7b-hf".to_string()
}

fn default_device() -> String {
    "mps".to_string()
}

fn default_max_length() -> usize {
    512
}

fn default_batch_size() -> usize {
    8
}

fn default_precision() -> String {
    "float16".to_string()
}

fn default_learning_rate() -> f32 {
    2e-5
}

fn default_num_epochs() -> usize {
    3
}

fn default_warmup_steps() -> usize {
    500
}

fn default_weight_decay() -> f32 {
    0.01
}

fn default_logging_steps() -> usize {
    100
}

fn default_save_steps() -> usize {
    1000
}

fn default_eval_steps() -> usize {
    500
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./outputs")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_train_split() -> String {
    "train".to_string()
}

fn default_validation_split() -> String {
    "validation".to_string()
}

fn default_test_split() -> String {
    "test".to_string()
}
