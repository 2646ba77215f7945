//! Application settings
//!
//! This module assembles application settings from environment variables
//! and fixed defaults into immutable-after-construction records:
//! [`ModelSettings`], [`TrainingSettings`], and [`DataSettings`], composed
//! by [`Settings`] together with the runtime flags. A [`SettingsProvider`]
//! holds the single shared instance and rebuilds it on demand.
//!
//! # Example
//!
//! ```no_run
//! use entorno::settings::{SettingsProvider, SettingsOverrides, EnvSnapshot};
//!
//! // Shared instance, lazily constructed from the live environment.
//! let provider = SettingsProvider::new();
//! let settings = provider.get()?;
//! assert!(settings.hub_home.is_dir());
//!
//! // Explicit construction from a snapshot, e.g. in tests.
//! let snapshot = EnvSnapshot::empty();
//! let settings = SettingsOverrides::default()
//!     .env("staging")
//!     .apply_with(&snapshot)?;
//! assert_eq!(settings.api_port, 8000);
//! # Ok::<(), entorno::Error>(())
//! ```

mod app;
mod env;
mod provider;
mod schema;

#[cfg(test)]
mod tests;

#[cfg(test)]
mod property_tests;

pub use app::{Settings, SettingsOverrides};
pub use env::EnvSnapshot;
pub use provider::SettingsProvider;
pub use schema::{
    DataOverrides, DataSettings, ModelOverrides, ModelSettings, TrainingOverrides,
    TrainingSettings,
};
