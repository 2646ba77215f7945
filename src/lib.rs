//! # Entorno: Environment-Derived Application Settings
//!
//! Entorno assembles the settings of a model-serving and training stack
//! from environment variables and fixed defaults, and ships a small CLI
//! (`diagramas`) that renders Mermaid diagram sources into image files via
//! the external mermaid-cli renderer.
//!
//! ## Architecture
//!
//! - **settings**: immutable-after-construction settings records, an
//!   explicit environment snapshot, and a lazily-initialized provider
//! - **diagram**: `.mmd` discovery and sequential renderer invocation
//! - **error**: crate error type

pub mod diagram;
pub mod error;
pub mod settings;

// Re-export commonly used types
pub use error::{Error, Result};
pub use settings::{EnvSnapshot, Settings, SettingsProvider};
