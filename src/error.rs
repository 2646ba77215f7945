//! Error types for Entorno

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidEnvVar {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Diagram renderer not found: {program} (install with: npm install -g @mermaid-js/mermaid-cli)")]
    RendererNotFound { program: String },

    #[error("Rendering {} failed: {stderr}", .input.display())]
    RenderFailed { input: PathBuf, stderr: String },
}

pub type Result<T> = std::result::Result<T, Error>;
