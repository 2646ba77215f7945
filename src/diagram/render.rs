//! Renderer invocation and diagram discovery
//!
//! Wraps the external mermaid-cli executable (`mmdc`). Every render is one
//! blocking subprocess call; there is no retry and no timeout.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Output format for rendered diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Pdf,
    Png,
    Svg,
}

impl OutputFormat {
    /// File extension for this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            _ => Err(format!(
                "Unknown output format: {s}. Valid formats: pdf, png, svg"
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Invokes the external mermaid-cli renderer.
#[derive(Debug, Clone)]
pub struct Renderer {
    program: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            program: "mmdc".to_string(),
        }
    }
}

impl Renderer {
    /// Renderer using the stock `mmdc` executable.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer using an alternative executable.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Name of the renderer executable.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether the renderer executable is installed and runnable.
    #[must_use]
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Render one diagram file into `output_dir`.
    ///
    /// Creates `output_dir` if missing. The output file takes the input's
    /// stem and the format's extension.
    ///
    /// # Errors
    ///
    /// `RendererNotFound` when the executable cannot be spawned,
    /// `RenderFailed` (carrying stderr) when it exits non-zero, `Io` for
    /// directory-creation failures.
    pub fn render(
        &self,
        input: &Path,
        output_dir: &Path,
        format: OutputFormat,
        background: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(output_dir)?;
        let output_file = output_path(input, output_dir, format);

        let output = Command::new(&self.program)
            .arg("-i")
            .arg(input)
            .arg("-o")
            .arg(&output_file)
            .arg("-b")
            .arg(background)
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => Error::RendererNotFound {
                    program: self.program.clone(),
                },
                _ => Error::Io(e),
            })?;

        if !output.status.success() {
            return Err(Error::RenderFailed {
                input: input.to_path_buf(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output_file)
    }
}

/// Output path for `input` rendered as `format` into `output_dir`.
#[must_use]
pub fn output_path(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(format.extension());
    output_dir.join(name)
}

/// All `.mmd` files under `dir`, recursively, sorted for stable output.
///
/// # Errors
///
/// Propagates filesystem errors, including a missing `dir`.
pub fn find_diagram_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_diagram_files(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_diagram_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_diagram_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "mmd") {
            files.push(path);
        }
    }
    Ok(())
}
