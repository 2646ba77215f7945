//! CLI argument parsing for the diagram generator
//!
//! # Usage
//!
//! ```bash
//! diagramas
//! diagramas -i docs/mermaid -o docs/diagrams
//! diagramas -f pdf png --background white
//! diagramas --file docs/mermaid/architecture.mmd
//! ```

use clap::Parser;
use std::path::PathBuf;

use super::render::OutputFormat;

/// Generate diagrams from Mermaid files
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "diagramas")]
#[command(version)]
#[command(about = "Generate PDF/PNG/SVG diagrams from Mermaid (.mmd) files via mermaid-cli")]
pub struct DiagramArgs {
    /// Directory containing .mmd files
    #[arg(short, long, default_value = "docs/mermaid")]
    pub input_dir: PathBuf,

    /// Directory to save generated diagrams
    #[arg(short, long, default_value = "docs/diagrams")]
    pub output_dir: PathBuf,

    /// Output formats (pdf, png, svg)
    #[arg(short, long, num_args = 1.., default_values_t = [OutputFormat::Pdf])]
    pub formats: Vec<OutputFormat>,

    /// Background color (transparent, white, ...)
    #[arg(short, long, default_value = "transparent")]
    pub background: String,

    /// Process a single file instead of the input directory
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}
