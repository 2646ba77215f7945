//! Mermaid diagram generation
//!
//! Converts `.mmd` diagram descriptions into image files by shelling out
//! to the mermaid-cli renderer (`mmdc`), one blocking invocation per file
//! and format, strictly sequentially.
//!
//! Requires Node.js with `@mermaid-js/mermaid-cli` installed globally:
//!
//! ```bash
//! npm install -g @mermaid-js/mermaid-cli
//! ```

mod cli;
mod render;


pub use cli::DiagramArgs;
pub use render::{find_diagram_files, output_path, OutputFormat, Renderer};
