//! Diagramas CLI
//!
//! Batch diagram generation from Mermaid sources.
//!
//! # Usage
//!
//! ```bash
//! # Render every .mmd file under docs/mermaid as PDF
//! diagramas
//!
//! # PNG and SVG versions for web use
//! diagramas -f png svg
//!
//! # A single file, on a white background
//! diagramas --file docs/mermaid/pipeline.mmd -b white
//! ```

use clap::Parser;
use entorno::diagram::{find_diagram_files, DiagramArgs, Renderer};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = DiagramArgs::parse();

    // Configure output based on verbose/quiet flags
    let level = if args.quiet {
        LogLevel::Quiet
    } else if args.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    match run(&args, level) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum LogLevel {
    Quiet,
    Normal,
    Verbose,
}

fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}

/// Returns `Ok(true)` for a clean run, `Ok(false)` for the exit-code-1
/// cases: missing renderer, missing `--file`, or zero successful renders.
fn run(args: &DiagramArgs, level: LogLevel) -> entorno::Result<bool> {
    let renderer = Renderer::new();
    if !renderer.is_available() {
        eprintln!("Error: mermaid-cli ({}) not found!", renderer.program());
        eprintln!("Install it with: npm install -g @mermaid-js/mermaid-cli");
        return Ok(false);
    }

    let files = match &args.file {
        Some(file) => {
            if !file.exists() {
                eprintln!("Error: File not found: {}", file.display());
                return Ok(false);
            }
            vec![file.clone()]
        }
        None => {
            if !args.input_dir.exists() {
                log(
                    level,
                    LogLevel::Normal,
                    &format!("Creating input directory: {}", args.input_dir.display()),
                );
                std::fs::create_dir_all(&args.input_dir)?;
            }
            find_diagram_files(&args.input_dir)?
        }
    };

    if files.is_empty() {
        log(
            level,
            LogLevel::Normal,
            &format!("No .mmd files found in {}", args.input_dir.display()),
        );
        return Ok(true);
    }

    log(
        level,
        LogLevel::Normal,
        &format!("Found {} Mermaid file(s)", files.len()),
    );

    let total = files.len() * args.formats.len();
    let mut generated = 0usize;

    for file in &files {
        for format in &args.formats {
            match renderer.render(file, &args.output_dir, *format, &args.background) {
                Ok(output) => {
                    generated += 1;
                    log(
                        level,
                        LogLevel::Verbose,
                        &format!("  {} -> {}", file.display(), output.display()),
                    );
                }
                Err(e) => {
                    eprintln!("Failed: {e}");
                }
            }
        }
    }

    log(
        level,
        LogLevel::Normal,
        &format!("Generated {generated}/{total} diagram(s)"),
    );

    Ok(generated > 0)
}
