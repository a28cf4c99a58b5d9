//! Generate FORMULAS.md from the formula registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-formulas
//! RUST_LOG=debug cargo run --bin gen-formulas
//! ```
//!
//! The generated file is written to `civil_core/src/equations/FORMULAS.md`.

use std::fs;
use std::path::Path;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use civil_core::equations::{generate_formulas_markdown, ALL_FORMULAS};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!(formulas = ALL_FORMULAS.len(), "generating FORMULAS.md");

    let markdown = generate_formulas_markdown();

    // Relative to workspace root
    let output_path = Path::new("civil_core/src/equations/FORMULAS.md");

    match fs::write(output_path, &markdown) {
        Ok(()) => {
            info!(bytes = markdown.len(), path = %output_path.display(), "FORMULAS.md has been updated");
        }
        Err(e) => {
            error!(path = %output_path.display(), "error writing file: {}", e);
            std::process::exit(1);
        }
    }
}
