//! Writes `manifest.json` for a directory of model artifacts.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin write_manifest -- [model_dir]
//! ```
//!
//! Every `*.json` artifact in the directory (except the manifest itself) is
//! hashed with SHA-256. Rerun after replacing any artifact.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use medpredict::adapters::Manifest;

fn main() -> Result<()> {
    let dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("models"));

    if !dir.is_dir() {
        anyhow::bail!("Model directory not found: {dir:?}");
    }

    let manifest =
        Manifest::build(&dir).with_context(|| format!("Failed to hash artifacts in {dir:?}"))?;
    let path = manifest
        .write(&dir)
        .with_context(|| format!("Failed to write manifest in {dir:?}"))?;

    for (file, digest) in &manifest.files {
        println!("{digest}  {file}");
    }
    println!("Wrote {}", path.display());
    Ok(())
}
