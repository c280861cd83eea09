//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use quire_hal::BackendConfiguration;
use quire_ir::{Experiment, Qobj, QobjConfig};

/// Read a file to a string.
pub fn read_file(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
}

/// Load the backend configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&str>) -> Result<BackendConfiguration> {
    match path {
        Some(path) => BackendConfiguration::from_json(&read_file(path)?)
            .with_context(|| format!("Invalid backend configuration: {path}")),
        None => Ok(BackendConfiguration::default()),
    }
}

/// Load a Qobj job; a bare experiment becomes a single-shot job.
pub fn load_qobj(path: &str) -> Result<Qobj> {
    let source = read_file(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&source).with_context(|| format!("Invalid JSON: {path}"))?;

    if value.get("experiments").is_some() {
        return Qobj::from_json(&source).with_context(|| format!("Invalid Qobj: {path}"));
    }

    let experiment =
        Experiment::from_json(&source).with_context(|| format!("Invalid experiment: {path}"))?;
    let qobj_id = Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Qobj {
        qobj_id,
        config: QobjConfig {
            shots: 1,
            memory: false,
        },
        experiments: vec![experiment],
    })
}

/// Load a single experiment.
pub fn load_experiment(path: &str) -> Result<Experiment> {
    Experiment::from_json(&read_file(path)?).with_context(|| format!("Invalid experiment: {path}"))
}

/// Load per-shot register values from a JSON array.
pub fn load_raw_data(path: &str) -> Result<Vec<u64>> {
    serde_json::from_str(&read_file(path)?)
        .with_context(|| format!("Expected a JSON array of register values: {path}"))
}

/// Write `content` to a file, or to stdout when no path is given.
pub fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write file: {path}"))
        }
        None => {
            print!("{content}");
            Ok(())
        }
    }
}
