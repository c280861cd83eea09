//! Compile command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use quire_cqasm::{EmitterConfig, emit_with_config};
use quire_hal::validate_qobj;

use super::common::{load_config, load_qobj, write_output};

/// Execute the compile command.
pub async fn execute(
    input: &str,
    output: Option<&str>,
    config: Option<&str>,
    full_state_projection: bool,
    header_comment: Option<&str>,
) -> Result<()> {
    let backend = load_config(config)?;
    let qobj = load_qobj(input)?;
    validate_qobj(&qobj, &backend)
        .with_context(|| format!("Job rejected by backend '{}'", backend.backend_name))?;

    let mut emitter_config = EmitterConfig::default().with_full_state_projection(full_state_projection);
    if let Some(comment) = header_comment {
        emitter_config = emitter_config.with_header_comment(comment);
    }

    let programs = qobj
        .experiments
        .iter()
        .map(|experiment| {
            emit_with_config(experiment, &emitter_config)
                .with_context(|| format!("Failed to translate experiment '{}'", experiment.header.name))
        })
        .collect::<Result<Vec<_>>>()?;
    info!("Translated {} experiments from {}", programs.len(), input);

    match (output, programs.as_slice()) {
        (Some(path), [program]) => {
            write_output(Some(path), program)?;
            report(path);
        }
        (Some(path), programs) => {
            for (index, program) in programs.iter().enumerate() {
                let numbered = numbered_path(path, index);
                write_output(Some(&numbered), program)?;
                report(&numbered);
            }
        }
        (None, programs) => {
            for program in programs {
                write_output(None, program)?;
            }
        }
    }

    Ok(())
}

fn report(path: &str) {
    eprintln!("{} Wrote {}", style("✓").green().bold(), style(path).green());
}

/// `out.cq` becomes `out_0.cq`, `out_1.cq`, ...
fn numbered_path(path: &str, index: usize) -> String {
    let p = Path::new(path);
    let stem = p.file_stem().unwrap_or_default().to_string_lossy();
    let name = match p.extension() {
        Some(ext) => format!("{stem}_{index}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{index}"),
    };
    p.with_file_name(name).to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const QOBJ: &str = r#"{
        "qobj_id": "pair",
        "config": {"shots": 16},
        "experiments": [
            {"header": {"name": "a", "n_qubits": 1, "memory_slots": 1},
             "instructions": [{"name": "x", "qubits": [0]},
                              {"name": "measure", "qubits": [0], "memory": [0]}]},
            {"header": {"name": "b", "n_qubits": 1, "memory_slots": 1},
             "instructions": [{"name": "u1", "qubits": [0], "params": [0.5]}]}
        ]
    }"#;

    #[test]
    fn test_numbered_path() {
        assert_eq!(numbered_path("out.cq", 1), "out_1.cq");
        assert_eq!(numbered_path("dir/out", 0), "dir/out_0");
    }

    #[tokio::test]
    async fn test_compile_writes_numbered_programs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pair.json");
        fs::write(&input, QOBJ).unwrap();
        let output = dir.path().join("pair.cq");

        execute(
            input.to_str().unwrap(),
            output.to_str(),
            None,
            false,
            Some("test run"),
        )
        .await
        .unwrap();

        let first = fs::read_to_string(dir.path().join("pair_0.cq")).unwrap();
        assert_eq!(first, "version 1.0\n# test run\nqubits 1\nX q[0]\nmeasure q[0]\n");
        let second = fs::read_to_string(dir.path().join("pair_1.cq")).unwrap();
        assert!(second.ends_with("Rz q[0], 0.500000\n"));
    }

    #[tokio::test]
    async fn test_compile_rejects_invalid_job() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("big.json");
        fs::write(&input, QOBJ.replace(r#""shots": 16"#, r#""shots": 0"#)).unwrap();

        let err = execute(input.to_str().unwrap(), None, None, true, None)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("Invalid shots (number_of_shots=0)"));
    }
}
