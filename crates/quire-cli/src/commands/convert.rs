//! Convert command implementation.

use anyhow::{Context, Result};
use console::style;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use quire_hal::{ExperimentResult, RawResult, UserData, to_hex};

use super::common::{load_experiment, load_raw_data, read_file, write_output};

/// Execute the convert command.
pub async fn execute(
    input: &str,
    experiment: &str,
    raw_data: Option<&str>,
    seed: Option<u64>,
    output: Option<&str>,
) -> Result<()> {
    let result = RawResult::from_json(&read_file(input)?)
        .with_context(|| format!("Invalid raw result: {input}"))?;
    let experiment = load_experiment(experiment)?;
    let raw_data = raw_data.map(load_raw_data).transpose()?.unwrap_or_default();

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    debug!(
        "Converting result {} with {} histogram entries and {} shots of raw data",
        result.id,
        result.histogram.len(),
        raw_data.len()
    );

    let shots = u32::try_from(raw_data.len()).unwrap_or(u32::MAX).max(1);
    let converted = ExperimentResult::from_raw(
        experiment.header.name.clone(),
        shots,
        &result,
        UserData::for_experiment(&experiment),
        &raw_data,
        &mut rng,
    )?;
    info!(
        "Converted '{}' into {} classical states",
        converted.name,
        converted.data.probabilities.len()
    );

    let json = serde_json::to_string_pretty(&converted)?;
    write_output(output, &format!("{json}\n"))?;
    if let Some(path) = output {
        eprintln!("{} Wrote {}", style("✓").green().bold(), style(path).green());
    }
    if let Some((state, count)) = converted.data.counts.most_frequent() {
        eprintln!(
            "  Most frequent: {} ({} of {} shots)",
            style(to_hex(state)).cyan(),
            count,
            converted.data.counts.total_shots()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_convert_with_raw_data() {
        let dir = tempfile::tempdir().unwrap();
        let result = dir.path().join("result.json");
        let experiment = dir.path().join("bell.json");
        let shots = dir.path().join("shots.json");
        let output = dir.path().join("out.json");

        fs::write(
            &result,
            r#"{"id": 1, "histogram": {"0": 0.5, "3": 0.5}, "number_of_qubits": 2,
                "execution_time_in_seconds": 0.1}"#,
        )
        .unwrap();
        fs::write(
            &experiment,
            r#"{"header": {"name": "bell", "n_qubits": 2, "memory_slots": 2},
                "instructions": [{"name": "h", "qubits": [0]},
                                 {"name": "cx", "qubits": [0, 1]},
                                 {"name": "measure", "qubits": [0], "memory": [0]},
                                 {"name": "measure", "qubits": [1], "memory": [1]}]}"#,
        )
        .unwrap();
        fs::write(&shots, "[0, 3, 3]").unwrap();

        execute(
            result.to_str().unwrap(),
            experiment.to_str().unwrap(),
            shots.to_str(),
            Some(1),
            output.to_str(),
        )
        .await
        .unwrap();

        let converted: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(converted["shots"], 3);
        assert_eq!(converted["data"]["counts"], serde_json::json!({"0x0": 1, "0x3": 2}));
        assert_eq!(
            converted["data"]["memory"],
            serde_json::json!(["0x0", "0x3", "0x3"])
        );
        assert_eq!(converted["header"]["name"], "bell");
    }

    #[tokio::test]
    async fn test_convert_without_histogram() {
        let dir = tempfile::tempdir().unwrap();
        let result = dir.path().join("result.json");
        let experiment = dir.path().join("one.json");
        fs::write(
            &result,
            r#"{"id": 1, "histogram": {}, "number_of_qubits": 1, "raw_text": "queue timeout"}"#,
        )
        .unwrap();
        fs::write(
            &experiment,
            r#"{"header": {"name": "one", "n_qubits": 1, "memory_slots": 1}, "instructions": []}"#,
        )
        .unwrap();

        let err = execute(
            result.to_str().unwrap(),
            experiment.to_str().unwrap(),
            None,
            Some(0),
            None,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("no histogram data!\nqueue timeout"));
    }
}
