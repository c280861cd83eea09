//! Raw backend results and their conversion to classical outcomes.

use std::fmt;

use rand::Rng;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HalError, HalResult};
use crate::histogram::{Counts, Probabilities, to_hex};
use crate::measurement::MeasurementMap;

/// Seed reported in every experiment result.
pub const RESULT_SEED: u64 = 42;

/// Full-register histogram exactly as the backend returned it.
///
/// Keys are decimal register values (`"0"`, `"3"`). Entries keep their
/// document order, which the single-shot sampling in
/// [`convert_result_data`] depends on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawHistogram(Vec<(u64, f64)>);

impl RawHistogram {
    /// Create a histogram from `(register value, probability)` entries.
    pub fn new(entries: Vec<(u64, f64)>) -> Self {
        Self(entries)
    }

    /// Entries in document order.
    pub fn entries(&self) -> &[(u64, f64)] {
        &self.0
    }

    /// Check if the histogram has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Serialize for RawHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (register, probability) in &self.0 {
            map.serialize_entry(&register.to_string(), probability)?;
        }
        map.end()
    }
}

struct RawHistogramVisitor;

impl<'de> Visitor<'de> for RawHistogramVisitor {
    type Value = RawHistogram;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map from decimal register values to probabilities")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, probability)) = access.next_entry::<String, f64>()? {
            let register = key
                .trim()
                .parse::<u64>()
                .map_err(|_| de::Error::custom(format!("invalid register value '{key}'")))?;
            entries.push((register, probability));
        }
        Ok(RawHistogram(entries))
    }
}

impl<'de> Deserialize<'de> for RawHistogram {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RawHistogramVisitor)
    }
}

fn nullable_histogram<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RawHistogram, D::Error> {
    Ok(Option::<RawHistogram>::deserialize(deserializer)?.unwrap_or_default())
}

/// A result record fetched from the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    /// Result identifier, also used to fetch per-shot data.
    pub id: u64,
    /// Probability per full register value.
    #[serde(default, deserialize_with = "nullable_histogram")]
    pub histogram: RawHistogram,
    /// Width of the simulated register.
    pub number_of_qubits: u32,
    /// Execution time reported by the backend.
    #[serde(default)]
    pub execution_time_in_seconds: f64,
    /// Backend diagnostics.
    #[serde(default)]
    pub raw_text: Option<String>,
}

impl RawResult {
    /// Parse a result record from JSON.
    pub fn from_json(json: &str) -> HalResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The histogram, or the backend diagnostics when there is none.
    pub fn checked_histogram(&self) -> HalResult<&RawHistogram> {
        if self.histogram.is_empty() {
            return Err(HalError::MissingHistogram(
                self.raw_text.clone().unwrap_or_default(),
            ));
        }
        Ok(&self.histogram)
    }
}

/// Classical-state probabilities for a raw result.
///
/// Register values landing on the same classical state have their
/// probabilities added.
pub fn convert_histogram(result: &RawResult, map: &MeasurementMap) -> HalResult<Probabilities> {
    let histogram = result.checked_histogram()?;
    Ok(histogram
        .entries()
        .iter()
        .map(|&(register, probability)| (map.to_classical(register), probability))
        .collect())
}

/// Counts and per-shot memory for a raw result.
///
/// With per-shot samples the memory lists each shot's classical state and
/// the counts tally them. Without samples a single shot is drawn from the
/// raw histogram using `rng`.
pub fn convert_result_data<R: Rng>(
    result: &RawResult,
    map: &MeasurementMap,
    raw_data: &[u64],
    rng: &mut R,
) -> HalResult<(Counts, Vec<String>)> {
    if !raw_data.is_empty() {
        let states: Vec<u64> = raw_data.iter().map(|&r| map.to_classical(r)).collect();
        let memory = states.iter().map(|&s| to_hex(s)).collect();
        let counts = states.into_iter().map(|s| (s, 1)).collect();
        return Ok((counts, memory));
    }

    let register = sample_register(result.checked_histogram()?, rng)?;
    let state = map.to_classical(register);
    debug!("Sampled register {} as classical state {}", register, to_hex(state));

    let counts = std::iter::once((state, 1)).collect();
    Ok((counts, vec![to_hex(state)]))
}

/// Pick the first entry whose cumulative probability exceeds a uniform draw.
///
/// Falls back to the last entry when rounding leaves the total mass at or
/// below the draw.
fn sample_register<R: Rng>(histogram: &RawHistogram, rng: &mut R) -> HalResult<u64> {
    let draw: f64 = rng.gen_range(0.0..1.0);
    let mut cumulative = 0.0;
    for &(register, probability) in histogram.entries() {
        cumulative += probability;
        if draw < cumulative {
            return Ok(register);
        }
    }
    histogram
        .entries()
        .last()
        .map(|&(register, _)| register)
        .ok_or_else(|| HalError::MissingHistogram(String::new()))
}

/// Header echoed back in every experiment result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultHeader {
    /// Experiment name.
    pub name: String,
    /// Width of the classical register.
    pub memory_slots: u32,
    /// Classical registers as `(name, size)` pairs.
    #[serde(default)]
    pub creg_sizes: Vec<(String, u32)>,
}

/// Data submitted alongside each experiment and read back with its result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    /// Experiment header.
    #[serde(flatten)]
    pub header: ResultHeader,
    /// Measurement map of the experiment.
    pub measurements: MeasurementMap,
}

impl UserData {
    /// Build the user data for an experiment.
    pub fn for_experiment(experiment: &quire_ir::Experiment) -> Self {
        Self {
            header: ResultHeader {
                name: experiment.header.name.clone(),
                memory_slots: experiment.header.memory_slots,
                creg_sizes: experiment.header.creg_sizes.clone(),
            },
            measurements: MeasurementMap::from_experiment(experiment),
        }
    }
}

/// Classical outcomes of one experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResultData {
    /// Shot count per classical state.
    pub counts: Counts,
    /// Probability per classical state.
    pub probabilities: Probabilities,
    /// Classical state of every shot, as hex.
    pub memory: Vec<String>,
}

/// Result of one experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    /// Experiment name.
    pub name: String,
    /// Reported seed.
    pub seed: u64,
    /// Requested shots.
    pub shots: u32,
    /// Outcomes.
    pub data: ExperimentResultData,
    /// Status text.
    pub status: String,
    /// Whether the experiment succeeded.
    pub success: bool,
    /// Execution time in seconds.
    pub time_taken: f64,
    /// Header from the submitted user data.
    pub header: ResultHeader,
}

impl ExperimentResult {
    /// Assemble the result of one experiment from its raw result record.
    pub fn from_raw<R: Rng>(
        name: impl Into<String>,
        shots: u32,
        result: &RawResult,
        user_data: UserData,
        raw_data: &[u64],
        rng: &mut R,
    ) -> HalResult<Self> {
        result.checked_histogram()?;
        user_data.measurements.validate()?;

        let (counts, memory) = convert_result_data(result, &user_data.measurements, raw_data, rng)?;
        let probabilities = convert_histogram(result, &user_data.measurements)?;

        Ok(Self {
            name: name.into(),
            seed: RESULT_SEED,
            shots,
            data: ExperimentResultData {
                counts,
                probabilities,
                memory,
            },
            status: "DONE".to_string(),
            success: true,
            time_taken: result.execution_time_in_seconds,
            header: user_data.header,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    fn raw(histogram: &str) -> RawResult {
        RawResult::from_json(&format!(
            r#"{{"id": 7, "histogram": {histogram}, "number_of_qubits": 3,
                "execution_time_in_seconds": 2.5, "raw_text": "no errors"}}"#
        ))
        .unwrap()
    }

    /// An RNG whose `gen_range(0.0..1.0)` lands close to `u`.
    fn fixed_draw(u: f64) -> StepRng {
        // Float sampling reads the high bits of a single u64.
        let bits = (u * (1u64 << 53) as f64) as u64;
        StepRng::new(bits << 11, 0)
    }

    #[test]
    fn test_raw_histogram_keeps_document_order() {
        let result = raw(r#"{"5": 0.1, "0": 0.2, "3": 0.7}"#);
        assert_eq!(result.histogram.entries(), &[(5, 0.1), (0, 0.2), (3, 0.7)]);
        assert_eq!(result.execution_time_in_seconds, 2.5);
    }

    #[test]
    fn test_raw_histogram_rejects_bad_key() {
        assert!(RawResult::from_json(r#"{"id": 1, "histogram": {"x": 1.0}, "number_of_qubits": 1}"#).is_err());
    }

    #[test]
    fn test_missing_histogram() {
        for histogram in ["{}", "null"] {
            let result = raw(histogram);
            let err = convert_histogram(&result, &MeasurementMap::identity(3, 3)).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Result from backend contains no histogram data!\nno errors"
            );
        }
    }

    #[test]
    fn test_convert_histogram_aggregates() {
        // qubit 2 -> bit 0; qubits 0 and 1 unmeasured
        let map = MeasurementMap::new(vec![(2, 0)], 1);
        let result = raw(r#"{"0": 0.25, "1": 0.25, "4": 0.25, "7": 0.25}"#);
        let probabilities = convert_histogram(&result, &map).unwrap();
        assert_eq!(probabilities.len(), 2);
        assert_eq!(probabilities.get(0), Some(&0.5));
        assert_eq!(probabilities.get(1), Some(&0.5));
    }

    #[test]
    fn test_convert_histogram_hex_output() {
        let map = MeasurementMap::new(vec![(0, 1), (1, 0)], 2);
        let result = raw(r#"{"1": 0.6, "2": 0.4}"#);
        let probabilities = convert_histogram(&result, &map).unwrap();
        let json = serde_json::to_string(&probabilities).unwrap();
        assert_eq!(json, r#"{"0x1":0.4,"0x2":0.6}"#);
    }

    #[test]
    fn test_convert_result_data_with_raw_data() {
        let map = MeasurementMap::identity(2, 2);
        let result = raw(r#"{"0": 0.5, "3": 0.5}"#);
        let mut rng = StdRng::seed_from_u64(1);
        let (counts, memory) = convert_result_data(&result, &map, &[0, 3, 3, 1], &mut rng).unwrap();
        assert_eq!(memory, vec!["0x0", "0x3", "0x3", "0x1"]);
        assert_eq!(counts.get(3), Some(&2));
        assert_eq!(counts.total_shots(), 4);
    }

    #[test]
    fn test_single_shot_sampling_walks_document_order() {
        // probabilities 0.2, 0.4, 0.1, 0.3 in document order
        let result = raw(r#"{"0": 0.2, "3": 0.4, "5": 0.1, "6": 0.3}"#);
        let map = MeasurementMap::identity(3, 3);
        let cases = [(0.1, "0x0"), (0.3, "0x3"), (0.65, "0x5"), (0.9, "0x6")];
        for (u, expected) in cases {
            let (counts, memory) =
                convert_result_data(&result, &map, &[], &mut fixed_draw(u)).unwrap();
            assert_eq!(memory, vec![expected], "draw {u}");
            assert_eq!(counts.total_shots(), 1);
        }
    }

    #[test]
    fn test_single_shot_falls_back_to_last_entry() {
        let result = raw(r#"{"1": 0.25, "2": 0.25}"#);
        let map = MeasurementMap::identity(3, 3);
        let (_, memory) = convert_result_data(&result, &map, &[], &mut fixed_draw(0.75)).unwrap();
        assert_eq!(memory, vec!["0x2"]);
    }

    #[test]
    fn test_user_data_json_shape() {
        let user_data: UserData = serde_json::from_str(
            r#"{"name": "bell", "memory_slots": 2, "creg_sizes": [["c", 2]],
                "measurements": {"measurements": [[0, 0], [1, 1]], "number_of_clbits": 2}}"#,
        )
        .unwrap();
        assert_eq!(user_data.header.name, "bell");
        assert_eq!(user_data.measurements, MeasurementMap::identity(2, 2));
    }

    #[test]
    fn test_experiment_result_from_raw() {
        let result = raw(r#"{"0": 0.5, "3": 0.5}"#);
        let user_data = UserData {
            header: ResultHeader {
                name: "bell".into(),
                memory_slots: 2,
                creg_sizes: vec![("c".into(), 2)],
            },
            measurements: MeasurementMap::identity(2, 2),
        };
        let mut rng = StdRng::seed_from_u64(42);
        let experiment =
            ExperimentResult::from_raw("bell", 4, &result, user_data, &[0, 3, 3, 0], &mut rng)
                .unwrap();
        assert_eq!(experiment.seed, 42);
        assert_eq!(experiment.status, "DONE");
        assert!(experiment.success);
        assert_eq!(experiment.time_taken, 2.5);
        assert_eq!(experiment.data.counts.get(0), Some(&2));
        assert_eq!(experiment.data.probabilities.get(3), Some(&0.5));
        assert_eq!(experiment.header.memory_slots, 2);
    }
}
