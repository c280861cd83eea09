//! Classical-state histograms.
//!
//! States are kept as integers and ordered by value; on the wire they are
//! lower case `0x`-prefixed hex strings (`0x0`, `0x1a`).

use std::collections::BTreeMap;
use std::ops::AddAssign;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Render a classical state as a hex key.
///
/// ```rust
/// use quire_hal::histogram::to_hex;
///
/// assert_eq!(to_hex(0), "0x0");
/// assert_eq!(to_hex(26), "0x1a");
/// ```
pub fn to_hex(state: u64) -> String {
    format!("{state:#x}")
}

/// Mapping from classical state to an accumulated value.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram<V> {
    entries: BTreeMap<u64, V>,
}

/// Probability per classical state.
pub type Probabilities = Histogram<f64>;

/// Shot count per classical state.
pub type Counts = Histogram<u64>;

impl<V> Default for Histogram<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V> Histogram<V> {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct states.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no state was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value recorded for a state.
    pub fn get(&self, state: u64) -> Option<&V> {
        self.entries.get(&state)
    }

    /// Check if a state was recorded.
    pub fn contains(&self, state: u64) -> bool {
        self.entries.contains_key(&state)
    }

    /// Iterate over states in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &V)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// States in ascending order.
    pub fn states(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.keys().copied()
    }
}

impl<V: AddAssign + Default> Histogram<V> {
    /// Add `amount` to the value of `state`.
    pub fn add(&mut self, state: u64, amount: V) {
        *self.entries.entry(state).or_default() += amount;
    }
}

impl Histogram<f64> {
    /// Sum of all probabilities.
    pub fn total(&self) -> f64 {
        self.entries.values().sum()
    }
}

impl Histogram<u64> {
    /// Total number of shots.
    pub fn total_shots(&self) -> u64 {
        self.entries.values().sum()
    }

    /// The state observed most often; ties go to the lowest state.
    pub fn most_frequent(&self) -> Option<(u64, u64)> {
        self.entries
            .iter()
            .fold(None, |best: Option<(u64, u64)>, (&state, &count)| match best {
                Some((_, c)) if c >= count => best,
                _ => Some((state, count)),
            })
    }
}

impl<V: AddAssign + Default> FromIterator<(u64, V)> for Histogram<V> {
    fn from_iter<I: IntoIterator<Item = (u64, V)>>(iter: I) -> Self {
        let mut histogram = Self::new();
        for (state, amount) in iter {
            histogram.add(state, amount);
        }
        histogram
    }
}

impl<V: Serialize> Serialize for Histogram<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (state, value) in &self.entries {
            map.serialize_entry(&to_hex(*state), value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Histogram<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, V>::deserialize(deserializer)?;
        let mut entries = BTreeMap::new();
        for (key, value) in raw {
            let state = quire_ir::wire::parse_hex("histogram", &key).map_err(de::Error::custom)?;
            entries.insert(state, value);
        }
        Ok(Self { entries })
    }
}
