//! Target allocation: symbol → target fraction of total portfolio value.

use rustc_hash::FxHashMap;

use crate::error::RebalanceError;

/// Maximum allowed distance between the sum of target fractions and 1.0.
pub const ALLOCATION_TOLERANCE: f64 = 1e-9;

/// Target fractions per symbol, in insertion order.
///
/// Symbols not present have an implicit target of 0. Inserting a symbol
/// twice replaces its weight but keeps its original position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetAllocation {
    weights: Vec<(String, f64)>,
    index: FxHashMap<String, usize>,
}

impl TargetAllocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, symbol: &str, weight: f64) -> Self {
        self.insert(symbol, weight);
        self
    }

    /// Set the target fraction for `symbol` (last write wins).
    pub fn insert(&mut self, symbol: &str, weight: f64) {
        match self.index.get(symbol) {
            Some(&i) => self.weights[i].1 = weight,
            None => {
                self.index.insert(symbol.to_string(), self.weights.len());
                self.weights.push((symbol.to_string(), weight));
            }
        }
    }

    /// Target fraction for `symbol`, 0 if absent.
    #[inline]
    pub fn weight(&self, symbol: &str) -> f64 {
        self.index
            .get(symbol)
            .map(|&i| self.weights[i].1)
            .unwrap_or(0.0)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    /// (symbol, fraction) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(s, w)| (s.as_str(), *w))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of all target fractions.
    pub fn sum(&self) -> f64 {
        self.weights.iter().map(|(_, w)| w).sum()
    }

    /// Check that fractions sum to 1 within [`ALLOCATION_TOLERANCE`].
    ///
    /// A NaN or infinite fraction makes the sum non-finite and fails.
    pub fn validate(&self) -> Result<(), RebalanceError> {
        let sum = self.sum();
        if (sum - 1.0).abs() <= ALLOCATION_TOLERANCE {
            Ok(())
        } else {
            Err(RebalanceError::InvalidAllocation { sum })
        }
    }
}

impl<'a> FromIterator<(&'a str, f64)> for TargetAllocation {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        let mut allocation = TargetAllocation::new();
        for (symbol, weight) in iter {
            allocation.insert(symbol, weight);
        }
        allocation
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TargetAllocation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.weights.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TargetAllocation {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs: Vec<(String, f64)> = Vec::deserialize(deserializer)?;
        Ok(pairs.iter().map(|(s, w)| (s.as_str(), *w)).collect())
    }
}
