use std::hash::Hash;

use log::{trace, warn};
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::error::{HuffError, Result};

/// Occurrence count per symbol. Entries are kept in order of first appearance so that
/// the tree built from the map is reproducible.
#[derive(Debug, Clone)]
pub struct FrequencyMap<S> {
    index: FxHashMap<S, usize>,
    entries: Vec<(S, u64)>,
}

impl<S: Eq + Hash + Clone> FrequencyMap<S> {
    pub fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            entries: vec![],
        }
    }

    /// Count one more occurrence of the symbol.
    pub fn add(&mut self, sym: &S) {
        self.add_count(sym, 1);
    }

    /// Add `count` occurrences of the symbol. A zero count is ignored.
    pub fn add_count(&mut self, sym: &S, count: u64) {
        if count == 0 {
            return;
        }
        match self.index.get(sym) {
            Some(&i) => self.entries[i].1 += count,
            None => {
                self.index.insert(sym.clone(), self.entries.len());
                self.entries.push((sym.clone(), count));
            }
        }
    }

    pub fn get(&self, sym: &S) -> Option<u64> {
        self.index.get(sym).map(|&i| self.entries[i].1)
    }

    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Iterate (symbol, count) in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&S, u64)> + '_ {
        self.entries.iter().map(|(sym, count)| (sym, *count))
    }

    /// Fold another map into this one. New symbols are appended in the other map's order.
    fn merge(mut self, other: Self) -> Self {
        for (sym, count) in &other.entries {
            self.add_count(sym, *count);
        }
        self
    }
}

impl<S: Eq + Hash + Clone> Default for FrequencyMap<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Two maps are equal when they hold the same counts, whatever order the symbols arrived in.
impl<S: Eq + Hash + Clone> PartialEq for FrequencyMap<S> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(sym, count)| other.get(sym) == Some(count))
    }
}

impl<S: Eq + Hash + Clone> FromIterator<(S, u64)> for FrequencyMap<S> {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut map = Self::new();
        iter.into_iter()
            .for_each(|(sym, count)| map.add_count(&sym, count));
        map
    }
}

/// Returns a frequency count of the input data. Uses parallelism when data set is over 64k.
///
/// Fails with `InsufficientAlphabet` when fewer than two distinct symbols are found, since
/// no binary code tree can be built from them.
pub fn freqs<S>(data: &[S]) -> Result<FrequencyMap<S>>
where
    S: Eq + Hash + Clone + Send + Sync,
{
    let map = if data.len() > 64_000 {
        // Chunks are reduced in order, so first appearance order matches the sequential count.
        data.par_chunks(16_000)
            .fold(FrequencyMap::new, |mut freqs, chunk| {
                chunk.iter().for_each(|sym| freqs.add(sym));
                freqs
            })
            .reduce(FrequencyMap::new, FrequencyMap::merge)
    } else {
        let mut freqs = FrequencyMap::new();
        data.iter().for_each(|sym| freqs.add(sym));
        freqs
    };

    if map.len() < 2 {
        warn!(
            "Input of {} symbols has only {} distinct symbol(s)",
            data.len(),
            map.len()
        );
        return Err(HuffError::InsufficientAlphabet {
            distinct: map.len(),
        });
    }
    trace!("Counted {} distinct symbols in {}", map.len(), data.len());
    Ok(map)
}
