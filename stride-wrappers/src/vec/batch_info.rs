use std::collections::{hash_map::Keys, HashMap};
use stride_core::{Info, InfoValue};

/// Info of a batch of environments.
///
/// Each key maps to one entry per environment. An entry is `None` if the environment at
/// that index did not report the key.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchInfo<O> {
    num_envs: usize,
    entries: HashMap<String, Vec<Option<InfoValue<O>>>>,
}

impl<O> BatchInfo<O> {
    /// Creates an empty batch info for `num_envs` environments.
    pub fn new(num_envs: usize) -> Self {
        Self {
            num_envs,
            entries: HashMap::new(),
        }
    }

    /// The number of environments.
    pub fn num_envs(&self) -> usize {
        self.num_envs
    }

    /// Returns an iterator over the keys reported by any environment.
    pub fn keys(&self) -> Keys<'_, String, Vec<Option<InfoValue<O>>>> {
        self.entries.keys()
    }

    /// Merges the info of the environment at index `ix`.
    ///
    /// Panics if `ix` is not less than the number of environments.
    pub fn add(&mut self, ix: usize, info: Info<O>) {
        assert!(
            ix < self.num_envs,
            "Index {} is out of the batch of {} environments",
            ix,
            self.num_envs
        );
        let num_envs = self.num_envs;

        for (k, v) in info {
            let entry = self
                .entries
                .entry(k)
                .or_insert_with(|| (0..num_envs).map(|_| None).collect());
            entry[ix] = Some(v);
        }
    }

    /// Entries of a key, one per environment.
    pub fn get(&self, k: &str) -> Option<&[Option<InfoValue<O>>]> {
        self.entries.get(k).map(|v| v.as_slice())
    }

    /// The value of a key reported by the environment at index `ix`.
    pub fn get_at(&self, k: &str, ix: usize) -> Option<&InfoValue<O>> {
        self.entries.get(k).and_then(|v| v.get(ix)).and_then(|v| v.as_ref())
    }

    /// Flags denoting which environments reported the key.
    pub fn mask(&self, k: &str) -> Vec<bool> {
        match self.entries.get(k) {
            Some(v) => v.iter().map(|e| e.is_some()).collect(),
            None => vec![false; self.num_envs],
        }
    }
}

impl<O: Clone> BatchInfo<O> {
    /// Reconstructs the info of the environment at index `ix`.
    pub fn slot(&self, ix: usize) -> Info<O> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.get(ix).and_then(|e| e.clone()).map(|e| (k.clone(), e)))
            .collect()
    }
}
