//! Case-insensitive path indices.

use std::collections::HashMap;

/// Maps lower-cased paths to positions in the resource list.
///
/// Built by inserting in discovery order, so a later resource with the same
/// key replaces an earlier one.
#[derive(Debug, Default)]
pub(crate) struct PathIndex {
    positions: HashMap<String, usize>,
}

impl PathIndex {
    /// Index `keys` by position.
    pub(crate) fn build<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut positions = HashMap::new();
        for (position, key) in keys.into_iter().enumerate() {
            positions.insert(key.as_ref().to_lowercase(), position);
        }
        PathIndex { positions }
    }

    /// Look up a name, ignoring case.
    pub(crate) fn get(&self, name: &str) -> Option<usize> {
        self.positions.get(&name.to_lowercase()).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }
}
