use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Word;

/// Sparse integer-keyed cells. Anything never written reads as zero.
///
/// Used for both the register file and data memory; they differ only in how
/// operands address them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    cells: BTreeMap<u32, Word>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self, key: u32) -> Word {
        self.cells.get(&key).copied().unwrap_or(0)
    }

    pub fn write(&mut self, key: u32, val: Word) {
        self.cells.insert(key, val);
    }

    /// Cells that have been written, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Word)> + '_ {
        self.cells.iter().map(|(&k, &v)| (k, v))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
