use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Label name -> instruction index it resolves to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelTable {
    entries: BTreeMap<String, usize>,
}

/// A label was defined again at a different index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redefinition {
    pub first: usize,
    pub second: usize,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.entries.get(name).copied()
    }

    /// Record `name -> target`. Re-recording the same target is a no-op, which
    /// happens every time a loop passes back over its label.
    pub fn define(
        &mut self,
        name: &str,
        target: usize,
        allow_redefinition: bool,
    ) -> Result<(), Redefinition> {
        match self.entries.get(name) {
            Some(&first) if first == target => return Ok(()),
            Some(&first) if !allow_redefinition => {
                return Err(Redefinition {
                    first,
                    second: target,
                })
            }
            _ => {}
        }
        debug!(label = name, target, "label defined");
        self.entries.insert(name.to_string(), target);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.entries.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

/// Forward label search cursor. At most one search is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Search {
    #[default]
    Idle,
    Searching { target: String, origin: usize },
}

impl Search {
    pub fn target(&self) -> Option<&str> {
        match self {
            Search::Idle => None,
            Search::Searching { target, .. } => Some(target),
        }
    }
}

/// Next index for a reference to `label` seen at `index`.
///
/// A known label jumps straight to its target and ends any search. An unknown
/// one starts a search from `index` (or continues the current one) by moving
/// to the next line.
pub fn resolve(table: &LabelTable, search: &mut Search, label: &str, index: usize) -> usize {
    if let Some(target) = table.get(label) {
        if let Search::Searching { origin, .. } = search {
            debug!(label, origin = *origin, found_at = index, "label search finished");
        }
        *search = Search::Idle;
        return target;
    }
    if *search == Search::Idle {
        debug!(label, origin = index, "label search started");
        *search = Search::Searching {
            target: label.to_string(),
            origin: index,
        };
    }
    index + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_label_jumps_and_clears_search() {
        let mut table = LabelTable::new();
        table.define("top", 1, false).unwrap();
        let mut search = Search::Searching {
            target: "top".into(),
            origin: 9,
        };
        assert_eq!(resolve(&table, &mut search, "top", 12), 1);
        assert_eq!(search, Search::Idle);
    }

    #[test]
    fn unknown_label_starts_one_search_and_keeps_its_origin() {
        let table = LabelTable::new();
        let mut search = Search::Idle;
        assert_eq!(resolve(&table, &mut search, "end", 3), 4);
        assert_eq!(resolve(&table, &mut search, "end", 4), 5);
        assert_eq!(
            search,
            Search::Searching {
                target: "end".into(),
                origin: 3
            }
        );
    }

    #[test]
    fn redefinition_policy() {
        let mut table = LabelTable::new();
        table.define("a", 2, false).unwrap();
        assert_eq!(table.define("a", 2, false), Ok(()));
        assert_eq!(
            table.define("a", 5, false),
            Err(Redefinition { first: 2, second: 5 })
        );
        assert_eq!(table.get("a"), Some(2));
        table.define("a", 5, true).unwrap();
        assert_eq!(table.get("a"), Some(5));
    }
}
