// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

/// A boolean option ("flag") that does not take a value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Flag {
    /// Number of times the flag was specified.
    pub(crate) count: usize,
    /// Description of the flag.
    pub(crate) hint: String,
}

impl Flag {
    pub(crate) fn new(hint: &str) -> Self {
        Flag {
            count: 0,
            hint: hint.into(),
        }
    }
}

/// An option that requires a value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Opt {
    /// Every value specified for the option, in command-line order.
    pub(crate) values: Vec<String>,
    /// Value returned if the option was never specified.
    pub(crate) fallback: String,
    /// Description of the option.
    pub(crate) hint: String,
}

impl Opt {
    pub(crate) fn new(fallback: &str, hint: &str) -> Self {
        Opt {
            values: Vec::new(),
            fallback: fallback.into(),
            hint: hint.into(),
        }
    }

    /// The last value specified, or the fallback.
    pub(crate) fn value(&self) -> &str {
        self.values.last().unwrap_or(&self.fallback)
    }
}

/// A collection of entries, each reachable by one or more alias names.
///
/// Entries are stored once and referenced by id so that all aliases of an
/// entry see the same state. Entries are never removed: registering an
/// alias that is already in use simply rebinds the alias.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Registry<T> {
    entries: Vec<T>,
    aliases: BTreeMap<String, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Registry {
            entries: Vec::new(),
            aliases: BTreeMap::new(),
        }
    }
}

impl<T> Registry<T> {
    /// Store `entry` under every whitespace-separated name in `aliases`,
    /// returning the id of the new entry.
    pub(crate) fn add(&mut self, aliases: &str, entry: T) -> usize {
        let id = self.entries.len();

        self.entries.push(entry);

        for alias in aliases.split_whitespace() {
            self.aliases.insert(alias.into(), id);
        }

        id
    }

    /// Returns the id of the entry bound to `alias`.
    pub(crate) fn id(&self, alias: &str) -> Option<usize> {
        self.aliases.get(alias).copied()
    }

    pub(crate) fn get(&self, alias: &str) -> Option<&T> {
        self.id(alias).map(|id| &self.entries[id])
    }

    pub(crate) fn get_mut(&mut self, alias: &str) -> Option<&mut T> {
        let id = self.id(alias)?;

        self.entries.get_mut(id)
    }

    pub(crate) fn entry(&self, id: usize) -> Option<&T> {
        self.entries.get(id)
    }

    pub(crate) fn contains(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Iterate over every alias, in alphabetical order, with its entry.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.aliases
            .iter()
            .map(move |(alias, id)| (alias.as_str(), &self.entries[*id]))
    }

    /// Returns each reachable entry with all of its aliases (in
    /// alphabetical order). Entries whose aliases have all been rebound are
    /// omitted.
    pub(crate) fn groups(&self) -> Vec<(Vec<&str>, &T)> {
        let mut names: BTreeMap<usize, Vec<&str>> = BTreeMap::new();

        for (alias, id) in self.aliases.iter() {
            names.entry(*id).or_default().push(alias);
        }

        names
            .into_iter()
            .map(|(id, aliases)| (aliases, &self.entries[id]))
            .collect()
    }
}

impl<T> Index<usize> for Registry<T> {
    type Output = T;

    fn index(&self, id: usize) -> &T {
        &self.entries[id]
    }
}

impl<T> IndexMut<usize> for Registry<T> {
    fn index_mut(&mut self, id: usize) -> &mut T {
        &mut self.entries[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag() {
        let flag = Flag::new("enable debug");

        assert_eq!(flag.count, 0);
        assert_eq!(flag.hint, "enable debug");
        assert_eq!(Flag::new(""), Flag::default());
    }

    #[test]
    fn test_opt() {
        let mut opt = Opt::new("default", "some value");

        assert_eq!(opt.value(), "default");
        assert!(opt.values.is_empty());

        opt.values.push("foo".into());
        opt.values.push("bar".into());

        assert_eq!(opt.value(), "bar");
        assert_eq!(opt.fallback, "default");
    }

    #[test]
    fn test_registry_aliases_share_entry() {
        let mut registry = Registry::<Flag>::default();

        assert!(registry.is_empty());
        assert!(registry.get("foo").is_none());

        let id = registry.add("foo f", Flag::default());

        assert!(!registry.is_empty());
        assert!(registry.contains("foo"));
        assert!(registry.contains("f"));
        assert!(!registry.contains("fo"));
        assert_eq!(registry.id("foo"), Some(id));
        assert_eq!(registry.id("f"), Some(id));

        registry.get_mut("f").unwrap().count += 1;
        registry.get_mut("foo").unwrap().count += 1;

        assert_eq!(registry.get("foo").unwrap().count, 2);
        assert_eq!(registry.get("f").unwrap().count, 2);
        assert_eq!(registry.entry(id).unwrap().count, 2);

        registry[id].count += 1;
        assert_eq!(registry.get("f").unwrap().count, 3);
        assert_eq!(registry[id].count, 3);
        assert!(registry.entry(id + 1).is_none());
    }

    #[test]
    fn test_registry_alias_whitespace() {
        let mut registry = Registry::<Flag>::default();

        registry.add("  alpha\tbeta \n gamma ", Flag::default());

        let aliases: Vec<&str> = registry.iter().map(|(alias, _)| alias).collect();

        assert_eq!(aliases, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_registry_rebind() {
        let mut registry = Registry::<Flag>::default();

        let first = registry.add("foo f", Flag::new("first"));
        let second = registry.add("f", Flag::new("second"));

        assert_ne!(first, second);

        // Last registration wins for the reused alias only.
        assert_eq!(registry.get("f").unwrap().hint, "second");
        assert_eq!(registry.get("foo").unwrap().hint, "first");

        let groups = registry.groups();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, vec!["foo"]);
        assert_eq!(groups[0].1.hint, "first");
        assert_eq!(groups[1].0, vec!["f"]);
        assert_eq!(groups[1].1.hint, "second");

        // An entry with no aliases left is unreachable.
        registry.add("foo", Flag::new("third"));

        let hints: Vec<&str> = registry
            .groups()
            .iter()
            .map(|(_, flag)| flag.hint.as_str())
            .collect();

        assert_eq!(hints, vec!["second", "third"]);
    }
}
