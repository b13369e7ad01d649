//! Name and reference registries.
//!
//! Element, group, and view names register where they are first defined;
//! drawable objects and group references register where a name is first
//! used. Both sides keep insertion order so the end-of-document reference
//! sweep reports findings deterministically.

use easel_core::location::Location;
use easel_core::numeric;
use indexmap::IndexMap;

/// Whether a name was produced by template expansion.
///
/// Generated names contain a `~identifier~` placeholder and expand
/// differently per repeat iteration, so they are exempt from static
/// uniqueness and reference checks.
pub fn is_generated(name: &str) -> bool {
    numeric::is_placeholder(name)
}

/// A registry mapping names to the location where each was first seen.
#[derive(Debug, Default)]
pub struct Registry {
    entries: IndexMap<String, Location>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a definition.
    ///
    /// Returns `Err` with the first definition's location if the name is
    /// already registered; the first location is kept either way.
    pub fn define(&mut self, name: &str, location: Location) -> Result<(), Location> {
        match self.entries.get(name) {
            None => {
                self.entries.insert(name.to_string(), location);
                Ok(())
            }
            Some(first) => Err(*first),
        }
    }

    /// Record a reference. Only the first reference's location is kept.
    pub fn reference(&mut self, name: &str, location: Location) {
        self.entries.entry(name.to_string()).or_insert(location);
    }

    /// Whether the name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate over `(name, first location)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Location)> {
        self.entries
            .iter()
            .map(|(name, location)| (name.as_str(), *location))
    }
}
