use crate::schema::{Field, Model};

use indexmap::IndexMap;
use std_util::str::normalize;

/// Normalized names of a model's scalar fields, keyed by declared name.
///
/// Built once per model so every matcher compares against the same form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedNames<'a> {
    names: IndexMap<&'a str, String>,
}

impl<'a> NormalizedNames<'a> {
    /// Normalize the names of every scalar field of `model`.
    pub fn of(model: &'a Model) -> Self {
        let mut names = Self::default();
        for field in model.scalar_fields() {
            names.insert(field);
        }
        names
    }

    pub(crate) fn insert(&mut self, field: &'a Field) -> &str {
        self.names
            .entry(field.name.as_str())
            .or_insert_with(|| normalize(&field.name))
    }

    /// The normalized form of a declared field name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(String::as_str)
    }

    /// Returns `true` if some field normalizes to any of `candidates`.
    pub fn contains_any(&self, candidates: &[&str]) -> bool {
        self.names
            .values()
            .any(|normalized| candidates.contains(&normalized.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &str)> + '_ {
        self.names
            .iter()
            .map(|(name, normalized)| (*name, normalized.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
