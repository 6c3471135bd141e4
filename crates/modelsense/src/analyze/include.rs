use super::ModelAnalysis;

use indexmap::IndexSet;
use std::fmt;

/// Relations to load eagerly alongside a model, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeGraph {
    relations: IndexSet<String>,
}

impl IncludeGraph {
    /// Returns `Some(true)` for an included relation, `None` otherwise.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.contains(name).then_some(true)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.relations.contains(name)
    }

    /// Included relations, each paired with `true`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.relations.iter().map(|name| (name.as_str(), true))
    }

    pub fn relation_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.relations.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for IncludeGraph {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            relations: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Renders as `{ author: true, tags: true }`.
impl fmt::Display for IncludeGraph {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str("{ ")?;
        for (i, name) in self.relations.iter().enumerate() {
            if i > 0 {
                fmt.write_str(", ")?;
            }
            write!(fmt, "{name}: true")?;
        }
        fmt.write_str(" }")
    }
}

/// The auto-included relations of an analyzed model, or `None` if there are
/// none.
pub fn generate_include_object(analysis: &ModelAnalysis<'_>) -> Option<IncludeGraph> {
    if analysis.auto_include.is_empty() {
        return None;
    }

    Some(
        analysis
            .auto_include
            .iter()
            .map(|relationship| relationship.name())
            .collect(),
    )
}

#[deprecated(note = "use `generate_include_object` and render the graph yourself")]
pub fn generate_include_string(analysis: &ModelAnalysis<'_>) -> Option<String> {
    tracing::warn!(
        model = %analysis.model.name,
        "generate_include_string is deprecated; use generate_include_object"
    );

    generate_include_object(analysis).map(|graph| graph.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_in_order() {
        let graph: IncludeGraph = ["author", "tags"].into_iter().collect();
        assert_eq!(graph.to_string(), "{ author: true, tags: true }");
        assert_eq!(graph.get("tags"), Some(true));
        assert_eq!(graph.get("comments"), None);
    }
}
