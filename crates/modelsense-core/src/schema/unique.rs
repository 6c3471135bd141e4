use super::Model;
use std_util::slice;

/// A declared unique constraint over one or more fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueConstraint {
    pub fields: Vec<String>,
}

impl UniqueConstraint {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_composite(&self) -> bool {
        self.fields.len() > 1
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|name| name == field)
    }

    /// Returns `true` if the constraint covers exactly `field` and nothing
    /// else.
    pub fn is_exactly(&self, field: &str) -> bool {
        matches!(&self.fields[..], [only] if only == field)
    }
}

impl Model {
    /// Returns `true` if `name` is uniquely constrained.
    ///
    /// A direct unique annotation or being the single primary-key field always
    /// counts. Otherwise, with `exact` set, only a unique constraint whose sole
    /// member is the field counts; without it, membership in any unique
    /// constraint (or a composite primary key) is enough.
    pub fn is_field_unique(&self, name: &str, exact: bool) -> bool {
        let Some(field) = self.field_by_name(name) else {
            return false;
        };

        if field.unique || self.is_id_field(field) {
            return true;
        }

        if exact {
            self.unique_constraints
                .iter()
                .any(|constraint| constraint.is_exactly(name))
        } else {
            self.unique_constraints
                .iter()
                .any(|constraint| constraint.contains(name))
                || self.primary_key_fields().contains(&name)
        }
    }

    /// Returns `true` if the given set of fields is uniquely constrained as a
    /// whole.
    ///
    /// A single name requires exact uniqueness. Several names require a unique
    /// constraint (or the primary key) with exactly the same members, in any
    /// order. A subset or superset of a constraint does not count.
    pub fn are_fields_unique<S: AsRef<str>>(&self, names: &[S]) -> bool {
        let names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();

        match &names[..] {
            [] => false,
            [name] => self.is_field_unique(name, true),
            names => {
                self.unique_constraints
                    .iter()
                    .any(|constraint| same_set(&constraint.fields, names))
                    || same_set(&self.primary_key_fields(), names)
            }
        }
    }
}

fn same_set<T: AsRef<str>>(declared: &[T], names: &[&str]) -> bool {
    let declared: Vec<&str> = declared.iter().map(AsRef::as_ref).collect();
    declared.len() == names.len() && slice::same_members(&declared, names)
}
