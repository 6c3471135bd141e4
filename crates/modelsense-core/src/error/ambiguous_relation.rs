use super::Error;

/// Error when a relation carries neither a foreign key, a list marker, nor a
/// matching back-reference, so its cardinality can only be guessed.
///
/// Only raised when strict relation checking is enabled; otherwise such
/// relations are classified as an implicit one-to-one.
#[derive(Debug)]
pub(super) struct AmbiguousRelation {
    pub(super) model: Box<str>,
    pub(super) field: Box<str>,
}

impl std::error::Error for AmbiguousRelation {}

impl core::fmt::Display for AmbiguousRelation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "ambiguous relation: field `{}::{}` has no foreign key, is not a list, and has no back-reference",
            self.model, self.field
        )
    }
}

impl Error {
    /// Creates an ambiguous relation error.
    pub fn ambiguous_relation(model: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::AmbiguousRelation(AmbiguousRelation {
            model: model.into().into(),
            field: field.into().into(),
        }))
    }

    /// Returns `true` if this error is an ambiguous relation error.
    pub fn is_ambiguous_relation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::AmbiguousRelation(_))
    }
}
