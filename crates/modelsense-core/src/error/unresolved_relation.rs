use super::Error;

/// Error when a relation field names a target model that is not part of the
/// schema.
///
/// This is a structural error in the schema's shape. In fail-fast mode it
/// aborts the analysis; in collect mode the relation is skipped and the error
/// is reported alongside the analysis.
#[derive(Debug)]
pub(super) struct UnresolvedRelation {
    pub(super) model: Box<str>,
    pub(super) field: Box<str>,
    pub(super) target: Box<str>,
}

impl std::error::Error for UnresolvedRelation {}

impl core::fmt::Display for UnresolvedRelation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unresolved relation: field `{}::{}` references model `{}`, which is not defined in the schema",
            self.model, self.field, self.target
        )
    }
}

impl Error {
    /// Creates an unresolved relation error.
    pub fn unresolved_relation(
        model: impl Into<String>,
        field: impl Into<String>,
        target: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::UnresolvedRelation(UnresolvedRelation {
            model: model.into().into(),
            field: field.into().into(),
            target: target.into().into(),
        }))
    }

    /// Returns `true` if this error is an unresolved relation error.
    pub fn is_unresolved_relation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnresolvedRelation(_))
    }
}
