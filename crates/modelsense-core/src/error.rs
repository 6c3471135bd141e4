mod ambiguous_relation;
mod invalid_config;
mod invalid_schema;
mod unresolved_relation;

use ambiguous_relation::AmbiguousRelation;
use invalid_config::InvalidConfig;
use invalid_schema::InvalidSchema;
use std::sync::Arc;
use unresolved_relation::UnresolvedRelation;

/// An error that can occur while building or analyzing a schema.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorKind>,
}

#[derive(Debug)]
enum ErrorKind {
    UnresolvedRelation(UnresolvedRelation),
    AmbiguousRelation(AmbiguousRelation),
    InvalidConfig(InvalidConfig),
    InvalidSchema(InvalidSchema),
}

impl Error {
    fn kind(&self) -> &ErrorKind {
        &self.inner
    }

    /// The model the error was raised for, if the error concerns a model.
    pub fn model(&self) -> Option<&str> {
        match self.kind() {
            ErrorKind::UnresolvedRelation(err) => Some(&*err.model),
            ErrorKind::AmbiguousRelation(err) => Some(&*err.model),
            _ => None,
        }
    }

    /// The field the error was raised for, if the error concerns a field.
    pub fn field(&self) -> Option<&str> {
        match self.kind() {
            ErrorKind::UnresolvedRelation(err) => Some(&*err.field),
            ErrorKind::AmbiguousRelation(err) => Some(&*err.field),
            _ => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::InvalidConfig(err) => err
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self.kind(), f)
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error").field("kind", self.kind()).finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            UnresolvedRelation(err) => core::fmt::Display::fmt(err, f),
            AmbiguousRelation(err) => core::fmt::Display::fmt(err, f),
            InvalidConfig(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Arc::new(kind),
        }
    }
}
