use super::Error;

type Source = Box<dyn std::error::Error + Send + Sync>;

/// Error when the analyzer configuration is invalid.
///
/// This occurs when:
/// - A special field override uses a key outside the known set
/// - A configured pattern fails to compile
///
/// These indicate a mistake in the calling code rather than in the schema, so
/// they are always raised immediately.
#[derive(Debug)]
pub(super) struct InvalidConfig {
    message: Box<str>,
    pub(super) source: Option<Source>,
}

impl std::error::Error for InvalidConfig {}

impl core::fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid config: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid config error.
    pub fn invalid_config(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidConfig(InvalidConfig {
            message: message.into().into(),
            source: None,
        }))
    }

    /// Creates an invalid config error wrapping the error that caused it.
    pub fn invalid_config_caused_by(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Error {
        Error::from(super::ErrorKind::InvalidConfig(InvalidConfig {
            message: message.into().into(),
            source: Some(Box::new(source)),
        }))
    }

    /// Returns `true` if this error is an invalid config error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidConfig(_))
    }
}
