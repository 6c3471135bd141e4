use super::ErrorMode;
use crate::{Error, Result};

/// A value produced alongside the structural errors skipped while producing
/// it.
#[derive(Debug, Clone)]
pub struct Collected<T> {
    pub value: T,
    pub errors: Vec<Error>,
}

impl<T> Collected<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            errors: vec![],
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Collected<U> {
        Collected {
            value: f(self.value),
            errors: self.errors,
        }
    }

    /// Apply the error policy: under [`ErrorMode::FailFast`] the first error
    /// is returned; otherwise the value comes back with every error.
    pub fn into_result(self, mode: ErrorMode) -> Result<(T, Vec<Error>)> {
        let mut errors = self.errors;

        if mode.is_fail_fast() && !errors.is_empty() {
            return Err(errors.swap_remove(0));
        }

        Ok((self.value, errors))
    }
}
