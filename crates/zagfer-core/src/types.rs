use crate::{Result, error::Error};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Employee registration number used as the login key.
///
/// Matriculas are free-form identifiers entered at the counter; the only
/// normalization applied is trimming. Lookup is a plaintext comparison by
/// design (there is no credential model in this system).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matricula(String);

impl Matricula {
    /// Create a new matricula with validation.
    ///
    /// # Errors
    /// Returns `Error::Validation` if the trimmed value is empty.
    pub fn new(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(Error::validation("matricula must not be empty"));
        }
        Ok(Matricula(value.to_string()))
    }

    /// Get the matricula as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Matricula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Matricula {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Matricula::new(s)
    }
}
