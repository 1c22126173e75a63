use std::fmt;

use crate::error::{PathError, Result};

/// A programmatic identifier: an ASCII letter or underscore, then letters,
/// digits, or underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn parse(input: &str) -> Result<Self> {
        let mut chars = input.chars();
        match chars.next() {
            None => return Err(PathError::Empty),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            Some(_) => return Err(PathError::InvalidIdentifier(input.to_string())),
        }
        if chars.any(|c| !c.is_ascii_alphanumeric() && c != '_') {
            return Err(PathError::InvalidIdentifier(input.to_string()));
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A software version string. Deliberately lax — versioning schemes vary too
/// much to constrain beyond non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
