use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Length of generated session codes.
pub const CODE_LENGTH: usize = 6;

/// Short, human-shareable session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCode(String);

impl SessionCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Random code taken from the head of a v4 UUID.
    pub fn generate() -> Self {
        let mut code = Uuid::new_v4().simple().to_string();
        code.truncate(CODE_LENGTH);
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}
