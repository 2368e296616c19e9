//! Current server time — an opaque formatted timestamp.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The remote service's current time, exactly as it formatted it.
///
/// Never parsed: a new poll replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentTime {
    pub time: String,
}

impl CurrentTime {
    #[must_use]
    pub fn new(time: impl Into<String>) -> Self {
        Self { time: time.into() }
    }

    /// `true` when the remote sent an empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

impl fmt::Display for CurrentTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.time)
    }
}
