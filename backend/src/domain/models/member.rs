use serde::{Deserialize, Serialize};

/// A roster entry offered on the daily entry form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
}

impl Member {
    pub fn new(name: &str) -> Self {
        Self {
            name: Self::normalize_name(name),
        }
    }

    /// Surrounding whitespace is not part of a member name.
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_string()
    }
}
