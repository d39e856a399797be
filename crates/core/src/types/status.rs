//! Cart status.

use serde::{Deserialize, Serialize};

/// Whether the cart holds anything.
///
/// A cart moves to `NonEmpty` on its first add and back to `Empty` when
/// its last line is removed or the cart is checked out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CartStatus {
    #[default]
    Empty,
    NonEmpty,
}

impl CartStatus {
    /// Status of a cart with `line_count` lines.
    #[must_use]
    pub const fn for_line_count(line_count: usize) -> Self {
        if line_count == 0 {
            Self::Empty
        } else {
            Self::NonEmpty
        }
    }
}

impl std::fmt::Display for CartStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::NonEmpty => write!(f, "non_empty"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_line_count() {
        assert_eq!(CartStatus::for_line_count(0), CartStatus::Empty);
        assert_eq!(CartStatus::for_line_count(3), CartStatus::NonEmpty);
    }

    #[test]
    fn test_display() {
        assert_eq!(CartStatus::NonEmpty.to_string(), "non_empty");
    }
}
