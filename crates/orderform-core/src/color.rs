//! # Mask Colors
//!
//! The enumerated color options offered by the form. The form also shows
//! an empty "Select..." option; it maps to no `Color` and is never valid.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::FormError;

/// A mask color the shop can fulfil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// The preselected option when the form mounts.
    #[default]
    Red,
    Blue,
    Green,
}

impl Color {
    /// Returns all colors in the order they are offered.
    pub fn all() -> &'static [Color] {
        &[Self::Red, Self::Blue, Self::Green]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
        }
    }

    /// Display label for the `<option>` element.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Blue => "Blue",
            Self::Green => "Green",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Self::Red),
            "blue" => Ok(Self::Blue),
            "green" => Ok(Self::Green),
            other => Err(FormError::UnknownColor(other.to_string())),
        }
    }
}
