//! Grid presentation styles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// How the background grid is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GridStyle {
    /// Grid is not drawn (snapping still applies).
    None,
    /// A dot at every major grid intersection.
    #[default]
    Dotted,
    /// Lines at every major grid spacing.
    Lined,
    /// Minor lines plus emphasised major lines.
    Graph,
}

impl fmt::Display for GridStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Dotted => write!(f, "dotted"),
            Self::Lined => write!(f, "lined"),
            Self::Graph => write!(f, "graph"),
        }
    }
}

impl FromStr for GridStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "dotted" | "dots" => Ok(Self::Dotted),
            "lined" | "lines" => Ok(Self::Lined),
            "graph" => Ok(Self::Graph),
            _ => Err(Error::other(format!("Unknown grid style: {}", s))),
        }
    }
}
