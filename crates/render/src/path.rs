use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the cup reaches the screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderPath {
    /// Cup is written to the G-buffer and lit by a full-screen pass.
    #[default]
    Deferred,
    /// Cup is shaded directly alongside the rest of the scene.
    Forward,
}

impl RenderPath {
    pub const ALL: [RenderPath; 2] = [RenderPath::Deferred, RenderPath::Forward];

    pub fn as_str(self) -> &'static str {
        match self {
            RenderPath::Deferred => "deferred",
            RenderPath::Forward => "forward",
        }
    }
}

impl fmt::Display for RenderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown render path {0:?} (expected \"deferred\" or \"forward\")")]
pub struct ParsePathError(pub String);

impl FromStr for RenderPath {
    type Err = ParsePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deferred" => Ok(RenderPath::Deferred),
            "forward" => Ok(RenderPath::Forward),
            _ => Err(ParsePathError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        for path in RenderPath::ALL {
            assert_eq!(path.to_string().parse::<RenderPath>().unwrap(), path);
        }
        assert_eq!("Forward".parse::<RenderPath>().unwrap(), RenderPath::Forward);
    }

    #[test]
    fn unknown_path_is_rejected() {
        let err = "tiled".parse::<RenderPath>().unwrap_err();
        assert!(err.to_string().contains("tiled"));
    }

    #[test]
    fn default_is_deferred() {
        assert_eq!(RenderPath::default(), RenderPath::Deferred);
    }
}
