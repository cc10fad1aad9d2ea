//! Feedback kinds
//!
//! Roughly the AppKit `NSHapticFeedbackManager.FeedbackPattern` set.

use crate::error::HapticError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type of feedback to send, changes the haptic feel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackKind {
    /// General purpose tap
    Generic,
    /// Something snapped into alignment
    Alignment,
    /// A discrete level/step was crossed
    LevelChange,
}

impl FeedbackKind {
    /// Every kind, in backend code order
    pub const ALL: [FeedbackKind; 3] = [
        FeedbackKind::Generic,
        FeedbackKind::Alignment,
        FeedbackKind::LevelChange,
    ];

    /// Integer code passed to the native trigger
    pub const fn code(self) -> i32 {
        match self {
            FeedbackKind::Generic => 0,
            FeedbackKind::Alignment => 1,
            FeedbackKind::LevelChange => 2,
        }
    }

    /// Decode a native trigger code
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Stable lowercase name
    pub const fn as_str(self) -> &'static str {
        match self {
            FeedbackKind::Generic => "generic",
            FeedbackKind::Alignment => "alignment",
            FeedbackKind::LevelChange => "level-change",
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackKind {
    type Err = HapticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "generic" | "0" => Ok(FeedbackKind::Generic),
            "alignment" | "1" => Ok(FeedbackKind::Alignment),
            "level-change" | "levelchange" | "2" => Ok(FeedbackKind::LevelChange),
            other => Err(HapticError::UnknownKind(other.to_string())),
        }
    }
}
