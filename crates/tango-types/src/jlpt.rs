use std::fmt;

use serde::{Deserialize, Serialize};

/// JLPT proficiency level, declared hardest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JlptLevel {
    #[serde(alias = "n1", alias = "jlpt-n1")]
    N1, // Advanced (~10000 words)
    #[serde(alias = "n2", alias = "jlpt-n2")]
    N2, // Upper intermediate (~6000 words)
    #[serde(alias = "n3", alias = "jlpt-n3")]
    N3, // Intermediate (~3750 words)
    #[serde(alias = "n4", alias = "jlpt-n4")]
    N4, // Elementary (~1500 words)
    #[serde(alias = "n5", alias = "jlpt-n5")]
    N5, // Beginner (~800 words)
}

impl JlptLevel {
    /// All levels in iteration order (N1 first)
    pub const ALL: [JlptLevel; 5] = [
        JlptLevel::N1,
        JlptLevel::N2,
        JlptLevel::N3,
        JlptLevel::N4,
        JlptLevel::N5,
    ];

    /// Get level string
    pub fn as_str(&self) -> &'static str {
        match self {
            JlptLevel::N1 => "N1",
            JlptLevel::N2 => "N2",
            JlptLevel::N3 => "N3",
            JlptLevel::N4 => "N4",
            JlptLevel::N5 => "N5",
        }
    }
}

impl fmt::Display for JlptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
