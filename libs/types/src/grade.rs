//! Card rarity grades

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rarity tier of a card
///
/// Ordered by rarity: `FACTORY < LIMITED_RUN < NISMO`. Higher grades are
/// rarer and carry a larger value multiplier when a pack is opened.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Grade {
    /// Standard production grade, the most common
    #[default]
    Factory,
    /// Produced in limited quantities
    LimitedRun,
    /// The premium tier for ultra-rare cards
    Nismo,
}

impl Grade {
    /// Wire name of the grade ("FACTORY", "LIMITED_RUN", "NISMO")
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Factory => "FACTORY",
            Grade::LimitedRun => "LIMITED_RUN",
            Grade::Nismo => "NISMO",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_ordering() {
        assert!(Grade::Factory < Grade::LimitedRun);
        assert!(Grade::LimitedRun < Grade::Nismo);
    }

    #[test]
    fn test_grade_wire_names() {
        let json = serde_json::to_string(&Grade::LimitedRun).unwrap();
        assert_eq!(json, "\"LIMITED_RUN\"");

        let grade: Grade = serde_json::from_str("\"NISMO\"").unwrap();
        assert_eq!(grade, Grade::Nismo);
    }

    #[test]
    fn test_grade_display() {
        assert_eq!(Grade::Factory.to_string(), "FACTORY");
    }
}
