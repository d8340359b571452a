use serde::{Deserialize, Serialize};

/// Accessibility band derived from the score percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessibilityLevel {
    VeryLow,
    Low,
    Medium,
    High,
}

impl AccessibilityLevel {
    pub const fn from_percentage(percentage: u32) -> Self {
        match percentage {
            0..=39 => Self::VeryLow,
            40..=59 => Self::Low,
            60..=84 => Self::Medium,
            _ => Self::High,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very low",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_closed_open() {
        let cases = [
            (0, AccessibilityLevel::VeryLow),
            (39, AccessibilityLevel::VeryLow),
            (40, AccessibilityLevel::Low),
            (59, AccessibilityLevel::Low),
            (60, AccessibilityLevel::Medium),
            (84, AccessibilityLevel::Medium),
            (85, AccessibilityLevel::High),
            (100, AccessibilityLevel::High),
        ];

        for (percentage, expected) in cases {
            assert_eq!(
                AccessibilityLevel::from_percentage(percentage),
                expected,
                "percentage {percentage}"
            );
        }
    }
}
