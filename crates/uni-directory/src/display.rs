//! Presentation helpers for text output. Never used for matching.

use serde::{Deserialize, Serialize};

/// Program names longer than this are shortened in previews.
const PROGRAM_MAX_CHARS: usize = 30;
const PROGRAM_KEEP_CHARS: usize = 28;

/// Drop a trailing parenthetical qualifier: `"40,000 (approx)"` → `"40,000"`.
pub fn strip_qualifier(text: &str) -> &str {
    text.split('(').next().unwrap_or(text).trim()
}

/// Post-study visa risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisaRisk {
    Low,
    Medium,
    High,
    Unknown,
}

impl VisaRisk {
    pub fn classify(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unknown => "unknown",
        }
    }
}

/// First `n` programs, long names shortened with an ellipsis.
pub fn program_preview(programs: &[String], n: usize) -> Vec<String> {
    programs
        .iter()
        .take(n)
        .map(|p| {
            if p.chars().count() > PROGRAM_MAX_CHARS {
                let kept: String = p.chars().take(PROGRAM_KEEP_CHARS).collect();
                format!("{kept}…")
            } else {
                p.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_qualifier() {
        assert_eq!(strip_qualifier("40,000 (approx)"), "40,000");
        assert_eq!(strip_qualifier("No (optional)"), "No");
        assert_eq!(strip_qualifier("3.0"), "3.0");
        assert_eq!(strip_qualifier("(approx)"), "");
    }

    #[test]
    fn test_visa_risk_classify() {
        assert_eq!(VisaRisk::classify("Low"), VisaRisk::Low);
        assert_eq!(VisaRisk::classify("MEDIUM"), VisaRisk::Medium);
        assert_eq!(VisaRisk::classify("high"), VisaRisk::High);
        assert_eq!(VisaRisk::classify("Low-Medium"), VisaRisk::Unknown);
    }

    #[test]
    fn test_program_preview() {
        let programs = vec![
            "MSc Computer Science".to_string(),
            "MSc Artificial Intelligence and Robotics".to_string(),
            "MBA".to_string(),
        ];
        let preview = program_preview(&programs, 2);
        assert_eq!(preview.len(), 2);
        assert_eq!(preview[0], "MSc Computer Science");
        assert_eq!(preview[1], "MSc Artificial Intelligence …");
    }
}
