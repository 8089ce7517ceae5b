use std::fmt;
use std::str::FromStr;

/// Task priority
///
/// The set is fixed; labels are written to the tasks file verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Label stored in the tasks file
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = String;

    /// Accepts the English labels in any case as well as the legacy Polish
    /// labels found in older tasks files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "niski" => Ok(Priority::Low),
            "medium" | "średni" => Ok(Priority::Medium),
            "high" | "wysoki" => Ok(Priority::High),
            _ => Err(format!(
                "Invalid priority '{}'. Valid options are: low, medium, high",
                s
            )),
        }
    }
}

/// A single todo entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Free-text description, never empty
    pub text: String,
    pub priority: Priority,
}

impl Task {
    pub fn new(text: impl Into<String>, priority: Priority) -> Self {
        Self {
            text: text.into(),
            priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_parse_english_and_legacy() {
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" Medium ".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("Niski".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("Średni".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("Wysoki".parse::<Priority>().unwrap(), Priority::High);
    }

    #[test]
    fn test_priority_parse_invalid() {
        let err = "urgent".parse::<Priority>().unwrap_err();
        assert!(err.contains("urgent"));
        assert!(err.contains("low, medium, high"));
    }

    #[test]
    fn test_priority_label_round_trip() {
        for priority in Priority::ALL {
            assert_eq!(priority.label().parse::<Priority>().unwrap(), priority);
        }
    }
}
