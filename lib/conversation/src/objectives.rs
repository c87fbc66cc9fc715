//! Learning objectives and progress.

use serde::{Deserialize, Serialize};

/// Objectives the learner has set, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningObjectives {
    items: Vec<String>,
}

impl LearningObjectives {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a trimmed objective. Blank input is ignored.
    ///
    /// Returns true if the objective was added.
    pub fn add(&mut self, objective: &str) -> bool {
        let objective = objective.trim();
        if objective.is_empty() {
            return false;
        }
        self.items.push(objective.to_string());
        true
    }

    /// Objectives in insertion order.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Learning progress as a percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningProgress(u8);

impl LearningProgress {
    /// Points added per step.
    pub const STEP: u8 = 10;
    /// Upper bound.
    pub const MAX: u8 = 100;

    /// Advances by one step, saturating at [`Self::MAX`].
    pub fn mark(&mut self) {
        self.0 = self.0.saturating_add(Self::STEP).min(Self::MAX);
    }

    #[must_use]
    pub fn percent(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn is_complete(self) -> bool {
        self.0 == Self::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn objectives_are_trimmed_and_blanks_ignored() {
        let mut objectives = LearningObjectives::new();
        assert!(objectives.add("  learn the amygdala  "));
        assert!(!objectives.add("   "));
        assert!(!objectives.add(""));
        assert_eq!(objectives.items(), ["learn the amygdala"]);
    }

    #[test]
    fn progress_steps_by_ten_and_caps() {
        let mut progress = LearningProgress::default();
        progress.mark();
        assert_eq!(progress.percent(), 10);

        for _ in 0..20 {
            progress.mark();
        }
        assert_eq!(progress.percent(), 100);
        assert!(progress.is_complete());
    }
}
