//! Prompt text appended to region sessions.

use neurochat_core::{Difficulty, Region};

/// Request sent to the summarizing region.
pub const SUMMARY_PROMPT: &str = "Please provide a concise summary of our conversation about brain regions and their interactions during the discussed activity. Highlight key points and insights.";

/// Framing prompt for a new activity, specific to one region.
#[must_use]
pub fn activity_prompt(activity: &str, region: &Region, difficulty: Difficulty) -> String {
    format!(
        "New activity: \"{activity}\". Discuss how you, as the {name}, are involved in this activity. \
         Consider interactions with other brain regions. Use language appropriate for difficulty \
         level {level} (1-5, where 1 is beginner and 5 is expert).",
        name = region.name,
        level = difficulty.level(),
    )
}

/// Follow-up prompt asking every region to keep going.
#[must_use]
pub fn continue_prompt(difficulty: Difficulty) -> String {
    format!(
        "Continue the discussion about the current activity. Consider recent inputs from other \
         regions. Maintain the current difficulty level ({}).",
        difficulty.level()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurochat_core::REGIONS;

    #[test]
    fn activity_prompt_embeds_activity_region_and_level() {
        let prompt = activity_prompt(
            "riding a bike",
            &REGIONS[3],
            Difficulty::new(4).expect("valid"),
        );
        assert!(prompt.starts_with("New activity: \"riding a bike\"."));
        assert!(prompt.contains("as the Cerebellum,"));
        assert!(prompt.contains("difficulty level 4 (1-5"));
    }

    #[test]
    fn continue_prompt_mentions_level() {
        let prompt = continue_prompt(Difficulty::new(2).expect("valid"));
        assert!(prompt.ends_with("Maintain the current difficulty level (2)."));
    }

    #[test]
    fn prompts_have_single_spacing() {
        let prompt = activity_prompt("x", &REGIONS[0], Difficulty::default());
        assert!(!prompt.contains("  "));
        assert!(!continue_prompt(Difficulty::default()).contains("  "));
    }
}
