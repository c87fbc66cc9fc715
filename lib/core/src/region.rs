//! The fixed brain-region catalogue.
//!
//! Each region drives its own conversation thread. The catalogue order is
//! the iteration order used everywhere: fan-out, transcript export, and
//! the choice of the region that writes the summary.

use serde::Serialize;

/// Static description of one brain region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    /// Unique display name, also the conversation map key.
    pub name: &'static str,
    /// One-line summary of the region's role.
    pub role: &'static str,
    /// Longer description shown in the detail panel.
    pub description: &'static str,
    /// CSS gradient classes for the catalogue list.
    pub color: &'static str,
    /// Emoji shown beside the name.
    pub emoji: &'static str,
}

/// Every region, in iteration order.
pub static REGIONS: [Region; 5] = [
    Region {
        name: "Prefrontal Cortex",
        role: "Executive function and decision-making",
        description: "Responsible for complex cognitive behaviors, personality expression, decision making, and moderating social behavior.",
        color: "from-blue-500 to-blue-700",
        emoji: "🧠",
    },
    Region {
        name: "Hippocampus",
        role: "Memory formation and spatial navigation",
        description: "Critical for the formation of new memories about experienced events and spatial memory.",
        color: "from-green-500 to-green-700",
        emoji: "🗺️",
    },
    Region {
        name: "Amygdala",
        role: "Emotional processing and fear response",
        description: "Processes emotions, particularly those related to survival, such as fear, anger, and pleasure.",
        color: "from-red-500 to-red-700",
        emoji: "😨",
    },
    Region {
        name: "Cerebellum",
        role: "Motor control and cognitive functions",
        description: "Involved in motor control, balance, and is also important for certain cognitive functions.",
        color: "from-yellow-500 to-yellow-700",
        emoji: "🤸",
    },
    Region {
        name: "Broca's Area",
        role: "Speech production and language processing",
        description: "Crucial for speech production, language processing, and comprehension.",
        color: "from-purple-500 to-purple-700",
        emoji: "🗣️",
    },
];

impl Region {
    /// Looks up a region by exact name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<&'static Region> {
        REGIONS.iter().find(|r| r.name == name)
    }

    /// Position of this region in the catalogue.
    #[must_use]
    pub fn position(&self) -> usize {
        REGIONS
            .iter()
            .position(|r| r.name == self.name)
            .unwrap_or(REGIONS.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = REGIONS.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), REGIONS.len());
    }

    #[test]
    fn catalogue_order_is_stable() {
        assert_eq!(REGIONS[0].name, "Prefrontal Cortex");
        assert_eq!(REGIONS[4].name, "Broca's Area");
    }

    #[test]
    fn lookup_by_name() {
        let region = Region::by_name("Amygdala").expect("known region");
        assert_eq!(region.position(), 2);
        assert!(Region::by_name("Thalamus").is_none());
    }
}
