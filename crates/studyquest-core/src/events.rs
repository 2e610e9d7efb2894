use serde::{Deserialize, Serialize};

/// Every state change worth showing to the user produces an Event.
/// The presentation layer turns these into notifications; the core never
/// formats or displays anything itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    QuestCompleted {
        id: u32,
        name: String,
        xp: u32,
    },
    /// One per level gained; a single large XP award may emit several.
    LevelUp {
        level: u32,
        coins_awarded: u32,
    },
    /// First completion ever, or first after the initial state.
    StreakStarted,
    /// Completion on the day after the previous one.
    StreakExtended {
        days: u32,
    },
    /// A gap of two or more days; the streak starts over at day 1.
    StreakReset,
    /// Streak hit a multiple of seven days.
    StreakBonus {
        days: u32,
        coins_awarded: u32,
    },
    RewardPurchased {
        name: String,
        cost: u32,
    },
    StoreItemAdded {
        name: String,
        cost: u32,
    },
    SubjectAdded {
        name: String,
    },
    SubjectRemoved {
        name: String,
        quests_removed: usize,
    },
}
