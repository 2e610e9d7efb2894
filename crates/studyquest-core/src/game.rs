//! The game state facade.
//!
//! `GameState` owns progression, streak, and catalogs, and exposes the
//! operations the presentation layer drives: complete a quest, buy a
//! reward, edit the catalogs. Every mutating operation returns the events
//! to display; validation failures return before any state changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::ValidationError;
use crate::events::Event;
use crate::progression::Progression;
use crate::streak::Streak;

/// The whole persistent state of one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GameState {
    pub progression: Progression,
    pub streak: Streak,
    pub catalog: Catalog,
}

impl GameState {
    /// A fresh profile with the seed catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Complete the quest with the given id on `today`.
    ///
    /// Awards the quest's XP (leveling as needed), advances the streak,
    /// credits the owning subject, and marks the quest completed. A
    /// recurring quest is then recreated under a fresh id, uncompleted.
    ///
    /// An unknown id, or a quest already completed, is a silent no-op:
    /// the presentation layer disables completed quests, so there is
    /// nothing to report.
    pub fn complete_quest(&mut self, id: u32, today: NaiveDate) -> Vec<Event> {
        let index = match self.catalog.quests.iter().position(|q| q.id == id) {
            Some(i) if !self.catalog.quests[i].completed => i,
            _ => return Vec::new(),
        };
        let quest = self.catalog.quests[index].clone();

        let mut events = vec![Event::QuestCompleted {
            id: quest.id,
            name: quest.name.clone(),
            xp: quest.xp,
        }];

        events.extend(self.progression.apply_xp(quest.xp));

        let streak_events = self.streak.record_completion(today);
        for event in &streak_events {
            if let Event::StreakBonus { coins_awarded, .. } = event {
                self.progression.focus_coins += coins_awarded;
            }
        }
        events.extend(streak_events);

        self.catalog.credit_subject_xp(&quest.subject, quest.xp);
        self.catalog.quests[index].completed = true;

        if quest.recurring {
            self.catalog.quests.remove(index);
            let id = self.catalog.next_quest_id;
            self.catalog.next_quest_id += 1;
            self.catalog.quests.push(crate::catalog::Quest {
                id,
                completed: false,
                ..quest
            });
        }

        events
    }

    /// Buy the store item at `item_index`.
    ///
    /// # Errors
    /// `InvalidSelection` for an out-of-range index, `InsufficientCoins`
    /// when the balance does not cover the cost. Neither changes state.
    pub fn purchase(&mut self, item_index: usize) -> Result<Vec<Event>, ValidationError> {
        let item = self.catalog.store_items.get(item_index).ok_or(
            ValidationError::InvalidSelection {
                index: item_index,
                len: self.catalog.store_items.len(),
            },
        )?;
        if self.progression.focus_coins < item.cost {
            return Err(ValidationError::InsufficientCoins {
                cost: item.cost,
                balance: self.progression.focus_coins,
            });
        }

        let item = item.clone();
        self.progression.spend_coins(item.cost);
        Ok(vec![Event::RewardPurchased {
            name: item.name,
            cost: item.cost,
        }])
    }

    /// Add a user-authored quest. See [`Catalog::add_quest`].
    pub fn add_quest(
        &mut self,
        name: &str,
        xp: u32,
        subject: &str,
        recurring: bool,
    ) -> Result<u32, ValidationError> {
        self.catalog.add_quest(name, xp, subject, recurring)
    }

    /// Remove a quest by id (the confirmation prompt is the caller's job).
    pub fn remove_quest(&mut self, id: u32) -> bool {
        self.catalog.remove_quest(id)
    }

    /// Add a subject with a normalized name.
    pub fn add_subject(&mut self, name: &str) -> Result<Vec<Event>, ValidationError> {
        let name = self.catalog.add_subject(name)?;
        Ok(vec![Event::SubjectAdded { name }])
    }

    /// Remove a subject and all quests that reference it.
    ///
    /// Returns an empty event list when no such subject exists.
    pub fn remove_subject(&mut self, name: &str) -> Vec<Event> {
        match self.catalog.remove_subject(name) {
            Some(quests_removed) => vec![Event::SubjectRemoved {
                name: name.to_string(),
                quests_removed,
            }],
            None => Vec::new(),
        }
    }

    /// Add a custom reward to the store.
    pub fn add_store_item(&mut self, name: &str, cost: u32) -> Result<Vec<Event>, ValidationError> {
        self.catalog.add_store_item(name, cost)?;
        Ok(vec![Event::StoreItemAdded {
            name: name.trim().to_string(),
            cost,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streak::STREAK_BONUS_COINS;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_complete_quest_awards_xp_streak_and_subject() {
        let mut game = GameState::new();
        let events = game.complete_quest(1, day(2024, 1, 1)); // Chemistry, 50 XP

        assert!(matches!(events[0], Event::QuestCompleted { id: 1, .. }));
        assert!(events.contains(&Event::StreakStarted));
        assert_eq!(game.progression.xp, 50);
        assert_eq!(game.streak.days, 1);
        assert_eq!(game.catalog.subject("Chemistry").unwrap().total_xp, 50);
        assert!(game.catalog.quest(1).unwrap().completed);
    }

    #[test]
    fn test_complete_quest_twice_is_a_no_op() {
        let mut game = GameState::new();
        game.complete_quest(1, day(2024, 1, 1));
        let events = game.complete_quest(1, day(2024, 1, 1));
        assert!(events.is_empty());
        assert_eq!(game.progression.xp, 50);
    }

    #[test]
    fn test_complete_unknown_quest_is_a_no_op() {
        let mut game = GameState::new();
        let events = game.complete_quest(99, day(2024, 1, 1));
        assert!(events.is_empty());
        assert_eq!(game, GameState::new());
    }

    #[test]
    fn test_recurring_quest_is_recreated_with_fresh_id() {
        let mut game = GameState::new();
        let events = game.complete_quest(3, day(2024, 1, 1)); // recurring Daily Goal
        assert!(matches!(events[0], Event::QuestCompleted { id: 3, .. }));

        assert!(game.catalog.quest(3).is_none());
        let replacement = game.catalog.quest(4).expect("replacement quest");
        assert_eq!(replacement.name, "Daily Goal: Study for 30 minutes");
        assert_eq!(replacement.xp, 20);
        assert!(!replacement.completed);
        assert!(replacement.recurring);
        assert_eq!(game.catalog.next_quest_id, 5);

        // The replacement can be completed again the next day.
        let events = game.complete_quest(4, day(2024, 1, 2));
        assert!(!events.is_empty());
        assert_eq!(game.streak.days, 2);
    }

    #[test]
    fn test_streak_bonus_coins_are_credited() {
        let mut game = GameState::new();
        let start = day(2024, 1, 1);
        // Complete the recurring quest daily for a week; its id advances
        // by one with each recreation.
        let mut id = 3;
        for offset in 0..7 {
            game.complete_quest(id, start + chrono::Days::new(offset));
            id += 1;
        }
        assert_eq!(game.streak.days, 7);
        // 140 XP total -> one level-up (10 coins) plus the weekly bonus.
        assert_eq!(game.progression.focus_coins, 10 + STREAK_BONUS_COINS);
    }

    #[test]
    fn test_purchase_debits_balance() {
        let mut game = GameState::new();
        game.progression.focus_coins = 25;
        let events = game.purchase(0).unwrap(); // Netflix break, 10 FC
        assert_eq!(
            events,
            vec![Event::RewardPurchased {
                name: "30-Min Netflix Break".to_string(),
                cost: 10
            }]
        );
        assert_eq!(game.progression.focus_coins, 15);
    }

    #[test]
    fn test_purchase_with_insufficient_coins_changes_nothing() {
        let mut game = GameState::new();
        game.progression.focus_coins = 5;
        let err = game.purchase(1).unwrap_err(); // Takeout, 20 FC
        assert_eq!(
            err,
            ValidationError::InsufficientCoins {
                cost: 20,
                balance: 5
            }
        );
        assert_eq!(game.progression.focus_coins, 5);
    }

    #[test]
    fn test_purchase_out_of_range_is_rejected() {
        let mut game = GameState::new();
        game.progression.focus_coins = 100;
        let err = game.purchase(10).unwrap_err();
        assert_eq!(err, ValidationError::InvalidSelection { index: 10, len: 3 });
        assert_eq!(game.progression.focus_coins, 100);
    }

    #[test]
    fn test_remove_subject_reports_cascade() {
        let mut game = GameState::new();
        let events = game.remove_subject("Chemistry");
        assert_eq!(
            events,
            vec![Event::SubjectRemoved {
                name: "Chemistry".to_string(),
                quests_removed: 1
            }]
        );
        assert!(game.remove_subject("Chemistry").is_empty());
    }
}
