//! XP accumulation, leveling, and the Focus Coin balance.
//!
//! Leveling is a carry loop: XP past the threshold rolls into the next
//! level, the threshold grows by half each level, and each level gained
//! pays a fixed coin bonus. One large award may clear several levels.

use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Coins paid out per level gained.
pub const LEVEL_UP_COINS: u32 = 10;

/// Threshold multiplier applied on each level-up.
const XP_GROWTH: f64 = 1.5;

/// XP, level, next-level threshold, and spendable Focus Coins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    /// XP within the current level; always below `xp_required`
    pub xp: u32,

    /// Current level, starting at 1
    pub level: u32,

    /// XP needed to reach the next level
    pub xp_required: u32,

    /// Focus Coin balance
    pub focus_coins: u32,
}

impl Progression {
    /// Apply an XP award, carrying across as many level-ups as it covers.
    ///
    /// Returns one [`Event::LevelUp`] per level gained, in order.
    pub fn apply_xp(&mut self, amount: u32) -> Vec<Event> {
        let mut events = Vec::new();
        self.xp += amount;

        while self.xp >= self.xp_required {
            self.xp -= self.xp_required;
            self.level += 1;
            self.xp_required = (f64::from(self.xp_required) * XP_GROWTH).round() as u32;
            self.focus_coins += LEVEL_UP_COINS;
            events.push(Event::LevelUp {
                level: self.level,
                coins_awarded: LEVEL_UP_COINS,
            });
        }

        events
    }

    /// Debit coins. The caller has already checked the balance.
    pub(crate) fn spend_coins(&mut self, amount: u32) {
        debug_assert!(amount <= self.focus_coins);
        self.focus_coins = self.focus_coins.saturating_sub(amount);
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            xp_required: 100,
            focus_coins: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_small_award_does_not_level() {
        let mut p = Progression::default();
        let events = p.apply_xp(99);
        assert!(events.is_empty());
        assert_eq!(p.level, 1);
        assert_eq!(p.xp, 99);
        assert_eq!(p.xp_required, 100);
        assert_eq!(p.focus_coins, 0);
    }

    #[test]
    fn test_exact_threshold_levels_once() {
        let mut p = Progression::default();
        let events = p.apply_xp(100);
        assert_eq!(
            events,
            vec![Event::LevelUp {
                level: 2,
                coins_awarded: LEVEL_UP_COINS
            }]
        );
        assert_eq!(p.xp, 0);
        assert_eq!(p.xp_required, 150);
        assert_eq!(p.focus_coins, 10);
    }

    #[test]
    fn test_large_award_levels_twice_in_one_call() {
        // 250 XP from fresh: 100 to reach level 2 (threshold 150),
        // 150 more to reach level 3 (threshold round(150 * 1.5) = 225).
        let mut p = Progression::default();
        let events = p.apply_xp(250);
        assert_eq!(events.len(), 2);
        assert_eq!(p.level, 3);
        assert_eq!(p.xp, 0);
        assert_eq!(p.xp_required, 225);
        assert_eq!(p.focus_coins, 20);
    }

    #[test]
    fn test_partial_carry_after_multi_level() {
        let mut p = Progression::default();
        p.apply_xp(300);
        assert_eq!(p.level, 3);
        assert_eq!(p.xp, 50);
        assert_eq!(p.xp_required, 225);
    }

    proptest! {
        #[test]
        fn prop_xp_stays_below_threshold_and_level_never_drops(
            awards in proptest::collection::vec(1u32..2_000, 1..40)
        ) {
            let mut p = Progression::default();
            let mut last_level = p.level;
            for award in awards {
                p.apply_xp(award);
                prop_assert!(p.xp < p.xp_required);
                prop_assert!(p.level >= last_level);
                last_level = p.level;
            }
        }

        #[test]
        fn prop_coins_track_levels_gained(award in 1u32..10_000) {
            let mut p = Progression::default();
            let events = p.apply_xp(award);
            let levels_gained = (p.level - 1) as usize;
            prop_assert_eq!(events.len(), levels_gained);
            prop_assert_eq!(p.focus_coins, levels_gained as u32 * LEVEL_UP_COINS);
        }
    }
}
