//! Consecutive-day completion streak.
//!
//! Streak transitions compare calendar dates exactly, by `NaiveDate`
//! equality and whole-day differences. No clock arithmetic: the caller
//! supplies "today", so the tracker is deterministic and testable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Coins paid out each time the streak hits a multiple of seven days.
pub const STREAK_BONUS_COINS: u32 = 20;

const STREAK_BONUS_INTERVAL: u32 = 7;

/// Streak length and the calendar day of the last completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Streak {
    /// Consecutive days with at least one completion; 0 only before the
    /// first completion ever
    pub days: u32,

    /// Day of the most recent completion
    pub last_completion: Option<NaiveDate>,
}

impl Streak {
    /// Record a quest completion on `today` and return the resulting events.
    ///
    /// A second call on the same day is a no-op: the day is already counted
    /// and is not re-evaluated, so the weekly bonus fires at most once per
    /// threshold crossing.
    pub fn record_completion(&mut self, today: NaiveDate) -> Vec<Event> {
        let mut events = Vec::new();

        match self.last_completion {
            None => {
                self.days = 1;
                events.push(Event::StreakStarted);
            }
            // Same day, or a clock that went backwards: nothing to evaluate.
            Some(last) if last >= today => return events,
            Some(last) => {
                let gap = today.signed_duration_since(last).num_days();
                if gap == 1 {
                    self.days += 1;
                    events.push(Event::StreakExtended { days: self.days });
                } else {
                    self.days = 1;
                    events.push(Event::StreakReset);
                }
            }
        }

        if self.days % STREAK_BONUS_INTERVAL == 0 {
            events.push(Event::StreakBonus {
                days: self.days,
                coins_awarded: STREAK_BONUS_COINS,
            });
        }

        self.last_completion = Some(today);
        events
    }
}
