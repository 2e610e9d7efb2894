//! Quest, subject, and reward-store catalogs.
//!
//! The catalog owns the three user-editable lists and the quest id counter.
//! Subjects are referenced from quests by name, not by ownership; removing a
//! subject cascades to every quest that names it.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A discrete completable study task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    /// Unique id, monotonically assigned from `Catalog::next_quest_id`
    pub id: u32,

    /// Display name
    pub name: String,

    /// XP awarded on completion (always positive)
    pub xp: u32,

    /// Flips true once; recurring quests are recreated instead of reset
    pub completed: bool,

    /// Owning subject, by name
    pub subject: String,

    /// Recurring quests are deleted and recreated with a fresh id after
    /// completion. Older save blobs predate this field.
    #[serde(default)]
    pub recurring: bool,
}

/// A study subject accumulating XP from its completed quests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique name (user-added names are case-normalized)
    pub name: String,

    /// Total XP earned across this subject's quests
    pub total_xp: u32,
}

/// A purchasable reward in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreItem {
    pub name: String,

    /// Cost in Focus Coins (always positive)
    pub cost: u32,
}

/// The three catalogs plus the quest id counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub quests: Vec<Quest>,
    pub subjects: Vec<Subject>,
    pub store_items: Vec<StoreItem>,
    pub next_quest_id: u32,
}

impl Catalog {
    /// The default catalog a fresh profile starts from.
    pub fn seed() -> Self {
        Self {
            quests: seed_quests(),
            subjects: seed_subjects(),
            store_items: seed_store_items(),
            next_quest_id: 4,
        }
    }

    pub fn quest(&self, id: u32) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    pub fn subject(&self, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.name == name)
    }

    /// Add a user-authored quest and return its assigned id.
    ///
    /// # Errors
    /// Rejects an empty name or subject, and a zero XP value.
    pub fn add_quest(
        &mut self,
        name: &str,
        xp: u32,
        subject: &str,
        recurring: bool,
    ) -> Result<u32, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField { field: "quest name" });
        }
        if subject.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "subject" });
        }
        if xp == 0 {
            return Err(ValidationError::NotPositive { field: "quest XP" });
        }

        let id = self.next_quest_id;
        self.next_quest_id += 1;
        self.quests.push(Quest {
            id,
            name: name.to_string(),
            xp,
            completed: false,
            subject: subject.trim().to_string(),
            recurring,
        });
        Ok(id)
    }

    /// Remove a quest by id. Returns whether anything was removed.
    pub fn remove_quest(&mut self, id: u32) -> bool {
        let before = self.quests.len();
        self.quests.retain(|q| q.id != id);
        self.quests.len() != before
    }

    /// Add a subject, normalizing its name (first letter upper, rest lower).
    ///
    /// Returns the normalized name.
    ///
    /// # Errors
    /// Rejects an empty name and a name already present after normalization.
    pub fn add_subject(&mut self, name: &str) -> Result<String, ValidationError> {
        let normalized = normalize_subject_name(name);
        if normalized.is_empty() {
            return Err(ValidationError::EmptyField { field: "subject name" });
        }
        if self.subjects.iter().any(|s| s.name == normalized) {
            return Err(ValidationError::DuplicateSubject { name: normalized });
        }
        self.subjects.push(Subject {
            name: normalized.clone(),
            total_xp: 0,
        });
        Ok(normalized)
    }

    /// Remove a subject and every quest referencing it.
    ///
    /// Returns the number of cascaded quest deletions, or `None` if no such
    /// subject exists.
    pub fn remove_subject(&mut self, name: &str) -> Option<usize> {
        let before = self.subjects.len();
        self.subjects.retain(|s| s.name != name);
        if self.subjects.len() == before {
            return None;
        }
        let quests_before = self.quests.len();
        self.quests.retain(|q| q.subject != name);
        Some(quests_before - self.quests.len())
    }

    /// Add a reward to the store.
    ///
    /// # Errors
    /// Rejects an empty name and a zero cost.
    pub fn add_store_item(&mut self, name: &str, cost: u32) -> Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField { field: "reward name" });
        }
        if cost == 0 {
            return Err(ValidationError::NotPositive { field: "reward cost" });
        }
        self.store_items.push(StoreItem {
            name: name.to_string(),
            cost,
        });
        Ok(())
    }

    /// Credit XP to a subject, if it still exists. Quests may reference a
    /// deleted or never-created subject; those completions credit nothing.
    pub fn credit_subject_xp(&mut self, name: &str, xp: u32) {
        if let Some(subject) = self.subjects.iter_mut().find(|s| s.name == name) {
            subject.total_xp += xp;
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seed()
    }
}

/// First letter uppercased, the rest lowercased, surrounding whitespace
/// trimmed. Seed subjects (e.g. "RS") bypass this; only user input is
/// normalized.
pub(crate) fn normalize_subject_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

pub(crate) fn seed_quests() -> Vec<Quest> {
    vec![
        Quest {
            id: 1,
            name: "Review Chemistry Topic 1: Atomic Structure".to_string(),
            xp: 50,
            completed: false,
            subject: "Chemistry".to_string(),
            recurring: false,
        },
        Quest {
            id: 2,
            name: "Maths: Complete a full Non-Calculator Past Paper".to_string(),
            xp: 100,
            completed: false,
            subject: "Maths".to_string(),
            recurring: false,
        },
        Quest {
            id: 3,
            name: "Daily Goal: Study for 30 minutes".to_string(),
            xp: 20,
            completed: false,
            subject: "General".to_string(),
            recurring: true,
        },
    ]
}

pub(crate) fn seed_subjects() -> Vec<Subject> {
    ["Maths", "English", "Biology", "History", "Chemistry", "Physics", "German", "RS"]
        .iter()
        .map(|name| Subject {
            name: (*name).to_string(),
            total_xp: 0,
        })
        .collect()
}

pub(crate) fn seed_store_items() -> Vec<StoreItem> {
    vec![
        StoreItem {
            name: "30-Min Netflix Break".to_string(),
            cost: 10,
        },
        StoreItem {
            name: "Order Takeout/Snack".to_string(),
            cost: 20,
        },
        StoreItem {
            name: "Skip One Chore".to_string(),
            cost: 5,
        },
    ]
}
