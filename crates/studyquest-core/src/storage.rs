//! SQLite-backed persistence for the game state.
//!
//! The whole state is one JSON blob under a fixed key in a `kv` table.
//! The blob is versionless: on load, each missing field falls back to its
//! seed default individually, so a partial or older blob never rejects the
//! whole save.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::catalog::{seed_quests, seed_store_items, seed_subjects, Catalog, Quest, StoreItem, Subject};
use crate::error::StorageError;
use crate::game::GameState;
use crate::progression::Progression;
use crate::streak::Streak;

/// The fixed kv key holding the save blob.
const STATE_KEY: &str = "studyquest/state";

/// Returns `~/.config/studyquest[-dev]/` based on STUDYQUEST_ENV.
///
/// Set STUDYQUEST_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYQUEST_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studyquest-dev")
    } else {
        base_dir.join("studyquest")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// SQLite database holding the save blob.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/studyquest/studyquest.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("studyquest.db");
        Self::open_at(&path)
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Persist the full game state, replacing any previous save.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save_state(&self, state: &GameState) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&SaveData::from_state(state))?;
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![STATE_KEY, blob],
        )?;
        Ok(())
    }

    /// Load the saved game state, or `None` when no save exists.
    ///
    /// # Errors
    /// Returns an error only when the blob is present but not parseable as
    /// JSON at all; individual missing fields default silently.
    pub fn load_state(&self) -> Result<Option<GameState>, StorageError> {
        let blob: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![STATE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match blob {
            Some(blob) => {
                let data: SaveData = serde_json::from_str(&blob)?;
                Ok(Some(data.into_state()))
            }
            None => Ok(None),
        }
    }
}

/// The versionless on-disk blob. Field-wise `serde(default)`s make every
/// field individually optional; the defaults are the fresh-profile seeds.
#[derive(Debug, Serialize, Deserialize)]
struct SaveData {
    #[serde(default)]
    xp: u32,
    #[serde(default = "default_level")]
    level: u32,
    #[serde(default = "default_xp_required")]
    xp_required: u32,
    #[serde(default = "seed_quests")]
    quests: Vec<Quest>,
    #[serde(default = "seed_subjects")]
    subjects: Vec<Subject>,
    #[serde(default = "seed_store_items")]
    store_items: Vec<StoreItem>,
    #[serde(default = "default_next_quest_id")]
    next_quest_id: u32,
    #[serde(default)]
    focus_coins: u32,
    #[serde(default)]
    streak: u32,
    /// ISO calendar date, no time component
    #[serde(default)]
    last_completion_date: Option<NaiveDate>,
}

fn default_level() -> u32 {
    1
}

fn default_xp_required() -> u32 {
    100
}

fn default_next_quest_id() -> u32 {
    Catalog::seed().next_quest_id
}

impl SaveData {
    fn from_state(state: &GameState) -> Self {
        Self {
            xp: state.progression.xp,
            level: state.progression.level,
            xp_required: state.progression.xp_required,
            quests: state.catalog.quests.clone(),
            subjects: state.catalog.subjects.clone(),
            store_items: state.catalog.store_items.clone(),
            next_quest_id: state.catalog.next_quest_id,
            focus_coins: state.progression.focus_coins,
            streak: state.streak.days,
            last_completion_date: state.streak.last_completion,
        }
    }

    fn into_state(self) -> GameState {
        GameState {
            progression: Progression {
                xp: self.xp,
                level: self.level,
                xp_required: self.xp_required,
                focus_coins: self.focus_coins,
            },
            streak: Streak {
                days: self.streak,
                last_completion: self.last_completion_date,
            },
            catalog: Catalog {
                quests: self.quests,
                subjects: self.subjects,
                store_items: self.store_items,
                next_quest_id: self.next_quest_id,
            },
        }
    }
}
