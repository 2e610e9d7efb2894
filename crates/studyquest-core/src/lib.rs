//! # Study Quest Core Library
//!
//! This library provides the core progression logic for Study Quest, a
//! single-user gamified study tracker: completing quests earns XP and
//! levels, keeps a daily streak alive, and pays out Focus Coins to spend
//! in a reward store. The presentation layer (whatever renders lists and
//! shows notifications) is a thin shell over this crate.
//!
//! ## Architecture
//!
//! - **Game state**: one explicit [`GameState`] struct owning progression,
//!   streak, and catalogs; operations on it return [`Event`]s for the
//!   caller to display and typed errors for it to report
//! - **Dates**: the caller supplies "today" as a calendar date, so streak
//!   logic is deterministic and clock-free
//! - **Storage**: the whole state is one JSON blob under a fixed key in a
//!   SQLite kv table; missing fields default individually on load
//!
//! ## Key Components
//!
//! - [`GameState`]: the operations facade (complete, purchase, edit)
//! - [`Progression`]: XP, levels, and the Focus Coin balance
//! - [`Streak`]: consecutive-day completion tracking
//! - [`Catalog`]: quest, subject, and reward-store lists
//! - [`Database`]: save/load persistence

pub mod catalog;
pub mod error;
pub mod events;
pub mod game;
pub mod progression;
pub mod storage;
pub mod streak;

pub use catalog::{Catalog, Quest, StoreItem, Subject};
pub use error::{CoreError, Result, StorageError, ValidationError};
pub use events::Event;
pub use game::GameState;
pub use progression::{Progression, LEVEL_UP_COINS};
pub use storage::{data_dir, Database};
pub use streak::{Streak, STREAK_BONUS_COINS};
