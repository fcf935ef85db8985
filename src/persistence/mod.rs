//! Save/load of player progress
//!
//! Features:
//! - Versioned JSON envelope
//! - Atomic file writes (tmp → save)
//! - In-memory store for tests and headless hosts

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::player::{Economy, Player};

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("save file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported save version {found} (expected {expected})", expected = SAVE_VERSION)]
    UnsupportedVersion { found: u32 },
}

/// On-disk wrapper around the player record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveEnvelope {
    pub version: u32,
    pub player: Player,
}

impl SaveEnvelope {
    pub fn new(player: Player) -> Self {
        Self {
            version: SAVE_VERSION,
            player,
        }
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        let envelope: Self = serde_json::from_str(json)?;
        if envelope.version != SAVE_VERSION {
            return Err(PersistError::UnsupportedVersion {
                found: envelope.version,
            });
        }
        Ok(envelope)
    }
}

/// Backing store for player progress
pub trait ProgressStore {
    /// Load saved progress; `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<Player>, PersistError>;
    fn save(&mut self, player: &Player) -> Result<(), PersistError>;
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> Result<Option<Player>, PersistError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(SaveEnvelope::from_json(&json)?.player))
    }

    fn save(&mut self, player: &Player) -> Result<(), PersistError> {
        let json = SaveEnvelope::new(player.clone()).to_json()?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Store that keeps the last save in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub saved: Option<String>,
    pub save_count: u32,
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<Option<Player>, PersistError> {
        self.saved
            .as_deref()
            .map(|json| SaveEnvelope::from_json(json).map(|e| e.player))
            .transpose()
    }

    fn save(&mut self, player: &Player) -> Result<(), PersistError> {
        self.saved = Some(SaveEnvelope::new(player.clone()).to_json()?);
        self.save_count += 1;
        Ok(())
    }
}

/// Economy that writes progress through a store on every save trigger
#[derive(Debug)]
pub struct SavingEconomy<S: ProgressStore> {
    pub player: Player,
    store: S,
}

impl<S: ProgressStore> SavingEconomy<S> {
    /// Restore saved progress from `store`, or start fresh
    pub fn open(store: S) -> Self {
        let player = match store.load() {
            Ok(Some(player)) => {
                log::info!("Loaded player progress: cash={} ships={}", player.cash, player.ships);
                player
            }
            Ok(None) => {
                log::info!("No saved progress, starting fresh");
                Player::new()
            }
            Err(err) => {
                log::warn!("Could not load progress ({}), starting fresh", err);
                Player::new()
            }
        };
        Self { player, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ProgressStore> Economy for SavingEconomy<S> {
    fn award_cash(&mut self, amount: u64) {
        self.player.award_cash(amount);
    }

    fn save_progress(&mut self) {
        if let Err(err) = self.store.save(&self.player) {
            log::warn!("Failed to save progress: {}", err);
        }
    }
}
