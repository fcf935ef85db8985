//! Player economy state
//!
//! Cash balance and fleet size, mutated by scoring events and persisted
//! between sessions.

use serde::{Deserialize, Serialize};

/// Receiver of scoring events from the world
pub trait Economy {
    /// Credit cash to the player
    fn award_cash(&mut self, amount: u64);
    /// Persist player progress after a change
    fn save_progress(&mut self);
}

/// Player progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Cash balance
    pub cash: u64,
    /// Number of ships owned
    pub ships: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self { cash: 0, ships: 1 }
    }
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }
}

/// In-memory economy; nothing is written anywhere
impl Economy for Player {
    fn award_cash(&mut self, amount: u64) {
        self.cash = self.cash.saturating_add(amount);
    }

    fn save_progress(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_accumulates() {
        let mut player = Player::new();
        assert_eq!(player.ships, 1);
        player.award_cash(25);
        player.award_cash(5);
        assert_eq!(player.cash, 30);
    }

    #[test]
    fn test_award_saturates() {
        let mut player = Player { cash: u64::MAX - 1, ships: 1 };
        player.award_cash(10);
        assert_eq!(player.cash, u64::MAX);
    }
}
