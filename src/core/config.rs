//! Engine configuration.

use serde::{Deserialize, Serialize};

use super::player::{MAX_PLAYERS, MIN_PLAYERS};

/// Configuration for a room registry and the games it starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Base seed for dice and room codes.
    /// Same seed produces the same room codes and dice sequences.
    pub seed: u64,

    /// Maximum players per room (2-6).
    pub room_capacity: usize,

    /// Length of generated room codes.
    pub room_code_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            room_capacity: 4,
            room_code_length: 4,
        }
    }
}

impl GameConfig {
    /// Set the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the room capacity, clamped to 2-6.
    pub fn with_room_capacity(mut self, capacity: usize) -> Self {
        self.room_capacity = capacity.clamp(MIN_PLAYERS, MAX_PLAYERS);
        self
    }

    /// Set the room code length (at least 1).
    pub fn with_room_code_length(mut self, length: usize) -> Self {
        self.room_code_length = length.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.room_capacity, 4);
        assert_eq!(config.room_code_length, 4);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_seed(123)
            .with_room_capacity(6)
            .with_room_code_length(6);

        assert_eq!(config.seed, 123);
        assert_eq!(config.room_capacity, 6);
        assert_eq!(config.room_code_length, 6);
    }

    #[test]
    fn test_capacity_is_clamped() {
        assert_eq!(GameConfig::default().with_room_capacity(1).room_capacity, 2);
        assert_eq!(GameConfig::default().with_room_capacity(9).room_capacity, 6);
        assert_eq!(GameConfig::default().with_room_code_length(0).room_code_length, 1);
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
