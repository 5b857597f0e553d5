//! In-memory room registry.
//!
//! Rooms are keyed by a short code. All create/join/leave/start calls go
//! through one mutex, so the registry can be shared between threads by
//! reference. Games started from a room are independent values owned by the
//! caller.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{Color, GameConfig, GameRng, Player, RoomError};
use crate::games::ludo::LudoGame;

/// Characters used in room codes.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Random draws before giving up on finding an unused room code.
const MAX_CODE_ATTEMPTS: usize = 1_000;

/// A lobby room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub code: String,
    /// Name of the current host.
    pub host: String,
    /// Players in join order.
    pub players: Vec<Player>,
    pub capacity: usize,
    pub game_started: bool,
}

impl Room {
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.players.len() >= self.capacity
    }

    #[must_use]
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// First color in canonical order not yet taken.
    fn free_color(&self) -> Option<Color> {
        Color::ALL
            .into_iter()
            .find(|c| self.players.iter().all(|p| p.color != *c))
    }
}

struct Inner {
    rooms: FxHashMap<String, Room>,
    code_rng: GameRng,
    game_rng: GameRng,
}

/// Registry of open rooms.
pub struct RoomRegistry {
    config: GameConfig,
    inner: Mutex<Inner>,
}

impl RoomRegistry {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let base = GameRng::new(config.seed);
        Self {
            inner: Mutex::new(Inner {
                rooms: FxHashMap::default(),
                code_rng: base.for_context("room-code"),
                game_rng: base.for_context("dice"),
            }),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Open a room with `host_name` seated as red. Returns the room code.
    pub fn create_room(&self, host_name: &str) -> Result<String, RoomError> {
        let name = normalize_name(host_name)?;
        let length = self.config.room_code_length;
        let mut inner = self.inner.lock();
        let Inner { rooms, code_rng, .. } = &mut *inner;

        let code_space = u32::try_from(length)
            .ok()
            .and_then(|len| CODE_ALPHABET.len().checked_pow(len));
        if code_space.is_some_and(|space| rooms.len() >= space) {
            warn!(rooms = rooms.len(), length, "Room codes exhausted");
            return Err(RoomError::NoFreeRoomCode(length));
        }

        let code = (0..MAX_CODE_ATTEMPTS)
            .map(|_| generate_code(code_rng, length))
            .find(|code| !rooms.contains_key(code))
            .ok_or(RoomError::NoFreeRoomCode(length))?;

        let room = Room {
            code: code.clone(),
            host: name.clone(),
            players: vec![Player::new(name.clone(), Color::Red).host()],
            capacity: self.config.room_capacity,
            game_started: false,
        };
        rooms.insert(code.clone(), room);

        info!(room = %code, host = %name, "Created room");
        Ok(code)
    }

    /// Join an open room. The player gets the first free color.
    pub fn join_room(&self, code: &str, player_name: &str) -> Result<Room, RoomError> {
        let name = normalize_name(player_name)?;
        let code = self.normalize_code(code)?;
        let mut inner = self.inner.lock();

        let room = inner
            .rooms
            .get_mut(&code)
            .ok_or_else(|| RoomError::RoomNotFound(code.clone()))?;

        if room.game_started {
            return Err(RoomError::GameAlreadyStarted(code));
        }
        if room.is_full() {
            return Err(RoomError::RoomFull(code));
        }
        if room.player(&name).is_some() {
            return Err(RoomError::NameTaken(name));
        }
        let color = room.free_color().ok_or_else(|| RoomError::RoomFull(code.clone()))?;

        room.players.push(Player::new(name.clone(), color));
        info!(room = %code, player = %name, %color, "Joined room");
        Ok(room.clone())
    }

    /// Leave a room. Empty rooms are removed; a departing host hands over to
    /// the earliest remaining player.
    pub fn leave_room(&self, code: &str, player_name: &str) -> Result<(), RoomError> {
        let code = self.normalize_code(code)?;
        let name = player_name.trim();
        let mut inner = self.inner.lock();

        let room = inner
            .rooms
            .get_mut(&code)
            .ok_or_else(|| RoomError::RoomNotFound(code.clone()))?;
        let index = room
            .players
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| RoomError::PlayerNotFound(name.to_string()))?;

        let departed = room.players.remove(index);
        info!(room = %code, player = %departed.name, "Left room");

        if room.players.is_empty() {
            inner.rooms.remove(&code);
            debug!(room = %code, "Removed empty room");
        } else if departed.is_host {
            let new_host = &mut room.players[0];
            new_host.is_host = true;
            room.host = new_host.name.clone();
            info!(room = %code, host = %room.host, "Host changed");
        }
        Ok(())
    }

    /// Start a game in a room. Only the host may start it.
    ///
    /// Turn order follows canonical color order. Starting again on a room
    /// whose game already started deals a fresh game.
    pub fn start_game(&self, code: &str, requester: &str) -> Result<LudoGame, RoomError> {
        let code = self.normalize_code(code)?;
        let mut inner = self.inner.lock();
        let Inner { rooms, game_rng, .. } = &mut *inner;

        let room = rooms
            .get_mut(&code)
            .ok_or_else(|| RoomError::RoomNotFound(code.clone()))?;
        let is_host = room.player(requester.trim()).is_some_and(|p| p.is_host);
        if !is_host {
            return Err(RoomError::NotHost);
        }
        if room.players.len() < 2 {
            return Err(RoomError::NotEnoughPlayers(room.players.len()));
        }

        let mut seats = room.players.clone();
        seats.sort_by_key(|p| p.color);

        let game = LudoGame::builder().players(seats).rng(game_rng.fork()).build()?;
        room.game_started = true;

        info!(room = %code, players = room.players.len(), "Game started");
        Ok(game)
    }

    /// Copy of a room's current state.
    #[must_use]
    pub fn room(&self, code: &str) -> Option<Room> {
        let code = code.trim().to_ascii_uppercase();
        self.inner.lock().rooms.get(&code).cloned()
    }

    #[must_use]
    pub fn room_count(&self) -> usize {
        self.inner.lock().rooms.len()
    }

    fn normalize_code(&self, code: &str) -> Result<String, RoomError> {
        let code = code.trim().to_ascii_uppercase();
        let valid = code.len() == self.config.room_code_length
            && code.bytes().all(|b| CODE_ALPHABET.contains(&b));
        if valid {
            Ok(code)
        } else {
            Err(RoomError::InvalidRoomCode(code))
        }
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

fn normalize_name(name: &str) -> Result<String, RoomError> {
    let name = name.trim();
    if name.is_empty() {
        Err(RoomError::InvalidName)
    } else {
        Ok(name.to_string())
    }
}

fn generate_code(rng: &mut GameRng, length: usize) -> String {
    (0..length)
        .map(|_| CODE_ALPHABET[rng.gen_range_usize(0..CODE_ALPHABET.len())] as char)
        .collect()
}
