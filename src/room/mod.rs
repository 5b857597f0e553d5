//! Room registry: the lobby that seats players and starts games.
//!
//! The registry is an explicit service passed to whoever needs it. The turn
//! engine never depends on it.

pub mod registry;

pub use registry::{Room, RoomRegistry};
